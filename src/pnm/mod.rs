//! Binary PNM family: P4 (PBM), P5 (PGM), P6 (PPM).

mod encode;

pub use encode::{encode_pbm, encode_pgm, encode_ppm, pack_byte};

use crate::error::PnmError;
use crate::pixel::ColorModel;
use core::str::FromStr;

/// Which PNM sub-format to write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PnmFormat {
    /// P4: binary black and white (PBM).
    Pbm,
    /// P5: binary grayscale (PGM).
    Pgm,
    /// P6: binary RGB (PPM).
    Ppm,
}

impl PnmFormat {
    /// Magic number opening the header.
    pub fn magic(self) -> &'static str {
        match self {
            PnmFormat::Pbm => "P4",
            PnmFormat::Pgm => "P5",
            PnmFormat::Ppm => "P6",
        }
    }

    /// Samples per pixel in the raster (PBM packs 1-bit samples).
    pub fn channels(self) -> usize {
        match self {
            PnmFormat::Pbm | PnmFormat::Pgm => 1,
            PnmFormat::Ppm => 3,
        }
    }

    /// Maxval this format uses for an image declaring `model`.
    ///
    /// PBM has no maxval; [`Maxval::Eight`] is returned and ignored.
    pub fn maxval_for(self, model: ColorModel) -> Maxval {
        match self {
            PnmFormat::Pbm => Maxval::Eight,
            PnmFormat::Pgm => Maxval::for_gray(model),
            PnmFormat::Ppm => Maxval::for_color(model),
        }
    }
}

/// Numeric selectors: 0 = PBM, 1 = PGM, 2 = PPM.
impl TryFrom<u32> for PnmFormat {
    type Error = PnmError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(PnmFormat::Pbm),
            1 => Ok(PnmFormat::Pgm),
            2 => Ok(PnmFormat::Ppm),
            _ => Err(PnmError::InvalidFormat(format!(
                "selector {tag} (expected 0, 1 or 2)"
            ))),
        }
    }
}

impl FromStr for PnmFormat {
    type Err = PnmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pbm" => Ok(PnmFormat::Pbm),
            "pgm" => Ok(PnmFormat::Pgm),
            "ppm" => Ok(PnmFormat::Ppm),
            _ => Err(PnmError::InvalidFormat(format!(
                "{s:?} (expected pbm, pgm or ppm)"
            ))),
        }
    }
}

/// Header maxval for PGM and PPM, which fixes the sample width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Maxval {
    /// 255: one byte per sample.
    Eight,
    /// 65535: two bytes per sample, most significant first.
    Sixteen,
}

impl Maxval {
    /// 65535 for a 16-bit grayscale image, 255 otherwise.
    pub fn for_gray(model: ColorModel) -> Self {
        if model == ColorModel::Gray16 {
            Maxval::Sixteen
        } else {
            Maxval::Eight
        }
    }

    /// 65535 for a 48-bit color image, 255 otherwise.
    pub fn for_color(model: ColorModel) -> Self {
        if model == ColorModel::Rgb48 {
            Maxval::Sixteen
        } else {
            Maxval::Eight
        }
    }

    pub fn value(self) -> u16 {
        match self {
            Maxval::Eight => 255,
            Maxval::Sixteen => 65535,
        }
    }

    pub fn bytes_per_sample(self) -> usize {
        match self {
            Maxval::Eight => 1,
            Maxval::Sixteen => 2,
        }
    }
}

/// Header text for `format`. `maxval` is ignored for PBM.
pub fn header(format: PnmFormat, width: u32, height: u32, maxval: Maxval) -> String {
    match format {
        PnmFormat::Pbm => format!("P4\n{width} {height}\n"),
        _ => format!(
            "{}\n{width} {height}\n{}\n",
            format.magic(),
            maxval.value()
        ),
    }
}

/// Bytes in one raster row, or `None` on overflow.
pub fn row_len(format: PnmFormat, width: u32, maxval: Maxval) -> Option<usize> {
    let w = width as usize;
    match format {
        PnmFormat::Pbm => Some(w.div_ceil(8)),
        _ => w
            .checked_mul(format.channels())
            .and_then(|n| n.checked_mul(maxval.bytes_per_sample())),
    }
}

/// Bytes of per-row scratch an encoder allocates: the output row, plus
/// one black/white level per pixel for PBM.
pub fn scratch_len(format: PnmFormat, width: u32, maxval: Maxval) -> Option<usize> {
    let row = row_len(format, width, maxval)?;
    match format {
        PnmFormat::Pbm => row.checked_add(width as usize),
        _ => Some(row),
    }
}

/// Total encoded size: header plus raster.
pub fn encoded_len(
    format: PnmFormat,
    width: u32,
    height: u32,
    maxval: Maxval,
) -> Result<usize, PnmError> {
    row_len(format, width, maxval)
        .and_then(|row| row.checked_mul(height as usize))
        .and_then(|raster| raster.checked_add(header(format, width, height, maxval).len()))
        .ok_or(PnmError::DimensionsTooLarge { width, height })
}
