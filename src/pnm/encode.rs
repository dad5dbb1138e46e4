//! Streaming P4/P5/P6 writers.
//!
//! Each call writes the header with one `write_all`, then one `write_all`
//! per row, top row first. A failed write ends the call immediately; the
//! stream keeps whatever was written before it.

use std::io::Write;

use enough::Stop;

use super::{Maxval, PnmFormat, header, row_len};
use crate::error::PnmError;
use crate::image::PixelSource;
use crate::pixel::{Color, Sample, to_bilevel, to_gray, to_rgb};

/// Pack up to 8 black/white samples into one PBM byte.
///
/// The first sample lands in the most significant bit. A zero sample
/// (black) sets its bit, anything else clears it. With fewer than 8
/// samples the unused low bits stay 0; samples past the 8th are ignored.
pub fn pack_byte(samples: &[u8]) -> u8 {
    let n = samples.len().min(8);
    samples[..n]
        .iter()
        .rev()
        .fold(0, |b, &s| (b >> 1) | if s == 0 { 0x80 } else { 0 })
}

/// Write `image` as P4: one bit per pixel, rows padded to a byte.
pub fn encode_pbm<W, I>(w: &mut W, image: &I, stop: &dyn Stop) -> Result<(), PnmError>
where
    W: Write + ?Sized,
    I: PixelSource + ?Sized,
{
    let bounds = image.bounds();
    let (width, height) = (bounds.width(), bounds.height());
    let packed_len = row_len(PnmFormat::Pbm, width, Maxval::Eight)
        .ok_or(PnmError::DimensionsTooLarge { width, height })?;

    stop.check()?;
    w.write_all(header(PnmFormat::Pbm, width, height, Maxval::Eight).as_bytes())?;

    let mut levels = vec![0u8; width as usize];
    let mut packed = vec![0u8; packed_len];
    for (row, y) in bounds.ys().enumerate() {
        if row % 16 == 0 {
            stop.check()?;
        }
        for (level, x) in levels.iter_mut().zip(bounds.xs()) {
            *level = to_bilevel(image.pixel(x, y));
        }
        for (byte, group) in packed.iter_mut().zip(levels.chunks(8)) {
            *byte = pack_byte(group);
        }
        w.write_all(&packed)?;
    }
    Ok(())
}

/// Write `image` as P5 with the given maxval.
pub fn encode_pgm<W, I>(
    w: &mut W,
    image: &I,
    maxval: Maxval,
    stop: &dyn Stop,
) -> Result<(), PnmError>
where
    W: Write + ?Sized,
    I: PixelSource + ?Sized,
{
    match maxval {
        Maxval::Eight => {
            write_samples(w, image, PnmFormat::Pgm, maxval, |c| [to_gray::<u8>(c)], stop)
        }
        Maxval::Sixteen => {
            write_samples(w, image, PnmFormat::Pgm, maxval, |c| [to_gray::<u16>(c)], stop)
        }
    }
}

/// Write `image` as P6 with the given maxval.
pub fn encode_ppm<W, I>(
    w: &mut W,
    image: &I,
    maxval: Maxval,
    stop: &dyn Stop,
) -> Result<(), PnmError>
where
    W: Write + ?Sized,
    I: PixelSource + ?Sized,
{
    match maxval {
        Maxval::Eight => write_samples(w, image, PnmFormat::Ppm, maxval, to_rgb::<u8>, stop),
        Maxval::Sixteen => write_samples(w, image, PnmFormat::Ppm, maxval, to_rgb::<u16>, stop),
    }
}

/// Shared P5/P6 row loop. `convert` yields the `N` samples of one pixel.
fn write_samples<W, I, S, const N: usize>(
    w: &mut W,
    image: &I,
    format: PnmFormat,
    maxval: Maxval,
    convert: impl Fn(Color) -> [S; N],
    stop: &dyn Stop,
) -> Result<(), PnmError>
where
    W: Write + ?Sized,
    I: PixelSource + ?Sized,
    S: Sample,
{
    debug_assert_eq!(S::MAX, maxval.value());
    debug_assert_eq!(N, format.channels());

    let bounds = image.bounds();
    let (width, height) = (bounds.width(), bounds.height());
    let len = row_len(format, width, maxval)
        .ok_or(PnmError::DimensionsTooLarge { width, height })?;

    stop.check()?;
    w.write_all(header(format, width, height, maxval).as_bytes())?;

    let mut buf = vec![0u8; len];
    // zero-width rows would make chunks_exact panic
    if len == 0 {
        return Ok(());
    }
    for (row, y) in bounds.ys().enumerate() {
        if row % 16 == 0 {
            stop.check()?;
        }
        for (px, x) in buf.chunks_exact_mut(N * S::BYTES).zip(bounds.xs()) {
            let samples = convert(image.pixel(x, y));
            for (out, s) in px.chunks_exact_mut(S::BYTES).zip(samples) {
                s.put_be(out);
            }
        }
        w.write_all(&buf)?;
    }
    Ok(())
}
