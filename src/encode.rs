use std::io::Write;

use enough::{Stop, Unstoppable};

use crate::error::PnmError;
use crate::image::PixelSource;
use crate::limits::Limits;
use crate::pnm::{self, Maxval, PnmFormat};

/// Write `image` to `w` as `format`.
///
/// PGM and PPM use 16-bit samples when the image declares a 16-bit gray
/// or 48-bit color model respectively, 8-bit samples otherwise.
///
/// Errors from `w` are returned as [`PnmError::Io`] as soon as they
/// happen. Nothing is retried and nothing is rolled back, so the stream
/// may hold a partial file. Use [`EncodeRequest::buffered`] to make the
/// output all-or-nothing.
pub fn encode<W, I>(w: &mut W, image: &I, format: PnmFormat) -> Result<(), PnmError>
where
    W: Write + ?Sized,
    I: PixelSource + ?Sized,
{
    EncodeRequest::pnm(format).encode(w, image, Unstoppable)
}

/// [`encode`] with a numeric format selector (0 = PBM, 1 = PGM, 2 = PPM).
///
/// Any other value fails with [`PnmError::InvalidFormat`] before anything
/// is written.
pub fn encode_by_tag<W, I>(w: &mut W, image: &I, tag: u32) -> Result<(), PnmError>
where
    W: Write + ?Sized,
    I: PixelSource + ?Sized,
{
    encode(w, image, PnmFormat::try_from(tag)?)
}

/// Encode request builder.
///
/// ```
/// use zenpnm::{EncodeRequest, PixelLayout, RawImage, Unstoppable};
/// use zenpnm::pnm::PnmFormat;
///
/// let pixels = [0u8, 255, 255, 0];
/// let image = RawImage::new(&pixels, 2, 2, PixelLayout::Gray8)?;
/// let bytes = EncodeRequest::pnm(PnmFormat::Pbm).encode_to_vec(&image, Unstoppable)?;
/// assert_eq!(bytes, b"P4\n2 2\n\x80\x40");
/// # Ok::<(), zenpnm::PnmError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest<'a> {
    format: PnmFormat,
    limits: Option<&'a Limits>,
    maxval: Option<Maxval>,
    buffered: bool,
}

impl<'a> EncodeRequest<'a> {
    pub fn pnm(format: PnmFormat) -> Self {
        Self {
            format,
            limits: None,
            maxval: None,
            buffered: false,
        }
    }

    /// Reject images (and scratch buffers) beyond `limits` before writing.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Force the sample width instead of deriving it from the color model.
    /// Has no effect on PBM.
    pub fn with_maxval(mut self, maxval: Maxval) -> Self {
        self.maxval = Some(maxval);
        self
    }

    /// Render the whole file in memory and hand it to the stream in a
    /// single write, so a failing stream never sees a partial raster.
    pub fn buffered(mut self, buffered: bool) -> Self {
        self.buffered = buffered;
        self
    }

    pub fn format(&self) -> PnmFormat {
        self.format
    }

    /// The maxval this request would write for `image`.
    pub fn maxval_for<I: PixelSource + ?Sized>(&self, image: &I) -> Maxval {
        self.maxval
            .unwrap_or_else(|| self.format.maxval_for(image.color_model()))
    }

    /// Exact number of bytes this request produces for `image`.
    pub fn encoded_len<I: PixelSource + ?Sized>(&self, image: &I) -> Result<usize, PnmError> {
        let b = image.bounds();
        pnm::encoded_len(self.format, b.width(), b.height(), self.maxval_for(image))
    }

    /// Encode `image` into `w`.
    pub fn encode<W, I>(&self, w: &mut W, image: &I, stop: impl Stop) -> Result<(), PnmError>
    where
        W: Write + ?Sized,
        I: PixelSource + ?Sized,
    {
        let bounds = image.bounds();
        let (width, height) = (bounds.width(), bounds.height());
        let maxval = self.maxval_for(image);
        if let Some(limits) = self.limits {
            limits.check_encode(self.format, width, height, maxval, self.buffered)?;
        }

        log::debug!(
            "encoding {width}x{height} as {} (maxval {}, buffered: {})",
            self.format.magic(),
            maxval.value(),
            self.buffered
        );

        if self.buffered {
            let out = self.render(image, maxval, &stop)?;
            w.write_all(&out)?;
            return Ok(());
        }
        self.dispatch(w, image, maxval, &stop)
    }

    /// Encode `image` into a new buffer.
    pub fn encode_to_vec<I>(&self, image: &I, stop: impl Stop) -> Result<Vec<u8>, PnmError>
    where
        I: PixelSource + ?Sized,
    {
        let b = image.bounds();
        let maxval = self.maxval_for(image);
        if let Some(limits) = self.limits {
            limits.check_encode(self.format, b.width(), b.height(), maxval, true)?;
        }
        self.render(image, maxval, &stop)
    }

    fn render<I>(&self, image: &I, maxval: Maxval, stop: &dyn Stop) -> Result<Vec<u8>, PnmError>
    where
        I: PixelSource + ?Sized,
    {
        let b = image.bounds();
        let len = pnm::encoded_len(self.format, b.width(), b.height(), maxval)?;
        let mut out = Vec::with_capacity(len);
        self.dispatch(&mut out, image, maxval, stop)?;
        debug_assert_eq!(out.len(), len);
        Ok(out)
    }

    fn dispatch<W, I>(
        &self,
        w: &mut W,
        image: &I,
        maxval: Maxval,
        stop: &dyn Stop,
    ) -> Result<(), PnmError>
    where
        W: Write + ?Sized,
        I: PixelSource + ?Sized,
    {
        match self.format {
            PnmFormat::Pbm => pnm::encode_pbm(w, image, stop),
            PnmFormat::Pgm => pnm::encode_pgm(w, image, maxval, stop),
            PnmFormat::Ppm => pnm::encode_ppm(w, image, maxval, stop),
        }
    }
}
