use rgb::{RGB8, RGB16, RGBA8, RGBA16};

/// Color model an image declares for its pixels.
///
/// Only the 16-bit models change encoder output: they select a PGM/PPM
/// maxval of 65535. Everything else is converted down to 8-bit samples.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorModel {
    /// 8-bit grayscale.
    Gray8,
    /// 16-bit grayscale.
    Gray16,
    /// 24-bit color (8 bits per channel, alpha allowed).
    Rgb24,
    /// 48-bit color (16 bits per channel, alpha allowed).
    Rgb48,
    /// Anything else; converted on the fly.
    Other,
}

/// One pixel, as reported by a [`PixelSource`](crate::PixelSource).
///
/// Alpha is straight (not premultiplied).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Gray8(u8),
    Gray16(u16),
    Rgb8(RGB8),
    Rgba8(RGBA8),
    Rgb16(RGB16),
    Rgba16(RGBA16),
}

impl Color {
    /// Widen to 16-bit, alpha-premultiplied `[r, g, b, a]`.
    pub fn rgba16(self) -> [u16; 4] {
        match self {
            Color::Gray8(v) => {
                let v = widen(v);
                [v, v, v, 0xffff]
            }
            Color::Gray16(v) => [v, v, v, 0xffff],
            Color::Rgb8(c) => [widen(c.r), widen(c.g), widen(c.b), 0xffff],
            Color::Rgb16(c) => [c.r, c.g, c.b, 0xffff],
            Color::Rgba8(c) => premultiply(widen(c.r), widen(c.g), widen(c.b), widen(c.a)),
            Color::Rgba16(c) => premultiply(c.r, c.g, c.b, c.a),
        }
    }
}

impl From<RGB8> for Color {
    fn from(c: RGB8) -> Self {
        Color::Rgb8(c)
    }
}

impl From<RGBA8> for Color {
    fn from(c: RGBA8) -> Self {
        Color::Rgba8(c)
    }
}

impl From<RGB16> for Color {
    fn from(c: RGB16) -> Self {
        Color::Rgb16(c)
    }
}

impl From<RGBA16> for Color {
    fn from(c: RGBA16) -> Self {
        Color::Rgba16(c)
    }
}

#[inline]
fn widen(v: u8) -> u16 {
    u16::from(v) * 257
}

#[inline]
fn premultiply(r: u16, g: u16, b: u16, a: u16) -> [u16; 4] {
    let a32 = u32::from(a);
    let mul = |c: u16| (u32::from(c) * a32 / 0xffff) as u16;
    [mul(r), mul(g), mul(b), a]
}

/// An output sample width: `u8` for maxval 255, `u16` for maxval 65535.
pub trait Sample: Copy {
    /// Largest sample value; written as the header maxval.
    const MAX: u16;
    /// Bytes per sample in the raster.
    const BYTES: usize;

    /// Narrow a 16-bit component to this width.
    fn from_u16(v: u16) -> Self;

    /// Write this sample big-endian into `out[..Self::BYTES]`.
    fn put_be(self, out: &mut [u8]);
}

impl Sample for u8 {
    const MAX: u16 = 255;
    const BYTES: usize = 1;

    #[inline]
    fn from_u16(v: u16) -> Self {
        (v >> 8) as u8
    }

    #[inline]
    fn put_be(self, out: &mut [u8]) {
        out[0] = self;
    }
}

impl Sample for u16 {
    const MAX: u16 = 65535;
    const BYTES: usize = 2;

    #[inline]
    fn from_u16(v: u16) -> Self {
        v
    }

    #[inline]
    fn put_be(self, out: &mut [u8]) {
        out[..2].copy_from_slice(&self.to_be_bytes());
    }
}

/// Luminance of `c` at sample width `S`.
///
/// Uses the Rec. 601 weights on premultiplied 16-bit components, so a
/// translucent pixel reads as if composed over black.
#[inline]
pub fn to_gray<S: Sample>(c: Color) -> S {
    let y = match c {
        Color::Gray8(v) => widen(v),
        Color::Gray16(v) => v,
        _ => {
            let [r, g, b, _] = c.rgba16();
            let y = 19595 * u32::from(r) + 38470 * u32::from(g) + 7471 * u32::from(b) + (1 << 15);
            (y >> 16) as u16
        }
    };
    S::from_u16(y)
}

/// Red, green and blue of `c` at sample width `S`. Alpha is dropped after
/// premultiplication.
#[inline]
pub fn to_rgb<S: Sample>(c: Color) -> [S; 3] {
    let [r, g, b, _] = c.rgba16();
    [S::from_u16(r), S::from_u16(g), S::from_u16(b)]
}

/// Map `c` onto the two-entry palette `[white, black]`.
///
/// Returns the palette entry's gray level: 255 for white, 0 for black.
/// Equidistant colors go to white (index 0).
#[inline]
pub fn to_bilevel(c: Color) -> u8 {
    let [r, g, b, _] = c.rgba16();
    let sq = |x: u16, y: u16| {
        let d = u32::from(x.abs_diff(y));
        (d * d) >> 2
    };
    let to_white = sq(r, 0xffff) + sq(g, 0xffff) + sq(b, 0xffff);
    let to_black = sq(r, 0) + sq(g, 0) + sq(b, 0);
    if to_black < to_white { 0 } else { 255 }
}

/// Pixel memory layout of a raw byte buffer.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// Single channel, 8-bit grayscale.
    Gray8,
    /// Single channel, 16-bit grayscale (native endian).
    Gray16,
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
    /// 3 channels, 8-bit BGR.
    Bgr8,
    /// 4 channels, 8-bit BGRA.
    Bgra8,
    /// 4 channels, 8-bit BGRX (opaque; 4th byte is padding, not alpha).
    Bgrx8,
    /// 3 channels, 16-bit RGB (native endian).
    Rgb16,
    /// 4 channels, 16-bit RGBA (native endian).
    Rgba16,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Gray16 => 2,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 | Self::Bgrx8 => 4,
            Self::Rgb16 => 6,
            Self::Rgba16 => 8,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray8 | Self::Gray16 => 1,
            Self::Rgb8 | Self::Bgr8 | Self::Rgb16 => 3,
            Self::Rgba8 | Self::Bgra8 | Self::Bgrx8 | Self::Rgba16 => 4,
        }
    }

    /// The color model an image in this layout declares.
    pub fn color_model(&self) -> ColorModel {
        match self {
            Self::Gray8 => ColorModel::Gray8,
            Self::Gray16 => ColorModel::Gray16,
            Self::Rgb8 | Self::Rgba8 | Self::Bgr8 | Self::Bgra8 | Self::Bgrx8 => ColorModel::Rgb24,
            Self::Rgb16 | Self::Rgba16 => ColorModel::Rgb48,
        }
    }

    /// Read one pixel from `px`, which holds exactly `bytes_per_pixel()` bytes.
    pub(crate) fn read(&self, px: &[u8]) -> Color {
        let u16_at = |i: usize| u16::from_ne_bytes([px[i], px[i + 1]]);
        match self {
            Self::Gray8 => Color::Gray8(px[0]),
            Self::Gray16 => Color::Gray16(u16_at(0)),
            Self::Rgb8 => Color::Rgb8(RGB8::new(px[0], px[1], px[2])),
            Self::Rgba8 => Color::Rgba8(RGBA8::new(px[0], px[1], px[2], px[3])),
            Self::Bgr8 | Self::Bgrx8 => Color::Rgb8(RGB8::new(px[2], px[1], px[0])),
            Self::Bgra8 => Color::Rgba8(RGBA8::new(px[2], px[1], px[0], px[3])),
            Self::Rgb16 => Color::Rgb16(RGB16::new(u16_at(0), u16_at(2), u16_at(4))),
            Self::Rgba16 => Color::Rgba16(RGBA16::new(u16_at(0), u16_at(2), u16_at(4), u16_at(6))),
        }
    }
}
