//! The read-only image contract the encoders consume.

use crate::PnmError;
use crate::pixel::{Color, ColorModel, PixelLayout};

/// Rectangle of pixel coordinates: origin plus extent.
///
/// Coordinates run from `min` (inclusive) to `max` (exclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl Bounds {
    /// Rectangle between two corners. Corners are swapped as needed so the
    /// result is well formed.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// `width` x `height` rectangle at the origin. Sizes beyond `i32::MAX`
    /// are clamped.
    pub fn from_size(width: u32, height: u32) -> Self {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        Self::new(0, 0, clamp(width), clamp(height))
    }

    /// Same extent moved to `(x, y)`, or `None` if it would run past
    /// `i32::MAX`.
    pub fn with_origin(self, x: i32, y: i32) -> Option<Self> {
        let end = |min: i32, extent: u32| i32::try_from(i64::from(min) + i64::from(extent)).ok();
        Some(Self::new(x, y, end(x, self.width())?, end(y, self.height())?))
    }

    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    pub fn width(&self) -> u32 {
        (i64::from(self.max_x) - i64::from(self.min_x)) as u32
    }

    pub fn height(&self) -> u32 {
        (i64::from(self.max_y) - i64::from(self.min_y)) as u32
    }

    /// Column coordinates, left to right.
    pub(crate) fn xs(&self) -> core::ops::Range<i32> {
        self.min_x..self.max_x
    }

    /// Row coordinates, top to bottom.
    pub(crate) fn ys(&self) -> core::ops::Range<i32> {
        self.min_y..self.max_y
    }
}

/// A rectangular grid of pixels the encoders can read.
///
/// Implementors must answer [`pixel`](PixelSource::pixel) for every
/// coordinate inside [`bounds`](PixelSource::bounds). The encoders never
/// ask for coordinates outside of it.
pub trait PixelSource {
    fn bounds(&self) -> Bounds;

    /// The declared color model. Only [`ColorModel::Gray16`] and
    /// [`ColorModel::Rgb48`] influence the output (16-bit samples).
    fn color_model(&self) -> ColorModel;

    fn pixel(&self, x: i32, y: i32) -> Color;
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn bounds(&self) -> Bounds {
        (**self).bounds()
    }

    fn color_model(&self) -> ColorModel {
        (**self).color_model()
    }

    fn pixel(&self, x: i32, y: i32) -> Color {
        (**self).pixel(x, y)
    }
}

/// Borrowed row-major pixel buffer in a given [`PixelLayout`].
#[derive(Clone, Copy, Debug)]
pub struct RawImage<'a> {
    pixels: &'a [u8],
    bounds: Bounds,
    /// Pixels per buffer row.
    stride: usize,
    layout: PixelLayout,
}

impl<'a> RawImage<'a> {
    /// Wrap `pixels` as a `width` x `height` image.
    ///
    /// Fails with [`PnmError::DimensionsTooLarge`] when the byte size
    /// overflows, or [`PnmError::BufferTooSmall`] when `pixels` is short.
    pub fn new(
        pixels: &'a [u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Self, PnmError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(layout.bytes_per_pixel()))
            .filter(|_| i32::try_from(width).is_ok() && i32::try_from(height).is_ok())
            .ok_or(PnmError::DimensionsTooLarge { width, height })?;
        if pixels.len() < expected {
            return Err(PnmError::BufferTooSmall {
                needed: expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels: &pixels[..expected],
            bounds: Bounds::from_size(width, height),
            stride: width as usize,
            layout,
        })
    }

    /// Place the image's top-left pixel at `(x, y)` instead of `(0, 0)`.
    ///
    /// Fails with [`PnmError::DimensionsTooLarge`] when the image would
    /// reach past `i32::MAX` from there.
    pub fn with_origin(mut self, x: i32, y: i32) -> Result<Self, PnmError> {
        let (width, height) = (self.bounds.width(), self.bounds.height());
        self.bounds = self
            .bounds
            .with_origin(x, y)
            .ok_or(PnmError::DimensionsTooLarge { width, height })?;
        Ok(self)
    }
}

impl PixelSource for RawImage<'_> {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn color_model(&self) -> ColorModel {
        self.layout.color_model()
    }

    fn pixel(&self, x: i32, y: i32) -> Color {
        let col = (i64::from(x) - i64::from(self.bounds.min_x)) as usize;
        let row = (i64::from(y) - i64::from(self.bounds.min_y)) as usize;
        let bpp = self.layout.bytes_per_pixel();
        let off = (row * self.stride + col) * bpp;
        self.layout.read(&self.pixels[off..off + bpp])
    }
}

#[cfg(feature = "imgref")]
mod typed {
    use super::{Bounds, PixelSource};
    use crate::pixel::{Color, ColorModel};
    use rgb::{Gray, RGB8, RGB16, RGBA8, RGBA16};

    /// Typed pixels usable inside [`imgref`] buffers.
    ///
    /// A buffer wider or taller than `i32::MAX` pixels is encoded cropped
    /// to `i32::MAX` in that direction. Use [`RawImage`](crate::RawImage)
    /// to have such sizes rejected instead.
    pub trait ImagePixel: Copy {
        const MODEL: ColorModel;

        fn color(self) -> Color;
    }

    impl ImagePixel for Gray<u8> {
        const MODEL: ColorModel = ColorModel::Gray8;

        fn color(self) -> Color {
            Color::Gray8(self.value())
        }
    }

    impl ImagePixel for Gray<u16> {
        const MODEL: ColorModel = ColorModel::Gray16;

        fn color(self) -> Color {
            Color::Gray16(self.value())
        }
    }

    macro_rules! rgb_pixel {
        ($ty:ty, $model:expr) => {
            impl ImagePixel for $ty {
                const MODEL: ColorModel = $model;

                fn color(self) -> Color {
                    Color::from(self)
                }
            }
        };
    }

    rgb_pixel!(RGB8, ColorModel::Rgb24);
    rgb_pixel!(RGBA8, ColorModel::Rgb24);
    rgb_pixel!(RGB16, ColorModel::Rgb48);
    rgb_pixel!(RGBA16, ColorModel::Rgb48);

    // Bounds cannot hold an extent past i32::MAX, so wider or taller
    // buffers encode as their top-left i32::MAX x i32::MAX corner.
    fn size_bounds(width: usize, height: usize) -> Bounds {
        let clamp = |v: usize| u32::try_from(v).unwrap_or(u32::MAX);
        Bounds::from_size(clamp(width), clamp(height))
    }

    impl<P: ImagePixel> PixelSource for imgref::ImgRef<'_, P> {
        fn bounds(&self) -> Bounds {
            size_bounds(self.width(), self.height())
        }

        fn color_model(&self) -> ColorModel {
            P::MODEL
        }

        fn pixel(&self, x: i32, y: i32) -> Color {
            self.buf()[y as usize * self.stride() + x as usize].color()
        }
    }

    impl<P: ImagePixel> PixelSource for imgref::ImgVec<P> {
        fn bounds(&self) -> Bounds {
            size_bounds(self.width(), self.height())
        }

        fn color_model(&self) -> ColorModel {
            P::MODEL
        }

        fn pixel(&self, x: i32, y: i32) -> Color {
            self.as_ref().pixel(x, y)
        }
    }
}

#[cfg(feature = "imgref")]
pub use typed::ImagePixel;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_canonical() {
        let b = Bounds::new(5, 7, 1, 2);
        assert_eq!(b.min_x(), 1);
        assert_eq!(b.min_y(), 2);
        assert_eq!(b.width(), 4);
        assert_eq!(b.height(), 5);
        assert_eq!(Bounds::from_size(0, 3).width(), 0);
    }

    #[test]
    fn from_size_clamps_to_i32() {
        let b = Bounds::from_size(u32::MAX, 2);
        assert_eq!((b.min_x(), b.width(), b.height()), (0, i32::MAX as u32, 2));
    }

    #[test]
    fn origin_must_hold_full_extent() {
        let b = Bounds::from_size(3, 2);
        assert_eq!(b.with_origin(i32::MAX - 3, 0).map(|b| b.width()), Some(3));
        assert_eq!(b.with_origin(i32::MAX - 2, 0), None);
        assert_eq!(b.with_origin(0, i32::MAX - 1), None);
        assert_eq!(b.with_origin(i32::MIN, i32::MIN).map(|b| b.min_y()), Some(i32::MIN));
    }

    #[test]
    fn bounds_span_full_i32_range() {
        let b = Bounds::new(i32::MIN, 0, i32::MAX, 1);
        assert_eq!(b.width(), u32::MAX);
    }

    #[test]
    fn raw_image_rejects_short_buffer() {
        let err = RawImage::new(&[0u8; 5], 2, 1, PixelLayout::Rgb8).unwrap_err();
        match err {
            PnmError::BufferTooSmall { needed, actual } => {
                assert_eq!(needed, 6);
                assert_eq!(actual, 5);
            }
            other => panic!("expected BufferTooSmall, got {other:?}"),
        }
    }

    #[test]
    fn raw_image_rejects_overflow() {
        let err = RawImage::new(&[], u32::MAX, u32::MAX, PixelLayout::Rgba16).unwrap_err();
        assert!(matches!(err, PnmError::DimensionsTooLarge { .. }));
    }

    #[test]
    fn raw_image_honors_origin() {
        let pixels = [10u8, 20, 30, 40, 50, 60];
        let img = RawImage::new(&pixels, 3, 2, PixelLayout::Gray8)
            .unwrap()
            .with_origin(-1, 4)
            .unwrap();
        let b = img.bounds();
        assert_eq!((b.min_x(), b.min_y(), b.width(), b.height()), (-1, 4, 3, 2));
        assert_eq!(img.pixel(-1, 4), Color::Gray8(10));
        assert_eq!(img.pixel(1, 5), Color::Gray8(60));
        assert_eq!(img.color_model(), ColorModel::Gray8);
    }

    #[test]
    fn raw_image_rejects_origin_that_would_crop() {
        let pixels: Vec<u8> = (0..6).collect();
        let img = RawImage::new(&pixels, 3, 2, PixelLayout::Gray8).unwrap();
        let err = img.with_origin(i32::MAX - 1, 0).unwrap_err();
        match err {
            PnmError::DimensionsTooLarge { width, height } => assert_eq!((width, height), (3, 2)),
            other => panic!("expected DimensionsTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn raw_image_rows_stay_aligned_near_i32_max() {
        let pixels: Vec<u8> = (0..6).collect();
        let x = i32::MAX - 3;
        let img = RawImage::new(&pixels, 3, 2, PixelLayout::Gray8)
            .unwrap()
            .with_origin(x, 0)
            .unwrap();
        assert_eq!(img.bounds().width(), 3);
        assert_eq!(img.pixel(x, 1), Color::Gray8(3));
        assert_eq!(img.pixel(x + 2, 1), Color::Gray8(5));
    }
}
