//! # zenpnm
//!
//! Streaming encoder for the binary PNM formats.
//!
//! ## Supported Formats
//!
//! - **P4** (PBM): black and white, 8 pixels per byte, most significant
//!   bit first, 1 = black, rows padded to a whole byte
//! - **P5** (PGM): grayscale, 8-bit or 16-bit big-endian samples
//! - **P6** (PPM): RGB, 8-bit or 16-bit big-endian samples
//!
//! Any image implementing [`PixelSource`] can be written; pixels are
//! converted to the target format on the fly. PGM and PPM pick a maxval of
//! 65535 only when the image declares a 16-bit gray ([`ColorModel::Gray16`])
//! or 48-bit color ([`ColorModel::Rgb48`]) model.
//!
//! The header is written first, then one row at a time, top to bottom.
//! Nothing is compressed and no comments are emitted.
//!
//! ## Non-Goals
//!
//! - Decoding
//! - ASCII PNM formats (P1, P2, P3)
//! - PAM and PFM
//!
//! ## Usage
//!
//! ```
//! use zenpnm::{PixelLayout, RawImage};
//! use zenpnm::pnm::PnmFormat;
//!
//! let red = [255u8, 0, 0];
//! let image = RawImage::new(&red, 1, 1, PixelLayout::Rgb8)?;
//!
//! let mut out = Vec::new();
//! zenpnm::encode(&mut out, &image, PnmFormat::Ppm)?;
//! assert_eq!(out, b"P6\n1 1\n255\n\xff\x00\x00");
//! # Ok::<(), zenpnm::PnmError>(())
//! ```
//!
//! With limits, cancellation or all-or-nothing output:
//!
//! ```
//! use zenpnm::{EncodeRequest, Limits, PixelLayout, RawImage, Unstoppable};
//! use zenpnm::pnm::PnmFormat;
//!
//! let gray = [128u8; 6];
//! let image = RawImage::new(&gray, 3, 2, PixelLayout::Gray8)?;
//! let limits = Limits { max_pixels: Some(1 << 20), ..Default::default() };
//!
//! let mut out = Vec::new();
//! EncodeRequest::pnm(PnmFormat::Pgm)
//!     .with_limits(&limits)
//!     .buffered(true)
//!     .encode(&mut out, &image, Unstoppable)?;
//! assert_eq!(&out[..11], b"P5\n3 2\n255\n");
//! # Ok::<(), zenpnm::PnmError>(())
//! ```

#![forbid(unsafe_code)]

mod encode;
mod error;
mod image;
mod limits;
mod pixel;

pub mod pnm;

// Re-exports
pub use encode::{EncodeRequest, encode, encode_by_tag};
pub use enough::{Stop, Unstoppable};
pub use error::PnmError;
#[cfg(feature = "imgref")]
pub use image::ImagePixel;
pub use image::{Bounds, PixelSource, RawImage};
pub use limits::Limits;
pub use pixel::{Color, ColorModel, PixelLayout, Sample, to_bilevel, to_gray, to_rgb};
