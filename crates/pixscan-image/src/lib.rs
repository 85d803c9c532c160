#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// raster buffer representation for scanning purposes.
pub mod buffer;

/// Error types for the image module.
pub mod error;

/// element-wise cursors over a raster buffer.
pub mod iter;

pub use crate::buffer::{ImageSize, PixelDepth, RasterBuffer};
pub use crate::error::ImageError;
pub use crate::iter::{Elements, ElementsMut};
