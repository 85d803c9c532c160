#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use pixscan_image as image;

#[doc(inline)]
pub use pixscan_imgproc as imgproc;

#[doc(inline)]
pub use pixscan_io as io;
