use pixscan_image::ImageError;
use thiserror::Error;

use crate::lut::LutError;
use crate::parallel::ParallelError;

/// An error type for the scanning operations.
#[derive(Error, Debug, PartialEq)]
pub enum ScanError {
    /// Error with the raster buffer.
    #[error("Error with the image: {0}")]
    ImageError(#[from] ImageError),

    /// Error building the lookup table.
    #[error(transparent)]
    LutError(#[from] LutError),

    /// Error running the parallel row pass.
    #[error(transparent)]
    ParallelError(#[from] ParallelError),

    /// The buffer elements are wider than one byte.
    #[error("Unsupported pixel depth: {0} bytes per element, only 8-bit buffers can be scanned")]
    UnsupportedDepth(usize),

    /// The strategy cannot address pixels with this many channels.
    #[error("Unsupported number of channels for {strategy}: {channels}")]
    UnsupportedChannelCount {
        /// name of the strategy that rejected the buffer.
        strategy: &'static str,
        /// number of channels of the buffer.
        channels: usize,
    },

    /// The benchmark needs at least one repetition.
    #[error("repetitions must be >= 1, got {0}")]
    InvalidRepetitionCount(usize),

    /// Two strategies produced different outputs for the same input.
    #[error(
        "{strategy} disagrees with {reference} at (row {row}, col {col}, channel {channel}): {actual} != {expected}"
    )]
    EquivalenceMismatch {
        /// strategy whose output is taken as reference.
        reference: &'static str,
        /// strategy that diverged.
        strategy: &'static str,
        /// row of the first differing element.
        row: usize,
        /// column of the first differing element.
        col: usize,
        /// channel of the first differing element.
        channel: usize,
        /// value produced by the reference strategy.
        expected: u8,
        /// value produced by the diverging strategy.
        actual: u8,
    },

    /// Two buffers that should be compared have different shapes.
    #[error("Shape mismatch: {0:?} != {1:?}")]
    ShapeMismatch([usize; 3], [usize; 3]),

    /// The name does not match any scan strategy.
    #[error("Unknown scan strategy: {0}")]
    UnknownStrategy(String),

    /// The name does not match any channel mode.
    #[error("Unknown channel mode: {0}, expected `gray` or `color`")]
    UnknownChannelMode(String),
}
