/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the number of channels is zero.
    #[error("Invalid number of channels: {0}")]
    InvalidChannelCount(usize),

    /// Error when the row pitch cannot hold a full row of pixels.
    #[error("Row pitch ({0}) is smaller than the row size in bytes ({1})")]
    InvalidRowPitch(usize, usize),

    /// Error when a coordinate lies outside the buffer.
    #[error("Index ({row}, {col}, {channel}) is out of bounds for a buffer of {rows}x{cols}x{channels}")]
    OutOfRange {
        /// requested row.
        row: usize,
        /// requested column.
        col: usize,
        /// requested channel.
        channel: usize,
        /// number of rows in the buffer.
        rows: usize,
        /// number of columns in the buffer.
        cols: usize,
        /// number of channels in the buffer.
        channels: usize,
    },

    /// Error when a byte accessor is used on a buffer whose elements are wider than one byte.
    #[error("Unsupported pixel depth: {0} bytes per element")]
    UnsupportedDepth(usize),

    /// Error when the sizes of two images do not match.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the channel counts of two images do not match.
    #[error("Number of channels ({0}) does not match the expected channels ({1})")]
    ChannelMismatch(usize, usize),
}
