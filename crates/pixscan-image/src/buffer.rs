use crate::error::ImageError;
use crate::iter::{Elements, ElementsMut};

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use pixscan_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// The element type stored in a raster buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PixelDepth {
    /// unsigned 8-bit elements.
    #[default]
    U8,
    /// unsigned 16-bit elements.
    U16,
    /// 32-bit floating point elements.
    F32,
}

impl PixelDepth {
    /// Number of bytes used by a single element.
    pub fn bytes(&self) -> usize {
        match self {
            PixelDepth::U8 => 1,
            PixelDepth::U16 => 2,
            PixelDepth::F32 => 4,
        }
    }
}

/// A 2-D multi-channel raster stored row-major with a possibly padded row pitch.
///
/// The buffer owns a flat byte store of `rows * row_pitch` bytes. Each row holds
/// `cols * channels` elements followed by `row_pitch - cols * channels * depth` padding
/// bytes. Padding is never visited by the element accessors.
///
/// Cloning performs a deep copy of the store.
#[derive(Clone, Debug)]
pub struct RasterBuffer {
    size: ImageSize,
    channels: usize,
    depth: PixelDepth,
    row_pitch: usize,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Create a new packed 8-bit buffer from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of channels per pixel.
    /// * `data` - The pixel data in row-major, channel-minor order.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixscan_image::{ImageSize, RasterBuffer};
    ///
    /// let image = RasterBuffer::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     3,
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.cols(), 10);
    /// assert_eq!(image.rows(), 20);
    /// assert!(image.is_packed());
    /// ```
    pub fn new(size: ImageSize, channels: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        let row_pitch = size
            .width
            .checked_mul(channels)
            .ok_or(ImageError::InvalidChannelShape(data.len(), usize::MAX))?;
        Self::from_raw_parts(size, channels, PixelDepth::U8, row_pitch, data)
    }

    /// Create a new packed 8-bit buffer with every element set to `val`.
    pub fn from_size_val(size: ImageSize, channels: usize, val: u8) -> Result<Self, ImageError> {
        let len = size
            .width
            .checked_mul(channels)
            .and_then(|row| row.checked_mul(size.height))
            .ok_or(ImageError::InvalidChannelShape(0, usize::MAX))?;
        Self::new(size, channels, vec![val; len])
    }

    /// Create a new 8-bit buffer with an explicit row pitch.
    ///
    /// Both the pixels and the padding are filled with `val`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidRowPitch`] if `row_pitch < width * channels`.
    pub fn with_row_pitch(
        size: ImageSize,
        channels: usize,
        row_pitch: usize,
        val: u8,
    ) -> Result<Self, ImageError> {
        let len = size
            .height
            .checked_mul(row_pitch)
            .ok_or(ImageError::InvalidChannelShape(0, usize::MAX))?;
        Self::from_raw_parts(size, channels, PixelDepth::U8, row_pitch, vec![val; len])
    }

    /// Create a buffer from its raw byte store.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of channels per pixel, at least one.
    /// * `depth` - The element type.
    /// * `row_pitch` - The number of bytes between the start of two consecutive rows.
    /// * `data` - The byte store, exactly `height * row_pitch` bytes long.
    pub fn from_raw_parts(
        size: ImageSize,
        channels: usize,
        depth: PixelDepth,
        row_pitch: usize,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        if channels == 0 {
            return Err(ImageError::InvalidChannelCount(channels));
        }

        // sizes that overflow are reported as usize::MAX
        match size
            .width
            .checked_mul(channels)
            .and_then(|n| n.checked_mul(depth.bytes()))
        {
            Some(row_bytes) if row_pitch >= row_bytes => {}
            row_bytes => {
                return Err(ImageError::InvalidRowPitch(
                    row_pitch,
                    row_bytes.unwrap_or(usize::MAX),
                ))
            }
        }

        match size.height.checked_mul(row_pitch) {
            Some(len) if data.len() == len => {}
            len => {
                return Err(ImageError::InvalidChannelShape(
                    data.len(),
                    len.unwrap_or(usize::MAX),
                ))
            }
        }

        Ok(Self {
            size,
            channels,
            depth,
            row_pitch,
            data,
        })
    }

    /// Copy the buffer into a new one with the given row pitch.
    ///
    /// The logical pixel data is preserved and the padding is zero filled.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixscan_image::{ImageSize, RasterBuffer};
    ///
    /// let packed = RasterBuffer::new(ImageSize { width: 2, height: 2 }, 1, vec![1, 2, 3, 4]).unwrap();
    /// let padded = packed.to_row_pitch(8).unwrap();
    ///
    /// assert!(!padded.is_packed());
    /// assert_eq!(padded.to_vec(), vec![1, 2, 3, 4]);
    /// ```
    pub fn to_row_pitch(&self, row_pitch: usize) -> Result<Self, ImageError> {
        let row_bytes = self.row_bytes();
        if row_pitch < row_bytes {
            return Err(ImageError::InvalidRowPitch(row_pitch, row_bytes));
        }

        let len = self
            .rows()
            .checked_mul(row_pitch)
            .ok_or(ImageError::InvalidChannelShape(self.data.len(), usize::MAX))?;
        let mut data = vec![0u8; len];

        if row_bytes > 0 {
            data.chunks_exact_mut(row_pitch)
                .zip(self.data.chunks_exact(self.row_pitch))
                .for_each(|(dst, src)| dst[..row_bytes].copy_from_slice(&src[..row_bytes]));
        }

        Self::from_raw_parts(self.size, self.channels, self.depth, row_pitch, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        self.channels
    }

    /// Get the element type of the image.
    pub fn depth(&self) -> PixelDepth {
        self.depth
    }

    /// Get the number of bytes between the start of two consecutive rows.
    pub fn row_pitch(&self) -> usize {
        self.row_pitch
    }

    /// Get the number of meaningful bytes in a row, excluding padding.
    pub fn row_bytes(&self) -> usize {
        self.size.width * self.channels * self.depth.bytes()
    }

    /// Get the number of elements (pixels times channels) in the image.
    pub fn num_elements(&self) -> usize {
        self.size.width * self.size.height * self.channels
    }

    /// Whether rows follow each other without padding.
    pub fn is_packed(&self) -> bool {
        self.row_pitch == self.row_bytes()
    }

    /// Whether the buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.size.width == 0 || self.size.height == 0
    }

    /// The raw byte store, including padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The raw mutable byte store, including padding.
    ///
    /// Padding contents are unspecified; only the first `row_bytes()` bytes of each
    /// `row_pitch()` chunk belong to the image.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The bytes of row `row`, excluding padding.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::OutOfRange`] if `row >= rows`.
    pub fn row(&self, row: usize) -> Result<&[u8], ImageError> {
        let start = self.row_start(row)?;
        Ok(&self.data[start..start + self.row_bytes()])
    }

    /// The mutable bytes of row `row`, excluding padding.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::OutOfRange`] if `row >= rows`.
    pub fn row_mut(&mut self, row: usize) -> Result<&mut [u8], ImageError> {
        let start = self.row_start(row)?;
        let row_bytes = self.row_bytes();
        Ok(&mut self.data[start..start + row_bytes])
    }

    /// The whole buffer as a single row, available only when it is packed.
    pub fn packed_slice(&self) -> Option<&[u8]> {
        self.is_packed().then_some(self.data.as_slice())
    }

    /// The whole buffer as a single mutable row, available only when it is packed.
    ///
    /// The element order is row-major, channel-minor, identical to the per-row layout.
    pub fn packed_slice_mut(&mut self) -> Option<&mut [u8]> {
        if self.is_packed() {
            Some(self.data.as_mut_slice())
        } else {
            None
        }
    }

    /// Read a single channel value.
    ///
    /// # Arguments
    ///
    /// * `row` - The row of the pixel.
    /// * `col` - The column of the pixel.
    /// * `channel` - The channel index of the pixel.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::OutOfRange`] for coordinates outside the buffer and
    /// [`ImageError::UnsupportedDepth`] for buffers that are not 8-bit.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixscan_image::{ImageSize, RasterBuffer};
    ///
    /// let image = RasterBuffer::new(ImageSize { width: 1, height: 2 }, 3, vec![0, 1, 2, 3, 4, 5]).unwrap();
    ///
    /// assert_eq!(image.at(1, 0, 2), Ok(5));
    /// assert!(image.at(2, 0, 0).is_err());
    /// ```
    pub fn at(&self, row: usize, col: usize, channel: usize) -> Result<u8, ImageError> {
        let offset = self.offset(row, col, channel)?;
        Ok(self.data[offset])
    }

    /// Get a mutable reference to a single channel value.
    ///
    /// # Errors
    ///
    /// Same as [`RasterBuffer::at`].
    pub fn at_mut(&mut self, row: usize, col: usize, channel: usize) -> Result<&mut u8, ImageError> {
        let offset = self.offset(row, col, channel)?;
        Ok(&mut self.data[offset])
    }

    /// Write a single channel value.
    pub fn set(&mut self, row: usize, col: usize, channel: usize, val: u8) -> Result<(), ImageError> {
        *self.at_mut(row, col, channel)? = val;
        Ok(())
    }

    /// A cursor over every element byte in row-major, channel-minor order.
    pub fn elements(&self) -> Elements<'_> {
        Elements::new(&self.data, self.row_pitch, self.row_bytes(), self.rows())
    }

    /// A mutable cursor over every element byte in row-major, channel-minor order.
    pub fn elements_mut(&mut self) -> ElementsMut<'_> {
        let row_bytes = self.row_bytes();
        let rows = self.rows();
        ElementsMut::new(&mut self.data, self.row_pitch, row_bytes, rows)
    }

    /// Copy the logical element bytes into a packed vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.elements().copied().collect()
    }

    fn row_start(&self, row: usize) -> Result<usize, ImageError> {
        if row >= self.rows() {
            return Err(self.out_of_range(row, 0, 0));
        }
        Ok(row * self.row_pitch)
    }

    fn offset(&self, row: usize, col: usize, channel: usize) -> Result<usize, ImageError> {
        if self.depth != PixelDepth::U8 {
            return Err(ImageError::UnsupportedDepth(self.depth.bytes()));
        }

        if row >= self.rows() || col >= self.cols() || channel >= self.channels {
            return Err(self.out_of_range(row, col, channel));
        }

        Ok(row * self.row_pitch + col * self.channels + channel)
    }

    fn out_of_range(&self, row: usize, col: usize, channel: usize) -> ImageError {
        ImageError::OutOfRange {
            row,
            col,
            channel,
            rows: self.rows(),
            cols: self.cols(),
            channels: self.channels,
        }
    }
}
