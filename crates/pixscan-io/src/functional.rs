use std::path::Path;

use log::debug;
use pixscan_image::{ImageSize, PixelDepth, RasterBuffer};

use crate::error::IoError;

/// Reads an image of any supported format into a packed 8-bit buffer.
///
/// The file format is guessed from the content. The pixels are converted to gray scale
/// when `channels` is 1 and to RGB when it is 3.
///
/// # Arguments
///
/// * `file_path` - The path to the image.
/// * `channels` - The number of channels of the returned buffer, 1 or 3.
///
/// # Errors
///
/// Returns [`IoError::FileDoesNotExist`] for a missing file, [`IoError::ImageDecodeError`]
/// if the content cannot be decoded and [`IoError::UnsupportedChannelCount`] for other
/// channel counts.
pub fn read_image_any(file_path: impl AsRef<Path>, channels: usize) -> Result<RasterBuffer, IoError> {
    let file_path = file_path.as_ref();

    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    if channels != 1 && channels != 3 {
        return Err(IoError::UnsupportedChannelCount(channels));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    debug!(
        "decoded {} as {:?} {}x{}",
        file_path.display(),
        img.color(),
        size.width,
        size.height
    );

    let data = match channels {
        1 => img.into_luma8().into_raw(),
        _ => img.into_rgb8().into_raw(),
    };

    Ok(RasterBuffer::new(size, channels, data)?)
}

/// Reads an image of any supported format as a single channel gray buffer.
pub fn read_image_any_gray8(file_path: impl AsRef<Path>) -> Result<RasterBuffer, IoError> {
    read_image_any(file_path, 1)
}

/// Reads an image of any supported format as a three channel RGB buffer.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<RasterBuffer, IoError> {
    read_image_any(file_path, 3)
}

/// Writes a 1 or 3 channel 8-bit buffer to a file.
///
/// The file format is chosen from the extension of the path.
///
/// # Arguments
///
/// * `file_path` - The destination path.
/// * `buffer` - The image to write, packed or padded.
pub fn write_image_any(file_path: impl AsRef<Path>, buffer: &RasterBuffer) -> Result<(), IoError> {
    if buffer.depth() != PixelDepth::U8 {
        return Err(pixscan_image::ImageError::UnsupportedDepth(buffer.depth().bytes()).into());
    }

    let color = match buffer.num_channels() {
        1 => image::ExtendedColorType::L8,
        3 => image::ExtendedColorType::Rgb8,
        channels => return Err(IoError::UnsupportedChannelCount(channels)),
    };

    image::save_buffer(
        file_path,
        &buffer.to_vec(),
        buffer.width() as u32,
        buffer.height() as u32,
        color,
    )?;

    Ok(())
}
