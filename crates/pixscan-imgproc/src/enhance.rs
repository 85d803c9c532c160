use pixscan_image::{ImageError, PixelDepth, RasterBuffer};

use crate::lut::LookupTable;

fn check_compatible(src: &RasterBuffer, dst: &RasterBuffer) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    if src.num_channels() != dst.num_channels() {
        return Err(ImageError::ChannelMismatch(
            src.num_channels(),
            dst.num_channels(),
        ));
    }

    for image in [src, dst] {
        if image.depth() != PixelDepth::U8 {
            return Err(ImageError::UnsupportedDepth(image.depth().bytes()));
        }
    }

    Ok(())
}

/// Performs weighted addition of two images `src1` and `src2` with weights `alpha`
/// and `beta`, and an optional scalar `gamma`. The formula used is:
///
/// dst(x,y,c) = saturate(src1(x,y,c) * alpha + src2(x,y,c) * beta + gamma)
///
/// The result is rounded to the nearest integer, halves to even, and clamped to `[0, 255]`.
///
/// # Arguments
///
/// * `src1` - The first input image.
/// * `alpha` - Weight of the first image elements to be multiplied.
/// * `src2` - The second input image.
/// * `beta` - Weight of the second image elements to be multiplied.
/// * `gamma` - Scalar added to each sum.
/// * `dst` - The output image, which may use a different row pitch than the inputs.
///
/// # Errors
///
/// Returns an error if the sizes or channel counts of the images do not match, or if
/// any of them is not 8-bit.
///
/// # Examples
///
/// ```
/// use pixscan_image::{ImageSize, RasterBuffer};
/// use pixscan_imgproc::enhance::add_weighted;
///
/// let size = ImageSize { width: 2, height: 1 };
/// let src1 = RasterBuffer::new(size, 1, vec![100, 0]).unwrap();
/// let src2 = RasterBuffer::new(size, 1, vec![200, 255]).unwrap();
/// let mut dst = RasterBuffer::from_size_val(size, 1, 0).unwrap();
///
/// add_weighted(&src1, 0.5, &src2, 0.5, 0.0, &mut dst).unwrap();
///
/// assert_eq!(dst.to_vec(), vec![150, 128]);
/// ```
pub fn add_weighted(
    src1: &RasterBuffer,
    alpha: f64,
    src2: &RasterBuffer,
    beta: f64,
    gamma: f64,
    dst: &mut RasterBuffer,
) -> Result<(), ImageError> {
    check_compatible(src1, src2)?;
    check_compatible(src1, dst)?;

    for r in 0..dst.rows() {
        let a = src1.row(r)?;
        let b = src2.row(r)?;
        dst.row_mut(r)?
            .iter_mut()
            .zip(a.iter().zip(b.iter()))
            .for_each(|(out, (&x, &y))| {
                *out = (x as f64 * alpha + y as f64 * beta + gamma)
                    .round_ties_even()
                    .clamp(0.0, 255.0) as u8;
            });
    }

    Ok(())
}

/// Change the contrast and brightness of an image.
///
/// dst(x,y,c) = saturate(alpha * src(x,y,c) + beta)
///
/// The transform only depends on the input byte, so it is evaluated once per value into a
/// [`LookupTable`]. Every row of `src` is copied into `dst` and mapped in place.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image.
/// * `alpha` - The gain, controlling contrast.
/// * `beta` - The bias, controlling brightness.
pub fn convert_scale(
    src: &RasterBuffer,
    dst: &mut RasterBuffer,
    alpha: f64,
    beta: f64,
) -> Result<(), ImageError> {
    check_compatible(src, dst)?;

    let table = LookupTable::linear(alpha, beta);

    for r in 0..dst.rows() {
        let out = dst.row_mut(r)?;
        out.copy_from_slice(src.row(r)?);
        table.apply_slice(out);
    }

    Ok(())
}
