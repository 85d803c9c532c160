use log::debug;
use pixscan_image::{PixelDepth, RasterBuffer};

use crate::error::ScanError;
use crate::lut::LookupTable;
use crate::scan::ScanStrategy;

/// The first element at which two buffers differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    /// row of the element.
    pub row: usize,
    /// column of the element.
    pub col: usize,
    /// channel of the element.
    pub channel: usize,
    /// value in the first buffer.
    pub expected: u8,
    /// value in the second buffer.
    pub actual: u8,
}

fn shape(buffer: &RasterBuffer) -> [usize; 3] {
    [buffer.rows(), buffer.cols(), buffer.num_channels()]
}

/// Find the first element, in row-major channel-minor order, where two buffers differ.
///
/// Row padding is ignored, so a packed and a padded buffer holding the same pixels are equal.
///
/// # Errors
///
/// Returns [`ScanError::ShapeMismatch`] if the buffers have different dimensions and
/// [`ScanError::UnsupportedDepth`] if either buffer is not 8-bit.
pub fn first_mismatch(
    expected: &RasterBuffer,
    actual: &RasterBuffer,
) -> Result<Option<Mismatch>, ScanError> {
    if shape(expected) != shape(actual) {
        return Err(ScanError::ShapeMismatch(shape(expected), shape(actual)));
    }

    for buffer in [expected, actual] {
        if buffer.depth() != PixelDepth::U8 {
            return Err(ScanError::UnsupportedDepth(buffer.depth().bytes()));
        }
    }

    let channels = expected.num_channels();
    for row in 0..expected.rows() {
        let lhs = expected.row(row)?;
        let rhs = actual.row(row)?;
        if let Some(j) = lhs.iter().zip(rhs.iter()).position(|(a, b)| a != b) {
            return Ok(Some(Mismatch {
                row,
                col: j / channels,
                channel: j % channels,
                expected: lhs[j],
                actual: rhs[j],
            }));
        }
    }

    Ok(None)
}

/// Verify that every strategy produces the same output for the same input.
///
/// Each strategy runs on its own clone of `src`. The first strategy is taken as the
/// reference and every other output is compared against it element by element.
///
/// # Errors
///
/// Returns [`ScanError::EquivalenceMismatch`] with the first differing coordinate if a
/// strategy diverges, or the error of a strategy that fails to run.
///
/// # Examples
///
/// ```
/// use pixscan_image::{ImageSize, RasterBuffer};
/// use pixscan_imgproc::{equivalence::check_equivalence, LookupTable, ScanStrategy};
///
/// let image = RasterBuffer::from_size_val(ImageSize { width: 8, height: 4 }, 3, 77).unwrap();
/// let table = LookupTable::quantize(10).unwrap();
///
/// check_equivalence(&image, &table, &ScanStrategy::ALL).unwrap();
/// ```
pub fn check_equivalence(
    src: &RasterBuffer,
    table: &LookupTable,
    strategies: &[ScanStrategy],
) -> Result<(), ScanError> {
    check_equivalence_with(src, strategies, |strategy, buffer| {
        strategy.apply(buffer, table)
    })
}

/// Same as [`check_equivalence`] with every strategy run through `apply`.
pub(crate) fn check_equivalence_with<F>(
    src: &RasterBuffer,
    strategies: &[ScanStrategy],
    apply: F,
) -> Result<(), ScanError>
where
    F: Fn(ScanStrategy, &mut RasterBuffer) -> Result<(), ScanError>,
{
    let Some((reference, others)) = strategies.split_first() else {
        return Ok(());
    };

    let mut expected = src.clone();
    apply(*reference, &mut expected)?;

    for strategy in others {
        let mut actual = src.clone();
        apply(*strategy, &mut actual)?;

        compare_outputs(reference.name(), &expected, strategy.name(), &actual)?;
        debug!("{} matches {}", strategy, reference);
    }

    Ok(())
}

fn compare_outputs(
    reference: &'static str,
    expected: &RasterBuffer,
    strategy: &'static str,
    actual: &RasterBuffer,
) -> Result<(), ScanError> {
    match first_mismatch(expected, actual)? {
        None => Ok(()),
        Some(m) => Err(ScanError::EquivalenceMismatch {
            reference,
            strategy,
            row: m.row,
            col: m.col,
            channel: m.channel,
            expected: m.expected,
            actual: m.actual,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixscan_image::ImageSize;

    #[test]
    fn identical_buffers() -> Result<(), ScanError> {
        let a = RasterBuffer::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            3,
            5,
        )?;
        let b = a.to_row_pitch(12)?;
        assert_eq!(first_mismatch(&a, &b)?, None);
        Ok(())
    }

    #[test]
    fn reports_first_coordinate() -> Result<(), ScanError> {
        let a = RasterBuffer::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            3,
            5,
        )?;
        let mut b = a.clone();
        b.set(1, 2, 1, 9)?;
        b.set(1, 2, 2, 8)?;

        assert_eq!(
            first_mismatch(&a, &b)?,
            Some(Mismatch {
                row: 1,
                col: 2,
                channel: 1,
                expected: 5,
                actual: 9,
            })
        );
        Ok(())
    }

    #[test]
    fn shape_mismatch() -> Result<(), ScanError> {
        let a = RasterBuffer::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            1,
            0,
        )?;
        let b = RasterBuffer::from_size_val(
            ImageSize {
                width: 2,
                height: 3,
            },
            1,
            0,
        )?;
        assert_eq!(
            first_mismatch(&a, &b),
            Err(ScanError::ShapeMismatch([2, 3, 1], [3, 2, 1]))
        );
        Ok(())
    }

    #[test]
    fn strategies_agree() -> Result<(), ScanError> {
        let data = (0..=255u8).cycle().take(17 * 5 * 3).collect::<Vec<_>>();
        let image = RasterBuffer::new(
            ImageSize {
                width: 17,
                height: 5,
            },
            3,
            data,
        )?;
        let table = LookupTable::quantize(7)?;

        check_equivalence(&image, &table, &ScanStrategy::ALL)?;
        check_equivalence(&image.to_row_pitch(64)?, &table, &ScanStrategy::ALL)?;
        check_equivalence(&image, &table, &[])?;
        Ok(())
    }

    #[test]
    fn diverging_output_is_reported() -> Result<(), ScanError> {
        let expected = RasterBuffer::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            1,
            vec![0, 240, 0, 96],
        )?;
        let actual = RasterBuffer::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            1,
            vec![0, 240, 0, 99],
        )?;

        let res = compare_outputs("direct-index", &expected, "broken", &actual);
        assert_eq!(
            res,
            Err(ScanError::EquivalenceMismatch {
                reference: "direct-index",
                strategy: "broken",
                row: 1,
                col: 1,
                channel: 0,
                expected: 96,
                actual: 99,
            })
        );
        Ok(())
    }

    #[test]
    fn strategy_errors_propagate() -> Result<(), ScanError> {
        let image = RasterBuffer::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            2,
            0,
        )?;
        let res = check_equivalence(&image, &LookupTable::identity(), &ScanStrategy::ALL);
        assert!(matches!(
            res,
            Err(ScanError::UnsupportedChannelCount { channels: 2, .. })
        ));
        Ok(())
    }
}
