use pixscan_image::{PixelDepth, RasterBuffer};

use crate::error::ScanError;
use crate::lut::LookupTable;
use crate::parallel::{self, ExecutionStrategy};

/// The algorithm used to visit every element of a buffer.
///
/// Every strategy replaces each channel value `v` with `table[v]` in place and produces
/// byte-for-byte identical results. They differ only in how each element is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanStrategy {
    /// Row slices indexed by position, collapsed into a single pass when the buffer is packed.
    DirectIndex,
    /// A cursor advancing element by element in row-major, channel-minor order.
    SequentialIterator,
    /// Coordinate-addressed access to every `(row, col, channel)` of 1 or 3 channel buffers.
    RandomAccess,
    /// The whole buffer mapped through the table as a single bulk operation.
    TableApply,
}

impl ScanStrategy {
    /// Every strategy, in benchmark order.
    pub const ALL: [ScanStrategy; 4] = [
        ScanStrategy::DirectIndex,
        ScanStrategy::SequentialIterator,
        ScanStrategy::RandomAccess,
        ScanStrategy::TableApply,
    ];

    /// Human readable name of the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            ScanStrategy::DirectIndex => "direct-index",
            ScanStrategy::SequentialIterator => "iterator",
            ScanStrategy::RandomAccess => "random-access",
            ScanStrategy::TableApply => "lut",
        }
    }

    /// Map every element of `buffer` through `table` in place.
    ///
    /// # Errors
    ///
    /// Fails with [`ScanError::UnsupportedDepth`] for buffers that are not 8-bit, and with
    /// [`ScanError::UnsupportedChannelCount`] when [`ScanStrategy::RandomAccess`] is given a
    /// buffer with other than 1 or 3 channels.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixscan_image::{ImageSize, RasterBuffer};
    /// use pixscan_imgproc::{LookupTable, ScanStrategy};
    ///
    /// let table = LookupTable::quantize(16).unwrap();
    ///
    /// for strategy in ScanStrategy::ALL {
    ///     let mut image =
    ///         RasterBuffer::new(ImageSize { width: 2, height: 2 }, 1, vec![10, 250, 0, 99]).unwrap();
    ///     strategy.apply(&mut image, &table).unwrap();
    ///     assert_eq!(image.to_vec(), vec![0, 240, 0, 96]);
    /// }
    /// ```
    pub fn apply(&self, buffer: &mut RasterBuffer, table: &LookupTable) -> Result<(), ScanError> {
        match self {
            ScanStrategy::DirectIndex => scan_direct_index(buffer, table),
            ScanStrategy::SequentialIterator => scan_iterator(buffer, table),
            ScanStrategy::RandomAccess => scan_random_access(buffer, table),
            ScanStrategy::TableApply => lut(buffer, table),
        }
    }
}

impl std::fmt::Display for ScanStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScanStrategy {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScanStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| ScanError::UnknownStrategy(s.to_string()))
    }
}

fn ensure_u8(buffer: &RasterBuffer) -> Result<(), ScanError> {
    match buffer.depth() {
        PixelDepth::U8 => Ok(()),
        depth => Err(ScanError::UnsupportedDepth(depth.bytes())),
    }
}

/// Reduce the buffer by indexing each row slice directly.
///
/// When the buffer is packed the rows are contiguous, so the whole image is scanned as a
/// single row of `rows * cols * channels` elements.
#[allow(clippy::needless_range_loop)]
pub fn scan_direct_index(buffer: &mut RasterBuffer, table: &LookupTable) -> Result<(), ScanError> {
    ensure_u8(buffer)?;

    if let Some(p) = buffer.packed_slice_mut() {
        for j in 0..p.len() {
            p[j] = table[p[j]];
        }
        return Ok(());
    }

    for i in 0..buffer.rows() {
        let p = buffer.row_mut(i)?;
        for j in 0..p.len() {
            p[j] = table[p[j]];
        }
    }

    Ok(())
}

/// Reduce the buffer by walking a sequential element cursor from the first to the last element.
pub fn scan_iterator(buffer: &mut RasterBuffer, table: &LookupTable) -> Result<(), ScanError> {
    ensure_u8(buffer)?;

    for val in buffer.elements_mut() {
        *val = table[*val];
    }

    Ok(())
}

/// Reduce the buffer by computing the address of every `(row, col, channel)` on the fly.
///
/// Only gray and three channel buffers are supported.
pub fn scan_random_access(
    buffer: &mut RasterBuffer,
    table: &LookupTable,
) -> Result<(), ScanError> {
    ensure_u8(buffer)?;

    match buffer.num_channels() {
        1 => {
            for i in 0..buffer.rows() {
                for j in 0..buffer.cols() {
                    let val = buffer.at(i, j, 0)?;
                    buffer.set(i, j, 0, table[val])?;
                }
            }
        }
        3 => {
            for i in 0..buffer.rows() {
                for j in 0..buffer.cols() {
                    for c in 0..3 {
                        let px = buffer.at_mut(i, j, c)?;
                        *px = table[*px];
                    }
                }
            }
        }
        channels => {
            return Err(ScanError::UnsupportedChannelCount {
                strategy: ScanStrategy::RandomAccess.name(),
                channels,
            })
        }
    }

    Ok(())
}

/// Apply the lookup table to the whole buffer in a single bulk pass.
///
/// # Examples
///
/// ```
/// use pixscan_image::{ImageSize, RasterBuffer};
/// use pixscan_imgproc::{scan::lut, LookupTable};
///
/// let mut image = RasterBuffer::new(ImageSize { width: 3, height: 1 }, 1, vec![5, 15, 25]).unwrap();
///
/// lut(&mut image, &LookupTable::quantize(10).unwrap()).unwrap();
///
/// assert_eq!(image.to_vec(), vec![0, 10, 20]);
/// ```
pub fn lut(buffer: &mut RasterBuffer, table: &LookupTable) -> Result<(), ScanError> {
    lut_with(buffer, table, ExecutionStrategy::Serial)
}

/// Apply the lookup table to the whole buffer with the given execution strategy.
pub fn lut_with(
    buffer: &mut RasterBuffer,
    table: &LookupTable,
    strategy: ExecutionStrategy,
) -> Result<(), ScanError> {
    ensure_u8(buffer)?;
    parallel::for_each_row_mut(buffer, strategy, |row| table.apply_slice(row))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixscan_image::ImageSize;

    fn sample_gray() -> Result<RasterBuffer, ScanError> {
        Ok(RasterBuffer::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            1,
            vec![10, 250, 0, 99],
        )?)
    }

    #[test]
    fn all_strategies_reduce_gray() -> Result<(), ScanError> {
        let table = LookupTable::quantize(16)?;
        for strategy in ScanStrategy::ALL {
            let mut image = sample_gray()?;
            strategy.apply(&mut image, &table)?;
            assert_eq!(image.to_vec(), vec![0, 240, 0, 96], "{strategy}");
        }
        Ok(())
    }

    #[test]
    fn all_strategies_reduce_color_padded() -> Result<(), ScanError> {
        let table = LookupTable::quantize(10)?;
        let data = (0..2 * 3 * 3).map(|v| (v * 13) as u8).collect::<Vec<_>>();
        let expected = data.iter().map(|&v| v / 10 * 10).collect::<Vec<_>>();
        let image = RasterBuffer::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            3,
            data,
        )?
        .to_row_pitch(16)?;

        for strategy in ScanStrategy::ALL {
            let mut out = image.clone();
            strategy.apply(&mut out, &table)?;
            assert_eq!(out.to_vec(), expected, "{strategy}");
            // padding is left untouched
            assert!(out.as_bytes()[9..16].iter().all(|&v| v == 0));
        }
        Ok(())
    }

    #[test]
    fn random_access_rejects_four_channels() -> Result<(), ScanError> {
        let table = LookupTable::quantize(16)?;
        let mut image = RasterBuffer::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            4,
            100,
        )?;
        let res = ScanStrategy::RandomAccess.apply(&mut image, &table);
        assert_eq!(
            res,
            Err(ScanError::UnsupportedChannelCount {
                strategy: "random-access",
                channels: 4
            })
        );

        // the other strategies are not bound to a channel layout
        ScanStrategy::DirectIndex.apply(&mut image, &table)?;
        assert!(image.to_vec().iter().all(|&v| v == 96));
        Ok(())
    }

    #[test]
    fn wide_depth_is_rejected() -> Result<(), ScanError> {
        let table = LookupTable::identity();
        let mut image = RasterBuffer::from_raw_parts(
            ImageSize {
                width: 2,
                height: 2,
            },
            1,
            PixelDepth::U16,
            4,
            vec![0u8; 8],
        )?;
        for strategy in ScanStrategy::ALL {
            assert_eq!(
                strategy.apply(&mut image, &table),
                Err(ScanError::UnsupportedDepth(2))
            );
        }
        Ok(())
    }

    #[test]
    fn empty_buffers_are_noop() -> Result<(), ScanError> {
        let table = LookupTable::quantize(3)?;
        for size in [[0usize, 5], [5, 0], [0, 0]] {
            for channels in [1, 3] {
                for strategy in ScanStrategy::ALL {
                    let mut image = RasterBuffer::from_size_val(size.into(), channels, 0)?;
                    strategy.apply(&mut image, &table)?;
                    assert!(image.is_empty());
                }
            }
        }
        Ok(())
    }

    #[test]
    fn single_pixel() -> Result<(), ScanError> {
        let table = LookupTable::quantize(4)?;
        for strategy in ScanStrategy::ALL {
            let mut image = RasterBuffer::new(
                ImageSize {
                    width: 1,
                    height: 1,
                },
                1,
                vec![7],
            )?;
            strategy.apply(&mut image, &table)?;
            assert_eq!(image.at(0, 0, 0)?, 4);
        }
        Ok(())
    }

    #[test]
    fn parse_strategy_names() -> Result<(), ScanError> {
        for strategy in ScanStrategy::ALL {
            assert_eq!(strategy.name().parse::<ScanStrategy>()?, strategy);
        }
        assert_eq!(
            "pointer".parse::<ScanStrategy>(),
            Err(ScanError::UnknownStrategy("pointer".to_string()))
        );
        Ok(())
    }

    #[test]
    fn lut_with_parallel_rows() -> Result<(), ScanError> {
        let table = LookupTable::quantize(32)?;
        let data = (0..64 * 48).map(|v| (v % 256) as u8).collect::<Vec<_>>();
        let image = RasterBuffer::new(
            ImageSize {
                width: 64,
                height: 48,
            },
            1,
            data,
        )?
        .to_row_pitch(80)?;

        let mut serial = image.clone();
        lut(&mut serial, &table)?;

        for strategy in [ExecutionStrategy::ParallelRows, ExecutionStrategy::Fixed(3)] {
            let mut out = image.clone();
            lut_with(&mut out, &table, strategy)?;
            assert_eq!(out.to_vec(), serial.to_vec());
        }
        Ok(())
    }
}
