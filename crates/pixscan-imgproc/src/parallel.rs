use rayon::prelude::*;
use thiserror::Error;

use pixscan_image::RasterBuffer;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how row operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// A packed buffer is handed over as a single row spanning the whole image.
    #[default]
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    ParallelRows,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Apply a function to the element bytes of every row of the buffer.
///
/// The function receives each row without its padding. With [`ExecutionStrategy::Serial`]
/// a packed buffer is passed as one slice covering all rows.
///
/// # Examples
///
/// ```
/// use pixscan_image::{ImageSize, RasterBuffer};
/// use pixscan_imgproc::parallel::{for_each_row_mut, ExecutionStrategy};
///
/// let mut image = RasterBuffer::from_size_val(ImageSize { width: 4, height: 3 }, 1, 1).unwrap();
///
/// for_each_row_mut(&mut image, ExecutionStrategy::ParallelRows, |row| {
///     row.iter_mut().for_each(|v| *v += 1)
/// })
/// .unwrap();
///
/// assert!(image.to_vec().iter().all(|&v| v == 2));
/// ```
pub fn for_each_row_mut<F>(
    buffer: &mut RasterBuffer,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<(), ParallelError>
where
    F: Fn(&mut [u8]) + Send + Sync,
{
    if buffer.is_empty() {
        return Ok(());
    }

    let row_pitch = buffer.row_pitch();
    let row_bytes = buffer.row_bytes();

    match strategy {
        ExecutionStrategy::Serial => {
            if let Some(data) = buffer.packed_slice_mut() {
                f(data);
            } else {
                buffer
                    .as_bytes_mut()
                    .chunks_exact_mut(row_pitch)
                    .for_each(|row| f(&mut row[..row_bytes]));
            }
        }
        ExecutionStrategy::ParallelRows => {
            buffer
                .as_bytes_mut()
                .par_chunks_exact_mut(row_pitch)
                .for_each(|row| f(&mut row[..row_bytes]));
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                buffer
                    .as_bytes_mut()
                    .par_chunks_exact_mut(row_pitch)
                    .for_each(|row| f(&mut row[..row_bytes]));
            });
        }
    }

    Ok(())
}
