use std::time::Instant;

use log::{debug, info};
use pixscan_image::RasterBuffer;

use crate::equivalence::check_equivalence_with;
use crate::error::ScanError;
use crate::lut::LookupTable;
use crate::scan::ScanStrategy;

/// A monotonic time source.
pub trait Clock {
    /// A point in time.
    type Instant: Copy;

    /// The current point in time.
    fn now(&self) -> Self::Instant;

    /// Milliseconds elapsed between `start` and `end`.
    fn elapsed_millis(&self, start: Self::Instant, end: Self::Instant) -> f64;
}

/// A clock backed by [`std::time::Instant`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, start: Self::Instant, end: Self::Instant) -> f64 {
        end.duration_since(start).as_secs_f64() * 1e3
    }
}

/// Measures the time between its creation and its drop.
///
/// The elapsed milliseconds are added to the accumulator on drop, so a measurement can
/// never be started without being stopped.
///
/// # Examples
///
/// ```
/// use pixscan_imgproc::benchmark::{MonotonicClock, ScopedTimer};
///
/// let mut total_ms = 0.0;
/// {
///     let _timer = ScopedTimer::new(&MonotonicClock, &mut total_ms);
///     std::thread::sleep(std::time::Duration::from_millis(1));
/// }
///
/// assert!(total_ms >= 1.0);
/// ```
pub struct ScopedTimer<'a, C: Clock> {
    clock: &'a C,
    start: C::Instant,
    total_ms: &'a mut f64,
}

impl<'a, C: Clock> ScopedTimer<'a, C> {
    /// Start a measurement that accumulates into `total_ms`.
    pub fn new(clock: &'a C, total_ms: &'a mut f64) -> Self {
        Self {
            clock,
            start: clock.now(),
            total_ms,
        }
    }
}

impl<C: Clock> Drop for ScopedTimer<'_, C> {
    fn drop(&mut self) {
        let end = self.clock.now();
        *self.total_ms += self.clock.elapsed_millis(self.start, end);
    }
}

/// The timing of a single strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    /// the measured strategy.
    pub strategy: ScanStrategy,
    /// number of timed runs.
    pub repetitions: usize,
    /// sum of the run times in milliseconds.
    pub total_ms: f64,
    /// mean run time in milliseconds.
    pub mean_ms: f64,
}

impl BenchmarkResult {
    /// Name of the measured strategy.
    pub fn name(&self) -> &'static str {
        self.strategy.name()
    }
}

/// A sink for benchmark results.
pub trait Reporter {
    /// Consume the result of one strategy.
    fn report(&mut self, result: &BenchmarkResult);
}

/// Reports results through the `log` facade at info level.
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, result: &BenchmarkResult) {
        info!(
            "Time of reducing with {} (averaged for {} runs): {:.4} milliseconds.",
            result.name(),
            result.repetitions,
            result.mean_ms
        );
    }
}

impl Reporter for Vec<BenchmarkResult> {
    fn report(&mut self, result: &BenchmarkResult) {
        self.push(result.clone());
    }
}

/// Runs the scanning strategies repeatedly and measures their mean latency.
///
/// Strategies run strictly one after the other on the calling thread. Every repetition
/// scans a fresh clone of the input, and the clone is made outside the timed region.
#[derive(Debug, Default)]
pub struct BenchmarkHarness<C: Clock = MonotonicClock> {
    clock: C,
}

impl BenchmarkHarness<MonotonicClock> {
    /// Create a harness timed by the monotonic system clock.
    pub fn new() -> Self {
        Self {
            clock: MonotonicClock,
        }
    }
}

impl<C: Clock> BenchmarkHarness<C> {
    /// Create a harness timed by the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Time every strategy over `repetitions` runs.
    ///
    /// # Arguments
    ///
    /// * `src` - The input buffer, left untouched.
    /// * `table` - The lookup table shared by every run.
    /// * `strategies` - The strategies to time, in order.
    /// * `repetitions` - The number of timed runs per strategy, at least one.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidRepetitionCount`] before any work if `repetitions == 0`,
    /// or the first error of a strategy run.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixscan_image::{ImageSize, RasterBuffer};
    /// use pixscan_imgproc::{benchmark::BenchmarkHarness, LookupTable, ScanStrategy};
    ///
    /// let image = RasterBuffer::from_size_val(ImageSize { width: 64, height: 48 }, 3, 200).unwrap();
    /// let table = LookupTable::quantize(10).unwrap();
    ///
    /// let results = BenchmarkHarness::new()
    ///     .run(&image, &table, &ScanStrategy::ALL, 3)
    ///     .unwrap();
    ///
    /// assert_eq!(results.len(), 4);
    /// assert!(results.iter().all(|r| r.repetitions == 3));
    /// ```
    pub fn run(
        &self,
        src: &RasterBuffer,
        table: &LookupTable,
        strategies: &[ScanStrategy],
        repetitions: usize,
    ) -> Result<Vec<BenchmarkResult>, ScanError> {
        self.run_with(src, strategies, repetitions, |strategy, buffer| {
            strategy.apply(buffer, table)
        })
    }

    fn run_with<F>(
        &self,
        src: &RasterBuffer,
        strategies: &[ScanStrategy],
        repetitions: usize,
        apply: F,
    ) -> Result<Vec<BenchmarkResult>, ScanError>
    where
        F: Fn(ScanStrategy, &mut RasterBuffer) -> Result<(), ScanError>,
    {
        if repetitions == 0 {
            return Err(ScanError::InvalidRepetitionCount(repetitions));
        }

        let mut results = Vec::with_capacity(strategies.len());

        for &strategy in strategies {
            let mut total_ms = 0.0;

            for _ in 0..repetitions {
                let mut dst = src.clone();
                let _timer = ScopedTimer::new(&self.clock, &mut total_ms);
                apply(strategy, &mut dst)?;
            }

            let mean_ms = total_ms / repetitions as f64;
            debug!("{strategy}: {total_ms:.4} ms over {repetitions} runs");

            results.push(BenchmarkResult {
                strategy,
                repetitions,
                total_ms,
                mean_ms,
            });
        }

        Ok(results)
    }

    /// Verify the strategies agree on `src`, then time them.
    ///
    /// No timing is performed when the outputs diverge.
    pub fn run_checked(
        &self,
        src: &RasterBuffer,
        table: &LookupTable,
        strategies: &[ScanStrategy],
        repetitions: usize,
    ) -> Result<Vec<BenchmarkResult>, ScanError> {
        self.run_checked_with(src, strategies, repetitions, |strategy, buffer| {
            strategy.apply(buffer, table)
        })
    }

    /// Same as [`BenchmarkHarness::run_checked`] with every strategy run through `apply`.
    pub(crate) fn run_checked_with<F>(
        &self,
        src: &RasterBuffer,
        strategies: &[ScanStrategy],
        repetitions: usize,
        apply: F,
    ) -> Result<Vec<BenchmarkResult>, ScanError>
    where
        F: Fn(ScanStrategy, &mut RasterBuffer) -> Result<(), ScanError>,
    {
        if repetitions == 0 {
            return Err(ScanError::InvalidRepetitionCount(repetitions));
        }

        check_equivalence_with(src, strategies, &apply)?;
        self.run_with(src, strategies, repetitions, apply)
    }

    /// Verify, time and hand every result to `reporter`.
    pub fn run_and_report(
        &self,
        src: &RasterBuffer,
        table: &LookupTable,
        strategies: &[ScanStrategy],
        repetitions: usize,
        reporter: &mut impl Reporter,
    ) -> Result<Vec<BenchmarkResult>, ScanError> {
        let results = self.run_checked(src, table, strategies, repetitions)?;
        results.iter().for_each(|result| reporter.report(result));
        Ok(results)
    }
}

/// The channel layout a benchmark input is loaded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMode {
    /// single channel gray scale.
    Gray,
    /// three channel color.
    #[default]
    Color,
}

impl ChannelMode {
    /// Number of channels of the mode.
    pub fn channels(&self) -> usize {
        match self {
            ChannelMode::Gray => 1,
            ChannelMode::Color => 3,
        }
    }
}

impl std::fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ChannelMode::Gray => write!(f, "gray"),
            ChannelMode::Color => write!(f, "color"),
        }
    }
}

impl std::str::FromStr for ChannelMode {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gray" | "grey" | "g" => Ok(ChannelMode::Gray),
            "color" | "colour" => Ok(ChannelMode::Color),
            _ => Err(ScanError::UnknownChannelMode(s.to_string())),
        }
    }
}

/// The options of a scanning benchmark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkConfig {
    /// quantization step of the lookup table.
    pub divisor: i64,
    /// number of timed runs per strategy.
    pub repetitions: usize,
    /// channel layout of the input.
    pub channel_mode: ChannelMode,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            divisor: 10,
            repetitions: 100,
            channel_mode: ChannelMode::Color,
        }
    }
}

impl BenchmarkConfig {
    /// Validate the options and build the lookup table.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::LutError`] for a non-positive divisor and
    /// [`ScanError::InvalidRepetitionCount`] for zero repetitions.
    pub fn lookup_table(&self) -> Result<LookupTable, ScanError> {
        if self.repetitions == 0 {
            return Err(ScanError::InvalidRepetitionCount(self.repetitions));
        }
        Ok(LookupTable::quantize(self.divisor)?)
    }
}
