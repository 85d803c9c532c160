use thiserror::Error;

/// Errors that can occur while building a lookup table.
#[derive(Error, Debug, PartialEq)]
pub enum LutError {
    /// The quantization divisor is not a positive integer.
    #[error("divisor must be > 0, got {0}")]
    InvalidDivisor(i64),
}

/// A precomputed mapping from every byte value to an output byte.
///
/// The table is built once and then only read, so a single instance can be shared by
/// reference between every scan of a buffer.
///
/// # Examples
///
/// ```
/// use pixscan_imgproc::lut::LookupTable;
///
/// let table = LookupTable::quantize(16).unwrap();
///
/// assert_eq!(table.apply(10), 0);
/// assert_eq!(table.apply(99), 96);
/// assert_eq!(table.apply(250), 240);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupTable {
    table: [u8; 256],
}

impl LookupTable {
    /// Build the color-space reduction table `table[v] = divisor * (v / divisor)`.
    ///
    /// # Arguments
    ///
    /// * `divisor` - The quantization step. Values are floored to the nearest lower multiple.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::InvalidDivisor`] if `divisor <= 0`.
    pub fn quantize(divisor: i64) -> Result<Self, LutError> {
        if divisor <= 0 {
            return Err(LutError::InvalidDivisor(divisor));
        }

        // the result never exceeds the input, so the cast is lossless
        Ok(Self::from_fn(|v| {
            let v = v as i64;
            (divisor * (v / divisor)) as u8
        }))
    }

    /// The table mapping every value to itself.
    pub fn identity() -> Self {
        Self::from_fn(|v| v)
    }

    /// Build a table by evaluating `f` on every byte value.
    pub fn from_fn(f: impl Fn(u8) -> u8) -> Self {
        let mut table = [0u8; 256];
        table
            .iter_mut()
            .zip(0..=u8::MAX)
            .for_each(|(entry, v)| *entry = f(v));
        Self { table }
    }

    /// Build the contrast and brightness table `table[v] = saturate(alpha * v + beta)`.
    ///
    /// The result is rounded to the nearest integer, halves to even, and clamped to `[0, 255]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixscan_imgproc::lut::LookupTable;
    ///
    /// let table = LookupTable::linear(2.0, 10.0);
    ///
    /// assert_eq!(table.apply(20), 50);
    /// assert_eq!(table.apply(200), 255);
    /// ```
    pub fn linear(alpha: f64, beta: f64) -> Self {
        Self::from_fn(|v| {
            (alpha * v as f64 + beta)
                .round_ties_even()
                .clamp(0.0, 255.0) as u8
        })
    }

    /// Look up a single value.
    #[inline(always)]
    pub fn apply(&self, value: u8) -> u8 {
        self.table[value as usize]
    }

    /// Replace every byte of `data` by its table entry.
    pub fn apply_slice(&self, data: &mut [u8]) {
        data.iter_mut().for_each(|v| *v = self.table[*v as usize]);
    }

    /// The 256 table entries.
    pub fn as_slice(&self) -> &[u8; 256] {
        &self.table
    }
}

impl Default for LookupTable {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Index<u8> for LookupTable {
    type Output = u8;

    #[inline(always)]
    fn index(&self, value: u8) -> &Self::Output {
        &self.table[value as usize]
    }
}
