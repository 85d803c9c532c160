#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// timing harness for the scanning strategies.
pub mod benchmark;

/// image enhancement module.
pub mod enhance;

/// cross-strategy output comparison.
pub mod equivalence;

/// Error types for the scanning operations.
pub mod error;

/// 256-entry lookup tables.
pub mod lut;

/// module containing parallelization utilities.
pub mod parallel;

/// strategies to scan a raster buffer through a lookup table.
pub mod scan;

pub use crate::error::ScanError;
pub use crate::lut::{LookupTable, LutError};
pub use crate::scan::ScanStrategy;
