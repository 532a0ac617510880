//! Error type for configuration problems.
//!
//! Squaring itself cannot fail: overflow, underflow and special values all
//! have defined results. Only caller-supplied configuration is checked.

use crate::real::Prec;

/// Error type for squaring configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SqrError {
    /// Options that would break the rounding error analysis.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A component precision the backend cannot represent.
    #[error("precision {prec} outside supported range [{min}, {max}]")]
    InvalidPrecision {
        /// Requested precision.
        prec: Prec,
        /// Backend minimum.
        min: Prec,
        /// Backend maximum.
        max: Prec,
    },
}
