//! Squaring options and configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GUARD_BITS, DEFAULT_PREC_PAD, MIN_GUARD_BITS};
use crate::error::SqrError;

/// Tuning knobs for the adaptive real-part loop.
///
/// Neither field changes results, only how many retries it takes to reach
/// them, as long as [`SqrOptions::validate`] accepts the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqrOptions {
    /// Bits of the working precision not trusted when testing roundability.
    pub guard_bits: u32,
    /// Constant added to `ceil(log2(prec))` when raising the working precision.
    pub prec_pad: u32,
}

impl Default for SqrOptions {
    fn default() -> Self {
        Self {
            guard_bits: DEFAULT_GUARD_BITS,
            prec_pad: DEFAULT_PREC_PAD,
        }
    }
}

impl SqrOptions {
    /// Normalize options, applying defaults where values are zero.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.guard_bits == 0 {
            self.guard_bits = DEFAULT_GUARD_BITS;
        }
        if self.prec_pad == 0 {
            self.prec_pad = DEFAULT_PREC_PAD;
        }
        self
    }

    /// Reject options under which the loop would round incorrectly or stall.
    pub fn validate(&self) -> Result<(), SqrError> {
        if self.guard_bits < MIN_GUARD_BITS {
            return Err(SqrError::InvalidOptions(format!(
                "guard_bits must be at least {MIN_GUARD_BITS}, got {}",
                self.guard_bits
            )));
        }
        if self.prec_pad == 0 {
            return Err(SqrError::InvalidOptions(
                "prec_pad must be positive".into(),
            ));
        }
        Ok(())
    }
}
