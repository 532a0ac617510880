//! Constants for working-precision growth and error bounds.

/// Bits subtracted from the working precision before asking whether the
/// Karatsuba product can be rounded.
///
/// `u = x+y`, `v = x-y` and `u*v` are each rounded away from zero with a
/// relative error below `2^(1-p)`, so the product is off by less than
/// `2^(EXP(u*v) - p + 3)`.
pub const DEFAULT_GUARD_BITS: u32 = 3;

/// Smallest guard that keeps the error bound above valid.
pub const MIN_GUARD_BITS: u32 = 3;

/// Constant added to `ceil(log2(prec))` on every Ziv iteration.
pub const DEFAULT_PREC_PAD: u32 = 5;

/// Ceiling of the base-2 logarithm, with `ceil_log2(0) == ceil_log2(1) == 0`.
#[must_use]
pub const fn ceil_log2(n: u32) -> u32 {
    if n <= 1 {
        0
    } else {
        u32::BITS - (n - 1).leading_zeros()
    }
}
