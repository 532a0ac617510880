//! The arbitrary-precision real number collaborator.
//!
//! `Real` is the narrow interface the squaring algorithms consume. Values use
//! the MPFR convention: a regular value is `m * 2^e` with `1/2 <= |m| < 1`,
//! and every arithmetic operation rounds its exact result once to the
//! destination's precision, returning the direction of that rounding.
//!
//! Methods that write take the destination as `&mut self` and their operands
//! as `&Self`, so a destination can never alias an operand.

use std::fmt;

use crate::round::{Inexact, Round};

/// Precision in bits.
pub type Prec = u32;

/// Binary exponent.
pub type Exp = i64;

/// Arbitrary-precision binary floating-point value with a bounded exponent
/// range and explicit rounding.
pub trait Real: Clone + fmt::Debug {
    /// A `+0` with the given precision.
    fn with_prec(prec: Prec) -> Self;

    /// Precision of this value in bits.
    fn prec(&self) -> Prec;

    /// Smallest precision the backend accepts.
    fn min_prec() -> Prec;

    /// Largest precision the backend accepts.
    fn max_prec() -> Prec;

    /// Smallest exponent of a regular value.
    fn emin() -> Exp;

    /// Largest exponent of a regular value.
    fn emax() -> Exp;

    fn is_nan(&self) -> bool;

    fn is_infinite(&self) -> bool;

    fn is_zero(&self) -> bool;

    /// Sign bit, meaningful for zeros and infinities too.
    fn is_sign_negative(&self) -> bool;

    /// Finite and non-zero.
    fn is_regular(&self) -> bool {
        !self.is_nan() && !self.is_infinite() && !self.is_zero()
    }

    fn set_nan(&mut self);

    fn set_inf(&mut self, negative: bool);

    fn set_zero(&mut self, negative: bool);

    /// Set to an integer, rounded to this value's precision.
    fn set_si(&mut self, value: i64, round: Round) -> Inexact;

    /// Set to `value * 2^exp`, rounded, with overflow and underflow handled
    /// as for any other operation.
    fn set_si_2exp(&mut self, value: i64, exp: Exp, round: Round) -> Inexact;

    /// Set to `src` rounded to this value's precision.
    fn set_round(&mut self, src: &Self, round: Round) -> Inexact;

    fn add_round(&mut self, a: &Self, b: &Self, round: Round) -> Inexact;

    fn sub_round(&mut self, a: &Self, b: &Self, round: Round) -> Inexact;

    fn mul_round(&mut self, a: &Self, b: &Self, round: Round) -> Inexact;

    /// Set to `a * a`.
    fn sqr_round(&mut self, a: &Self, round: Round) -> Inexact {
        self.mul_round(a, a, round)
    }

    /// Flip the sign in place. Always exact.
    fn neg_assign(&mut self);

    /// Multiply in place by `2^n`. Exact unless the result leaves the
    /// exponent range.
    fn mul_2si_round(&mut self, n: Exp, round: Round) -> Inexact;

    /// Divide in place by `2^n`.
    fn div_2si_round(&mut self, n: Exp, round: Round) -> Inexact {
        self.mul_2si_round(n.saturating_neg(), round)
    }

    /// Exponent of a regular value.
    ///
    /// # Panics
    ///
    /// May panic if the value is not regular.
    fn exp(&self) -> Exp;

    /// Replace the exponent of a regular value, keeping its significand.
    ///
    /// `exp` must lie in `[emin, emax]`.
    fn set_exp(&mut self, exp: Exp);

    /// Compare absolute values. `None` if either is NaN.
    fn cmp_abs(&self, other: &Self) -> Option<std::cmp::Ordering>;

    /// Whether this approximation can be rounded correctly.
    ///
    /// The exact value lies within `2^(exp(self) - err)` of `self`, on the side
    /// implied by `approx_dir` (the mode `self` was rounded with: `Up` means
    /// `self` is an upper bound, `Down` a lower bound, `Zero`/`AwayZero` bound
    /// the magnitude, `Nearest` says nothing). Returns `true` only if every
    /// value in that interval rounds to the same `prec`-bit value under
    /// `round`.
    fn can_round(&self, err: Exp, approx_dir: Round, prec: Prec, round: Round) -> bool;
}
