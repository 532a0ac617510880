//! Fused product-sum `a*b ± c*d` with a single rounding.
//!
//! The two products are formed exactly at the sum of their factors'
//! precisions. When a product leaves the exponent range (overflow to
//! infinity, underflow to zero or to the smallest magnitude) the computation
//! is redone on local copies normalized to exponent 0, with the removed
//! exponents tracked as `BigInt`s so that operands near both ends of the
//! range cannot overflow the bookkeeping itself.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use tracing::debug;

use crate::real::{Exp, Prec, Real};
use crate::round::{toward_zero_flag, Inexact, Round};

/// Whether the second product is added or subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FmmaOp {
    /// `a*b + c*d`
    Add,
    /// `a*b - c*d`
    Sub,
}

/// Set `z` to `a*b + c*d` or `a*b - c*d`, rounded once to `z`'s precision.
///
/// All four operands must be regular (finite, non-zero). Returns the
/// direction of the final rounding.
///
/// # Example
/// ```ignore
/// // z = x*x - y*y
/// let inex = fmma(&mut z, &x, &x, &y, &y, FmmaOp::Sub, Round::Nearest);
/// ```
pub fn fmma<R: Real>(
    z: &mut R,
    a: &R,
    b: &R,
    c: &R,
    d: &R,
    op: FmmaOp,
    round: Round,
) -> Inexact {
    debug_assert!(a.is_regular() && b.is_regular() && c.is_regular() && d.is_regular());

    let mut u = R::with_prec(product_prec(a, b));
    let mut v = R::with_prec(product_prec(c, d));
    // Exact at these precisions unless the exponent range was left.
    let inex_u = u.mul_round(a, b, Round::Nearest);
    let inex_v = v.mul_round(c, d, Round::Nearest);
    if op == FmmaOp::Sub {
        v.neg_assign();
    }

    let inex = z.add_round(&u, &v, round);

    if inex_u != Ordering::Equal || inex_v != Ordering::Equal {
        let u = ScaledProduct::new(a, b, false);
        let v = ScaledProduct::new(c, d, op == FmmaOp::Sub);
        return rescue(z, u, v, round);
    }
    if z.is_infinite() {
        let negative = z.is_sign_negative();
        return overflow(z, negative, round);
    }
    inex
}

/// Set `z` to the correctly rounded overflow of a value with the given sign.
///
/// Depending on `round` this is a signed infinity or the largest finite
/// magnitude, with the matching flag.
pub(crate) fn overflow<R: Real>(z: &mut R, negative: bool, round: Round) -> Inexact {
    z.set_si_2exp(if negative { -1 } else { 1 }, R::emax(), round)
}

/// Copy of a regular value moved to exponent 0, with its original exponent.
pub(crate) fn normalized<R: Real>(value: &R) -> (R, BigInt) {
    let mut mant = value.clone();
    let exp = BigInt::from(mant.exp());
    mant.set_exp(0);
    (mant, exp)
}

fn product_prec<R: Real>(a: &R, b: &R) -> Prec {
    a.prec().saturating_add(b.prec()).min(R::max_prec())
}

/// `mant * 2^exp` with `mant` at exponent 0 (so `1/2 <= |mant| < 1`).
#[derive(Debug)]
struct ScaledProduct<R> {
    mant: R,
    exp: BigInt,
}

impl<R: Real> ScaledProduct<R> {
    /// Exact `a*b` (negated if asked) in scaled form.
    fn new(a: &R, b: &R, negate: bool) -> Self {
        let (ma, ea) = normalized(a);
        let (mb, eb) = normalized(b);
        let mut mant = R::with_prec(product_prec(a, b));
        let inex = mant.mul_round(&ma, &mb, Round::Nearest);
        assert_eq!(inex, Ordering::Equal, "normalized product must be exact");
        if negate {
            mant.neg_assign();
        }
        // |ma * mb| lies in [1/4, 1): exponent 0 or -1.
        let carry = mant.exp();
        mant.set_exp(0);
        Self {
            mant,
            exp: ea + eb + carry,
        }
    }

    /// Two-bit `±1/2 * 2^exp` carrying only the sign of `self`.
    fn sticky(&self, exp: BigInt) -> Self {
        let mut mant = R::with_prec(R::min_prec().max(2));
        let sign = if self.mant.is_sign_negative() { -1 } else { 1 };
        mant.set_si_2exp(sign, -1, Round::Nearest);
        Self { mant, exp }
    }
}

/// Round `u + v` once when at least one of them lies outside the exponent
/// range.
fn rescue<R: Real>(
    z: &mut R,
    u: ScaledProduct<R>,
    v: ScaledProduct<R>,
    round: Round,
) -> Inexact {
    let (emin, emax) = (R::emin(), R::emax());
    let (mut big, mut small) = if u.exp >= v.exp { (u, v) } else { (v, u) };

    // Below `reach` bits under `big`, `small` cannot move the sum across a
    // rounding boundary of `width` bits; only its sign matters.
    let width = z.prec().max(big.mant.prec()).max(small.mant.prec());
    let reach = BigInt::from(width) + 3;
    if &big.exp - &small.exp > reach {
        small = small.sticky(&big.exp - &reach);
    }

    // The value is (big.mant * 2^(big.exp - shift) + small.mant * 2^(small.exp - shift)) * 2^shift.
    let shift = if big.exp > BigInt::from(emax) {
        debug!(exp = %big.exp, "Fused product-sum overflow rescue");
        // One below the top keeps a same-signed sum finite.
        &big.exp - (emax - 1)
    } else {
        debug!(exp = %small.exp, "Fused product-sum underflow rescue");
        // High enough above emin that cancellation stays in range. A sticky
        // proxy may already sit there.
        let floor = BigInt::from(emin) + width + 1;
        if small.exp < floor {
            &small.exp - floor
        } else {
            BigInt::zero()
        }
    };

    big.mant.set_exp(aligned_exp::<R>(&big.exp - &shift));
    small.mant.set_exp(aligned_exp::<R>(&small.exp - &shift));
    let inex = z.add_round(&big.mant, &small.mant, round);
    let negative = z.is_sign_negative();
    let tie = round == Round::Nearest && is_half_smallest(z, &shift);

    let rescaled = if shift.is_positive() {
        z.mul_2si_round(saturating_exp(&shift), round)
    } else {
        z.div_2si_round(saturating_exp(&(-&shift)), round)
    };
    if rescaled == Ordering::Equal {
        return inex;
    }
    // The backend sends an exact half of the smallest magnitude to zero, but
    // the sum was rounded down onto it from above.
    if tie && inex == toward_zero_flag(negative) {
        z.set_si_2exp(if negative { -1 } else { 1 }, emin - 1, Round::Nearest);
        return toward_zero_flag(negative).reverse();
    }
    rescaled
}

/// `|z| * 2^shift == 2^(emin - 2)`.
fn is_half_smallest<R: Real>(z: &R, shift: &BigInt) -> bool {
    if !z.is_regular() || BigInt::from(z.exp()) + shift != BigInt::from(R::emin() - 1) {
        return false;
    }
    let mut power = R::with_prec(R::min_prec().max(2));
    power.set_si_2exp(1, z.exp() - 1, Round::Nearest);
    z.cmp_abs(&power) == Some(Ordering::Equal)
}

fn aligned_exp<R: Real>(exp: BigInt) -> Exp {
    match Exp::try_from(&exp) {
        Ok(e) if (R::emin()..=R::emax()).contains(&e) => e,
        _ => panic!("aligned exponent {exp} outside [{}, {}]", R::emin(), R::emax()),
    }
}

/// Clamp to `Exp`; a clamped shift still overflows or underflows any
/// regular value.
fn saturating_exp(n: &BigInt) -> Exp {
    Exp::try_from(n).unwrap_or(if n.is_negative() { Exp::MIN } else { Exp::MAX })
}
