//! Karatsuba real part `(x+y)*(x-y)` with Ziv's escalating precision.
//!
//! Each iteration computes `u = x+y` and `v = x-y` rounded away from zero and
//! their product rounded away from zero, which gives a one-sided bound on
//! `x^2 - y^2` within `2^(EXP - prec + guard_bits)`. When that bound cannot be
//! rounded to the target, the working precision grows by
//! `ceil_log2(prec) + prec_pad` and the iteration repeats.

use std::cmp::Ordering;

use tracing::debug;

use crate::constants::ceil_log2;
use crate::fmma::{fmma, overflow, FmmaOp};
use crate::observer::{Boundary, SqrEvent, SqrObserver};
use crate::options::SqrOptions;
use crate::real::{Exp, Prec, Real};
use crate::round::{toward_zero_flag, Inexact, Round};

/// Sign of `u*v`, deciding the direction the product is rounded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductSign {
    /// `u*v > 0`: rounding up gives an upper bound.
    Positive,
    /// `u*v < 0`: rounding down gives a lower bound.
    Negative,
    /// `u` or `v` is zero, and so is the exact product.
    Zero,
}

impl ProductSign {
    /// Sign of `u*v` for non-NaN `u` and `v`.
    pub fn of<R: Real>(u: &R, v: &R) -> Self {
        if u.is_zero() || v.is_zero() {
            ProductSign::Zero
        } else if u.is_sign_negative() == v.is_sign_negative() {
            ProductSign::Positive
        } else {
            ProductSign::Negative
        }
    }

    /// Mode rounding the product away from zero.
    #[must_use]
    pub const fn bounding_round(self) -> Round {
        match self {
            ProductSign::Positive => Round::Up,
            ProductSign::Negative => Round::Down,
            ProductSign::Zero => Round::Nearest,
        }
    }
}

/// Set `re` to `x^2 - y^2` rounded to its precision, for regular `x`, `y`.
///
/// `start_prec` is the precision the first increment is applied to.
pub fn karatsuba_real<R, O>(
    re: &mut R,
    x: &R,
    y: &R,
    start_prec: Prec,
    round: Round,
    opts: &SqrOptions,
    observer: &O,
) -> Inexact
where
    R: Real,
    O: SqrObserver + ?Sized,
{
    // One extra bit under Nearest also certifies the flag, not only the value.
    let check_prec = re.prec() + u32::from(round == Round::Nearest);
    let mut prec = start_prec;

    loop {
        prec = prec.saturating_add(ceil_log2(prec) + opts.prec_pad);
        assert!(
            prec <= R::max_prec(),
            "working precision {prec} exceeds backend maximum {}",
            R::max_prec()
        );
        observer.on_event(SqrEvent::WorkingPrec(prec));

        let mut u = R::with_prec(prec);
        let mut v = R::with_prec(prec);
        let mut inexact = u.add_round(x, y, Round::AwayZero) != Ordering::Equal;
        inexact |= v.sub_round(x, y, Round::AwayZero) != Ordering::Equal;

        if u.is_infinite() || v.is_infinite() {
            // x±y overflowed, the bound is useless; the squares are not.
            debug!(prec, "Karatsuba sum overflowed, falling back to fused product-sum");
            return fmma(re, x, x, y, y, FmmaOp::Sub, round);
        }

        let sign = ProductSign::of(&u, &v);
        let negative = match sign {
            // Rounding away never turns a nonzero sum into zero, so x^2 - y^2 = 0.
            ProductSign::Zero => return re.set_si(0, Round::Nearest),
            ProductSign::Positive => false,
            ProductSign::Negative => true,
        };

        let mut w = R::with_prec(prec);
        inexact |= w.mul_round(&u, &v, sign.bounding_round()) != Ordering::Equal;

        if w.is_infinite() {
            observer.on_event(SqrEvent::Boundary(Boundary::Overflow));
            return overflow(re, negative, round);
        }

        if inexact && is_smallest_magnitude(&w) {
            observer.on_event(SqrEvent::Boundary(Boundary::Underflow));
            return underflow(re, &w, x, y, negative, round);
        }

        let err = Exp::from(prec) - Exp::from(opts.guard_bits);
        if !inexact || w.can_round(err, sign.bounding_round(), check_prec, Round::Zero) {
            let inex = re.set_round(&w, round);
            return match inex {
                Ordering::Equal if inexact => toward_zero_flag(negative).reverse(),
                _ => inex,
            };
        }

        debug!(prec, "Karatsuba product not roundable, raising precision");
    }
}

/// `|w| == 2^(emin - 1)`, the value an away-rounded underflow lands on.
fn is_smallest_magnitude<R: Real>(w: &R) -> bool {
    if w.exp() != R::emin() {
        return false;
    }
    let mut floor = R::with_prec(R::min_prec());
    floor.set_si_2exp(1, R::emin() - 1, Round::Nearest);
    w.cmp_abs(&floor) == Some(Ordering::Equal)
}

/// Real part when `|x^2 - y^2|` is below the smallest magnitude.
fn underflow<R: Real>(
    re: &mut R,
    floor: &R,
    x: &R,
    y: &R,
    negative: bool,
    round: Round,
) -> Inexact {
    if round.is_toward_zero(negative) {
        re.set_zero(negative);
        return toward_zero_flag(negative);
    }
    if round.is_away_from_zero(negative) {
        re.set_round(floor, round);
        return toward_zero_flag(negative).reverse();
    }
    // Nearest needs to know on which side of half the smallest magnitude the
    // exact value lies, which the one-sided bound cannot tell.
    fmma(re, x, x, y, y, FmmaOp::Sub, round)
}
