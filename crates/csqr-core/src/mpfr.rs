//! GNU MPFR backend through the `rug` crate.
//!
//! Only available when the `mpfr` feature is enabled (the default).

use std::cmp::Ordering;

use rug::float::{self, Special};
use rug::ops::{AssignRound, NegAssign};
use rug::{Assign, Float};

use crate::complex::Complex;
use crate::real::{Exp, Prec, Real};
use crate::round::Round;

/// Complex value over MPFR reals.
pub type MpfrComplex = Complex<Float>;

/// The `rug` rounding mode for a [`Round`].
#[must_use]
pub const fn rug_round(round: Round) -> float::Round {
    match round {
        Round::Nearest => float::Round::Nearest,
        Round::Zero => float::Round::Zero,
        Round::Up => float::Round::Up,
        Round::Down => float::Round::Down,
        Round::AwayZero => float::Round::AwayZero,
    }
}

impl From<rug::Complex> for MpfrComplex {
    fn from(value: rug::Complex) -> Self {
        let (re, im) = value.into_real_imag();
        Complex { re, im }
    }
}

impl From<MpfrComplex> for rug::Complex {
    fn from(value: MpfrComplex) -> Self {
        let prec = (value.re.prec(), value.im.prec());
        rug::Complex::with_val(prec, (value.re, value.im))
    }
}

/// Clamp to the shift range `rug` accepts. A clamped shift still overflows
/// or underflows any regular value.
fn shift_amount(n: Exp) -> i32 {
    i32::try_from(n).unwrap_or(if n < 0 { i32::MIN } else { i32::MAX })
}

impl Real for Float {
    fn with_prec(prec: Prec) -> Self {
        Float::new(prec)
    }

    fn prec(&self) -> Prec {
        Float::prec(self)
    }

    fn min_prec() -> Prec {
        float::prec_min()
    }

    fn max_prec() -> Prec {
        float::prec_max()
    }

    fn emin() -> Exp {
        Exp::from(float::exp_min())
    }

    fn emax() -> Exp {
        Exp::from(float::exp_max())
    }

    fn is_nan(&self) -> bool {
        Float::is_nan(self)
    }

    fn is_infinite(&self) -> bool {
        Float::is_infinite(self)
    }

    fn is_zero(&self) -> bool {
        Float::is_zero(self)
    }

    fn is_sign_negative(&self) -> bool {
        Float::is_sign_negative(self)
    }

    fn set_nan(&mut self) {
        self.assign(Special::Nan);
    }

    fn set_inf(&mut self, negative: bool) {
        self.assign(if negative {
            Special::NegInfinity
        } else {
            Special::Infinity
        });
    }

    fn set_zero(&mut self, negative: bool) {
        self.assign(if negative {
            Special::NegZero
        } else {
            Special::Zero
        });
    }

    fn set_si(&mut self, value: i64, round: Round) -> Ordering {
        self.assign_round(value, rug_round(round))
    }

    fn set_si_2exp(&mut self, value: i64, exp: Exp, round: Round) -> Ordering {
        let exact = Float::with_val(64, value);
        self.assign_round(&exact << shift_amount(exp), rug_round(round))
    }

    fn set_round(&mut self, src: &Self, round: Round) -> Ordering {
        self.assign_round(src, rug_round(round))
    }

    fn add_round(&mut self, a: &Self, b: &Self, round: Round) -> Ordering {
        self.assign_round(a + b, rug_round(round))
    }

    fn sub_round(&mut self, a: &Self, b: &Self, round: Round) -> Ordering {
        self.assign_round(a - b, rug_round(round))
    }

    fn mul_round(&mut self, a: &Self, b: &Self, round: Round) -> Ordering {
        self.assign_round(a * b, rug_round(round))
    }

    fn sqr_round(&mut self, a: &Self, round: Round) -> Ordering {
        self.assign_round(a.square_ref(), rug_round(round))
    }

    fn neg_assign(&mut self) {
        NegAssign::neg_assign(self);
    }

    fn mul_2si_round(&mut self, n: Exp, round: Round) -> Ordering {
        let src = self.clone();
        self.assign_round(&src << shift_amount(n), rug_round(round))
    }

    fn exp(&self) -> Exp {
        match self.get_exp() {
            Some(exp) => Exp::from(exp),
            None => panic!("exponent of non-regular value {self:?}"),
        }
    }

    fn set_exp(&mut self, exp: Exp) {
        let shift = exp - Real::exp(self);
        let inex = self.assign_round(&self.clone() << shift_amount(shift), float::Round::Nearest);
        assert_eq!(inex, Ordering::Equal, "exponent {exp} out of range");
    }

    fn cmp_abs(&self, other: &Self) -> Option<Ordering> {
        Float::cmp_abs(self, other)
    }

    fn can_round(&self, err: Exp, approx_dir: Round, prec: Prec, round: Round) -> bool {
        if !Real::is_regular(self) || err <= 0 {
            return false;
        }
        // Wide enough that m ± 2^-err is exact.
        let err_bits = Prec::try_from(err).unwrap_or(Prec::MAX);
        let width = Float::prec(self).max(err_bits).saturating_add(2);
        if width > float::prec_max() {
            return false;
        }

        let mut mant = Float::with_val(width, self);
        mant >>= self.get_exp().unwrap_or(0);
        let mut radius = Float::with_val(width, 1);
        radius >>= shift_amount(err);

        let below = Float::with_val(width, &mant - &radius);
        let above = Float::with_val(width, &mant + &radius);
        let negative = Float::is_sign_negative(self);
        let (lo, hi) = match approx_dir {
            Round::Up => (below, mant),
            Round::Down => (mant, above),
            Round::Zero if negative => (below, mant),
            Round::Zero => (mant, above),
            Round::AwayZero if negative => (mant, above),
            Round::AwayZero => (below, mant),
            Round::Nearest => (below, above),
        };

        // Directed modes must also agree the other way round, so that no
        // representable value lies in the interval and the flag is decided.
        let checks: &[Round] = match round {
            Round::Nearest => &[Round::Nearest],
            _ => &[round, Round::Zero, Round::AwayZero],
        };
        checks.iter().all(|&mode| {
            let (lo, _) = Float::with_val_round(prec, &lo, rug_round(mode));
            let (hi, _) = Float::with_val_round(prec, &hi, rug_round(mode));
            lo == hi
        })
    }
}
