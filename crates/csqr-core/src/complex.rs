//! Complex values over a [`Real`] backend.

use crate::error::SqrError;
use crate::options::SqrOptions;
use crate::real::{Prec, Real};
use crate::round::{ComplexInexact, ComplexRound};
use crate::sqr::{sqr, sqr_with};

/// A complex number whose parts may carry different precisions.
///
/// When used as a destination, the precisions of `re` and `im` are the target
/// precisions of the result.
#[derive(Debug, Clone, PartialEq)]
pub struct Complex<R> {
    /// Real part.
    pub re: R,
    /// Imaginary part.
    pub im: R,
}

impl<R: Real> Complex<R> {
    /// `+0 + 0i` with the given component precisions.
    ///
    /// # Panics
    ///
    /// Panics through the backend if a precision is out of range; use
    /// [`Complex::try_new`] to check first.
    #[must_use]
    pub fn new(prec_re: Prec, prec_im: Prec) -> Self {
        Self {
            re: R::with_prec(prec_re),
            im: R::with_prec(prec_im),
        }
    }

    /// Like [`Complex::new`], rejecting precisions the backend cannot hold.
    pub fn try_new(prec_re: Prec, prec_im: Prec) -> Result<Self, SqrError> {
        check_prec::<R>(prec_re)?;
        check_prec::<R>(prec_im)?;
        Ok(Self::new(prec_re, prec_im))
    }

    #[must_use]
    pub fn from_parts(re: R, im: R) -> Self {
        Self { re, im }
    }

    /// Component precisions.
    #[must_use]
    pub fn prec(&self) -> (Prec, Prec) {
        (self.re.prec(), self.im.prec())
    }

    /// The larger component precision.
    #[must_use]
    pub fn max_prec(&self) -> Prec {
        self.re.prec().max(self.im.prec())
    }

    /// Negate the imaginary part in place.
    pub fn conj_assign(&mut self) {
        self.im.neg_assign();
    }

    /// Replace `self` with its square, rounded to its own precisions.
    ///
    /// The operand is copied before the destination is written, so this is
    /// the aliasing form of [`sqr`].
    pub fn square_round(&mut self, round: impl Into<ComplexRound>) -> ComplexInexact {
        let op = self.clone();
        sqr(self, &op, round.into())
    }

    /// [`Complex::square_round`] with explicit options.
    pub fn square_round_with(
        &mut self,
        round: impl Into<ComplexRound>,
        opts: &SqrOptions,
    ) -> Result<ComplexInexact, SqrError> {
        let op = self.clone();
        sqr_with(self, &op, round.into(), opts, &crate::observers::NoOpObserver)
    }
}

fn check_prec<R: Real>(prec: Prec) -> Result<(), SqrError> {
    let (min, max) = (R::min_prec(), R::max_prec());
    if prec < min || prec > max {
        return Err(SqrError::InvalidPrecision { prec, min, max });
    }
    Ok(())
}
