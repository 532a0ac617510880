//! Correctly-rounded complex squaring.

use std::cmp::Ordering;

use tracing::trace;

use crate::complex::Complex;
use crate::error::SqrError;
use crate::fmma::{fmma, FmmaOp};
use crate::observer::{SqrEvent, SqrObserver, SqrPath};
use crate::observers::NoOpObserver;
use crate::options::SqrOptions;
use crate::real::Real;
use crate::round::{ComplexInexact, ComplexRound, Round};
use crate::ziv::karatsuba_real;

/// Set `rop` to `op * op`, each part rounded once to `rop`'s precision for
/// that part.
///
/// Use [`Complex::square_round`] to square a value in place.
///
/// # Example
/// ```ignore
/// let mut rop = Complex::<Float>::new(53, 53);
/// let (inex_re, inex_im) = sqr(&mut rop, &op, Round::Nearest.into());
/// ```
pub fn sqr<R: Real>(rop: &mut Complex<R>, op: &Complex<R>, round: ComplexRound) -> ComplexInexact {
    square_into(rop, op, round, &SqrOptions::default(), &NoOpObserver)
}

/// [`sqr`] with explicit options and an observer.
///
/// Options are normalized (zero fields take their defaults) and then
/// validated.
pub fn sqr_with<R, O>(
    rop: &mut Complex<R>,
    op: &Complex<R>,
    round: ComplexRound,
    opts: &SqrOptions,
    observer: &O,
) -> Result<ComplexInexact, SqrError>
where
    R: Real,
    O: SqrObserver + ?Sized,
{
    let opts = opts.normalize();
    opts.validate()?;
    Ok(square_into(rop, op, round, &opts, observer))
}

fn square_into<R, O>(
    rop: &mut Complex<R>,
    op: &Complex<R>,
    round: ComplexRound,
    opts: &SqrOptions,
    observer: &O,
) -> ComplexInexact
where
    R: Real,
    O: SqrObserver + ?Sized,
{
    let (x, y) = (&op.re, &op.im);

    if !x.is_regular() || !y.is_regular() {
        if x.is_nan() || y.is_nan() || x.is_infinite() || y.is_infinite() {
            observer.on_event(SqrEvent::Path(SqrPath::Special));
            square_special(rop, x, y);
            return (Ordering::Equal, Ordering::Equal);
        }
        // One part is zero; the other is zero or regular.
        let conj = x.is_sign_negative() != y.is_sign_negative();
        let inex_re = if y.is_zero() {
            observer.on_event(SqrEvent::Path(SqrPath::RealAxis));
            rop.re.sqr_round(x, round.re)
        } else {
            observer.on_event(SqrEvent::Path(SqrPath::ImaginaryAxis));
            let inex = rop.re.sqr_round(y, round.re.reverse());
            rop.re.neg_assign();
            inex.reverse()
        };
        rop.im.set_zero(false);
        if conj {
            rop.conj_assign();
        }
        return (inex_re, Ordering::Equal);
    }

    // Read before `rop.re` gets written.
    let start_prec = rop.max_prec();
    let skew = x.exp().abs_diff(y.exp());
    let inex_re = if skew > u64::from(op.max_prec() / 2) {
        trace!(skew, "Exponents far apart, using fused product-sum");
        observer.on_event(SqrEvent::Path(SqrPath::Fused));
        fmma(&mut rop.re, x, x, y, y, FmmaOp::Sub, round.re)
    } else {
        observer.on_event(SqrEvent::Path(SqrPath::Karatsuba));
        karatsuba_real(&mut rop.re, x, y, start_prec, round.re, opts, observer)
    };

    let inex_im = imaginary_part(&mut rop.im, x, y, round.im, observer);
    (inex_re, inex_im)
}

/// `2xy` for regular `x` and `y`.
fn imaginary_part<R, O>(im: &mut R, x: &R, y: &R, round: Round, observer: &O) -> Ordering
where
    R: Real,
    O: SqrObserver + ?Sized,
{
    // |xy| < 2^(EXP(x) + EXP(y)); at or below emin the product may land
    // under the smallest magnitude, where doubling a rounded value is wrong.
    if x.exp() + y.exp() <= R::emin() {
        observer.on_event(SqrEvent::ImaginaryUnderflow);
        return fmma(im, x, y, x, y, FmmaOp::Add, round);
    }
    let inex = im.mul_round(x, y, round);
    match im.mul_2si_round(1, round) {
        Ordering::Equal => inex,
        overflowed => overflowed,
    }
}

/// Square with a NaN or infinite part. Every result here is exact.
fn square_special<R: Real>(rop: &mut Complex<R>, x: &R, y: &R) {
    if x.is_nan() || y.is_nan() {
        rop.re.set_nan();
        rop.im.set_nan();
        return;
    }
    let product_negative = x.is_sign_negative() != y.is_sign_negative();
    if x.is_infinite() {
        if y.is_infinite() {
            rop.re.set_nan();
            rop.im.set_inf(product_negative);
            return;
        }
        rop.re.set_inf(false);
    } else {
        // y infinite, x finite.
        rop.re.set_inf(true);
    }
    let finite = if x.is_infinite() { y } else { x };
    if finite.is_zero() {
        rop.im.set_nan();
    } else {
        rop.im.set_inf(product_negative);
    }
}
