//! Property-based tests for complex squaring over MPFR.
//!
//! Results are checked against the exact square, computed at a precision
//! large enough to hold it without rounding, and against MPC's own
//! `mpc_sqr` through `rug::Complex`.

use std::cmp::Ordering;

use proptest::prelude::*;
use rug::Float;

use csqr_core::mpfr::{rug_round, MpfrComplex};
use csqr_core::observers::{NoOpObserver, RecordingObserver};
use csqr_core::ziv::karatsuba_real;
use csqr_core::{fmma, sqr, sqr_with, ComplexRound, FmmaOp, Round, SqrOptions, SqrPath};

/// Holds `x^2 - y^2` exactly for the operands generated below.
const EXACT_PREC: u32 = 1024;

fn float(prec: u32, mant: i64, exp: i32) -> Float {
    let mut f = Float::with_val(prec, mant);
    f <<= exp;
    f
}

fn exact_square(op: &MpfrComplex) -> (Float, Float) {
    let mut re = Float::with_val(EXACT_PREC, op.re.square_ref());
    re -= Float::with_val(EXACT_PREC, op.im.square_ref());
    let mut im = Float::with_val(EXACT_PREC, &op.re * &op.im);
    im <<= 1;
    (re, im)
}

fn rounded(exact: &Float, prec: u32, round: Round) -> (Float, Ordering) {
    Float::with_val_round(prec, exact, rug_round(round))
}

fn any_round() -> impl Strategy<Value = Round> {
    prop::sample::select(Round::ALL.to_vec())
}

/// A regular value with a precision in `[2, 64]` and a moderate exponent.
fn regular() -> impl Strategy<Value = Float> {
    (2u32..=64, 1i64..(1 << 40), -40i32..40, any::<bool>()).prop_map(
        |(prec, mant, exp, negative)| {
            let f = float(prec, mant, exp);
            if negative {
                -f
            } else {
                f
            }
        },
    )
}

/// `(x, y)` with `y` close to `±x`, so that `x^2 - y^2` cancels.
fn cancelling() -> impl Strategy<Value = MpfrComplex> {
    (regular(), 2u32..=64, -1000i64..1000, 10i32..60, any::<bool>()).prop_map(
        |(x, prec, delta, depth, flip)| {
            let exp = x.get_exp().unwrap_or(0);
            let mut y = Float::with_val(prec, &x + &float(8, delta, exp - depth));
            if y.is_zero() {
                y = Float::with_val(prec, &x);
            }
            if flip {
                y = -y;
            }
            MpfrComplex::from_parts(x, y)
        },
    )
}

fn operand() -> impl Strategy<Value = MpfrComplex> {
    prop_oneof![
        (regular(), regular()).prop_map(|(x, y)| MpfrComplex::from_parts(x, y)),
        cancelling(),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Each part equals the exact square rounded once, with the matching flag.
    #[test]
    fn square_is_correctly_rounded(
        op in operand(),
        prec_re in 2u32..=128,
        prec_im in 2u32..=128,
        round_re in any_round(),
        round_im in any_round(),
    ) {
        let (exact_re, exact_im) = exact_square(&op);
        let mut rop = MpfrComplex::new(prec_re, prec_im);
        let (inex_re, inex_im) = sqr(&mut rop, &op, ComplexRound::new(round_re, round_im));

        let (want_re, want_inex_re) = rounded(&exact_re, prec_re, round_re);
        let (want_im, want_inex_im) = rounded(&exact_im, prec_im, round_im);
        prop_assert_eq!(&rop.re, &want_re, "real part of {:?} under {:?}", op, round_re);
        prop_assert_eq!(inex_re, want_inex_re, "real flag of {:?} under {:?}", op, round_re);
        prop_assert_eq!(&rop.im, &want_im, "imaginary part of {:?} under {:?}", op, round_im);
        prop_assert_eq!(inex_im, want_inex_im, "imaginary flag of {:?} under {:?}", op, round_im);
    }

    /// The flag orders the stored result against the exact square.
    #[test]
    fn flag_matches_stored_result(op in operand(), prec in 2u32..=96, round in any_round()) {
        let (exact_re, exact_im) = exact_square(&op);
        let mut rop = MpfrComplex::new(prec, prec);
        let (inex_re, inex_im) = sqr(&mut rop, &op, round.into());

        prop_assert_eq!(rop.re.partial_cmp(&exact_re), Some(inex_re));
        prop_assert_eq!(rop.im.partial_cmp(&exact_im), Some(inex_im));
    }

    /// Same values and flags as MPC's `mpc_sqr`.
    #[test]
    fn agrees_with_mpc(
        op in operand(),
        prec_re in 2u32..=128,
        prec_im in 2u32..=128,
        round_re in any_round(),
        round_im in any_round(),
    ) {
        let mut rop = MpfrComplex::new(prec_re, prec_im);
        let ours = sqr(&mut rop, &op, ComplexRound::new(round_re, round_im));

        let mpc_op = rug::Complex::from(op.clone());
        let (theirs, mpc_inex) = rug::Complex::with_val_round(
            (prec_re, prec_im),
            mpc_op.square_ref(),
            (rug_round(round_re), rug_round(round_im)),
        );
        let theirs = MpfrComplex::from(theirs);
        prop_assert_eq!(&rop.re, &theirs.re);
        prop_assert_eq!(&rop.im, &theirs.im);
        prop_assert_eq!(ours, mpc_inex);
    }

    /// The adaptive loop and the fused primitive produce the same real part.
    #[test]
    fn karatsuba_agrees_with_fused(op in cancelling(), prec in 2u32..=160, round in any_round()) {
        let mut adaptive = Float::new(prec);
        let observer = RecordingObserver::new();
        let inex_adaptive = karatsuba_real(
            &mut adaptive,
            &op.re,
            &op.im,
            prec,
            round,
            &SqrOptions::default(),
            &observer,
        );

        let mut fused = Float::new(prec);
        let inex_fused = fmma(&mut fused, &op.re, &op.re, &op.im, &op.im, FmmaOp::Sub, round);

        prop_assert_eq!(&adaptive, &fused);
        prop_assert_eq!(inex_adaptive, inex_fused);
        prop_assert!(observer.iterations() >= 1);
    }

    /// `a*b + c*d` and `a*b - c*d` round like the exact sum.
    #[test]
    fn fmma_is_correctly_rounded(
        a in regular(),
        b in regular(),
        c in regular(),
        d in regular(),
        prec in 2u32..=128,
        round in any_round(),
    ) {
        for op in [FmmaOp::Add, FmmaOp::Sub] {
            let ab = Float::with_val(EXACT_PREC, &a * &b);
            let cd = Float::with_val(EXACT_PREC, &c * &d);
            let exact = match op {
                FmmaOp::Add => Float::with_val(EXACT_PREC, &ab + &cd),
                FmmaOp::Sub => Float::with_val(EXACT_PREC, &ab - &cd),
            };
            let (want, want_inex) = rounded(&exact, prec, round);

            let mut z = Float::new(prec);
            let inex = fmma(&mut z, &a, &b, &c, &d, op, round);
            prop_assert_eq!(&z, &want, "{:?} under {:?}", op, round);
            prop_assert_eq!(inex, want_inex, "{:?} under {:?}", op, round);
        }
    }

    /// Options only change how many retries happen, never the result.
    #[test]
    fn options_do_not_change_results(
        op in cancelling(),
        prec in 2u32..=96,
        round in any_round(),
        guard_bits in 3u32..12,
        prec_pad in 1u32..40,
    ) {
        let mut tuned = MpfrComplex::new(prec, prec);
        let opts = SqrOptions { guard_bits, prec_pad };
        let inex_tuned = sqr_with(&mut tuned, &op, round.into(), &opts, &NoOpObserver).unwrap();

        let mut plain = MpfrComplex::new(prec, prec);
        let inex_plain = sqr(&mut plain, &op, round.into());

        prop_assert_eq!(tuned, plain);
        prop_assert_eq!(inex_tuned, inex_plain);
    }

    /// Squaring exactly and taking the principal square root recovers the
    /// operand up to sign.
    #[test]
    fn square_then_sqrt_roundtrip(op in operand()) {
        let prec = op.max_prec();
        let skew = op.re.get_exp().unwrap_or(0).abs_diff(op.im.get_exp().unwrap_or(0));
        let wide = 4 * prec + 4 * skew + 8;
        let mut square = MpfrComplex::new(wide, wide);
        let inex = sqr(&mut square, &op, Round::Nearest.into());
        prop_assert_eq!(inex, (Ordering::Equal, Ordering::Equal));

        let (root, _) = rug::Complex::with_val_round(
            (prec, prec),
            rug::Complex::from(square).sqrt_ref(),
            (rug::float::Round::Nearest, rug::float::Round::Nearest),
        );
        let root = MpfrComplex::from(root);
        let mut expected = op.clone();
        if expected.re.is_sign_negative() {
            expected.re = -expected.re;
            expected.im = -expected.im;
        }
        prop_assert_eq!(root.re, expected.re);
        prop_assert_eq!(root.im, expected.im);
    }

    /// Far-apart exponents take the fused path, close ones the adaptive loop.
    #[test]
    fn path_follows_exponent_skew(op in operand()) {
        let skew = op.re.get_exp().unwrap_or(0).abs_diff(op.im.get_exp().unwrap_or(0));
        let observer = RecordingObserver::new();
        let mut rop = MpfrComplex::new(53, 53);
        sqr_with(&mut rop, &op, Round::Nearest.into(), &SqrOptions::default(), &observer).unwrap();

        let expected = if skew > op.max_prec() / 2 {
            SqrPath::Fused
        } else {
            SqrPath::Karatsuba
        };
        prop_assert_eq!(observer.path(), Some(expected));
    }
}
