#![no_main]

use libfuzzer_sys::fuzz_target;
use rug::Float;

use csqr_core::mpfr::rug_round;
use csqr_core::{fmma, FmmaOp, Real, Round};

const EXACT_PREC: u32 = 4096;

fn operand(bytes: &[u8], exp_bias: i64) -> Float {
    let prec = u32::from(bytes[0] % 64) + 2;
    let mant = i64::from_le_bytes(bytes[2..10].try_into().unwrap());
    let mut f = Float::with_val(prec, mant);
    // Spread exponents over the whole range, centred on exp_bias.
    let exp = exp_bias + i64::from(bytes[1] as i8) * 8;
    f <<= i32::try_from(exp).unwrap_or(0);
    f
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 43 {
        return;
    }
    // Bias puts the products near overflow, near underflow or in the middle.
    let bias = match data[42] % 3 {
        0 => <Float as Real>::emax() / 2 - 64,
        1 => <Float as Real>::emin() / 2 + 64,
        _ => 0,
    };
    let a = operand(&data[0..10], bias);
    let b = operand(&data[10..20], bias);
    let c = operand(&data[20..30], bias);
    let d = operand(&data[30..40], bias);
    if ![&a, &b, &c, &d].iter().all(|f| f.is_normal()) {
        return;
    }
    let prec = u32::from(data[40] % 128) + 2;
    let round = Round::ALL[usize::from(data[41] % 5)];
    let op = if data[41] >= 128 { FmmaOp::Sub } else { FmmaOp::Add };

    let mut z = Float::new(prec);
    let inex = fmma(&mut z, &a, &b, &c, &d, op, round);

    // Compare against the same computation with the exponents moved to 0,
    // where nothing can overflow, rounded back through one exact shift.
    let shift = |f: &Float| f.get_exp().unwrap_or(0);
    let (ea, eb, ec, ed) = (shift(&a), shift(&b), shift(&c), shift(&d));
    let scaled = |f: &Float, e: i32| {
        let mut g = Float::with_val(f.prec(), f);
        g >>= e;
        g
    };
    let (sa, sb, sc, sd) = (scaled(&a, ea), scaled(&b, eb), scaled(&c, ec), scaled(&d, ed));
    let ab_exp = i64::from(ea) + i64::from(eb);
    let cd_exp = i64::from(ec) + i64::from(ed);
    let top = ab_exp.max(cd_exp);
    let gap = top - ab_exp.min(cd_exp);
    if gap > i64::from(EXACT_PREC) / 2 {
        return;
    }
    let mut ab = Float::with_val(EXACT_PREC, &sa * &sb);
    ab <<= i32::try_from(ab_exp - top).unwrap_or(0);
    let mut cd = Float::with_val(EXACT_PREC, &sc * &sd);
    cd <<= i32::try_from(cd_exp - top).unwrap_or(0);
    let exact = match op {
        FmmaOp::Add => Float::with_val(EXACT_PREC, &ab + &cd),
        FmmaOp::Sub => Float::with_val(EXACT_PREC, &ab - &cd),
    };
    let Ok(top) = i32::try_from(top) else {
        return;
    };
    let (want, want_inex) = Float::with_val_round(prec, &exact << top, rug_round(round));

    assert_eq!(z, want, "{a:?} {b:?} {c:?} {d:?} {op:?} {round:?}");
    assert_eq!(inex, want_inex, "{a:?} {b:?} {c:?} {d:?} {op:?} {round:?}");
});
