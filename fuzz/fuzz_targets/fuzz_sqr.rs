#![no_main]

use libfuzzer_sys::fuzz_target;
use rug::Float;

use csqr_core::mpfr::MpfrComplex;
use csqr_core::{sqr, ComplexRound, Round};

const EXACT_PREC: u32 = 2048;

fn part(bytes: &[u8]) -> Float {
    // 1 byte precision, 1 byte exponent, 8 bytes mantissa
    let prec = u32::from(bytes[0] % 64) + 2;
    let exp = i32::from(bytes[1] as i8);
    let mant = i64::from_le_bytes(bytes[2..10].try_into().unwrap());
    let mut f = Float::with_val(prec, mant);
    f <<= exp;
    f
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 23 {
        return;
    }
    let x = part(&data[0..10]);
    let y = part(&data[10..20]);
    if x.is_zero() || y.is_zero() {
        return;
    }
    let prec_re = u32::from(data[20] % 128) + 2;
    let prec_im = u32::from(data[21] % 128) + 2;
    let round_re = Round::ALL[usize::from(data[22] % 5)];
    let round_im = Round::ALL[usize::from(data[22] / 5 % 5)];

    let mut exact_re = Float::with_val(EXACT_PREC, x.square_ref());
    exact_re -= Float::with_val(EXACT_PREC, y.square_ref());
    let mut exact_im = Float::with_val(EXACT_PREC, &x * &y);
    exact_im <<= 1;

    let op = MpfrComplex::from_parts(x, y);
    let mut rop = MpfrComplex::new(prec_re, prec_im);
    let (inex_re, inex_im) = sqr(&mut rop, &op, ComplexRound::new(round_re, round_im));

    // The flag orders the stored value against the exact one.
    assert_eq!(rop.re.partial_cmp(&exact_re), Some(inex_re), "{op:?} {round_re:?}");
    assert_eq!(rop.im.partial_cmp(&exact_im), Some(inex_im), "{op:?} {round_im:?}");
});
