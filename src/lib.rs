//! Helpers shared by the workspace-level golden tests.

use rug::float::Special;
use rug::Float;
use serde::{Deserialize, Serialize};

/// Coarse classification of an MPFR value, as written in golden files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueClass {
    Nan,
    PosInf,
    NegInf,
    PosZero,
    NegZero,
    /// Finite, non-zero, positive.
    Pos,
    /// Finite, non-zero, negative.
    Neg,
}

impl ValueClass {
    /// Magnitude used for [`ValueClass::Pos`] and [`ValueClass::Neg`] samples.
    pub const SAMPLE_MAGNITUDE: f64 = 1.5;

    /// Classify `value`.
    #[must_use]
    pub fn of(value: &Float) -> Self {
        if value.is_nan() {
            ValueClass::Nan
        } else if value.is_infinite() {
            if value.is_sign_negative() {
                ValueClass::NegInf
            } else {
                ValueClass::PosInf
            }
        } else if value.is_zero() {
            if value.is_sign_negative() {
                ValueClass::NegZero
            } else {
                ValueClass::PosZero
            }
        } else if value.is_sign_negative() {
            ValueClass::Neg
        } else {
            ValueClass::Pos
        }
    }

    /// A representative value of this class.
    #[must_use]
    pub fn sample(self, prec: u32) -> Float {
        match self {
            ValueClass::Nan => Float::with_val(prec, Special::Nan),
            ValueClass::PosInf => Float::with_val(prec, Special::Infinity),
            ValueClass::NegInf => Float::with_val(prec, Special::NegInfinity),
            ValueClass::PosZero => Float::with_val(prec, Special::Zero),
            ValueClass::NegZero => Float::with_val(prec, Special::NegZero),
            ValueClass::Pos => Float::with_val(prec, Self::SAMPLE_MAGNITUDE),
            ValueClass::Neg => Float::with_val(prec, -Self::SAMPLE_MAGNITUDE),
        }
    }
}

/// One row of `special_values.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialCase {
    pub re: ValueClass,
    pub im: ValueClass,
    pub square_re: ValueClass,
    pub square_im: ValueClass,
}

/// Contents of `special_values.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialTable {
    pub description: String,
    pub values: Vec<SpecialCase>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_classifies_as_itself() {
        for class in [
            ValueClass::Nan,
            ValueClass::PosInf,
            ValueClass::NegInf,
            ValueClass::PosZero,
            ValueClass::NegZero,
            ValueClass::Pos,
            ValueClass::Neg,
        ] {
            assert_eq!(ValueClass::of(&class.sample(53)), class);
        }
    }

    #[test]
    fn class_names_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&ValueClass::NegZero).unwrap(),
            "\"neg_zero\""
        );
        let class: ValueClass = serde_json::from_str("\"pos_inf\"").unwrap();
        assert_eq!(class, ValueClass::PosInf);
    }
}
