//! Rounding modes and per-component rounding directives.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Rounding mode applied by a single correctly-rounded operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Round {
    /// Round to nearest, ties to even.
    #[default]
    Nearest,
    /// Round toward zero.
    Zero,
    /// Round toward plus infinity.
    Up,
    /// Round toward minus infinity.
    Down,
    /// Round away from zero.
    AwayZero,
}

impl Round {
    /// All modes, in declaration order.
    pub const ALL: [Round; 5] = [
        Round::Nearest,
        Round::Zero,
        Round::Up,
        Round::Down,
        Round::AwayZero,
    ];

    /// The mode that rounds `-x` the way `self` rounds `x`.
    ///
    /// Swaps `Up` and `Down`; every other mode is symmetric.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Round::Up => Round::Down,
            Round::Down => Round::Up,
            other => other,
        }
    }

    /// Whether a value with the given sign moves toward zero under this mode.
    ///
    /// `Nearest` is neither toward nor away and returns `false` here as well as
    /// from [`Round::is_away_from_zero`].
    #[must_use]
    pub const fn is_toward_zero(self, negative: bool) -> bool {
        matches!(
            (self, negative),
            (Round::Zero, _) | (Round::Down, false) | (Round::Up, true)
        )
    }

    /// Whether a value with the given sign moves away from zero under this mode.
    #[must_use]
    pub const fn is_away_from_zero(self, negative: bool) -> bool {
        matches!(
            (self, negative),
            (Round::AwayZero, _) | (Round::Up, false) | (Round::Down, true)
        )
    }
}

/// Rounding modes for the real and imaginary parts of a complex result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ComplexRound {
    /// Mode for the real part.
    pub re: Round,
    /// Mode for the imaginary part.
    pub im: Round,
}

impl ComplexRound {
    #[must_use]
    pub const fn new(re: Round, im: Round) -> Self {
        Self { re, im }
    }
}

impl From<Round> for ComplexRound {
    fn from(round: Round) -> Self {
        Self::new(round, round)
    }
}

impl From<(Round, Round)> for ComplexRound {
    fn from((re, im): (Round, Round)) -> Self {
        Self::new(re, im)
    }
}

/// Inexactness flag of one rounded component.
///
/// `Less` means the stored value is below the exact one, `Greater` above,
/// `Equal` exact.
pub type Inexact = Ordering;

/// Flags of the real and imaginary parts.
pub type ComplexInexact = (Inexact, Inexact);

/// The flag describing a value that was rounded to a smaller magnitude.
#[must_use]
pub(crate) const fn toward_zero_flag(negative: bool) -> Inexact {
    if negative {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_swaps_directed_modes() {
        assert_eq!(Round::Up.reverse(), Round::Down);
        assert_eq!(Round::Down.reverse(), Round::Up);
        assert_eq!(Round::Nearest.reverse(), Round::Nearest);
        assert_eq!(Round::Zero.reverse(), Round::Zero);
        assert_eq!(Round::AwayZero.reverse(), Round::AwayZero);
    }

    #[test]
    fn reverse_is_involution() {
        for round in Round::ALL {
            assert_eq!(round.reverse().reverse(), round);
        }
    }

    #[test]
    fn magnitude_direction() {
        assert!(Round::Zero.is_toward_zero(false));
        assert!(Round::Zero.is_toward_zero(true));
        assert!(Round::Down.is_toward_zero(false));
        assert!(Round::Up.is_toward_zero(true));
        assert!(Round::Up.is_away_from_zero(false));
        assert!(Round::Down.is_away_from_zero(true));
        assert!(Round::AwayZero.is_away_from_zero(true));
        assert!(!Round::Nearest.is_toward_zero(false));
        assert!(!Round::Nearest.is_away_from_zero(false));
    }

    #[test]
    fn directed_modes_are_exactly_one_direction() {
        for round in [Round::Zero, Round::Up, Round::Down, Round::AwayZero] {
            for negative in [false, true] {
                assert_ne!(
                    round.is_toward_zero(negative),
                    round.is_away_from_zero(negative)
                );
            }
        }
    }

    #[test]
    fn complex_round_conversions() {
        assert_eq!(
            ComplexRound::from(Round::Up),
            ComplexRound::new(Round::Up, Round::Up)
        );
        assert_eq!(
            ComplexRound::from((Round::Zero, Round::Down)),
            ComplexRound::new(Round::Zero, Round::Down)
        );
        assert_eq!(ComplexRound::default().re, Round::Nearest);
    }

    #[test]
    fn toward_zero_flag_sign() {
        assert_eq!(toward_zero_flag(false), Ordering::Less);
        assert_eq!(toward_zero_flag(true), Ordering::Greater);
    }

    #[test]
    fn round_serde_roundtrip() {
        let json = serde_json::to_string(&ComplexRound::new(Round::AwayZero, Round::Up)).unwrap();
        let back: ComplexRound = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ComplexRound::new(Round::AwayZero, Round::Up));
    }
}
