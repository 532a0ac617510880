//! # csqr-core
//!
//! Correctly-rounded squaring of arbitrary-precision complex numbers.
//! Generic over the [`Real`] backend; the MPFR one lives in
//! the `mpfr` module (feature `mpfr`, on by default).

pub mod complex;
pub mod constants;
pub mod error;
pub mod fmma;
pub mod observer;
pub mod observers;
pub mod options;
pub mod real;
pub mod round;
pub mod sqr;
pub mod ziv;

#[cfg(feature = "mpfr")]
pub mod mpfr;

// Re-exports
pub use complex::Complex;
pub use constants::{DEFAULT_GUARD_BITS, DEFAULT_PREC_PAD, MIN_GUARD_BITS};
pub use error::SqrError;
pub use fmma::{fmma, FmmaOp};
pub use observer::{Boundary, SqrEvent, SqrObserver, SqrPath};
pub use observers::{LoggingObserver, NoOpObserver, RecordingObserver};
pub use options::SqrOptions;
pub use real::{Exp, Prec, Real};
pub use round::{ComplexInexact, ComplexRound, Inexact, Round};
pub use sqr::{sqr, sqr_with};
pub use ziv::ProductSign;
