//! Observer pattern for tracing how a square was computed.
//!
//! The squaring routines report which path they took and how far the
//! adaptive loop had to raise its precision. Observers are passed by
//! reference and must not influence the result.

use crate::real::Prec;

/// Path taken for one squaring call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqrPath {
    /// NaN or infinite input.
    Special,
    /// Imaginary part was zero.
    RealAxis,
    /// Real part was zero.
    ImaginaryAxis,
    /// Real part computed as `x*x - y*y` with the fused primitive.
    Fused,
    /// Real part computed as `(x+y)*(x-y)` with escalating precision.
    Karatsuba,
}

/// Range boundary hit while computing the real part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    Overflow,
    Underflow,
}

/// Event emitted during a squaring call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqrEvent {
    /// The path was selected.
    Path(SqrPath),
    /// An adaptive iteration started at this working precision.
    WorkingPrec(Prec),
    /// The adaptive product reached a range boundary.
    Boundary(Boundary),
    /// `x*y` could fall under the smallest magnitude, so `2xy` was formed
    /// with the fused primitive instead of by doubling.
    ImaginaryUnderflow,
}

/// Observer trait for receiving squaring events.
pub trait SqrObserver {
    /// Receive an event.
    fn on_event(&self, event: SqrEvent);
}

impl<T: SqrObserver + ?Sized> SqrObserver for &T {
    fn on_event(&self, event: SqrEvent) {
        (**self).on_event(event);
    }
}
