//! Concrete observer implementations.

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::observer::{SqrEvent, SqrObserver, SqrPath};

/// Observer that logs events through `tracing`.
pub struct LoggingObserver;

impl LoggingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl SqrObserver for LoggingObserver {
    fn on_event(&self, event: SqrEvent) {
        match event {
            SqrEvent::Path(path) => debug!(?path, "Squaring path selected"),
            SqrEvent::WorkingPrec(prec) => trace!(prec, "Karatsuba iteration"),
            SqrEvent::Boundary(boundary) => debug!(?boundary, "Real part hit range boundary"),
            SqrEvent::ImaginaryUnderflow => debug!("Imaginary product underflowed"),
        }
    }
}

/// Observer that keeps every event, in order.
pub struct RecordingObserver {
    events: Mutex<Vec<SqrEvent>>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<SqrEvent> {
        self.events.lock().clone()
    }

    /// The last path recorded, if any.
    #[must_use]
    pub fn path(&self) -> Option<SqrPath> {
        self.events.lock().iter().rev().find_map(|event| match event {
            SqrEvent::Path(path) => Some(*path),
            _ => None,
        })
    }

    /// Number of adaptive iterations recorded.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| matches!(event, SqrEvent::WorkingPrec(_)))
            .count()
    }

    /// Forget all recorded events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Default for RecordingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl SqrObserver for RecordingObserver {
    fn on_event(&self, event: SqrEvent) {
        self.events.lock().push(event);
    }
}

/// Observer that ignores every event.
pub struct NoOpObserver;

impl NoOpObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl SqrObserver for NoOpObserver {
    fn on_event(&self, _event: SqrEvent) {
        // Nothing to record.
    }
}
