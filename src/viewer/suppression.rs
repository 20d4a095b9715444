//! Scroll suppression flag shared between the modal lifecycle and the
//! sticky controller.

use std::cell::Cell;
use std::rc::Rc;

/// The writer half. There is exactly one per gallery; it is not `Clone`.
#[derive(Debug, Default)]
pub struct ScrollSuppression {
    flag: Rc<Cell<bool>>,
}

/// A read-only view of the suppression flag.
#[derive(Debug, Clone)]
pub struct SuppressionReader {
    flag: Rc<Cell<bool>>,
}

impl ScrollSuppression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag. Returns `true` if the value changed.
    pub fn set(&self, suppressed: bool) -> bool {
        self.flag.replace(suppressed) != suppressed
    }

    pub fn is_suppressed(&self) -> bool {
        self.flag.get()
    }

    pub fn reader(&self) -> SuppressionReader {
        SuppressionReader {
            flag: Rc::clone(&self.flag),
        }
    }
}

impl SuppressionReader {
    pub fn is_suppressed(&self) -> bool {
        self.flag.get()
    }
}
