//! The per-class static-init guard (`SII` flag + `SI()` routine).
//!
//! The flag is set before the initializers run. A re-entrant call, direct or
//! through a circular dependency between classes, sees the flag and returns
//! at once. This terminates, but a class reached through such a cycle may be
//! observed before its initializers have finished.

use std::cell::Cell;

#[derive(Debug, Default)]
pub struct StaticInitGuard {
    initialized: Cell<bool>,
}

impl StaticInitGuard {
    pub const fn new() -> Self {
        StaticInitGuard {
            initialized: Cell::new(false),
        }
    }

    /// Run `init` unless this guard has been entered before.
    ///
    /// Returns whether `init` ran.
    pub fn ensure(&self, init: impl FnOnce()) -> bool {
        if self.initialized.get() {
            return false;
        }
        self.initialized.set(true);
        init();
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }
}
