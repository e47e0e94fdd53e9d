use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ConsoleError;

/// Per-action "request outstanding" flag.
///
/// [`InFlight::begin`] hands out a guard that clears the flag when dropped, so
/// the flag is reset on success, on error, and on early return alike.
#[derive(Debug)]
pub struct InFlight {
    action: &'static str,
    busy: AtomicBool,
}

impl InFlight {
    pub const fn new(action: &'static str) -> Self {
        Self {
            action,
            busy: AtomicBool::new(false),
        }
    }

    /// Claim the flag, or fail with [`ConsoleError::Busy`] while a previous
    /// request for the same action is still pending.
    pub fn begin(&self) -> Result<InFlightGuard<'_>, ConsoleError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlightGuard { flag: &self.busy })
            .map_err(|_| ConsoleError::Busy { action: self.action })
    }

    pub fn is_active(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

#[must_use = "the flag is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
