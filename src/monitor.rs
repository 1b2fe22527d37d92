//! A one-shot, resettable, level-triggered wakeup flag.
//!
//! `Monitor` layers a level-triggered "signaled" flag over a
//! [`Condvar`](std::sync::Condvar) so that a waiter's `reset` → `wait` and a
//! signaler's `signal` can never race into a lost wakeup, as long as the
//! caller resets under the same outer lock it will wait behind (see
//! [`BoundedStringQueue`](crate::queue::BoundedStringQueue) for the dance).

use std::sync::{Condvar, Mutex};

/// A resettable, level-triggered condition.
///
/// Unlike a plain [`Condvar`], `Monitor` remembers that it was signaled even
/// if nobody was waiting at the time: `wait` returns immediately if
/// `signaled` is already `true`. `reset` clears that memory. Both must be
/// called while the caller holds whatever outer lock protects the real
/// predicate, or signals can still be missed.
#[derive(Debug)]
pub struct Monitor {
    signaled: Mutex<bool>,
    condition: Condvar,
}

impl Monitor {
    /// Creates a monitor in the not-signaled state.
    pub fn new() -> Self {
        Self {
            signaled: Mutex::new(false),
            condition: Condvar::new(),
        }
    }

    /// Sets `signaled = true` and wakes one waiter. Idempotent.
    pub fn signal(&self) {
        let mut signaled = self.signaled.lock().unwrap_or_else(|e| e.into_inner());
        *signaled = true;
        self.condition.notify_one();
    }

    /// Sets `signaled = false`.
    ///
    /// Call this only while holding the outer lock that guards the real
    /// predicate, immediately before dropping it to call [`Monitor::wait`] —
    /// otherwise a signal delivered between `reset` and `wait` is lost.
    pub fn reset(&self) {
        let mut signaled = self.signaled.lock().unwrap_or_else(|e| e.into_inner());
        *signaled = false;
    }

    /// Blocks until `signaled` is `true`, re-checking on every spurious
    /// wakeup.
    pub fn wait(&self) {
        let guard = self.signaled.lock().unwrap_or_else(|e| e.into_inner());
        let _guard = self
            .condition
            .wait_while(guard, |signaled| !*signaled)
            .unwrap_or_else(|e| e.into_inner());
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}
