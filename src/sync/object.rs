/*!
 * Sync Object
 *
 * Level-triggered wait/notify primitive coordinating idle producers and
 * consumers so they sleep instead of busy-polling. A `signal` wakes at least
 * one waiter and is consumed by the first thread through; a `broadcast` is
 * sticky and leaves the signaled state set for every later waiter. `shutdown`
 * is terminal: it forces the signaled state permanently true and releases all
 * current and future waiters.
 */

use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Signal state; `stop` implies `signaled`
#[derive(Debug, Clone, Copy)]
struct SignalState {
    signaled: bool,
    broadcasted: bool,
    stop: bool,
}

/// Wait/notify primitive with broadcast, single-consumption, timeout and
/// shutdown semantics
///
/// State machine: Idle → Signaled via [`signal`](Self::signal); Idle/Signaled →
/// Broadcasted via [`broadcast`](Self::broadcast); Signaled → Idle performed by
/// the waking thread itself on a non-broadcast wake; any state → Stopped
/// (terminal) via [`shutdown`](Self::shutdown).
pub struct SyncObject {
    state: Mutex<SignalState>,
    condvar: Condvar,
    waiters: AtomicUsize,
}

impl SyncObject {
    /// Create with an explicit initial signaled state
    pub fn new(initially_signaled: bool) -> Self {
        Self {
            state: Mutex::new(SignalState {
                signaled: initially_signaled,
                broadcasted: false,
                stop: false,
            }),
            condvar: Condvar::new(),
            waiters: AtomicUsize::new(0),
        }
    }

    /// Set the signaled state and wake at least one blocked waiter
    ///
    /// The wake is single-consumption: the first waiter through resets the
    /// state, and the next waiter blocks again unless re-signaled.
    pub fn signal(&self) {
        {
            let mut state = self.state.lock();
            state.signaled = true;
            state.broadcasted = false;
        }
        self.condvar.notify_one();
    }

    /// Set the signaled state and wake all blocked waiters
    ///
    /// Sticky: the signaled state stays set for late-arriving waiters until a
    /// later `signal` is consumed.
    pub fn broadcast(&self) {
        {
            let mut state = self.state.lock();
            state.signaled = true;
            state.broadcasted = true;
        }
        self.condvar.notify_all();
    }

    /// Block until the signaled state is set
    ///
    /// Loops against spurious wakeups. On a non-broadcast wake the waiter
    /// resets the signaled state to the current stop flag, so the signal is
    /// consumed unless `stop` is permanently true.
    pub fn wait(&self) {
        self.waiters.fetch_add(1, Ordering::Relaxed);
        let mut state = self.state.lock();
        while !state.signaled {
            self.condvar.wait(&mut state);
        }
        if !state.broadcasted {
            // Reset the signal so other waiters can sleep
            state.signaled = state.stop;
        }
        drop(state);
        self.waiters.fetch_sub(1, Ordering::Relaxed);
    }

    /// Block until the signaled state is set or the timeout elapses
    ///
    /// The timeout is measured against a monotonic clock. Deliberately does not
    /// distinguish timeout from signal; the caller re-inspects shared state.
    pub fn wait_timed(&self, timeout: Duration) {
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => return self.wait(),
        };

        self.waiters.fetch_add(1, Ordering::Relaxed);
        let mut state = self.state.lock();
        while !state.signaled {
            if self.condvar.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }
        if !state.broadcasted {
            state.signaled = state.stop;
        }
        drop(state);
        self.waiters.fetch_sub(1, Ordering::Relaxed);
    }

    /// Force the stopped state and release all current and future waiters
    ///
    /// Irreversible: after this call `wait` never blocks again.
    pub fn shutdown(&self) {
        {
            let mut state = self.state.lock();
            state.signaled = true;
            state.broadcasted = true;
            state.stop = true;
        }
        self.condvar.notify_all();
    }

    /// Whether `shutdown` has been called
    pub fn is_stopped(&self) -> bool {
        self.state.lock().stop
    }

    /// Approximate count of blocked waiters (for diagnostics)
    #[inline]
    pub fn waiter_count(&self) -> usize {
        self.waiters.load(Ordering::Relaxed)
    }
}

impl Drop for SyncObject {
    fn drop(&mut self) {
        self.shutdown();
    }
}
