/*!
 * Run Context
 *
 * Shared state bundling one ring, the three sync objects and the run
 * counters. Every message a producer attempts is accounted exactly once:
 * either skipped at push time or processed after a successful pop. When the
 * remaining count reaches zero the context raises the stop flag and broadcasts
 * both data/slot objects so no worker is left blocked.
 */

use crate::core::limits::DEFAULT_RING_CAPACITY;
use crate::ring::RingBuffer;
use crate::sync::SyncObject;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};

/// Shared worker context for one run
pub struct RunContext {
    /// The queue under measurement
    pub fifo: RingBuffer<DEFAULT_RING_CAPACITY>,
    /// Signaled by producers after each successful push
    pub data_ready: SyncObject,
    /// Signaled by consumers after each successful pop
    pub slot_free: SyncObject,
    /// Opened by the driver once all workers are spawned
    pub start_gate: SyncObject,
    /// Messages not yet accounted for
    remaining: AtomicI64,
    /// Messages successfully pushed and popped
    processed: AtomicU64,
    /// Messages dropped at push time (buffer full or anomaly)
    skipped: AtomicU64,
    /// Cooperative shutdown flag polled by worker loops
    stop: AtomicBool,
}

impl RunContext {
    /// Create a context expecting `total_messages` to be accounted for
    pub fn new(total_messages: usize) -> Self {
        Self {
            fifo: RingBuffer::new(),
            data_ready: SyncObject::new(false),
            slot_free: SyncObject::new(false),
            start_gate: SyncObject::new(false),
            remaining: AtomicI64::new(total_messages as i64),
            processed: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
            // An empty run has nothing to account, so no worker would ever
            // raise the stop flag; start stopped instead
            stop: AtomicBool::new(total_messages == 0),
        }
    }

    /// Whether workers should wind down
    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Raise the stop flag and release any blocked worker
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
        self.data_ready.broadcast();
        self.slot_free.broadcast();
    }

    /// Account one delivered message; the last accounted message ends the run
    pub fn record_processed(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
        self.account_message();
    }

    /// Account one message as dropped instead of delivered
    pub fn record_skip(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
        self.account_message();
    }

    fn account_message(&self) {
        if self.remaining.fetch_sub(1, Ordering::AcqRel) <= 1 {
            self.request_stop();
        }
    }

    /// Messages delivered so far
    #[inline]
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    /// Messages dropped so far
    #[inline]
    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    /// Messages not yet accounted for (may go negative transiently under races)
    #[inline]
    pub fn remaining(&self) -> i64 {
        self.remaining.load(Ordering::Relaxed)
    }
}
