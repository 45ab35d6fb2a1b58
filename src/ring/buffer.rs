/*!
 * Bounded MPMC Ring Buffer
 *
 * Fixed-capacity circular slot array with atomic 64-bit cursors. Slots are
 * claimed with fetch-and-add; a narrow spin gate on the `writing`/`reading`
 * flags keeps a producer and a consumer from mutating the same slot near the
 * wrap boundary. One slot is always kept vacant to disambiguate full from
 * empty.
 *
 * # Design: Fetch-And-Add Plus Spin Gate Over CAS Loops
 *
 * A full compare-and-swap lock-free design is deliberately avoided. The
 * fetch-and-add claim plus a bounded busy-wait is easier to reason about, and
 * the capacity is sized generously so boundary contention stays rare. The
 * trade-off: the gate has a window between the cursor snapshot and the flag
 * store, so a claimed slot can in rare cases turn out vacant on pop. That case
 * is reported as `Anomaly` and treated by callers as a dropped item.
 *
 * # Thread Safety
 *
 * The `*_single_*` entry points rely on the caller guaranteeing exactly one
 * thread per role; the `*_multi_*` entry points serialize their role through a
 * mutex. The two roles never share a lock.
 */

use crate::core::errors::{RingError, RingResult};
use crate::core::limits::SPIN_GATE_WINDOW;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

/// Bounded FIFO queue of opaque pointer-sized handles
///
/// `N` must be a power of two (checked at compile time); usable capacity is
/// `N - 1`. The zero value is the reserved empty sentinel, which the
/// `NonZeroUsize` payload type makes unrepresentable.
#[repr(C, align(64))] // Cache-line aligned to prevent false sharing
pub struct RingBuffer<const N: usize> {
    /// Slot array; a zero slot is vacant
    slots: Box<[AtomicUsize; N]>,
    /// Monotonically increasing; wrapped only via `& MASK` at slot access
    write_cursor: AtomicU64,
    read_cursor: AtomicU64,
    /// A producer is mutating a slot near the wrap boundary
    writing: AtomicBool,
    /// A consumer is mutating a slot near the wrap boundary
    reading: AtomicBool,
    /// Serializes the multi-producer path
    write_lock: Mutex<()>,
    /// Serializes the multi-consumer path
    read_lock: Mutex<()>,
}

impl<const N: usize> RingBuffer<N> {
    const MASK: u64 = {
        assert!(N.is_power_of_two(), "ring capacity must be a power of two");
        assert!(N >= 2, "ring capacity must hold at least one element");
        (N as u64) - 1
    };

    /// Create a ring with all slots vacant and both cursors at zero
    pub fn new() -> Self {
        Self {
            slots: Box::new([const { AtomicUsize::new(0) }; N]),
            write_cursor: AtomicU64::new(0),
            read_cursor: AtomicU64::new(0),
            writing: AtomicBool::new(false),
            reading: AtomicBool::new(false),
            write_lock: Mutex::new(()),
            read_lock: Mutex::new(()),
        }
    }

    /// Push from the sole producer thread
    ///
    /// Non-blocking probe: `Full` is an ordinary outcome. On success, ownership
    /// of the handle transfers into the buffer.
    ///
    /// # Thread Safety
    ///
    /// The caller must guarantee no other thread pushes concurrently; with
    /// several producers use [`push_multi_producer`](Self::push_multi_producer).
    pub fn push_single_producer(&self, handle: NonZeroUsize) -> RingResult<()> {
        let snap_write = self.write_cursor.load(Ordering::Acquire);
        let snap_read = self.read_cursor.load(Ordering::Acquire);

        // Full: one slot stays vacant
        if (snap_read & Self::MASK) == (snap_write.wrapping_add(1) & Self::MASK) {
            return Err(RingError::Full);
        }

        // Close to the reader or straddling the wrap boundary: a consumer may
        // still be draining the slot about to be claimed
        if snap_write.wrapping_sub(snap_read) <= SPIN_GATE_WINDOW || snap_write < snap_read {
            while self.reading.load(Ordering::Acquire) {
                std::hint::spin_loop();
            }
        }

        self.writing.store(true, Ordering::SeqCst);
        let claimed = self.write_cursor.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
        self.slots[(claimed & Self::MASK) as usize].store(handle.get(), Ordering::Release);
        self.writing.store(false, Ordering::Release);

        Ok(())
    }

    /// Push with mutual exclusion between producer threads
    ///
    /// Required whenever more than one thread may push concurrently.
    pub fn push_multi_producer(&self, handle: NonZeroUsize) -> RingResult<()> {
        let _guard = self.write_lock.lock();
        self.push_single_producer(handle)
    }

    /// Pop from the sole consumer thread
    ///
    /// Non-blocking probe: `Empty` is an ordinary outcome. On success,
    /// ownership of the handle transfers to the caller and the slot is reset to
    /// the empty sentinel. A vacant slot despite a successful cursor claim is
    /// reported as `Anomaly`.
    ///
    /// # Thread Safety
    ///
    /// The caller must guarantee no other thread pops concurrently; with
    /// several consumers use [`pop_multi_consumer`](Self::pop_multi_consumer).
    pub fn pop_single_consumer(&self) -> RingResult<NonZeroUsize> {
        let snap_write = self.write_cursor.load(Ordering::Acquire);
        let snap_read = self.read_cursor.load(Ordering::Acquire);

        if (snap_read & Self::MASK) == (snap_write & Self::MASK) {
            return Err(RingError::Empty);
        }

        // Close to the writer or straddling the wrap boundary: a producer may
        // still be filling the slot about to be claimed
        if snap_write.wrapping_sub(snap_read) <= SPIN_GATE_WINDOW || snap_write < snap_read {
            while self.writing.load(Ordering::Acquire) {
                std::hint::spin_loop();
            }
        }

        self.reading.store(true, Ordering::SeqCst);
        let claimed = self.read_cursor.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
        let raw = self.slots[(claimed & Self::MASK) as usize].swap(0, Ordering::AcqRel);
        self.reading.store(false, Ordering::Release);

        NonZeroUsize::new(raw).ok_or(RingError::Anomaly)
    }

    /// Pop with mutual exclusion between consumer threads
    ///
    /// Required whenever more than one thread may pop concurrently.
    pub fn pop_multi_consumer(&self) -> RingResult<NonZeroUsize> {
        let _guard = self.read_lock.lock();
        self.pop_single_consumer()
    }

    /// Number of elements currently held (approximate under concurrency)
    #[inline]
    pub fn len(&self) -> usize {
        let write = self.write_cursor.load(Ordering::Acquire);
        let read = self.read_cursor.load(Ordering::Acquire);
        write.saturating_sub(read) as usize
    }

    /// Check whether the buffer holds no elements (approximate under concurrency)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total slot count; usable capacity is one less
    #[inline]
    pub fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
