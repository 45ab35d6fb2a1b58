/*!
 * Limits
 * Compile-time capacity and timing constants shared across the crate
 */

use std::time::Duration;

/// Default ring capacity in slots (power of two; one slot always stays vacant,
/// so `DEFAULT_RING_CAPACITY - 1` elements fit). Sized generously to keep
/// wrap-boundary contention rare.
pub const DEFAULT_RING_CAPACITY: usize = 4096;

/// Cursor gap at or below which push/pop engage the wrap-boundary spin gate
pub const SPIN_GATE_WINDOW: u64 = 2;

/// Default bounded wait used by driver workers between operations
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(1);
