/*!
 * Error Types
 * Steady-state ring outcomes and invariant violations
 */

use thiserror::Error;

/// Result type for ring operations
pub type RingResult<T> = Result<T, RingError>;

/// Ring operation errors
///
/// `Full` and `Empty` are ordinary, frequent outcomes of the non-blocking
/// push/pop probes; callers retry, wait on a [`SyncObject`](crate::SyncObject),
/// or drop the item. `Anomaly` is an invariant break and must be surfaced as a
/// dropped item, never silently retried.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    #[error("ring buffer full")]
    Full,

    #[error("ring buffer empty")]
    Empty,

    #[error("claimed slot held the empty sentinel")]
    Anomaly,
}

impl RingError {
    /// Steady-state outcomes are part of normal operation; only `Anomaly`
    /// indicates internal desynchronization.
    #[inline(always)]
    pub fn is_steady_state(&self) -> bool {
        matches!(self, RingError::Full | RingError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_state_classification() {
        assert!(RingError::Full.is_steady_state());
        assert!(RingError::Empty.is_steady_state());
        assert!(!RingError::Anomaly.is_steady_state());
    }
}
