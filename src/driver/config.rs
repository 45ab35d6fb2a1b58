/*!
 * Scenario Configuration
 *
 * Runtime configuration for a producer/consumer run. One binary covers every
 * scenario; the preset constructors mirror the classic benchmark
 * configurations (fast-as-possible MPMC, lock-step SPSC, simulated workload).
 */

use crate::core::limits::DEFAULT_WAIT_TIMEOUT;
use std::time::Duration;

/// Scenario configuration
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Number of producer threads
    pub producers: usize,
    /// Number of consumer threads
    pub consumers: usize,
    /// Messages each producer attempts to push
    pub messages_per_producer: usize,
    /// Producer blocks (bounded) on the slot-freed object after each iteration
    pub producer_waits_for_reader: bool,
    /// Consumer blocks (bounded) on the data-ready object before each pop
    pub consumer_waits_for_writer: bool,
    /// Producer yields the scheduler after each iteration
    pub producer_yields: bool,
    /// Consumer burns a random amount of CPU per message
    pub simulate_workload: bool,
    /// Bound for the workers' timed waits
    pub wait_timeout: Duration,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::mpmc_no_wait()
    }
}

impl ScenarioConfig {
    /// Multiple producers and consumers running as fast as possible
    pub const fn mpmc_no_wait() -> Self {
        Self {
            producers: 4,
            consumers: 8,
            messages_per_producer: 1000,
            producer_waits_for_reader: false,
            consumer_waits_for_writer: false,
            producer_yields: false,
            simulate_workload: false,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    /// Single producer, single consumer, non-blocking on both sides
    pub const fn spsc_no_wait() -> Self {
        Self {
            producers: 1,
            consumers: 1,
            messages_per_producer: 1000,
            producer_waits_for_reader: false,
            consumer_waits_for_writer: false,
            producer_yields: true,
            simulate_workload: false,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    /// Multiple producers and consumers pacing each other through the sync
    /// objects, with a simulated per-message workload
    pub const fn mpmc_waiting() -> Self {
        Self {
            producers: 4,
            consumers: 8,
            messages_per_producer: 1000,
            producer_waits_for_reader: true,
            consumer_waits_for_writer: true,
            producer_yields: true,
            simulate_workload: true,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    /// Single producer fanning out to multiple consumers under simulated load
    pub const fn spmc_workload() -> Self {
        Self {
            producers: 1,
            consumers: 8,
            messages_per_producer: 1000,
            producer_waits_for_reader: false,
            consumer_waits_for_writer: false,
            producer_yields: true,
            simulate_workload: true,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    /// Total messages the run accounts for
    #[inline]
    pub fn total_messages(&self) -> usize {
        self.producers * self.messages_per_producer
    }
}
