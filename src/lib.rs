/*!
 * ringflow
 *
 * Bounded fixed-capacity FIFO queue for passing opaque handles between threads
 * under single- or multi-producer and single- or multi-consumer
 * configurations, plus a level-triggered wait/notify primitive coordinating
 * idle producers and consumers. A configurable driver wires the two together
 * for benchmarking: push success signals data-ready, pop success signals
 * slot-freed.
 */

pub mod core;
pub mod driver;
pub mod ring;
pub mod sync;
pub mod trace;

// Re-exports
pub use crate::core::errors::{RingError, RingResult};
pub use driver::{run, RunContext, RunReport, ScenarioConfig, WorkerId};
pub use ring::RingBuffer;
pub use sync::SyncObject;
pub use trace::init_tracing;
