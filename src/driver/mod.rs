/*!
 * Benchmark Driver
 *
 * Owns thread lifecycle for a run: spawns producer/consumer workers around a
 * shared context, opens the start gate so all threads begin together, joins
 * everyone and reports processed/skipped counts with elapsed wall time.
 */

pub mod config;
pub mod context;
pub mod worker;

pub use config::ScenarioConfig;
pub use context::RunContext;
pub use worker::WorkerId;

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Outcome of a driver run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Messages successfully pushed and popped
    pub processed: u64,
    /// Messages dropped (push at capacity, or a ring anomaly)
    pub skipped: u64,
    /// Wall time from the start-gate broadcast to the last join
    pub elapsed: Duration,
}

impl RunReport {
    /// Mean wall time per processed message, if any were processed
    pub fn mean_per_message(&self) -> Option<Duration> {
        if self.processed == 0 {
            return None;
        }
        Some(self.elapsed / self.processed as u32)
    }
}

/// Run one scenario to completion and report the totals
///
/// Conservation: `processed + skipped == producers * messages_per_producer`.
pub fn run(config: &ScenarioConfig) -> RunReport {
    let total = config.total_messages();
    let ctx = Arc::new(RunContext::new(total));

    info!(
        producers = config.producers,
        consumers = config.consumers,
        messages = total,
        capacity = ctx.fifo.capacity(),
        "starting run"
    );

    let mut handles: Vec<JoinHandle<()>> =
        Vec::with_capacity(config.producers + config.consumers);
    let mut spawn_failed = false;

    for i in 0..config.producers {
        match spawn_worker(&ctx, config, WorkerId(i as u32 + 1), Role::Producer) {
            Ok(handle) => handles.push(handle),
            Err(err) => {
                error!(%err, "failed to spawn producer");
                spawn_failed = true;
                break;
            }
        }
    }
    if !spawn_failed {
        for i in 0..config.consumers {
            match spawn_worker(&ctx, config, WorkerId(i as u32 + 1), Role::Consumer) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    error!(%err, "failed to spawn consumer");
                    spawn_failed = true;
                    break;
                }
            }
        }
    }

    if spawn_failed {
        // Wind down whatever did start; the gate broadcast below releases them
        ctx.request_stop();
    }

    // Open the start gate; workers begin together
    ctx.start_gate.broadcast();
    let started = Instant::now();

    for handle in handles {
        if handle.join().is_err() {
            error!("worker thread panicked");
        }
    }
    let elapsed = started.elapsed();

    ctx.data_ready.shutdown();
    ctx.slot_free.shutdown();
    ctx.start_gate.shutdown();

    RunReport {
        processed: ctx.processed(),
        skipped: ctx.skipped(),
        elapsed,
    }
}

enum Role {
    Producer,
    Consumer,
}

fn spawn_worker(
    ctx: &Arc<RunContext>,
    config: &ScenarioConfig,
    id: WorkerId,
    role: Role,
) -> std::io::Result<JoinHandle<()>> {
    let ctx = Arc::clone(ctx);
    let config = config.clone();
    let name = match role {
        Role::Producer => format!("producer-{}", id.0),
        Role::Consumer => format!("consumer-{}", id.0),
    };
    thread::Builder::new().name(name).spawn(move || match role {
        Role::Producer => worker::producer_loop(&ctx, &config, id),
        Role::Consumer => worker::consumer_loop(&ctx, &config, id),
    })
}
