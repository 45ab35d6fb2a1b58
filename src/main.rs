/*!
 * ringflow - Demo/Benchmark Driver
 *
 * Runs one producer/consumer scenario over the bounded ring and reports
 * processed/skipped counts and throughput.
 *
 * Environment variables:
 * - RINGFLOW_SCENARIO: preset name (mpmc, spsc, mpmc-wait, spmc-workload)
 * - RINGFLOW_PRODUCERS / RINGFLOW_CONSUMERS / RINGFLOW_MESSAGES: overrides
 * - RUST_LOG: log filtering (default: info)
 */

use ringflow::{init_tracing, run, ScenarioConfig};
use tracing::{info, warn};

fn main() {
    init_tracing();

    let config = scenario_from_env();
    let report = run(&config);

    info!(
        processed = report.processed,
        skipped = report.skipped,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "run complete"
    );
    match report.mean_per_message() {
        Some(mean) => info!(mean_us = mean.as_micros() as u64, "mean time per message"),
        None => warn!("no messages were processed"),
    }
}

fn scenario_from_env() -> ScenarioConfig {
    let mut config = match std::env::var("RINGFLOW_SCENARIO").as_deref() {
        Ok("spsc") => ScenarioConfig::spsc_no_wait(),
        Ok("mpmc-wait") => ScenarioConfig::mpmc_waiting(),
        Ok("spmc-workload") => ScenarioConfig::spmc_workload(),
        _ => ScenarioConfig::mpmc_no_wait(),
    };

    if let Some(n) = env_usize("RINGFLOW_PRODUCERS") {
        config.producers = n.max(1);
    }
    if let Some(n) = env_usize("RINGFLOW_CONSUMERS") {
        config.consumers = n.max(1);
    }
    if let Some(n) = env_usize("RINGFLOW_MESSAGES") {
        config.messages_per_producer = n;
    }

    config
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
