/*!
 * Worker Loops
 *
 * Producer and consumer thread bodies. Each worker receives its identity
 * explicitly at spawn time, waits on the start gate so all threads begin
 * together, and polls the stop flag between operations. Producers signal the
 * data-ready object after each successful push; consumers signal the
 * slot-freed object after each successful pop.
 */

use super::config::ScenarioConfig;
use super::context::RunContext;
use rand::Rng;
use std::num::NonZeroUsize;
use std::thread;
use tracing::{debug, warn};

/// Worker identity, passed explicitly at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerId(pub u32);

/// Encode a (worker, sequence) pair into a non-zero token: worker id in the
/// high half, sequence plus one in the low half. The plus-one keeps the zero
/// sentinel unreachable for any sequence below `u32::MAX`.
#[inline]
pub fn encode_token(worker: WorkerId, seq: u32) -> NonZeroUsize {
    let raw = (((worker.0 as u64) << 32) | (seq as u64 + 1)) as usize;
    NonZeroUsize::new(raw).unwrap_or(NonZeroUsize::MIN)
}

/// Recover the (worker, sequence) pair from a token
#[inline]
pub fn decode_token(token: NonZeroUsize) -> (WorkerId, u32) {
    let raw = token.get() as u64;
    (WorkerId((raw >> 32) as u32), (raw as u32).wrapping_sub(1))
}

/// Producer body: push `messages_per_producer` tokens, skipping on Full
pub fn producer_loop(ctx: &RunContext, config: &ScenarioConfig, id: WorkerId) {
    ctx.start_gate.wait();

    let single = config.producers == 1;
    for seq in 0..config.messages_per_producer as u32 {
        if ctx.should_stop() {
            break;
        }

        let token = encode_token(id, seq);
        let pushed = if single {
            ctx.fifo.push_single_producer(token)
        } else {
            ctx.fifo.push_multi_producer(token)
        };

        match pushed {
            Ok(()) => ctx.data_ready.signal(),
            Err(err) => {
                debug!(producer = id.0, seq, %err, "skipping message");
                ctx.record_skip();
            }
        }

        if config.producer_waits_for_reader {
            ctx.slot_free.wait_timed(config.wait_timeout);
        }
        if config.producer_yields {
            thread::yield_now();
        }
    }
}

/// Consumer body: pop until the stop flag is raised
pub fn consumer_loop(ctx: &RunContext, config: &ScenarioConfig, id: WorkerId) {
    ctx.start_gate.wait();

    let single = config.consumers == 1;
    let mut rng = rand::thread_rng();
    loop {
        if ctx.should_stop() {
            break;
        }

        if config.consumer_waits_for_writer {
            ctx.data_ready.wait_timed(config.wait_timeout);
        }

        let popped = if single {
            ctx.fifo.pop_single_consumer()
        } else {
            ctx.fifo.pop_multi_consumer()
        };

        match popped {
            Ok(token) => {
                let (from, seq) = decode_token(token);
                debug!(consumer = id.0, producer = from.0, seq, "received message");
                ctx.slot_free.signal();

                if config.simulate_workload {
                    // Variable-length busy work standing in for real processing
                    let spins = rng.gen_range(0..0x10000);
                    for _ in 0..spins {
                        std::hint::spin_loop();
                    }
                }

                ctx.record_processed();
            }
            Err(err) if err.is_steady_state() => {
                debug!(consumer = id.0, %err, "skipping turn");
            }
            Err(err) => {
                // Invariant break inside the ring; the message is lost, so
                // account it as dropped rather than retrying
                warn!(consumer = id.0, %err, "dropping turn");
                ctx.slot_free.signal();
                ctx.record_skip();
            }
        }
    }
}
