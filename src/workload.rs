//! Workload Driver
//!
//! Fans a run out to one thread per client and aggregates their results.
//!
//! ## Concurrency Model: one OS thread per client
//!
//! - Every client gets its own thread, connection and RNG
//! - The config is borrowed read-only by all threads (crossbeam scope)
//! - Results come back through `join`, so nothing is shared or locked

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::client::{run_worker, WorkerResult};
use crate::config::{Mode, RunConfig};

/// Share of MIXED operations issued as SETs
pub const MIXED_SET_PERCENT: usize = 80;

/// How many SETs and GETs one client issues, SETs first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpPlan {
    pub sets: usize,
    pub gets: usize,
}

impl OpPlan {
    pub fn for_mode(mode: Mode, op_count: usize) -> Self {
        match mode {
            Mode::Set => Self { sets: op_count, gets: 0 },
            Mode::Get => Self { sets: 0, gets: op_count },
            Mode::Mixed => {
                // floor(op_count * 0.8) without going through floats
                let sets = op_count / 100 * MIXED_SET_PERCENT
                    + op_count % 100 * MIXED_SET_PERCENT / 100;
                Self {
                    sets,
                    gets: op_count - sets,
                }
            }
        }
    }

    pub fn total(&self) -> usize {
        self.sets + self.gets
    }
}

/// Totals for a whole run
#[derive(Debug, Clone)]
pub struct AggregateResult {
    /// Mode the run used
    pub mode: Mode,

    /// Operations planned across all clients
    pub total_ops: u64,

    /// Sum of completed operations
    pub completed: u64,

    /// Sum of errors
    pub errors: u64,

    /// Wall-clock time from dispatch to the last join
    pub elapsed: Duration,
}

impl AggregateResult {
    /// Sum per-client results for `config`
    pub fn from_workers(config: &RunConfig, results: &[WorkerResult], elapsed: Duration) -> Self {
        let totals: WorkerResult = results.iter().copied().sum();
        Self {
            mode: config.mode,
            total_ops: config.total_ops(),
            completed: totals.completed,
            errors: totals.errors,
            elapsed,
        }
    }

    /// Completed operations per second, 0 when no time elapsed
    pub fn ops_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.completed as f64 / secs
        } else {
            0.0
        }
    }
}

/// Run every client in parallel and block until all of them finish
///
/// A client thread that panics or cannot be spawned is counted as `(0, 1)`.
pub fn run(config: &RunConfig) -> AggregateResult {
    tracing::info!(
        "Dispatching {} clients x {} ops ({}) against {}",
        config.clients,
        config.ops_per_client,
        config.mode,
        config.server_addr()
    );

    let start = Instant::now();
    let results = run_clients(config);
    let elapsed = start.elapsed();

    let aggregate = AggregateResult::from_workers(config, &results, elapsed);
    tracing::info!(
        completed = aggregate.completed,
        errors = aggregate.errors,
        "Run finished in {:.3}s",
        elapsed.as_secs_f64()
    );
    aggregate
}

fn run_clients(config: &RunConfig) -> Vec<WorkerResult> {
    let joined = crossbeam::thread::scope(|scope| {
        // Spawn everything before joining anything
        let handles: Vec<_> = (0..config.clients)
            .map(|id| {
                scope
                    .builder()
                    .name(format!("client-{}", id))
                    .spawn(move |_| {
                        let mut rng = StdRng::from_rng(&mut rand::rng());
                        run_worker(id, config.ops_per_client, config, &mut rng)
                    })
            })
            .collect();

        handles
            .into_iter()
            .enumerate()
            .map(|(id, handle)| match handle {
                Ok(handle) => handle.join().unwrap_or_else(|_| {
                    tracing::warn!(client = id, "client thread panicked");
                    WorkerResult::failed()
                }),
                Err(e) => {
                    tracing::warn!(client = id, "failed to spawn client thread: {}", e);
                    WorkerResult::failed()
                }
            })
            .collect::<Vec<_>>()
    });

    // Every handle was joined above, so the scope itself cannot report a panic
    joined.unwrap_or_else(|_| vec![WorkerResult::failed(); config.clients])
}
