//! Client Worker
//!
//! Simulates one benchmark client: a single connection running its share of
//! operations back to back.

use std::iter::Sum;
use std::ops::AddAssign;

use rand::distr::Alphanumeric;
use rand::Rng;

use super::Connection;
use crate::config::RunConfig;
use crate::error::Result;
use crate::protocol::Status;
use crate::workload::OpPlan;

/// Length of every generated value
pub const VALUE_LEN: usize = 8;

/// Completed and failed operations for one client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerResult {
    /// Operations that got an answer from the server (hit, miss or failure code)
    pub completed: u64,

    /// Operations lost to the transport
    pub errors: u64,
}

impl WorkerResult {
    pub fn new(completed: u64, errors: u64) -> Self {
        Self { completed, errors }
    }

    /// Result of a client that never got to run: one error, nothing completed
    pub fn failed() -> Self {
        Self::new(0, 1)
    }

    fn record(&mut self, status: Status) {
        if status.is_connection_lost() {
            self.errors += 1;
        } else {
            self.completed += 1;
        }
    }
}

impl AddAssign for WorkerResult {
    fn add_assign(&mut self, other: Self) {
        self.completed += other.completed;
        self.errors += other.errors;
    }
}

impl Sum for WorkerResult {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, r| {
            acc += r;
            acc
        })
    }
}

/// Benchmark key for a pool index: `k` + 11 zero-padded digits
pub fn key_for(index: u64) -> Vec<u8> {
    format!("k{:011}", index).into_bytes()
}

/// Random alphanumeric value of [`VALUE_LEN`] bytes
pub fn random_value<R: Rng>(rng: &mut R) -> Vec<u8> {
    (0..VALUE_LEN).map(|_| rng.sample(Alphanumeric)).collect()
}

fn random_key<R: Rng>(rng: &mut R, key_pool: u64) -> Vec<u8> {
    key_for(rng.random_range(0..key_pool))
}

fn open(config: &RunConfig) -> Result<Connection> {
    let mut conn = Connection::connect(&config.server_addr())?;
    conn.set_timeouts(config.io_timeout_ms, config.io_timeout_ms)?;
    Ok(conn)
}

/// Run one client to completion
///
/// Opens a connection and issues `op_count` operations in the order given by
/// [`OpPlan`]. A failed connect yields `(0, 1)`. A transport error mid-run
/// adds one error and ends the client early. The connection is closed before
/// returning on every path.
pub fn run_worker<R: Rng>(
    id: usize,
    op_count: usize,
    config: &RunConfig,
    rng: &mut R,
) -> WorkerResult {
    let mut conn = match open(config) {
        Ok(conn) => conn,
        Err(e) => {
            tracing::warn!(client = id, "connect failed: {}", e);
            return WorkerResult::failed();
        }
    };

    let plan = OpPlan::for_mode(config.mode, op_count);
    let mut result = WorkerResult::default();

    if let Err(e) = run_plan(&mut conn, plan, config.key_pool, rng, &mut result) {
        tracing::warn!(client = id, "error after {} ops: {}", result.completed, e);
        result.errors += 1;
    }

    tracing::debug!(
        client = id,
        peer = conn.peer_addr(),
        completed = result.completed,
        errors = result.errors,
        "client done"
    );
    conn.close();
    result
}

fn run_plan<R: Rng>(
    conn: &mut Connection,
    plan: OpPlan,
    key_pool: u64,
    rng: &mut R,
    result: &mut WorkerResult,
) -> Result<()> {
    for _ in 0..plan.sets {
        let key = random_key(rng, key_pool);
        let value = random_value(rng);
        result.record(conn.set(&key, &value)?);
    }

    for _ in 0..plan.gets {
        let key = random_key(rng, key_pool);
        result.record(conn.get(&key)?.status);
    }

    Ok(())
}
