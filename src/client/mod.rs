//! Client Module
//!
//! Benchmark clients and their TCP connections.
//!
//! ## Lifecycle of a client
//! ```text
//! CONNECTING ──► RUNNING ──► COMPLETED ──┐
//!     │                                  ├──► CLOSED
//!     └────────► FAILED ─────────────────┘
//! ```
//! - One connection per client, owned for the client's whole life
//! - Requests are strictly sequential, no pipelining
//! - No retries or reconnects

mod connection;
mod worker;

pub use connection::Connection;
pub use worker::{key_for, random_value, run_worker, WorkerResult, VALUE_LEN};
