//! # kvbench
//!
//! A `redis-benchmark` style load generator for key-value servers that speak a
//! small binary protocol over TCP:
//! - N concurrent clients, one connection and one OS thread each
//! - SET, GET or MIXED (80% SET then 20% GET) workloads
//! - Aggregate completed operations, errors and throughput
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Workload Driver                         │
//! │              (spawn N clients, join, aggregate)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼────────────┐
//!          ▼            ▼            ▼
//!   ┌─────────────┐           ┌─────────────┐
//!   │  Client 0   │    ...    │ Client N-1  │
//!   │ (own conn)  │           │ (own conn)  │
//!   └──────┬──────┘           └──────┬──────┘
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────────────────────────────────┐
//!   │               Wire Codec                │
//!   └─────────────────────┬───────────────────┘
//!                         │ TCP
//!                         ▼
//!                 key-value server
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod client;
pub mod workload;
pub mod report;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BenchError, Result};
pub use config::{Mode, RunConfig};
pub use client::WorkerResult;
pub use workload::{AggregateResult, OpPlan};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of kvbench
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
