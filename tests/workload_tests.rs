//! Workload Driver Tests
//!
//! These tests verify:
//! - Fan-out to one connection per client
//! - Aggregation across clients
//! - Containment of per-client failures

mod common;

use common::{refused_port, Behavior, StubServer};
use kvbench::config::{Mode, RunConfig};
use kvbench::protocol::Request;
use kvbench::workload;

#[test]
fn test_single_client_set_scenario() {
    let server = StubServer::start(Behavior::AlwaysOk {
        value: b"stubvalu".to_vec(),
    });
    let config = server.config(Mode::Set, 1, 10);

    let result = workload::run(&config);

    assert_eq!(result.completed, 10);
    assert_eq!(result.errors, 0);
    assert_eq!(result.total_ops, 10);
    assert_eq!(result.mode, Mode::Set);
}

#[test]
fn test_many_clients_mixed() {
    let server = StubServer::start(Behavior::Store);
    let config = server.config(Mode::Mixed, 8, 25);

    let result = workload::run(&config);

    assert_eq!(result.completed, 200);
    assert_eq!(result.errors, 0);

    let requests = server.requests();
    assert_eq!(requests.len(), 200);
    let sets = requests
        .iter()
        .filter(|r| matches!(r, Request::Set { .. }))
        .count();
    assert_eq!(sets, 8 * 20);
}

#[test]
fn test_all_clients_refused() {
    let config = RunConfig::builder()
        .port(refused_port())
        .clients(5)
        .ops_per_client(100)
        .build()
        .unwrap();

    let result = workload::run(&config);

    assert_eq!(result.completed, 0);
    assert_eq!(result.errors, 5);
    assert_eq!(result.total_ops, 500);
    assert_eq!(result.ops_per_sec(), 0.0);
}

#[test]
fn test_hangups_are_contained_per_client() {
    let server = StubServer::start(Behavior::CloseAfter(4));
    let config = server.config(Mode::Set, 3, 10);

    let result = workload::run(&config);

    assert_eq!(result.completed, 12);
    assert!(result.errors >= 3);
    assert!(result.completed + result.errors <= result.total_ops);
}

#[test]
fn test_zero_clients() {
    let config = RunConfig::builder().clients(0).build().unwrap();

    let result = workload::run(&config);

    assert_eq!(result.completed, 0);
    assert_eq!(result.errors, 0);
    assert_eq!(result.total_ops, 0);
}
