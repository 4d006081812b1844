//! Stub key-value server for integration tests
//!
//! Speaks the server side of the wire protocol on an ephemeral port and
//! records every request it decodes.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use kvbench::config::{Mode, RunConfig};
use kvbench::protocol::{
    encode_get_response, encode_set_response, read_request, Request, STATUS_OK,
};
use parking_lot::Mutex;

/// How the stub answers requests
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Every request gets `0x00`; GETs return `value`
    AlwaysOk { value: Vec<u8> },

    /// Shared in-memory map: SET stores, GET hits with `0x00` or misses with `0x01`
    Store,

    /// Every request gets this status byte and nothing else
    Status(u8),

    /// Answer `0x00` to the first `n` requests on a connection, then hang up
    CloseAfter(usize),

    /// Answer every request with these raw bytes, then hang up
    RawThenClose(Vec<u8>),

    /// Read requests but never answer
    Silent,
}

pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl StubServer {
    pub fn start(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let store = Arc::new(Mutex::new(HashMap::new()));

        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let behavior = behavior.clone();
                let log = Arc::clone(&log);
                let store = Arc::clone(&store);
                thread::spawn(move || serve(stream, behavior, log, store));
            }
        });

        Self { addr, requests }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn addr(&self) -> String {
        self.addr.to_string()
    }

    /// Snapshot of every request received so far, across connections
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    pub fn config(&self, mode: Mode, clients: usize, ops_per_client: usize) -> RunConfig {
        RunConfig::builder()
            .host("127.0.0.1")
            .port(self.port())
            .mode(mode)
            .clients(clients)
            .ops_per_client(ops_per_client)
            .build()
            .unwrap()
    }
}

fn serve(
    stream: TcpStream,
    behavior: Behavior,
    log: Arc<Mutex<Vec<Request>>>,
    store: Arc<Mutex<HashMap<Vec<u8>, Vec<u8>>>>,
) {
    let mut writer = stream.try_clone().unwrap();
    let mut reader = BufReader::new(stream);
    let mut answered = 0;

    while let Ok(Some(request)) = read_request(&mut reader) {
        log.lock().push(request.clone());

        let reply = match (&behavior, &request) {
            (Behavior::AlwaysOk { .. }, Request::Set { .. }) => encode_set_response(STATUS_OK),
            (Behavior::AlwaysOk { value }, Request::Get { .. }) => {
                encode_get_response(STATUS_OK, value).unwrap()
            }
            (Behavior::Store, Request::Set { key, value }) => {
                store.lock().insert(key.clone(), value.clone());
                encode_set_response(STATUS_OK)
            }
            (Behavior::Store, Request::Get { key }) => match store.lock().get(key) {
                Some(value) => encode_get_response(STATUS_OK, value).unwrap(),
                None => encode_get_response(0x01, &[]).unwrap(),
            },
            (Behavior::Status(status), _) => encode_set_response(*status),
            (Behavior::CloseAfter(n), _) if answered >= *n => return,
            (Behavior::CloseAfter(_), Request::Set { .. }) => encode_set_response(STATUS_OK),
            (Behavior::CloseAfter(_), Request::Get { .. }) => {
                encode_get_response(STATUS_OK, b"stubvalu").unwrap()
            }
            (Behavior::RawThenClose(bytes), _) => {
                let _ = writer.write_all(bytes);
                return;
            }
            (Behavior::Silent, _) => continue,
        };

        if writer.write_all(&reply).is_err() {
            return;
        }
        answered += 1;
    }
}

/// An address nothing is listening on
pub fn refused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
