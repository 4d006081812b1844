//! Client Connection
//!
//! One TCP connection to the key-value server, used strictly request/response.

use std::io::{BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use crate::error::{BenchError, Result};
use crate::protocol::{
    decode_get_response, decode_set_response, encode_get, encode_set, GetResponse, Status,
};

/// A single blocking connection to the server
///
/// The socket is released when the connection is closed or dropped.
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Connect to `addr` (`host:port`)
    pub fn connect(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr).map_err(|source| BenchError::Connect {
            addr: addr.to_string(),
            source,
        })?;
        Self::new(stream)
    }

    /// Wrap an established stream
    ///
    /// Sets up buffered I/O and disables Nagle's algorithm
    pub fn new(stream: TcpStream) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Every request is a few bytes and waits for its reply
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Configure socket timeouts (0 leaves the call blocking)
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        if read_ms > 0 {
            self.reader
                .get_ref()
                .set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            self.writer
                .get_ref()
                .set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }
        Ok(())
    }

    /// Send a SET and wait for its status byte
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> Result<Status> {
        let request = encode_set(key, value)?;
        self.send(&request)?;
        decode_set_response(&mut self.reader)
    }

    /// Send a GET and wait for its response
    pub fn get(&mut self, key: &[u8]) -> Result<GetResponse> {
        let request = encode_get(key)?;
        self.send(&request)?;
        decode_get_response(&mut self.reader)
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Close both directions of the socket
    pub fn close(self) {
        if let Err(e) = self.reader.get_ref().shutdown(Shutdown::Both) {
            // Already reset by the peer; dropping the stream still frees it
            tracing::trace!("Shutdown of {} failed: {}", self.peer_addr, e);
        }
        tracing::debug!("Closed connection to {}", self.peer_addr);
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
