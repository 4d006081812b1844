//! Configuration for a benchmark run
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

use clap::ValueEnum;

use crate::error::BenchError;

/// Port the benchmarked server listens on
pub const DEFAULT_PORT: u16 = 8080;

/// Number of distinct key indices operations draw from
pub const DEFAULT_KEY_POOL: u64 = 1_000_000;

/// Operations issued by each client (50 x 2000 = 100,000 total)
pub const DEFAULT_OPS_PER_CLIENT: usize = 2000;

/// Concurrent clients, one connection each
pub const DEFAULT_CLIENTS: usize = 50;

/// Workload shape for every client in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Every operation is a SET
    Set,

    /// Every operation is a GET
    Get,

    /// 80% SETs followed by 20% GETs
    #[default]
    Mixed,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Set => "SET",
            Mode::Get => "GET",
            Mode::Mixed => "MIXED",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SET" => Ok(Mode::Set),
            "GET" => Ok(Mode::Get),
            "MIXED" => Ok(Mode::Mixed),
            other => Err(BenchError::Config(format!(
                "unknown mode '{}' (expected SET, GET or MIXED)",
                other
            ))),
        }
    }
}

/// Immutable description of one benchmark run
#[derive(Debug, Clone)]
pub struct RunConfig {
    // -------------------------------------------------------------------------
    // Target
    // -------------------------------------------------------------------------
    /// Server host or IP address
    pub host: String,

    /// Server TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Workload
    // -------------------------------------------------------------------------
    /// Operations issued by each client
    pub ops_per_client: usize,

    /// Number of concurrent clients
    pub clients: usize,

    /// Operation mix
    pub mode: Mode,

    /// Keys are drawn from `[0, key_pool)`
    pub key_pool: u64,

    // -------------------------------------------------------------------------
    // Socket Options
    // -------------------------------------------------------------------------
    /// Read/write timeout per socket call (milliseconds, 0 = block forever)
    pub io_timeout_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            ops_per_client: DEFAULT_OPS_PER_CLIENT,
            clients: DEFAULT_CLIENTS,
            mode: Mode::default(),
            key_pool: DEFAULT_KEY_POOL,
            io_timeout_ms: 0,
        }
    }
}

impl RunConfig {
    /// Create a new config builder
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// `host:port` string used to connect, IPv6 literals in brackets
    pub fn server_addr(&self) -> String {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Operations planned across all clients (saturates at `u64::MAX`)
    pub fn total_ops(&self) -> u64 {
        (self.clients as u64).saturating_mul(self.ops_per_client as u64)
    }
}

/// Builder for RunConfig
#[derive(Default)]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    /// Set the server host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the operations issued by each client
    pub fn ops_per_client(mut self, ops: usize) -> Self {
        self.config.ops_per_client = ops;
        self
    }

    /// Set the number of concurrent clients
    pub fn clients(mut self, count: usize) -> Self {
        self.config.clients = count;
        self
    }

    /// Set the workload mode
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the key pool size
    pub fn key_pool(mut self, size: u64) -> Self {
        self.config.key_pool = size;
        self
    }

    /// Set the socket read/write timeout (in milliseconds)
    pub fn io_timeout_ms(mut self, ms: u64) -> Self {
        self.config.io_timeout_ms = ms;
        self
    }

    /// Validate and build the config
    pub fn build(self) -> crate::error::Result<RunConfig> {
        if self.config.key_pool == 0 {
            return Err(BenchError::Config("key pool must not be empty".to_string()));
        }
        if self.config.host.is_empty() {
            return Err(BenchError::Config("server host must not be empty".to_string()));
        }
        if (self.config.clients as u64)
            .checked_mul(self.config.ops_per_client as u64)
            .is_none()
        {
            return Err(BenchError::Config(format!(
                "{} clients x {} ops overflows the total operation count",
                self.config.clients, self.config.ops_per_client
            )));
        }
        Ok(self.config)
    }
}
