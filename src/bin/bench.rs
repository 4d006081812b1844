//! kvbench Binary
//!
//! Runs a benchmark against a key-value server and prints the results.
//!
//! Usage: kvbench <server_ip> [ops_per_client] [num_clients] [SET|GET|MIXED]

use clap::Parser;
use kvbench::config::{
    Mode, RunConfig, DEFAULT_CLIENTS, DEFAULT_KEY_POOL, DEFAULT_OPS_PER_CLIENT, DEFAULT_PORT,
};
use kvbench::{report, workload};
use tracing_subscriber::{fmt, EnvFilter};

/// kvbench
#[derive(Parser, Debug)]
#[command(name = "kvbench")]
#[command(about = "Benchmark a binary-protocol key-value server")]
#[command(version)]
struct Args {
    /// Server IP address or host name
    server_ip: String,

    /// Operations issued by each client
    #[arg(default_value_t = DEFAULT_OPS_PER_CLIENT)]
    ops_per_client: usize,

    /// Number of concurrent clients
    #[arg(default_value_t = DEFAULT_CLIENTS)]
    num_clients: usize,

    /// Workload mode
    #[arg(value_enum, ignore_case = true, default_value_t = Mode::Mixed)]
    mode: Mode,

    /// Server port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Number of distinct keys to draw from
    #[arg(short, long, default_value_t = DEFAULT_KEY_POOL)]
    key_pool: u64,

    /// Socket read/write timeout in milliseconds (0 = wait forever)
    #[arg(short, long, default_value_t = 0)]
    timeout_ms: u64,
}

fn main() {
    // Per-client failures are warnings; keep the report itself uncluttered
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .init();

    let args = Args::parse();

    let config = match RunConfig::builder()
        .host(&args.server_ip)
        .port(args.port)
        .ops_per_client(args.ops_per_client)
        .clients(args.num_clients)
        .mode(args.mode)
        .key_pool(args.key_pool)
        .io_timeout_ms(args.timeout_ms)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    report::print_config(&config);
    let result = workload::run(&config);
    report::print_results(&result);
}
