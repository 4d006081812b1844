//! kvbench CLI Client
//!
//! Sends a single SET or GET to a server and prints the decoded response.

use clap::{Parser, Subcommand};
use kvbench::client::Connection;
use kvbench::config::DEFAULT_PORT;
use kvbench::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// kvbench CLI
#[derive(Parser, Debug)]
#[command(name = "kvbench-cli")]
#[command(about = "Send one request to a binary-protocol key-value server")]
#[command(version)]
struct Args {
    /// Server address (host:port)
    #[arg(short, long, default_value_t = format!("127.0.0.1:{}", DEFAULT_PORT))]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },
}

fn execute(args: &Args) -> Result<()> {
    let mut conn = Connection::connect(&args.server)?;

    match &args.command {
        Commands::Set { key, value } => {
            let status = conn.set(key.as_bytes(), value.as_bytes())?;
            println!("{}", status);
        }
        Commands::Get { key } => {
            let response = conn.get(key.as_bytes())?;
            println!("{}", response.status);
            if let Some(value) = response.value {
                println!("{}", String::from_utf8_lossy(&value));
            }
        }
    }

    conn.close();
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    if let Err(e) = execute(&args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
