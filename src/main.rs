//! # Main — CLI Entry Point
//!
//! Thin harness around [`atkin::Sieve`]: builds one sieve for `--limit` and
//! routes subcommands to the functions in `cli.rs`.
//!
//! ## Subcommands
//!
//! - `prompt` (default): interactive loop, one query per input line.
//! - `check`: classify the numbers given as arguments.
//! - `list`: print every prime up to the limit.
//! - `count`: print pi(limit).
//!
//! ## Global Options
//!
//! - `--limit` / `ATKIN_LIMIT`: inclusive sieve bound (default 9999).
//! - `LOG_FORMAT=json`: JSON log lines instead of human-readable stderr.
//! - `RUST_LOG`: tracing filter (default `warn`).

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "atkin", about = "Primality queries backed by a Sieve of Atkin")]
struct Cli {
    /// Inclusive upper bound of the sieve. Memory is ~limit/8 bytes.
    #[arg(long, env = "ATKIN_LIMIT", default_value_t = 9_999, global = true)]
    limit: usize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read integers from stdin and report "Prime." or "Not prime." for each
    Prompt,
    /// Report whether each given number is prime
    Check {
        /// Numbers to test (each must be <= --limit)
        #[arg(required = true)]
        numbers: Vec<usize>,
    },
    /// Print every prime up to the limit
    List {
        /// Print a JSON array instead of one prime per line
        #[arg(long)]
        json: bool,
    },
    /// Print the number of primes up to the limit
    Count {
        /// Print a JSON object instead of a bare number
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // LOG_FORMAT=json for log shippers, human-readable otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    let sieve = cli::build_sieve(cli.limit);

    match &cli.command {
        None | Some(Commands::Prompt) => cli::run_prompt(&sieve),
        Some(Commands::Check { numbers }) => cli::run_check(&sieve, numbers),
        Some(Commands::List { json }) => cli::run_list(&sieve, *json),
        Some(Commands::Count { json }) => cli::run_count(&sieve, *json),
    }
}
