//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim. Each subcommand
//! gets one `run_*` function over a finished [`Sieve`]; the prompt loop is
//! generic over its streams so it can be driven from tests.

use anyhow::{Context, Result};
use atkin::{Sieve, SieveError};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing::{debug, info};

/// JSON shape printed by `count --json`.
#[derive(Debug, Serialize)]
struct CountReport {
    limit: usize,
    count: usize,
}

fn verdict(is_prime: bool) -> &'static str {
    if is_prime {
        "Prime."
    } else {
        "Not prime."
    }
}

/// Build the sieve for `limit`, logging how long construction took.
pub fn build_sieve(limit: usize) -> Sieve {
    let start = Instant::now();
    let sieve = Sieve::new(limit);
    info!(
        limit,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "sieve ready"
    );
    sieve
}

// ── Prompt Loop ─────────────────────────────────────────────────

/// Interactive loop on stdin/stdout/stderr.
pub fn run_prompt(sieve: &Sieve) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    prompt_loop(sieve, stdin.lock(), stdout.lock(), stderr.lock())
}

/// Prompt, read one line, answer, repeat until EOF.
///
/// Out-of-range and unparsable input are reported on `err` and the loop
/// continues; only I/O failures end it early.
pub fn prompt_loop<R, W, E>(sieve: &Sieve, input: R, mut out: W, mut err: E) -> Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut lines = input.lines();
    loop {
        write!(out, "Enter an integer 0-{}: ", sieve.limit())?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };
        let line = line.context("failed to read from stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let n: usize = match trimmed.parse() {
            Ok(n) => n,
            Err(e) => {
                debug!(input = trimmed, error = %e, "unparsable input");
                writeln!(err, "Invalid input.")?;
                continue;
            }
        };

        match sieve.is_prime(n) {
            Ok(is_prime) => writeln!(out, "{}", verdict(is_prime))?,
            Err(SieveError::IndexOutOfRange { .. }) => writeln!(err, "Number out of range.")?,
        }
    }
}

// ── One-shot Subcommands ────────────────────────────────────────

/// `check N...`: one `N: Prime.` / `N: Not prime.` line per number.
pub fn run_check(sieve: &Sieve, numbers: &[usize]) -> Result<()> {
    let stdout = io::stdout();
    check_numbers(sieve, numbers, stdout.lock())
}

fn check_numbers<W: Write>(sieve: &Sieve, numbers: &[usize], mut out: W) -> Result<()> {
    for &n in numbers {
        let is_prime = sieve.is_prime(n)?;
        writeln!(out, "{}: {}", n, verdict(is_prime))?;
    }
    Ok(())
}

/// `list [--json]`: every prime up to the limit.
pub fn run_list(sieve: &Sieve, json: bool) -> Result<()> {
    let stdout = io::stdout();
    list_primes(sieve, json, stdout.lock())
}

fn list_primes<W: Write>(sieve: &Sieve, json: bool, mut out: W) -> Result<()> {
    let primes = sieve.primes();
    if json {
        writeln!(out, "{}", serde_json::to_string(&primes)?)?;
    } else {
        for p in primes {
            writeln!(out, "{}", p)?;
        }
    }
    Ok(())
}

/// `count [--json]`: pi(limit).
pub fn run_count(sieve: &Sieve, json: bool) -> Result<()> {
    let stdout = io::stdout();
    count_primes(sieve, json, stdout.lock())
}

fn count_primes<W: Write>(sieve: &Sieve, json: bool, mut out: W) -> Result<()> {
    let report = CountReport {
        limit: sieve.limit(),
        count: sieve.count(),
    };
    if json {
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    } else {
        writeln!(out, "{}", report.count)?;
    }
    Ok(())
}
