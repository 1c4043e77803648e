//! catch-a-line: console demo for chunked-stream line framing
//!
//! Reads stdin as an unbounded chunked stream and re-frames it into lines:
//! - Echoes every line as it completes
//! - Counts lines in session state
//! - Reports the count on a periodic tick
//! - Nudges after a stretch of silence

use catch_a_line::session::{self, SessionOptions};
use clap::Parser;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the console demo
#[derive(Parser, Debug)]
#[command(name = "catch-a-line")]
#[command(version = "0.1.0")]
#[command(about = "Per-line callback framing over chunked input", long_about = None)]
struct CliArgs {
    /// Seconds between tick reports
    #[arg(long, default_value_t = 3.0)]
    tick_secs: f64,

    /// Seconds of silence before nudging
    #[arg(long, default_value_t = 3.5)]
    idle_secs: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if !args.tick_secs.is_finite() || args.tick_secs <= 0.0 {
        return Err("tick-secs must be a positive number".into());
    }
    if !args.idle_secs.is_finite() || args.idle_secs <= 0.0 {
        return Err("idle-secs must be a positive number".into());
    }

    let options = SessionOptions {
        tick_interval: Duration::from_secs_f64(args.tick_secs),
        idle_window: Duration::from_secs_f64(args.idle_secs),
    };

    info!(
        tick_secs = args.tick_secs,
        idle_secs = args.idle_secs,
        "Starting console session"
    );

    let report = session::run(tokio::io::stdin(), options).await?;

    info!(
        lines = report.lines,
        ticks = report.ticks,
        nudges = report.nudges,
        "Session ended"
    );

    Ok(())
}
