//! rate-limiter-demo
//!
//! Runs a burst and a steady client against one of the limiters and prints
//! what each client experienced.

#![allow(missing_docs)]

use clap::Parser;
use rate_limiter_rs::demo::{SteadyOptions, burst_demo, steady_demo};
use rate_limiter_rs::utils::init_logging;
use rate_limiter_rs::{Config, RateLimitStrategy, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ngit: ",
    env!("GIT_HASH"),
    "\nbuilt: ",
    env!("BUILD_TIME"),
    "\nrustc: ",
    env!("RUST_VERSION"),
);

/// Demonstrates how a rate limiter shapes bursty and steady clients
#[derive(Debug, Parser)]
#[command(name = "rate-limiter-demo", version, long_version = LONG_VERSION)]
struct Cli {
    /// Algorithm: token, spacing, fixed or sliding [default: token]
    #[arg(long, value_name = "ALGO")]
    algo: Option<RateLimitStrategy>,

    /// Keep attempting at the target rate, ignoring retry hints
    #[arg(long, visible_alias = "ignore-retry-after")]
    hammer: bool,

    /// Steady demo target rate [default: 50]
    #[arg(long)]
    qps: Option<u32>,

    /// Steady demo length in seconds [default: 5]
    #[arg(long)]
    duration_secs: Option<u64>,

    /// YAML configuration file; environment variables are used otherwise
    #[arg(long, env = "RATE_LIMITER_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `rate_limiter_rs=trace` [default: info]
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    /// Command line flags win over file and environment settings
    fn apply(&self, config: &mut Config) {
        if let Some(strategy) = self.algo {
            config.use_strategy(strategy);
        }
        if self.hammer {
            config.demo.respect_retry_after = false;
        }
        if let Some(qps) = self.qps {
            config.demo.qps = qps;
        }
        if let Some(duration_secs) = self.duration_secs {
            config.demo.duration_secs = duration_secs;
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if self.json_logs {
            config.logging.json = true;
        }
    }
}

async fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };
    cli.apply(&mut config);
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli).await?;
    init_logging(&config.logging)?;

    let strategy: RateLimitStrategy = config.rate_limit.strategy;
    info!(
        %strategy,
        capacity = config.rate_limit.capacity,
        period = ?config.rate_limit.period(),
        "Configuration loaded"
    );

    // Fresh limiter per demo so the steady run does not inherit the drained burst state
    let burst_limiter = config.rate_limit.build()?;
    println!("{}", burst_limiter.name());
    println!();

    let burst = burst_demo(
        burst_limiter.as_ref(),
        config.demo.burst_attempts,
        config.demo.permits,
    )?;
    println!("{}", burst);
    println!();

    let steady_limiter = config.rate_limit.build()?;
    let steady = steady_demo(steady_limiter.as_ref(), SteadyOptions::from(&config.demo)).await?;
    println!("{}", steady);

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
