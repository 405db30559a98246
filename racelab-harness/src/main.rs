//! Racelab harness binary
//!
//! Drives load against a racelab endpoint and asserts success-rate
//! thresholds. Runs either against a live server (`--base-url`) or entirely
//! in-process (`--in-process`), which needs no server at all.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

use racelab_core::{Dispatcher, ShutdownSignal};
use racelab_harness::{
    report, run_concurrent, run_sequential, DispatcherCaller, EndpointCaller, HttpCaller,
};

#[derive(Parser)]
#[command(name = "racelab-harness", version, about = "Load harness for the racelab endpoints")]
struct Cli {
    /// Base URL of a running racelab server, e.g. http://127.0.0.1:3000
    #[arg(long, conflicts_with = "in_process")]
    base_url: Option<String>,

    /// Drive the dispatcher directly instead of going over HTTP
    #[arg(long)]
    in_process: bool,

    /// Endpoint to exercise: unsafe, safe-prototype or safe-singleton
    #[arg(long, default_value = "unsafe")]
    endpoint: String,

    /// Scenario mode
    #[arg(long, value_enum, default_value = "concurrent")]
    mode: Mode,

    /// Concurrent workers (concurrent mode)
    #[arg(long, default_value_t = 50)]
    concurrency: usize,

    /// Scenario duration in seconds (concurrent mode)
    #[arg(long, default_value_t = 30)]
    duration_secs: u64,

    /// Number of calls to issue (sequential mode)
    #[arg(long, default_value_t = 20)]
    requests: usize,

    /// Simulated processing delay per call, in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    /// Fail unless the observed success rate is at least this value
    #[arg(long)]
    min_rate: Option<f64>,

    /// Fail unless the observed success rate is below this value
    /// (used to prove the unsafe endpoint actually races)
    #[arg(long)]
    max_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Sequential,
    Concurrent,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let caller: Arc<dyn EndpointCaller> = if cli.in_process {
        Arc::new(DispatcherCaller::new(Arc::new(Dispatcher::new(
            ShutdownSignal::none(),
        ))))
    } else if let Some(base_url) = &cli.base_url {
        Arc::new(HttpCaller::new(base_url.clone()))
    } else {
        bail!("either --base-url or --in-process is required");
    };

    let outcome = match cli.mode {
        Mode::Sequential => {
            let ids: Vec<String> = (0..cli.requests).map(|i| format!("seq-{i}")).collect();
            run_sequential(caller.as_ref(), &cli.endpoint, &ids, cli.delay_ms).await
        }
        Mode::Concurrent => {
            run_concurrent(
                caller,
                &cli.endpoint,
                cli.concurrency,
                Duration::from_secs(cli.duration_secs),
                cli.delay_ms,
            )
            .await
        }
    };

    report::print_outcome(&outcome);
    println!("\n{}", report::summary_line(&outcome));

    if let Some(min_rate) = cli.min_rate {
        if !outcome.meets_rate(min_rate) {
            bail!(
                "success rate {:.4} below required minimum {:.4}",
                outcome.success_rate(),
                min_rate
            );
        }
    }
    if let Some(max_rate) = cli.max_rate {
        if outcome.success_rate() >= max_rate {
            bail!(
                "success rate {:.4} did not stay below {:.4}; the race did not reproduce",
                outcome.success_rate(),
                max_rate
            );
        }
    }

    Ok(())
}
