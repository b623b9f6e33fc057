//! Covenant - Contract-test harness CLI
//!
//! Loads a declarative suite and an environment configuration, issues every
//! declared request against the remote API, and reports pass/fail per case.
//!
//! Exit status: 0 if every case passed, 1 if any case failed, 2 for a
//! configuration error (nothing was sent).

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use covenant_application::SuiteResolver;
use covenant_infrastructure::{
    ReqwestHttpClient, RunOptions, SuiteRunner, load_config, load_suite,
};

mod report;

/// Issues declared HTTP requests against a remote API and verifies each
/// response matches its expectation.
#[derive(Debug, Parser)]
#[command(name = "covenant", version, about)]
struct Cli {
    /// Path to the harness configuration file
    #[arg(long, default_value = "covenant.yaml")]
    config: PathBuf,

    /// Path to the suite file
    #[arg(long, default_value = "suites/github-rest.yaml")]
    suite: PathBuf,

    /// Run cases concurrently instead of sequentially
    #[arg(long)]
    parallel: bool,

    /// Abort still-pending requests after this many seconds
    #[arg(long, value_name = "SECONDS")]
    run_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("configuration error: {e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = load_config(&cli.config)?;
    let suite = load_suite(&cli.suite)?;
    tracing::info!(suite = %suite.name, cases = suite.len(), "suite loaded");

    // Every case must resolve before anything is sent.
    let resolver = SuiteResolver::new(&config)?;
    let cases = resolver.resolve_suite(&suite)?;

    let client = Arc::new(ReqwestHttpClient::new()?);
    let runner = SuiteRunner::new(client).with_options(RunOptions {
        parallel: cli.parallel,
        run_timeout: cli.run_timeout.map(Duration::from_secs),
    });

    let run_report = runner.run(&suite.name, cases).await;
    print!("{}", report::render(&run_report));
    Ok(run_report.all_passed())
}
