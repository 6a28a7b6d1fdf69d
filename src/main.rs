//! kcov-runner: collect kcov coverage for every test binary of a Cargo project
//!
//! All command line arguments are passed through to `cargo test`.

use anyhow::{Context, Result};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kcov_runner::services::SystemRunner;
use kcov_runner::{CoverageRunner, RunnerConfig};

/// Initialize logging with RUST_LOG environment variable support
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let project_root = std::env::current_dir().context("Cannot determine current directory")?;
    let config = RunnerConfig::load(Some(project_root.as_path())).context("Failed to load configuration")?;
    tracing::debug!("Loaded configuration: {:?}", config);

    let extra_args: Vec<_> = std::env::args_os().skip(1).collect();

    let summary = CoverageRunner::new(SystemRunner, config).run(&extra_args)?;
    tracing::info!(
        "Collected coverage for {} binaries into {}",
        summary.binaries.len(),
        summary.coverage_dir.display()
    );

    Ok(())
}
