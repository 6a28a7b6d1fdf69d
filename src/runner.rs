//! Coverage run orchestration.

use crate::config::RunnerConfig;
use crate::domain::CoverageEnv;
use crate::error::{AppError, Result};
use crate::services::{CargoService, CommandRunner, KcovService, RustcService};
use std::ffi::OsString;
use std::path::PathBuf;

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Directory kcov wrote into
    pub coverage_dir: PathBuf,
    /// Test binaries, in the order they were run
    pub binaries: Vec<PathBuf>,
}

/// Drives sysroot lookup, test build and kcov for one invocation
pub struct CoverageRunner<R: CommandRunner> {
    runner: R,
    config: RunnerConfig,
    prior_library_path: Option<OsString>,
}

impl<R: CommandRunner> CoverageRunner<R> {
    pub fn new(runner: R, config: RunnerConfig) -> Self {
        Self {
            runner,
            config,
            prior_library_path: std::env::var_os(crate::domain::LIBRARY_PATH),
        }
    }

    /// Override the library search path the environment is derived from
    pub fn with_prior_library_path(mut self, value: Option<OsString>) -> Self {
        self.prior_library_path = value;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Build the test suite and collect coverage for each test binary.
    ///
    /// `extra_args` are forwarded to `cargo test`.
    pub fn run(&self, extra_args: &[OsString]) -> Result<RunSummary> {
        let tools = &self.config.tools;
        let coverage = &self.config.coverage;

        let sysroot = RustcService::new(&self.runner, &tools.rustc).sysroot()?;
        let env = CoverageEnv::new(
            &coverage.rustflags,
            &sysroot,
            self.prior_library_path.as_deref(),
        );

        let cargo = CargoService::new(&self.runner, &tools.cargo);
        let coverage_dir = cargo.metadata()?.coverage_dir(&coverage.output_subdir)?;
        eprintln!("[dbg] kcov_out = {}", coverage_dir.display());

        let binaries = cargo.test_binaries(extra_args, &env)?;
        tracing::info!("Collecting coverage for {} test binaries", binaries.len());

        let kcov = KcovService::new(&self.runner, &tools.kcov, &coverage.exclude_pattern);
        let mut failed = Vec::new();
        for binary in &binaries {
            match kcov.collect(&coverage_dir, binary, &env) {
                Ok(()) => {}
                Err(e) if coverage.keep_going => {
                    tracing::warn!("Coverage failed for {}: {}", binary.display(), e);
                    failed.push(binary.clone());
                }
                Err(e) => return Err(e.into()),
            }
        }

        if !failed.is_empty() {
            return Err(AppError::CoverageFailed {
                failed,
                total: binaries.len(),
            });
        }

        tracing::info!("Coverage written to {}", coverage_dir.display());
        Ok(RunSummary {
            coverage_dir,
            binaries,
        })
    }
}
