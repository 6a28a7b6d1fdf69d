//! kcov-runner: coverage collection for a Cargo project's test suite
//!
//! Builds every test binary without running it, then runs each one under
//! kcov with dead code kept in the binaries.

pub mod config;
pub mod domain;
pub mod error;
pub mod runner;
pub mod services;

pub use config::RunnerConfig;
pub use error::{AppError, Result};
pub use runner::{CoverageRunner, RunSummary};
