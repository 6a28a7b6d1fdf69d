//! Infrastructure services for kcov-runner.
//!
//! This module contains:
//! - RustcService: Compiler sysroot query
//! - CargoService: Workspace metadata and test binary discovery
//! - KcovService: Coverage collection per test binary
//! - CommandRunner: Blocking process execution behind a trait

mod cargo;
mod kcov;
mod rustc;
pub mod process;

pub use cargo::CargoService;
pub use kcov::KcovService;
pub use process::{CommandRunner, Invocation, SystemRunner};
pub use rustc::RustcService;
