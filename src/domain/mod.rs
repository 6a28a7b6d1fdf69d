//! Domain types for kcov-runner.
//!
//! This module contains:
//! - BuildArtifact: One record of cargo's JSON message stream
//! - Metadata: The workspace metadata cargo reports
//! - CoverageEnv: Environment applied to build and coverage subprocesses

mod artifact;
mod environment;
mod metadata;

pub use artifact::{test_binaries, ArtifactStream, BuildArtifact, Profile};
pub use environment::{CoverageEnv, LIBRARY_PATH, RUSTFLAGS};
pub use metadata::Metadata;
