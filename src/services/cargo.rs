//! Build tool queries: workspace metadata and test binary discovery.

use super::process::{CommandRunner, Invocation};
use crate::domain::{test_binaries, CoverageEnv, Metadata};
use crate::error::Result;
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CargoService<'a, R: CommandRunner> {
    runner: &'a R,
    program: String,
}

impl<'a, R: CommandRunner> CargoService<'a, R> {
    pub fn new(runner: &'a R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// Read workspace metadata with `cargo metadata --format-version=1`
    pub fn metadata(&self) -> Result<Metadata> {
        let invocation = Invocation::new(&self.program).args(["metadata", "--format-version=1"]);
        let stdout = self.runner.capture(&invocation)?;
        Ok(Metadata::parse(&stdout)?)
    }

    /// Build the test binaries without running them and list their files.
    ///
    /// `extra_args` are appended verbatim to `cargo test`.
    pub fn test_binaries(&self, extra_args: &[OsString], env: &CoverageEnv) -> Result<Vec<PathBuf>> {
        let invocation = Invocation::new(&self.program)
            .args(["test", "--no-run", "--message-format=json"])
            .args(extra_args.iter().cloned())
            .env(env);

        let stdout = self.runner.capture(&invocation)?;
        Ok(test_binaries(&stdout)?)
    }
}
