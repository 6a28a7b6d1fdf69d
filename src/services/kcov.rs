//! Coverage collection with kcov.

use super::process::{CommandRunner, Invocation};
use crate::domain::CoverageEnv;
use crate::error::ToolResult;
use std::path::Path;

pub struct KcovService<'a, R: CommandRunner> {
    runner: &'a R,
    program: String,
    exclude_pattern: String,
}

impl<'a, R: CommandRunner> KcovService<'a, R> {
    pub fn new(runner: &'a R, program: impl Into<String>, exclude_pattern: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
            exclude_pattern: exclude_pattern.into(),
        }
    }

    /// Run one test binary under kcov, writing into `out_dir`.
    ///
    /// kcov creates `out_dir` itself and merges repeated runs into it.
    pub fn collect(&self, out_dir: &Path, binary: &Path, env: &CoverageEnv) -> ToolResult<()> {
        let invocation = Invocation::new(&self.program)
            .arg(format!("--exclude-pattern={}", self.exclude_pattern))
            .arg(out_dir)
            .arg(binary)
            .env(env);

        self.runner.run(&invocation)
    }
}
