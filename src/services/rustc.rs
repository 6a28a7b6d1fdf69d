//! Compiler queries.

use super::process::{CommandRunner, Invocation};
use crate::error::{ToolError, ToolResult};
use std::path::PathBuf;

pub struct RustcService<'a, R: CommandRunner> {
    runner: &'a R,
    program: String,
}

impl<'a, R: CommandRunner> RustcService<'a, R> {
    pub fn new(runner: &'a R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// Resolve the compiler's system root with `rustc --print sysroot`
    pub fn sysroot(&self) -> ToolResult<PathBuf> {
        let invocation = Invocation::new(&self.program).args(["--print", "sysroot"]);
        let stdout = self.runner.capture(&invocation)?;

        let sysroot = stdout.trim();
        if sysroot.is_empty() {
            return Err(ToolError::EmptyOutput {
                program: self.program.clone(),
            });
        }

        tracing::debug!("Compiler sysroot is {}", sysroot);
        Ok(PathBuf::from(sysroot))
    }
}
