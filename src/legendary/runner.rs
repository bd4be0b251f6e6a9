use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::error::Error;

use super::commands::{BaseCommandOptions, LegendaryCommand};

/// Captured outcome of one legendary invocation. Plain data; carries
/// no handle to the finished process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Blocking boundary to the legendary process. Arguments are passed as
/// a discrete token vector, never joined into a shell string. There is
/// no cancellation and no retry here; callers wanting either run this
/// on a thread they can abandon and loop at the facade layer.
#[derive(Debug, Clone)]
pub struct LegendaryRunner {
    executable: String,
    config_path: Option<PathBuf>,
}

impl LegendaryRunner {
    /// Resolve `legendary` from PATH, with the tool's own default
    /// config directory.
    pub fn new() -> Self {
        LegendaryRunner {
            executable: "legendary".to_string(),
            config_path: None,
        }
    }

    pub fn with_executable<S: Into<String>>(executable: S) -> Self {
        LegendaryRunner {
            executable: executable.into(),
            config_path: None,
        }
    }

    /// Point the spawned tool at a config directory via
    /// `LEGENDARY_CONFIG_PATH`, without touching this process's
    /// environment.
    pub fn config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Run the command and capture its output, whatever the exit code.
    /// Only a failure to start the process is an error here.
    pub fn run(
        &self,
        command: &LegendaryCommand,
        base: &BaseCommandOptions,
    ) -> Result<CommandOutput, Error> {
        let args = command.to_arguments(base);
        debug!(executable = %self.executable, ?args, "running legendary");

        let mut process = Command::new(&self.executable);
        process.args(&args);
        if let Some(config_path) = &self.config_path {
            process.env("LEGENDARY_CONFIG_PATH", config_path);
        }

        let output = process.output().map_err(|source| Error::Spawn {
            executable: self.executable.clone(),
            source,
        })?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        };
        if result.success() {
            debug!(verb = command.verb(), "legendary finished");
        } else {
            warn!(
                verb = command.verb(),
                code = result.exit_code,
                stderr = %result.stderr.trim(),
                "legendary exited non-zero"
            );
        }
        Ok(result)
    }

    /// Like [`run`](Self::run), but a non-zero exit becomes an
    /// [`Error::Process`] with stderr folded into the description.
    pub fn run_checked(
        &self,
        command: &LegendaryCommand,
        base: &BaseCommandOptions,
    ) -> Result<CommandOutput, Error> {
        let output = self.run(command, base)?;
        if output.success() {
            Ok(output)
        } else {
            Err(process_failure(command, &output))
        }
    }
}

impl Default for LegendaryRunner {
    fn default() -> Self {
        LegendaryRunner::new()
    }
}

pub(crate) fn process_failure(command: &LegendaryCommand, output: &CommandOutput) -> Error {
    Error::Process {
        command: command.verb().to_string(),
        code: output.exit_code,
        stderr: output.stderr.trim().to_string(),
    }
}
