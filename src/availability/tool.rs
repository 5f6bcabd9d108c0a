//! Invocation of the external availability query tool.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::process::{Command, Stdio};

use super::AvailabilityError;

/// Program queried for availability when no other is configured
pub const DEFAULT_PROGRAM: &str = "nds2_channel_source";

/// Where to find the availability query tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityConfig {
    /// Tool program name or path
    pub program: String,
    /// Arguments placed before the program, e.g. `["sh"]` to run a script
    /// through a shell
    pub launcher: Vec<String>,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            launcher: Vec::new(),
        }
    }
}

impl AvailabilityConfig {
    /// Config running `program` directly
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            launcher: Vec::new(),
        }
    }

    /// Build the full availability command line.
    ///
    /// The layout is `<launcher...> <program> -a -s <start> -n <host>
    /// [-p <port>] <tokens...>`.
    pub fn command(
        &self,
        start: i64,
        host: &str,
        port: Option<u16>,
        tokens: &[String],
    ) -> ToolCommand {
        let mut argv: Vec<String> = self.launcher.clone();
        argv.push(self.program.clone());
        argv.extend(["-a", "-s"].map(String::from));
        argv.push(start.to_string());
        argv.push("-n".to_string());
        argv.push(host.to_string());
        if let Some(port) = port {
            argv.push("-p".to_string());
            argv.push(port.to_string());
        }
        argv.extend(tokens.iter().cloned());

        let program = argv.remove(0);
        ToolCommand {
            program,
            args: argv,
        }
    }
}

/// A fully assembled command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Executable
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a finished tool run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl ToolOutput {
    /// Successful output with the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// True if the tool exited with status zero
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a [`ToolCommand`] to completion
pub trait ToolRunner {
    /// Run `command`, wait for it to exit, and return everything it wrote.
    ///
    /// Only a failure to start the process is an error here; a non-zero exit
    /// is reported through [`ToolOutput::code`].
    fn run(&self, command: &ToolCommand) -> Result<ToolOutput, AvailabilityError>;
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    fn run(&self, command: &ToolCommand) -> Result<ToolOutput, AvailabilityError> {
        (**self).run(command)
    }
}

/// Runs commands as child processes of the current process
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, command: &ToolCommand) -> Result<ToolOutput, AvailabilityError> {
        info!("Running {}", command);

        // output() waits for the child and drains both pipes
        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| AvailabilityError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        debug!(
            "{} exited with {:?} ({} bytes of output)",
            command.program,
            output.status.code(),
            output.stdout.len()
        );

        Ok(ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
