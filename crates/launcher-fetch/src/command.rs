//! External tool invocation
//!
//! Remote fetch and archive extraction are delegated to command-line tools
//! whose exit code is the only success signal. The runner sits behind a trait
//! so tests can substitute fakes for the remote-filesystem client and tar.

use std::io;
use std::process::{Command, Stdio};

/// Outcome of one external tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    /// Exit code; -1 when the tool died to a signal
    pub code: i32,
    /// Captured standard error, kept for diagnostics
    pub stderr: String,
}

impl ToolOutcome {
    /// Build a successful outcome with no diagnostics
    pub fn ok() -> Self {
        ToolOutcome {
            code: 0,
            stderr: String::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Runs a shell command line and reports its outcome.
pub trait ToolRunner {
    fn run(&self, command_line: &str) -> io::Result<ToolOutcome>;
}

/// Production runner: `sh -c`, stdout inherited, stderr captured.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ToolRunner for ShellRunner {
    fn run(&self, command_line: &str) -> io::Result<ToolOutcome> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()?;

        Ok(ToolOutcome {
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        })
    }
}
