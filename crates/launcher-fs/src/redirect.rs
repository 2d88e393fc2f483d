//! Stdio redirection into the working directory
//!
//! When a task is launched with io redirection, its stdout and stderr land in
//! files named `stdout` and `stderr` inside the sandbox, where the supervising
//! process can collect them after the task exits.

use std::fs::File;
use std::io;
use std::os::fd::AsRawFd;
use std::os::unix::io::RawFd;

use launcher_core::{LaunchError, Result};
use nix::unistd::dup2;

/// File name the redirected stdout lands in, relative to the working directory
pub const STDOUT_FILE: &str = "stdout";
/// File name the redirected stderr lands in, relative to the working directory
pub const STDERR_FILE: &str = "stderr";

/// Redirect stdout and stderr into files in the current directory.
/// Must run after the working directory has been entered.
pub fn redirect_stdio() -> Result<()> {
    redirect(STDOUT_FILE, libc::STDOUT_FILENO, "stdout")?;
    redirect(STDERR_FILE, libc::STDERR_FILENO, "stderr")
}

fn redirect(file: &str, fd: RawFd, stream: &'static str) -> Result<()> {
    let sink = File::create(file).map_err(|source| LaunchError::IoRedirectFailed { stream, source })?;

    dup2(sink.as_raw_fd(), fd).map_err(|errno| LaunchError::IoRedirectFailed {
        stream,
        source: io::Error::from_raw_os_error(errno as i32),
    })?;

    // `sink` closes on drop; the dup'ed descriptor keeps the file open.
    Ok(())
}
