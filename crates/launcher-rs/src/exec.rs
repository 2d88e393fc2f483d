//! Process replacement
//!
//! The final stage hands the OS process over to the resolved executable.
//! argv carries only the executable's own path; all task configuration
//! travels through the environment.

use std::convert::Infallible;
use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use launcher_core::{LaunchError, Result};
use launcher_env::EnvOverlay;
use nix::unistd::execve;

/// Replace the current process image with the executable at `path`.
///
/// The environment passed to the executable is the inherited environment
/// with `overlay` merged on top. Returns only on failure.
pub fn replace_process(path: &Path, overlay: &EnvOverlay) -> Result<Infallible> {
    let program = cstring(path.as_os_str().as_bytes().to_vec(), path)?;
    let argv = [program.clone()];

    let mut envp = Vec::new();
    for (name, value) in overlay.merged_with_ambient() {
        envp.push(cstring(format!("{}={}", name, value).into_bytes(), path)?);
    }

    match execve(&program, &argv, &envp) {
        Ok(never) => match never {},
        Err(errno) => Err(LaunchError::ExecFailed {
            path: path.to_path_buf(),
            source: io::Error::from_raw_os_error(errno as i32),
        }),
    }
}

fn cstring(bytes: Vec<u8>, path: &Path) -> Result<CString> {
    CString::new(bytes).map_err(|_| LaunchError::ExecFailed {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "embedded nul byte"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::wait::{waitpid, WaitStatus};
    use nix::unistd::{fork, ForkResult};

    #[test]
    fn successful_replacement_never_returns() {
        match unsafe { fork() }.unwrap() {
            ForkResult::Child => {
                let _ = replace_process(Path::new("/bin/true"), &EnvOverlay::new());
                // Only reachable when the exec failed
                std::process::exit(7);
            }
            ForkResult::Parent { child } => match waitpid(child, None).unwrap() {
                WaitStatus::Exited(_, code) => assert_eq!(code, 0),
                other => panic!("unexpected wait status: {:?}", other),
            },
        }
    }

    #[test]
    fn missing_executable_reports_exec_failed() {
        match unsafe { fork() }.unwrap() {
            ForkResult::Child => {
                let result = replace_process(
                    Path::new("/launcher-test/no/such/executable"),
                    &EnvOverlay::new(),
                );
                match result {
                    Err(LaunchError::ExecFailed { .. }) => std::process::exit(0),
                    _ => std::process::exit(7),
                }
            }
            ForkResult::Parent { child } => match waitpid(child, None).unwrap() {
                WaitStatus::Exited(_, code) => assert_eq!(code, 0),
                other => panic!("unexpected wait status: {:?}", other),
            },
        }
    }
}
