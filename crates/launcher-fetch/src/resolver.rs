//! Executor resolution
//!
//! Turns the caller-supplied executor reference into a local executable path.
//! Three tiers: a plain local path passes through untouched, an `hdfs://`
//! reference is copied out of the remote store first, and a `.tgz` name is
//! unpacked in place. Resolution runs with the working directory as the
//! current directory; fetch and extraction write relative to it.

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use launcher_core::{LaunchError, Result};
use log::{debug, info};
use nix::unistd::chdir;

use crate::command::{ToolOutcome, ToolRunner};

/// URI prefix that marks a reference as remote
pub const REMOTE_SCHEME: &str = "hdfs://";
/// Suffix that marks a local file as a packaged executor bundle
pub const ARCHIVE_SUFFIX: &str = ".tgz";
/// Entry point the bundle's single directory must contain
pub const EXECUTOR_ENTRY: &str = "executor";

/// Characters that would escape the single quoting in tool command lines
const FORBIDDEN_CHARS: [char; 3] = ['\\', '\'', '\0'];

/// Mode for a fetched executor: owner rwx, group/other r-x
const FETCHED_MODE: u32 = 0o755;

/// Resolves executor references into local executable paths.
pub struct ExecutorResolver<'a, R: ToolRunner> {
    runner: &'a R,
    hadoop_home: Option<&'a str>,
}

impl<'a, R: ToolRunner> ExecutorResolver<'a, R> {
    pub fn new(runner: &'a R, hadoop_home: Option<&'a str>) -> Self {
        ExecutorResolver {
            runner,
            hadoop_home,
        }
    }

    /// Resolve `reference` into a local executable path.
    ///
    /// The returned path is the reference itself unless a fetch or an
    /// extraction applied; after an extraction the current directory has
    /// moved into the bundle and the path is `./executor` inside it.
    pub fn resolve(&self, reference: &str) -> Result<PathBuf> {
        validate_reference(reference)?;

        let mut executor = reference.to_string();

        if executor.starts_with(REMOTE_SCHEME) {
            executor = self.fetch(&executor)?;
        }

        if executor.ends_with(ARCHIVE_SUFFIX) {
            executor = self.unpack(&executor)?;
        }

        Ok(PathBuf::from(executor))
    }

    /// Locate the remote-filesystem client script: an explicit home override
    /// wins, then the `HADOOP_HOME` environment variable, then a bare name
    /// left for `PATH` lookup.
    pub fn hadoop_script(&self) -> String {
        if let Some(home) = self.hadoop_home {
            return format!("{}/bin/hadoop", home);
        }
        if let Ok(home) = std::env::var("HADOOP_HOME") {
            return format!("{}/bin/hadoop", home);
        }
        "hadoop".to_string()
    }

    /// Copy a remote reference into the working directory and mark the local
    /// file executable. Runs before any privilege drop: the copy may need
    /// slave-level credentials the task owner lacks.
    fn fetch(&self, reference: &str) -> Result<String> {
        let local = format!("./{}", base_name(reference));
        let command = format!(
            "{} fs -copyToLocal '{}' '{}'",
            self.hadoop_script(),
            reference,
            local
        );

        info!("downloading executor from {}", reference);
        debug!("fetch command: {}", command);

        let outcome = self.run_tool(&command);
        if !outcome.success() {
            return Err(LaunchError::FetchFailed {
                code: outcome.code,
                diagnostic: outcome.stderr,
            });
        }

        fs::set_permissions(&local, fs::Permissions::from_mode(FETCHED_MODE)).map_err(|source| {
            LaunchError::ChmodFailed {
                path: PathBuf::from(&local),
                source,
            }
        })?;

        Ok(local)
    }

    /// Unpack a bundle in the working directory, enter its single top-level
    /// directory, and point the executor at the fixed entry name inside it.
    fn unpack(&self, archive: &str) -> Result<String> {
        let command = format!("tar xzf '{}'", archive);

        info!("extracting executor archive {}", archive);

        let outcome = self.run_tool(&command);
        if !outcome.success() {
            return Err(LaunchError::ExtractFailed {
                code: outcome.code,
                diagnostic: outcome.stderr,
            });
        }

        let bundle = single_bundle_directory(Path::new("."))?;
        chdir(&bundle).map_err(|errno| LaunchError::ChdirFailed {
            path: bundle.clone(),
            source: io::Error::from_raw_os_error(errno as i32),
        })?;

        Ok(format!("./{}", EXECUTOR_ENTRY))
    }

    fn run_tool(&self, command: &str) -> ToolOutcome {
        // A runner that cannot even spawn reports like a failed tool.
        self.runner.run(command).unwrap_or_else(|e| ToolOutcome {
            code: -1,
            stderr: e.to_string(),
        })
    }
}

/// Reject references that could break out of the single quoting used in the
/// tool command lines. Checked before any external command runs.
fn validate_reference(reference: &str) -> Result<()> {
    if reference.contains(&FORBIDDEN_CHARS[..]) {
        return Err(LaunchError::InvalidReference {
            reference: reference.to_string(),
        });
    }
    Ok(())
}

/// Final path component of a reference, in the manner of basename(3).
fn base_name(reference: &str) -> &str {
    reference
        .rsplit('/')
        .find(|part| !part.is_empty())
        .unwrap_or(reference)
}

/// The bundle contract: after extraction the working directory holds exactly
/// one top-level directory, and the executor entry lives inside it.
fn single_bundle_directory(dir: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(dir).map_err(|source| LaunchError::StatFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut found: Option<PathBuf> = None;
    for entry in entries {
        let entry = entry.map_err(|source| LaunchError::StatFailed {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        // stat, not lstat: a symlink to a directory counts as a candidate,
        // and a dangling one is fatal.
        let metadata = fs::metadata(&path).map_err(|source| LaunchError::StatFailed {
            path: path.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            continue;
        }
        if found.is_some() {
            return Err(LaunchError::AmbiguousExecutorDirectory);
        }
        found = Some(path);
    }

    found.ok_or(LaunchError::NoExecutorDirectory)
}
