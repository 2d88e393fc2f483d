//! Error types for launch operations

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for launch operations
pub type Result<T> = std::result::Result<T, LaunchError>;

/// Half of the process identity affected by a failed privilege drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeStage {
    Group,
    User,
}

impl fmt::Display for PrivilegeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivilegeStage::Group => write!(f, "group"),
            PrivilegeStage::User => write!(f, "user"),
        }
    }
}

/// Errors that can occur while bootstrapping a task executor.
///
/// Every variant is terminal: the launcher never retries or rolls back, it
/// surfaces the error for the supervising process to report and exit on.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("executor reference {reference:?} contains characters unsafe for shell interpolation")]
    InvalidReference { reference: String },

    #[error("failed to create working directory {}: {source}", .path.display())]
    DirectoryCreateFailed { path: PathBuf, source: io::Error },

    #[error("failed to chdir into {}: {source}", .path.display())]
    ChdirFailed { path: PathBuf, source: io::Error },

    #[error("failed to redirect {stream} into the working directory: {source}")]
    IoRedirectFailed {
        stream: &'static str,
        source: io::Error,
    },

    #[error("failed to chown {}: {source}", .path.display())]
    ChownFailed { path: PathBuf, source: io::Error },

    #[error("failed to chmod {}: {source}", .path.display())]
    ChmodFailed { path: PathBuf, source: io::Error },

    #[error("fetch command exited with code {code}: {diagnostic}")]
    FetchFailed { code: i32, diagnostic: String },

    #[error("archive extraction exited with code {code}: {diagnostic}")]
    ExtractFailed { code: i32, diagnostic: String },

    #[error("extracted archive must contain a single top-level directory, found none")]
    NoExecutorDirectory,

    #[error("extracted archive must contain a single top-level directory, found several")]
    AmbiguousExecutorDirectory,

    #[error("failed to stat {}: {source}", .path.display())]
    StatFailed { path: PathBuf, source: io::Error },

    #[error("unknown user {user:?}")]
    UnknownUser { user: String },

    #[error("failed to set {stage} id for {user:?}: {source}")]
    PrivilegeDropFailed {
        stage: PrivilegeStage,
        user: String,
        source: io::Error,
    },

    #[error("failed to execute {}: {source}", .path.display())]
    ExecFailed { path: PathBuf, source: io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_reference_names_the_reference() {
        let err = LaunchError::InvalidReference {
            reference: "pkg'oops".to_string(),
        };
        assert!(err.to_string().contains("pkg'oops"));
    }

    #[test]
    fn fetch_failed_carries_exit_code() {
        let err = LaunchError::FetchFailed {
            code: 255,
            diagnostic: "copyToLocal: no such file".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("255"));
        assert!(message.contains("copyToLocal"));
    }

    #[test]
    fn directory_create_failed_names_the_path() {
        let err = LaunchError::DirectoryCreateFailed {
            path: PathBuf::from("/var/run/tasks/fw-1"),
            source: io::Error::from_raw_os_error(13),
        };
        assert!(err.to_string().contains("/var/run/tasks/fw-1"));
    }

    #[test]
    fn privilege_stage_display() {
        assert_eq!(PrivilegeStage::Group.to_string(), "group");
        assert_eq!(PrivilegeStage::User.to_string(), "user");
    }

    #[test]
    fn privilege_drop_names_stage_and_user() {
        let err = LaunchError::PrivilegeDropFailed {
            stage: PrivilegeStage::Group,
            user: "alice".to_string(),
            source: io::Error::from_raw_os_error(1),
        };
        let message = err.to_string();
        assert!(message.contains("group"));
        assert!(message.contains("alice"));
    }

    #[test]
    fn result_type() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}
