//! launcher-rs: task executor bootstrap for a compute cluster slave
//!
//! Given a task's identity and a pointer to its executable, the launcher
//! prepares an isolated working directory, materializes the executable
//! (local path, remote fetch, or packaged bundle), computes the environment
//! the executor expects, optionally drops privileges to the task owner, and
//! replaces itself with the executor. On success it never returns; every
//! failure is terminal and reported to the embedding process.
//!
//! # Example
//!
//! ```ignore
//! use launcher_rs::{TaskLauncher, TaskLaunchSpec};
//!
//! let spec = TaskLaunchSpec { /* from the supervising process */ };
//! let error = TaskLauncher::new(spec).launch(); // only returns on failure
//! eprintln!("launch failed: {error}");
//! std::process::exit(1);
//! ```

pub mod exec;
pub mod launch;

// Re-export sub-crate types for convenience
pub use launcher_core::{
    self as core, LaunchError, PrivilegeStage, Result, SandboxOwnership, TaskLaunchSpec,
};
pub use launcher_env::{bootstrap_overlay, executor_overlay, EnvOverlay};
pub use launcher_fetch::{
    ExecutorResolver, ShellRunner, ToolOutcome, ToolRunner, ARCHIVE_SUFFIX, EXECUTOR_ENTRY,
    REMOTE_SCHEME,
};
pub use launcher_user::Account;

pub use launch::{
    DroppedPrivileges, LaunchEnvironment, PreparedSandbox, ResolvedExecutor, TaskLauncher,
};
