//! launcher-fetch: executor resolution for the task launcher
//!
//! Validates executor references, copies remote references out of the
//! distributed store, unpacks packaged bundles, and hands back one local
//! executable path. The external tools doing the actual work sit behind
//! [`ToolRunner`] so they can be faked in tests.

pub mod command;
pub mod resolver;

pub use command::{ShellRunner, ToolOutcome, ToolRunner};
pub use resolver::{ExecutorResolver, ARCHIVE_SUFFIX, EXECUTOR_ENTRY, REMOTE_SCHEME};
