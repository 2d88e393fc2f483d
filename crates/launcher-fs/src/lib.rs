//! launcher-fs: sandbox filesystem plumbing for the task launcher
//!
//! Creates and enters the per-task working directory and, when asked,
//! redirects the launcher's stdio into files inside it.

pub mod redirect;
pub mod workdir;

pub use redirect::{redirect_stdio, STDERR_FILE, STDOUT_FILE};
