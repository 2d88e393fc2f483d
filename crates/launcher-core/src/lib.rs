//! launcher-core: shared types and errors for the task launcher
//!
//! This crate provides the foundational types used by all launcher sub-crates:
//! - Error taxonomy and Result alias
//! - The immutable task launch specification
//! - The sandbox ownership policy

pub mod error;
pub mod ownership;
pub mod spec;

pub use error::{LaunchError, PrivilegeStage, Result};
pub use ownership::SandboxOwnership;
pub use spec::TaskLaunchSpec;
