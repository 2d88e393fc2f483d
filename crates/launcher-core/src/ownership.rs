//! Sandbox ownership policy
//!
//! The launcher historically left the working directory owned by whatever
//! identity created it, even when the executor itself runs as the task user.
//! That can leave a switched-user executor unable to write into its own
//! sandbox, so the behavior is a policy choice rather than a constant.

use serde::{Deserialize, Serialize};

/// Who owns the working directory after it is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SandboxOwnership {
    /// Leave ownership with the launching identity. This matches the
    /// historical behavior of the cluster this launcher serves.
    #[default]
    Launcher,

    /// Hand the sandbox root to the task account right after creation.
    /// Only meaningful together with a user switch.
    TaskUser,
}

impl SandboxOwnership {
    /// Whether the sandbox root should be chowned to the task account
    pub fn assigns_to_task_user(&self) -> bool {
        matches!(self, SandboxOwnership::TaskUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_launcher() {
        assert_eq!(SandboxOwnership::default(), SandboxOwnership::Launcher);
    }

    #[test]
    fn launcher_keeps_ownership() {
        assert!(!SandboxOwnership::Launcher.assigns_to_task_user());
    }

    #[test]
    fn task_user_assigns_ownership() {
        assert!(SandboxOwnership::TaskUser.assigns_to_task_user());
    }
}
