//! launcher-user: account lookup and privilege transition
//!
//! The drop to the task owner is performed once, irreversibly, immediately
//! before control passes to the executor. Group identity changes first:
//! after setuid has given up the launcher's privileges, setgid would fail.

use std::io;

use launcher_core::{LaunchError, PrivilegeStage, Result};
use log::debug;
use nix::unistd::{setgid, setuid, Gid, Uid, User};

/// Resolved OS account for a task owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub uid: Uid,
    pub gid: Gid,
}

/// Look up the task owner in the platform user database.
///
/// Fails with `UnknownUser` before any identity change is attempted, both
/// for a missing account and for a user database that cannot be read.
pub fn lookup(name: &str) -> Result<Account> {
    match User::from_name(name) {
        Ok(Some(user)) => Ok(Account {
            name: name.to_string(),
            uid: user.uid,
            gid: user.gid,
        }),
        Ok(None) | Err(_) => Err(LaunchError::UnknownUser {
            user: name.to_string(),
        }),
    }
}

/// Switch the current process to the given account: group id first, then
/// user id.
pub fn become_user(account: &Account) -> Result<()> {
    debug!(
        "switching to user {} (uid {}, gid {})",
        account.name, account.uid, account.gid
    );

    setgid(account.gid).map_err(|errno| LaunchError::PrivilegeDropFailed {
        stage: PrivilegeStage::Group,
        user: account.name.clone(),
        source: io::Error::from_raw_os_error(errno as i32),
    })?;

    setuid(account.uid).map_err(|errno| LaunchError::PrivilegeDropFailed {
        stage: PrivilegeStage::User,
        user: account.name.clone(),
        source: io::Error::from_raw_os_error(errno as i32),
    })
}

/// Look up `name` and drop to it in one step.
pub fn switch_user(name: &str) -> Result<()> {
    become_user(&lookup(name)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_account_is_reported_by_name() {
        let err = lookup("launcher-test-nosuchuser").unwrap_err();
        match err {
            LaunchError::UnknownUser { user } => {
                assert_eq!(user, "launcher-test-nosuchuser");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn root_account_resolves_to_uid_zero() {
        let account = lookup("root").unwrap();
        assert_eq!(account.uid, Uid::from_raw(0));
        assert_eq!(account.gid, Gid::from_raw(0));
    }

    #[test]
    fn becoming_the_current_identity_succeeds() {
        // setgid/setuid to the identity the process already has is permitted
        // without privileges, so the ordering path is exercisable in tests.
        let current = User::from_uid(Uid::current()).unwrap();
        let Some(current) = current else {
            return; // no passwd entry for the current uid; nothing to test
        };
        let account = Account {
            name: current.name.clone(),
            uid: current.uid,
            gid: current.gid,
        };

        become_user(&account).unwrap();
    }

    #[test]
    fn switch_user_fails_fast_on_unknown_account() {
        let err = switch_user("launcher-test-nosuchuser").unwrap_err();
        assert!(matches!(err, LaunchError::UnknownUser { .. }));
    }
}
