//! Working-directory preparation
//!
//! Every path segment is created as a directory, segments that already exist
//! are tolerated, and any other creation error is fatal. A fully pre-existing
//! tree is left untouched.

use std::fs::DirBuilder;
use std::io;
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;

use launcher_core::{LaunchError, Result};
use nix::unistd::{chdir, chown, Gid, Uid};

/// Mode for every created path segment: owner rwx, group/other r-x
const WORKDIR_MODE: u32 = 0o755;

/// Create the working directory tree.
pub fn create(path: &Path) -> Result<()> {
    DirBuilder::new()
        .recursive(true)
        .mode(WORKDIR_MODE)
        .create(path)
        .map_err(|source| LaunchError::DirectoryCreateFailed {
            path: path.to_path_buf(),
            source,
        })
}

/// Enter the working directory. Fetch and extraction write relative to it,
/// so this must happen before the executable is resolved.
pub fn enter(path: &Path) -> Result<()> {
    chdir(path).map_err(|errno| LaunchError::ChdirFailed {
        path: path.to_path_buf(),
        source: io::Error::from_raw_os_error(errno as i32),
    })
}

/// Hand the sandbox root to the task account.
pub fn assign_owner(path: &Path, uid: Uid, gid: Gid) -> Result<()> {
    chown(path, Some(uid), Some(gid)).map_err(|errno| LaunchError::ChownFailed {
        path: path.to_path_buf(),
        source: io::Error::from_raw_os_error(errno as i32),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    #[test]
    fn creates_nested_directories() {
        let root = tempdir().unwrap();
        let target = root.path().join("tasks/fw-1/run-0");

        create(&target).unwrap();

        assert!(target.is_dir());
    }

    #[test]
    fn created_segments_are_owner_accessible() {
        let root = tempdir().unwrap();
        let target = root.path().join("sandbox");

        create(&target).unwrap();

        // The requested mode is 0o755; the ambient umask may clear group and
        // other bits, but never the owner's.
        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & 0o700, 0o700);
        assert_eq!(mode & !WORKDIR_MODE, 0);
    }

    #[test]
    fn existing_directory_is_tolerated() {
        let root = tempdir().unwrap();
        let target = root.path().join("tasks/fw-1");

        create(&target).unwrap();
        fs::write(target.join("marker"), b"kept").unwrap();

        create(&target).unwrap();

        assert_eq!(fs::read(target.join("marker")).unwrap(), b"kept");
    }

    #[test]
    fn create_under_nondirectory_fails() {
        let root = tempdir().unwrap();
        let file = root.path().join("occupied");
        fs::write(&file, b"").unwrap();

        let err = create(&file.join("child")).unwrap_err();

        assert!(matches!(err, LaunchError::DirectoryCreateFailed { .. }));
    }

    #[test]
    fn enter_missing_directory_fails() {
        let root = tempdir().unwrap();

        let err = enter(&root.path().join("nowhere")).unwrap_err();

        assert!(matches!(err, LaunchError::ChdirFailed { .. }));
    }

    #[test]
    fn assign_owner_to_current_identity_succeeds() {
        let root = tempdir().unwrap();
        let target = root.path().join("sandbox");
        create(&target).unwrap();

        assign_owner(&target, Uid::current(), Gid::current()).unwrap();
    }
}
