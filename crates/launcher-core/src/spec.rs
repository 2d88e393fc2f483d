//! Task launch specification
//!
//! A `TaskLaunchSpec` is constructed once from caller-supplied fields and
//! never mutated; the launcher threads it through every stage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Everything the launcher needs to know about one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLaunchSpec {
    /// Opaque framework identity, passed through to the executor verbatim
    pub framework_id: String,
    /// Executable reference: a local filesystem path or an `hdfs://` URI
    pub executor_ref: String,
    /// OS account the executor runs as when `should_switch_user` is set
    pub user: String,
    /// Directory to create and enter before the executable is resolved
    pub work_directory: PathBuf,
    /// Address of the supervising slave process
    pub slave_pid: String,
    /// Cluster installation root; `None` means unset
    pub mesos_home: Option<String>,
    /// Remote-filesystem client installation root; `None` means unset
    pub hadoop_home: Option<String>,
    /// Redirect stdout/stderr into files inside the working directory
    pub redirect_io: bool,
    /// Drop privileges to `user` before handing control to the executor
    pub should_switch_user: bool,
    /// Free-form task parameters; keys prefixed `env.` become environment
    /// variables with the prefix stripped
    pub params: BTreeMap<String, String>,
}
