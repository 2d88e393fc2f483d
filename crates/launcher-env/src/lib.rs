//! launcher-env: environment overlay computation
//!
//! The executor receives all task configuration through environment
//! variables, not argv. The exporter here is a pure function from the launch
//! spec to an immutable overlay; the overlay is merged into the inherited
//! environment at exec time, and the launcher's own process environment is
//! never mutated.

use launcher_core::TaskLaunchSpec;

/// Prefix marking a task parameter as an environment variable export
pub const ENV_PARAM_PREFIX: &str = "env.";

/// Address of the supervising slave process
pub const SLAVE_PID_VAR: &str = "MESOS_SLAVE_PID";
/// Framework identity, passed through verbatim
pub const FRAMEWORK_ID_VAR: &str = "MESOS_FRAMEWORK_ID";
/// Port 0 asks the executor's runtime to bind any free port
pub const LIBPROCESS_PORT_VAR: &str = "LIBPROCESS_PORT";
/// Cluster installation root, for executors that need its libraries
pub const MESOS_HOME_VAR: &str = "MESOS_HOME";

/// Executor reference, export-only mode
pub const EXECUTOR_URI_VAR: &str = "MESOS_EXECUTOR_URI";
/// Task owner account name, export-only mode
pub const USER_VAR: &str = "MESOS_USER";
/// Working directory, export-only mode
pub const WORK_DIRECTORY_VAR: &str = "MESOS_WORK_DIRECTORY";
/// Remote-filesystem client root, export-only mode
pub const HADOOP_HOME_VAR: &str = "MESOS_HADOOP_HOME";
/// Io-redirect flag ("1"/"0"), export-only mode
pub const REDIRECT_IO_VAR: &str = "MESOS_REDIRECT_IO";
/// Switch-user flag ("1"/"0"), export-only mode
pub const SWITCH_USER_VAR: &str = "MESOS_SWITCH_USER";

/// Insertion-ordered set of environment variables; setting a name that is
/// already present overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverlay {
    vars: Vec<(String, String)>,
}

impl EnvOverlay {
    pub fn new() -> Self {
        EnvOverlay::default()
    }

    /// Set a variable, overwriting any existing value of that name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some((_, existing)) = self.vars.iter_mut().find(|(n, _)| *n == name) {
            *existing = value;
        } else {
            self.vars.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// The inherited environment with this overlay applied on top.
    pub fn merged_with_ambient(&self) -> Vec<(String, String)> {
        let mut combined: Vec<(String, String)> = std::env::vars().collect();
        for (name, value) in &self.vars {
            if let Some((_, existing)) = combined.iter_mut().find(|(n, _)| n == name) {
                *existing = value.clone();
            } else {
                combined.push((name.clone(), value.clone()));
            }
        }
        combined
    }
}

/// Environment handed to the executor itself: `env.`-prefixed task
/// parameters first, then the fixed cluster-identity variables on top.
pub fn executor_overlay(spec: &TaskLaunchSpec) -> EnvOverlay {
    let mut overlay = EnvOverlay::new();

    for (key, value) in &spec.params {
        if let Some(name) = key.strip_prefix(ENV_PARAM_PREFIX) {
            overlay.set(name, value.clone());
        }
    }

    overlay.set(SLAVE_PID_VAR, spec.slave_pid.clone());
    overlay.set(FRAMEWORK_ID_VAR, spec.framework_id.clone());
    overlay.set(LIBPROCESS_PORT_VAR, "0");
    if let Some(home) = &spec.mesos_home {
        overlay.set(MESOS_HOME_VAR, home.clone());
    }

    overlay
}

/// Environment for an intermediate bootstrap process: the executor overlay
/// plus the full launch spec, so a downstream process can reconstruct an
/// equivalent launch decision purely from its environment.
pub fn bootstrap_overlay(spec: &TaskLaunchSpec) -> EnvOverlay {
    let mut overlay = executor_overlay(spec);

    overlay.set(FRAMEWORK_ID_VAR, spec.framework_id.clone());
    overlay.set(EXECUTOR_URI_VAR, spec.executor_ref.clone());
    overlay.set(USER_VAR, spec.user.clone());
    overlay.set(
        WORK_DIRECTORY_VAR,
        spec.work_directory.to_string_lossy().into_owned(),
    );
    overlay.set(SLAVE_PID_VAR, spec.slave_pid.clone());
    // Unset home paths are exported as empty strings, the wire format
    // downstream consumers have always parsed.
    overlay.set(MESOS_HOME_VAR, spec.mesos_home.clone().unwrap_or_default());
    overlay.set(HADOOP_HOME_VAR, spec.hadoop_home.clone().unwrap_or_default());
    overlay.set(REDIRECT_IO_VAR, flag(spec.redirect_io));
    overlay.set(SWITCH_USER_VAR, flag(spec.should_switch_user));

    overlay
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
