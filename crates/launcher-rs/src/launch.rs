//! Staged launch pipeline
//!
//! The five stages run strictly in order, and each stage consumes the
//! previous stage's output type, so reordering them is a compile-visible
//! change. The ordering carries the safety invariants: fetch and extraction
//! run with the launcher's original identity, the environment is computed
//! before any privileges are given up, and the privilege drop is the last
//! thing that happens before exec.

use std::convert::Infallible;
use std::path::PathBuf;

use launcher_core::{LaunchError, Result, SandboxOwnership, TaskLaunchSpec};
use launcher_env::{executor_overlay, EnvOverlay};
use launcher_fetch::{ExecutorResolver, ShellRunner, ToolRunner};
use launcher_user::Account;
use log::info;

use crate::exec;

/// Stage 1 output: the working directory exists and is the current directory.
#[derive(Debug)]
pub struct PreparedSandbox {
    path: PathBuf,
}

impl PreparedSandbox {
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

/// Stage 2 output: a local executable path. After a bundle extraction the
/// current directory has moved inside the bundle and the path is relative
/// to it.
#[derive(Debug)]
pub struct ResolvedExecutor {
    path: PathBuf,
}

impl ResolvedExecutor {
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

/// Stage 3 output: the environment overlay the executor will see.
#[derive(Debug)]
pub struct LaunchEnvironment {
    overlay: EnvOverlay,
}

impl LaunchEnvironment {
    pub fn overlay(&self) -> &EnvOverlay {
        &self.overlay
    }
}

/// Stage 4 output: the process identity now matches the task owner, or was
/// deliberately left alone.
#[derive(Debug)]
pub struct DroppedPrivileges {
    account: Option<Account>,
}

impl DroppedPrivileges {
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }
}

/// Bootstraps one task executor and replaces itself with it.
pub struct TaskLauncher<R: ToolRunner = ShellRunner> {
    spec: TaskLaunchSpec,
    runner: R,
    ownership: SandboxOwnership,
}

impl TaskLauncher<ShellRunner> {
    /// Launcher with the production tool runner.
    pub fn new(spec: TaskLaunchSpec) -> Self {
        TaskLauncher::with_runner(spec, ShellRunner)
    }
}

impl<R: ToolRunner> TaskLauncher<R> {
    /// Launcher with a caller-supplied tool runner, for tests and embeddings
    /// that fake the remote-filesystem client or the extractor.
    pub fn with_runner(spec: TaskLaunchSpec, runner: R) -> Self {
        TaskLauncher {
            spec,
            runner,
            ownership: SandboxOwnership::default(),
        }
    }

    /// Select who owns the sandbox after creation.
    pub fn sandbox_ownership(mut self, ownership: SandboxOwnership) -> Self {
        self.ownership = ownership;
        self
    }

    pub fn spec(&self) -> &TaskLaunchSpec {
        &self.spec
    }

    /// Stage 1: create the working directory tree, optionally hand it to the
    /// task account, enter it, and redirect stdio into it if asked.
    pub fn prepare_sandbox(&self) -> Result<PreparedSandbox> {
        launcher_fs::workdir::create(&self.spec.work_directory)?;

        if self.ownership.assigns_to_task_user() && self.spec.should_switch_user {
            let account = launcher_user::lookup(&self.spec.user)?;
            launcher_fs::workdir::assign_owner(&self.spec.work_directory, account.uid, account.gid)?;
        }

        launcher_fs::workdir::enter(&self.spec.work_directory)?;

        if self.spec.redirect_io {
            launcher_fs::redirect::redirect_stdio()?;
        }

        Ok(PreparedSandbox {
            path: self.spec.work_directory.clone(),
        })
    }

    /// Stage 2: materialize a local executable from the reference. Runs with
    /// the launcher's identity; a remote fetch may need credentials the task
    /// owner lacks.
    pub fn resolve_executor(&self, _sandbox: &PreparedSandbox) -> Result<ResolvedExecutor> {
        let resolver = ExecutorResolver::new(&self.runner, self.spec.hadoop_home.as_deref());
        let path = resolver.resolve(&self.spec.executor_ref)?;
        Ok(ResolvedExecutor { path })
    }

    /// Stage 3: compute the environment overlay the executor will see.
    pub fn export_environment(&self, _executor: &ResolvedExecutor) -> LaunchEnvironment {
        LaunchEnvironment {
            overlay: executor_overlay(&self.spec),
        }
    }

    /// Stage 4: drop to the task owner when the spec asks for it.
    pub fn switch_user(&self, _environment: &LaunchEnvironment) -> Result<DroppedPrivileges> {
        if !self.spec.should_switch_user {
            return Ok(DroppedPrivileges { account: None });
        }

        let account = launcher_user::lookup(&self.spec.user)?;
        launcher_user::become_user(&account)?;

        Ok(DroppedPrivileges {
            account: Some(account),
        })
    }

    /// Stage 5: hand the process over to the executor. Returns only on
    /// failure.
    pub fn replace_process(
        &self,
        executor: ResolvedExecutor,
        environment: LaunchEnvironment,
        _privileges: DroppedPrivileges,
    ) -> Result<Infallible> {
        info!("handing control to {}", executor.path.display());
        exec::replace_process(&executor.path, &environment.overlay)
    }

    /// Run every stage in order. On success the process image has been
    /// replaced and this never returns; the returned error is the only
    /// observable outcome.
    pub fn launch(self) -> LaunchError {
        match self.try_launch() {
            Ok(never) => match never {},
            Err(error) => error,
        }
    }

    fn try_launch(&self) -> Result<Infallible> {
        info!(
            "launching executor {} for framework {}",
            self.spec.executor_ref, self.spec.framework_id
        );

        let sandbox = self.prepare_sandbox()?;
        let executor = self.resolve_executor(&sandbox)?;
        let environment = self.export_environment(&executor);
        let privileges = self.switch_user(&environment)?;
        self.replace_process(executor, environment, privileges)
    }

    /// Export-only mode: the environment a separate bootstrap process needs
    /// to reconstruct this launch decision, without resolving or exec'ing
    /// anything here.
    pub fn bootstrap_environment(&self) -> EnvOverlay {
        launcher_env::bootstrap_overlay(&self.spec)
    }
}
