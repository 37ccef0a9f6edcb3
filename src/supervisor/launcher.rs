//! Process launching, behind a trait so the supervisor can be driven by a
//! scripted launcher in tests.

use std::process::Stdio;

use tokio::sync::{mpsc, oneshot};

use crate::supervisor::command::CommandSpec;
use crate::supervisor::error::SupervisorError;
use crate::supervisor::process::{ExitInfo, ProcessEvent, ProcessRole};

/// Starts supervised processes.
pub trait Launcher {
    /// Run to completion, blocking the caller until the process exits.
    fn run_blocking(
        &self,
        role: ProcessRole,
        command: &CommandSpec,
    ) -> Result<ExitInfo, SupervisorError>;

    /// Start without waiting. Exactly one [`ProcessEvent::Exited`] for `role`
    /// is sent on `events` once the process is gone.
    ///
    /// Must be called from within a tokio runtime.
    fn spawn(
        &self,
        role: ProcessRole,
        command: &CommandSpec,
        events: mpsc::UnboundedSender<ProcessEvent>,
    ) -> Result<ProcessHandle, SupervisorError>;
}

/// Handle to a background process. Dropping it does not kill the process.
#[derive(Debug)]
pub struct ProcessHandle {
    role: ProcessRole,
    pid: Option<u32>,
    kill: Option<oneshot::Sender<()>>,
}

impl ProcessHandle {
    /// `kill` is fired at most once; the receiving side terminates the process.
    pub fn new(role: ProcessRole, pid: Option<u32>, kill: oneshot::Sender<()>) -> Self {
        Self {
            role,
            pid,
            kill: Some(kill),
        }
    }

    pub fn role(&self) -> ProcessRole {
        self.role
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Request forcible termination.
    ///
    /// Returns false if the process had already exited or a kill was already
    /// requested.
    pub fn kill(&mut self) -> bool {
        match self.kill.take() {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }
}

/// Launches real OS processes with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioLauncher;

impl TokioLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Launcher for TokioLauncher {
    fn run_blocking(
        &self,
        role: ProcessRole,
        command: &CommandSpec,
    ) -> Result<ExitInfo, SupervisorError> {
        let status = std::process::Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| spawn_error(role, command, source))?;
        Ok(ExitInfo::from(status))
    }

    fn spawn(
        &self,
        role: ProcessRole,
        command: &CommandSpec,
        events: mpsc::UnboundedSender<ProcessEvent>,
    ) -> Result<ProcessHandle, SupervisorError> {
        let mut child = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| spawn_error(role, command, source))?;
        let pid = child.id();
        let (kill_tx, kill_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let status = tokio::select! {
                status = child.wait() => status,
                Ok(()) = kill_rx => {
                    if let Err(e) = child.start_kill() {
                        tracing::warn!("Failed to kill {}: {}", role, e);
                    }
                    child.wait().await
                }
            };
            let exit = match status {
                Ok(status) => ExitInfo::from(status),
                Err(e) => {
                    tracing::warn!("Failed to read exit status of {}: {}", role, e);
                    ExitInfo::default()
                }
            };
            if events.send(ProcessEvent::Exited { role, exit }).is_err() {
                tracing::trace!("{} exit dropped (supervisor gone)", role);
            }
        });

        Ok(ProcessHandle::new(role, pid, kill_tx))
    }
}

fn spawn_error(role: ProcessRole, command: &CommandSpec, source: std::io::Error) -> SupervisorError {
    SupervisorError::Spawn {
        role,
        command: command.to_string(),
        source,
    }
}
