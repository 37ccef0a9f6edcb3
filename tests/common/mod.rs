//! Shared test utilities: a scripted launcher, a counting asset copier and
//! temp project scaffolding.

#![allow(dead_code, unused_imports)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use siterun::assets::{AssetCopier, AssetError, CopyReport};
use siterun::supervisor::{
    CommandSpec, ExitInfo, Launcher, ProcessEvent, ProcessHandle, ProcessRole, SupervisorError,
};
use tokio::sync::{mpsc, oneshot};

/// Signal number the fake reports for killed processes.
pub const SIGKILL: i32 = 9;

/// How a scripted process behaves.
#[derive(Debug, Clone, Copy)]
pub enum Script {
    /// Exit right away.
    Exit(ExitInfo),
    /// Exit after a delay unless killed first.
    ExitAfter(Duration, ExitInfo),
    /// Run until killed.
    RunUntilKilled,
    /// Fail to start.
    FailToStart,
}

#[derive(Debug, Default)]
struct Record {
    launches: Vec<(ProcessRole, CommandSpec)>,
    kills: Vec<ProcessRole>,
}

/// Launcher that follows per-role scripts and records what happened.
#[derive(Clone, Default)]
pub struct ScriptedLauncher {
    scripts: HashMap<ProcessRole, Script>,
    record: Arc<Mutex<Record>>,
}

impl ScriptedLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, role: ProcessRole, script: Script) -> Self {
        self.scripts.insert(role, script);
        self
    }

    fn script_for(&self, role: ProcessRole) -> Script {
        self.scripts
            .get(&role)
            .copied()
            .unwrap_or(Script::Exit(ExitInfo::code(0)))
    }

    pub fn launched_roles(&self) -> Vec<ProcessRole> {
        let record = self.record.lock().unwrap();
        record.launches.iter().map(|(role, _)| *role).collect()
    }

    pub fn command_for(&self, role: ProcessRole) -> Option<CommandSpec> {
        let record = self.record.lock().unwrap();
        record
            .launches
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, cmd)| cmd.clone())
    }

    pub fn killed_roles(&self) -> Vec<ProcessRole> {
        self.record.lock().unwrap().kills.clone()
    }

    fn start_failure(role: ProcessRole, command: &CommandSpec) -> SupervisorError {
        SupervisorError::Spawn {
            role,
            command: command.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted failure"),
        }
    }
}

impl Launcher for ScriptedLauncher {
    fn run_blocking(
        &self,
        role: ProcessRole,
        command: &CommandSpec,
    ) -> Result<ExitInfo, SupervisorError> {
        let script = self.script_for(role);
        if let Script::FailToStart = script {
            return Err(Self::start_failure(role, command));
        }
        self.record
            .lock()
            .unwrap()
            .launches
            .push((role, command.clone()));
        match script {
            Script::Exit(exit) | Script::ExitAfter(_, exit) => Ok(exit),
            Script::RunUntilKilled | Script::FailToStart => Ok(ExitInfo::code(0)),
        }
    }

    fn spawn(
        &self,
        role: ProcessRole,
        command: &CommandSpec,
        events: mpsc::UnboundedSender<ProcessEvent>,
    ) -> Result<ProcessHandle, SupervisorError> {
        let script = self.script_for(role);
        if let Script::FailToStart = script {
            return Err(Self::start_failure(role, command));
        }
        self.record
            .lock()
            .unwrap()
            .launches
            .push((role, command.clone()));

        let (kill_tx, kill_rx) = oneshot::channel::<()>();
        let record = Arc::clone(&self.record);
        let killed = move || {
            record.lock().unwrap().kills.push(role);
            ExitInfo::signal(SIGKILL)
        };

        tokio::spawn(async move {
            let exit = match script {
                Script::Exit(exit) => {
                    tokio::task::yield_now().await;
                    exit
                }
                Script::ExitAfter(delay, exit) => {
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => exit,
                        Ok(()) = kill_rx => killed(),
                    }
                }
                Script::RunUntilKilled => match kill_rx.await {
                    Ok(()) => killed(),
                    // Supervisor dropped the handle without killing.
                    Err(_) => return,
                },
                Script::FailToStart => return,
            };
            let _ = events.send(ProcessEvent::Exited { role, exit });
        });

        Ok(ProcessHandle::new(role, None, kill_tx))
    }
}

/// Asset copier that counts calls and returns a fixed result.
#[derive(Default)]
pub struct CountingCopier {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingCopier {
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AssetCopier for CountingCopier {
    fn copy_assets(&self) -> Result<CopyReport, AssetError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AssetError::SourceMissing {
                path: PathBuf::from("content"),
            });
        }
        Ok(CopyReport {
            copied: 1,
            skipped_existing: 0,
        })
    }
}

pub fn raw_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Write a file, creating parent directories.
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// Write a shell script and make it executable.
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;
    write_file(path, &format!("#!/bin/sh\n{}\n", body));
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}
