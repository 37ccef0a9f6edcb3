use std::sync::Arc;

use tokio::sync::mpsc;

use crate::args::Mode;
use crate::assets::{AssetCopier, AssetError, CopyReport};
use crate::supervisor::command::CommandSpec;
use crate::supervisor::error::SupervisorError;
use crate::supervisor::launcher::{Launcher, ProcessHandle};
use crate::supervisor::process::{ProcessEvent, ProcessRole};
use crate::supervisor::state::{PipelinePhase, PipelineState, RoleState};

/// Everything the supervisor launches for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub mode: Mode,
    pub preprocess: CommandSpec,
    /// Present in develop mode only.
    pub watch: Option<CommandSpec>,
    pub generate: CommandSpec,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub exit_code: i32,
    pub state: PipelineState,
    /// Set when the asset copy ran and was awaited successfully.
    pub assets: Option<CopyReport>,
}

/// What to do about static assets after a build.
struct AssetStep {
    copier: Arc<dyn AssetCopier>,
    await_copy: bool,
}

/// Sequences the preprocessor, the watcher and the generator.
///
/// The preprocessor runs to completion first and nothing else starts unless
/// it succeeds. The watcher (develop only) and the generator then run side by
/// side; any watcher exit kills the generator, never the other way around.
pub struct Supervisor<L: Launcher> {
    launcher: L,
    assets: Option<AssetStep>,
}

impl<L: Launcher> Supervisor<L> {
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            assets: None,
        }
    }

    /// Copy static assets after the generator exits in build mode.
    ///
    /// With `await_copy` false the supervisor does not wait for the copy and
    /// its result never reaches the exit code. The copy still runs on a
    /// blocking task, so a runtime shutdown waits for it to finish.
    pub fn with_asset_copy(mut self, copier: Arc<dyn AssetCopier>, await_copy: bool) -> Self {
        self.assets = Some(AssetStep { copier, await_copy });
        self
    }

    pub async fn run(&self, plan: &RunPlan) -> Result<RunOutcome, SupervisorError> {
        let mut state = PipelineState::new();

        // Placements must be on disk before the generator reads anything.
        state.advance(PipelinePhase::PreprocessingBlocking);
        tracing::info!("$ {}", plan.preprocess);
        state.set_role(ProcessRole::Preprocessor, RoleState::Running);
        let pre = self
            .launcher
            .run_blocking(ProcessRole::Preprocessor, &plan.preprocess)?;
        state.set_role(ProcessRole::Preprocessor, RoleState::Exited(pre));

        if !pre.success() {
            tracing::error!("{} {}", plan.preprocess, pre);
            state.advance(PipelinePhase::Terminated);
            return Ok(RunOutcome {
                exit_code: pre.status_code(),
                state,
                assets: None,
            });
        }

        state.advance(PipelinePhase::GeneratingAndMaybeWatching);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut watcher = match &plan.watch {
            Some(watch) => {
                tracing::info!("$ {} &", watch);
                let handle = self.launcher.spawn(ProcessRole::Watcher, watch, tx.clone())?;
                log_started(&handle);
                state.set_role(ProcessRole::Watcher, RoleState::Running);
                Some(handle)
            }
            None => None,
        };

        tracing::info!("$ {}", plan.generate);
        let mut generator = match self
            .launcher
            .spawn(ProcessRole::Generator, &plan.generate, tx)
        {
            Ok(handle) => handle,
            Err(e) => {
                if let Some(mut watcher) = watcher.take() {
                    if watcher.kill() {
                        // The watcher must be gone before the error surfaces;
                        // the caller may drop the runtime right after.
                        while let Some(ProcessEvent::Exited { role, exit }) = rx.recv().await {
                            state.set_role(role, RoleState::Exited(exit));
                            if role == ProcessRole::Watcher {
                                break;
                            }
                        }
                    }
                }
                return Err(e);
            }
        };
        log_started(&generator);
        state.set_role(ProcessRole::Generator, RoleState::Running);

        let mut exit_code = 0;
        let mut assets = None;

        while state.running() > 0 {
            let Some(ProcessEvent::Exited { role, exit }) = rx.recv().await else {
                break;
            };
            state.set_role(role, RoleState::Exited(exit));

            match role {
                ProcessRole::Generator => {
                    let copy = match plan.mode {
                        Mode::Build => self.copy_assets().await,
                        Mode::Develop => Ok(None),
                    };
                    if exit.signal.is_some() {
                        tracing::error!("{} {}", plan.generate, exit);
                    }
                    if let Some(code) = exit.code.filter(|code| *code != 0) {
                        exit_code = code;
                    }
                    match copy {
                        Ok(report) => assets = report,
                        Err(e) => {
                            tracing::error!("Static asset copy failed: {}", e);
                            if exit_code == 0 {
                                exit_code = 1;
                            }
                        }
                    }
                }
                ProcessRole::Watcher => {
                    // The watcher should outlive the run; any exit is fatal.
                    if let Some(watch) = &plan.watch {
                        tracing::error!("{} {}", watch, exit);
                    }
                    if generator.kill() {
                        tracing::info!("Stopping {} after watcher exit", plan.generate);
                    }
                    exit_code = exit.status_code();
                }
                ProcessRole::Preprocessor => {
                    tracing::trace!("Ignoring unexpected preprocessor event");
                }
            }
        }

        state.advance(PipelinePhase::Terminated);
        Ok(RunOutcome {
            exit_code,
            state,
            assets,
        })
    }

    async fn copy_assets(&self) -> Result<Option<CopyReport>, AssetError> {
        let Some(step) = &self.assets else {
            return Ok(None);
        };
        tracing::info!("Copying integrated static content to build output");

        let copier = Arc::clone(&step.copier);
        let task = tokio::task::spawn_blocking(move || copier.copy_assets());
        if !step.await_copy {
            tracing::debug!("Not waiting for static asset copy");
            return Ok(None);
        }

        match task.await {
            Ok(result) => result.map(Some),
            Err(e) => Err(AssetError::Interrupted(e.to_string())),
        }
    }
}

fn log_started(handle: &ProcessHandle) {
    match handle.pid() {
        Some(pid) => tracing::debug!("{} started (pid {})", handle.role(), pid),
        None => tracing::debug!("{} started", handle.role()),
    }
}
