//! Process supervision for the preprocess → generate pipeline.
//!
//! ```text
//! Idle → PreprocessingBlocking ─┬─ failure ──────────────────────────→ Terminated
//!                               └─ success → GeneratingAndMaybeWatching → Terminated
//! ```
//!
//! Background processes report their exit over a single completion channel;
//! the [`Supervisor`] reacts to each [`ProcessEvent`] in arrival order.

mod command;
mod error;
mod launcher;
mod process;
mod runner;
mod state;

pub use command::CommandSpec;
pub use error::SupervisorError;
pub use launcher::{Launcher, ProcessHandle, TokioLauncher};
pub use process::{ExitInfo, ProcessEvent, ProcessRole};
pub use runner::{RunOutcome, RunPlan, Supervisor};
pub use state::{PipelinePhase, PipelineState, RoleState};
