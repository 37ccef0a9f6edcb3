use crate::supervisor::process::{ExitInfo, ProcessRole};

/// Orchestrator-level phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    Idle,
    PreprocessingBlocking,
    GeneratingAndMaybeWatching,
    Terminated,
}

/// Lifecycle of a single supervised process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleState {
    NotStarted,
    Running,
    Exited(ExitInfo),
}

/// Phase history and per-role state for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineState {
    history: Vec<PipelinePhase>,
    roles: [(ProcessRole, RoleState); 3],
}

impl PipelineState {
    pub fn new() -> Self {
        Self {
            history: vec![PipelinePhase::Idle],
            roles: ProcessRole::ALL.map(|role| (role, RoleState::NotStarted)),
        }
    }

    pub fn phase(&self) -> PipelinePhase {
        self.history
            .last()
            .copied()
            .unwrap_or(PipelinePhase::Idle)
    }

    /// Every phase entered so far, starting with `Idle`.
    pub fn history(&self) -> &[PipelinePhase] {
        &self.history
    }

    /// Advance to the next phase.
    pub fn advance(&mut self, phase: PipelinePhase) {
        self.history.push(phase);
        tracing::debug!("Pipeline phase: {:?}", phase);
    }

    pub fn role(&self, role: ProcessRole) -> RoleState {
        self.roles
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, state)| *state)
            .unwrap_or(RoleState::NotStarted)
    }

    pub fn set_role(&mut self, role: ProcessRole, state: RoleState) {
        if let Some((_, slot)) = self.roles.iter_mut().find(|(r, _)| *r == role) {
            *slot = state;
        }
    }

    /// Roles that were launched and have not exited yet.
    pub fn running(&self) -> usize {
        self.roles
            .iter()
            .filter(|(_, state)| *state == RoleState::Running)
            .count()
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}
