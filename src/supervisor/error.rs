use thiserror::Error;

use crate::supervisor::process::ProcessRole;

#[derive(Debug, Error)]
pub enum SupervisorError {
    /// The OS refused to start the process (missing binary, permissions, ...).
    #[error("Failed to start {role} `{command}`: {source}")]
    Spawn {
        role: ProcessRole,
        command: String,
        #[source]
        source: std::io::Error,
    },
}
