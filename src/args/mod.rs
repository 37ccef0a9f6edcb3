//! Argument handling pipeline for siterun.
//!
//! ```text
//! User Input → Route → Resolve placements → Assemble → RunPlan
//! ```
//!
//! Routing splits placement overrides (`--md link`) away from the
//! arguments that belong to the preprocessor. Resolution merges those
//! overrides over the per-mode defaults, and assembly turns the result back
//! into command lines. Each stage is a pure function.

mod assembler;
mod content_type;
mod pipeline;
mod placement;
mod router;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use assembler::ArgAssembler;
pub use content_type::{ContentType, PlacementStrategy};
pub use pipeline::{build_pipeline_params, resolve_placement_args, PipelineParams, ResolvedArgs};
pub use placement::{PlacementEntry, PlacementTable, PlacementTableError};
pub use router::{route, RoutedArgs};

/// Which run profile the pipeline is driven in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// One-shot preprocess + generate, followed by the static asset copy.
    Build,
    /// Preprocess, then watch for edits while the generator's dev server runs.
    Develop,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Build, Mode::Develop];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Build => "build",
            Mode::Develop => "develop",
        }
    }

    /// Parse the mode positional, treating absence as a usage error.
    pub fn from_arg(arg: Option<&str>) -> Result<Self, UsageError> {
        match arg {
            Some(value) => value.parse(),
            None => Err(UsageError::MissingMode),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UsageError::InvalidMode(s.to_string()))
    }
}

/// Problems with the command line itself, detected before anything runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Missing command. Must give 'develop' or 'build'.")]
    MissingMode,

    #[error("Invalid command '{0}'. Must give 'develop' or 'build'.")]
    InvalidMode(String),
}
