//! Argument assembler: preprocessor command lines in one place.

use crate::args::placement::PlacementTable;

/// Builder for the arguments passed to the preprocessor.
#[derive(Debug, Clone)]
pub struct ArgAssembler {
    args: Vec<String>,
}

impl ArgAssembler {
    /// Start with an empty arg list.
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Preprocessor action (`preprocess` or `watch`). Goes first.
    pub fn with_action(mut self, action: &str) -> Self {
        self.args.push(action.to_string());
        self
    }

    /// Arguments the router did not claim.
    pub fn with_pass_through(mut self, pass_through: &[String]) -> Self {
        self.args.extend(pass_through.iter().cloned());
        self
    }

    /// Resolved placements as `--<type> <strategy>` pairs.
    pub fn with_placements(mut self, placements: &PlacementTable) -> Self {
        self.args.extend(placements.to_flags());
        self
    }

    /// Build the final argument list.
    pub fn build(self) -> Vec<String> {
        self.args
    }
}

impl Default for ArgAssembler {
    fn default() -> Self {
        Self::new()
    }
}
