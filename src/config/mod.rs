//! TOML configuration: tool commands, placement defaults, asset copy.

mod loader;
mod types;

pub use loader::{ConfigError, PROJECT_CONFIG_FILE};
pub use types::{AssetsConfig, Config, GeneratorConfig, PlacementDefaults, PreprocessorConfig};
