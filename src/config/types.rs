use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::args::{Mode, PlacementTable};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub preprocessor: PreprocessorConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub placement: PlacementDefaults,
    #[serde(default)]
    pub assets: AssetsConfig,
}

/// How to invoke the content preprocessor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    /// Executable, relative to the working directory or on `PATH`.
    #[serde(default = "default_preprocessor_command")]
    pub command: String,
    /// First argument for the blocking run.
    #[serde(default = "default_preprocess_action")]
    pub preprocess_action: String,
    /// First argument for the develop-mode watcher.
    #[serde(default = "default_watch_action")]
    pub watch_action: String,
}

/// Where to find the site generator.
///
/// Looked up by `name` on `PATH` first, then probed as
/// `<modules_dir>/<module>/<script>` under the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_generator_name")]
    pub name: String,
    #[serde(default = "default_modules_dir")]
    pub modules_dir: PathBuf,
    #[serde(default = "default_module_names")]
    pub module_names: Vec<String>,
    #[serde(default = "default_script_paths")]
    pub script_paths: Vec<PathBuf>,
    /// Interpreter for probed scripts. `None` runs the script directly.
    #[serde(default = "default_interpreter")]
    pub interpreter: Option<String>,
}

/// Default placement strategy tables, one per mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementDefaults {
    #[serde(default = "default_placements")]
    pub build: PlacementTable,
    #[serde(default = "default_placements")]
    pub develop: PlacementTable,
}

/// Post-build static asset copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// File extensions (without the dot) copied from `source_dir` to `dest_dir`.
    #[serde(default = "default_copy_file_exts")]
    pub copy_file_exts: Vec<String>,
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    #[serde(default = "default_dest_dir")]
    pub dest_dir: PathBuf,
    /// Wait for the copy before exiting (default: true).
    #[serde(default = "default_await_copy")]
    pub await_copy: bool,
}

impl PlacementDefaults {
    pub fn for_mode(&self, mode: Mode) -> &PlacementTable {
        match mode {
            Mode::Build => &self.build,
            Mode::Develop => &self.develop,
        }
    }
}

fn default_preprocessor_command() -> String {
    "src/build/preprocess.mjs".to_string()
}

fn default_preprocess_action() -> String {
    "preprocess".to_string()
}

fn default_watch_action() -> String {
    "watch".to_string()
}

fn default_generator_name() -> String {
    "gridsome".to_string()
}

fn default_modules_dir() -> PathBuf {
    PathBuf::from("node_modules")
}

fn default_module_names() -> Vec<String> {
    vec!["gridsome".to_string(), "@gridsome".to_string()]
}

fn default_script_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("bin/gridsome.js"),
        PathBuf::from("cli/bin/gridsome.js"),
    ]
}

fn default_interpreter() -> Option<String> {
    Some("node".to_string())
}

// The dev server's hot reloader mishandles links, and links to Markdown risk
// edits landing on the originals, so everything defaults to copies.
fn default_placements() -> PlacementTable {
    PlacementTable::uniform("copy")
}

fn default_copy_file_exts() -> Vec<String> {
    ["jpg", "jpeg", "png", "gif", "svg", "webp", "pdf"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_dest_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_await_copy() -> bool {
    true
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            command: default_preprocessor_command(),
            preprocess_action: default_preprocess_action(),
            watch_action: default_watch_action(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            name: default_generator_name(),
            modules_dir: default_modules_dir(),
            module_names: default_module_names(),
            script_paths: default_script_paths(),
            interpreter: default_interpreter(),
        }
    }
}

impl Default for PlacementDefaults {
    fn default() -> Self {
        Self {
            build: default_placements(),
            develop: default_placements(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            copy_file_exts: default_copy_file_exts(),
            source_dir: default_source_dir(),
            dest_dir: default_dest_dir(),
            await_copy: default_await_copy(),
        }
    }
}
