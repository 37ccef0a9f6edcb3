//! Tool location.
//!
//! The generator may be installed globally or only inside the project's
//! dependency tree. Each strategy is a [`Locator`]; a [`LocatorChain`] tries
//! them in order and the first hit wins.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::GeneratorConfig;
use crate::supervisor::CommandSpec;

/// A located executable, possibly run through an interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub path: PathBuf,
    pub interpreter: Option<String>,
}

impl Program {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            interpreter: None,
        }
    }

    pub fn with_interpreter(mut self, interpreter: Option<String>) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Command line running this program with `args`.
    pub fn command(&self, args: Vec<String>) -> CommandSpec {
        match &self.interpreter {
            Some(interpreter) => {
                let mut full = Vec::with_capacity(args.len() + 1);
                full.push(self.path.to_string_lossy().into_owned());
                full.extend(args);
                CommandSpec::new(interpreter, full)
            }
            None => CommandSpec::new(&self.path, args),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("Could not find {tool}. Looked in: {}", searched.join("; "))]
    NotFound { tool: String, searched: Vec<String> },
}

/// One way of finding a tool.
pub trait Locator {
    fn locate(&self) -> Option<Program>;

    /// Where this locator looks, for error messages.
    fn describe(&self) -> String;
}

/// Looks a bare executable name up on a search path.
pub struct SearchPathLocator {
    name: String,
    search_path: Option<OsString>,
}

impl SearchPathLocator {
    /// Search the process `PATH` at lookup time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            search_path: None,
        }
    }

    /// Search an explicit `PATH`-style list instead of the environment.
    pub fn with_search_path(name: impl Into<String>, search_path: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            search_path: Some(search_path.into()),
        }
    }
}

impl Locator for SearchPathLocator {
    fn locate(&self) -> Option<Program> {
        let search_path = match &self.search_path {
            Some(path) => path.clone(),
            None => std::env::var_os("PATH")?,
        };
        std::env::split_paths(&search_path)
            .map(|dir| dir.join(&self.name))
            .find(|candidate| is_executable(candidate))
            .map(Program::new)
    }

    fn describe(&self) -> String {
        format!("'{}' on PATH", self.name)
    }
}

/// Probes fixed script paths under a dependency directory.
pub struct ProbeLocator {
    modules_dir: PathBuf,
    module_names: Vec<String>,
    script_paths: Vec<PathBuf>,
    interpreter: Option<String>,
}

impl ProbeLocator {
    pub fn new(
        modules_dir: impl Into<PathBuf>,
        module_names: Vec<String>,
        script_paths: Vec<PathBuf>,
    ) -> Self {
        Self {
            modules_dir: modules_dir.into(),
            module_names,
            script_paths,
            interpreter: None,
        }
    }

    pub fn with_interpreter(mut self, interpreter: Option<String>) -> Self {
        self.interpreter = interpreter;
        self
    }

    fn candidates(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.module_names.iter().flat_map(move |module| {
            self.script_paths
                .iter()
                .map(move |script| self.modules_dir.join(module).join(script))
        })
    }
}

impl Locator for ProbeLocator {
    fn locate(&self) -> Option<Program> {
        if !self.modules_dir.is_dir() {
            return None;
        }
        self.candidates()
            .find(|candidate| candidate.is_file())
            .map(|path| Program::new(path).with_interpreter(self.interpreter.clone()))
    }

    fn describe(&self) -> String {
        let candidates: Vec<String> = self
            .candidates()
            .map(|p| p.display().to_string())
            .collect();
        candidates.join(", ")
    }
}

/// Tries locators in order.
pub struct LocatorChain {
    tool: String,
    locators: Vec<Box<dyn Locator>>,
}

impl LocatorChain {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            locators: Vec::new(),
        }
    }

    pub fn with(mut self, locator: impl Locator + 'static) -> Self {
        self.locators.push(Box::new(locator));
        self
    }

    pub fn locate(&self) -> Result<Program, LocateError> {
        for locator in &self.locators {
            if let Some(program) = locator.locate() {
                tracing::debug!(
                    "Located {} at {} via {}",
                    self.tool,
                    program.path.display(),
                    locator.describe()
                );
                return Ok(program);
            }
        }
        Err(LocateError::NotFound {
            tool: self.tool.clone(),
            searched: self.locators.iter().map(|l| l.describe()).collect(),
        })
    }
}

/// The generator lookup order: `PATH`, then the project's dependency tree.
pub fn generator_locator(config: &GeneratorConfig, project_root: &Path) -> LocatorChain {
    LocatorChain::new(&config.name)
        .with(SearchPathLocator::new(&config.name))
        .with(
            ProbeLocator::new(
                project_root.join(&config.modules_dir),
                config.module_names.clone(),
                config.script_paths.clone(),
            )
            .with_interpreter(config.interpreter.clone()),
        )
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
