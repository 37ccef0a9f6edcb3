//! Post-build static asset copy.
//!
//! Files under the content directory whose extension is listed in config
//! are copied into the build output, keeping their relative paths. Existing
//! files in the output are never overwritten, so whatever the generator
//! emitted wins.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::AssetsConfig;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Invalid asset pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Asset source directory '{path}' does not exist")]
    SourceMissing { path: PathBuf },

    #[error("Failed to walk asset source directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Asset copy did not complete: {0}")]
    Interrupted(String),

    #[error("Failed to copy '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What a copy run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: usize,
    pub skipped_existing: usize,
}

/// Something that performs the post-build copy.
pub trait AssetCopier: Send + Sync {
    fn copy_assets(&self) -> Result<CopyReport, AssetError>;
}

/// `**/*.<ext>` for each extension, all lower-case variants then all
/// upper-case ones.
pub fn copy_globs(exts: &[String]) -> Vec<String> {
    let lower: Vec<String> = exts.iter().map(|e| e.to_lowercase()).collect();
    let upper: Vec<String> = lower.iter().map(|e| e.to_uppercase()).collect();
    lower
        .iter()
        .chain(upper.iter())
        .map(|ext| format!("**/*.{}", ext))
        .collect()
}

/// Non-overwriting recursive copy of matching files.
#[derive(Debug, Clone)]
pub struct StaticAssetCopier {
    source_dir: PathBuf,
    dest_dir: PathBuf,
    patterns: Vec<String>,
}

impl StaticAssetCopier {
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>, exts: &[String]) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            patterns: copy_globs(exts),
        }
    }

    /// Directories from config are relative to `project_root`.
    pub fn from_config(config: &AssetsConfig, project_root: &Path) -> Self {
        Self::new(
            project_root.join(&config.source_dir),
            project_root.join(&config.dest_dir),
            &config.copy_file_exts,
        )
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    fn glob_set(&self) -> Result<GlobSet, AssetError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|source| AssetError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            builder.add(glob);
        }
        builder.build().map_err(|source| AssetError::Pattern {
            pattern: self.patterns.join(", "),
            source,
        })
    }
}

impl AssetCopier for StaticAssetCopier {
    fn copy_assets(&self) -> Result<CopyReport, AssetError> {
        if !self.source_dir.is_dir() {
            return Err(AssetError::SourceMissing {
                path: self.source_dir.clone(),
            });
        }
        let globs = self.glob_set()?;
        let mut report = CopyReport::default();

        for entry in WalkDir::new(&self.source_dir) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.source_dir) else {
                continue;
            };
            if !globs.is_match(relative) {
                continue;
            }

            let dest = self.dest_dir.join(relative);
            if copy_new(entry.path(), &dest)? {
                report.copied += 1;
            } else {
                report.skipped_existing += 1;
            }
        }

        tracing::debug!(
            "Asset copy: {} copied, {} already present",
            report.copied,
            report.skipped_existing
        );
        Ok(report)
    }
}

/// Copy `src` to `dest` unless `dest` exists. Returns whether it copied.
fn copy_new(src: &Path, dest: &Path) -> Result<bool, AssetError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| AssetError::Io { path, source }
    };

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }

    let mut target = match OpenOptions::new().write(true).create_new(true).open(dest) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(io_err(dest)(e)),
    };
    let mut source = File::open(src).map_err(io_err(src))?;
    io::copy(&mut source, &mut target).map_err(io_err(dest))?;
    Ok(true)
}
