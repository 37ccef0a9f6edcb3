//! Content types: the closed set of placement flags the router recognizes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A category of source content that the preprocessor can place differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Markdown documents.
    Md,
    /// Component files handed to the generator's page compiler.
    Vue,
    /// Snippets inserted into other documents.
    Insert,
    /// Everything else (images, data files, ...).
    Resource,
}

impl ContentType {
    /// Every content type, in canonical order.
    pub const ALL: [ContentType; 4] = [
        ContentType::Md,
        ContentType::Vue,
        ContentType::Insert,
        ContentType::Resource,
    ];

    /// Name as it appears after `--` on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ContentType::Md => "md",
            ContentType::Vue => "vue",
            ContentType::Insert => "insert",
            ContentType::Resource => "resource",
        }
    }

    /// Long flag form, e.g. `--resource`.
    pub fn flag(self) -> String {
        format!("--{}", self.name())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How content gets staged (`copy`, `link`, ...).
///
/// Opaque here: the token is forwarded to the preprocessor untouched and
/// never validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementStrategy(String);

impl PlacementStrategy {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlacementStrategy {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for PlacementStrategy {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Display for PlacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
