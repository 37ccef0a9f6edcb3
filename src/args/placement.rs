//! Placement tables: ordered content-type → strategy maps.
//!
//! Order is part of the contract: the resolved table is serialized into
//! preprocessor flags, and the flag order must be reproducible. Entries keep
//! the position at which their content type was first inserted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::args::content_type::{ContentType, PlacementStrategy};

/// One row of a placement table, as written in config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementEntry {
    pub content_type: ContentType,
    pub strategy: PlacementStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementTableError {
    #[error("content type '{0}' is listed more than once")]
    Duplicate(ContentType),
}

/// Insertion-ordered map from content type to placement strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PlacementEntry>", into = "Vec<PlacementEntry>")]
pub struct PlacementTable {
    entries: Vec<(ContentType, PlacementStrategy)>,
}

impl PlacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The same strategy for every content type, in canonical order.
    pub fn uniform(strategy: &str) -> Self {
        ContentType::ALL
            .into_iter()
            .map(|ct| (ct, PlacementStrategy::from(strategy)))
            .collect()
    }

    /// Insert or replace. A replaced entry keeps its original position.
    pub fn insert(&mut self, content_type: ContentType, strategy: PlacementStrategy) {
        match self.entries.iter_mut().find(|(ct, _)| *ct == content_type) {
            Some((_, existing)) => *existing = strategy,
            None => self.entries.push((content_type, strategy)),
        }
    }

    pub fn get(&self, content_type: ContentType) -> Option<&PlacementStrategy> {
        self.entries
            .iter()
            .find(|(ct, _)| *ct == content_type)
            .map(|(_, strategy)| strategy)
    }

    pub fn contains(&self, content_type: ContentType) -> bool {
        self.get(content_type).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContentType, &PlacementStrategy)> {
        self.entries.iter().map(|(ct, strategy)| (*ct, strategy))
    }

    pub fn content_types(&self) -> Vec<ContentType> {
        self.entries.iter().map(|(ct, _)| *ct).collect()
    }

    /// Merge `overrides` over `defaults`.
    ///
    /// Every default key is kept in default order, taking the override value
    /// when one exists. Override-only keys follow, in override order.
    pub fn resolve(defaults: &PlacementTable, overrides: &PlacementTable) -> PlacementTable {
        let mut resolved = defaults.clone();
        for (content_type, strategy) in overrides.iter() {
            resolved.insert(content_type, strategy.clone());
        }
        resolved
    }

    /// Serialize as `--<type> <strategy>` pairs.
    pub fn to_flags(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|(ct, strategy)| [ct.flag(), strategy.to_string()])
            .collect()
    }
}

impl FromIterator<(ContentType, PlacementStrategy)> for PlacementTable {
    fn from_iter<I: IntoIterator<Item = (ContentType, PlacementStrategy)>>(iter: I) -> Self {
        let mut table = PlacementTable::new();
        for (content_type, strategy) in iter {
            table.insert(content_type, strategy);
        }
        table
    }
}

impl TryFrom<Vec<PlacementEntry>> for PlacementTable {
    type Error = PlacementTableError;

    fn try_from(entries: Vec<PlacementEntry>) -> Result<Self, Self::Error> {
        let mut table = PlacementTable::new();
        for entry in entries {
            if table.contains(entry.content_type) {
                return Err(PlacementTableError::Duplicate(entry.content_type));
            }
            table.insert(entry.content_type, entry.strategy);
        }
        Ok(table)
    }
}

impl From<PlacementTable> for Vec<PlacementEntry> {
    fn from(table: PlacementTable) -> Self {
        table
            .entries
            .into_iter()
            .map(|(content_type, strategy)| PlacementEntry {
                content_type,
                strategy,
            })
            .collect()
    }
}
