//! Payload types carried by the event catalog.
//!
//! These are deliberately small stand-ins for the editor's environment and
//! map models: just enough shape for events to carry real data.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// One object type declared by an environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentItem {
    /// Numeric id assigned when the environment was parsed.
    pub id: u64,
    /// Type path, e.g. `/obj/item/crowbar`.
    pub type_path: String,
}

/// A loaded environment (the `.dme` a map is edited against)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Display name.
    pub name: String,
    /// Path of the environment file.
    pub path: PathBuf,
    /// Declared types, keyed by id.
    pub items: BTreeMap<u64, EnvironmentItem>,
}

impl Environment {
    /// Create an empty environment
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            items: BTreeMap::new(),
        }
    }

    /// Declare a type, assigning the next free id
    pub fn with_type(mut self, type_path: impl Into<String>) -> Self {
        let id = self.items.keys().next_back().map_or(1, |last| last + 1);
        self.items.insert(
            id,
            EnvironmentItem {
                id,
                type_path: type_path.into(),
            },
        );
        self
    }

    /// Ids of every item whose type path is in `type_paths`
    pub fn ids_of_types(&self, type_paths: &BTreeSet<String>) -> BTreeSet<u64> {
        self.items
            .values()
            .filter(|item| type_paths.contains(&item.type_path))
            .map(|item| item.id)
            .collect()
    }

    /// Path of the environment file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A tile coordinate on a map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapPosition {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Z level.
    pub z: u32,
}

/// Result of a search over the open map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// What was searched for.
    pub query: String,
    /// Tiles that matched.
    pub positions: Vec<MapPosition>,
}

/// A type referenced by a map but missing from the environment
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnknownType {
    /// The unresolved type path.
    pub type_path: String,
    /// Number of map instances using it.
    pub occurrences: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_type_assigns_increasing_ids() {
        let env = Environment::new("station", "station.dme")
            .with_type("/obj/item/crowbar")
            .with_type("/turf/floor");

        assert_eq!(env.items.len(), 2);
        assert_eq!(env.items[&1].type_path, "/obj/item/crowbar");
        assert_eq!(env.items[&2].type_path, "/turf/floor");
    }

    #[test]
    fn test_ids_of_types() {
        let env = Environment::new("station", "station.dme")
            .with_type("/obj/item/crowbar")
            .with_type("/turf/floor")
            .with_type("/mob/living");

        let filter: BTreeSet<String> = ["/turf/floor".to_string(), "/mob/living".to_string()]
            .into_iter()
            .collect();
        assert_eq!(env.ids_of_types(&filter), BTreeSet::from([2, 3]));
        assert!(env.ids_of_types(&BTreeSet::new()).is_empty());
    }
}
