use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::{paths, record::PwadRecord};

pub const ROOT: &str = "/";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub dirs: Vec<String>,
    pub wads: Vec<String>,
}

/// Directory -> contents lookup over the PWAD catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogIndex(BTreeMap<String, IndexEntry>);

impl CatalogIndex {
    /// Rebuilds the whole index. The root lists every directory so any of
    /// them is one step away; other entries list their direct children.
    pub fn build<'a>(pwads: impl IntoIterator<Item = &'a PwadRecord>) -> Self {
        let mut entries: BTreeMap<String, IndexEntry> = BTreeMap::new();
        entries.insert(ROOT.to_string(), IndexEntry::default());
        for pwad in pwads {
            entries
                .entry(pwad.dir.clone())
                .or_default()
                .wads
                .push(pwad.path.clone());
        }

        let keys: BTreeSet<String> = entries.keys().filter(|k| *k != ROOT).cloned().collect();
        for dir in &keys {
            let Some(parent) = paths::parent_dir(dir).filter(|p| *p != ROOT) else {
                continue;
            };
            if let Some(entry) = entries.get_mut(parent) {
                entry.dirs.push(dir.clone());
            }
        }
        if let Some(root) = entries.get_mut(ROOT) {
            root.dirs = keys.into_iter().collect();
        }
        for entry in entries.values_mut() {
            entry.dirs.sort();
            entry.wads.sort();
        }
        Self(entries)
    }

    pub fn get(&self, dir: &str) -> Option<&IndexEntry> {
        self.0.get(dir)
    }

    pub fn dirs(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
