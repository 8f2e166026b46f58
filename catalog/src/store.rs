//! The persisted catalog: three pretty-printed JSON files in a data directory.

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::{
    index::{CatalogIndex, IndexEntry},
    record::{IwadRecord, PwadRecord},
};

pub const IWADS_FILE: &str = "iwads.json";
pub const PWADS_FILE: &str = "pwads.json";
pub const INDEX_FILE: &str = "index.json";

/// Result of a scan and the target of every query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub iwads: Vec<IwadRecord>,
    /// Keyed by forward-slash file path.
    pub pwads: BTreeMap<String, PwadRecord>,
    pub index: CatalogIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record<'a> {
    Pwad(&'a PwadRecord),
    Iwad(&'a IwadRecord),
}

impl Catalog {
    pub fn new(iwads: Vec<IwadRecord>, pwads: impl IntoIterator<Item = PwadRecord>) -> Self {
        let pwads: BTreeMap<String, PwadRecord> =
            pwads.into_iter().map(|p| (p.path.clone(), p)).collect();
        let index = CatalogIndex::build(pwads.values());
        Self {
            iwads,
            pwads,
            index,
        }
    }

    pub fn list_dir(&self, dir: &str) -> Option<&IndexEntry> {
        self.index.get(dir)
    }

    pub fn get(&self, path: &str) -> Option<Record<'_>> {
        if let Some(pwad) = self.pwads.get(path) {
            return Some(Record::Pwad(pwad));
        }
        self.iwads.iter().find(|i| i.path == path).map(Record::Iwad)
    }
}

pub struct CatalogStore {
    dir: PathBuf,
}

impl CatalogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load(&self) -> Result<Catalog> {
        Ok(Catalog {
            iwads: self.read(IWADS_FILE)?.unwrap_or_default(),
            pwads: self.read(PWADS_FILE)?.unwrap_or_default(),
            index: self.read(INDEX_FILE)?.unwrap_or_default(),
        })
    }

    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create data dir {}", self.dir.display()))?;
        self.write(IWADS_FILE, &catalog.iwads)?;
        self.write(PWADS_FILE, &catalog.pwads)?;
        self.write(INDEX_FILE, &catalog.index)?;
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.dir.join(name);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        let value = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(Some(value))
    }

    fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let mut text = serde_json::to_string_pretty(value)
            .with_context(|| format!("failed to serialize {name}"))?;
        text.push('\n');
        std::fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{EngineTag, IwadTag};

    fn sample() -> Catalog {
        let iwads = vec![IwadRecord {
            tag: IwadTag::Doom2,
            name: "Doom 2 (1.9)".into(),
            path: "/w/doom2.wad".into(),
            size: 14604584,
        }];
        let pwads = [PwadRecord {
            path: "/w/pack/pack.wad".into(),
            dir: "/pack".into(),
            name: "pack".into(),
            iwad: IwadTag::Doom2,
            engine: EngineTag::Vanilla,
            levels: vec!["MAP01".into()],
            level_count: 1,
            text_file: None,
            fanart: Some("/w/pack/pack.wad_fanart.png".into()),
            poster: None,
            icon: None,
            nfo: None,
        }];
        Catalog::new(iwads, pwads)
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("data"));
        let catalog = sample();
        store.save(&catalog).unwrap();
        assert_eq!(store.load().unwrap(), catalog);
    }

    #[test]
    fn missing_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = CatalogStore::new(dir.path()).load().unwrap();
        assert!(catalog.iwads.is_empty());
        assert!(catalog.pwads.is_empty());
        assert!(catalog.index.is_empty());
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PWADS_FILE), "{ nope").unwrap();
        assert!(CatalogStore::new(dir.path()).load().is_err());
    }

    #[test]
    fn queries() {
        let catalog = sample();
        assert!(matches!(catalog.get("/w/pack/pack.wad"), Some(Record::Pwad(p)) if p.name == "pack"));
        assert!(matches!(catalog.get("/w/doom2.wad"), Some(Record::Iwad(i)) if i.tag == IwadTag::Doom2));
        assert_eq!(catalog.get("/w/nope.wad"), None);
        assert_eq!(catalog.list_dir("/").unwrap().dirs, ["/pack"]);
        assert_eq!(catalog.list_dir("/pack").unwrap().wads, ["/w/pack/pack.wad"]);
        assert!(catalog.list_dir("/nope").is_none());
    }

    #[test]
    fn pwads_file_is_keyed_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path());
        store.save(&sample()).unwrap();
        let text = std::fs::read_to_string(dir.path().join(PWADS_FILE)).unwrap();
        assert!(text.starts_with("{\n  \"/w/pack/pack.wad\": {"));
        assert!(!text.contains("\"poster\""));
    }
}
