use std::{collections::HashMap, ops::Range, path::Path};

use crate::{
    error::{Result, WadError},
    level::Level,
    map_name,
    reader::{Eof, Reader},
};

const DIRECTORY_ENTRY_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WadKind {
    Iwad,
    Pwad,
}

impl WadKind {
    fn from_magic(magic: &[u8]) -> Option<Self> {
        match magic {
            b"IWAD" => Some(WadKind::Iwad),
            b"PWAD" => Some(WadKind::Pwad),
            _ => None,
        }
    }
}

/// One directory entry: a named byte range of the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lump {
    pub name: String,
    pub offset: usize,
    pub size: usize,
}

/// A level marker and the run of map lumps that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapMarker {
    pub name: String,
    /// Directory indices of the level's geometry lumps.
    pub lumps: Range<usize>,
}

/// In-memory view of one WAD file.
#[derive(Debug)]
pub struct Wad {
    kind: WadKind,
    data: Vec<u8>,
    lumps: Vec<Lump>,
    maps: Vec<MapMarker>,
}

impl Wad {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let mut r = Reader::new(&data);
        let magic = r
            .read_bytes(4)
            .map_err(|_| WadError::Format(format!("{} byte file has no header", data.len())))?;
        let kind = WadKind::from_magic(magic).ok_or_else(|| {
            WadError::Format(format!(
                "bad magic {:?}",
                String::from_utf8_lossy(magic)
            ))
        })?;
        let count = r
            .read_i32_le()
            .map_err(|e| WadError::Format(format!("truncated header: {e}")))?;
        let table = r
            .read_i32_le()
            .map_err(|e| WadError::Format(format!("truncated header: {e}")))?;
        if count < 0 || table < 0 {
            return Err(WadError::Format(format!(
                "negative directory (count={count}, offset={table})"
            )));
        }
        let (count, table) = (count as usize, table as usize);
        let table_end = count
            .checked_mul(DIRECTORY_ENTRY_SIZE)
            .and_then(|len| len.checked_add(table))
            .filter(|end| *end <= data.len());
        if table_end.is_none() {
            return Err(WadError::Format(format!(
                "directory of {count} entries at {table} runs past end of {} byte file",
                data.len()
            )));
        }
        let mut r = Reader::at(&data, table);
        let mut lumps = Vec::with_capacity(count);
        for i in 0..count {
            let (offset, size, name) = read_entry(&mut r)
                .map_err(|e| WadError::Format(format!("directory entry {i}: {e}")))?;
            if offset < 0 || size < 0 {
                return Err(WadError::Format(format!(
                    "lump {i} ({name}) has negative offset or size"
                )));
            }
            let (offset, size) = (offset as usize, size as usize);
            // Zero-length markers often carry a meaningless offset.
            if size > 0 && offset.checked_add(size).is_none_or(|end| end > data.len()) {
                return Err(WadError::Format(format!(
                    "lump {i} ({name}) at {offset}+{size} runs past end of file"
                )));
            }
            lumps.push(Lump { name, offset, size });
        }
        let maps = find_maps(&lumps);
        Ok(Self {
            kind,
            data,
            lumps,
            maps,
        })
    }

    pub fn kind(&self) -> WadKind {
        self.kind
    }

    pub fn lumps(&self) -> &[Lump] {
        &self.lumps
    }

    pub fn lump_data(&self, lump: &Lump) -> &[u8] {
        if lump.size == 0 {
            return &[];
        }
        &self.data[lump.offset..lump.offset + lump.size]
    }

    /// Last lump with this name, which is the one the engine would load.
    pub fn find_lump(&self, name: &str) -> Option<&Lump> {
        self.lumps.iter().rev().find(|l| l.name == name)
    }

    /// Level markers in directory order. A name that appears twice is listed
    /// once, at its last position.
    pub fn maps(&self) -> &[MapMarker] {
        &self.maps
    }

    pub fn map_names(&self) -> impl Iterator<Item = &str> {
        self.maps.iter().map(|m| m.name.as_str())
    }

    pub fn level(&self, name: &str) -> Result<Level> {
        let marker = self
            .maps
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| WadError::MissingLevel(name.to_string()))?;
        let lumps: HashMap<&str, &[u8]> = self.lumps[marker.lumps.clone()]
            .iter()
            .map(|l| (l.name.as_str(), self.lump_data(l)))
            .collect();
        Level::decode(&marker.name, |lump| lumps.get(lump).copied())
    }

    /// Decodes every level independently; one corrupt level does not stop
    /// the others.
    pub fn levels(&self) -> impl Iterator<Item = (&str, Result<Level>)> {
        self.maps
            .iter()
            .map(|m| (m.name.as_str(), self.level(&m.name)))
    }
}

fn read_entry(r: &mut Reader) -> std::result::Result<(i32, i32, String), Eof> {
    Ok((r.read_i32_le()?, r.read_i32_le()?, r.read_name()?))
}

fn find_maps(lumps: &[Lump]) -> Vec<MapMarker> {
    let mut maps: Vec<MapMarker> = Vec::new();
    let mut i = 0;
    while i < lumps.len() {
        let name = &lumps[i].name;
        let followed_by_things = lumps.get(i + 1).is_some_and(|l| l.name == "THINGS");
        if map_name::is_map_lump(name) || !(map_name::is_marker_name(name) || followed_by_things)
        {
            i += 1;
            continue;
        }
        let start = i + 1;
        let mut end = start;
        while end < lumps.len() && map_name::is_map_lump(&lumps[end].name) {
            end += 1;
        }
        maps.retain(|m| m.name != *name);
        maps.push(MapMarker {
            name: name.clone(),
            lumps: start..end,
        });
        i = end;
    }
    maps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{TestMap, WadBuilder};

    #[test]
    fn rejects_non_wad() {
        let err = Wad::from_bytes(b"PK\x03\x04 not a wad at all".to_vec()).unwrap_err();
        assert!(matches!(err, WadError::Format(_)));
    }

    #[test]
    fn rejects_truncated_header() {
        assert!(matches!(
            Wad::from_bytes(b"PWAD\x01\x00".to_vec()),
            Err(WadError::Format(_))
        ));
    }

    #[test]
    fn rejects_directory_past_end() {
        let mut data = WadBuilder::pwad().lump("DEHACKED", b"patch").build();
        data.truncate(data.len() - 4);
        assert!(matches!(Wad::from_bytes(data), Err(WadError::Format(_))));
    }

    #[test]
    fn reads_directory() {
        let wad = Wad::from_bytes(
            WadBuilder::iwad()
                .lump("PLAYPAL", &[1, 2, 3])
                .lump("ENDOOM", &[])
                .build(),
        )
        .unwrap();
        assert_eq!(wad.kind(), WadKind::Iwad);
        let names: Vec<_> = wad.lumps().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["PLAYPAL", "ENDOOM"]);
        assert_eq!(wad.lump_data(wad.find_lump("PLAYPAL").unwrap()), &[1, 2, 3]);
        assert!(wad.maps().is_empty());
    }

    #[test]
    fn discovers_levels_by_name_and_by_things() {
        let wad = Wad::from_bytes(
            WadBuilder::pwad()
                .lump("DEHACKED", b"x")
                .map("E1M1", &TestMap::square(64))
                .map("MYLEVEL", &TestMap::square(32))
                .lump("MAP07", &[])
                .build(),
        )
        .unwrap();
        let names: Vec<_> = wad.map_names().collect();
        assert_eq!(names, ["E1M1", "MYLEVEL", "MAP07"]);
        let empty = wad.level("MAP07").unwrap();
        assert!(empty.vertices.is_empty());
        assert_eq!(wad.level("E1M1").unwrap().vertices.len(), 4);
    }

    #[test]
    fn duplicate_marker_resolves_to_last() {
        let wad = Wad::from_bytes(
            WadBuilder::pwad()
                .map("MAP01", &TestMap::square(64))
                .map("MAP02", &TestMap::square(64))
                .map("MAP01", &TestMap::square(128))
                .build(),
        )
        .unwrap();
        let names: Vec<_> = wad.map_names().collect();
        assert_eq!(names, ["MAP02", "MAP01"]);
        let bounds = wad.level("MAP01").unwrap().bounds().unwrap();
        assert_eq!(bounds.width(), 128);
    }

    #[test]
    fn corrupt_level_leaves_siblings_decodable() {
        let mut broken = TestMap::square(64);
        broken.linedefs[0].1 = 99;
        let wad = Wad::from_bytes(
            WadBuilder::pwad()
                .map("MAP01", &broken)
                .map("MAP02", &TestMap::square(64))
                .build(),
        )
        .unwrap();
        let results: Vec<_> = wad.levels().collect();
        assert!(matches!(results[0].1, Err(WadError::LevelCorrupt { .. })));
        assert!(results[1].1.is_ok());
    }

    #[test]
    fn missing_level() {
        let wad = Wad::from_bytes(WadBuilder::pwad().build()).unwrap();
        assert!(matches!(
            wad.level("MAP01"),
            Err(WadError::MissingLevel(_))
        ));
    }

    #[test]
    fn open_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.wad");
        std::fs::write(
            &path,
            WadBuilder::pwad()
                .map("MAP01", &TestMap::square(64))
                .build(),
        )
        .unwrap();
        let wad = Wad::open(&path).unwrap();
        assert_eq!(wad.kind(), WadKind::Pwad);
        assert!(matches!(
            Wad::open(dir.path().join("missing.wad")),
            Err(WadError::Io(_))
        ));
    }
}
