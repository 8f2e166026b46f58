use std::path::Path;
use wadshelf_wad::{Wad, WadError, map_name};

use crate::{
    paths,
    record::{EngineTag, IwadTag, PwadRecord},
};

/// A surveyed PWAD: its record and the open container for rendering.
pub struct Survey {
    pub record: PwadRecord,
    pub wad: Wad,
}

/// Opens one PWAD and fills in everything derivable from its directory.
/// Image, NFO and text-file fields are left for the caller.
pub fn survey(root: &Path, path: &Path) -> Result<Survey, WadError> {
    let wad = Wad::open(path)?;
    let mut levels: Vec<String> = wad.map_names().map(str::to_string).collect();
    levels.sort();
    levels.dedup();
    let record = PwadRecord {
        path: paths::to_slash(path),
        dir: paths::relative_dir(root, path),
        name: paths::file_stem(path),
        iwad: required_iwad(&levels),
        engine: required_engine(&wad),
        level_count: levels.len(),
        levels,
        text_file: None,
        fanart: None,
        poster: None,
        icon: None,
        nfo: None,
    };
    Ok(Survey { record, wad })
}

/// The first level name matching either naming scheme decides.
pub fn required_iwad(levels: &[String]) -> IwadTag {
    levels
        .iter()
        .find_map(|name| {
            if map_name::is_episodic(name) {
                Some(IwadTag::Doom)
            } else if map_name::is_sequential(name) {
                Some(IwadTag::Doom2)
            } else {
                None
            }
        })
        .unwrap_or(IwadTag::Unknown)
}

// TODO: detect Boom/ZDoom requirements from linedef specials and extra lumps.
pub fn required_engine(_wad: &Wad) -> EngineTag {
    EngineTag::Vanilla
}

#[cfg(test)]
mod tests {
    use super::*;
    use wadshelf_wad::test_util::{TestMap, WadBuilder};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn episodic_names_need_doom() {
        for e in 1..=4 {
            for m in 1..=9 {
                let name = format!("E{e}M{m}");
                assert_eq!(required_iwad(&[name]), IwadTag::Doom);
            }
        }
    }

    #[test]
    fn sequential_names_need_doom2() {
        for n in 1..=32 {
            let name = format!("MAP{n:02}");
            assert_eq!(required_iwad(&[name]), IwadTag::Doom2);
        }
    }

    #[test]
    fn other_names_are_unknown() {
        assert_eq!(required_iwad(&names(&["START", "LEVEL1", "MAPXX"])), IwadTag::Unknown);
        assert_eq!(required_iwad(&[]), IwadTag::Unknown);
        // first match wins
        assert_eq!(required_iwad(&names(&["AREA1", "E1M1", "MAP01"])), IwadTag::Doom);
    }

    #[test]
    fn survey_sorts_levels_as_strings() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("pack");
        std::fs::create_dir(&sub).unwrap();
        let path = sub.join("Pack.WAD");
        let square = TestMap::square(64);
        std::fs::write(
            &path,
            WadBuilder::pwad()
                .map("MAP10", &square)
                .map("MAP02", &square)
                .map("MAP01", &square)
                .build(),
        )
        .unwrap();
        let Survey { record, .. } = survey(dir.path(), &path).unwrap();
        assert_eq!(record.levels, ["MAP01", "MAP02", "MAP10"]);
        assert_eq!(record.level_count, 3);
        assert_eq!(record.iwad, IwadTag::Doom2);
        assert_eq!(record.engine, EngineTag::Vanilla);
        assert_eq!(record.dir, "/pack");
        assert_eq!(record.name, "Pack");
    }

    #[test]
    fn survey_rejects_non_wad() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.wad");
        std::fs::write(&path, b"hello").unwrap();
        assert!(matches!(survey(dir.path(), &path), Err(WadError::Format(_))));
    }
}
