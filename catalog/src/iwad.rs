//! Recognises base-game data files by byte size, then by file name.

use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

use crate::{
    paths,
    record::{IwadRecord, IwadTag},
    report::{ScanWarning, WarningKind},
};

pub struct KnownIwad {
    pub tag: IwadTag,
    pub name: &'static str,
    /// `None` for releases that are only recognised by file name.
    pub size: Option<u64>,
}

const fn known(tag: IwadTag, name: &'static str, size: u64) -> KnownIwad {
    KnownIwad {
        tag,
        name,
        size: Some(size),
    }
}

// Several revisions share a size; the first entry in this order wins.
pub const KNOWN_IWADS: &[KnownIwad] = &[
    known(IwadTag::DoomShareware, "Doom shareware (1.0)", 4207819),
    known(IwadTag::DoomShareware, "Doom shareware (1.1 Rev A)", 4274218),
    known(IwadTag::DoomShareware, "Doom shareware (1.1 Rev B)", 4274218),
    known(IwadTag::DoomShareware, "Doom shareware (1.2)", 4225504),
    known(IwadTag::DoomShareware, "Doom shareware (1.25)", 4225460),
    known(IwadTag::DoomShareware, "Doom shareware (1.4)", 4261144),
    known(IwadTag::DoomShareware, "Doom shareware (1.5)", 4271324),
    known(IwadTag::DoomShareware, "Doom shareware (1.6)", 4211660),
    known(IwadTag::DoomShareware, "Doom shareware (1.666)", 4234124),
    known(IwadTag::DoomShareware, "Doom shareware (1.8)", 4196020),
    known(IwadTag::Doom, "Doom (1.9)", 11159840),
    known(IwadTag::Doom, "Doom (1.8)", 11159840),
    known(IwadTag::Doom, "Doom (1.666)", 11159840),
    known(IwadTag::Doom, "Doom (1.2)", 10399316),
    known(IwadTag::Doom, "Doom (1.1)", 10396254),
    known(IwadTag::Doom, "Doom (Beta)", 5468456),
    known(IwadTag::Doom, "Doom (0.5)", 3522207),
    known(IwadTag::Doom2, "Doom 2 (1.9)", 14604584),
    known(IwadTag::Doom2, "Doom 2 (1.8f)", 14607420),
    known(IwadTag::Doom2, "Doom 2 (1.8)", 14612688),
    known(IwadTag::Doom2, "Doom 2 (1.7a)", 14612688),
    known(IwadTag::Doom2, "Doom 2 (1.7)", 14612688),
    known(IwadTag::Doom2, "Doom 2 (1.666)", 14943400),
    known(IwadTag::Doom2, "Doom 2 (1.666g)", 14824716),
    known(IwadTag::UltimateDoom, "The Ultimate Doom (1.9)", 12408292),
    known(IwadTag::Tnt, "TNT: Evilution", 18195736),
    known(IwadTag::Tnt, "TNT: Evilution (Rev A)", 18654796),
    known(IwadTag::Plutonia, "The Plutonia Experiment", 17420824),
    known(IwadTag::Plutonia, "The Plutonia Experiment (Rev A)", 18240172),
    known(IwadTag::DoomBfg, "Doom (BFG edition)", 12487824),
    known(IwadTag::Doom2Bfg, "Doom 2 (BFG edition)", 14691821),
    KnownIwad {
        tag: IwadTag::Freedoom1,
        name: "FreeDoom: Phase 1",
        size: None,
    },
    KnownIwad {
        tag: IwadTag::Freedoom2,
        name: "FreeDoom: Phase 2",
        size: None,
    },
];

/// File names each base game ships under. Matched case-sensitively, first
/// entry wins.
pub const IWAD_ALIASES: &[(IwadTag, &[&str])] = &[
    (IwadTag::DoomShareware, &["doom1.wad"]),
    (IwadTag::Doom, &["doom.wad"]),
    (IwadTag::Doom2, &["doom2.wad"]),
    (IwadTag::UltimateDoom, &["doom.wad", "doomu.wad"]),
    (IwadTag::Tnt, &["tnt.wad"]),
    (IwadTag::Plutonia, &["plutonia.wad"]),
    (IwadTag::DoomBfg, &["doom.wad", "doombfg.wad", "bfgdoom.wad"]),
    (IwadTag::Doom2Bfg, &["doom2.wad", "doombfg2.wad", "bfgdoom2.wad"]),
    (IwadTag::Freedoom1, &["freedoom1.wad"]),
    (IwadTag::Freedoom2, &["freedoom2.wad"]),
];

pub fn match_size(size: u64) -> Option<&'static KnownIwad> {
    KNOWN_IWADS.iter().find(|k| k.size == Some(size))
}

pub fn match_alias(file_name: &str) -> Option<IwadTag> {
    IWAD_ALIASES
        .iter()
        .find(|(_, names)| names.contains(&file_name))
        .map(|(tag, _)| *tag)
}

/// Identifies one file given its size. `None` means "not an IWAD".
pub fn identify(path: &Path, size: u64) -> Option<IwadRecord> {
    if let Some(known) = match_size(size) {
        return Some(IwadRecord {
            tag: known.tag,
            name: known.name.to_string(),
            path: paths::to_slash(path),
            size,
        });
    }
    let file_name = path.file_name()?.to_string_lossy();
    let tag = match_alias(&file_name)?;
    Some(IwadRecord {
        tag,
        name: tag.to_string(),
        path: paths::to_slash(path),
        size,
    })
}

/// Identifies the scan root's own files, keeping discovery order. Files
/// that match nothing are dropped without comment.
pub fn identify_all(files: &[PathBuf], quiet: bool) -> (Vec<IwadRecord>, Vec<ScanWarning>) {
    let mut iwads = Vec::new();
    let mut warnings = Vec::new();
    for path in files {
        let size = match std::fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) => {
                let warning = ScanWarning::new(
                    paths::to_slash(path),
                    WarningKind::Io,
                    format!("failed to stat file: {e}"),
                );
                warning.print();
                warnings.push(warning);
                continue;
            }
        };
        if let Some(iwad) = identify(path, size) {
            if !quiet {
                println!(
                    "{}{}{}{}",
                    "ℹ️  Found IWAD • name=".blue(),
                    iwad.name.blue().dimmed(),
                    " • path=".blue(),
                    iwad.path.blue().dimmed(),
                );
            }
            iwads.push(iwad);
        }
    }
    (iwads, warnings)
}
