use serde::{Deserialize, Serialize};
use std::fmt;

/// Base game a file is, or a PWAD needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IwadTag {
    #[serde(rename = "Doom shareware")]
    DoomShareware,
    #[serde(rename = "Doom")]
    Doom,
    #[serde(rename = "Doom 2")]
    Doom2,
    #[serde(rename = "Ultimate Doom")]
    UltimateDoom,
    #[serde(rename = "TNT Evilution")]
    Tnt,
    #[serde(rename = "TNT Plutonia")]
    Plutonia,
    #[serde(rename = "Doom BFG")]
    DoomBfg,
    #[serde(rename = "Doom 2 BFG")]
    Doom2Bfg,
    #[serde(rename = "FreeDOOM Phase 1")]
    Freedoom1,
    #[serde(rename = "FreeDOOM Phase 2")]
    Freedoom2,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl IwadTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            IwadTag::DoomShareware => "Doom shareware",
            IwadTag::Doom => "Doom",
            IwadTag::Doom2 => "Doom 2",
            IwadTag::UltimateDoom => "Ultimate Doom",
            IwadTag::Tnt => "TNT Evilution",
            IwadTag::Plutonia => "TNT Plutonia",
            IwadTag::DoomBfg => "Doom BFG",
            IwadTag::Doom2Bfg => "Doom 2 BFG",
            IwadTag::Freedoom1 => "FreeDOOM Phase 1",
            IwadTag::Freedoom2 => "FreeDOOM Phase 2",
            IwadTag::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for IwadTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source port class a PWAD needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineTag {
    #[serde(rename = "Vanilla")]
    Vanilla,
    #[serde(rename = "No limit")]
    NoLimit,
    #[serde(rename = "BOOM")]
    Boom,
    #[serde(rename = "ZDOOM")]
    ZDoom,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl EngineTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineTag::Vanilla => "Vanilla",
            EngineTag::NoLimit => "No limit",
            EngineTag::Boom => "BOOM",
            EngineTag::ZDoom => "ZDOOM",
            EngineTag::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EngineTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IwadRecord {
    pub tag: IwadTag,
    pub name: String,
    pub path: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PwadRecord {
    /// Forward-slash path of the WAD file; also its catalog key.
    pub path: String,
    /// Directory relative to the scan root, `/` for the root itself.
    pub dir: String,
    pub name: String,
    pub iwad: IwadTag,
    pub engine: EngineTag,
    /// Level names in ordinal string order.
    pub levels: Vec<String>,
    pub level_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fanart: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nfo: Option<String>,
}
