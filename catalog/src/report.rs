use owo_colors::OwoColorize;
use serde::Serialize;
use std::time::Duration;
use wadshelf_wad::WadError;

use crate::render::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningKind {
    Format,
    LevelCorrupt,
    DegenerateGeometry,
    Io,
    RenderingUnavailable,
}

/// A per-file problem that was skipped over rather than failing the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanWarning {
    pub path: String,
    pub kind: WarningKind,
    pub message: String,
}

impl ScanWarning {
    pub fn new(path: impl Into<String>, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn from_wad_error(path: impl Into<String>, err: &WadError) -> Self {
        let kind = match err {
            WadError::Format(_) => WarningKind::Format,
            WadError::LevelCorrupt { .. } | WadError::MissingLevel(_) => WarningKind::LevelCorrupt,
            WadError::Io(_) => WarningKind::Io,
        };
        Self::new(path, kind, err.to_string())
    }

    pub fn from_render_error(path: impl Into<String>, err: &RenderError) -> Self {
        let kind = match err {
            RenderError::DegenerateGeometry(_) => WarningKind::DegenerateGeometry,
            RenderError::Unavailable => WarningKind::RenderingUnavailable,
            _ => WarningKind::Io,
        };
        Self::new(path, kind, err.to_string())
    }

    /// Missing rendering support is expected in some builds and stays quiet.
    pub fn print(&self) {
        if self.kind == WarningKind::RenderingUnavailable {
            return;
        }
        eprintln!(
            "{}{}{}{}{}{}",
            "⚠️  Skipped • kind=".yellow(),
            format!("{:?}", self.kind).yellow().dimmed(),
            " • path=".yellow(),
            self.path.yellow().dimmed(),
            " • reason=".yellow(),
            self.message.yellow().dimmed(),
        );
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Candidate files with a WAD extension that were opened.
    pub scanned: usize,
    /// WADs that decoded but hold no levels.
    pub skipped_empty: usize,
    pub warnings: Vec<ScanWarning>,
    pub cancelled: bool,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl ScanReport {
    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &ScanWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }
}
