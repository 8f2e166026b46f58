use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};
use tokio::{sync::Semaphore, task::JoinSet};
use tokio_util::sync::CancellationToken;
use walkdir::WalkDir;

use crate::{
    iwad, nfo, paths,
    record::PwadRecord,
    render::{self, RenderError, automap::AutomapOptions, poster::TextLayout},
    report::{ScanReport, ScanWarning, WarningKind},
    store::Catalog,
    survey::{self, Survey},
};

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Mirror images under this directory instead of beside each WAD.
    pub artwork_dir: Option<PathBuf>,
    pub fanart: AutomapOptions,
    pub poster: TextLayout,
    pub icon: TextLayout,
    pub images: bool,
    pub nfo: bool,
    pub workers: usize,
    pub quiet: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            artwork_dir: None,
            fanart: AutomapOptions::default(),
            poster: TextLayout::POSTER,
            icon: TextLayout::ICON,
            images: true,
            nfo: true,
            workers: default_workers(),
            quiet: false,
        }
    }
}

pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub catalog: Catalog,
    pub report: ScanReport,
}

/// Catalogs everything under `root`. Files directly in `root` are IWAD
/// candidates; files in its subdirectories are PWAD candidates.
///
/// Only an unreadable root fails the scan. Cancelling `cancel` stops
/// dispatching new files and returns what finished.
pub async fn scan(
    root: &Path,
    opts: Arc<ScanOptions>,
    cancel: CancellationToken,
) -> Result<ScanOutput> {
    let start = Instant::now();
    let root_files = root_files(root)?;
    let mut report = ScanReport::default();

    let (iwads, candidates) = tokio::task::spawn_blocking({
        let root = root.to_path_buf();
        let quiet = opts.quiet;
        move || {
            let (iwads, mut warnings) = iwad::identify_all(&root_files, quiet);
            let (candidates, walk_warnings) = pwad_candidates(&root);
            warnings.extend(walk_warnings);
            ((iwads, warnings), candidates)
        }
    })
    .await
    .context("Failed to join discovery task")?;
    let (iwads, warnings) = iwads;
    report.warnings.extend(warnings);

    let semaphore = Arc::new(Semaphore::new(opts.workers.max(1)));
    let mut tasks = JoinSet::new();
    for path in candidates {
        if cancel.is_cancelled() {
            report.cancelled = true;
            break;
        }
        let permit = tokio::select! {
            permit = semaphore.clone().acquire_owned() => {
                permit.context("Worker pool closed")?
            }
            _ = cancel.cancelled() => {
                report.cancelled = true;
                break;
            }
        };
        let root = root.to_path_buf();
        let opts = opts.clone();
        tasks.spawn_blocking(move || {
            let _permit = permit;
            process_file(&root, &path, &opts)
        });
    }

    let mut pwads = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let outcome = joined.context("Scan worker failed")?;
        report.scanned += 1;
        if outcome.empty {
            report.skipped_empty += 1;
        }
        report.warnings.extend(outcome.warnings);
        pwads.extend(outcome.record);
    }

    report
        .warnings
        .sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.message.cmp(&b.message)));
    report.elapsed = start.elapsed();
    Ok(ScanOutput {
        catalog: Catalog::new(iwads, pwads),
        report,
    })
}

fn root_files(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("Failed to read scan root {}", root.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to list scan root {}", root.display()))?;
        // follows symlinks, like the PWAD walk
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// WAD-extension files below the root's own level, in a stable order.
fn pwad_candidates(root: &Path) -> (Vec<PathBuf>, Vec<ScanWarning>) {
    let mut files = Vec::new();
    let mut warnings = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(2)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && paths::has_wad_extension(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                let path = e
                    .path()
                    .map(paths::to_slash)
                    .unwrap_or_else(|| paths::to_slash(root));
                let warning = ScanWarning::new(path, WarningKind::Io, e.to_string());
                warning.print();
                warnings.push(warning);
            }
        }
    }
    (files, warnings)
}

#[derive(Debug, Default)]
struct FileOutcome {
    record: Option<PwadRecord>,
    empty: bool,
    warnings: Vec<ScanWarning>,
}

impl FileOutcome {
    fn warn(&mut self, warning: ScanWarning) {
        warning.print();
        self.warnings.push(warning);
    }
}

/// Survey, render and describe one PWAD. Never fails: every problem
/// becomes a warning.
fn process_file(root: &Path, path: &Path, opts: &ScanOptions) -> FileOutcome {
    let mut out = FileOutcome::default();
    let key = paths::to_slash(path);
    let Survey { mut record, wad } = match survey::survey(root, path) {
        Ok(survey) => survey,
        Err(e) => {
            out.warn(ScanWarning::from_wad_error(key, &e));
            return out;
        }
    };
    if record.levels.is_empty() {
        if !opts.quiet {
            println!(
                "{}{}",
                "ℹ️  No levels, skipping • path=".blue(),
                key.blue().dimmed()
            );
        }
        out.empty = true;
        return out;
    }
    record.text_file = paths::companion_text_file(path).map(|p| paths::to_slash(&p));

    if opts.images && !render::available() {
        out.warn(ScanWarning::from_render_error(&key, &RenderError::Unavailable));
    } else if opts.images {
        let art_dir = paths::artwork_dir(root, path, opts.artwork_dir.as_deref());
        let image_path =
            |kind: &str| art_dir.join(paths::sidecar_name(path, &format!("_{kind}.png")));

        match wad.level(&record.levels[0]) {
            Ok(level) => {
                let target = image_path("fanart");
                match render::write_automap(&level, &opts.fanart, &target) {
                    Ok(()) => record.fanart = Some(paths::to_slash(&target)),
                    Err(e) => out.warn(ScanWarning::from_render_error(&key, &e)),
                }
            }
            Err(e) => out.warn(ScanWarning::from_wad_error(&key, &e)),
        }

        let target = image_path("poster");
        match render::write_text_card(&record, &opts.poster, &target) {
            Ok(()) => record.poster = Some(paths::to_slash(&target)),
            Err(e) => out.warn(ScanWarning::from_render_error(&key, &e)),
        }
        let target = image_path("icon");
        match render::write_text_card(&record, &opts.icon, &target) {
            Ok(()) => record.icon = Some(paths::to_slash(&target)),
            Err(e) => out.warn(ScanWarning::from_render_error(&key, &e)),
        }
    }

    if opts.nfo {
        let target = path.with_file_name(paths::sidecar_name(path, ".nfo"));
        match nfo::write(&record, &target) {
            Ok(()) => record.nfo = Some(paths::to_slash(&target)),
            Err(e) => out.warn(ScanWarning::new(&key, WarningKind::Io, format!("{e:#}"))),
        }
    }

    if !opts.quiet {
        println!(
            "{}{}{}{}{}{}",
            "ℹ️  Surveyed • path=".blue(),
            key.blue().dimmed(),
            " • iwad=".blue(),
            record.iwad.blue().dimmed(),
            " • levels=".blue(),
            record.level_count.blue().dimmed(),
        );
    }
    out.record = Some(record);
    out
}
