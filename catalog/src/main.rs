use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use wadshelf::{CatalogStore, ScanOptions, shutdown::shutdown_signal};

use crate::args::{Commands, LsArgs, ScanArgs, ShowArgs};

mod args;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = args::Cli::parse();
    match cli.command {
        Commands::Scan(args) => run_scan(args).await,
        Commands::Ls(args) => list(args),
        Commands::Show(args) => show(args),
    }
}

async fn run_scan(args: ScanArgs) -> Result<()> {
    let opts = Arc::new(ScanOptions::from(&args));
    let store = CatalogStore::new(&args.data.data_dir);
    println!(
        "{}{}{}{}",
        "🚀 Starting scan • root=".green(),
        args.root.display().green().dimmed(),
        " • workers=".green(),
        opts.workers.green().dimmed(),
    );
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            shutdown_signal().await;
            cancel.cancel();
        }
    });

    let out = wadshelf::scan(&args.root, opts, cancel).await?;
    let report = &out.report;
    if report.cancelled {
        println!(
            "{}{}{}{}",
            "🛑 Scan cancelled, catalog left untouched • scanned=".red(),
            report.scanned.red().dimmed(),
            " • elapsed=".red(),
            humantime::format_duration(report.elapsed).red().dimmed(),
        );
        return Ok(());
    }

    store
        .save(&out.catalog)
        .with_context(|| format!("Failed to save catalog to {}", store.dir().display()))?;
    println!(
        "{}{}{}{}{}{}{}{}{}{}",
        "✅ Scan complete • iwads=".green(),
        out.catalog.iwads.len().green().dimmed(),
        " • pwads=".green(),
        out.catalog.pwads.len().green().dimmed(),
        " • skipped=".green(),
        report.skipped_empty.green().dimmed(),
        " • warnings=".green(),
        report.warnings.len().green().dimmed(),
        " • elapsed=".green(),
        humantime::format_duration(report.elapsed).green().dimmed(),
    );
    Ok(())
}

fn list(args: LsArgs) -> Result<()> {
    let catalog = CatalogStore::new(&args.data.data_dir).load()?;
    let Some(entry) = catalog.list_dir(&args.dir) else {
        bail!("not found: {}", args.dir);
    };
    for dir in &entry.dirs {
        println!("{}/", dir.blue());
    }
    for wad in &entry.wads {
        match catalog.pwads.get(wad) {
            Some(pwad) => println!(
                "{}  {}",
                wad,
                format!("{} • {} levels", pwad.iwad, pwad.level_count).dimmed()
            ),
            None => println!("{wad}"),
        }
    }
    Ok(())
}

fn show(args: ShowArgs) -> Result<()> {
    let catalog = CatalogStore::new(&args.data.data_dir).load()?;
    let Some(record) = catalog.get(&args.path) else {
        bail!("not found: {}", args.path);
    };
    let json = serde_json::to_string_pretty(&record).context("Failed to serialize record")?;
    println!("{json}");
    Ok(())
}
