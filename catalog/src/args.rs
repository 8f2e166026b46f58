use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use wadshelf::{
    ScanOptions,
    render::{automap::AutomapOptions, poster::TextLayout, scheme::ColorScheme},
    scan::default_workers,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan a WAD directory and rebuild the catalog.
    Scan(ScanArgs),

    /// List a catalog directory.
    Ls(LsArgs),

    /// Print one catalog record as JSON.
    Show(ShowArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DataArgs {
    /// Where iwads.json, pwads.json and index.json live.
    #[arg(long, env = "DATA_DIR", default_value = ".wadshelf")]
    pub data_dir: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    /// IWADs sit directly in here, PWADs in subdirectories.
    #[arg(env = "WAD_DIR")]
    pub root: PathBuf,

    #[command(flatten)]
    pub data: DataArgs,

    /// Write images under this directory instead of beside each WAD.
    #[arg(long, env = "ARTWORK_DIR")]
    pub artwork_dir: Option<PathBuf>,

    #[arg(long, default_value_t = 1920)]
    pub fanart_width: u32,

    #[arg(long, default_value_t = 1080)]
    pub fanart_height: u32,

    #[arg(long, default_value_t = 1000)]
    pub poster_width: u32,

    #[arg(long, default_value_t = 1500)]
    pub poster_height: u32,

    #[arg(long, default_value_t = 512)]
    pub icon_size: u32,

    /// Automap margin, as a percentage of each image side.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(0..50))]
    pub border_percent: u32,

    #[arg(long, value_enum, default_value_t = SchemeArg::Classic)]
    pub color_scheme: SchemeArg,

    /// Leave the 256-unit scale bracket off the automap.
    #[arg(long)]
    pub no_scale_mark: bool,

    #[arg(long)]
    pub no_images: bool,

    #[arg(long)]
    pub no_nfo: bool,

    #[arg(long, env = "WORKERS", default_value_t = default_workers())]
    pub workers: usize,

    /// Only print warnings and the summary.
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeArg {
    Classic,
    Doomworld,
}

impl From<SchemeArg> for ColorScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Classic => ColorScheme::CLASSIC,
            SchemeArg::Doomworld => ColorScheme::DOOMWORLD,
        }
    }
}

impl From<&ScanArgs> for ScanOptions {
    fn from(args: &ScanArgs) -> Self {
        ScanOptions {
            artwork_dir: args.artwork_dir.clone(),
            fanart: AutomapOptions {
                width: args.fanart_width,
                height: args.fanart_height,
                border_percent: args.border_percent,
                scheme: args.color_scheme.into(),
                scale_mark: !args.no_scale_mark,
            },
            poster: TextLayout::POSTER.with_size(args.poster_width, args.poster_height),
            icon: TextLayout::ICON.with_size(args.icon_size, args.icon_size),
            images: !args.no_images,
            nfo: !args.no_nfo,
            workers: args.workers,
            quiet: args.quiet,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct LsArgs {
    /// Catalog directory, e.g. `/` or `/megawads`.
    #[arg(default_value = "/")]
    pub dir: String,

    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Forward-slash path of a cataloged WAD.
    pub path: String,

    #[command(flatten)]
    pub data: DataArgs,
}
