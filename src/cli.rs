use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Scrape truyentranhlh listings, series and chapters
#[derive(Parser)]
#[command(name = "lh-scraper", version)]
#[command(about = "Site adapter for truyentranhlh", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape one listing page and every series on it
    Listing {
        /// Listing page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Scrape one series detail page
    Detail {
        /// Series identifier, e.g. `abc-123`
        source_id: String,
    },
    /// List the image URLs of one chapter
    Images {
        source_media_id: String,
        chapter_id: String,
    },
    /// Compare two saved listing snapshots
    Changed {
        old_snapshot: PathBuf,
        new_snapshot: PathBuf,
    },
}
