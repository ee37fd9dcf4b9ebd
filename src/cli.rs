use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fetch a repository's content manifest and render it as a gallery
#[derive(Parser)]
#[command(name = "gallery")]
#[command(version, about = "Render a GitHub-hosted content manifest as a media gallery", long_about = None)]
pub struct Cli {
    /// Config file (defaults to config.toml in the platform config directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// HTML-escape titles, descriptions and URLs
    #[arg(long, global = true)]
    pub escape: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the contents API URL that would be requested
    Url,
    /// Fetch the manifest and print it as JSON
    Fetch,
    /// Fetch the manifest and print one line per item
    List,
    /// Fetch the manifest and write the gallery page
    Render {
        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Page heading
        #[arg(long, default_value = "内容展示")]
        title: String,
    },
    /// Add an item to a local list and render only that list (nothing is saved)
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// image, video or text
        #[arg(long, default_value = "image")]
        kind: String,
        /// Media URL, ignored for text items
        #[arg(long, default_value = "")]
        url: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}
