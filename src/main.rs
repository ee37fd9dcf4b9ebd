mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use gallery::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries page and JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gallery=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = GalleryConfig::load(cli.config.as_deref())?;
    if cli.escape { config.escape_markup = true; }

    match cli.command {
        Commands::Url => {
            println!("{}", ContentFetcher::from_config(config)?.api_url());
        }
        Commands::Fetch => {
            let fetcher = ContentFetcher::from_config(config)?;
            let fetched = fetcher.fetch().await.context("fetch already in progress")?;
            println!("{}", serde_json::to_string_pretty(&fetched.manifest)?);
        }
        Commands::List => {
            let fetcher = ContentFetcher::from_config(config)?;
            let fetched = fetcher.fetch().await.context("fetch already in progress")?;
            if let Some(e) = &fetched.error { eprintln!("从GitHub获取内容失败: {}", e); }
            for item in &fetched.manifest.items {
                println!("{:<6} {:<16} {}  {}", item.kind, format_date(&item.date), item.title, describe_media(item));
            }
            println!("共 {} 项, 最后更新 {}", fetched.manifest.items.len(), format_timestamp(fetched.manifest.last_updated.as_deref()));
        }
        Commands::Render { out, title } => {
            let gallery = Gallery::new(ContentFetcher::from_config(config)?, MemorySurface::new());
            gallery.load_content().await;
            write_output(out, &render_page(&title, &gallery.surface().snapshot())).await?;
        }
        Commands::Add { title, description, kind, url, date, out } => {
            let gallery = Gallery::new(ContentFetcher::from_config(config)?, MemorySurface::new());
            let date = date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
            let item = gallery.add_content(NewContent { title, description, kind: kind.into(), url, date });
            tracing::debug!(?item, "added");
            for notice in gallery.surface().snapshot().notices {
                eprintln!("{}", notice);
            }
            write_output(out, &render_page("内容展示", &gallery.surface().snapshot())).await?;
        }
    }
    Ok(())
}

fn describe_media(item: &ContentItem) -> String {
    match item.kind {
        ContentKind::Video => match classify_video(&item.url) {
            VideoEmbed::YouTube(id) => youtube_embed_url(id),
            VideoEmbed::Vimeo(id) => vimeo_player_url(id),
            VideoEmbed::Unrecognized => format!("无法加载视频: {}", item.url),
            VideoEmbed::Native => item.url.clone(),
        },
        _ => item.url.clone(),
    }
}

async fn write_output(out: Option<PathBuf>, html: &str) -> Result<()> {
    match out {
        Some(path) => {
            tokio::fs::write(&path, html).await.with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "page written");
        }
        None => print!("{}", html),
    }
    Ok(())
}
