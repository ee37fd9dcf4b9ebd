pub mod config;
pub mod dates;
pub mod display;
pub mod fetcher;
pub mod gallery;
pub mod page;
pub mod render;
pub mod types;
pub mod video;

#[cfg(test)]
pub(crate) mod testing;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::config::GalleryConfig;
    pub use crate::dates::{format_date, format_timestamp};
    pub use crate::display::{DisplaySurface, MemorySurface, Snapshot};
    pub use crate::fetcher::{ContentFetcher, FetchError, Fetched, HttpTransport, Transport};
    pub use crate::gallery::Gallery;
    pub use crate::page::render_page;
    pub use crate::render::{render, RenderOptions};
    pub use crate::types::{ContentItem, ContentKind, ContentManifest, NewContent};
    pub use crate::video::{classify_video, vimeo_player_url, youtube_embed_url, VideoEmbed};
}
