use std::sync::{Mutex, MutexGuard};

use tracing::{info, warn};

use crate::dates::format_timestamp;
use crate::display::DisplaySurface;
use crate::fetcher::{ContentFetcher, Transport};
use crate::render::{error_markup, loading_markup, render, RenderOptions};
use crate::types::{ContentItem, ContentManifest, NewContent};

pub const LOCAL_ONLY_NOTICE: &str = "内容已添加！在实际部署中，这将通过GitHub Action自动更新到GitHub。\n\n要实际使用此功能，您需要设置GitHub Action工作流。";

/// Ties the fetcher to a display surface.
///
/// Fetched content and locally added content are kept in separate lists and
/// never merged: adding an item renders only the local list.
pub struct Gallery<T: Transport, D: DisplaySurface> {
    fetcher: ContentFetcher<T>,
    surface: D,
    options: RenderOptions,
    fetched: Mutex<Option<ContentManifest>>,
    local: Mutex<Vec<ContentItem>>,
}

impl<T: Transport, D: DisplaySurface> Gallery<T, D> {
    pub fn new(fetcher: ContentFetcher<T>, surface: D) -> Self {
        let options = RenderOptions { escape_markup: fetcher.config().escape_markup };
        Self { fetcher, surface, options, fetched: Mutex::new(None), local: Mutex::new(Vec::new()) }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn fetcher(&self) -> &ContentFetcher<T> { &self.fetcher }
    pub fn surface(&self) -> &D { &self.surface }

    /// Manifest from the most recent completed fetch, fallback included.
    pub fn last_manifest(&self) -> Option<ContentManifest> { lock(&self.fetched).clone() }

    pub fn local_items(&self) -> Vec<ContentItem> { lock(&self.local).clone() }

    /// Fetch and render. Returns `false` without touching the surface if a
    /// fetch is already running.
    pub async fn load_content(&self) -> bool {
        let Some(session) = self.fetcher.begin() else {
            warn!("fetch already in progress, refresh ignored");
            return false;
        };
        self.surface.set_gallery(&loading_markup());
        let fetched = session.run().await;

        match &fetched.error {
            // The error card stays; only the indicators are updated.
            Some(e) => {
                self.surface.set_gallery(&error_markup(&format!("从GitHub获取内容失败: {}", e), self.options));
                self.surface.set_count(&fetched.manifest.items.len().to_string());
            }
            None => render(&fetched.manifest.items, &self.surface, self.options),
        }
        self.update_last_update(fetched.manifest.last_updated.as_deref());
        *lock(&self.fetched) = Some(fetched.manifest);
        true
    }

    /// The error card's retry control.
    pub async fn retry(&self) -> bool { self.load_content().await }

    pub fn render(&self, items: &[ContentItem]) { render(items, &self.surface, self.options) }

    pub fn update_last_update(&self, timestamp: Option<&str>) {
        self.surface.set_last_updated(&format_timestamp(timestamp));
    }

    /// Prepend an item to the local list and show that list. Nothing is
    /// written back to the repository.
    pub fn add_content(&self, new: NewContent) -> ContentItem {
        let item = new.into_item(chrono::Utc::now().timestamp_millis());
        let items = {
            let mut local = lock(&self.local);
            local.insert(0, item.clone());
            local.clone()
        };
        info!(id = item.id, kind = %item.kind, "content added locally");
        self.render(&items);
        self.update_last_update(None);
        self.surface.notify(LOCAL_ONLY_NOTICE);
        item
    }
}

fn lock<V>(m: &Mutex<V>) -> MutexGuard<'_, V> { m.lock().unwrap_or_else(|e| e.into_inner()) }
