use std::sync::Mutex;

/// Where rendered output ends up. Methods take `&self` so a surface can be
/// shared with an in-flight fetch; implementations use interior mutability.
pub trait DisplaySurface: Send + Sync {
    /// Replace the whole gallery region.
    fn set_gallery(&self, markup: &str);
    /// Add one card at the end of the gallery region.
    fn append_gallery(&self, markup: &str);
    fn set_count(&self, text: &str);
    fn set_last_updated(&self, text: &str);
    /// Blocking user notice.
    fn notify(&self, message: &str);
}

/// Current contents of a [`MemorySurface`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub gallery: String,
    pub count: String,
    pub last_updated: String,
    /// Every value passed to `set_gallery`, oldest first.
    pub gallery_history: Vec<String>,
    pub notices: Vec<String>,
}

/// Surface that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: Mutex<Snapshot>,
}

impl MemorySurface {
    pub fn new() -> Self { Self::default() }

    pub fn snapshot(&self) -> Snapshot { self.lock().clone() }

    fn lock(&self) -> std::sync::MutexGuard<'_, Snapshot> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DisplaySurface for MemorySurface {
    fn set_gallery(&self, markup: &str) {
        let mut s = self.lock();
        s.gallery = markup.to_string();
        s.gallery_history.push(markup.to_string());
    }

    fn append_gallery(&self, markup: &str) { self.lock().gallery.push_str(markup); }

    fn set_count(&self, text: &str) { self.lock().count = text.to_string(); }

    fn set_last_updated(&self, text: &str) { self.lock().last_updated = text.to_string(); }

    fn notify(&self, message: &str) { self.lock().notices.push(message.to_string()); }
}
