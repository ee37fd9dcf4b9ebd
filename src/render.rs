//! Gallery markup.
//!
//! By default titles, descriptions and URLs are interpolated as-is, so any
//! markup inside fetched content is live. Set `escape_markup` to escape them.

use std::borrow::Cow;

use tracing::debug;

use crate::dates::format_date;
use crate::display::DisplaySurface;
use crate::types::{ContentItem, ContentKind};
use crate::video::{classify_video, vimeo_player_url, youtube_embed_url, VideoEmbed};

const PLACEHOLDER_STYLE: &str = "display: flex; align-items: center; justify-content: center; background: #f5f7fa;";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub escape_markup: bool,
}

impl RenderOptions {
    fn text<'a>(&self, s: &'a str) -> Cow<'a, str> {
        if self.escape_markup { Cow::Owned(html_escape(s)) } else { Cow::Borrowed(s) }
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn empty_markup() -> String {
    r#"<div class="no-content" style="text-align: center; padding: 40px; color: #888; grid-column: 1 / -1;">
    <i class="fas fa-inbox" style="font-size: 3rem; margin-bottom: 20px;"></i>
    <h3>暂无内容</h3>
    <p>内容将显示在这里</p>
</div>"#
        .to_string()
}

pub fn loading_markup() -> String {
    r#"<div class="loading"><i class="fas fa-spinner fa-spin"></i> 从GitHub加载内容...</div>"#.to_string()
}

/// Error card with a retry control.
pub fn error_markup(message: &str, opts: RenderOptions) -> String {
    format!(
        r#"<div class="error" style="text-align: center; padding: 40px; color: #ff3b30; grid-column: 1 / -1;">
    <i class="fas fa-exclamation-triangle" style="font-size: 3rem; margin-bottom: 20px;"></i>
    <h3>加载内容失败</h3>
    <p>{}</p>
    <button class="btn" data-action="retry">
        <i class="fas fa-sync-alt"></i> 重试
    </button>
</div>"#,
        opts.text(message)
    )
}

fn unplayable_markup(url: &str, opts: RenderOptions) -> String {
    format!(
        r#"<div class="content-media" style="{}">
    <p>无法加载视频: {}</p>
</div>"#,
        PLACEHOLDER_STYLE,
        opts.text(url)
    )
}

fn video_markup(url: &str, opts: RenderOptions) -> String {
    match classify_video(url) {
        VideoEmbed::YouTube(id) => format!(
            r#"<iframe width="100%" height="200" src="{}" frameborder="0" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen class="content-media"></iframe>"#,
            opts.text(&youtube_embed_url(id))
        ),
        VideoEmbed::Vimeo(id) => format!(
            r#"<iframe src="{}" width="100%" height="200" frameborder="0" allow="autoplay; fullscreen; picture-in-picture" allowfullscreen class="content-media"></iframe>"#,
            opts.text(&vimeo_player_url(id))
        ),
        VideoEmbed::Unrecognized => {
            debug!(url, "video host recognised but no id found");
            unplayable_markup(url, opts)
        }
        VideoEmbed::Native => format!(
            r#"<video controls width="100%" height="200" class="content-media">
    <source src="{}" type="video/mp4">
    您的浏览器不支持视频播放
</video>"#,
            opts.text(url)
        ),
    }
}

/// The media slot of a card.
pub fn media_markup(item: &ContentItem, opts: RenderOptions) -> String {
    match item.kind {
        ContentKind::Image => format!(
            r#"<img src="{}" alt="{}" class="content-media" loading="lazy">"#,
            opts.text(&item.url),
            opts.text(&item.title)
        ),
        ContentKind::Video => video_markup(&item.url, opts),
        ContentKind::Text | ContentKind::Other(_) => format!(
            r#"<div class="content-media" style="{}">
    <i class="fas fa-file-alt" style="font-size: 3rem; color: #2c92e5;"></i>
</div>"#,
            PLACEHOLDER_STYLE
        ),
    }
}

/// A full card: media slot plus title, description and date.
pub fn item_markup(item: &ContentItem, opts: RenderOptions) -> String {
    format!(
        r#"<div class="content-item">
{}
<div class="content-info">
    <h3 class="content-title">{}</h3>
    <p class="content-description">{}</p>
    <p class="content-date">{}</p>
</div>
</div>"#,
        media_markup(item, opts),
        opts.text(&item.title),
        opts.text(&item.description),
        format_date(&item.date)
    )
}

/// Replace the gallery with `items`, in order, and update the count.
pub fn render(items: &[ContentItem], surface: &dyn DisplaySurface, opts: RenderOptions) {
    if items.is_empty() {
        surface.set_gallery(&empty_markup());
        surface.set_count("0");
        return;
    }
    surface.set_gallery("");
    for item in items {
        surface.append_gallery(&item_markup(item, opts));
    }
    surface.set_count(&items.len().to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::MemorySurface;

    fn item(kind: &str, url: &str) -> ContentItem {
        ContentItem { id: 1, title: "Title".into(), description: "Desc".into(), kind: kind.into(), url: url.into(), date: "2024-03-05".into() }
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let s = MemorySurface::new();
        render(&[], &s, RenderOptions::default());
        let snap = s.snapshot();
        assert!(snap.gallery.contains("no-content"));
        assert!(snap.gallery.contains("暂无内容"));
        assert_eq!(snap.count, "0");
    }

    #[test]
    fn image_has_single_img_with_src() {
        let html = item_markup(&item("image", "https://cdn.example.com/a.png"), RenderOptions::default());
        assert_eq!(html.matches("<img ").count(), 1);
        assert!(html.contains(r#"src="https://cdn.example.com/a.png""#));
        assert!(html.contains(r#"alt="Title""#));
        assert!(html.contains(r#"loading="lazy""#));
    }

    #[test]
    fn youtube_embeds_player() {
        let html = media_markup(&item("video", "https://www.youtube.com/watch?v=dQw4w9WgXcQ"), RenderOptions::default());
        assert!(html.contains("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert!(html.starts_with("<iframe"));
    }

    #[test]
    fn youtube_without_id_shows_raw_url() {
        let url = "https://www.youtube.com/watch?v=nope";
        let html = media_markup(&item("video", url), RenderOptions::default());
        assert!(html.contains(&format!("无法加载视频: {}", url)));
        assert!(!html.contains("<iframe"));
    }

    #[test]
    fn vimeo_embeds_player() {
        let html = media_markup(&item("video", "https://vimeo.com/12345"), RenderOptions::default());
        assert!(html.contains("https://player.vimeo.com/video/12345"));
    }

    #[test]
    fn player_urls_are_escaped_alike() {
        let opts = RenderOptions { escape_markup: true };
        let yt = media_markup(&item("video", "https://youtu.be/ab<c>efghij"), opts);
        assert!(yt.contains("https://www.youtube.com/embed/ab&lt;c&gt;efghij"));
        let vm = media_markup(&item("video", "https://vimeo.com/12345"), opts);
        assert!(vm.contains(r#"src="https://player.vimeo.com/video/12345""#));
    }

    #[test]
    fn plain_video_is_native() {
        let url = "https://cdn.example.com/clip.mp4";
        let html = media_markup(&item("video", url), RenderOptions::default());
        assert!(html.contains("<video controls"));
        assert!(html.contains(&format!(r#"<source src="{}" type="video/mp4">"#, url)));
    }

    #[test]
    fn text_and_unknown_kinds_use_placeholder() {
        for kind in ["text", "audio"] {
            let html = media_markup(&item(kind, ""), RenderOptions::default());
            assert!(html.contains("fa-file-alt"), "{kind}");
            assert!(!html.contains("Title"));
        }
    }

    #[test]
    fn cards_keep_input_order_and_count() {
        let mut a = item("text", "");
        a.title = "first".into();
        let mut b = item("image", "b.png");
        b.title = "second".into();
        let s = MemorySurface::new();
        render(&[a, b], &s, RenderOptions::default());
        let snap = s.snapshot();
        assert_eq!(snap.count, "2");
        assert_eq!(snap.gallery.matches(r#"class="content-item""#).count(), 2);
        assert!(snap.gallery.find("first").unwrap() < snap.gallery.find("second").unwrap());
        assert!(snap.gallery.contains("2024年3月5日"));
    }

    #[test]
    fn markup_passes_through_unless_escaping() {
        let mut it = item("text", "");
        it.title = "<b>bold</b>".into();
        it.description = "a & b".into();
        let raw = item_markup(&it, RenderOptions::default());
        assert!(raw.contains("<b>bold</b>"));

        let escaped = item_markup(&it, RenderOptions { escape_markup: true });
        assert!(escaped.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(escaped.contains("a &amp; b"));
    }

    #[test]
    fn error_card_has_retry() {
        let html = error_markup("boom", RenderOptions::default());
        assert!(html.contains("<p>boom</p>"));
        assert!(html.contains(r#"data-action="retry""#));
    }
}
