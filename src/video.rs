//! Recognising hosted video URLs.

use regex::Regex;
use std::sync::OnceLock;

static YOUTUBE_ID: OnceLock<Regex> = OnceLock::new();
static VIMEO_ID: OnceLock<Regex> = OnceLock::new();

/// How a video item should be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoEmbed<'a> {
    YouTube(&'a str),
    Vimeo(&'a str),
    /// Hosted on a known provider but no id could be pulled out.
    Unrecognized,
    /// Plain file URL, played by a native `<video>` element.
    Native,
}

pub fn is_youtube_url(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

pub fn is_vimeo_url(url: &str) -> bool {
    url.contains("vimeo.com")
}

/// The 11-character id from watch, embed, `/v/` and short-link URLs.
pub fn youtube_id(url: &str) -> Option<&str> {
    let re = YOUTUBE_ID.get_or_init(|| {
        Regex::new(r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#)
            .expect("static youtube pattern")
    });
    re.captures(url).and_then(|c| c.get(1)).map(|m| m.as_str())
}

pub fn vimeo_id(url: &str) -> Option<&str> {
    let re = VIMEO_ID.get_or_init(|| Regex::new(r"vimeo\.com/([0-9]+)").expect("static vimeo pattern"));
    re.captures(url).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// YouTube takes precedence over Vimeo when a URL mentions both.
pub fn classify_video(url: &str) -> VideoEmbed<'_> {
    if is_youtube_url(url) {
        youtube_id(url).map_or(VideoEmbed::Unrecognized, VideoEmbed::YouTube)
    } else if is_vimeo_url(url) {
        vimeo_id(url).map_or(VideoEmbed::Unrecognized, VideoEmbed::Vimeo)
    } else {
        VideoEmbed::Native
    }
}

pub fn youtube_embed_url(id: &str) -> String { format!("https://www.youtube.com/embed/{}", id) }

pub fn vimeo_player_url(id: &str) -> String { format!("https://player.vimeo.com/video/{}", id) }
