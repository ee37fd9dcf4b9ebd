use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Kind of a content item. Anything the renderer does not recognise is kept
/// verbatim in `Other` and rendered like `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentKind {
    Image,
    Video,
    Text,
    Other(String),
}

impl ContentKind {
    pub fn as_str(&self) -> &str {
        match self {
            ContentKind::Image => "image",
            ContentKind::Video => "video",
            ContentKind::Text => "text",
            ContentKind::Other(s) => s.as_str(),
        }
    }
}

impl Default for ContentKind {
    fn default() -> Self { ContentKind::Other(String::new()) }
}

impl From<String> for ContentKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "image" => ContentKind::Image,
            "video" => ContentKind::Video,
            "text" => ContentKind::Text,
            _ => ContentKind::Other(s),
        }
    }
}

impl From<&str> for ContentKind {
    fn from(s: &str) -> Self { ContentKind::from(s.to_string()) }
}

impl From<ContentKind> for String {
    fn from(k: ContentKind) -> Self {
        match k {
            ContentKind::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.pad(self.as_str()) }
}

/// One displayable unit of the gallery.
///
/// Fetched items are taken as they come: nulls and mistyped scalars degrade
/// to defaults or their JSON text instead of failing the whole manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: ContentKind,
    /// Empty for text items.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
}

/// The JSON document stored in the repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentManifest {
    /// `null` counts as no items.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<ContentItem>,
    /// A string, or epoch milliseconds normalised to RFC 3339.
    #[serde(rename = "lastUpdated", default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

fn scalar_text(v: Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(d)?))
}

fn lenient_kind<'de, D: Deserializer<'de>>(d: D) -> Result<ContentKind, D::Error> {
    lenient_string(d).map(ContentKind::from)
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let id = match Value::deserialize(d)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or_default(),
        Value::String(s) => s.trim().parse::<f64>().map(|f| f as i64).unwrap_or_default(),
        _ => 0,
    };
    Ok(id)
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<ContentItem>, D::Error> {
    Ok(Option::<Vec<ContentItem>>::deserialize(d)?.unwrap_or_default())
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let ts = match Value::deserialize(d)? {
        Value::Null => None,
        Value::Number(n) => n
            .as_f64()
            .and_then(|ms| chrono::DateTime::from_timestamp_millis(ms as i64))
            .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
            .or_else(|| Some(n.to_string())),
        other => Some(scalar_text(other)),
    };
    Ok(ts)
}

impl ContentManifest {
    /// Stand-in used whenever fetching fails: no items, stamped with the current time.
    pub fn fallback() -> Self {
        Self { items: Vec::new(), last_updated: Some(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)) }
    }
}

/// Fields collected for a locally added item.
#[derive(Debug, Clone, Default)]
pub struct NewContent {
    pub title: String,
    pub description: String,
    pub kind: ContentKind,
    pub url: String,
    pub date: String,
}

impl NewContent {
    pub(crate) fn into_item(self, id: i64) -> ContentItem {
        let url = if self.kind == ContentKind::Text { String::new() } else { self.url };
        ContentItem { id, title: self.title, description: self.description, kind: self.kind, url, date: self.date }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_without_items_defaults_to_empty() {
        let m: ContentManifest = serde_json::from_str(r#"{"lastUpdated":"2024-03-05T10:00:00Z"}"#).unwrap();
        assert!(m.items.is_empty());
        assert_eq!(m.last_updated.as_deref(), Some("2024-03-05T10:00:00Z"));
    }

    #[test]
    fn unknown_kind_is_preserved() {
        let item: ContentItem = serde_json::from_str(r#"{"id":1,"title":"t","type":"audio","url":"a.mp3"}"#).unwrap();
        assert_eq!(item.kind, ContentKind::Other("audio".into()));
        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["type"], "audio");
    }

    #[test]
    fn sparse_item_uses_defaults() {
        let item: ContentItem = serde_json::from_str(r#"{"type":"image"}"#).unwrap();
        assert_eq!(item.kind, ContentKind::Image);
        assert_eq!(item.id, 0);
        assert!(item.title.is_empty());
        assert!(item.url.is_empty());
    }

    #[test]
    fn null_and_mistyped_fields_degrade() {
        let item: ContentItem = serde_json::from_str(r#"{"id":1712345678901.0,"title":null,"description":42,"type":null,"url":null,"date":null}"#).unwrap();
        assert_eq!(item.id, 1712345678901);
        assert!(item.title.is_empty());
        assert_eq!(item.description, "42");
        assert_eq!(item.kind, ContentKind::Other(String::new()));
        assert!(item.url.is_empty());
        assert!(item.date.is_empty());

        let item: ContentItem = serde_json::from_str(r#"{"id":"17","type":"video"}"#).unwrap();
        assert_eq!(item.id, 17);
        assert_eq!(item.kind, ContentKind::Video);
    }

    #[test]
    fn null_items_and_numeric_timestamp() {
        let m: ContentManifest = serde_json::from_str(r#"{"items":null,"lastUpdated":1709632800000}"#).unwrap();
        assert!(m.items.is_empty());
        assert_eq!(m.last_updated.as_deref(), Some("2024-03-05T10:00:00.000Z"));

        let m: ContentManifest = serde_json::from_str(r#"{"lastUpdated":null}"#).unwrap();
        assert!(m.last_updated.is_none());
    }

    #[test]
    fn text_content_drops_url() {
        let item = NewContent { title: "note".into(), kind: ContentKind::Text, url: "https://x/y.png".into(), ..Default::default() }.into_item(7);
        assert_eq!(item.id, 7);
        assert!(item.url.is_empty());
    }

    #[test]
    fn fallback_is_empty_and_stamped() {
        let m = ContentManifest::fallback();
        assert!(m.items.is_empty());
        assert!(m.last_updated.unwrap().ends_with('Z'));
    }
}
