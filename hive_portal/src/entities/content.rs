//! Event, article and media records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use super::{RecordId, RecordKind, Searchable};

/// Publication state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Completed,
    Cancelled,
}

/// A club event (hackathon, workshop, social).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: EventStatus,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Event {
    /// Create a new draft event starting at `start`.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::new(),
            title: title.into(),
            description: String::new(),
            tags: Vec::new(),
            status: EventStatus::Draft,
            start,
            end: None,
            location: None,
            image: None,
        }
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// A published event that has not started yet.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.status == EventStatus::Published && self.start > now
    }
}

impl Searchable for Event {
    fn display_name(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Event
    }
}

/// Publication state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    #[default]
    Draft,
    Published,
}

/// A blog article or insight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: RecordId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub status: ArticleStatus,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Article {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            title: title.into(),
            author: author.into(),
            content: String::new(),
            status: ArticleStatus::Draft,
            tags: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn published(mut self) -> Self {
        self.status = ArticleStatus::Published;
        self
    }

    pub fn is_published(&self) -> bool {
        self.status == ArticleStatus::Published
    }
}

impl Searchable for Article {
    fn display_name(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        &self.content
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Article
    }
}

/// Media type of a gallery asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    #[default]
    Photo,
    Video,
}

/// A single photo or video in an album.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub id: RecordId,
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub kind: AssetKind,
}

impl Asset {
    pub fn photo(url: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            url: url.into(),
            caption: None,
            kind: AssetKind::Photo,
        }
    }
}

/// A gallery album.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Album {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            title: title.into(),
            tags: Vec::new(),
            assets: Vec::new(),
        }
    }

    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.assets.push(asset);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_upcoming_requires_published_and_future() {
        let now = at(2025, 1, 1);

        let draft = Event::new("Draft", at(2025, 2, 1));
        assert!(!draft.is_upcoming(now));

        let future = Event::new("Future", at(2025, 2, 1)).with_status(EventStatus::Published);
        assert!(future.is_upcoming(now));

        let past = Event::new("Past", at(2024, 12, 1)).with_status(EventStatus::Published);
        assert!(!past.is_upcoming(now));
    }

    #[test]
    fn test_event_status_display() {
        assert_eq!(EventStatus::Published.to_string(), "published");
        assert_eq!(EventStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn test_event_deserializes_with_defaults() {
        let json = r#"{ "title": "Hackathon", "start": "2025-03-01T09:00:00Z" }"#;
        let event: Event = serde_json::from_str(json).unwrap();

        assert_eq!(event.title, "Hackathon");
        assert_eq!(event.status, EventStatus::Draft);
        assert!(event.tags.is_empty());
        assert!(event.image.is_none());
    }

    #[test]
    fn test_article_publication() {
        let article = Article::new("Rust at the Hive", "Ada");
        assert!(!article.is_published());
        assert!(article.published().is_published());
    }

    #[test]
    fn test_album_assets() {
        let album = Album::new("Hackathon 2.0")
            .with_asset(Asset::photo("a.jpg"))
            .with_asset(Asset::photo("b.jpg"));
        assert_eq!(album.assets.len(), 2);
        assert_eq!(album.assets[0].kind, AssetKind::Photo);
    }
}
