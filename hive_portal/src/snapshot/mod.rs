//! Read-only snapshots of the portal's collections.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::entities::{Album, Article, Asset, Event, Person};
use crate::error::Result;

const SAMPLE_PORTAL: &str = include_str!("../../data/sample_portal.json");

/// Read access to the portal's live collections.
///
/// Implementations hand out the collections in their declared order; the
/// interpreter relies on that order for first-match lookups.
pub trait KnowledgeProvider {
    fn list_people(&self) -> &[Person];

    fn list_events(&self) -> &[Event];

    fn list_articles(&self) -> &[Article];

    fn list_media(&self) -> &[Album];
}

/// The complete set of portal records at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PortalSnapshot {
    #[serde(default)]
    pub people: Vec<Person>,

    #[serde(default)]
    pub events: Vec<Event>,

    #[serde(default)]
    pub articles: Vec<Article>,

    #[serde(default)]
    pub albums: Vec<Album>,
}

impl PortalSnapshot {
    /// Create a new empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// The bundled demo data set.
    pub fn sample() -> Result<Self> {
        Self::from_json_str(SAMPLE_PORTAL)
    }

    pub fn add_person(&mut self, person: Person) {
        self.people.push(person);
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// All assets across every album, in album order.
    pub fn all_assets(&self) -> impl Iterator<Item = &Asset> {
        self.albums.iter().flat_map(|album| album.assets.iter())
    }
}

impl KnowledgeProvider for PortalSnapshot {
    fn list_people(&self) -> &[Person] {
        &self.people
    }

    fn list_events(&self) -> &[Event] {
        &self.events
    }

    fn list_articles(&self) -> &[Article] {
        &self.articles
    }

    fn list_media(&self) -> &[Album] {
        &self.albums
    }
}
