//! Record definitions for the portal's collections.

mod content;
mod person;

pub use content::*;
pub use person::*;

use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// Unique identifier for every portal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Create a new random record ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The collections a search can report hits from.
///
/// `Display` is the label a search hit is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum RecordKind {
    #[strum(serialize = "Member")]
    Person,
    Event,
    Article,
}

/// The text surface a record exposes to global search.
pub trait Searchable {
    /// Display name or title.
    fn display_name(&self) -> &str;

    /// Secondary text field: a member's role, an event's description, an
    /// article's body.
    fn body(&self) -> &str;

    fn tags(&self) -> &[String];

    fn kind(&self) -> RecordKind;

    /// Case-insensitive substring match of a lowercased `query` against the
    /// name and body, and the tags when `with_tags` is set.
    fn matches_query(&self, query: &str, with_tags: bool) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(query);
        contains(self.display_name())
            || contains(self.body())
            || (with_tags && self.tags().iter().any(|t| contains(t)))
    }

    /// One search-result line, e.g. `Event: BIT Hackathon 3.0`.
    fn hit_line(&self) -> String {
        format!("{}: {}", self.kind(), self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_serializes_as_plain_uuid() {
        let id = RecordId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }

    #[test]
    fn test_record_ids_are_unique() {
        assert_ne!(RecordId::new(), RecordId::new());
    }

    #[test]
    fn test_person_matches_name_and_role() {
        let person = Person::new("Ada Lovelace", "Secretary").with_tags(["Rust"]);
        assert!(person.matches_query("ada", false));
        assert!(person.matches_query("secret", false));
        assert!(!person.matches_query("rust", false));
        assert!(person.matches_query("rust", true));
    }

    #[test]
    fn test_hit_line_uses_kind_label() {
        let person = Person::new("Ada", "Secretary");
        assert_eq!(person.hit_line(), "Member: Ada");
        assert_eq!(RecordKind::Article.to_string(), "Article");
    }
}
