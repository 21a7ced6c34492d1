//! Team member definitions.

use serde::{Deserialize, Serialize};

use super::{RecordId, RecordKind, Searchable};

/// Role shared by every ordinary member; too generic to identify anyone.
pub const GENERIC_ROLE: &str = "Active Member";

/// A member of the club team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub id: RecordId,
    pub name: String,
    pub role: String,
    /// Short personal message shown on the profile card.
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Person {
    /// Create a new person with the given name and role.
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            name: name.into(),
            role: role.into(),
            message: String::new(),
            image: None,
            tags: Vec::new(),
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
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

    /// Check if the person holds the generic member role.
    pub fn has_generic_role(&self) -> bool {
        self.role.eq_ignore_ascii_case(GENERIC_ROLE)
    }

    /// Check if the role names one of the executive positions.
    pub fn is_executive(&self) -> bool {
        ["President", "Secretary", "Coordinator"]
            .iter()
            .any(|title| self.role.contains(title))
    }
}

impl Searchable for Person {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn body(&self) -> &str {
        &self.role
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Person
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_person() {
        let person = Person::new("Nirajan Dhakal", "President");
        assert_eq!(person.name, "Nirajan Dhakal");
        assert!(person.image.is_none());
        assert!(person.message.is_empty());
    }

    #[test]
    fn test_generic_role() {
        assert!(Person::new("A", "active member").has_generic_role());
        assert!(!Person::new("B", "Vice President").has_generic_role());
    }

    #[test]
    fn test_is_executive() {
        assert!(Person::new("A", "Vice President").is_executive());
        assert!(Person::new("B", "Event Coordinator").is_executive());
        assert!(!Person::new("C", "Faculty Advisor").is_executive());
    }
}
