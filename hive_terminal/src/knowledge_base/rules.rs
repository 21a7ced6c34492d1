//! Compound rules: every keyword must appear.

use serde::{Deserialize, Serialize};

/// An AND-condition over keywords mapped to a fixed answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundRule {
    pub all_of: Vec<String>,
    pub response: String,
}

impl CompoundRule {
    pub fn new<I, S>(all_of: I, response: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            all_of: all_of
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            response: response.into(),
        }
    }

    /// Check a lowercased utterance. A rule with no keywords never matches.
    pub fn matches(&self, utterance: &str) -> bool {
        !self.all_of.is_empty() && self.all_of.iter().all(|k| utterance.contains(k.as_str()))
    }
}
