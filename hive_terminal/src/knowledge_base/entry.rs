//! Keyword entries - scored answers in the knowledge base.

use serde::{Deserialize, Serialize};

use crate::message::{Action, Link};

/// Bonus for an utterance that is exactly one of the keywords.
pub const EXACT_MATCH_BONUS: u32 = 2;

/// A canned answer selected by keyword overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Lowercase keywords, in declaration order.
    pub keywords: Vec<String>,

    /// Reply text.
    pub response: String,

    /// Optional button sending the visitor to a page.
    #[serde(default)]
    pub action: Option<Action>,

    /// External links rendered under the reply.
    #[serde(default)]
    pub links: Vec<Link>,
}

impl KnowledgeEntry {
    /// Create a new entry. Keywords are stored lowercased.
    pub fn new<I, S>(keywords: I, response: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            response: response.into(),
            action: None,
            links: Vec::new(),
        }
    }

    /// Attach a navigation action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Attach external links.
    pub fn with_links(mut self, links: impl IntoIterator<Item = Link>) -> Self {
        self.links.extend(links);
        self
    }

    /// Score an utterance that is already trimmed and lowercased.
    ///
    /// One point per keyword contained anywhere in the utterance, plus
    /// [`EXACT_MATCH_BONUS`] when the utterance is exactly a keyword.
    pub fn score(&self, utterance: &str) -> u32 {
        let contained = self
            .keywords
            .iter()
            .filter(|k| utterance.contains(k.as_str()))
            .count() as u32;

        if self.is_exact_match(utterance) {
            contained + EXACT_MATCH_BONUS
        } else {
            contained
        }
    }

    /// Check if the utterance equals one of the keywords.
    pub fn is_exact_match(&self, utterance: &str) -> bool {
        self.keywords.iter().any(|k| k == utterance)
    }
}
