//! Knowledge Resolver - answers free-form utterances.
//!
//! Resolution runs as a fixed cascade; the first stage that produces a
//! reply wins:
//! 1. **Affect**: word families queue avatar feedback (never a reply),
//!    except a joke request, which answers immediately
//! 2. **Compound rules**: ordered AND-conditions over keywords
//! 3. **Entity lookup**: people, then events, first match in provider order
//! 4. **Keyword scoring**: best-scoring knowledge entry
//! 5. **Fallback**: fixed hint message

mod scoring;

pub use scoring::*;

use hive_portal::{Event, KnowledgeProvider, Page, Person};
use rand::Rng;
use tracing::debug;

use crate::error::Result;
use crate::host::Emotion;
use crate::knowledge_base::{
    pick, AffectTriggers, KnowledgeBase, KnowledgeEntry, FALLBACK_RESPONSE, TECH_JOKES,
};
use crate::message::{Action, Message};

/// Which stage of the cascade produced the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Joke,
    CompoundRule,
    Person,
    Event,
    Keyword,
    Fallback,
}

/// The outcome of resolving one utterance.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub branch: Branch,
    pub message: Message,
    /// Affect feedback first, then the branch's own emotion.
    pub emotions: Vec<Emotion>,
}

/// Scores utterances against the portal and the knowledge base.
#[derive(Debug, Clone)]
pub struct KnowledgeResolver {
    base: KnowledgeBase,
    affect: AffectTriggers,
}

impl KnowledgeResolver {
    /// Create a resolver over the given knowledge base.
    pub fn new(base: KnowledgeBase) -> Result<Self> {
        Ok(Self {
            base,
            affect: AffectTriggers::new()?,
        })
    }

    /// Create a resolver over the built-in knowledge base.
    pub fn with_defaults() -> Result<Self> {
        Self::new(KnowledgeBase::builtin())
    }

    /// Resolve an utterance to a single reply.
    ///
    /// Deterministic for a fixed provider and knowledge base, except for
    /// the joke picked on a joke request.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        utterance: &str,
        provider: &dyn KnowledgeProvider,
        rng: &mut R,
    ) -> Resolution {
        let lower = utterance.trim().to_lowercase();
        let tokens = tokenize(&lower);

        // Step 1: Affect
        let reading = self.affect.scan(&lower);
        let mut emotions = reading.emotions;

        if reading.wants_joke {
            emotions.push(Emotion::Happy);
            return Resolution {
                branch: Branch::Joke,
                message: Message::assistant(pick(TECH_JOKES, rng)),
                emotions,
            };
        }

        // Step 2: Compound rules
        if let Some(rule) = self.base.matching_rule(&lower) {
            debug!(keywords = ?rule.all_of, "compound rule matched");
            return Resolution {
                branch: Branch::CompoundRule,
                message: Message::assistant(rule.response.clone()),
                emotions,
            };
        }

        // Step 3: Entity lookup
        if let Some(person) = provider
            .list_people()
            .iter()
            .find(|p| person_matches(p, &lower, &tokens))
        {
            debug!(name = %person.name, "person record matched");
            emotions.push(Emotion::Happy);
            return Resolution {
                branch: Branch::Person,
                message: person_card(person),
                emotions,
            };
        }

        if let Some(event) = provider
            .list_events()
            .iter()
            .find(|e| event_matches(e, &lower, &tokens))
        {
            debug!(title = %event.title, "event record matched");
            emotions.push(Emotion::Excited);
            return Resolution {
                branch: Branch::Event,
                message: event_card(event),
                emotions,
            };
        }

        // Step 4: Keyword scoring
        let mut board = ScoreBoard::new();
        for entry in self.base.entries() {
            board.record(entry.score(&lower));
        }

        if let Some((index, score)) = board.best() {
            debug!(index, score, "knowledge entry selected");
            if let Some(entry) = self.base.entries().get(index) {
                return Resolution {
                    branch: Branch::Keyword,
                    message: entry_reply(entry),
                    emotions,
                };
            }
        }

        // Step 5: Fallback
        debug!("no knowledge match");
        Resolution {
            branch: Branch::Fallback,
            message: Message::assistant(FALLBACK_RESPONSE),
            emotions,
        }
    }
}

/// Split a lowercased utterance into alphanumeric words.
fn tokenize(lower: &str) -> Vec<&str> {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Single-word tags must equal a token; multi-word tags match as a phrase.
fn tag_matches(tag: &str, lower: &str, tokens: &[&str]) -> bool {
    let tag = tag.trim().to_lowercase();
    if tag.is_empty() {
        return false;
    }
    if tag.contains(char::is_whitespace) {
        lower.contains(tag.as_str())
    } else {
        tokens.contains(&tag.as_str())
    }
}

fn contains_nonempty(lower: &str, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    !needle.is_empty() && lower.contains(needle.as_str())
}

fn person_matches(person: &Person, lower: &str, tokens: &[&str]) -> bool {
    contains_nonempty(lower, &person.name)
        || (!person.has_generic_role() && contains_nonempty(lower, &person.role))
        || person.tags.iter().any(|t| tag_matches(t, lower, tokens))
}

fn event_matches(event: &Event, lower: &str, tokens: &[&str]) -> bool {
    contains_nonempty(lower, &event.title)
        || event.tags.iter().any(|t| tag_matches(t, lower, tokens))
}

fn person_card(person: &Person) -> Message {
    let message = Message::assistant(format!(
        "Found record for {} ({}):\n\"{}\"",
        person.name, person.role, person.message
    ))
    .with_action(Action::new("View Profile", Page::Team));

    match &person.image {
        Some(url) => message.with_image(url.clone()),
        None => message,
    }
}

fn event_card(event: &Event) -> Message {
    let message = Message::assistant(format!(
        "Event Found: {}\nDate: {}\nStatus: {}",
        event.title,
        event.start.format("%Y-%m-%d"),
        event.status
    ))
    .with_action(Action::new("View Event", Page::Events));

    match &event.image {
        Some(url) => message.with_image(url.clone()),
        None => message,
    }
}

fn entry_reply(entry: &KnowledgeEntry) -> Message {
    let mut message = Message::assistant(entry.response.clone()).with_links(entry.links.clone());
    if let Some(action) = &entry.action {
        message = message.with_action(action.clone());
    }
    message
}
