//! Knowledge Base module - the static answers the assistant can give.
//!
//! The knowledge base consists of:
//! - **Entries**: keyword sets with a canned response, scored against an utterance
//! - **Compound rules**: multi-keyword AND-conditions checked before anything else
//! - **Affect triggers**: word families that only move the avatar's mood
//! - **Canned lines**: jokes, quotes and the fallback reply

mod affect;
mod base;
mod canned;
mod entry;
mod rules;

pub use affect::*;
pub use base::*;
pub use canned::*;
pub use entry::*;
pub use rules::*;
