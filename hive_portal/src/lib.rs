//! # Hive Portal
//!
//! The portal's data model - people, events, articles and media albums, plus
//! the page map of the site. This crate is the single source of truth for
//! portal records and does not contain any interpreter logic.
//!
//! Consumers read records through the [`KnowledgeProvider`] trait; the
//! bundled [`PortalSnapshot`] is an in-memory implementation that can be
//! loaded from JSON.

pub mod entities;
pub mod error;
pub mod pages;
pub mod snapshot;

pub use entities::*;
pub use error::{PortalError, Result};
pub use pages::*;
pub use snapshot::*;
