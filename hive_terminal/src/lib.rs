//! # Hive Terminal
//!
//! The portal's conversational command interpreter. Visitor input is routed
//! to a running mini-game, a structured command, or the knowledge resolver;
//! replies are paced by a typing delay and delivered through a cancellable
//! scheduler.
//!
//! Portal records come from any [`hive_portal::KnowledgeProvider`]; page
//! changes, theme switches and mascot feedback go to a [`HostAdapter`].

pub mod commands;
pub mod config;
pub mod emitter;
pub mod error;
pub mod games;
pub mod host;
pub mod knowledge_base;
pub mod message;
pub mod resolver;
pub mod router;
pub mod scheduler;
pub mod session;

pub use commands::{Category, Command, CommandDoc, CommandResult, Effect, EvalError};
pub use config::{DelayConfig, TerminalConfig, DEFAULT_GREETING};
pub use emitter::{DelayPolicy, Reply, ResponseEmitter};
pub use error::{Result, TerminalError};
pub use games::{GameCatalog, GameKind, GameSessionManager, Progress};
pub use host::{Emotion, HeadlessHost, HostAdapter, Setting};
pub use knowledge_base::{KnowledgeBase, KnowledgeEntry};
pub use message::{Action, Attachments, ConversationLog, Link, Message, MessageKind, Role};
pub use resolver::{Branch, KnowledgeResolver, Resolution};
pub use router::{Router, Turn, ACCESS_DENIED};
pub use scheduler::{ReplyId, Scheduler};
pub use session::{Session, Suggestion, SUGGESTIONS};
