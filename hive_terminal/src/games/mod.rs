//! Game Session Manager - owns the one running mini-game.
//!
//! While a game is active every non-exit input belongs to it. A game ends
//! when it reaches its terminal condition, on an explicit exit, or when a
//! new game replaces it.

mod catalog;
mod modes;

pub use catalog::*;
pub use modes::*;

use rand::Rng;
use tracing::info;

use crate::emitter::ResponseEmitter;
use crate::host::Emotion;
use crate::message::Message;

/// Words that end a running game.
pub const EXIT_KEYWORDS: &[&str] = &["quit", "exit"];

/// Check if input is an exit keyword, with or without the command prefix.
pub fn is_exit_keyword(input: &str, prefix: &str) -> bool {
    let input = input.trim();
    let bare = if prefix.is_empty() {
        input
    } else {
        input.strip_prefix(prefix).unwrap_or(input)
    };
    EXIT_KEYWORDS.iter().any(|k| bare.eq_ignore_ascii_case(k))
}

/// Holds the active game, if any.
#[derive(Debug, Clone, Default)]
pub struct GameSessionManager {
    catalog: GameCatalog,
    active: Option<GameSession>,
}

impl GameSessionManager {
    pub fn new(catalog: GameCatalog) -> Self {
        Self {
            catalog,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&GameSession> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start a game, replacing any running one.
    ///
    /// Returns false when the catalog has no content for the mode; the
    /// previous game, if any, keeps running.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        kind: GameKind,
        rng: &mut R,
        emitter: &mut ResponseEmitter,
    ) -> bool {
        let Some((session, prompt)) = GameSession::start(kind, &self.catalog, rng) else {
            emitter.emit(Message::assistant(format!(
                "{} has no content loaded.",
                kind.title()
            )));
            return false;
        };

        if let Some(previous) = self.active.replace(session) {
            info!(previous = %previous.kind(), next = %kind, "game replaced");
        } else {
            info!(game = %kind, "game started");
        }

        emitter.emit(Message::assistant(prompt));
        emitter.feedback(Emotion::Excited);
        true
    }

    /// Feed one input to the running game. Returns `None` when no game runs.
    pub fn handle<R: Rng + ?Sized>(
        &mut self,
        input: &str,
        rng: &mut R,
        emitter: &mut ResponseEmitter,
    ) -> Option<Progress> {
        let session = self.active.as_mut()?;
        let progress = session.play(input, &self.catalog, rng, emitter);

        if progress == Progress::Finished {
            if let Some(finished) = self.active.take() {
                info!(game = %finished.kind(), score = finished.score, "game finished");
            }
        }
        Some(progress)
    }

    /// End the running game without scoring. Returns false if none ran.
    pub fn quit(&mut self, emitter: &mut ResponseEmitter) -> bool {
        match self.active.take() {
            Some(session) => {
                info!(game = %session.kind(), "game exited");
                emitter.emit(Message::assistant("Game exited."));
                true
            }
            None => false,
        }
    }
}
