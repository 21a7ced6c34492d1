//! Command Router - decides where each input goes.
//!
//! The routing algorithm works as follows:
//! 1. **Trim**: empty input is a no-op
//! 2. **Game**: while a game runs, exit keywords end it and everything
//!    else is a move
//! 3. **Command**: prefixed input, or a first word naming a command that
//!    runs bare (everything but `play`)
//! 4. **Play**: free-form input mentioning "play" starts a game
//! 5. **Knowledge**: everything else goes to the resolver

use hive_portal::{KnowledgeProvider, Page};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::commands::{Command, CommandContext, CommandResult, Effect};
use crate::config::TerminalConfig;
use crate::emitter::{DelayPolicy, Reply, ResponseEmitter};
use crate::games::{is_exit_keyword, GameKind, GameSessionManager};
use crate::host::{Emotion, HostAdapter, Setting};
use crate::message::{Message, MessageKind};
use crate::resolver::KnowledgeResolver;

pub const ACCESS_DENIED: &str = "🚫 ACCESS DENIED: Admin privileges required.";

const GAME_MENU: &str = "I can play: RPS, Number Guess, Scramble, Trivia.";

/// Everything one input produced.
#[derive(Debug, Clone, Default)]
pub struct Turn {
    /// Outbound messages with their display delays, in emission order.
    pub replies: Vec<Reply>,
    /// Feedback already forwarded to the host.
    pub emotions: Vec<Emotion>,
    /// The visitor asked to clear the conversation.
    pub clear_log: bool,
    /// Page the host was sent to.
    pub navigated: Option<Page>,
    /// A running game was exited.
    pub game_ended: bool,
}

impl Turn {
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.replies.iter().map(|reply| &reply.message)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.messages().map(|m| m.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty() && self.emotions.is_empty() && !self.clear_log
    }

    /// Replies of earlier turns should be dropped.
    pub fn cancels_pending(&self) -> bool {
        self.clear_log || self.navigated.is_some() || self.game_ended
    }
}

/// How the router classified an input.
enum Route<'a> {
    Command(Command, Vec<&'a str>),
    UnknownCommand(String),
    FreeForm,
}

/// Routes input to games, commands or the knowledge resolver.
#[derive(Debug)]
pub struct Router {
    prefix: String,
    policy: DelayPolicy,
    resolver: KnowledgeResolver,
    games: GameSessionManager,
    rng: StdRng,
}

impl Router {
    /// Create a router. The RNG is seeded from the config when a seed is set.
    pub fn new(config: &TerminalConfig, resolver: KnowledgeResolver, games: GameSessionManager) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            prefix: config.command_prefix.clone(),
            policy: config.delay.into(),
            resolver,
            games,
            rng,
        }
    }

    pub fn games(&self) -> &GameSessionManager {
        &self.games
    }

    /// Route one raw input.
    pub fn route(
        &mut self,
        input: &str,
        host: &mut dyn HostAdapter,
        provider: &dyn KnowledgeProvider,
    ) -> Turn {
        let input = input.trim();
        if input.is_empty() {
            return Turn::default();
        }

        let mut turn = Turn::default();
        let mut emitter = ResponseEmitter::new(self.policy);

        // Step 1: A running game owns the input
        if self.games.is_active() {
            if is_exit_keyword(input, &self.prefix) {
                turn.game_ended = self.games.quit(&mut emitter);
            } else {
                debug!("input routed to game");
                self.games.handle(input, &mut self.rng, &mut emitter);
            }
            return finish(turn, emitter, host);
        }

        // Step 2: Structured commands
        match self.classify(input) {
            Route::Command(command, args) => {
                debug!(command = %command, ?args, "dispatching command");
                self.dispatch(command, &args, host, provider, &mut emitter, &mut turn);
            }
            Route::UnknownCommand(name) => {
                debug!(name = %name, "unknown command");
                emitter.emit(Message::output(format!("Command not found: {name}")));
            }
            Route::FreeForm => self.converse(input, provider, &mut emitter),
        }

        finish(turn, emitter, host)
    }

    /// Follow a page link through the restricted-page gate.
    pub fn open_page(&mut self, page: Page, host: &mut dyn HostAdapter) -> Turn {
        let mut turn = Turn::default();
        let mut emitter = ResponseEmitter::new(self.policy);
        navigate(page, None, host, &mut emitter, &mut turn);
        finish(turn, emitter, host)
    }

    /// Start a game directly, replacing any running one.
    pub fn start_game(&mut self, kind: GameKind, host: &mut dyn HostAdapter) -> Turn {
        let mut emitter = ResponseEmitter::new(self.policy);
        self.games.start(kind, &mut self.rng, &mut emitter);
        finish(Turn::default(), emitter, host)
    }

    fn classify<'a>(&self, input: &'a str) -> Route<'a> {
        let stripped = if self.prefix.is_empty() {
            None
        } else {
            input.strip_prefix(self.prefix.as_str())
        };
        let prefixed = stripped.is_some();

        let mut words = stripped.unwrap_or(input).split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        match Command::lookup(name, prefixed) {
            Some(command) => Route::Command(command, args),
            None if prefixed => Route::UnknownCommand(name.to_lowercase()),
            None => Route::FreeForm,
        }
    }

    fn dispatch(
        &mut self,
        command: Command,
        args: &[&str],
        host: &mut dyn HostAdapter,
        provider: &dyn KnowledgeProvider,
        emitter: &mut ResponseEmitter,
        turn: &mut Turn,
    ) {
        let result = {
            let mut ctx = CommandContext {
                provider,
                theme: host.current_theme(),
                matrix_mode: host.matrix_mode(),
                now: host.now(),
                rng: &mut self.rng,
                emitter: &mut *emitter,
            };
            command.execute(&mut ctx, args)
        };

        match result {
            CommandResult::Text(text) => emitter.emit(Message::output(text)),
            CommandResult::None => {}
            CommandResult::Effect(effect) => self.apply(effect, host, emitter, turn),
        }
    }

    fn apply(
        &mut self,
        effect: Effect,
        host: &mut dyn HostAdapter,
        emitter: &mut ResponseEmitter,
        turn: &mut Turn,
    ) {
        match effect {
            Effect::Navigate { page, ack } => navigate(page, ack, host, emitter, turn),
            Effect::SetTheme(theme) => {
                host.set_setting(Setting::Theme(theme));
                emitter.emit(Message::output(format!(
                    "Theme: {}",
                    theme.to_string().to_uppercase()
                )));
                emitter.feedback(Emotion::Happy);
            }
            Effect::SetMatrix(on) => {
                host.set_setting(Setting::MatrixMode(on));
                let text = if on {
                    "Wake up, Neo...\nThe Matrix has you.\n(Type 'matrix' again to exit)"
                } else {
                    "Disconnecting from the Matrix... Welcome back to reality."
                };
                emitter.emit(Message::output(text).with_kind(MessageKind::SpecialEffect));
                emitter.feedback(Emotion::Matrix);
            }
            Effect::ClearLog => turn.clear_log = true,
            Effect::StartGame(kind) => {
                self.games.start(kind, &mut self.rng, emitter);
            }
            Effect::Deny { then } => {
                deny(emitter);
                if let Some(text) = then {
                    emitter.emit(Message::output(text));
                }
            }
        }
    }

    fn converse(&mut self, input: &str, provider: &dyn KnowledgeProvider, emitter: &mut ResponseEmitter) {
        let lower = input.to_lowercase();

        if lower.contains("play") {
            match GameKind::detect(&lower) {
                Some(kind) => {
                    self.games.start(kind, &mut self.rng, emitter);
                }
                None => emitter.emit(Message::assistant(GAME_MENU)),
            }
            return;
        }

        let resolution = self.resolver.resolve(input, provider, &mut self.rng);
        debug!(branch = ?resolution.branch, "utterance resolved");
        for emotion in resolution.emotions {
            emitter.feedback(emotion);
        }
        emitter.emit(resolution.message);
    }
}

fn navigate(
    page: Page,
    ack: Option<String>,
    host: &mut dyn HostAdapter,
    emitter: &mut ResponseEmitter,
    turn: &mut Turn,
) {
    if page.is_restricted() {
        warn!(page = %page, "blocked navigation to restricted page");
        deny(emitter);
        return;
    }

    info!(page = %page, "navigating");
    host.navigate_to(page);
    turn.navigated = Some(page);
    if let Some(ack) = ack {
        emitter.emit(Message::output(ack));
    }
}

fn deny(emitter: &mut ResponseEmitter) {
    emitter.emit(Message::output(ACCESS_DENIED));
    emitter.feedback(Emotion::Denied);
}

/// Hand feedback to the host and pack the emitter's output into the turn.
fn finish(mut turn: Turn, mut emitter: ResponseEmitter, host: &mut dyn HostAdapter) -> Turn {
    emitter.forward_feedback(host);
    let (replies, emotions) = emitter.finish();
    turn.replies = replies;
    turn.emotions = emotions;
    turn
}
