//! Session - one conversation with the terminal.
//!
//! A session owns the conversation log, the router (and through it the
//! running game) and the reply scheduler. Hosts call [`Session::submit`]
//! for every input and [`Session::poll`] as time passes; replies reach the
//! log only once their display delay has elapsed.

use chrono::{DateTime, Utc};
use hive_portal::{KnowledgeProvider, Page};
use tracing::{debug, info};

use crate::config::TerminalConfig;
use crate::error::Result;
use crate::games::{GameCatalog, GameKind, GameSessionManager};
use crate::host::HostAdapter;
use crate::knowledge_base::KnowledgeBase;
use crate::message::{ConversationLog, Message};
use crate::resolver::KnowledgeResolver;
use crate::router::{Router, Turn};
use crate::scheduler::{ReplyId, Scheduler};

/// A quick-reply chip: label shown, input submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub label: &'static str,
    pub input: &'static str,
}

pub const SUGGESTIONS: &[Suggestion] = &[
    Suggestion {
        label: "Play Games",
        input: "play game",
    },
    Suggestion {
        label: "/help",
        input: "/help",
    },
    Suggestion {
        label: "Search",
        input: "search",
    },
    Suggestion {
        label: "Gallery",
        input: "gallery",
    },
    Suggestion {
        label: "Events",
        input: "events",
    },
];

/// One conversation: log, router, game slot and pending replies.
#[derive(Debug)]
pub struct Session {
    config: TerminalConfig,
    router: Router,
    log: ConversationLog,
    scheduler: Scheduler,
}

impl Session {
    /// Create a session with the built-in knowledge base and game content.
    pub fn new(config: TerminalConfig) -> Result<Self> {
        Self::with_parts(config, KnowledgeBase::builtin(), GameCatalog::default())
    }

    /// Create a session with custom knowledge and game content.
    pub fn with_parts(
        config: TerminalConfig,
        knowledge: KnowledgeBase,
        catalog: GameCatalog,
    ) -> Result<Self> {
        let resolver = KnowledgeResolver::new(knowledge)?;
        let router = Router::new(&config, resolver, GameSessionManager::new(catalog));

        let mut log = ConversationLog::new();
        if !config.greeting.is_empty() {
            log.push(Message::assistant(config.greeting.clone()));
        }

        info!(seeded = config.seed.is_some(), "session opened");
        Ok(Self {
            config,
            router,
            log,
            scheduler: Scheduler::new(),
        })
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Handle one visitor input.
    ///
    /// The input is logged at once; replies are scheduled and returned as
    /// handles. Input is accepted even while earlier replies are pending.
    pub fn submit(
        &mut self,
        input: &str,
        host: &mut dyn HostAdapter,
        provider: &dyn KnowledgeProvider,
    ) -> Vec<ReplyId> {
        let input = input.trim();
        if input.is_empty() {
            return Vec::new();
        }

        self.log.push(Message::user(input));
        let turn = self.router.route(input, host, provider);
        self.schedule(turn, host.now())
    }

    /// Follow a message's action button through the restricted-page gate.
    pub fn open_page(&mut self, page: Page, host: &mut dyn HostAdapter) -> Vec<ReplyId> {
        let turn = self.router.open_page(page, host);
        self.schedule(turn, host.now())
    }

    /// Start a game directly, replacing any running one.
    pub fn start_game(&mut self, kind: GameKind, host: &mut dyn HostAdapter) -> Vec<ReplyId> {
        let turn = self.router.start_game(kind, host);
        self.schedule(turn, host.now())
    }

    /// Deliver every reply due by `now` into the log.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Vec<Message> {
        let delivered = self.scheduler.take_due(now);
        self.deliver(delivered)
    }

    /// Deliver every pending reply immediately.
    pub fn flush(&mut self) -> Vec<Message> {
        let delivered = self.scheduler.drain();
        self.deliver(delivered)
    }

    /// Cancel one pending reply.
    pub fn cancel(&mut self, id: ReplyId) -> bool {
        self.scheduler.cancel(id)
    }

    /// When the next pending reply is due.
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.scheduler.next_due()
    }

    pub fn pending(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn active_game(&self) -> Option<GameKind> {
        self.router.games().active().map(|game| game.kind())
    }

    pub fn is_game_active(&self) -> bool {
        self.router.games().is_active()
    }

    /// Quick replies offered under the input box.
    pub fn suggestions(&self) -> &'static [Suggestion] {
        SUGGESTIONS
    }

    fn schedule(&mut self, turn: Turn, now: DateTime<Utc>) -> Vec<ReplyId> {
        if turn.clear_log {
            self.log.clear();
        }
        if turn.cancels_pending() {
            self.scheduler.cancel_all();
        }

        let ids: Vec<ReplyId> = turn
            .replies
            .into_iter()
            .map(|reply| self.scheduler.schedule(reply.message, reply.delay, now))
            .collect();
        debug!(scheduled = ids.len(), pending = self.scheduler.pending(), "turn scheduled");
        ids
    }

    fn deliver(&mut self, messages: Vec<Message>) -> Vec<Message> {
        for message in &messages {
            self.log.push(message.clone());
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_GREETING;
    use crate::host::HeadlessHost;
    use crate::message::Role;
    use chrono::{Duration, TimeZone};
    use hive_portal::PortalSnapshot;

    fn setup() -> (Session, HeadlessHost, PortalSnapshot) {
        (
            Session::new(TerminalConfig::default().with_seed(3)).unwrap(),
            HeadlessHost::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
            PortalSnapshot::sample().unwrap(),
        )
    }

    #[test]
    fn test_session_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Session>();
    }

    #[test]
    fn test_greeting_opens_log() {
        let (session, _, _) = setup();
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.log().messages()[0].text, DEFAULT_GREETING);

        let quiet = Session::new(TerminalConfig::default().with_greeting("")).unwrap();
        assert!(quiet.log().is_empty());
    }

    #[test]
    fn test_user_message_logged_before_reply() {
        let (mut session, mut host, snapshot) = setup();

        let ids = session.submit("  whoami  ", &mut host, &snapshot);
        assert_eq!(ids.len(), 1);
        assert_eq!(session.log().last().unwrap().role, Role::User);
        assert_eq!(session.log().last().unwrap().text, "whoami");

        assert!(session.poll(host.now()).is_empty());
        host.advance(Duration::seconds(3));
        let delivered = session.poll(host.now());

        assert_eq!(delivered.len(), 1);
        assert_eq!(session.log().last().unwrap().role, Role::Assistant);
    }

    #[test]
    fn test_empty_submit_is_ignored() {
        let (mut session, mut host, snapshot) = setup();
        assert!(session.submit("   ", &mut host, &snapshot).is_empty());
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_clear_empties_log_and_drops_pending() {
        let (mut session, mut host, snapshot) = setup();

        session.submit("ls", &mut host, &snapshot);
        assert_eq!(session.pending(), 1);

        session.submit("/clear", &mut host, &snapshot);
        assert!(session.log().is_empty());
        assert_eq!(session.pending(), 0);
        assert!(session.flush().is_empty());
    }

    #[test]
    fn test_navigation_cancels_earlier_replies() {
        let (mut session, mut host, snapshot) = setup();

        session.submit("search hackathon", &mut host, &snapshot);
        session.submit("cd events", &mut host, &snapshot);

        let texts: Vec<_> = session.flush().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["Opening events..."]);
        assert_eq!(host.last_page(), Some(Page::Events));
    }

    #[test]
    fn test_cancel_single_reply() {
        let (mut session, mut host, snapshot) = setup();
        let ids = session.submit("whoami", &mut host, &snapshot);

        assert!(session.cancel(ids[0]));
        assert!(session.flush().is_empty());
    }

    #[test]
    fn test_open_page_denies_admin() {
        let (mut session, mut host, _) = setup();

        session.open_page(Page::Admin, &mut host);
        let delivered = session.flush();

        assert!(host.navigations.is_empty());
        assert!(delivered[0].text.contains("ACCESS DENIED"));
    }

    #[test]
    fn test_start_game_directly() {
        let (mut session, mut host, _) = setup();

        session.start_game(GameKind::NumberGuess, &mut host);
        assert_eq!(session.active_game(), Some(GameKind::NumberGuess));

        session.start_game(GameKind::Trivia, &mut host);
        assert_eq!(session.active_game(), Some(GameKind::Trivia));
    }

    #[test]
    fn test_huge_configured_delay_does_not_panic() {
        let config = TerminalConfig::from_toml_str(
            "[delay]\nbase_ms = 9223372036854775807\nmax_ms = 9223372036854775807",
        )
        .unwrap();
        let mut session = Session::new(config).unwrap();
        let mut host = HeadlessHost::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let snapshot = PortalSnapshot::sample().unwrap();

        let ids = session.submit("whoami", &mut host, &snapshot);

        assert_eq!(ids.len(), 1);
        assert!(session.poll(host.now()).is_empty());
        assert_eq!(session.flush().len(), 1);
    }

    #[test]
    fn test_quit_drops_pending_move_reply() {
        let (mut session, mut host, snapshot) = setup();

        session.submit("play rps", &mut host, &snapshot);
        session.flush();
        session.submit("rock", &mut host, &snapshot);
        assert_eq!(session.pending(), 1);

        session.submit("quit", &mut host, &snapshot);
        let texts: Vec<_> = session.flush().into_iter().map(|m| m.text).collect();

        assert_eq!(texts, vec!["Game exited."]);
        assert!(!session.is_game_active());
    }

    #[test]
    fn test_suggestions() {
        let (session, _, _) = setup();
        let labels: Vec<_> = session.suggestions().iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Play Games", "/help", "Search", "Gallery", "Events"]);
    }

    #[test]
    fn test_next_due_tracks_pending() {
        let (mut session, mut host, snapshot) = setup();
        assert_eq!(session.next_due(), None);

        session.submit("whoami", &mut host, &snapshot);
        assert!(session.next_due().unwrap() > host.now());
    }
}
