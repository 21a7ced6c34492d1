//! Command Registry - the fixed set of terminal commands.
//!
//! The registry is the [`Command`] enum. Variant order is registration
//! order, which is also the order `help` lists commands in.

mod calc;
mod handlers;

pub use calc::{evaluate, format_number, EvalError};

use chrono::{DateTime, Utc};
use hive_portal::{KnowledgeProvider, Page, Theme};
use rand::rngs::StdRng;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::emitter::ResponseEmitter;
use crate::games::GameKind;

/// Every command the terminal understands.
// DO NOT ALPHA-SORT: enum order is registration and presentation order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Command {
    // System
    Help,
    Toggle,
    Sys,
    Clear,
    Matrix,

    // Data & navigation
    Ls,
    Cd,
    Search,
    Events,
    Team,
    Blog,
    Gallery,

    // Tools & fun
    Calc,
    Weather,
    Quote,
    Play,
    Roll,
    Flip,
    Whoami,
    Sudo,
    Date,
}

/// Help-page grouping of commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Category {
    System,
    DataNav,
    ToolsFun,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Category::System => "SYSTEM",
            Category::DataNav => "DATA & NAV",
            Category::ToolsFun => "TOOLS & FUN",
        }
    }

    /// Commands in this category, in registration order.
    pub fn commands(self) -> impl Iterator<Item = Command> {
        Command::iter().filter(move |c| c.category() == self)
    }
}

/// Manual page of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDoc {
    /// Short form for the command listing.
    pub synopsis: &'static str,
    /// One- or two-word summary for the command listing.
    pub summary: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub example: &'static str,
}

impl Command {
    /// Resolve a command name. Aliases only count when the input was
    /// prefixed, so they never capture ordinary chat.
    pub fn lookup(name: &str, prefixed: bool) -> Option<Command> {
        if let Ok(command) = name.parse::<Command>() {
            if prefixed || command.accepts_bare() {
                return Some(command);
            }
            return None;
        }
        if !prefixed {
            return None;
        }
        match name.to_ascii_lowercase().as_str() {
            "open" => Some(Command::Cd),
            "status" => Some(Command::Sys),
            _ => None,
        }
    }

    /// Whether the command runs without the prefix. Bare `play ...` is
    /// chat, and goes through free-form game detection instead.
    pub fn accepts_bare(self) -> bool {
        !matches!(self, Command::Play)
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn category(self) -> Category {
        match self {
            Command::Help | Command::Toggle | Command::Sys | Command::Clear | Command::Matrix => {
                Category::System
            }
            Command::Ls
            | Command::Cd
            | Command::Search
            | Command::Events
            | Command::Team
            | Command::Blog
            | Command::Gallery => Category::DataNav,
            Command::Calc
            | Command::Weather
            | Command::Quote
            | Command::Play
            | Command::Roll
            | Command::Flip
            | Command::Whoami
            | Command::Sudo
            | Command::Date => Category::ToolsFun,
        }
    }

    pub fn doc(self) -> CommandDoc {
        match self {
            Command::Help => CommandDoc {
                synopsis: "help [command]",
                summary: "Manual",
                description: "Lists all commands, or shows the manual page of one command.",
                usage: "help [command]",
                example: "help search",
            },
            Command::Toggle => CommandDoc {
                synopsis: "toggle theme",
                summary: "Light/Dark",
                description: "Switches between Light and Dark themes.",
                usage: "toggle theme",
                example: "toggle theme",
            },
            Command::Sys => CommandDoc {
                synopsis: "sys",
                summary: "Diagnostics",
                description: "Displays system diagnostics and status.",
                usage: "sys",
                example: "sys",
            },
            Command::Clear => CommandDoc {
                synopsis: "clear",
                summary: "Clear Chat",
                description: "Clears the terminal chat history.",
                usage: "clear",
                example: "clear",
            },
            Command::Matrix => CommandDoc {
                synopsis: "matrix",
                summary: "Toggle Simulation",
                description: "Toggles the immersive Matrix digital rain simulation.",
                usage: "matrix",
                example: "matrix",
            },
            Command::Ls => CommandDoc {
                synopsis: "ls",
                summary: "List Pages",
                description: "Lists all available pages and directories in the Hive Portal.",
                usage: "ls",
                example: "ls",
            },
            Command::Cd => CommandDoc {
                synopsis: "cd [page]",
                summary: "Navigate",
                description: "Navigates to a specific page. Use '..' to go home.",
                usage: "cd [page_name]",
                example: "cd events",
            },
            Command::Search => CommandDoc {
                synopsis: "search [query]",
                summary: "Deep Search",
                description: "Performs a global search across events, team members, and articles.",
                usage: "search [query]",
                example: "search hackathon",
            },
            Command::Events => CommandDoc {
                synopsis: "events",
                summary: "List Events",
                description: "Lists the next 3 upcoming events sorted by date.",
                usage: "events",
                example: "events",
            },
            Command::Team => CommandDoc {
                synopsis: "team",
                summary: "Show Execs",
                description: "Displays core executive committee members.",
                usage: "team",
                example: "team",
            },
            Command::Blog => CommandDoc {
                synopsis: "blog",
                summary: "Latest Articles",
                description: "Shows the latest published article/insight.",
                usage: "blog",
                example: "blog",
            },
            Command::Gallery => CommandDoc {
                synopsis: "gallery",
                summary: "Random Photo",
                description: "Fetches a random image from the media gallery.",
                usage: "gallery",
                example: "gallery",
            },
            Command::Calc => CommandDoc {
                synopsis: "calc [expr]",
                summary: "Calculator",
                description: "Evaluates a mathematical expression.",
                usage: "calc [expression]",
                example: "calc 2 + 2 * 4",
            },
            Command::Weather => CommandDoc {
                synopsis: "weather",
                summary: "Local Weather",
                description: "Displays current mock weather conditions in Pokhara.",
                usage: "weather",
                example: "weather",
            },
            Command::Quote => CommandDoc {
                synopsis: "quote",
                summary: "Tech Wisdom",
                description: "Returns a random tech-related wisdom quote.",
                usage: "quote",
                example: "quote",
            },
            Command::Play => CommandDoc {
                synopsis: "play [game]",
                summary: "rps, trivia...",
                description: "Starts a mini-game (rps, number, scramble, trivia).",
                usage: "play [game_name]",
                example: "play trivia",
            },
            Command::Roll => CommandDoc {
                synopsis: "roll",
                summary: "Dice",
                description: "Rolls a 6-sided die.",
                usage: "roll",
                example: "roll",
            },
            Command::Flip => CommandDoc {
                synopsis: "flip",
                summary: "Coin Toss",
                description: "Flips a coin (Heads/Tails).",
                usage: "flip",
                example: "flip",
            },
            Command::Whoami => CommandDoc {
                synopsis: "whoami",
                summary: "Session Info",
                description: "Displays current user session info.",
                usage: "whoami",
                example: "whoami",
            },
            Command::Sudo => CommandDoc {
                synopsis: "sudo",
                summary: "Superuser",
                description: "Requests superuser privileges. Visitors never get them.",
                usage: "sudo [command]",
                example: "sudo ls",
            },
            Command::Date => CommandDoc {
                synopsis: "date",
                summary: "Clock",
                description: "Prints the current date and time.",
                usage: "date",
                example: "date",
            },
        }
    }

    /// The function implementing this command.
    pub fn handler(self) -> Handler {
        match self {
            Command::Help => handlers::help,
            Command::Toggle => handlers::toggle,
            Command::Sys => handlers::sys,
            Command::Clear => handlers::clear,
            Command::Matrix => handlers::matrix,
            Command::Ls => handlers::ls,
            Command::Cd => handlers::cd,
            Command::Search => handlers::search,
            Command::Events => handlers::events,
            Command::Team => handlers::team,
            Command::Blog => handlers::blog,
            Command::Gallery => handlers::gallery,
            Command::Calc => handlers::calc,
            Command::Weather => handlers::weather,
            Command::Quote => handlers::quote,
            Command::Play => handlers::play,
            Command::Roll => handlers::roll,
            Command::Flip => handlers::flip,
            Command::Whoami => handlers::whoami,
            Command::Sudo => handlers::sudo,
            Command::Date => handlers::date,
        }
    }

    /// Run the command.
    pub fn execute(self, ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
        (self.handler())(ctx, args)
    }
}

/// Signature shared by all command handlers.
pub type Handler = fn(&mut CommandContext<'_>, &[&str]) -> CommandResult;

/// State a handler may read, plus the emitter it may write to.
pub struct CommandContext<'a> {
    pub provider: &'a dyn KnowledgeProvider,
    pub theme: Theme,
    pub matrix_mode: bool,
    pub now: DateTime<Utc>,
    pub rng: &'a mut StdRng,
    pub emitter: &'a mut ResponseEmitter,
}

/// What a handler produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// Output to show as terminal text.
    Text(String),
    /// Nothing further to show; anything needed was emitted directly.
    None,
    /// A state change for the router to carry out.
    Effect(Effect),
}

/// Side effects a handler may request.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Switch page, then show `ack`. Restricted pages are denied instead.
    Navigate { page: Page, ack: Option<String> },
    SetTheme(Theme),
    SetMatrix(bool),
    ClearLog,
    StartGame(GameKind),
    /// Show the access-denied notice, optionally followed by `then`.
    Deny { then: Option<String> },
}
