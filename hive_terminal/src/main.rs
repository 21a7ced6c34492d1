//! Interactive console front end for the Hive Terminal.
//!
//! Reads one input per line from stdin and prints replies as their typing
//! delay elapses. Logs go to stderr; set `RUST_LOG` to change the level.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;

use chrono::{DateTime, Utc};
use clap::Parser;
use hive_portal::{Page, PortalSnapshot, Theme};
use hive_terminal::{
    DelayConfig, Emotion, HostAdapter, Message, Role, Session, Setting, TerminalConfig,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hive-terminal", about = "Chat with the Hive portal terminal")]
struct Args {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Portal snapshot in JSON. Defaults to the bundled sample.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Seed for games and random picks.
    #[arg(long)]
    seed: Option<u64>,

    /// Print replies immediately.
    #[arg(long)]
    no_delay: bool,
}

/// Host that prints page changes and settings to the console.
struct ConsoleHost {
    page: Page,
    theme: Theme,
    matrix: bool,
}

impl HostAdapter for ConsoleHost {
    fn navigate_to(&mut self, page: Page) {
        self.page = page;
        println!("  [navigated to /{page}]");
    }

    fn set_setting(&mut self, setting: Setting) {
        match setting {
            Setting::Theme(theme) => self.theme = theme,
            Setting::MatrixMode(on) => self.matrix = on,
        }
    }

    fn current_theme(&self) -> Theme {
        self.theme
    }

    fn matrix_mode(&self) -> bool {
        self.matrix
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn feedback(&mut self, emotion: Emotion) {
        debug!(?emotion, "avatar feedback");
    }
}

fn print_message(message: &Message) {
    let speaker = match message.role {
        Role::User => "you",
        Role::Assistant => "hive",
    };
    for (i, line) in message.text.lines().enumerate() {
        if i == 0 {
            println!("{speaker}> {line}");
        } else {
            println!("      {line}");
        }
    }

    let attachments = &message.attachments;
    if let Some(image) = &attachments.image {
        println!("      [image: {image}]");
    }
    if let Some(action) = &attachments.action {
        println!("      [{} -> /{}]", action.label, action.page);
    }
    for link in &attachments.links {
        println!("      [{}: {}]", link.label, link.url);
    }
}

fn main() -> hive_terminal::Result<()> {
    let args = Args::parse();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .try_init();

    let mut config = match &args.config {
        Some(path) => TerminalConfig::load(path)?,
        None => TerminalConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.no_delay {
        config.delay = DelayConfig {
            base_ms: 0,
            per_char_ms: 0,
            max_ms: 0,
        };
    }

    let snapshot = match &args.data {
        Some(path) => PortalSnapshot::load(path)?,
        None => PortalSnapshot::sample()?,
    };
    info!(
        people = snapshot.people.len(),
        events = snapshot.events.len(),
        "portal snapshot loaded"
    );

    let mut host = ConsoleHost {
        page: Page::Home,
        theme: Theme::default(),
        matrix: false,
    };
    let mut session = Session::new(config)?;

    for message in session.log().iter() {
        print_message(message);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        session.submit(&line, &mut host, &snapshot);

        while let Some(due) = session.next_due() {
            let wait = (due - Utc::now()).to_std().unwrap_or_default();
            thread::sleep(wait);
            for message in session.poll(Utc::now()) {
                print_message(&message);
            }
        }
    }

    info!(page = %host.page, "session closed");
    Ok(())
}
