//! Command handlers.

use hive_portal::{Page, Searchable};
use rand::seq::SliceRandom;
use rand::Rng;
use strum::IntoEnumIterator;
use tracing::debug;

use super::{evaluate, format_number, Category, Command, CommandContext, CommandResult, Effect};
use crate::games::GameKind;
use crate::host::Emotion;
use crate::knowledge_base::{pick, TECH_QUOTES};
use crate::message::Message;

const MAX_SEARCH_HITS: usize = 5;
const MAX_UPCOMING: usize = 3;
const MAX_EXECUTIVES: usize = 4;

pub(super) fn help(_ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
    if let Some(topic) = args.first() {
        let key = topic.trim_start_matches('/').to_lowercase();
        return match Command::lookup(&key, true) {
            Some(command) => {
                let doc = command.doc();
                CommandResult::Text(format!(
                    "> MAN PAGE: {}\n---------------------------\n{}\n\nUsage:   {}\nExample: {}",
                    command.name().to_uppercase(),
                    doc.description,
                    doc.usage,
                    doc.example
                ))
            }
            None => CommandResult::Text(format!(
                "Error: No manual entry for '{key}'. Available commands listed in '/help'."
            )),
        };
    }

    let mut out = String::from(
        "TERMINAL v3.2 COMMANDS\n========================\nType '/help [command]' for details (e.g., '/help search')",
    );
    for category in Category::iter() {
        out.push_str(&format!("\n\n[/] {}", category.title()));
        for command in category.commands() {
            let doc = command.doc();
            out.push_str(&format!("\n  {:<15}: {}", doc.synopsis, doc.summary));
        }
    }
    CommandResult::Text(out)
}

pub(super) fn toggle(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(target) if target.eq_ignore_ascii_case("theme") => {
            CommandResult::Effect(Effect::SetTheme(ctx.theme.toggled()))
        }
        _ => CommandResult::Text("Usage: toggle theme".to_string()),
    }
}

pub(super) fn sys(ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    ctx.emitter.feedback(Emotion::Processing);
    CommandResult::Text(format!(
        "SYSTEM DIAGNOSTICS\n------------------\nCPU: HiveMind QZ-9\nRAM: 64TB Holographic\nDB_CONNECTION: Active\nEVENTS_INDEXED: {}\nMEMBERS_ACTIVE: {}\nWING_STATUS: Deployed",
        ctx.provider.list_events().len(),
        ctx.provider.list_people().len()
    ))
}

pub(super) fn clear(_ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    CommandResult::Effect(Effect::ClearLog)
}

pub(super) fn matrix(ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    CommandResult::Effect(Effect::SetMatrix(!ctx.matrix_mode))
}

pub(super) fn ls(_ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    let listing: Vec<String> = Page::iter()
        .map(|page| {
            let perm = if page.is_restricted() {
                "drwx------ (ROOT)"
            } else {
                "drwxr-xr-x"
            };
            format!("{perm}  visitor  {page}")
        })
        .collect();
    CommandResult::Text(listing.join("\n"))
}

pub(super) fn cd(_ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
    let Some(target) = args.first() else {
        return CommandResult::Text("usage: cd [directory]".to_string());
    };
    let target = target.to_lowercase();

    if target == ".." {
        return CommandResult::Effect(Effect::Navigate {
            page: Page::Home,
            ack: Some("Directory changed: /home".to_string()),
        });
    }

    match Page::find(&target) {
        Some(page) => CommandResult::Effect(Effect::Navigate {
            page,
            ack: Some(format!("Opening {page}...")),
        }),
        None => CommandResult::Text(format!("cd: {target}: Directory not found")),
    }
}

pub(super) fn search(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Text("usage: search [query]".to_string());
    }
    let query = args.join(" ").to_lowercase();
    let provider = ctx.provider;

    // Events also match on tags; people on name and role; articles on title and body.
    let hits: Vec<String> = search_hits(provider.list_events(), &query, true)
        .chain(search_hits(provider.list_people(), &query, false))
        .chain(search_hits(provider.list_articles(), &query, false))
        .collect();
    debug!(query = %query, hits = hits.len(), "search");

    if hits.is_empty() {
        return CommandResult::Text(format!("No matches found for '{query}'"));
    }

    let mut out = format!("Search Results:\n{}", hits[..hits.len().min(MAX_SEARCH_HITS)].join("\n"));
    if hits.len() > MAX_SEARCH_HITS {
        out.push_str(&format!("\n...and {} more.", hits.len() - MAX_SEARCH_HITS));
    }
    CommandResult::Text(out)
}

fn search_hits<'a, T: Searchable>(
    records: &'a [T],
    query: &'a str,
    with_tags: bool,
) -> impl Iterator<Item = String> + 'a {
    records
        .iter()
        .filter(move |record| record.matches_query(query, with_tags))
        .map(|record| record.hit_line())
}

pub(super) fn events(ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    let mut upcoming: Vec<_> = ctx
        .provider
        .list_events()
        .iter()
        .filter(|e| e.is_upcoming(ctx.now))
        .collect();
    upcoming.sort_by_key(|e| e.start);

    if upcoming.is_empty() {
        return CommandResult::Text("No upcoming events scheduled.".to_string());
    }

    let lines: Vec<String> = upcoming
        .iter()
        .take(MAX_UPCOMING)
        .map(|e| format!("• {} ({})", e.title, e.start.format("%Y-%m-%d")))
        .collect();
    CommandResult::Text(format!("UPCOMING EVENTS:\n{}", lines.join("\n")))
}

pub(super) fn team(ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    let lines: Vec<String> = ctx
        .provider
        .list_people()
        .iter()
        .filter(|p| p.is_executive())
        .take(MAX_EXECUTIVES)
        .map(|p| format!("• {} - {}", p.name, p.role))
        .collect();

    let mut out = String::from("CORE TEAM:\n");
    for line in &lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("(Type 'cd team' for full list)");
    CommandResult::Text(out)
}

pub(super) fn blog(ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    match ctx.provider.list_articles().iter().find(|a| a.is_published()) {
        Some(article) => CommandResult::Text(format!(
            "LATEST INSIGHT:\n\"{}\" by {}\nUse 'cd articles' to read.",
            article.title, article.author
        )),
        None => CommandResult::Text("No articles published.".to_string()),
    }
}

pub(super) fn gallery(ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    let assets: Vec<_> = ctx
        .provider
        .list_media()
        .iter()
        .flat_map(|album| album.assets.iter())
        .collect();

    match assets.choose(ctx.rng) {
        Some(asset) => {
            ctx.emitter.emit(
                Message::assistant("Here's a snapshot from our gallery:").with_image(asset.url.clone()),
            );
            CommandResult::None
        }
        None => CommandResult::Text("Gallery is empty.".to_string()),
    }
}

pub(super) fn calc(ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
    match evaluate(&args.join("")) {
        Ok(value) => {
            ctx.emitter.feedback(Emotion::Thinking);
            CommandResult::Text(format!("Result: {}", format_number(value)))
        }
        Err(err) => {
            debug!(error = %err, "calc rejected expression");
            ctx.emitter.feedback(Emotion::Confused);
            CommandResult::Text("Error: Invalid Expression".to_string())
        }
    }
}

pub(super) fn weather(ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    ctx.emitter.feedback(Emotion::Happy);
    CommandResult::Text(
        "Pokhara, Nepal:\nTemp: 24°C ☀️\nHumidity: 65%\nCondition: Perfect for coding!".to_string(),
    )
}

pub(super) fn quote(ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    ctx.emitter.feedback(Emotion::Thinking);
    CommandResult::Text(format!("\"{}\"", pick(TECH_QUOTES, ctx.rng)))
}

pub(super) fn play(_ctx: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
    let named = args.first().and_then(|g| g.parse::<GameKind>().ok());
    match named.or_else(|| GameKind::detect(&args.join(" ").to_lowercase())) {
        Some(kind) => CommandResult::Effect(Effect::StartGame(kind)),
        None => CommandResult::Text("Available games: rps, number, scramble, trivia".to_string()),
    }
}

pub(super) fn roll(ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    let roll: u8 = ctx.rng.gen_range(1..=6);
    ctx.emitter.feedback(Emotion::Excited);
    CommandResult::Text(format!("Rolled: [ {roll} ]"))
}

pub(super) fn flip(ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    let side = if ctx.rng.gen_bool(0.5) { "Heads" } else { "Tails" };
    ctx.emitter.feedback(Emotion::Thinking);
    CommandResult::Text(format!("Coin: **{side}**"))
}

pub(super) fn whoami(_ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    CommandResult::Text("visitor@gandaki-hive\nLevel: 1 (Guest)".to_string())
}

pub(super) fn sudo(_ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    CommandResult::Effect(Effect::Deny {
        then: Some("This incident will be reported.".to_string()),
    })
}

pub(super) fn date(ctx: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    CommandResult::Text(ctx.now.format("%a %b %d %Y %H:%M:%S UTC").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::ResponseEmitter;
    use chrono::{DateTime, TimeZone, Utc};
    use hive_portal::{KnowledgeProvider, PortalSnapshot, Theme};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    fn run_with(
        provider: &dyn KnowledgeProvider,
        command: Command,
        args: &[&str],
    ) -> (CommandResult, ResponseEmitter) {
        let mut rng = StdRng::seed_from_u64(21);
        let mut emitter = ResponseEmitter::default();
        let result = {
            let mut ctx = CommandContext {
                provider,
                theme: Theme::Light,
                matrix_mode: false,
                now: now(),
                rng: &mut rng,
                emitter: &mut emitter,
            };
            command.execute(&mut ctx, args)
        };
        (result, emitter)
    }

    fn text(command: Command, args: &[&str]) -> String {
        let snapshot = PortalSnapshot::sample().unwrap();
        match run_with(&snapshot, command, args).0 {
            CommandResult::Text(text) => text,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_help_lists_categories_in_order() {
        let out = text(Command::Help, &[]);
        let system = out.find("[/] SYSTEM").unwrap();
        let data = out.find("[/] DATA & NAV").unwrap();
        let tools = out.find("[/] TOOLS & FUN").unwrap();

        assert!(system < data && data < tools);
        assert!(out.contains("  search [query] : Deep Search"));
    }

    #[test]
    fn test_help_man_page() {
        let out = text(Command::Help, &["/search"]);
        assert_eq!(
            out,
            "> MAN PAGE: SEARCH\n---------------------------\nPerforms a global search across events, team members, and articles.\n\nUsage:   search [query]\nExample: search hackathon"
        );
    }

    #[test]
    fn test_help_unknown_topic() {
        assert_eq!(
            text(Command::Help, &["Frobnicate"]),
            "Error: No manual entry for 'frobnicate'. Available commands listed in '/help'."
        );
    }

    #[test]
    fn test_ls_marks_admin_as_root() {
        let out = text(Command::Ls, &[]);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines[0], "drwxr-xr-x  visitor  home");
        assert_eq!(lines.last().unwrap(), &"drwx------ (ROOT)  visitor  admin");
        assert_eq!(lines.len(), Page::iter().count());
    }

    #[test]
    fn test_cd_variants() {
        let snapshot = PortalSnapshot::sample().unwrap();

        assert_eq!(
            run_with(&snapshot, Command::Cd, &["EVE"]).0,
            CommandResult::Effect(Effect::Navigate {
                page: Page::Events,
                ack: Some("Opening events...".to_string()),
            })
        );
        assert_eq!(
            run_with(&snapshot, Command::Cd, &[".."]).0,
            CommandResult::Effect(Effect::Navigate {
                page: Page::Home,
                ack: Some("Directory changed: /home".to_string()),
            })
        );
        assert_eq!(text(Command::Cd, &["nowhere"]), "cd: nowhere: Directory not found");
        assert_eq!(text(Command::Cd, &[]), "usage: cd [directory]");
    }

    #[test]
    fn test_search_hits_and_misses() {
        let out = text(Command::Search, &["hackathon"]);
        assert!(out.starts_with("Search Results:\nEvent: BIT Hackathon 3.0"));
        assert!(out.contains("Article: Hackathon 2.0 Recap"));

        assert_eq!(text(Command::Search, &["Zebra"]), "No matches found for 'zebra'");
        assert_eq!(text(Command::Search, &[]), "usage: search [query]");
    }

    #[test]
    fn test_search_truncates_after_five() {
        let mut snapshot = PortalSnapshot::new();
        for i in 0..8 {
            snapshot.add_person(hive_portal::Person::new(format!("Bee {i}"), "Active Member"));
        }

        let CommandResult::Text(out) = run_with(&snapshot, Command::Search, &["bee"]).0 else {
            panic!("expected text");
        };
        assert_eq!(out.lines().count(), 1 + 5 + 1);
        assert!(out.ends_with("...and 3 more."));
    }

    #[test]
    fn test_events_sorted_and_limited() {
        assert_eq!(
            text(Command::Events, &[]),
            "UPCOMING EVENTS:\n• Intro to Rust Workshop (2025-02-10)\n• BIT Hackathon 3.0 (2025-03-15)\n• Global Innovation Summit 2025 (2025-05-20)"
        );
    }

    #[test]
    fn test_events_none_upcoming() {
        let (result, _) = run_with(&PortalSnapshot::new(), Command::Events, &[]);
        assert_eq!(
            result,
            CommandResult::Text("No upcoming events scheduled.".to_string())
        );
    }

    #[test]
    fn test_team_lists_executives() {
        let out = text(Command::Team, &[]);
        assert!(out.starts_with("CORE TEAM:\n• Nirajan Dhakal - President"));
        assert!(!out.contains("Ramesh"));
        assert!(!out.contains("Faculty"));
        assert!(out.ends_with("(Type 'cd team' for full list)"));
    }

    #[test]
    fn test_blog_first_published() {
        assert_eq!(
            text(Command::Blog, &[]),
            "LATEST INSIGHT:\n\"Why Rust Is Eating Systems Programming\" by Sita Sharma\nUse 'cd articles' to read."
        );
    }

    #[test]
    fn test_gallery_emits_image() {
        let snapshot = PortalSnapshot::sample().unwrap();
        let (result, emitter) = run_with(&snapshot, Command::Gallery, &[]);

        assert_eq!(result, CommandResult::None);
        let message = &emitter.replies()[0].message;
        assert_eq!(message.text, "Here's a snapshot from our gallery:");
        let url = message.attachments.image.as_deref().unwrap();
        assert!(snapshot.all_assets().any(|a| a.url == url));
    }

    #[test]
    fn test_gallery_empty() {
        let (result, _) = run_with(&PortalSnapshot::new(), Command::Gallery, &[]);
        assert_eq!(result, CommandResult::Text("Gallery is empty.".to_string()));
    }

    #[test]
    fn test_calc() {
        assert_eq!(text(Command::Calc, &["2", "+", "2", "*", "4"]), "Result: 10");
        assert_eq!(text(Command::Calc, &["1/0"]), "Error: Invalid Expression");
        assert_eq!(text(Command::Calc, &[]), "Error: Invalid Expression");
    }

    #[test]
    fn test_toggle() {
        let snapshot = PortalSnapshot::sample().unwrap();
        assert_eq!(
            run_with(&snapshot, Command::Toggle, &["theme"]).0,
            CommandResult::Effect(Effect::SetTheme(Theme::Dark))
        );
        assert_eq!(text(Command::Toggle, &["lights"]), "Usage: toggle theme");
    }

    #[test]
    fn test_play() {
        let snapshot = PortalSnapshot::sample().unwrap();
        assert_eq!(
            run_with(&snapshot, Command::Play, &["Trivia"]).0,
            CommandResult::Effect(Effect::StartGame(GameKind::Trivia))
        );
        assert_eq!(
            run_with(&snapshot, Command::Play, &["some", "scramble"]).0,
            CommandResult::Effect(Effect::StartGame(GameKind::WordScramble))
        );
        assert_eq!(
            text(Command::Play, &["chess"]),
            "Available games: rps, number, scramble, trivia"
        );
    }

    #[test]
    fn test_fun_commands() {
        let roll = text(Command::Roll, &[]);
        assert!(roll.starts_with("Rolled: [ ") && roll.ends_with(" ]"));

        let flip = text(Command::Flip, &[]);
        assert!(flip == "Coin: **Heads**" || flip == "Coin: **Tails**");

        assert!(text(Command::Quote, &[]).starts_with('"'));
        assert_eq!(text(Command::Whoami, &[]), "visitor@gandaki-hive\nLevel: 1 (Guest)");
        assert_eq!(text(Command::Date, &[]), "Wed Jan 01 2025 00:00:00 UTC");
        assert!(text(Command::Sys, &[]).contains("EVENTS_INDEXED: 5\nMEMBERS_ACTIVE: 5"));
    }

    #[test]
    fn test_feedback_from_handlers() {
        let snapshot = PortalSnapshot::sample().unwrap();
        let (_, emitter) = run_with(&snapshot, Command::Weather, &[]);
        assert_eq!(emitter.emotions(), &[Emotion::Happy]);
    }
}
