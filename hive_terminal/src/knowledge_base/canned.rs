//! Canned lines: jokes, quotes and the fallback reply.

use rand::seq::SliceRandom;
use rand::Rng;

/// Reply when nothing in the knowledge base scores.
pub const FALLBACK_RESPONSE: &str = "I'm not sure about that specific detail yet. Try asking about 'Events', 'Team', 'Gallery', or 'Contact info'. I'm here to help!";

pub const TECH_JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs! 🐛",
    "I would tell you a UDP joke, but you might not get it.",
    "There are 10 types of people in the world: those who understand binary, and those who don't.",
    "A SQL query walks into a bar, walks up to two tables and asks... 'Can I join you?'",
    "How many programmers does it take to change a light bulb? None, that's a hardware problem.",
];

pub const TECH_QUOTES: &[&str] = &[
    "Talk is cheap. Show me the code. - Linus Torvalds",
    "Programs must be written for people to read, and only incidentally for machines to execute. - Harold Abelson",
    "Truth can only be found in one place: the code. - Robert C. Martin",
    "Code is like humor. When you have to explain it, it's bad. - Cory House",
    "Simplicity is the soul of efficiency. - Austin Freeman",
];

/// Pick one line uniformly. Empty pools yield an empty string.
pub fn pick<'a, R: Rng + ?Sized>(pool: &[&'a str], rng: &mut R) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}
