//! Game modes and their state machines.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use super::GameCatalog;
use crate::emitter::ResponseEmitter;
use crate::host::Emotion;
use crate::message::Message;

/// The available mini-games. Serialized names are the `play` keywords.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum GameKind {
    #[strum(serialize = "rps")]
    RockPaperScissors,
    #[strum(serialize = "number")]
    NumberGuess,
    #[strum(serialize = "scramble")]
    WordScramble,
    #[strum(serialize = "trivia")]
    Trivia,
}

impl GameKind {
    /// First game whose keyword appears in a lowercased utterance.
    pub fn detect(utterance: &str) -> Option<GameKind> {
        GameKind::iter().find(|kind| utterance.contains(kind.as_ref()))
    }

    /// Human-readable name.
    pub fn title(self) -> &'static str {
        match self {
            GameKind::RockPaperScissors => "RPS",
            GameKind::NumberGuess => "Number Guess",
            GameKind::WordScramble => "Scramble",
            GameKind::Trivia => "Trivia",
        }
    }
}

/// A rock-paper-scissors hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors) | (Move::Paper, Move::Rock) | (Move::Scissors, Move::Paper)
        )
    }
}

/// Mode-specific state of a running game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameState {
    RockPaperScissors,
    NumberGuess { target: u32 },
    WordScramble { answer: String, scrambled: String },
    Trivia { question_index: usize },
}

/// Whether a game continues after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Continue,
    Finished,
}

/// The one running game of a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub state: GameState,
    pub score: u32,
}

impl GameSession {
    /// Set up a new game and return it with its opening prompt.
    ///
    /// Returns `None` when the catalog has no content for the mode.
    pub fn start<R: Rng + ?Sized>(
        kind: GameKind,
        catalog: &GameCatalog,
        rng: &mut R,
    ) -> Option<(GameSession, String)> {
        let (state, prompt) = match kind {
            GameKind::RockPaperScissors => (
                GameState::RockPaperScissors,
                "Rock, Paper, Scissors! Type your move.".to_string(),
            ),
            GameKind::NumberGuess => (
                GameState::NumberGuess {
                    target: rng.gen_range(1..=100),
                },
                "I'm thinking of a number (1-100). Guess it!".to_string(),
            ),
            GameKind::WordScramble => {
                let answer = catalog.scramble_words.choose(rng)?.to_uppercase();
                let scrambled = scramble(&answer, rng);
                let prompt = format!("Unscramble: {scrambled}");
                (GameState::WordScramble { answer, scrambled }, prompt)
            }
            GameKind::Trivia => {
                let first = catalog.trivia.first()?;
                (
                    GameState::Trivia { question_index: 0 },
                    format!("Trivia Q1: {}", first.render()),
                )
            }
        };

        Some((GameSession { state, score: 0 }, prompt))
    }

    pub fn kind(&self) -> GameKind {
        match self.state {
            GameState::RockPaperScissors => GameKind::RockPaperScissors,
            GameState::NumberGuess { .. } => GameKind::NumberGuess,
            GameState::WordScramble { .. } => GameKind::WordScramble,
            GameState::Trivia { .. } => GameKind::Trivia,
        }
    }

    /// Apply one move.
    pub fn play<R: Rng + ?Sized>(
        &mut self,
        input: &str,
        catalog: &GameCatalog,
        rng: &mut R,
        emitter: &mut ResponseEmitter,
    ) -> Progress {
        let answer = input.trim().to_lowercase();

        match &mut self.state {
            GameState::RockPaperScissors => {
                let Ok(player) = Move::from_str(&answer) else {
                    emitter.emit(Message::assistant("Invalid move."));
                    return Progress::Continue;
                };

                let moves: Vec<Move> = Move::iter().collect();
                let bee = moves[rng.gen_range(0..moves.len())];

                let (verdict, emotion) = if player == bee {
                    ("Tie!", Emotion::Confused)
                } else if player.beats(bee) {
                    self.score += 1;
                    ("You Win! 🎉", Emotion::Happy)
                } else {
                    ("I Win! 😈", Emotion::Sassy)
                };

                emitter.emit(Message::assistant(format!("I picked {bee}. {verdict}")));
                emitter.feedback(emotion);
                Progress::Continue
            }

            GameState::NumberGuess { target } => {
                // Anything without a leading number is not a guess.
                let Some(guess) = parse_leading_int(&answer) else {
                    return Progress::Continue;
                };

                let target = i64::from(*target);
                if guess == target {
                    emitter.emit(Message::assistant("Correct! You won."));
                    emitter.feedback(Emotion::Happy);
                    Progress::Finished
                } else {
                    let hint = if guess < target { "Higher..." } else { "Lower..." };
                    emitter.emit(Message::assistant(hint));
                    emitter.feedback(Emotion::Thinking);
                    Progress::Continue
                }
            }

            GameState::WordScramble { answer: word, .. } => {
                if answer == word.to_lowercase() {
                    emitter.emit(Message::assistant("Correct!"));
                    emitter.feedback(Emotion::Happy);
                    Progress::Finished
                } else {
                    emitter.emit(Message::assistant("Nope, try again."));
                    emitter.feedback(Emotion::Confused);
                    Progress::Continue
                }
            }

            GameState::Trivia { question_index } => {
                let Some(question) = catalog.trivia.get(*question_index) else {
                    return Progress::Finished;
                };

                if question.accepts(&answer) {
                    self.score += 1;
                    emitter.emit(Message::assistant("Correct!"));
                    emitter.feedback(Emotion::Happy);
                } else {
                    emitter.emit(Message::assistant("Wrong!"));
                    emitter.feedback(Emotion::Sad);
                }

                *question_index += 1;
                match catalog.trivia.get(*question_index) {
                    Some(next) => {
                        emitter.emit(Message::assistant(format!("Next: {}", next.render())));
                        Progress::Continue
                    }
                    None => {
                        emitter.emit(Message::assistant(format!(
                            "Game Over. Score: {}/{}",
                            self.score,
                            catalog.trivia.len()
                        )));
                        Progress::Finished
                    }
                }
            }
        }
    }
}

/// Shuffle the letters of a word, avoiding the word itself when possible.
fn scramble<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    let first = letters.first().copied();
    if letters.iter().all(|c| Some(*c) == first) {
        return word.to_string();
    }

    loop {
        letters.shuffle(rng);
        let candidate: String = letters.iter().collect();
        if candidate != word {
            return candidate;
        }
    }
}

/// Parse an optionally signed integer prefix, ignoring whatever follows.
/// Values past the `i64` range saturate.
fn parse_leading_int(input: &str) -> Option<i64> {
    let input = input.trim_start();
    let (negative, rest) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let mut digits = rest.chars().map_while(|c| c.to_digit(10)).peekable();
    digits.peek()?;

    let magnitude = digits.fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d))
    });
    Some(if negative { -magnitude } else { magnitude })
}
