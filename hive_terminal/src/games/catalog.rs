//! Built-in game content.

use serde::{Deserialize, Serialize};

/// A two-option trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaQuestion {
    pub question: String,
    pub options: [String; 2],
    /// Zero-based index into `options`.
    pub correct: usize,
}

impl TriviaQuestion {
    pub fn new(
        question: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
        correct: usize,
    ) -> Self {
        Self {
            question: question.into(),
            options: [first.into(), second.into()],
            correct: correct.min(1),
        }
    }

    pub fn correct_option(&self) -> &str {
        let [first, second] = &self.options;
        if self.correct == 0 {
            first
        } else {
            second
        }
    }

    /// Question and numbered options, one per line.
    pub fn render(&self) -> String {
        format!(
            "{}\n1) {}\n2) {}",
            self.question, self.options[0], self.options[1]
        )
    }

    /// Check a lowercased answer: the option text, or its 1-based ordinal.
    pub fn accepts(&self, answer: &str) -> bool {
        let ordinal = if self.correct == 0 { "1" } else { "2" };
        answer.contains(self.correct_option().to_lowercase().as_str()) || answer == ordinal
    }
}

/// The questions and words games draw from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCatalog {
    pub trivia: Vec<TriviaQuestion>,
    pub scramble_words: Vec<String>,
}

impl Default for GameCatalog {
    fn default() -> Self {
        Self {
            trivia: vec![
                TriviaQuestion::new(
                    "What does HTML stand for?",
                    "Hyper Text Markup Language",
                    "High Tech Multi Language",
                    0,
                ),
                TriviaQuestion::new("Which symbol is used for comments in Python?", "//", "#", 1),
                TriviaQuestion::new("What is the complexity of Binary Search?", "O(n)", "O(log n)", 1),
                TriviaQuestion::new("Who created Linux?", "Steve Jobs", "Linus Torvalds", 1),
                TriviaQuestion::new("Is Java short for JavaScript?", "Yes", "No! Absolutely not.", 1),
            ],
            scramble_words: [
                "ALGORITHM",
                "COMPILER",
                "DATABASE",
                "ENCRYPTION",
                "FRAMEWORK",
                "GIGABYTE",
                "HEURISTIC",
                "INTERFACE",
                "JAVASCRIPT",
                "KERNEL",
                "LINUX",
                "MALWARE",
                "NETWORK",
                "OPERATING",
                "PROTOCOL",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_size() {
        let catalog = GameCatalog::default();
        assert_eq!(catalog.trivia.len(), 5);
        assert_eq!(catalog.scramble_words.len(), 15);
    }

    #[test]
    fn test_trivia_accepts_ordinal_or_text() {
        let question = TriviaQuestion::new("Who created Linux?", "Steve Jobs", "Linus Torvalds", 1);

        assert!(question.accepts("2"));
        assert!(question.accepts("it was linus torvalds"));
        assert!(!question.accepts("1"));
        assert!(!question.accepts("steve jobs"));
    }

    #[test]
    fn test_render() {
        let question = TriviaQuestion::new("Q?", "a", "b", 0);
        assert_eq!(question.render(), "Q?\n1) a\n2) b");
    }

    #[test]
    fn test_correct_index_is_clamped() {
        assert_eq!(TriviaQuestion::new("Q?", "a", "b", 5).correct_option(), "b");
    }
}
