//! Affect triggers - word families that only change the avatar's mood.

use regex::Regex;

use crate::error::Result;
use crate::host::Emotion;

/// Word families checked against every utterance, in firing order.
const AFFECT_PATTERNS: &[(&str, Emotion)] = &[
    (r"\b(hi|hello|hey)\b", Emotion::Happy),
    (r"\b(sad|bad|cry)\b", Emotion::Sad),
    (r"\b(love|cute|good)\b", Emotion::Love),
    (r"\b(angry|hate|stupid)\b", Emotion::Alert),
    (r"\b(sus|suspicious)\b", Emotion::Suspicious),
];

const JOKE_PATTERN: &str = r"\bjoke\b";

/// What the affect scan found in one utterance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffectReading {
    pub emotions: Vec<Emotion>,

    /// The visitor asked for a joke.
    pub wants_joke: bool,
}

/// Compiled affect word families.
#[derive(Debug, Clone)]
pub struct AffectTriggers {
    families: Vec<(Regex, Emotion)>,
    joke: Regex,
}

impl AffectTriggers {
    /// Compile the built-in word families.
    pub fn new() -> Result<Self> {
        let families = AFFECT_PATTERNS
            .iter()
            .map(|(pattern, emotion)| Ok((Regex::new(pattern)?, *emotion)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            families,
            joke: Regex::new(JOKE_PATTERN)?,
        })
    }

    /// Scan a lowercased utterance.
    pub fn scan(&self, utterance: &str) -> AffectReading {
        AffectReading {
            emotions: self
                .families
                .iter()
                .filter(|(re, _)| re.is_match(utterance))
                .map(|(_, emotion)| *emotion)
                .collect(),
            wants_joke: self.joke.is_match(utterance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_boundaries() {
        let triggers = AffectTriggers::new().unwrap();

        assert_eq!(triggers.scan("hello there").emotions, vec![Emotion::Happy]);
        // "this" contains "hi" but not as a word.
        assert!(triggers.scan("this works").emotions.is_empty());
    }

    #[test]
    fn test_multiple_families_fire() {
        let triggers = AffectTriggers::new().unwrap();
        let reading = triggers.scan("hey, i love it but i am sad");

        assert_eq!(
            reading.emotions,
            vec![Emotion::Happy, Emotion::Sad, Emotion::Love]
        );
        assert!(!reading.wants_joke);
    }

    #[test]
    fn test_joke_detection() {
        let triggers = AffectTriggers::new().unwrap();
        assert!(triggers.scan("tell me a joke").wants_joke);
        assert!(!triggers.scan("jokes aside").wants_joke);
    }

    #[test]
    fn test_angry_maps_to_alert() {
        let triggers = AffectTriggers::new().unwrap();
        assert_eq!(triggers.scan("this is stupid").emotions, vec![Emotion::Alert]);
    }
}
