//! Response Emitter - collects the replies and mood cues of one turn.

use chrono::Duration;

use crate::config::DelayConfig;
use crate::host::{Emotion, HostAdapter};
use crate::message::Message;

/// Turns reply length into a display delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayPolicy {
    base_ms: u64,
    per_char_ms: u64,
    max_ms: u64,
}

impl DelayPolicy {
    pub fn new(base_ms: u64, per_char_ms: u64, max_ms: u64) -> Self {
        Self {
            base_ms,
            per_char_ms,
            // A ceiling below the floor collapses to the floor.
            max_ms: max_ms.max(base_ms),
        }
    }

    /// No pause at all.
    pub fn instant() -> Self {
        Self::new(0, 0, 0)
    }

    /// `clamp(base + per_char * chars, base, max)`.
    pub fn delay_for(&self, text: &str) -> Duration {
        let chars = text.chars().count() as u64;
        let raw = self
            .base_ms
            .saturating_add(self.per_char_ms.saturating_mul(chars));
        let ms = raw.clamp(self.base_ms, self.max_ms);
        Duration::milliseconds(i64::try_from(ms).unwrap_or(i64::MAX))
    }
}

impl Default for DelayPolicy {
    fn default() -> Self {
        DelayConfig::default().into()
    }
}

impl From<DelayConfig> for DelayPolicy {
    fn from(config: DelayConfig) -> Self {
        Self::new(config.base_ms, config.per_char_ms, config.max_ms)
    }
}

/// An outbound message together with its display delay.
#[derive(Debug, Clone)]
pub struct Reply {
    pub message: Message,
    pub delay: Duration,
}

/// Buffers the messages and feedback of a single turn.
#[derive(Debug, Clone, Default)]
pub struct ResponseEmitter {
    policy: DelayPolicy,
    replies: Vec<Reply>,
    emotions: Vec<Emotion>,
}

impl ResponseEmitter {
    pub fn new(policy: DelayPolicy) -> Self {
        Self {
            policy,
            replies: Vec::new(),
            emotions: Vec::new(),
        }
    }

    /// Queue a message; its delay is computed from the text.
    pub fn emit(&mut self, message: Message) {
        let delay = self.policy.delay_for(&message.text);
        self.replies.push(Reply { message, delay });
    }

    /// Queue avatar feedback.
    pub fn feedback(&mut self, emotion: Emotion) {
        self.emotions.push(emotion);
    }

    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    pub fn emotions(&self) -> &[Emotion] {
        &self.emotions
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty() && self.emotions.is_empty()
    }

    /// Forward queued feedback to the host.
    pub fn forward_feedback(&self, host: &mut dyn HostAdapter) {
        for emotion in &self.emotions {
            host.feedback(*emotion);
        }
    }

    /// Take everything queued so far, leaving the emitter empty.
    pub fn finish(&mut self) -> (Vec<Reply>, Vec<Emotion>) {
        (
            std::mem::take(&mut self.replies),
            std::mem::take(&mut self.emotions),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;
    use chrono::Utc;

    #[test]
    fn test_delay_is_clamped() {
        let policy = DelayPolicy::default();

        assert_eq!(policy.delay_for(""), Duration::milliseconds(500));
        assert_eq!(policy.delay_for("abcde"), Duration::milliseconds(650));
        assert_eq!(policy.delay_for(&"x".repeat(500)), Duration::milliseconds(2000));
    }

    #[test]
    fn test_delay_counts_chars_not_bytes() {
        let policy = DelayPolicy::new(0, 10, 1000);
        assert_eq!(policy.delay_for("🐝🐝"), Duration::milliseconds(20));
    }

    #[test]
    fn test_inverted_bounds() {
        let policy = DelayPolicy::new(800, 10, 100);
        assert_eq!(policy.delay_for("hello"), Duration::milliseconds(800));
    }

    #[test]
    fn test_emitter_collects_in_order() {
        let mut emitter = ResponseEmitter::new(DelayPolicy::instant());
        emitter.emit(Message::assistant("one"));
        emitter.emit(Message::output("two"));
        emitter.feedback(Emotion::Happy);

        let (replies, emotions) = emitter.finish();
        let texts: Vec<_> = replies.iter().map(|r| r.message.text.as_str()).collect();

        assert_eq!(texts, vec!["one", "two"]);
        assert_eq!(emotions, vec![Emotion::Happy]);
        assert!(emitter.is_empty());
    }

    #[test]
    fn test_feedback_forwarded_to_host() {
        let mut host = HeadlessHost::new(Utc::now());
        let mut emitter = ResponseEmitter::default();
        emitter.feedback(Emotion::Denied);
        emitter.feedback(Emotion::Sad);

        emitter.forward_feedback(&mut host);

        assert_eq!(host.feedback, vec![Emotion::Denied, Emotion::Sad]);
    }
}
