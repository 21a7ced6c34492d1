//! The capability surface the terminal borrows from its host application.
//!
//! Navigation, settings, the clock and avatar feedback all belong to the
//! host. The terminal only calls them.

use chrono::{DateTime, Utc};
use hive_portal::{Page, Theme};
use serde::{Deserialize, Serialize};

/// Mood cues for the host's avatar (animation, sound).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Neutral,
    Happy,
    Sad,
    Excited,
    Alert,
    Denied,
    Confused,
    Love,
    Sassy,
    Thinking,
    Suspicious,
    Matrix,
    Processing,
}

/// A host setting the terminal may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Setting {
    Theme(Theme),
    MatrixMode(bool),
}

/// Capabilities supplied by the host application.
pub trait HostAdapter {
    /// Switch the visible page. Never called with a restricted page.
    fn navigate_to(&mut self, page: Page);

    fn set_setting(&mut self, setting: Setting);

    fn current_theme(&self) -> Theme;

    fn matrix_mode(&self) -> bool;

    fn now(&self) -> DateTime<Utc>;

    /// Avatar feedback hook.
    fn feedback(&mut self, _emotion: Emotion) {}
}

/// A host without a UI: records every call and runs on a settable clock.
///
/// Useful for tests and for embedding the terminal behind another transport.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    pub clock: DateTime<Utc>,
    pub theme: Theme,
    pub matrix: bool,
    pub navigations: Vec<Page>,
    pub feedback: Vec<Emotion>,
}

impl HeadlessHost {
    pub fn new(clock: DateTime<Utc>) -> Self {
        Self {
            clock,
            theme: Theme::Light,
            matrix: false,
            navigations: Vec::new(),
            feedback: Vec::new(),
        }
    }

    /// Move the clock forward.
    pub fn advance(&mut self, by: chrono::Duration) {
        self.clock += by;
    }

    pub fn last_page(&self) -> Option<Page> {
        self.navigations.last().copied()
    }
}

impl HostAdapter for HeadlessHost {
    fn navigate_to(&mut self, page: Page) {
        self.navigations.push(page);
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
        self.clock
    }

    fn feedback(&mut self, emotion: Emotion) {
        self.feedback.push(emotion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_headless_host_records_calls() {
        let mut host = HeadlessHost::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());

        host.navigate_to(Page::Events);
        host.set_setting(Setting::Theme(Theme::Dark));
        host.set_setting(Setting::MatrixMode(true));
        host.feedback(Emotion::Happy);

        assert_eq!(host.last_page(), Some(Page::Events));
        assert_eq!(host.current_theme(), Theme::Dark);
        assert!(host.matrix_mode());
        assert_eq!(host.feedback, vec![Emotion::Happy]);
    }

    #[test]
    fn test_headless_host_clock_advances() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut host = HeadlessHost::new(start);

        host.advance(chrono::Duration::milliseconds(1500));

        assert_eq!(host.now() - start, chrono::Duration::milliseconds(1500));
    }
}
