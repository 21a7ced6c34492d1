//! Score tracking for keyword resolution.

/// Scores of knowledge entries, kept in entry order.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    scores: Vec<u32>,
}

impl ScoreBoard {
    /// Create a new empty score board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the score of the next entry.
    pub fn record(&mut self, score: u32) {
        self.scores.push(score);
    }

    /// The winning entry: highest score, earliest on ties. Zero never wins.
    pub fn best(&self) -> Option<(usize, u32)> {
        let mut best: Option<(usize, u32)> = None;
        for (index, &score) in self.scores.iter().enumerate() {
            // Strictly greater keeps the first-seen entry on ties.
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((index, score));
            }
        }
        best
    }
}
