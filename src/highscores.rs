//! Session high-score table
//!
//! Host-side collaborator fed by [`GameEvent::HighScore`] notifications.
//! The simulation itself only tracks the single best score of the run; the
//! table keeps a ranked list across runs and is what a host would persist.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Maximum number of entries kept in the table
pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Level reached when the score was recorded
    pub level: u32,
}

/// Ranked high-score table, best first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> u64 {
        self.entries.first().map_or(0, |e| e.score)
    }

    /// Whether a score would make the table
    pub fn qualifies(&self, score: u64) -> bool {
        score > 0
            && (self.entries.len() < MAX_ENTRIES
                || self.entries.last().is_some_and(|e| score > e.score))
    }

    /// Rank the score would land at, 0-based
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        Some(
            self.entries
                .iter()
                .position(|e| score > e.score)
                .unwrap_or(self.entries.len()),
        )
    }

    /// Insert a score, keeping the table sorted and capped.
    ///
    /// Returns the rank it landed at, or `None` if it did not qualify.
    pub fn add_score(&mut self, score: u64, level: u32) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(rank, HighScoreEntry { score, level });
        self.entries.truncate(MAX_ENTRIES);
        log::info!("high score {score} entered at rank {}", rank + 1);
        Some(rank)
    }

    /// Fold a tick's event batch into the table
    pub fn observe(&mut self, events: &[GameEvent], level: u32) {
        for event in events {
            if let GameEvent::HighScore(score) = event {
                self.add_score(*score, level);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_rank_best_first() {
        let mut table = HighScores::new();
        assert_eq!(table.add_score(100, 1), Some(0));
        assert_eq!(table.add_score(300, 2), Some(0));
        assert_eq!(table.add_score(200, 1), Some(1));

        let scores: Vec<u64> = table.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 200, 100]);
        assert_eq!(table.top_score(), 300);
    }

    #[test]
    fn table_caps_at_ten_entries() {
        let mut table = HighScores::new();
        for i in 1..=12u64 {
            table.add_score(i * 100, 1);
        }
        assert_eq!(table.entries().len(), MAX_ENTRIES);
        assert_eq!(table.top_score(), 1200);
        // The weakest two never made the cut
        assert_eq!(table.entries().last().map(|e| e.score), Some(300));
    }

    #[test]
    fn zero_and_weak_scores_do_not_qualify() {
        let mut table = HighScores::new();
        assert!(!table.qualifies(0));
        assert_eq!(table.add_score(0, 1), None);

        for i in 1..=10u64 {
            table.add_score(i * 100, 1);
        }
        assert!(!table.qualifies(50));
        assert_eq!(table.add_score(50, 1), None);
    }

    #[test]
    fn observe_applies_high_score_events() {
        let mut table = HighScores::new();
        let events = [
            GameEvent::ShotFired,
            GameEvent::HighScore(400),
            GameEvent::Explosion,
        ];
        table.observe(&events, 3);
        assert_eq!(table.entries().len(), 1);
        assert_eq!(table.entries()[0], HighScoreEntry { score: 400, level: 3 });
    }
}
