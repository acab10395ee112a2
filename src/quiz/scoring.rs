//! Gamification scoring.

use serde::{Deserialize, Serialize};

/// Points awarded for every single-select answer, re-answers included.
pub const SINGLE_SELECT_POINTS: u32 = 15;

/// Points awarded when a multi-select option is selected.
pub const MULTI_SELECT_POINTS: u32 = 10;

/// Translates answer events into point deltas.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn on_single_select(&self) -> u32 {
        SINGLE_SELECT_POINTS
    }

    /// Deselecting earns nothing and refunds nothing: points already
    /// awarded for an option stay awarded.
    pub fn on_multi_toggle(&self, inserted: bool) -> u32 {
        if inserted { MULTI_SELECT_POINTS } else { 0 }
    }
}

/// Accumulated points. Never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u32);

impl Score {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Add a delta, saturating at `u32::MAX`.
    pub fn add(&mut self, delta: u32) -> u32 {
        self.0 = self.0.saturating_add(delta);
        self.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_select_always_awards() {
        let engine = ScoringEngine;
        let mut score = Score::new();
        // Same answer chosen three times still scores each time.
        for _ in 0..3 {
            score.add(engine.on_single_select());
        }
        assert_eq!(score.value(), 45);
    }

    #[test]
    fn deselect_does_not_refund() {
        let engine = ScoringEngine;
        let mut score = Score::new();
        score.add(engine.on_multi_toggle(true));
        let after_select = score;
        score.add(engine.on_multi_toggle(false));
        assert_eq!(score, after_select);
        assert_eq!(score.value(), 10);
    }

    #[test]
    fn reselect_after_deselect_awards_again() {
        let engine = ScoringEngine;
        let mut score = Score::new();
        for inserted in [true, false, true, false, true] {
            score.add(engine.on_multi_toggle(inserted));
        }
        assert_eq!(score.value(), 30);
    }

    #[test]
    fn score_is_monotonic() {
        let engine = ScoringEngine;
        let mut score = Score::new();
        let mut last = score.value();
        let events = [None, Some(true), Some(false), None, Some(true), Some(false), Some(false)];
        for event in events {
            let delta = match event {
                None => engine.on_single_select(),
                Some(inserted) => engine.on_multi_toggle(inserted),
            };
            score.add(delta);
            assert!(score.value() >= last);
            last = score.value();
        }
    }

    #[test]
    fn add_saturates() {
        let mut score = Score(u32::MAX - 5);
        assert_eq!(score.add(MULTI_SELECT_POINTS), u32::MAX);
    }

    #[test]
    fn serializes_as_number() {
        let mut score = Score::new();
        score.add(25);
        assert_eq!(serde_json::to_string(&score).unwrap(), "25");
    }
}
