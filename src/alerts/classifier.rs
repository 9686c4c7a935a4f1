use crate::alerts::thresholds::Thresholds;
use crate::storage::PatternStore;

/// Evaluates one reading against the static bands and the learned patterns.
#[derive(Debug, Clone)]
pub struct Classifier {
    thresholds: Thresholds,
}

impl Classifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Closed interval `[min_normal, max_normal]`.
    pub fn is_normal(&self, value: f32) -> bool {
        value >= self.thresholds.min_normal && value <= self.thresholds.max_normal
    }

    /// Inside the learnable band and outside the normal band; normal takes priority.
    pub fn is_learnable(&self, value: f32) -> bool {
        value >= self.thresholds.min_learnable
            && value <= self.thresholds.max_learnable
            && !self.is_normal(value)
    }

    pub fn is_learned(&self, store: &PatternStore, value: f32, minute: u8, hour: u8) -> bool {
        store.find_match(value, minute, hour).is_some()
    }
}
