use crate::alerts::{
    classifier::Classifier,
    consecutive::ConsecutiveTracker,
    outcome::Outcome,
    thresholds::Thresholds,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{LearnedPattern, Reading};
use crate::storage::{PatternBackend, PatternStore};
use serde::Serialize;

/// Abnormal readings in a row that raise a critical alert.
pub const CRITICAL_ERROR_COUNT: u32 = 3;

/// Mutable per-engine counters and operator flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EngineState {
    pub error_count: u32,
    pub errors_since_last_report: u32,
    pub last_reported_minute: Option<u8>,
    pub human_intervention: bool,
    pub cleaning: bool,
}

/// Per-sample decision function over the classifier, tracker and pattern store.
#[derive(Debug)]
pub struct AlertEngine {
    classifier: Classifier,
    tracker: ConsecutiveTracker,
    store: PatternStore,
    state: EngineState,
}

impl AlertEngine {
    /// Build an engine over an already loaded store.
    pub fn new(thresholds: Thresholds, store: PatternStore) -> Self {
        Self {
            classifier: Classifier::new(thresholds),
            tracker: ConsecutiveTracker::new(),
            store,
            state: EngineState::default(),
        }
    }

    /// Build an engine and load its patterns. An unavailable backend is logged
    /// and the engine starts with no learned patterns.
    pub fn open(thresholds: Thresholds, backend: Box<dyn PatternBackend>) -> Self {
        let mut store = PatternStore::new(backend);
        match store.load_all() {
            Ok(count) => log::info!("Loaded {} learned patterns from {}", count, store.describe()),
            Err(e) => log::warn!("{e}; continuing without learned patterns"),
        }
        Self::new(thresholds, store)
    }

    pub fn process(&mut self, reading: Reading) -> Option<Outcome> {
        self.process_sample(reading.value, reading.minute, reading.hour, reading.day)
    }

    /// Classify one sample and advance the state machine.
    ///
    /// Returns `None` for a quiet sample: normal (or learned, or cleaning)
    /// outside a reporting minute.
    pub fn process_sample(
        &mut self,
        value: f32,
        minute: u8,
        hour: u8,
        day: u32,
    ) -> Option<Outcome> {
        if value.is_nan() {
            return Some(Outcome::InvalidInput { day, hour, minute });
        }

        if self.state.human_intervention {
            self.state.human_intervention = false;
            self.state.error_count = 0;
            return Some(Outcome::HumanOverride {
                value,
                day,
                hour,
                minute,
            });
        }

        let ok = self.classifier.is_normal(value)
            || self.classifier.is_learned(&self.store, value, minute, hour);

        if !ok && !self.state.cleaning {
            return Some(self.handle_abnormal(value, minute, hour, day));
        }

        self.periodic_report(minute, hour, day)
    }

    fn handle_abnormal(&mut self, value: f32, minute: u8, hour: u8, day: u32) -> Outcome {
        self.state.error_count += 1;

        if self.classifier.is_learnable(value) {
            if let Some(pattern) = self.tracker.record_abnormal(value, minute, hour, day) {
                // Learning wins over the abnormal report for this sample
                return match self.promote(pattern) {
                    Ok(()) => Outcome::PatternLearned { pattern, day },
                    Err(e) => {
                        log::warn!("Failed to persist learned pattern: {e}");
                        Outcome::PromotionFailed {
                            pattern,
                            day,
                            reason: e.to_string(),
                        }
                    }
                };
            }
        }

        if self.state.error_count >= CRITICAL_ERROR_COUNT {
            self.state.error_count = 0;
            self.state.errors_since_last_report += 1;
            return Outcome::CriticalAlert {
                value,
                day,
                hour,
                minute,
            };
        }

        Outcome::AbnormalReading {
            value,
            error_count: self.state.error_count,
            day,
            hour,
            minute,
        }
    }

    fn periodic_report(&mut self, minute: u8, hour: u8, day: u32) -> Option<Outcome> {
        let interval = self.classifier.thresholds().report_interval_minutes;
        let on_interval = u32::from(minute).checked_rem(interval) == Some(0);
        if !on_interval || self.state.last_reported_minute == Some(minute) {
            return None;
        }
        self.state.last_reported_minute = Some(minute);

        if self.state.error_count == 0 || self.state.cleaning {
            let errors = std::mem::take(&mut self.state.errors_since_last_report);
            log::debug!("Periodic report at {hour:02}:{minute:02}: ok ({errors} alerts)");
            Some(Outcome::PeriodicOk {
                errors_since_last_report: errors,
                day,
                hour,
                minute,
            })
        } else {
            let error_count = std::mem::take(&mut self.state.error_count);
            log::debug!("Periodic report at {hour:02}:{minute:02}: {error_count} errors");
            Some(Outcome::PeriodicWarn {
                error_count,
                day,
                hour,
                minute,
            })
        }
    }

    /// Shared by automatic promotion and manual addition. The error counter is
    /// reset before the write, so it stays reset even when the write fails.
    fn promote(&mut self, pattern: LearnedPattern) -> EngineResult<()> {
        self.state.error_count = 0;
        self.store.append(pattern)?;
        log::info!(
            "Learned pattern {:.2}°C at {:02}:{:02}",
            pattern.value,
            pattern.hour,
            pattern.minute
        );
        Ok(())
    }

    /// Operator-supplied pattern. Minute 60 is accepted.
    pub fn add_manual_pattern(
        &mut self,
        value: f32,
        minute: i32,
        hour: i32,
    ) -> EngineResult<LearnedPattern> {
        if !(0..=60).contains(&minute) || value.is_nan() || !(0..=23).contains(&hour) {
            return Err(EngineError::ValidationError(format!(
                "value {value}, minute {minute}, hour {hour}"
            )));
        }

        // Both bounded above
        let pattern = LearnedPattern::new(value, minute as u8, hour as u8);
        self.promote(pattern)?;
        Ok(pattern)
    }

    pub fn list_learned_patterns(&self) -> &[LearnedPattern] {
        self.store.snapshot()
    }

    /// Erase every learned pattern and forget all in-progress runs.
    pub fn clear_all_learned_patterns(&mut self) -> EngineResult<()> {
        self.store.clear_all()?;
        self.tracker.clear();
        log::info!("Cleared all learned patterns");
        Ok(())
    }

    pub fn set_cleaning_mode(&mut self, cleaning: bool) {
        self.state.cleaning = cleaning;
    }

    pub fn is_cleaning_mode(&self) -> bool {
        self.state.cleaning
    }

    pub fn set_human_override(&mut self, human_override: bool) {
        self.state.human_intervention = human_override;
    }

    pub fn is_human_override(&self) -> bool {
        self.state.human_intervention
    }

    pub fn is_normal(&self, value: f32) -> bool {
        self.classifier.is_normal(value)
    }

    pub fn is_learnable(&self, value: f32) -> bool {
        self.classifier.is_learnable(value)
    }

    pub fn is_learned(&self, value: f32, minute: u8, hour: u8) -> bool {
        self.classifier.is_learned(&self.store, value, minute, hour)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn thresholds(&self) -> &Thresholds {
        self.classifier.thresholds()
    }

    pub fn baseline(&self) -> f32 {
        self.classifier.thresholds().baseline
    }

    pub fn tracker(&self) -> &ConsecutiveTracker {
        &self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;

    struct ReadOnlyBackend;

    impl PatternBackend for ReadOnlyBackend {
        fn read_lines(&self) -> EngineResult<Vec<String>> {
            Ok(Vec::new())
        }

        fn append_line(&mut self, _line: &str) -> EngineResult<()> {
            Err(EngineError::WriteError("read-only medium".to_string()))
        }

        fn clear(&mut self) -> EngineResult<()> {
            Err(EngineError::StorageUnavailable("read-only medium".to_string()))
        }

        fn describe(&self) -> String {
            "<read-only>".to_string()
        }
    }

    fn test_thresholds() -> Thresholds {
        Thresholds {
            baseline: 4.0,
            min_normal: 2.0,
            max_normal: 8.0,
            min_learnable: 0.0,
            max_learnable: 45.0,
            report_interval_minutes: 10,
        }
    }

    fn create_test_engine() -> AlertEngine {
        AlertEngine::open(test_thresholds(), Box::new(MemoryBackend::new()))
    }

    #[test]
    fn test_nan_is_invalid_without_state_change() {
        let mut engine = create_test_engine();
        engine.process_sample(50.0, 1, 10, 1);
        let before = engine.state();

        let outcome = engine.process_sample(f32::NAN, 5, 10, 1);
        assert_eq!(outcome, Some(Outcome::InvalidInput { day: 1, hour: 10, minute: 5 }));
        assert_eq!(engine.state(), before);
        assert!(engine.list_learned_patterns().is_empty());
    }

    #[test]
    fn test_nan_does_not_consume_override() {
        let mut engine = create_test_engine();
        engine.set_human_override(true);

        engine.process_sample(f32::NAN, 5, 10, 1);
        assert!(engine.is_human_override());
    }

    #[test]
    fn test_normal_reading_is_quiet_off_interval() {
        let mut engine = create_test_engine();
        assert_eq!(engine.process_sample(5.0, 3, 10, 1), None);
        assert_eq!(engine.state().error_count, 0);
    }

    #[test]
    fn test_abnormal_readings_escalate_to_critical() {
        let mut engine = create_test_engine();

        // 50.0 is outside both bands, so nothing is tracked
        assert!(matches!(
            engine.process_sample(50.0, 1, 10, 1),
            Some(Outcome::AbnormalReading { error_count: 1, .. })
        ));
        assert!(matches!(
            engine.process_sample(50.0, 2, 10, 1),
            Some(Outcome::AbnormalReading { error_count: 2, .. })
        ));
        assert!(matches!(
            engine.process_sample(50.0, 3, 10, 1),
            Some(Outcome::CriticalAlert { .. })
        ));

        let state = engine.state();
        assert_eq!(state.error_count, 0);
        assert_eq!(state.errors_since_last_report, 1);
        assert!(engine.tracker().runs().is_empty());
    }

    #[test]
    fn test_abnormal_reading_skips_periodic_report() {
        let mut engine = create_test_engine();

        assert!(matches!(
            engine.process_sample(50.0, 0, 10, 1),
            Some(Outcome::AbnormalReading { .. })
        ));
        // Minute 0 was never reported, so a normal reading still reports it
        assert!(matches!(
            engine.process_sample(5.0, 0, 10, 1),
            Some(Outcome::PeriodicWarn { error_count: 1, .. })
        ));
    }

    #[test]
    fn test_periodic_ok_reports_alert_count_once() {
        let mut engine = create_test_engine();
        for minute in 1..=3 {
            engine.process_sample(50.0, minute, 10, 1);
        }

        assert_eq!(
            engine.process_sample(5.0, 10, 10, 1),
            Some(Outcome::PeriodicOk {
                errors_since_last_report: 1,
                day: 1,
                hour: 10,
                minute: 10,
            })
        );
        assert_eq!(engine.state().errors_since_last_report, 0);
    }

    #[test]
    fn test_periodic_report_fires_once_per_minute() {
        let mut engine = create_test_engine();

        assert!(matches!(
            engine.process_sample(5.0, 0, 10, 1),
            Some(Outcome::PeriodicOk { .. })
        ));
        assert_eq!(engine.process_sample(5.0, 0, 10, 1), None);
        assert_eq!(engine.process_sample(5.0, 5, 10, 1), None);
        assert!(matches!(
            engine.process_sample(5.0, 10, 10, 1),
            Some(Outcome::PeriodicOk { .. })
        ));
        // Same minute value in the next hour is not reported again
        assert_eq!(engine.process_sample(5.0, 10, 11, 1), None);
        assert_eq!(engine.state().last_reported_minute, Some(10));
    }

    #[test]
    fn test_periodic_warn_resets_error_count() {
        let mut engine = create_test_engine();
        engine.process_sample(50.0, 1, 10, 1);
        engine.process_sample(50.0, 2, 10, 1);

        assert_eq!(
            engine.process_sample(5.0, 10, 10, 1),
            Some(Outcome::PeriodicWarn {
                error_count: 2,
                day: 1,
                hour: 10,
                minute: 10,
            })
        );
        assert_eq!(engine.state().error_count, 0);
    }

    #[test]
    fn test_human_override_is_one_shot() {
        let mut engine = create_test_engine();
        engine.process_sample(50.0, 1, 10, 1);
        engine.set_human_override(true);

        assert_eq!(
            engine.process_sample(50.0, 2, 10, 1),
            Some(Outcome::HumanOverride {
                value: 50.0,
                day: 1,
                hour: 10,
                minute: 2,
            })
        );
        assert_eq!(engine.state().error_count, 0);
        assert!(!engine.is_human_override());

        assert!(matches!(
            engine.process_sample(50.0, 3, 10, 1),
            Some(Outcome::AbnormalReading { error_count: 1, .. })
        ));
    }

    #[test]
    fn test_human_override_beats_periodic_report() {
        let mut engine = create_test_engine();
        engine.set_human_override(true);

        assert!(matches!(
            engine.process_sample(5.0, 0, 10, 1),
            Some(Outcome::HumanOverride { .. })
        ));
        assert_eq!(engine.state().last_reported_minute, None);
    }

    #[test]
    fn test_cleaning_mode_suppresses_errors() {
        let mut engine = create_test_engine();
        engine.process_sample(50.0, 1, 10, 1);
        engine.set_cleaning_mode(true);
        assert!(engine.is_cleaning_mode());

        assert_eq!(engine.process_sample(50.0, 2, 10, 1), None);
        assert_eq!(engine.state().error_count, 1);

        // Cleaning reports ok even with pending errors, and leaves them pending
        assert!(matches!(
            engine.process_sample(50.0, 10, 10, 1),
            Some(Outcome::PeriodicOk { .. })
        ));
        assert_eq!(engine.state().error_count, 1);
    }

    #[test]
    fn test_promotion_after_three_days() {
        let mut engine = create_test_engine();

        assert!(matches!(
            engine.process_sample(40.0, 10, 3, 1),
            Some(Outcome::AbnormalReading { error_count: 1, .. })
        ));
        assert!(matches!(
            engine.process_sample(40.0, 10, 3, 2),
            Some(Outcome::AbnormalReading { error_count: 2, .. })
        ));
        assert_eq!(
            engine.process_sample(40.0, 10, 3, 3),
            Some(Outcome::PatternLearned {
                pattern: LearnedPattern::new(40.0, 10, 3),
                day: 3,
            })
        );
        assert_eq!(engine.state().error_count, 0);
        assert_eq!(engine.state().errors_since_last_report, 0);

        assert!(engine.is_learned(40.0, 10, 3));
        assert!(engine.is_learned(40.5, 10, 3));
        assert!(engine.is_learned(39.5, 10, 3));
        assert!(!engine.is_learned(40.51, 10, 3));
        assert!(!engine.is_learned(39.49, 10, 3));

        // Day 4 matches the learned pattern and is quiet
        assert_eq!(engine.process_sample(40.0, 11, 3, 4), None);
        assert_eq!(engine.state().error_count, 0);
    }

    #[test]
    fn test_non_contiguous_day_does_not_promote() {
        let mut engine = create_test_engine();
        engine.process_sample(40.0, 10, 3, 1);
        engine.process_sample(40.0, 10, 3, 2);

        // Third error in a row, but day 4 breaks the run
        assert!(matches!(
            engine.process_sample(40.0, 10, 3, 4),
            Some(Outcome::CriticalAlert { .. })
        ));
        assert!(engine.list_learned_patterns().is_empty());
        assert_eq!(engine.tracker().runs()[0].count, 1);
    }

    #[test]
    fn test_failed_promotion_keeps_store_unchanged() {
        let mut engine = AlertEngine::open(test_thresholds(), Box::new(ReadOnlyBackend));

        engine.process_sample(40.0, 10, 3, 1);
        engine.process_sample(40.0, 10, 3, 2);
        let outcome = engine.process_sample(40.0, 10, 3, 3);

        assert!(matches!(outcome, Some(Outcome::PromotionFailed { .. })));
        assert!(engine.list_learned_patterns().is_empty());
        assert!(!engine.is_learned(40.0, 10, 3));
        // Counter was reset before the write was attempted
        assert_eq!(engine.state().error_count, 0);
    }

    #[test]
    fn test_manual_pattern_validation() {
        let mut engine = create_test_engine();

        for (value, minute, hour) in [
            (f32::NAN, 10, 3),
            (40.0, -1, 3),
            (40.0, 61, 3),
            (40.0, 10, -1),
            (40.0, 10, 24),
        ] {
            let result = engine.add_manual_pattern(value, minute, hour);
            assert!(matches!(result, Err(EngineError::ValidationError(_))));
        }
        assert!(engine.list_learned_patterns().is_empty());

        // Minute 60 is accepted
        let pattern = engine.add_manual_pattern(12.0, 60, 23).unwrap();
        assert_eq!(pattern.minute, 60);
        assert_eq!(engine.list_learned_patterns().len(), 1);
    }

    #[test]
    fn test_manual_pattern_resets_error_count() {
        let mut engine = create_test_engine();
        engine.process_sample(50.0, 1, 10, 1);
        engine.process_sample(50.0, 2, 10, 1);

        engine.add_manual_pattern(50.0, 5, 10).unwrap();
        assert_eq!(engine.state().error_count, 0);
        assert_eq!(engine.process_sample(50.0, 6, 10, 1), None);
    }

    #[test]
    fn test_manual_pattern_write_error() {
        let mut engine = AlertEngine::open(test_thresholds(), Box::new(ReadOnlyBackend));
        let result = engine.add_manual_pattern(12.0, 30, 6);
        assert!(matches!(result, Err(EngineError::WriteError(_))));
        assert!(engine.list_learned_patterns().is_empty());
    }

    #[test]
    fn test_clear_forgets_patterns_and_runs() {
        let mut engine = create_test_engine();
        engine.add_manual_pattern(40.0, 10, 3).unwrap();
        engine.process_sample(12.0, 30, 6, 1);
        assert_eq!(engine.tracker().runs().len(), 1);

        engine.clear_all_learned_patterns().unwrap();
        assert!(engine.list_learned_patterns().is_empty());
        assert!(engine.tracker().runs().is_empty());
        assert!(!engine.is_learned(40.0, 10, 3));
    }

    #[test]
    fn test_failed_clear_keeps_patterns() {
        let mut store = PatternStore::new(Box::new(ReadOnlyBackend));
        store.load_all().unwrap();
        let mut engine = AlertEngine::new(test_thresholds(), store);

        let result = engine.clear_all_learned_patterns();
        assert!(matches!(result, Err(EngineError::StorageUnavailable(_))));
    }

    #[test]
    fn test_zero_interval_never_reports() {
        let thresholds = Thresholds {
            report_interval_minutes: 0,
            ..test_thresholds()
        };
        let mut engine = AlertEngine::open(thresholds, Box::new(MemoryBackend::new()));
        assert_eq!(engine.process_sample(5.0, 0, 10, 1), None);
    }

    #[test]
    fn test_baseline_exposed() {
        let engine = create_test_engine();
        assert_eq!(engine.baseline(), 4.0);
        assert_eq!(engine.thresholds().report_interval_minutes, 10);
    }
}
