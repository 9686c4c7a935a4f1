use crate::models::{ConsecutiveRun, LearnedPattern, TOLERANCE, within_window};

/// Day-contiguous repeats needed before a run becomes a learned pattern.
pub const PROMOTION_COUNT: u32 = 3;

/// Tracks day-over-day repetition of similar abnormal readings.
///
/// Runs are matched by hour and an open minute window around the run's own
/// minute. Lookups are first-match in insertion order, so when windows of
/// two runs overlap the older run always wins.
#[derive(Debug, Clone, Default)]
pub struct ConsecutiveTracker {
    runs: Vec<ConsecutiveRun>,
}

impl ConsecutiveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one learnable abnormal reading. Returns the pattern to promote
    /// when this reading completes a run.
    pub fn record_abnormal(
        &mut self,
        value: f32,
        minute: u8,
        hour: u8,
        day: u32,
    ) -> Option<LearnedPattern> {
        let position = self
            .runs
            .iter()
            .position(|run| run.hour == hour && within_window(run.minute, minute));
        let Some(index) = position else {
            log::debug!("New run at {hour:02}:{minute:02} day {day} ({value:.2})");
            self.runs.push(ConsecutiveRun::start(value, minute, hour, day));
            return None;
        };
        let run = &mut self.runs[index];

        match run.day {
            Some(last)
                if last.checked_add(1) == Some(day) && (value - run.value).abs() <= TOLERANCE =>
            {
                run.count += 1;
                run.value = value;
                run.day = Some(day);

                if run.count >= PROMOTION_COUNT {
                    run.count = 0;
                    run.day = None;
                    return Some(LearnedPattern::new(value, minute, hour));
                }
                log::debug!(
                    "Run at {:02}:{:02} continues on day {} (count {})",
                    run.hour,
                    run.minute,
                    day,
                    run.count
                );
                None
            }
            Some(last) if day <= last => {
                // Same day or earlier than already counted
                None
            }
            _ => {
                log::debug!("Run at {:02}:{:02} restarts on day {}", run.hour, run.minute, day);
                run.value = value;
                run.day = Some(day);
                run.count = 1;
                None
            }
        }
    }

    pub fn runs(&self) -> &[ConsecutiveRun] {
        &self.runs
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }
}
