use serde::{Deserialize, Serialize};

/// Half-width of the value tolerance band around a learned pattern.
pub const TOLERANCE: f32 = 0.5;

/// Half-width of the minute window used when matching patterns and runs.
pub const MINUTE_WINDOW: i32 = 10;

/// True when `minute` lies strictly inside `(anchor - 10, anchor + 10)`.
///
/// Both bounds are exclusive and the window does not wrap around the hour.
pub fn within_window(anchor: u8, minute: u8) -> bool {
    let (anchor, minute) = (i32::from(anchor), i32::from(minute));
    minute > anchor - MINUTE_WINDOW && minute < anchor + MINUTE_WINDOW
}

/// A recurring abnormal reading that is no longer flagged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearnedPattern {
    pub value: f32,
    pub minute: u8,
    pub hour: u8,
    pub min_range: f32,
    pub max_range: f32,
}

impl LearnedPattern {
    pub fn new(value: f32, minute: u8, hour: u8) -> Self {
        Self {
            value,
            minute,
            hour,
            min_range: value - TOLERANCE,
            max_range: value + TOLERANCE,
        }
    }

    /// Exact hour, open minute window, closed value range.
    pub fn matches(&self, value: f32, minute: u8, hour: u8) -> bool {
        self.hour == hour
            && within_window(self.minute, minute)
            && value >= self.min_range
            && value <= self.max_range
    }

    /// Exclusive minute bounds of the matching window, for display.
    pub fn window_bounds(&self) -> (i32, i32) {
        let minute = i32::from(self.minute);
        (minute - MINUTE_WINDOW, minute + MINUTE_WINDOW)
    }
}

/// Day-over-day accumulator of similar abnormal readings at one time slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsecutiveRun {
    pub value: f32,
    pub minute: u8,
    pub hour: u8,
    /// Last day counted, `None` once the run has been promoted.
    pub day: Option<u32>,
    pub count: u32,
}

impl ConsecutiveRun {
    pub fn start(value: f32, minute: u8, hour: u8, day: u32) -> Self {
        Self {
            value,
            minute,
            hour,
            day: Some(day),
            count: 1,
        }
    }

    pub fn is_active(&self) -> bool {
        self.day.is_some()
    }
}
