use serde::{Deserialize, Serialize};

/// One temperature sample stamped with its minute, hour and day index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: f32,
    pub minute: u8,
    pub hour: u8,
    pub day: u32,
}

impl Reading {
    pub fn new(value: f32, minute: u8, hour: u8, day: u32) -> Self {
        Self {
            value,
            minute,
            hour,
            day,
        }
    }
}
