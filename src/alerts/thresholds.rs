use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Static bands and reporting cadence, fixed before processing starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub baseline: f32,
    pub min_normal: f32,
    pub max_normal: f32,
    pub min_learnable: f32, // Learnable band may overlap the normal band
    pub max_learnable: f32,
    pub report_interval_minutes: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            baseline: 4.0,       // Cold room set point
            min_normal: 2.0,
            max_normal: 8.0,
            min_learnable: 0.0,  // Defrost cycles peak well under 15°C
            max_learnable: 15.0,
            report_interval_minutes: 10,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> EngineResult<()> {
        let values = [
            ("baseline", self.baseline),
            ("min_normal", self.min_normal),
            ("max_normal", self.max_normal),
            ("min_learnable", self.min_learnable),
            ("max_learnable", self.max_learnable),
        ];
        if let Some((name, _)) = values.iter().find(|(_, value)| value.is_nan()) {
            return Err(EngineError::ValidationError(format!("{name} is not a number")));
        }

        if self.min_normal > self.max_normal {
            return Err(EngineError::ValidationError(format!(
                "min_normal ({}) is above max_normal ({})",
                self.min_normal, self.max_normal
            )));
        }
        if self.min_learnable > self.max_learnable {
            return Err(EngineError::ValidationError(format!(
                "min_learnable ({}) is above max_learnable ({})",
                self.min_learnable, self.max_learnable
            )));
        }
        if self.report_interval_minutes == 0 {
            return Err(EngineError::ValidationError(
                "report_interval_minutes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
