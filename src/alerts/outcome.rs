use crate::models::LearnedPattern;
use serde::Serialize;

/// Status produced by the engine for one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    InvalidInput {
        day: u32,
        hour: u8,
        minute: u8,
    },
    HumanOverride {
        value: f32,
        day: u32,
        hour: u8,
        minute: u8,
    },
    AbnormalReading {
        value: f32,
        error_count: u32,
        day: u32,
        hour: u8,
        minute: u8,
    },
    PatternLearned {
        pattern: LearnedPattern,
        day: u32,
    },
    PromotionFailed {
        pattern: LearnedPattern,
        day: u32,
        reason: String,
    },
    CriticalAlert {
        value: f32,
        day: u32,
        hour: u8,
        minute: u8,
    },
    PeriodicOk {
        errors_since_last_report: u32,
        day: u32,
        hour: u8,
        minute: u8,
    },
    PeriodicWarn {
        error_count: u32,
        day: u32,
        hour: u8,
        minute: u8,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl Outcome {
    pub fn outcome_id(&self) -> &'static str {
        match self {
            Outcome::InvalidInput { .. } => "invalid_input",
            Outcome::HumanOverride { .. } => "human_override",
            Outcome::AbnormalReading { .. } => "abnormal_reading",
            Outcome::PatternLearned { .. } => "pattern_learned",
            Outcome::PromotionFailed { .. } => "promotion_failed",
            Outcome::CriticalAlert { .. } => "critical_alert",
            Outcome::PeriodicOk { .. } => "periodic_ok",
            Outcome::PeriodicWarn { .. } => "periodic_warn",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Outcome::InvalidInput { day, hour, minute } => {
                format!("Invalid reading (Day {day}, Hour {hour}, Min {minute})")
            }
            Outcome::HumanOverride { value, day, hour, minute } => {
                format!("[Day {day}, Hour {hour}, Min {minute}] Human: {value:.2}°C")
            }
            Outcome::AbnormalReading { value, error_count, day, hour, minute } => {
                format!("ERROR [Day {day}, Hour {hour}, Min {minute}]: {value:.2}°C (count={error_count})")
            }
            Outcome::PatternLearned { pattern, .. } => format!(
                "Learned: {:.2}°C at min {} hour {}",
                pattern.value, pattern.minute, pattern.hour
            ),
            Outcome::PromotionFailed { pattern, reason, .. } => format!(
                "Could not learn {:.2}°C at min {} hour {}: {}",
                pattern.value, pattern.minute, pattern.hour, reason
            ),
            Outcome::CriticalAlert { .. } => "ALERT: 3 consecutive abnormal readings!".to_string(),
            Outcome::PeriodicOk { errors_since_last_report, day, hour, minute } => {
                format!("[Day {day}, Hour {hour}, Min {minute}] OK (errors: {errors_since_last_report})")
            }
            Outcome::PeriodicWarn { error_count, day, hour, minute } => {
                format!("[Day {day}, Hour {hour}, Min {minute}] Current error count: {error_count}")
            }
        }
    }

    pub fn priority(&self) -> AlertPriority {
        match self {
            Outcome::InvalidInput { .. } => AlertPriority::Medium,
            Outcome::HumanOverride { .. } => AlertPriority::Low,
            Outcome::AbnormalReading { .. } => AlertPriority::High,
            Outcome::PatternLearned { .. } => AlertPriority::Low,
            Outcome::PromotionFailed { .. } => AlertPriority::Medium,
            Outcome::CriticalAlert { .. } => AlertPriority::Critical,
            Outcome::PeriodicOk { .. } => AlertPriority::Low,
            Outcome::PeriodicWarn { .. } => AlertPriority::Medium,
        }
    }
}

impl std::fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AlertPriority::Low => "low",
            AlertPriority::Medium => "medium",
            AlertPriority::High => "high",
            AlertPriority::Critical => "critical",
        };
        f.write_str(label)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}
