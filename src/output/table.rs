use crate::alerts::Outcome;
use crate::models::{LearnedPattern, Reading};
use serde::Serialize;
use tabled::{Table, Tabled};

/// Trait for items that can be displayed as tables or JSON
pub trait OutputFormat {
    fn to_table(&self, decimal_places: u8) -> String;
    fn to_json(&self) -> Result<String, serde_json::Error>;
}

/// One replayed sample and what the engine made of it.
#[derive(Debug, Clone, Serialize)]
pub struct SampleReport {
    pub line: usize,
    pub reading: Reading,
    pub outcome: Option<Outcome>,
}

/// Row for the learned pattern listing
#[derive(Tabled, Serialize, Debug)]
pub struct PatternRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Minute Window")]
    pub window: String,
    #[tabled(rename = "Hour")]
    pub hour: u8,
    #[tabled(rename = "Range")]
    pub range: String,
}

/// Row for replayed sample outcomes
#[derive(Tabled, Serialize, Debug)]
pub struct SampleRow {
    #[tabled(rename = "Line")]
    pub line: usize,
    #[tabled(rename = "Day")]
    pub day: u32,
    #[tabled(rename = "Time")]
    pub time: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Priority")]
    pub priority: String,
    #[tabled(rename = "Message")]
    pub message: String,
}

impl PatternRow {
    pub fn from_pattern(index: usize, pattern: &LearnedPattern, decimal_places: u8) -> Self {
        let (low, high) = pattern.window_bounds();
        Self {
            index,
            value: format_temperature(pattern.value, decimal_places),
            window: format!("{low} < min < {high}"),
            hour: pattern.hour,
            range: format!(
                "{} to {}",
                format_temperature(pattern.min_range, decimal_places),
                format_temperature(pattern.max_range, decimal_places)
            ),
        }
    }
}

impl SampleRow {
    pub fn from_report(report: &SampleReport, decimal_places: u8) -> Self {
        let reading = &report.reading;
        let (status, priority, message) = match &report.outcome {
            Some(outcome) => (
                outcome.outcome_id().to_string(),
                outcome.priority().to_string(),
                outcome.message(),
            ),
            None => ("-".to_string(), "-".to_string(), String::new()),
        };
        Self {
            line: report.line,
            day: reading.day,
            time: format!("{:02}:{:02}", reading.hour, reading.minute),
            value: format_temperature(reading.value, decimal_places),
            status,
            priority,
            message,
        }
    }
}

impl OutputFormat for Vec<LearnedPattern> {
    fn to_table(&self, decimal_places: u8) -> String {
        if self.is_empty() {
            return "No learned patterns.".to_string();
        }

        let rows: Vec<PatternRow> = self
            .iter()
            .enumerate()
            .map(|(i, pattern)| PatternRow::from_pattern(i + 1, pattern, decimal_places))
            .collect();

        Table::new(rows).to_string()
    }

    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl OutputFormat for Vec<SampleReport> {
    fn to_table(&self, decimal_places: u8) -> String {
        if self.is_empty() {
            return "No samples produced a status.".to_string();
        }

        let rows: Vec<SampleRow> = self
            .iter()
            .map(|report| SampleRow::from_report(report, decimal_places))
            .collect();

        Table::new(rows).to_string()
    }

    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Format a temperature in °C, or "NaN" for an invalid reading
pub fn format_temperature(value: f32, decimal_places: u8) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    format!("{:.*}°C", usize::from(decimal_places), value)
}
