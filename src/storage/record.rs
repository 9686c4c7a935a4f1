// Line codec for the pattern record file:
// <value>,<minute>,<hour>,<min_range>,<max_range>
use crate::models::LearnedPattern;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("expected 5 comma-separated fields")]
    MissingFields,
    #[error("field '{field}' is not a number: {raw}")]
    InvalidNumber { field: &'static str, raw: String },
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

/// Floats are written in their shortest exact form so a reload
/// reproduces the same pattern.
pub fn format_record(pattern: &LearnedPattern) -> String {
    format!(
        "{},{},{},{},{}",
        pattern.value, pattern.minute, pattern.hour, pattern.min_range, pattern.max_range
    )
}

pub fn parse_record(line: &str) -> Result<LearnedPattern, RecordError> {
    let fields: Vec<&str> = line.trim().splitn(5, ',').collect();
    if fields.len() < 5 || fields[0].is_empty() {
        return Err(RecordError::MissingFields);
    }

    let value = parse_float("value", fields[0])?;
    let minute = parse_bounded("minute", fields[1], 59)?;
    let hour = parse_bounded("hour", fields[2], 23)?;
    let min_range = parse_float("min_range", fields[3])?;
    let max_range = parse_float("max_range", fields[4])?;

    Ok(LearnedPattern {
        value,
        minute,
        hour,
        min_range,
        max_range,
    })
}

fn parse_float(field: &'static str, raw: &str) -> Result<f32, RecordError> {
    match raw.trim().parse::<f32>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(RecordError::InvalidNumber {
            field,
            raw: raw.to_string(),
        }),
    }
}

fn parse_bounded(field: &'static str, raw: &str, max: i64) -> Result<u8, RecordError> {
    let value: i64 = raw.trim().parse().map_err(|_| RecordError::InvalidNumber {
        field,
        raw: raw.to_string(),
    })?;
    if !(0..=max).contains(&value) {
        return Err(RecordError::OutOfRange { field, value });
    }
    // max is at most 59
    Ok(value as u8)
}
