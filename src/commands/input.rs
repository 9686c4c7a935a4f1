// Sample input lines shared by replay and monitor
use crate::alerts::AlertEngine;
use crate::models::Reading;
use anyhow::{Context, Result, bail};

#[derive(Debug, Clone, PartialEq)]
pub enum InputLine {
    /// Blank line or `#` comment
    Skip,
    Cleaning(bool),
    Override,
    /// Bare value, stamped by the caller
    Value(f32),
    Sample(Reading),
}

impl InputLine {
    /// Apply a directive to the engine. Returns false for lines that are not directives.
    pub fn apply_directive(&self, engine: &mut AlertEngine) -> bool {
        match self {
            InputLine::Cleaning(on) => {
                engine.set_cleaning_mode(*on);
                log::debug!("Cleaning mode {}", if *on { "on" } else { "off" });
                true
            }
            InputLine::Override => {
                engine.set_human_override(true);
                log::debug!("Human override armed");
                true
            }
            _ => false,
        }
    }
}

pub fn parse_input_line(line: &str) -> Result<InputLine> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(InputLine::Skip);
    }

    match line.to_lowercase().as_str() {
        "cleaning on" => return Ok(InputLine::Cleaning(true)),
        "cleaning off" => return Ok(InputLine::Cleaning(false)),
        "override" => return Ok(InputLine::Override),
        _ => {}
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    match fields.as_slice() {
        [value] => Ok(InputLine::Value(parse_value(value)?)),
        [value, minute, hour, day] => {
            let value = parse_value(value)?;
            let minute: u8 = minute
                .parse()
                .with_context(|| format!("Invalid minute: {minute}"))?;
            let hour: u8 = hour.parse().with_context(|| format!("Invalid hour: {hour}"))?;
            let day: u32 = day.parse().with_context(|| format!("Invalid day: {day}"))?;
            if minute > 59 {
                bail!("Minute must be between 0 and 59, got {minute}");
            }
            if hour > 23 {
                bail!("Hour must be between 0 and 23, got {hour}");
            }
            Ok(InputLine::Sample(Reading::new(value, minute, hour, day)))
        }
        _ => bail!("Expected 'value' or 'value,minute,hour,day', got '{line}'"),
    }
}

// "nan" is accepted so invalid sensor readings can be replayed
fn parse_value(raw: &str) -> Result<f32> {
    raw.parse::<f32>()
        .with_context(|| format!("Invalid temperature: {raw}"))
}
