// Long-running loop: one value per stdin line, stamped with the local clock
use crate::alerts::AlertEngine;
use crate::commands::input::{InputLine, parse_input_line};
use crate::commands::open_engine;
use crate::config::Config;
use crate::models::Reading;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, Timelike};
use std::io::{self, BufRead, Write};

/// Maps wall-clock instants to (minute, hour, day) with day 0 = start date.
#[derive(Debug, Clone)]
pub struct SampleClock {
    start: NaiveDate,
}

impl SampleClock {
    pub fn starting(start: NaiveDate) -> Self {
        Self { start }
    }

    pub fn stamp(&self, value: f32, now: DateTime<Local>) -> Reading {
        let elapsed = (now.date_naive() - self.start).num_days();
        Reading::new(
            value,
            now.minute() as u8,
            now.hour() as u8,
            u32::try_from(elapsed).unwrap_or(0),
        )
    }
}

pub fn handle_monitor_command(config: &Config, json_output: bool) -> Result<()> {
    let mut engine = open_engine(config);
    let clock = SampleClock::starting(Local::now().date_naive());

    log::info!(
        "Monitoring stdin (baseline {:.1}°C, report every {} min)",
        engine.baseline(),
        engine.thresholds().report_interval_minutes
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_monitor(
        &mut engine,
        stdin.lock(),
        &mut stdout.lock(),
        |value| clock.stamp(value, Local::now()),
        json_output,
    )
}

/// Process every line from `reader`, writing one status line per non-empty outcome.
pub fn run_monitor<R, W, F>(
    engine: &mut AlertEngine,
    reader: R,
    writer: &mut W,
    mut stamp: F,
    json_output: bool,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(f32) -> Reading,
{
    for (line_num, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        let input = match parse_input_line(&line) {
            Ok(input) => input,
            Err(e) => {
                log::warn!("Ignoring input line {}: {:#}", line_num + 1, e);
                continue;
            }
        };

        if input.apply_directive(engine) {
            continue;
        }

        let reading = match input {
            InputLine::Value(value) => stamp(value),
            InputLine::Sample(reading) => reading,
            _ => continue,
        };

        if let Some(outcome) = engine.process(reading) {
            if json_output {
                writeln!(writer, "{}", serde_json::to_string(&outcome)?)?;
            } else {
                writeln!(writer, "{}", outcome.message())?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
