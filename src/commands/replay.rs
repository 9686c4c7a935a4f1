// Replay a recorded sample file through one engine instance
use crate::alerts::AlertEngine;
use crate::commands::input::{InputLine, parse_input_line};
use crate::commands::open_engine;
use crate::config::Config;
use crate::output::{OutputFormat, SampleReport};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn handle_replay_command(
    file: &Path,
    config: &Config,
    json_output: bool,
    verbose: bool,
) -> Result<()> {
    let contents = fs::read_to_string(file)
        .with_context(|| format!("Failed to read sample file: {}", file.display()))?;

    let mut engine = open_engine(config);
    let reports = replay_lines(&mut engine, contents.lines(), verbose);

    if json_output {
        println!("{}", reports.to_json()?);
    } else {
        println!("{}", reports.to_table(config.output.decimal_places));
        println!(
            "{} learned patterns, {} pending errors",
            engine.list_learned_patterns().len(),
            engine.state().error_count
        );
    }
    Ok(())
}

/// Feed lines to the engine in order. Quiet samples are kept only with `include_quiet`.
pub fn replay_lines<'a, I>(
    engine: &mut AlertEngine,
    lines: I,
    include_quiet: bool,
) -> Vec<SampleReport>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut reports = Vec::new();

    for (line_num, line) in lines.into_iter().enumerate() {
        let input = match parse_input_line(line) {
            Ok(input) => input,
            Err(e) => {
                log::warn!("Skipping malformed sample at line {}: {:#}", line_num + 1, e);
                continue;
            }
        };

        if input.apply_directive(engine) {
            continue;
        }

        let reading = match input {
            InputLine::Sample(reading) => reading,
            InputLine::Value(_) => {
                log::warn!("Skipping sample without time at line {}", line_num + 1);
                continue;
            }
            _ => continue,
        };

        let outcome = engine.process(reading);
        if outcome.is_some() || include_quiet {
            reports.push(SampleReport {
                line: line_num + 1,
                reading,
                outcome,
            });
        }
    }

    reports
}
