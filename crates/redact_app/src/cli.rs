use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{builder::ValueParser, value_parser, Arg, ArgAction, Command};
use redact_core::logging::LogLevel;
use redact_core::TimeRange;

/// Parse a `START:END` pair of seconds, e.g. `2.5:4`.
pub fn parse_range(value: &str) -> Result<TimeRange, String> {
    let invalid = || format!("invalid range '{value}', expected START:END in seconds");

    let (start, end) = value.trim().split_once(':').ok_or_else(invalid)?;
    let start: f64 = start.trim().parse().map_err(|_| invalid())?;
    let end: f64 = end.trim().parse().map_err(|_| invalid())?;

    if !start.is_finite() || !end.is_finite() {
        return Err(invalid());
    }
    check_range(TimeRange::new(start, end)).map_err(|e| format!("range '{value}' {e}"))
}

/// Rules shared by `--range` and `--ranges-file`.
fn check_range(range: TimeRange) -> Result<TimeRange, String> {
    if range.end < range.start {
        return Err("ends before it starts".into());
    }
    Ok(range)
}

/// Read ranges from a JSON file holding `[[start, end], ...]`.
pub fn read_ranges_file(path: &Path) -> anyhow::Result<Vec<TimeRange>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read ranges file '{}'", path.display()))?;
    let ranges: Vec<TimeRange> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse ranges file '{}'", path.display()))?;

    ranges
        .into_iter()
        .enumerate()
        .map(|(i, range)| {
            check_range(range).map_err(|e| {
                anyhow::anyhow!(
                    "range #{} ({}) in '{}' {}",
                    i + 1,
                    range,
                    path.display(),
                    e
                )
            })
        })
        .collect()
}

pub fn build_cli() -> Command {
    Command::new("audio-redact")
        .about("Replace time ranges of an audio file with a tone")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("TOML settings file (created with defaults if missing)")
                .global(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("trace, debug, info, warn or error (RUST_LOG overrides)")
                .global(true)
                .value_parser(ValueParser::new(|s: &str| s.parse::<LogLevel>())),
        )
        .subcommand(
            Command::new("redact")
                .about("Redact ranges of an input file")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .value_name("FILE")
                        .help("Audio file to redact")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Where to write the redacted audio")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("range")
                        .short('r')
                        .long("range")
                        .value_name("START:END")
                        .help("Range to replace, in seconds (repeatable)")
                        .action(ArgAction::Append)
                        .value_parser(ValueParser::new(parse_range)),
                )
                .arg(
                    Arg::new("ranges-file")
                        .long("ranges-file")
                        .value_name("JSON")
                        .help("JSON file with [[start, end], ...] ranges")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("temp-dir")
                        .long("temp-dir")
                        .value_name("DIR")
                        .help("Directory for intermediate clips (kept afterwards)")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("frequency")
                        .long("frequency")
                        .value_name("HZ")
                        .help("Tone frequency")
                        .value_parser(value_parser!(u32).range(1..)),
                ),
        )
        .subcommand(
            Command::new("info")
                .about("Print audio stream information as JSON")
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an audio file to another format")
                .arg(
                    Arg::new("input")
                        .value_name("INPUT")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("output")
                        .value_name("OUTPUT")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FMT")
                        .help("Container format (defaults to the output extension)"),
                ),
        )
}
