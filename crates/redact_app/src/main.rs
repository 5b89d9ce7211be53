mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::ArgMatches;
use redact_core::config::{ConfigManager, Settings};
use redact_core::logging::{init_tracing, LogLevel};
use redact_core::{Redactor, TimeRange};

use crate::cli::{build_cli, read_ranges_file};

fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let settings = load_settings(matches.get_one::<PathBuf>("config"))?;

    let level = matches
        .get_one::<LogLevel>("log-level")
        .copied()
        .unwrap_or(settings.logging.level);
    init_tracing(level);
    tracing::debug!("audio-redact {}", redact_core::version());

    match matches.subcommand() {
        Some(("redact", sub)) => redact(sub, settings),
        Some(("info", sub)) => info(sub, settings),
        Some(("convert", sub)) => convert(sub, settings),
        _ => bail!("no subcommand given"),
    }
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    let mut config = ConfigManager::new(path);
    config
        .load_or_create()
        .with_context(|| format!("failed to load config '{}'", path.display()))?;
    Ok(config.into_settings())
}

fn redact(matches: &ArgMatches, mut settings: Settings) -> anyhow::Result<()> {
    let input = required_path(matches, "input")?;
    let output = required_path(matches, "output")?;

    let mut ranges: Vec<TimeRange> = matches
        .get_many::<TimeRange>("range")
        .map(|values| values.copied().collect())
        .unwrap_or_default();
    if let Some(file) = matches.get_one::<PathBuf>("ranges-file") {
        ranges.extend(read_ranges_file(file)?);
    }

    if let Some(dir) = matches.get_one::<PathBuf>("temp-dir") {
        settings.paths.temp_dir = Some(dir.clone());
    }
    if let Some(&frequency) = matches.get_one::<u32>("frequency") {
        settings.tone.frequency_hz = frequency;
    }

    let redactor = Redactor::with_ffmpeg(settings);
    redactor
        .engine()
        .check_available()
        .context("ffmpeg is not available")?;

    let report = redactor
        .redact(input, &ranges, output)
        .map_err(|e| anyhow::anyhow!("{} failure: {}", e.kind(), e.chain()))?;

    if report.redacted() {
        println!(
            "Redacted {:.3}s in {} segment(s) -> {}",
            report.tone_seconds,
            report.segments.iter().filter(|s| s.is_tone()).count(),
            report.output.display()
        );
    } else {
        println!("Nothing redacted -> {}", report.output.display());
    }
    Ok(())
}

fn info(matches: &ArgMatches, settings: Settings) -> anyhow::Result<()> {
    let file = required_path(matches, "file")?;

    let info = Redactor::with_ffmpeg(settings)
        .probe(file)
        .map_err(|e| anyhow::anyhow!("{} failure: {}", e.kind(), e.chain()))?;

    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn convert(matches: &ArgMatches, settings: Settings) -> anyhow::Result<()> {
    let input = required_path(matches, "input")?;
    let output = required_path(matches, "output")?;
    let format = matches.get_one::<String>("format").map(String::as_str);

    Redactor::with_ffmpeg(settings)
        .convert(input, output, format)
        .map_err(|e| anyhow::anyhow!("{} failure: {}", e.kind(), e.chain()))?;

    println!("Converted {} -> {}", input.display(), output.display());
    Ok(())
}

fn required_path<'a>(matches: &'a ArgMatches, id: &str) -> anyhow::Result<&'a PathBuf> {
    matches
        .get_one::<PathBuf>(id)
        .with_context(|| format!("missing required argument '{id}'"))
}
