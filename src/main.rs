use anyhow::{anyhow, Context, Result};
use clap::parser::ValueSource;
use clap::{value_parser, ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};
use format_strategy::bitrate::{describe_bitrate, parse_original_bitrate};
use format_strategy::config::{self, BitrateSetting, Config, ConfigSource, OutputSetting};
use format_strategy::logging;
use format_strategy::probe::ProbedMedia;
use format_strategy::{StrategyConfig, TranscodeJob};
use log::{debug, info};
use std::path::PathBuf;

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputSetting> for OutputFormat {
    fn from(setting: OutputSetting) -> Self {
        match setting {
            OutputSetting::Text => OutputFormat::Text,
            OutputSetting::Json => OutputFormat::Json,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum TracksFilter {
    All,
    Video,
    Audio,
}

#[derive(Parser, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Probe description of the input (JSON, or TOML with a .toml extension); "-" reads JSON from stdin
    #[arg(value_parser = value_parser!(PathBuf))]
    probe_file: PathBuf,

    /// Path to the configuration file
    #[arg(short, long, value_parser = value_parser!(PathBuf))]
    config_file: Option<PathBuf>,

    /// Source video bitrate (e.g. 3M, 4800k); 0 means unknown. Overrides the probe's bit_rate
    #[arg(long, value_parser = parse_original_bitrate, id = "original_bitrate")]
    original_bitrate: Option<i64>,

    /// Mask file forwarded into the video output format
    #[arg(long = "mask-file", value_parser = value_parser!(PathBuf), id = "mask_file")]
    mask_file: Option<PathBuf>,

    /// Output format for the plan: text|json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, id = "output")]
    output: OutputFormat,

    /// Restrict the plan to some tracks: all|video|audio
    #[arg(long, value_enum, default_value_t = TracksFilter::All)]
    tracks: TracksFilter,
}

fn cli_value_provided(matches: &ArgMatches, id: &str) -> bool {
    matches
        .value_source(id)
        .is_some_and(|src| matches!(src, ValueSource::CommandLine))
}

fn apply_config_overrides(args: &mut Args, cfg: &Config, matches: &ArgMatches) {
    if args.mask_file.is_none() {
        if let Some(mask) = cfg.mask_file_path.as_ref() {
            args.mask_file = Some(mask.clone());
        }
    }

    if !cli_value_provided(matches, "output") {
        if let Some(output) = cfg.output {
            args.output = output.into();
        }
    }
}

/// CLI flag first, then the probe's own bit_rate, then the configured fallback.
fn resolve_original_bitrate(args: &Args, probe: &ProbedMedia, cfg: &Config) -> Result<i64> {
    if let Some(bps) = args.original_bitrate {
        return Ok(bps);
    }
    if let Some(bps) = probe.known_bit_rate() {
        return Ok(bps);
    }
    match &cfg.original_bitrate {
        Some(setting) => setting
            .bits_per_second()
            .map_err(|err| anyhow!("Invalid original_bitrate in configuration: {}", err)),
        None => Ok(0),
    }
}

fn filter_tracks(mut probe: ProbedMedia, filter: TracksFilter) -> ProbedMedia {
    match filter {
        TracksFilter::All => {}
        TracksFilter::Video => probe.audio = None,
        TracksFilter::Audio => probe.video = None,
    }
    probe
}

fn main() -> Result<()> {
    logging::init();

    let matches = Args::command().get_matches();
    let mut args = Args::from_arg_matches(&matches)?;

    let loaded_config = config::load(args.config_file.as_deref())?;
    if let Some((_, source)) = &loaded_config {
        match source {
            ConfigSource::Env(path) => info!(
                "Loaded configuration from '{}' (via {}).",
                path.display(),
                config::CONFIG_ENV_VAR
            ),
            ConfigSource::Cli(path) | ConfigSource::Default(path) => {
                info!("Loaded configuration from '{}'.", path.display())
            }
        }
    }
    let cfg = loaded_config.map(|(cfg, _)| cfg).unwrap_or_default();
    apply_config_overrides(&mut args, &cfg, &matches);

    let probe = ProbedMedia::load(&args.probe_file)
        .with_context(|| format!("Could not load probe '{}'", args.probe_file.display()))?;
    let original_bitrate = resolve_original_bitrate(&args, &probe, &cfg)?;
    let strategy = StrategyConfig::new(original_bitrate, args.mask_file.clone());
    debug!(
        "Source bitrate {}, mask file {:?}, tracks {:?}",
        describe_bitrate(strategy.original_bitrate()),
        strategy.mask_file_path(),
        args.tracks
    );

    let plan = TranscodeJob::new(strategy).plan(&filter_tracks(probe, args.tracks));

    match args.output {
        OutputFormat::Json => {
            let rendered =
                serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
            println!("{}", rendered);
        }
        OutputFormat::Text => println!("{}", plan),
    }

    Ok(())
}
