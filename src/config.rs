use crate::bitrate::parse_original_bitrate;
use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "FORMAT_STRATEGY_CONFIG";
const CONFIG_DIR_NAME: &str = "format-strategy";
const CONFIG_FILE_NAME: &str = "format-strategy.toml";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSetting {
    Text,
    Json,
}

/// A bitrate written either as plain bits/sec (`800000`) or as text (`"800k"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BitrateSetting {
    Bits(i64),
    Text(String),
}

impl BitrateSetting {
    /// Zero means unknown; negative values are rejected.
    pub fn bits_per_second(&self) -> Result<i64, String> {
        match self {
            BitrateSetting::Bits(bps) if *bps >= 0 => Ok(*bps),
            BitrateSetting::Bits(bps) => Err(format!("bitrate {} must not be negative", bps)),
            BitrateSetting::Text(raw) => parse_original_bitrate(raw),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Fallback source bitrate when neither the CLI nor the probe has one.
    pub original_bitrate: Option<BitrateSetting>,
    pub mask_file_path: Option<PathBuf>,
    pub output: Option<OutputSetting>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Cli(PathBuf),
    Env(PathBuf),
    Default(PathBuf),
}

/// Finds and parses the configuration file. An explicit `path_override` must
/// exist; the env var and default locations are skipped when missing.
pub fn load(path_override: Option<&Path>) -> Result<Option<(Config, ConfigSource)>> {
    if let Some(path) = path_override {
        if !path.exists() {
            bail!("Configuration file {} does not exist", path.display());
        }
        let config = read_config(path)?;
        return Ok(Some((config, ConfigSource::Cli(path.to_path_buf()))));
    }

    if let Some(env_path) = env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            let config = read_config(&path)?;
            return Ok(Some((config, ConfigSource::Env(path))));
        }
        info!(
            "{} points to {}, which does not exist; ignoring",
            CONFIG_ENV_VAR,
            path.display()
        );
    }

    for candidate in default_config_candidates() {
        if !candidate.exists() {
            continue;
        }
        let config = read_config(&candidate)?;
        return Ok(Some((config, ConfigSource::Default(candidate))));
    }

    debug!("No configuration file found; using defaults");
    Ok(None)
}

pub fn parse(contents: &str) -> Result<Config> {
    toml::from_str(contents).context("Failed to parse configuration")
}

fn read_config(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path).with_context(|| {
        format!("Failed to read configuration file at {}", path.display())
    })?;
    parse(&contents).with_context(|| format!("Invalid configuration file {}", path.display()))
}

fn default_config_candidates() -> Vec<PathBuf> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();

    let mut push_unique = |path: PathBuf, out: &mut Vec<PathBuf>| {
        if !path.as_os_str().is_empty() && seen.insert(path.clone()) {
            out.push(path);
        }
    };

    if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME").filter(|val| !val.is_empty()) {
        let mut path = PathBuf::from(xdg_config);
        path.push(CONFIG_DIR_NAME);
        path.push("config.toml");
        push_unique(path, &mut out);
    }

    if let Some(home) = env::var_os("HOME").filter(|val| !val.is_empty()) {
        let home = PathBuf::from(home);
        let mut path = home.join(".config");
        path.push(CONFIG_DIR_NAME);
        path.push("config.toml");
        push_unique(path, &mut out);

        push_unique(home.join(CONFIG_FILE_NAME), &mut out);
    }

    if let Ok(current_dir) = env::current_dir() {
        push_unique(current_dir.join(CONFIG_FILE_NAME), &mut out);
    }

    push_unique(
        PathBuf::from("/etc").join(CONFIG_DIR_NAME).join("config.toml"),
        &mut out,
    );

    out
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn parses_all_keys() {
        let cfg = parse(
            r#"
original_bitrate = "3M"
mask_file_path = "/srv/masks/logo.png"
output = "json"
"#,
        )
        .unwrap();
        assert_eq!(cfg.original_bitrate, Some(BitrateSetting::Text("3M".to_string())));
        assert_eq!(
            cfg.mask_file_path.as_deref(),
            Some(Path::new("/srv/masks/logo.png"))
        );
        assert_eq!(cfg.output, Some(OutputSetting::Json));
    }

    #[test]
    fn accepts_integer_and_text_bitrates() {
        let numeric = parse("original_bitrate = 800000").unwrap();
        assert_eq!(numeric.original_bitrate, Some(BitrateSetting::Bits(800_000)));
        assert_eq!(numeric.original_bitrate.unwrap().bits_per_second(), Ok(800_000));

        let text = parse("original_bitrate = \"800k\"").unwrap();
        assert_eq!(text.original_bitrate.unwrap().bits_per_second(), Ok(800_000));

        assert_eq!(BitrateSetting::Bits(0).bits_per_second(), Ok(0));
        assert!(BitrateSetting::Bits(-1).bits_per_second().is_err());
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = parse("video_quality = \"720p\"").unwrap_err();
        assert!(format!("{:#}", err).contains("unknown field"));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/format-strategy.toml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
