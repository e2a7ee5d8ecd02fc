//! Probed media descriptions read from disk.
//!
//! Probing is done by an external tool; this crate only consumes its summary as
//! a small JSON or TOML document:
//!
//! ```toml
//! bit_rate = 3000000
//!
//! [video]
//! mime = "video/avc"
//! width = 1920
//! height = 1080
//!
//! [audio]
//! mime = "audio/mp4a-latm"
//! channel_count = 2
//! sample_rate = 44100
//! ```

use crate::track::{AudioTrack, VideoTrack};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub const STDIN_PATH: &str = "-";

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbedMedia {
    /// Source video bitrate in bits/sec; absent or zero when unknown.
    #[serde(default)]
    pub bit_rate: Option<i64>,
    #[serde(default)]
    pub video: Option<VideoTrack>,
    #[serde(default)]
    pub audio: Option<AudioTrack>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ProbeSyntax {
    Json,
    Toml,
}

impl ProbeSyntax {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ProbeSyntax::Toml,
            _ => ProbeSyntax::Json,
        }
    }
}

impl ProbedMedia {
    pub fn from_json_str(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Failed to parse JSON probe")
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse TOML probe")
    }

    /// Loads a probe from `path`, or from stdin when `path` is `-`. Stdin and
    /// files without a `.toml` extension are read as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if path.as_os_str() == STDIN_PATH {
            let mut contents = String::new();
            io::stdin()
                .read_to_string(&mut contents)
                .context("Failed to read probe from stdin")?;
            return Self::from_json_str(&contents);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read probe file at {}", path.display()))?;
        let parsed = match ProbeSyntax::for_path(path) {
            ProbeSyntax::Json => Self::from_json_str(&contents),
            ProbeSyntax::Toml => Self::from_toml_str(&contents),
        };
        parsed.with_context(|| format!("Invalid probe file {}", path.display()))
    }

    pub fn known_bit_rate(&self) -> Option<i64> {
        self.bit_rate.filter(|bps| *bps > 0)
    }
}
