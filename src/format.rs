//! Output descriptors handed to the encoder configuration stage.

use crate::mime::{AacProfile, ColorFormat, AUDIO_AAC, VIDEO_AVC};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

pub const VIDEO_FRAME_RATE: u32 = 30;
pub const VIDEO_KEY_FRAME_INTERVAL_SECS: u32 = 3;
pub const AUDIO_BITRATE: i64 = 128 * 1024;

/// Outcome of a per-track decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Decision<T> {
    /// Copy the track unmodified.
    PassThrough,
    Transcode(T),
}

impl<T> Decision<T> {
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Decision::PassThrough)
    }

    pub fn output(&self) -> Option<&T> {
        match self {
            Decision::PassThrough => None,
            Decision::Transcode(format) => Some(format),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Decision<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::PassThrough => write!(f, "pass-through"),
            Decision::Transcode(format) => write!(f, "transcode to {}", format),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VideoOutputFormat {
    pub mime: &'static str,
    pub width: u32,
    pub height: u32,
    pub bit_rate: i64,
    pub frame_rate: u32,
    pub key_frame_interval: u32,
    pub color_format: ColorFormat,
    pub color_format_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_file_path: Option<PathBuf>,
}

impl VideoOutputFormat {
    pub fn avc(width: u32, height: u32, bit_rate: i64) -> Self {
        Self {
            mime: VIDEO_AVC,
            width,
            height,
            bit_rate,
            frame_rate: VIDEO_FRAME_RATE,
            key_frame_interval: VIDEO_KEY_FRAME_INTERVAL_SECS,
            color_format: ColorFormat::Surface,
            color_format_code: ColorFormat::Surface.code(),
            mask_file_path: None,
        }
    }

    pub fn with_mask_file(mut self, path: Option<PathBuf>) -> Self {
        self.mask_file_path = path;
        self
    }
}

impl fmt::Display for VideoOutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x{} @ {} bps, {} fps, key frame every {}s, color {}",
            self.mime,
            self.width,
            self.height,
            self.bit_rate,
            self.frame_rate,
            self.key_frame_interval,
            self.color_format
        )?;
        if let Some(mask) = &self.mask_file_path {
            write!(f, ", mask {}", mask.display())?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AudioOutputFormat {
    pub mime: &'static str,
    pub sample_rate: u32,
    pub channel_count: u32,
    pub aac_profile: AacProfile,
    pub aac_profile_code: i32,
    pub bit_rate: i64,
}

impl AudioOutputFormat {
    pub fn aac(sample_rate: u32, channel_count: u32) -> Self {
        Self {
            mime: AUDIO_AAC,
            sample_rate,
            channel_count,
            aac_profile: AacProfile::Lc,
            aac_profile_code: AacProfile::Lc.code(),
            bit_rate: AUDIO_BITRATE,
        }
    }
}

impl fmt::Display for AudioOutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} Hz, {} ch @ {} bps",
            self.mime, self.aac_profile, self.sample_rate, self.channel_count, self.bit_rate
        )
    }
}
