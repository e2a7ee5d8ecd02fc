//! 720p bitrate-aware format strategy.
//!
//! Video is normalised toward 1280x720 when the source is within 1% of 16:9 and
//! otherwise kept at its native size. Sources that are already at most 720p on
//! their shorter side, H.264 encoded and below the running bitrate cap are passed
//! through untouched. Audio is passed through when it is already AAC and
//! re-encoded to AAC-LC otherwise.
//!
//! The running cap is threaded explicitly: [`decide_video_output`] takes the
//! current [`BitrateCap`] and hands back the (possibly lowered) cap with its
//! decision.

use crate::format::{AudioOutputFormat, Decision, VideoOutputFormat};
use crate::mime;
use crate::track::{AudioTrack, VideoTrack};
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};
use strum_macros::Display;

pub const LONGER_LENGTH: u32 = 1280;
pub const SHORTER_LENGTH: u32 = 720;
/// Nexus 4 camera bitrate at 720p.
pub const DEFAULT_BITRATE: i64 = 2_500_000;
const ASPECT_TOLERANCE: f32 = 0.01;

/// Upper bound on the video bitrate targeted by a job.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BitrateCap(i64);

impl Default for BitrateCap {
    fn default() -> Self {
        BitrateCap(DEFAULT_BITRATE)
    }
}

impl BitrateCap {
    pub fn new(bits_per_second: i64) -> Self {
        BitrateCap(bits_per_second)
    }

    pub fn bits_per_second(self) -> i64 {
        self.0
    }

    /// Lowers the cap to a known source bitrate below it. Never raises.
    pub fn lowered_to(self, original: Option<i64>) -> Self {
        match original {
            Some(bps) if bps < self.0 => BitrateCap(bps),
            _ => self,
        }
    }
}

/// Per-job construction state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrategyConfig {
    original_bitrate: Option<i64>,
    mask_file_path: Option<PathBuf>,
}

impl StrategyConfig {
    /// `original_bitrate` of zero (or below) means the source bitrate is unknown.
    pub fn new(original_bitrate: i64, mask_file_path: Option<PathBuf>) -> Self {
        Self {
            original_bitrate: (original_bitrate > 0).then_some(original_bitrate),
            mask_file_path,
        }
    }

    pub fn original_bitrate(&self) -> Option<i64> {
        self.original_bitrate
    }

    pub fn mask_file_path(&self) -> Option<&Path> {
        self.mask_file_path.as_deref()
    }
}

/// Whether a source is exactly 16:9. Only used for diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Display)]
pub enum AspectClass {
    #[strum(to_string = "16:9")]
    #[serde(rename = "16:9")]
    Exact16x9,
    #[strum(to_string = "not 16:9")]
    #[serde(rename = "other")]
    Other,
}

pub fn classify_aspect(width: u32, height: u32) -> AspectClass {
    let longer = u64::from(width.max(height));
    let shorter = u64::from(width.min(height));
    if longer * 9 == shorter * 16 {
        AspectClass::Exact16x9
    } else {
        AspectClass::Other
    }
}

/// Output pixel grid for a source, in the source's orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TargetResolution {
    pub width: u32,
    pub height: u32,
    pub snapped: bool,
}

impl TargetResolution {
    pub fn shorter(&self) -> u32 {
        self.width.min(self.height)
    }
}

pub fn normalize_resolution(width: u32, height: u32) -> TargetResolution {
    let landscape = width >= height;
    let (longer, shorter) = if landscape {
        (width, height)
    } else {
        (height, width)
    };

    let target_ratio = LONGER_LENGTH as f32 / SHORTER_LENGTH as f32;
    let source_ratio = longer as f32 / shorter as f32;
    let snapped = (target_ratio - source_ratio).abs() <= ASPECT_TOLERANCE;
    let (longer, shorter) = if snapped {
        (LONGER_LENGTH, SHORTER_LENGTH)
    } else {
        (longer, shorter)
    };

    if landscape {
        TargetResolution {
            width: longer,
            height: shorter,
            snapped,
        }
    } else {
        TargetResolution {
            width: shorter,
            height: longer,
            snapped,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoDecision {
    pub decision: Decision<VideoOutputFormat>,
    pub cap: BitrateCap,
}

pub fn decide_video_output(
    input: &VideoTrack,
    config: &StrategyConfig,
    cap: BitrateCap,
) -> VideoDecision {
    let (width, height) = (input.width(), input.height());
    debug!(
        "video info mime: {}, width: {}, height: {}",
        input.mime(),
        width,
        height
    );

    let target = normalize_resolution(width, height);
    match classify_aspect(width, height) {
        AspectClass::Exact16x9 => debug!(
            "Video {}x{} is 16:9; target {}x{}",
            width, height, target.width, target.height
        ),
        AspectClass::Other => debug!(
            "Video {}x{} is not 16:9; target {}x{}",
            width, height, target.width, target.height
        ),
    }

    let original = config.original_bitrate();
    let below_cap = original.is_some_and(|bps| bps < cap.bits_per_second());
    if target.shorter() <= SHORTER_LENGTH && below_cap && mime::is_avc(input.mime()) {
        debug!(
            "Video {}x{} at {} bps is within 720p and the {} bps cap; passing through",
            width,
            height,
            original.unwrap_or_default(),
            cap.bits_per_second()
        );
        return VideoDecision {
            decision: Decision::PassThrough,
            cap,
        };
    }

    let cap = cap.lowered_to(original);
    let format = VideoOutputFormat::avc(target.width, target.height, cap.bits_per_second())
        .with_mask_file(config.mask_file_path().map(Path::to_path_buf));
    debug!("Video will be transcoded to {}", format);

    VideoDecision {
        decision: Decision::Transcode(format),
        cap,
    }
}

pub fn decide_audio_output(input: &AudioTrack) -> Decision<AudioOutputFormat> {
    debug!(
        "audio info mime: {}, channel count: {}, sample rate: {}",
        input.mime(),
        input.channel_count(),
        input.sample_rate()
    );

    if mime::is_aac(input.mime()) {
        debug!("Audio mime type {} is AAC; passing through", input.mime());
        return Decision::PassThrough;
    }

    debug!("Audio mime type {} needs transcoding", input.mime());
    Decision::Transcode(AudioOutputFormat::aac(
        input.sample_rate(),
        input.channel_count(),
    ))
}
