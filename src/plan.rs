use crate::bitrate::describe_bitrate;
use crate::format::{AudioOutputFormat, Decision, VideoOutputFormat};
use crate::probe::ProbedMedia;
use crate::strategy::{
    classify_aspect, decide_audio_output, decide_video_output, AspectClass, BitrateCap,
    StrategyConfig,
};
use log::info;
use serde::Serialize;
use std::fmt;

/// One transcode job. Consumed by [`TranscodeJob::plan`], so the running
/// bitrate cap cannot leak into another job.
#[derive(Debug)]
pub struct TranscodeJob {
    config: StrategyConfig,
    cap: BitrateCap,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TranscodePlan {
    #[serde(serialize_with = "serialize_bitrate")]
    pub original_bitrate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect: Option<AspectClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Decision<VideoOutputFormat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<Decision<AudioOutputFormat>>,
    pub bitrate_cap: BitrateCap,
}

fn serialize_bitrate<S: serde::Serializer>(
    value: &Option<i64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(value.unwrap_or(0))
}

impl TranscodeJob {
    pub fn new(config: StrategyConfig) -> Self {
        Self {
            config,
            cap: BitrateCap::default(),
        }
    }

    pub fn plan(self, media: &ProbedMedia) -> TranscodePlan {
        let mut cap = self.cap;

        let video = media.video.as_ref().map(|track| {
            let result = decide_video_output(track, &self.config, cap);
            cap = result.cap;
            result.decision
        });
        let aspect = media
            .video
            .as_ref()
            .map(|track| classify_aspect(track.width(), track.height()));
        let audio = media.audio.as_ref().map(decide_audio_output);

        let plan = TranscodePlan {
            original_bitrate: self.config.original_bitrate(),
            aspect,
            video,
            audio,
            bitrate_cap: cap,
        };
        info!(
            "Planned job (source bitrate {}): video {}, audio {}",
            describe_bitrate(plan.original_bitrate),
            describe_optional(plan.video.as_ref()),
            describe_optional(plan.audio.as_ref())
        );
        plan
    }
}

impl TranscodePlan {
    /// True when every present track can be copied as-is.
    pub fn is_full_pass_through(&self) -> bool {
        self.video.as_ref().map_or(true, Decision::is_pass_through)
            && self.audio.as_ref().map_or(true, Decision::is_pass_through)
    }
}

fn describe_optional<T: fmt::Display>(decision: Option<&Decision<T>>) -> String {
    match decision {
        Some(decision) => decision.to_string(),
        None => "absent".to_string(),
    }
}

impl fmt::Display for TranscodePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "source bitrate: {}",
            describe_bitrate(self.original_bitrate)
        )?;
        if let Some(aspect) = self.aspect {
            writeln!(f, "source aspect: {}", aspect)?;
        }
        if let Some(video) = &self.video {
            writeln!(f, "video: {}", video)?;
        }
        if let Some(audio) = &self.audio {
            writeln!(f, "audio: {}", audio)?;
        }
        write!(f, "bitrate cap: {} bps", self.bitrate_cap.bits_per_second())
    }
}
