//! Validated views of probed input tracks.
//!
//! Probing tools report dimensions and audio parameters as signed integers and
//! will happily hand back zero for streams they could not parse. Everything in
//! this module rejects such values up front so the decision functions never see
//! them.

use crate::error::TrackError;
use serde::Deserialize;
use std::convert::TryFrom;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawVideoTrack")]
pub struct VideoTrack {
    mime: String,
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawVideoTrack {
    mime: String,
    width: i64,
    height: i64,
}

impl TryFrom<RawVideoTrack> for VideoTrack {
    type Error = TrackError;

    fn try_from(raw: RawVideoTrack) -> Result<Self, Self::Error> {
        VideoTrack::new(raw.mime, raw.width, raw.height)
    }
}

impl VideoTrack {
    pub fn new(mime: impl Into<String>, width: i64, height: i64) -> Result<Self, TrackError> {
        match (positive_u32(width), positive_u32(height)) {
            (Some(w), Some(h)) => Ok(Self {
                mime: mime.into(),
                width: w,
                height: h,
            }),
            _ => Err(TrackError::InvalidDimension { width, height }),
        }
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawAudioTrack")]
pub struct AudioTrack {
    mime: String,
    channel_count: u32,
    sample_rate: u32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAudioTrack {
    mime: String,
    #[serde(alias = "channels")]
    channel_count: i64,
    sample_rate: i64,
}

impl TryFrom<RawAudioTrack> for AudioTrack {
    type Error = TrackError;

    fn try_from(raw: RawAudioTrack) -> Result<Self, Self::Error> {
        AudioTrack::new(raw.mime, raw.channel_count, raw.sample_rate)
    }
}

impl AudioTrack {
    pub fn new(
        mime: impl Into<String>,
        channel_count: i64,
        sample_rate: i64,
    ) -> Result<Self, TrackError> {
        match (positive_u32(channel_count), positive_u32(sample_rate)) {
            (Some(channels), Some(rate)) => Ok(Self {
                mime: mime.into(),
                channel_count: channels,
                sample_rate: rate,
            }),
            _ => Err(TrackError::InvalidAudioParams {
                channel_count,
                sample_rate,
            }),
        }
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn channel_count(&self) -> u32 {
        self.channel_count
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

fn positive_u32(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| *v > 0)
}
