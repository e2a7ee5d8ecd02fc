//! MIME types and encoder selector constants shared by the decision functions.

use serde::Serialize;
use strum_macros::Display;

/// H.264 / AVC elementary stream.
pub const VIDEO_AVC: &str = "video/avc";

/// AAC audio.
pub const AUDIO_AAC: &str = "audio/aac";

/// Color format requested from the video encoder.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ColorFormat {
    /// Opaque surface input; frames arrive through an encoder input surface.
    Surface,
}

impl ColorFormat {
    pub fn code(self) -> i32 {
        match self {
            ColorFormat::Surface => 0x7F00_0789,
        }
    }
}

/// AAC object type used for re-encoded audio.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Display)]
pub enum AacProfile {
    #[serde(rename = "LC")]
    #[strum(to_string = "LC")]
    Lc,
}

impl AacProfile {
    pub fn code(self) -> i32 {
        match self {
            AacProfile::Lc => 2,
        }
    }
}

pub fn is_avc(mime: &str) -> bool {
    mime == VIDEO_AVC
}

pub fn is_aac(mime: &str) -> bool {
    mime.eq_ignore_ascii_case(AUDIO_AAC)
}
