pub mod bitrate;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod mime;
pub mod plan;
pub mod probe;
pub mod strategy;
pub mod track;

pub use error::TrackError;
pub use format::{AudioOutputFormat, Decision, VideoOutputFormat};
pub use plan::{TranscodeJob, TranscodePlan};
pub use strategy::{decide_audio_output, decide_video_output, BitrateCap, StrategyConfig};
pub use track::{AudioTrack, VideoTrack};
