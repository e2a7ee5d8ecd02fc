use std::fmt;

/// Rejection of a probed track before it reaches the decision functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackError {
    InvalidDimension { width: i64, height: i64 },
    InvalidAudioParams { channel_count: i64, sample_rate: i64 },
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::InvalidDimension { width, height } => write!(
                f,
                "invalid video dimensions {}x{}: width and height must be positive",
                width, height
            ),
            TrackError::InvalidAudioParams {
                channel_count,
                sample_rate,
            } => write!(
                f,
                "invalid audio parameters ({} channels, {} Hz): channel count and sample rate must be positive",
                channel_count, sample_rate
            ),
        }
    }
}

impl std::error::Error for TrackError {}
