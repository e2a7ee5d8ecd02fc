//! Property-based checks of the video and audio decisions.
//!
//! Run with: cargo test --test decision_properties

use format_strategy::mime::VIDEO_AVC;
use format_strategy::strategy::{DEFAULT_BITRATE, LONGER_LENGTH, SHORTER_LENGTH};
use format_strategy::{
    decide_audio_output, decide_video_output, AudioTrack, BitrateCap, StrategyConfig, VideoTrack,
};
use proptest::prelude::*;

fn within_tolerance(width: u32, height: u32) -> bool {
    let longer = width.max(height) as f32;
    let shorter = width.min(height) as f32;
    (LONGER_LENGTH as f32 / SHORTER_LENGTH as f32 - longer / shorter).abs() <= 0.01
}

fn mime_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => Just(VIDEO_AVC.to_string()),
        1 => Just("video/hevc".to_string()),
        1 => Just("video/x-vnd.on2.vp9".to_string()),
    ]
}

fn bitrate_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![
        1 => Just(0i64),
        1 => Just(DEFAULT_BITRATE),
        4 => 1i64..10_000_000,
    ]
}

proptest! {
    #[test]
    fn video_decision_properties(
        width in 1u32..4000,
        height in 1u32..4000,
        mime in mime_strategy(),
        original in bitrate_strategy(),
    ) {
        let track = VideoTrack::new(mime.clone(), width.into(), height.into()).unwrap();
        let result = decide_video_output(
            &track,
            &StrategyConfig::new(original, None),
            BitrateCap::default(),
        );

        let snapped = within_tolerance(width, height);
        let (expected_w, expected_h) = match (snapped, width >= height) {
            (true, true) => (LONGER_LENGTH, SHORTER_LENGTH),
            (true, false) => (SHORTER_LENGTH, LONGER_LENGTH),
            (false, _) => (width, height),
        };

        let expect_pass_through = expected_w.min(expected_h) <= SHORTER_LENGTH
            && original != 0
            && original < DEFAULT_BITRATE
            && mime == VIDEO_AVC;

        match result.decision.output() {
            None => {
                prop_assert!(expect_pass_through);
                prop_assert_eq!(result.cap, BitrateCap::default());
            }
            Some(format) => {
                prop_assert!(!expect_pass_through);
                prop_assert_eq!((format.width, format.height), (expected_w, expected_h));
                prop_assert_eq!(format.width >= format.height, width >= height);

                let expected_bitrate = if original != 0 {
                    original.min(DEFAULT_BITRATE)
                } else {
                    DEFAULT_BITRATE
                };
                prop_assert_eq!(format.bit_rate, expected_bitrate);
                prop_assert_eq!(result.cap.bits_per_second(), expected_bitrate);
            }
        }
    }

    #[test]
    fn cap_never_rises_across_decisions(
        first in bitrate_strategy(),
        start in 1i64..10_000_000,
    ) {
        let track = VideoTrack::new("video/hevc", 1920, 1080).unwrap();
        let result = decide_video_output(
            &track,
            &StrategyConfig::new(first, None),
            BitrateCap::new(start),
        );
        prop_assert!(result.cap <= BitrateCap::new(start));
    }

    #[test]
    fn audio_decision_properties(
        mime in prop_oneof![
            Just("audio/aac".to_string()),
            Just("Audio/AAC".to_string()),
            Just("audio/mp4a-latm".to_string()),
            Just("audio/opus".to_string()),
            Just("audio/mpeg".to_string()),
        ],
        channels in 1i64..9,
        sample_rate in prop_oneof![Just(8000i64), Just(22050), Just(44100), Just(48000), Just(96000)],
    ) {
        let track = AudioTrack::new(mime.clone(), channels, sample_rate).unwrap();
        let decision = decide_audio_output(&track);
        if mime.eq_ignore_ascii_case("audio/aac") {
            prop_assert!(decision.is_pass_through());
        } else {
            let format = decision.output().unwrap();
            prop_assert_eq!(format.mime, "audio/aac");
            prop_assert_eq!(format.bit_rate, 131_072);
            prop_assert_eq!(i64::from(format.channel_count), channels);
            prop_assert_eq!(i64::from(format.sample_rate), sample_rate);
        }
    }
}
