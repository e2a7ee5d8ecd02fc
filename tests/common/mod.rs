#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Command for the built binary with config discovery pointed at `home`.
pub fn format_strategy_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("format_strategy").expect("binary built");
    cmd.env_remove("FORMAT_STRATEGY_CONFIG");
    cmd.env_remove("XDG_CONFIG_HOME");
    cmd.env_remove("RUST_LOG");
    cmd.env("HOME", home);
    cmd.current_dir(home);
    cmd
}

pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

pub fn probe_json(bit_rate: i64, video: (i64, i64), video_mime: &str, audio_mime: &str) -> String {
    format!(
        r#"{{
  "bit_rate": {bit_rate},
  "video": {{ "mime": "{video_mime}", "width": {w}, "height": {h} }},
  "audio": {{ "mime": "{audio_mime}", "channel_count": 2, "sample_rate": 44100 }}
}}"#,
        w = video.0,
        h = video.1,
    )
}

pub fn run_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("run format_strategy");
    assert!(
        output.status.success(),
        "format_strategy failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}
