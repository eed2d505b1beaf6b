use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

use crate::errors::{BakeError, Result};

/// Reports the playing time of an audio file.
pub trait AudioProbe {
    fn length_seconds(&self, path: &Path) -> Result<f64>;
}

/// Asks `ffprobe` for the container duration.
#[derive(Debug, Clone, Default)]
pub struct FfprobeAudioProbe;

#[derive(Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct ProbeOut {
    format: Option<ProbeFormat>,
}

fn probe_error(path: &Path, message: impl Into<String>) -> BakeError {
    BakeError::AudioProbe {
        path: PathBuf::from(path),
        message: message.into(),
    }
}

/// Extracts `format.duration` from ffprobe's JSON output.
fn parse_duration(path: &Path, stdout: &[u8]) -> Result<f64> {
    let parsed: ProbeOut = serde_json::from_slice(stdout)
        .map_err(|e| probe_error(path, format!("ffprobe json parse failed: {e}")))?;
    parsed
        .format
        .and_then(|f| f.duration)
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| probe_error(path, "ffprobe reported no duration"))
}

impl AudioProbe for FfprobeAudioProbe {
    fn length_seconds(&self, path: &Path) -> Result<f64> {
        let out = Command::new("ffprobe")
            .args(["-v", "error", "-print_format", "json", "-show_format"])
            .arg(path)
            .output()
            .map_err(|e| probe_error(path, format!("failed to run ffprobe: {e}")))?;
        if !out.status.success() {
            return Err(probe_error(
                path,
                format!(
                    "ffprobe failed: {}",
                    String::from_utf8_lossy(&out.stderr).trim()
                ),
            ));
        }
        parse_duration(path, &out.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_format_duration() {
        let json = br#"{"format": {"filename": "a.mp3", "duration": "7.200000"}}"#;
        let seconds = parse_duration(Path::new("a.mp3"), json).unwrap();
        assert!((seconds - 7.2).abs() < 1e-9);
    }

    #[test]
    fn missing_duration_is_an_error() {
        let err = parse_duration(Path::new("a.mp3"), br#"{"format": {}}"#).unwrap_err();
        assert!(matches!(err, BakeError::AudioProbe { .. }));
    }
}
