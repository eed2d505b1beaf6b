//! Runs the system `ffmpeg` and waits for it, reporting progress while it works.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::errors::{BakeError, Result};

/// How often a running encoder is polled.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Spawns `ffmpeg -y -loglevel error <args>` and polls it until it exits.
/// `task` names the job in log lines.
pub fn run_ffmpeg(task: &str, args: &[OsString]) -> Result<()> {
    log::debug!("ffmpeg {}", display_args(args));
    let mut child = Command::new("ffmpeg")
        .args(["-y", "-loglevel", "error"])
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            BakeError::Export(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

    let started = Instant::now();
    loop {
        match child.try_wait()? {
            Some(_) => break,
            None => {
                log::info!(
                    "{task}: still encoding ({}s elapsed)",
                    started.elapsed().as_secs()
                );
                thread::sleep(POLL_INTERVAL);
            }
        }
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BakeError::Export(format!(
            "{task}: ffmpeg exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    log::info!("{task}: done in {}s", started.elapsed().as_secs());
    Ok(())
}

fn display_args(args: &[OsString]) -> String {
    args.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_dirs_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a").join("b").join("out.wmv");
        ensure_parent_dir(&target).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
        ensure_parent_dir(Path::new("bare.wmv")).unwrap();
    }

    #[test]
    fn failing_runs_are_errors() {
        if !is_ffmpeg_on_path() {
            return;
        }
        let err = run_ffmpeg("bogus", &[OsString::from("-i"), OsString::from("/nonexistent/input.wmv")])
            .unwrap_err();
        assert!(matches!(err, BakeError::Export(_)));
    }
}
