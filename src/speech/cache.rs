//! Voice clip cache keyed by content hash, with a dub index and a usage log.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::build_cache::{backup_path, content_hash, write_pretty_json};
use crate::errors::{BakeError, Result};
use crate::speech::probe::AudioProbe;
use crate::speech::remote::RemoteSpeech;
use crate::speech::{SpeechClip, SpeechRequest, SpeechSynthesizer};

/// Index of clip name to the text it speaks.
pub const DUBS_FILE_NAME: &str = "dubs.json";
/// Log of which inputs used which clip, and when.
pub const USED_DUBS_FILE_NAME: &str = "used_dubs.json";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub label: String,
    pub when: String,
}

/// Serves clips from `voices_dir/<voice>/speech<hash>.mp3`, synthesizing
/// missing ones through the remote backend when the request allows it.
pub struct CachingSynthesizer {
    voices_dir: PathBuf,
    remote: Option<Box<dyn RemoteSpeech>>,
    probe: Box<dyn AudioProbe>,
}

impl std::fmt::Debug for CachingSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingSynthesizer")
            .field("voices_dir", &self.voices_dir)
            .field("remote", &self.remote.is_some())
            .finish()
    }
}

impl CachingSynthesizer {
    /// Opens the cache, creating the directory, the dub index and its backup when missing.
    pub fn new(
        voices_dir: impl Into<PathBuf>,
        remote: Option<Box<dyn RemoteSpeech>>,
        probe: Box<dyn AudioProbe>,
    ) -> Result<Self> {
        let voices_dir = voices_dir.into();
        fs::create_dir_all(&voices_dir)?;
        let dubs = voices_dir.join(DUBS_FILE_NAME);
        for path in [dubs.clone(), backup_path(&dubs)] {
            if !path.exists() {
                fs::write(&path, "{}")?;
            }
        }
        Ok(Self {
            voices_dir,
            remote,
            probe,
        })
    }

    /// Where the clip for `text` in `voice` lives.
    pub fn clip_path(&self, voice: &str, text: &str) -> PathBuf {
        self.voices_dir
            .join(voice)
            .join(format!("{}.mp3", clip_name(text)))
    }

    fn dubs_path(&self) -> PathBuf {
        self.voices_dir.join(DUBS_FILE_NAME)
    }

    /// Makes sure the dub index maps `name` to `text`.
    fn add_dub_entry(&self, name: &str, text: &str) -> Result<()> {
        let path = self.dubs_path();
        let backup = backup_path(&path);
        let raw = fs::read_to_string(&path)?;
        let mut existing: IndexMap<String, String> =
            serde_json::from_str(&raw).map_err(|source| BakeError::CacheCorruption {
                path: path.clone(),
                backup: backup.clone(),
                source,
            })?;
        if existing.get(name).is_some_and(|t| t == text) {
            return Ok(());
        }
        fs::copy(&path, &backup)?;
        existing.insert(name.to_string(), text.to_string());
        write_pretty_json(&path, &existing, 4)
    }

    /// Appends a usage record for `name` to the usage log.
    fn remember_used(&self, label: &str, name: &str) -> Result<()> {
        let path = self.voices_dir.join(USED_DUBS_FILE_NAME);
        let mut existing: IndexMap<String, Vec<UsageRecord>> = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            IndexMap::new()
        };
        existing
            .entry(name.to_string())
            .or_default()
            .push(UsageRecord {
                label: label.to_string(),
                when: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            });
        write_pretty_json(&path, &existing, 4)
    }

    fn fetch_remote(&self, path: &Path, request: &SpeechRequest) -> Result<()> {
        let remote = self.remote.as_ref().ok_or_else(|| {
            BakeError::SpeechSynthesis("no remote speech backend is configured".to_string())
        })?;
        let audio = remote.fetch(&request.text, &request.voice)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, audio)?;
        log::info!("Saved new narration clip {}", path.display());
        Ok(())
    }
}

/// `speech<hash>`, the cache name of the clip for `text`.
pub fn clip_name(text: &str) -> String {
    format!("speech{}", content_hash(text))
}

impl SpeechSynthesizer for CachingSynthesizer {
    fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechClip> {
        let name = clip_name(&request.text);
        self.remember_used(&request.label, &name)?;
        let path = self.clip_path(&request.voice, &request.text);

        if path.exists() {
            log::debug!("Reusing cached clip {}", path.display());
        } else if !request.allow_remote {
            return Err(BakeError::LocalAssetMissing {
                path,
                voice: request.voice.clone(),
                text: request.text.clone(),
            });
        } else {
            self.fetch_remote(&path, request)?;
        }
        self.add_dub_entry(&name, &request.text)?;

        let length_seconds = self.probe.length_seconds(&path)?;
        Ok(SpeechClip {
            path,
            length_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FixedProbe;

    impl AudioProbe for FixedProbe {
        fn length_seconds(&self, _path: &Path) -> Result<f64> {
            Ok(3.5)
        }
    }

    struct CountingRemote {
        calls: Rc<Cell<usize>>,
    }

    impl RemoteSpeech for CountingRemote {
        fn fetch(&self, _text: &str, _voice: &str) -> Result<Vec<u8>> {
            self.calls.set(self.calls.get() + 1);
            Ok(b"ID3 fake".to_vec())
        }
    }

    fn request(text: &str, allow_remote: bool) -> SpeechRequest {
        SpeechRequest {
            text: text.to_string(),
            voice: "Amy".to_string(),
            allow_remote,
            label: "lesson.md".to_string(),
        }
    }

    #[test]
    fn cache_only_mode_reports_missing_clip() {
        let dir = tempfile::tempdir().unwrap();
        let synth = CachingSynthesizer::new(dir.path(), None, Box::new(FixedProbe)).unwrap();
        let err = synth.synthesize(&request("Hello there", false)).unwrap_err();
        match err {
            BakeError::LocalAssetMissing { path, voice, text } => {
                assert_eq!(voice, "Amy");
                assert_eq!(text, "Hello there");
                assert!(path.ends_with(format!("Amy/{}.mp3", clip_name("Hello there"))));
            }
            other => panic!("unexpected error {other}"),
        }
        let used = fs::read_to_string(dir.path().join(USED_DUBS_FILE_NAME)).unwrap();
        assert!(used.contains("lesson.md"));
    }

    #[test]
    fn cached_clip_is_reused_and_indexed() {
        let dir = tempfile::tempdir().unwrap();
        let synth = CachingSynthesizer::new(dir.path(), None, Box::new(FixedProbe)).unwrap();
        let path = synth.clip_path("Amy", "Cached words");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"mp3").unwrap();

        let clip = synth.synthesize(&request("Cached words", false)).unwrap();
        assert_eq!(clip.path, path);
        assert_eq!(clip.length_seconds, 3.5);

        let dubs: IndexMap<String, String> =
            serde_json::from_str(&fs::read_to_string(dir.path().join(DUBS_FILE_NAME)).unwrap())
                .unwrap();
        assert_eq!(
            dubs.get(&clip_name("Cached words")).map(String::as_str),
            Some("Cached words")
        );
    }

    #[test]
    fn remote_is_called_once_per_text() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Rc::new(Cell::new(0));
        let synth = CachingSynthesizer::new(
            dir.path(),
            Some(Box::new(CountingRemote {
                calls: Rc::clone(&calls),
            })),
            Box::new(FixedProbe),
        )
        .unwrap();
        synth.synthesize(&request("Fresh words", true)).unwrap();
        synth.synthesize(&request("Fresh words", true)).unwrap();
        assert_eq!(calls.get(), 1);
        let used: IndexMap<String, Vec<UsageRecord>> = serde_json::from_str(
            &fs::read_to_string(dir.path().join(USED_DUBS_FILE_NAME)).unwrap(),
        )
        .unwrap();
        assert_eq!(used[&clip_name("Fresh words")].len(), 2);
    }

    #[test]
    fn corrupt_dub_index_names_the_backup() {
        let dir = tempfile::tempdir().unwrap();
        let synth = CachingSynthesizer::new(dir.path(), None, Box::new(FixedProbe)).unwrap();
        let path = synth.clip_path("Amy", "x");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"mp3").unwrap();
        fs::write(dir.path().join(DUBS_FILE_NAME), "{oops").unwrap();
        let err = synth.synthesize(&request("x", false)).unwrap_err();
        assert!(matches!(err, BakeError::CacheCorruption { .. }));
    }
}
