//! Content hashing and the index of inputs whose video was already produced.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use sha1::{Digest, Sha1};

use crate::errors::Result;

/// File name of the index, relative to the working directory.
pub const HASH_FILE_NAME: &str = "finished_video_hashes.json";

const HASH_MODULUS: u128 = 1_000_000_000_000;

/// Short decimal fingerprint of `text`: its SHA-1 digest read as a
/// big-endian integer, reduced modulo 10^12. Clip names and the build index
/// are keyed by it, so it must not change.
pub fn content_hash(text: &str) -> u64 {
    let digest = Sha1::digest(text.as_bytes());
    let folded = digest
        .iter()
        .fold(0u128, |acc, byte| (acc * 256 + u128::from(*byte)) % HASH_MODULUS);
    folded as u64
}

/// `<dir>/<stem>_backup.<ext>` next to `path`.
pub(crate) fn backup_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_backup.{}", ext.to_string_lossy()),
        None => format!("{stem}_backup"),
    };
    path.with_file_name(name)
}

/// Writes `value` as JSON indented by `indent` spaces.
pub(crate) fn write_pretty_json<T: Serialize>(path: &Path, value: &T, indent: usize) -> Result<()> {
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    fs::write(path, out)?;
    Ok(())
}

/// Maps input hashes to the video produced from them.
#[derive(Debug)]
pub struct BuildCache {
    path: PathBuf,
    entries: IndexMap<String, String>,
}

impl BuildCache {
    /// Loads the index, creating it as `{}` when it does not exist yet.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            log::debug!("Creating empty build index at {}", path.display());
            fs::write(&path, "{}")?;
        }
        let raw = fs::read_to_string(&path)?;
        let entries = serde_json::from_str(&raw)?;
        Ok(Self { path, entries })
    }

    /// Output recorded for `text`, if any.
    pub fn lookup(&self, text: &str) -> Option<&str> {
        self.entries
            .get(&content_hash(text).to_string())
            .map(String::as_str)
    }

    /// Records that `text` produced `output`. The previous index is kept as a backup.
    pub fn record(&mut self, text: &str, output: &Path) -> Result<()> {
        fs::copy(&self.path, backup_path(&self.path))?;
        self.entries.insert(
            content_hash(text).to_string(),
            output.to_string_lossy().into_owned(),
        );
        write_pretty_json(&self.path, &self.entries, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_and_bounded() {
        let first = content_hash("Hello, slides!");
        assert_eq!(first, content_hash("Hello, slides!"));
        assert_ne!(first, content_hash("Hello, slides?"));
        assert!(first < 1_000_000_000_000);
        assert!(content_hash("") < 1_000_000_000_000);
    }

    #[test]
    fn hash_matches_existing_clip_names() {
        assert_eq!(content_hash("Hello there"), 148_495_191_246);
        assert_eq!(content_hash(""), 403_882_391_305);
        assert_eq!(content_hash("# Lesson"), 358_566_592_315);
    }

    #[test]
    fn backup_sits_next_to_the_index() {
        assert_eq!(
            backup_path(Path::new("voices/dubs.json")),
            PathBuf::from("voices/dubs_backup.json")
        );
    }

    #[test]
    fn records_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HASH_FILE_NAME);
        let mut cache = BuildCache::load(&path).unwrap();
        assert_eq!(cache.lookup("# Lesson"), None);

        cache.record("# Lesson", Path::new("build/lesson-Amy.wmv")).unwrap();
        let reloaded = BuildCache::load(&path).unwrap();
        assert_eq!(reloaded.lookup("# Lesson"), Some("build/lesson-Amy.wmv"));
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"358566592315\": \"build/lesson-Amy.wmv\""));
        assert!(backup_path(&path).exists());
    }

    #[test]
    fn corrupt_index_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HASH_FILE_NAME);
        fs::write(&path, "{not json").unwrap();
        assert!(BuildCache::load(&path).is_err());
    }
}
