//! Narration audio: the synthesizer seam, the on-disk voice cache, the remote
//! text-to-speech client and the audio length probe.

use std::path::PathBuf;

use crate::errors::Result;

pub mod cache;
pub mod probe;
pub mod remote;

pub use cache::CachingSynthesizer;
pub use probe::{AudioProbe, FfprobeAudioProbe};
pub use remote::{HttpSpeechClient, RemoteSpeech};

/// One narration span to voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: String,
    /// Whether a clip missing from the cache may be synthesized remotely.
    pub allow_remote: bool,
    /// Free-form label recorded in the usage log, usually the input path.
    pub label: String,
}

/// A voiced clip on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechClip {
    pub path: PathBuf,
    pub length_seconds: f64,
}

/// Turns text into an audio file and reports its length.
pub trait SpeechSynthesizer {
    fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechClip>;
}
