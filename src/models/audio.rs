use serde::{Deserialize, Serialize};

/// The properties of an Audio element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioProperties {
    /// Whether playback starts when the slide is displayed in present mode.
    pub auto_play: Option<bool>,
    /// Delay before playback starts, in milliseconds.
    pub start_delay_ms: Option<u32>,
    /// Duration of the clip in seconds, as reported by the prober.
    pub length_seconds: Option<f64>,
}

/// A PageElement kind representing a narration clip. It is placed at the
/// page origin with zero size so it never shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audio {
    /// Path to the audio file.
    pub source_url: String,
    /// The properties of the clip.
    pub audio_properties: Option<AudioProperties>,
}
