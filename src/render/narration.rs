//! Collects narration text between slide boundaries and voices it.

use crate::config::RenderConfig;
use crate::errors::Result;
use crate::render::slide_builder::SlideBuilder;
use crate::speech::{SpeechRequest, SpeechSynthesizer};

/// Pending narration plus the transcript and slide durations produced so far.
/// `transcript` and `durations` always have the same length.
#[derive(Debug, Default)]
pub struct NarrationRecorder {
    pending: Vec<String>,
    transcript: Vec<String>,
    durations: Vec<u32>,
}

impl NarrationRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `text` for the next finalize.
    pub fn queue(&mut self, text: impl Into<String>) {
        self.pending.push(text.into());
    }

    /// Voices the pending notes onto the current slide. Does nothing when no
    /// note is pending or when every pending note is empty.
    pub fn finalize(
        &mut self,
        slides: &mut SlideBuilder,
        synthesizer: &dyn SpeechSynthesizer,
        config: &RenderConfig,
    ) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let notes = self
            .pending
            .iter()
            .filter(|n| !n.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        self.pending.clear();
        if notes.is_empty() {
            return Ok(());
        }

        let clip = synthesizer.synthesize(&SpeechRequest {
            text: notes.clone(),
            voice: config.voice.clone(),
            allow_remote: config.narrate,
            label: config.input_label.clone(),
        })?;
        let seconds = slides.add_narration_overlay(&clip.path, clip.length_seconds);
        log::debug!("Narrated {} characters for {seconds}s", notes.len());
        self.durations.push(seconds);
        self.transcript.push(notes);
        Ok(())
    }

    /// Consumes the recorder, returning `(transcript, durations)`.
    pub fn into_parts(self) -> (Vec<String>, Vec<u32>) {
        (self.transcript, self.durations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::layout::LayoutKind;
    use crate::speech::testing::FakeSynthesizer;

    #[test]
    fn finalize_joins_non_empty_notes() {
        let synth = FakeSynthesizer::default();
        let config = RenderConfig::default();
        let mut slides = SlideBuilder::new("deck");
        slides.add_slide(LayoutKind::Title);
        let mut narration = NarrationRecorder::new();
        narration.queue("Intro");
        narration.queue("");
        narration.queue("More");
        narration.finalize(&mut slides, &synth, &config).unwrap();
        narration.finalize(&mut slides, &synth, &config).unwrap();

        assert_eq!(synth.texts(), ["Intro\nMore".to_string()]);
        let (transcript, durations) = narration.into_parts();
        assert_eq!(transcript, ["Intro\nMore".to_string()]);
        assert_eq!(durations, [10]);
    }

    #[test]
    fn empty_queue_is_a_no_op() {
        let synth = FakeSynthesizer::default();
        let mut slides = SlideBuilder::new("deck");
        let mut narration = NarrationRecorder::new();
        narration
            .finalize(&mut slides, &synth, &RenderConfig::default())
            .unwrap();
        narration.queue("");
        narration
            .finalize(&mut slides, &synth, &RenderConfig::default())
            .unwrap();
        assert!(synth.texts().is_empty());
        assert!(!slides.has_slide());
        let (transcript, durations) = narration.into_parts();
        assert!(transcript.is_empty());
        assert!(durations.is_empty());
    }
}
