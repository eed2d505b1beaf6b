use serde::{Deserialize, Serialize};

/// A visual effect played when moving to a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitionEffect {
    Morph,
    Fade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitionSpeed {
    Slow,
    Medium,
    Fast,
}

/// The transition into a slide and the automatic advance timing out of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideTransition {
    /// The preferred effect.
    pub effect: TransitionEffect,
    /// Effect used by viewers that cannot play `effect`.
    pub fallback: Option<TransitionEffect>,
    pub speed: TransitionSpeed,
    /// Length of the effect in milliseconds.
    pub duration_ms: u32,
    /// Advance to the next slide after this many milliseconds.
    pub advance_after_ms: Option<u64>,
}

impl SlideTransition {
    /// Fast morph (fade fallback, 1000 ms) that advances after `seconds`.
    pub fn narrated(seconds: u32) -> Self {
        Self {
            effect: TransitionEffect::Morph,
            fallback: Some(TransitionEffect::Fade),
            speed: TransitionSpeed::Fast,
            duration_ms: 1000,
            advance_after_ms: Some(u64::from(seconds) * 1000),
        }
    }
}
