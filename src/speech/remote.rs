use indexmap::IndexMap;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::env;

use crate::errors::{BakeError, Result};

/// Speech endpoint used when `TTS_ENDPOINT` is not set.
pub const DEFAULT_TTS_ENDPOINT: &str = "https://api.openai.com/v1/audio/speech";
const DEFAULT_TTS_MODEL: &str = "tts-1";
/// Provider voices standing in for the deck voices.
const DEFAULT_VOICE_MAP: [(&str, &str); 2] = [("Amy", "nova"), ("Bart", "onyx")];

/// Fetches synthesized audio for a text.
pub trait RemoteSpeech {
    /// Returns mp3 bytes of `text` spoken by `voice`.
    fn fetch(&self, text: &str, voice: &str) -> Result<Vec<u8>>;
}

/// Blocking client for an OpenAI-compatible `audio/speech` endpoint.
#[derive(Debug, Clone)]
pub struct HttpSpeechClient {
    endpoint: String,
    api_key: String,
    model: String,
    voices: IndexMap<String, String>,
    client: Client,
}

#[derive(Serialize, Debug, PartialEq)]
struct SpeechBody<'a> {
    model: &'a str,
    input: &'a str,
    voice: String,
    response_format: &'static str,
}

/// Helper struct to attempt parsing standard error responses.
#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ApiErrorDetail {
    message: String,
}

impl HttpSpeechClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_TTS_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_TTS_MODEL.to_string(),
            voices: DEFAULT_VOICE_MAP
                .iter()
                .map(|(deck, provider)| (deck.to_string(), provider.to_string()))
                .collect(),
            client: Client::new(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Speaks deck voice `voice` with the provider's `provider_voice`.
    pub fn with_voice(mut self, voice: impl Into<String>, provider_voice: impl Into<String>) -> Self {
        self.voices.insert(voice.into(), provider_voice.into());
        self
    }

    /// Provider voice id for a deck voice. Unmapped voices pass through lowercased.
    fn provider_voice(&self, voice: &str) -> String {
        self.voices
            .get(voice)
            .cloned()
            .unwrap_or_else(|| voice.to_lowercase())
    }

    fn speech_body<'a>(&'a self, text: &'a str, voice: &str) -> SpeechBody<'a> {
        SpeechBody {
            model: &self.model,
            input: text,
            voice: self.provider_voice(voice),
            response_format: "mp3",
        }
    }

    /// Builds a client from `TTS_API_KEY` and optional `TTS_ENDPOINT`.
    /// `TTS_VOICE_AMY` and `TTS_VOICE_BART` override the provider voices.
    /// Ensure `dotenvy::dotenv().ok();` has been called beforehand.
    pub fn from_env() -> Option<Self> {
        let api_key = non_empty_var("TTS_API_KEY")?;
        let mut client = Self::new(api_key);
        if let Some(endpoint) = non_empty_var("TTS_ENDPOINT") {
            client = client.with_endpoint(endpoint);
        }
        for (voice, _) in DEFAULT_VOICE_MAP {
            if let Some(provider) = non_empty_var(&format!("TTS_VOICE_{}", voice.to_uppercase())) {
                client = client.with_voice(voice, provider);
            }
        }
        Some(client)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

impl RemoteSpeech for HttpSpeechClient {
    fn fetch(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        let body = self.speech_body(text, voice);
        log::info!(
            "Synthesizing {} characters with voice {voice} ({}) via {}",
            text.len(),
            body.voice,
            self.endpoint
        );
        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(ACCEPT, "audio/mpeg")
            .json(&body)
            .send()?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.bytes()?.to_vec());
        }
        let raw = response.text().unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorResponse>(&raw) {
            Ok(parsed) => parsed.error.message,
            Err(_) => raw,
        };
        Err(BakeError::SpeechSynthesis(format!(
            "Status {status}, Message: {message}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_voices_map_to_provider_voices() {
        let client = HttpSpeechClient::new("key");
        let body = serde_json::to_value(client.speech_body("Hello", "Amy")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "tts-1",
                "input": "Hello",
                "voice": "nova",
                "response_format": "mp3"
            })
        );
        assert_eq!(client.speech_body("Hello", "Bart").voice, "onyx");
    }

    #[test]
    fn voice_overrides_and_passthrough() {
        let client = HttpSpeechClient::new("key").with_voice("Amy", "shimmer");
        assert_eq!(client.speech_body("Hi", "Amy").voice, "shimmer");
        assert_eq!(client.speech_body("Hi", "Alloy").voice, "alloy");
    }
}
