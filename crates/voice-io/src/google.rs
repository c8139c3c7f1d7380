//! Google speech v2 recognizer over blocking HTTP.
//!
//! Audio is posted as raw big-endian 16-bit PCM (`audio/l16`). The reply is
//! newline-delimited JSON; the first object is usually an empty `result`
//! array and the transcript follows in a later line.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    result: Vec<ResultEntry>,
}

#[derive(Debug, Deserialize)]
struct ResultEntry {
    #[serde(default)]
    alternative: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
}

/// First non-empty transcript in a recognizer reply.
pub fn parse_transcript(body: &str) -> Option<String> {
    body.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str::<Reply>(line).ok())
        .flat_map(|reply| reply.result)
        .flat_map(|entry| entry.alternative)
        .map(|alt| alt.transcript.trim().to_string())
        .find(|text| !text.is_empty())
}

/// Big-endian PCM body expected by `audio/l16`.
pub fn l16_body(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_be_bytes()).collect()
}

#[cfg(feature = "google-stt")]
pub use client::GoogleRecognizer;

#[cfg(feature = "google-stt")]
mod client {
    use super::{l16_body, parse_transcript};
    use crate::{CapturedAudio, RecognitionOutcome, Recognizer, RecognizerConfig, Result, VoiceError};
    use reqwest::blocking::Client;
    use reqwest::header::CONTENT_TYPE;
    use std::time::Duration;
    use tracing::{debug, warn};

    pub struct GoogleRecognizer {
        client: Client,
        config: RecognizerConfig,
    }

    impl GoogleRecognizer {
        pub fn new(config: RecognizerConfig) -> Result<Self> {
            let client = Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs.max(1)))
                .build()
                .map_err(|e| VoiceError::Recognizer(format!("http client: {e}")))?;
            Ok(Self { client, config })
        }

        fn request(&self, audio: &CapturedAudio) -> std::result::Result<String, reqwest::Error> {
            let mut query = vec![
                ("client", "chromium".to_string()),
                ("lang", self.config.language.clone()),
                ("pFilter", "0".to_string()),
            ];
            if let Some(key) = &self.config.key {
                query.push(("key", key.clone()));
            }

            let resp = self
                .client
                .post(&self.config.endpoint)
                .query(&query)
                .header(
                    CONTENT_TYPE,
                    format!("audio/l16; rate={}", audio.sample_rate_hz),
                )
                .body(l16_body(&audio.samples))
                .send()?
                .error_for_status()?;
            resp.text()
        }
    }

    impl Recognizer for GoogleRecognizer {
        fn recognize(&mut self, audio: &CapturedAudio) -> RecognitionOutcome {
            match self.request(audio) {
                Ok(body) => {
                    debug!(bytes = body.len(), "recognizer reply");
                    parse_transcript(&body)
                        .map(RecognitionOutcome::Text)
                        .unwrap_or(RecognitionOutcome::Unrecognized)
                }
                Err(e) => {
                    warn!(error = %e, "recognition request failed");
                    RecognitionOutcome::ServiceUnavailable
                }
            }
        }
    }
}
