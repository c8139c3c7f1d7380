use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;

/// Speech v2 endpoint used by the Google recognizer.
pub const DEFAULT_RECOGNIZER_ENDPOINT: &str = "http://www.google.com/speech-api/v2/recognize";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TtsConfig {
    /// Platform voice name; `None` keeps the system default
    #[serde(default)]
    pub voice: Option<String>,
    /// Speaking rate in words per minute
    #[serde(default = "default_rate_wpm")]
    pub rate_wpm: u32,
}

fn default_rate_wpm() -> u32 {
    180
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            voice: None,
            rate_wpm: default_rate_wpm(),
        }
    }
}

/// Limits for a single capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenConfig {
    /// How long to wait for speech to start
    pub timeout: Duration,
    /// Upper bound on the length of one phrase
    pub phrase_time_limit: Duration,
    /// Ambient audio sampled before listening to set the energy threshold
    pub calibration: Duration,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            phrase_time_limit: Duration::from_secs(8),
            calibration: Duration::from_millis(600),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecognizerConfig {
    pub endpoint: String,
    /// BCP-47 language tag sent with every request
    pub language: String,
    /// API key appended to the request; some endpoints reject keyless calls
    pub key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_RECOGNIZER_ENDPOINT.to_string(),
            language: "en-US".to_string(),
            key: None,
            timeout_secs: 10,
        }
    }
}

/// Mono 16-bit PCM for one captured phrase.
#[derive(Debug, Clone)]
pub struct CapturedAudio {
    pub samples: Vec<i16>,
    pub sample_rate_hz: u32,
    pub captured_at: OffsetDateTime,
}

impl CapturedAudio {
    pub fn new(samples: Vec<i16>, sample_rate_hz: u32) -> Self {
        Self {
            samples,
            sample_rate_hz,
            captured_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate_hz == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate_hz as f64)
    }
}

/// What the recognizer made of a listen attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    /// Nobody spoke before the timeout
    Timeout,
    /// Audio was captured but could not be transcribed
    Unrecognized,
    /// The recognition service could not be reached
    ServiceUnavailable,
    Text(String),
}
