use crate::{AudioSource, ListenConfig, RecognitionOutcome, Recognizer, Result, Speak};
use std::time::Duration;
use tracing::{debug, error};

pub const UNRECOGNIZED_MESSAGE: &str = "Sorry, I couldn't catch that. Please repeat.";
pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "Speech service seems unavailable. You can type commands for now.";

/// Speech input adapter: one microphone capture plus one recognition per call.
pub struct Listener {
    source: Box<dyn AudioSource>,
    recognizer: Box<dyn Recognizer>,
    calibration: Duration,
}

impl Listener {
    pub fn new(
        source: Box<dyn AudioSource>,
        recognizer: Box<dyn Recognizer>,
        calibration: Duration,
    ) -> Self {
        Self {
            source,
            recognizer,
            calibration,
        }
    }

    /// Capture and recognise one phrase, reporting what happened.
    pub fn listen_outcome(
        &mut self,
        timeout: Duration,
        phrase_time_limit: Duration,
    ) -> Result<RecognitionOutcome> {
        let config = ListenConfig {
            timeout,
            phrase_time_limit,
            calibration: self.calibration,
        };
        let Some(audio) = self.source.capture(&config)? else {
            return Ok(RecognitionOutcome::Timeout);
        };
        debug!(
            samples = audio.samples.len(),
            duration_ms = audio.duration().as_millis() as u64,
            "captured phrase"
        );
        Ok(self.recognizer.recognize(&audio))
    }

    /// Returns lowercase, trimmed text, or an empty string when nothing usable
    /// was heard. Unclear audio and an unreachable service are announced
    /// through `speaker`; a timeout is silent.
    pub fn listen(
        &mut self,
        speaker: &mut dyn Speak,
        timeout: Duration,
        phrase_time_limit: Duration,
    ) -> String {
        match self.listen_outcome(timeout, phrase_time_limit) {
            Ok(RecognitionOutcome::Text(text)) => text.trim().to_lowercase(),
            Ok(RecognitionOutcome::Timeout) => String::new(),
            Ok(RecognitionOutcome::Unrecognized) => {
                speaker.speak(UNRECOGNIZED_MESSAGE);
                String::new()
            }
            Ok(RecognitionOutcome::ServiceUnavailable) => {
                speaker.speak(SERVICE_UNAVAILABLE_MESSAGE);
                String::new()
            }
            Err(e) => {
                error!(error = %e, "listen failed");
                String::new()
            }
        }
    }
}
