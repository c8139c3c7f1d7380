use crate::{Speak, SpeechEngine};
use tracing::warn;

/// Speech output adapter: echoes each line to the console as
/// `"<name>: <text>"`, then renders it through the configured engine.
pub struct Speaker {
    name: String,
    engine: Box<dyn SpeechEngine>,
}

impl Speaker {
    pub fn new(name: impl Into<String>, engine: Box<dyn SpeechEngine>) -> Self {
        Self {
            name: name.into(),
            engine,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Console form of a spoken line.
    pub fn transcript_line(&self, text: &str) -> String {
        format!("{}: {}", self.name, text)
    }
}

impl Speak for Speaker {
    fn speak(&mut self, text: &str) {
        println!("{}", self.transcript_line(text));
        if text.trim().is_empty() {
            return;
        }
        if let Err(e) = self.engine.say(text) {
            warn!(error = %e, "speech synthesis failed");
        }
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::{MockTts, TtsConfig};

    #[test]
    fn speak_forwards_text_to_engine() {
        let tts = MockTts::new(TtsConfig::default());
        let spoken = tts.spoken();
        let mut speaker = Speaker::new("Jarvis", Box::new(tts));

        speaker.speak("Opening Google.");

        assert_eq!(speaker.name(), "Jarvis");
        assert_eq!(
            speaker.transcript_line("Opening Google."),
            "Jarvis: Opening Google."
        );
        assert_eq!(spoken.lock().unwrap().as_slice(), ["Opening Google."]);
    }

    #[test]
    fn synthesis_failure_is_swallowed() {
        let tts = MockTts::failing();
        let spoken = tts.spoken();
        let mut speaker = Speaker::new("Jarvis", Box::new(tts));

        speaker.speak("still fine");

        assert!(spoken.lock().unwrap().is_empty());
    }

    #[test]
    fn blank_text_is_not_synthesised() {
        let tts = MockTts::new(TtsConfig::default());
        let spoken = tts.spoken();
        let mut speaker = Speaker::new("Jarvis", Box::new(tts));

        speaker.speak("   ");

        assert!(spoken.lock().unwrap().is_empty());
    }
}
