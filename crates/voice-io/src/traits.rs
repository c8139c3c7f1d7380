use crate::{CapturedAudio, ListenConfig, RecognitionOutcome, Result, TtsConfig};

pub trait SpeechEngine: Send {
    fn new(config: TtsConfig) -> Self
    where
        Self: Sized;

    /// Render `text` audibly, blocking until playback ends.
    fn say(&mut self, text: &str) -> Result<()>;
}

pub trait AudioSource: Send {
    /// Capture one phrase. `Ok(None)` means no speech started before
    /// `config.timeout`. The device is held only for the duration of the call.
    fn capture(&mut self, config: &ListenConfig) -> Result<Option<CapturedAudio>>;
}

pub trait Recognizer: Send {
    fn recognize(&mut self, audio: &CapturedAudio) -> RecognitionOutcome;
}

/// Best-effort spoken output. Implementations never fail to the caller.
pub trait Speak {
    fn speak(&mut self, text: &str);
}
