use thiserror::Error;

pub type Result<T, E = VoiceError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("no default input device")]
    NoInputDevice,
    #[error("audio stream error: {0}")]
    Stream(String),
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
    #[error("recognizer error: {0}")]
    Recognizer(String),
    #[error("backend not available in this build: {0}")]
    Unsupported(&'static str),
}
