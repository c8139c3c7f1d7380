//! voice-io: speech output and speech input adapters with pluggable engines
//!
//! The adapters at the top of this crate are what the assistant talks to:
//! [`Speaker`] renders text audibly and [`Listener`] turns one captured phrase
//! into lowercase text. Beneath them sit three engine seams, each with
//! feature-gated backends:
//!
//! - [`SpeechEngine`]: text-to-speech (`SystemTts`, `MockTts`)
//! - [`AudioSource`]: phrase capture (`mic::MicSource` with `audio`, `ScriptedSource`)
//! - [`Recognizer`]: speech-to-text (`GoogleRecognizer` with `google-stt`, `ScriptedRecognizer`)

mod error;
pub use error::{Result, VoiceError};

mod types;
pub use types::{
    CapturedAudio, ListenConfig, RecognitionOutcome, RecognizerConfig, TtsConfig,
    DEFAULT_RECOGNIZER_ENDPOINT,
};

mod traits;
pub use traits::{AudioSource, Recognizer, Speak, SpeechEngine};

pub mod level;

mod speaker;
pub use speaker::Speaker;

mod listener;
pub use listener::{Listener, SERVICE_UNAVAILABLE_MESSAGE, UNRECOGNIZED_MESSAGE};

mod tts;
pub use tts::SystemTts;

pub mod google;
#[cfg(feature = "google-stt")]
pub use google::GoogleRecognizer;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::{MockTts, RecordingSpeaker, ScriptedRecognizer, ScriptedSource};

#[cfg(feature = "audio")]
pub mod mic;

pub mod plugin;
