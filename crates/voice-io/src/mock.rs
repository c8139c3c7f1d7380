use crate::{
    AudioSource, CapturedAudio, ListenConfig, RecognitionOutcome, Recognizer, Result, Speak,
    SpeechEngine, TtsConfig, VoiceError,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Records every line it is asked to say.
pub struct MockTts {
    _cfg: TtsConfig,
    spoken: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockTts {
    /// An engine whose every `say` fails.
    pub fn failing() -> Self {
        Self {
            _cfg: TtsConfig::default(),
            spoken: Arc::default(),
            fail: true,
        }
    }

    /// Shared handle to the recorded lines; stays valid after boxing.
    pub fn spoken(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.spoken)
    }
}

impl SpeechEngine for MockTts {
    fn new(config: TtsConfig) -> Self
    where
        Self: Sized,
    {
        Self {
            _cfg: config,
            spoken: Arc::default(),
            fail: false,
        }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        if self.fail {
            return Err(VoiceError::Synthesis("mock engine set to fail".into()));
        }
        if let Ok(mut spoken) = self.spoken.lock() {
            spoken.push(text.to_string());
        }
        Ok(())
    }
}

/// In-memory speaker for driving the router and loop in tests.
#[derive(Debug, Default)]
pub struct RecordingSpeaker {
    pub lines: Vec<String>,
}

impl Speak for RecordingSpeaker {
    fn speak(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

/// Plays back queued capture results, then reports silence.
#[derive(Default)]
pub struct ScriptedSource {
    steps: VecDeque<Result<Option<CapturedAudio>>>,
    calls: usize,
}

impl ScriptedSource {
    pub fn push_audio(mut self, samples: Vec<i16>) -> Self {
        self.steps
            .push_back(Ok(Some(CapturedAudio::new(samples, 16_000))));
        self
    }

    pub fn push_silence(mut self) -> Self {
        self.steps.push_back(Ok(None));
        self
    }

    pub fn push_error(mut self, message: &str) -> Self {
        self.steps
            .push_back(Err(VoiceError::Stream(message.to_string())));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl AudioSource for ScriptedSource {
    fn capture(&mut self, _config: &ListenConfig) -> Result<Option<CapturedAudio>> {
        self.calls += 1;
        self.steps.pop_front().unwrap_or(Ok(None))
    }
}

/// Returns queued outcomes in order; `Unrecognized` once exhausted.
#[derive(Default)]
pub struct ScriptedRecognizer {
    outcomes: VecDeque<RecognitionOutcome>,
}

impl ScriptedRecognizer {
    pub fn new(outcomes: impl IntoIterator<Item = RecognitionOutcome>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
        }
    }
}

impl Recognizer for ScriptedRecognizer {
    fn recognize(&mut self, _audio: &CapturedAudio) -> RecognitionOutcome {
        self.outcomes
            .pop_front()
            .unwrap_or(RecognitionOutcome::Unrecognized)
    }
}
