//! Utterance sources for the main loop

use crate::assistant::{Input, UtteranceSource};
use anyhow::Result;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::warn;
use voice_io::{Listener, Speak};

const POLL: Duration = Duration::from_millis(100);

/// Console lines, read on a background thread so an interrupt is noticed
/// while waiting for the user to type.
pub struct TypedInput {
    lines: Receiver<io::Result<String>>,
    interrupt: Arc<AtomicBool>,
    prompt: bool,
}

impl TypedInput {
    pub fn stdin(interrupt: Arc<AtomicBool>) -> Self {
        Self::from_reader(BufReader::new(io::stdin()), interrupt).with_prompt(true)
    }

    pub fn from_reader<R>(reader: R, interrupt: Arc<AtomicBool>) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("typed-input".into())
            .spawn(move || {
                for line in reader.lines() {
                    let failed = line.is_err();
                    if tx.send(line).is_err() || failed {
                        break;
                    }
                }
            });
        // A dropped sender reads as closed input
        if let Err(e) = spawned {
            warn!(error = %e, "could not start input reader");
        }
        Self {
            lines: rx,
            interrupt,
            prompt: false,
        }
    }

    /// Print `You: ` before waiting for each line.
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }
}

impl UtteranceSource for TypedInput {
    fn next(&mut self, _speaker: &mut dyn Speak) -> Result<Input> {
        if self.prompt {
            print!("You: ");
            io::stdout().flush()?;
        }
        loop {
            if self.interrupt.load(Ordering::SeqCst) {
                return Ok(Input::Interrupted);
            }
            match self.lines.recv_timeout(POLL) {
                Ok(line) => return Ok(Input::Utterance(line?)),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Ok(Input::Closed),
            }
        }
    }
}

/// Microphone capture and recognition through a [`Listener`].
pub struct VoiceInput {
    listener: Listener,
    timeout: Duration,
    phrase_limit: Duration,
    interrupt: Arc<AtomicBool>,
}

impl VoiceInput {
    pub fn new(
        listener: Listener,
        timeout: Duration,
        phrase_limit: Duration,
        interrupt: Arc<AtomicBool>,
    ) -> Self {
        Self {
            listener,
            timeout,
            phrase_limit,
            interrupt,
        }
    }
}

impl UtteranceSource for VoiceInput {
    fn next(&mut self, speaker: &mut dyn Speak) -> Result<Input> {
        if self.interrupt.load(Ordering::SeqCst) {
            return Ok(Input::Interrupted);
        }
        let text = self.listener.listen(speaker, self.timeout, self.phrase_limit);
        // capture returns early on interrupt
        if self.interrupt.load(Ordering::SeqCst) {
            return Ok(Input::Interrupted);
        }
        if !text.is_empty() {
            println!("You said: {text}");
        }
        Ok(Input::Utterance(text))
    }
}
