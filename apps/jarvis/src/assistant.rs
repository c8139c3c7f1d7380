//! Main loop: greet, then acquire and route utterances until told to stop.

use anyhow::Result;
use command_router::{CommandRouter, Flow};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};
use voice_io::Speak;

pub const RECOVERY_MESSAGE: &str = "Something went wrong. Let's keep going.";
pub const INTERRUPTED_MESSAGE: &str = "Interrupted. See you soon!";
pub const CLOSED_MESSAGE: &str = "Input closed. See you soon!";

/// One acquisition attempt from an input source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Raw text; empty when nothing was heard
    Utterance(String),
    Interrupted,
    /// The source has no more input
    Closed,
}

pub trait UtteranceSource: Send {
    fn next(&mut self, speaker: &mut dyn Speak) -> Result<Input>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Exit,
    Interrupted,
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Non-empty utterances passed to the router
    pub commands: usize,
    /// Iteration errors that were logged and spoken over
    pub errors: usize,
    pub ended_by: SessionEnd,
}

/// Time-of-day greeting for a local hour in `0..24`.
pub fn greeting(hour: u8, user: Option<&str>) -> String {
    let part = match hour {
        5..=11 => "morning",
        12..=17 => "afternoon",
        _ => "evening",
    };
    match user.map(str::trim).filter(|u| !u.is_empty()) {
        Some(user) => format!("Good {part}, {user}."),
        None => format!("Good {part}."),
    }
}

pub fn online_message(name: &str) -> String {
    format!("{name} online. Say a command, or say 'exit' to quit.")
}

pub struct Assistant<S: Speak> {
    name: String,
    speaker: S,
    router: CommandRouter,
    interrupt: Arc<AtomicBool>,
}

impl<S: Speak> Assistant<S> {
    pub fn new(
        name: impl Into<String>,
        speaker: S,
        router: CommandRouter,
        interrupt: Arc<AtomicBool>,
    ) -> Self {
        Self {
            name: name.into(),
            speaker,
            router,
            interrupt,
        }
    }

    pub fn speaker(&self) -> &S {
        &self.speaker
    }

    pub fn greet(&mut self) {
        let hour = self.router.now().hour();
        let user = self.router.config().user_name.clone();
        self.speaker.speak(&greeting(hour, user.as_deref()));
        self.speaker.speak(&online_message(&self.name));
    }

    /// Greet, then loop until an exit command, an interrupt or the end of
    /// input. Errors inside an iteration never end the session.
    pub fn run(&mut self, input: &mut dyn UtteranceSource) -> SessionSummary {
        self.greet();
        let mut commands = 0;
        let mut errors = 0;
        let ended_by = loop {
            if self.interrupt.load(Ordering::SeqCst) {
                break SessionEnd::Interrupted;
            }
            match self.step(input, &mut commands) {
                Ok(Some(end)) => break end,
                Ok(None) => {}
                Err(e) => {
                    errors += 1;
                    error!(error = %e, "command failed");
                    self.speaker.speak(RECOVERY_MESSAGE);
                }
            }
        };
        match ended_by {
            SessionEnd::Interrupted => self.speaker.speak(INTERRUPTED_MESSAGE),
            SessionEnd::InputClosed => self.speaker.speak(CLOSED_MESSAGE),
            SessionEnd::Exit => {}
        }
        let summary = SessionSummary {
            commands,
            errors,
            ended_by,
        };
        info!(?summary, "session ended");
        summary
    }

    fn step(&mut self, input: &mut dyn UtteranceSource, commands: &mut usize) -> Result<Option<SessionEnd>> {
        let text = match input.next(&mut self.speaker)? {
            Input::Utterance(text) => text,
            Input::Interrupted => return Ok(Some(SessionEnd::Interrupted)),
            Input::Closed => return Ok(Some(SessionEnd::InputClosed)),
        };
        if text.trim().is_empty() {
            debug!("no input");
            return Ok(None);
        }
        *commands += 1;
        match self.router.route(&mut self.speaker, &text)? {
            Flow::Continue => Ok(None),
            Flow::Exit => Ok(Some(SessionEnd::Exit)),
        }
    }
}
