//! Seams for the external collaborators the router acts through

use crate::Result;
use time::OffsetDateTime;

/// Opens URLs in the user's default browser
pub trait Browser: Send {
    fn open(&self, url: &str) -> Result<()>;
}

/// Finds a video for a free-text query and starts playing it
pub trait VideoPlayer: Send {
    fn play(&self, query: &str) -> Result<()>;
}

/// Result of an encyclopedia summary request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Summary(String),
    /// The term maps to several pages; carries candidate titles
    Disambiguation(Vec<String>),
    NotFound,
    /// Transport or service failure
    Failed(String),
}

pub trait Encyclopedia: Send {
    fn summary(&self, query: &str, sentences: u8) -> LookupOutcome;
}

pub trait JokeSource: Send {
    fn joke(&self) -> Result<String>;
}

/// Local wall-clock time
pub trait Clock: Send {
    fn now(&self) -> OffsetDateTime;
}

/// Everything the router can act through, owned for the process lifetime
pub struct Providers {
    pub browser: Box<dyn Browser>,
    pub video: Box<dyn VideoPlayer>,
    pub encyclopedia: Box<dyn Encyclopedia>,
    pub jokes: Box<dyn JokeSource>,
    pub clock: Box<dyn Clock>,
}
