//! Command routing for the voice assistant
//!
//! Turns one normalised utterance into one action. Matching is plain
//! substring and prefix containment, evaluated against an ordered route
//! table where the first match wins:
//!
//! ```text
//! exit > time > open youtube > open google > play > lookup > joke > web search
//! ```
//!
//! Side effects go through the [`Speak`](voice_io::Speak) adapter and the
//! provider traits in [`providers`], so the router itself keeps no state
//! between commands.

mod error;
mod intent;
pub mod providers;
mod router;
mod routes;
mod utterance;

#[cfg(feature = "mock")]
pub mod mock;

pub use error::{ActionError, Result};
pub use intent::{lookup_query, play_query, Intent, Site};
pub use providers::{Browser, Clock, Encyclopedia, JokeSource, LookupOutcome, Providers, VideoPlayer};
pub use router::{format_time, CommandRouter, Flow};
pub use routes::{classify, Route, ROUTES};
pub use utterance::{normalize, strip_wake_word, DEFAULT_WAKE_WORDS};

use serde::{Deserialize, Serialize};

/// Static options for the router, fixed at startup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RouterConfig {
    /// Prefixes stripped from an utterance before matching, tried in order
    pub wake_words: Vec<String>,
    /// Name used in the farewell; omitted when `None`
    pub user_name: Option<String>,
    /// Sentence count requested from the encyclopedia
    pub summary_sentences: u8,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            wake_words: DEFAULT_WAKE_WORDS.iter().map(|w| w.to_string()).collect(),
            user_name: None,
            summary_sentences: 2,
        }
    }
}
