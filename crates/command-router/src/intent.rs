//! Intent definitions and query extraction

use serde::{Deserialize, Serialize};

/// Websites that can be opened by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Site {
    YouTube,
    Google,
}

impl Site {
    pub fn url(self) -> &'static str {
        match self {
            Site::YouTube => "https://www.youtube.com",
            Site::Google => "https://www.google.com",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Site::YouTube => "YouTube",
            Site::Google => "Google",
        }
    }
}

/// The action category selected for an utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Shut the assistant down
    Exit,
    /// Speak the current local time
    Time,
    /// Open a known website in the browser
    OpenSite(Site),
    /// Play a video; `None` when nothing followed "play"
    Play(Option<String>),
    /// Encyclopedia summary; `None` when the query was only trigger words
    Lookup(Option<String>),
    Joke,
    /// Fallback: search the web for the full utterance
    WebSearch(String),
}

impl Intent {
    /// Stable short name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Exit => "exit",
            Intent::Time => "time",
            Intent::OpenSite(_) => "open_site",
            Intent::Play(_) => "play",
            Intent::Lookup(_) => "lookup",
            Intent::Joke => "joke",
            Intent::WebSearch(_) => "web_search",
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Video query from a `play ...` command.
///
/// Drops the leading `"play"` and every `"on youtube"`, then trims.
pub fn play_query(command: &str) -> Option<String> {
    let rest = command.strip_prefix("play").unwrap_or(command);
    non_empty(&rest.replace("on youtube", ""))
}

/// Encyclopedia query from a lookup command.
///
/// Removes every occurrence of `"wikipedia"`, `"who is"` and `"what is"`,
/// then trims.
pub fn lookup_query(command: &str) -> Option<String> {
    let query = command
        .replace("wikipedia", "")
        .replace("who is", "")
        .replace("what is", "");
    non_empty(&query)
}
