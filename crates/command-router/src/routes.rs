//! Ordered route table

use crate::intent::{lookup_query, play_query, Intent, Site};

/// One entry of the route table: a predicate over the wake-word-stripped
/// command and the intent it selects.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub intent: fn(&str) -> Intent,
}

const EXIT_WORDS: &[&str] = &["exit", "quit", "sleep", "stop"];

/// Evaluated top to bottom; the first match wins. Exit sits first, so any
/// command mentioning an exit word shuts down even when another route would
/// also match ("play stop and go" exits).
pub static ROUTES: &[Route] = &[
    Route {
        name: "exit",
        matches: mentions_exit,
        intent: exit,
    },
    Route {
        name: "time",
        matches: asks_time,
        intent: time,
    },
    Route {
        name: "open_youtube",
        matches: opens_youtube,
        intent: open_youtube,
    },
    Route {
        name: "open_google",
        matches: opens_google,
        intent: open_google,
    },
    Route {
        name: "play",
        matches: starts_play,
        intent: play,
    },
    Route {
        name: "lookup",
        matches: asks_lookup,
        intent: lookup,
    },
    Route {
        name: "joke",
        matches: asks_joke,
        intent: joke,
    },
];

/// Intent for a wake-word-stripped command, or `None` when only the web
/// search fallback applies.
pub fn classify(command: &str) -> Option<(&'static Route, Intent)> {
    ROUTES
        .iter()
        .find(|route| (route.matches)(command))
        .map(|route| (route, (route.intent)(command)))
}

fn mentions_exit(command: &str) -> bool {
    EXIT_WORDS.iter().any(|word| command.contains(word))
}

fn asks_time(command: &str) -> bool {
    command.contains("time")
}

fn opens_youtube(command: &str) -> bool {
    command.contains("open youtube")
}

fn opens_google(command: &str) -> bool {
    command.contains("open google")
}

fn starts_play(command: &str) -> bool {
    command == "play" || command.starts_with("play ")
}

fn asks_lookup(command: &str) -> bool {
    command.contains("wikipedia") || command.starts_with("who is ") || command.starts_with("what is ")
}

fn asks_joke(command: &str) -> bool {
    command.contains("joke")
}

fn exit(_: &str) -> Intent {
    Intent::Exit
}

fn time(_: &str) -> Intent {
    Intent::Time
}

fn open_youtube(_: &str) -> Intent {
    Intent::OpenSite(Site::YouTube)
}

fn open_google(_: &str) -> Intent {
    Intent::OpenSite(Site::Google)
}

fn play(command: &str) -> Intent {
    Intent::Play(play_query(command))
}

fn lookup(command: &str) -> Intent {
    Intent::Lookup(lookup_query(command))
}

fn joke(_: &str) -> Intent {
    Intent::Joke
}
