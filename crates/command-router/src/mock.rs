//! In-memory providers for driving the router without a browser or network

use crate::providers::{Browser, Clock, Encyclopedia, JokeSource, LookupOutcome, Providers, VideoPlayer};
use crate::{ActionError, Result};
use std::sync::{Arc, Mutex};
use time::macros::datetime;
use time::OffsetDateTime;

/// Shared, ordered record of provider calls, e.g. `"open <url>"`
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn record(&self, call: String) {
        if let Ok(mut calls) = self.0.lock() {
            calls.push(call);
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

pub struct MockBrowser {
    log: CallLog,
    fail: bool,
}

impl Browser for MockBrowser {
    fn open(&self, url: &str) -> Result<()> {
        if self.fail {
            return Err(ActionError::Browser("mock browser set to fail".into()));
        }
        self.log.record(format!("open {url}"));
        Ok(())
    }
}

pub struct MockVideo {
    log: CallLog,
    fail: bool,
}

impl VideoPlayer for MockVideo {
    fn play(&self, query: &str) -> Result<()> {
        self.log.record(format!("play {query}"));
        if self.fail {
            return Err(ActionError::NotFound(query.to_string()));
        }
        Ok(())
    }
}

pub struct MockEncyclopedia {
    log: CallLog,
    outcome: LookupOutcome,
}

impl Encyclopedia for MockEncyclopedia {
    fn summary(&self, query: &str, sentences: u8) -> LookupOutcome {
        self.log.record(format!("lookup {query} {sentences}"));
        self.outcome.clone()
    }
}

pub struct MockJokes {
    fail: bool,
}

impl JokeSource for MockJokes {
    fn joke(&self) -> Result<String> {
        if self.fail {
            return Err(ActionError::Provider("mock jokes set to fail".into()));
        }
        Ok("There are 10 kinds of people: those who get binary and those who don't.".into())
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Builder for a full mock provider set sharing one [`CallLog`]
pub struct MockProviders {
    pub log: CallLog,
    pub lookup: LookupOutcome,
    pub browser_fails: bool,
    pub video_fails: bool,
    pub jokes_fail: bool,
    pub now: OffsetDateTime,
}

impl Default for MockProviders {
    fn default() -> Self {
        Self {
            log: CallLog::default(),
            lookup: LookupOutcome::NotFound,
            browser_fails: false,
            video_fails: false,
            jokes_fail: false,
            now: datetime!(2024-03-01 21:05 UTC),
        }
    }
}

impl MockProviders {
    pub fn into_providers(self) -> Providers {
        Providers {
            browser: Box::new(MockBrowser {
                log: self.log.clone(),
                fail: self.browser_fails,
            }),
            video: Box::new(MockVideo {
                log: self.log.clone(),
                fail: self.video_fails,
            }),
            encyclopedia: Box::new(MockEncyclopedia {
                log: self.log,
                outcome: self.lookup,
            }),
            jokes: Box::new(MockJokes {
                fail: self.jokes_fail,
            }),
            clock: Box::new(FixedClock(self.now)),
        }
    }
}
