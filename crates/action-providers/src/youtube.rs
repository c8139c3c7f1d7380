//! Play the top video search result in the browser.
//!
//! The results page is fetched as HTML and scanned for the first
//! `watch?v=<id>` link; the watch page for that id is then opened.

use crate::http::get_text;
use command_router::{ActionError, Browser, Result, VideoPlayer};
use regex::Regex;
use reqwest::blocking::Client;
use tracing::info;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

pub struct YouTubePlayer {
    client: Client,
    search_url: String,
    browser: Box<dyn Browser>,
    video_id: Regex,
}

impl YouTubePlayer {
    pub fn new(client: Client, search_url: &str, browser: Box<dyn Browser>) -> Result<Self> {
        Ok(Self {
            client,
            search_url: search_url.to_string(),
            browser,
            video_id: video_id_pattern()?,
        })
    }
}

impl VideoPlayer for YouTubePlayer {
    fn play(&self, query: &str) -> Result<()> {
        let html = get_text(&self.client, &self.search_url, &[("search_query", query)])?;
        let id = first_video_id(&self.video_id, &html)
            .ok_or_else(|| ActionError::NotFound(format!("no video for '{query}'")))?;
        info!(query, id, "playing video");
        self.browser.open(&watch_url(id))
    }
}

pub fn video_id_pattern() -> Result<Regex> {
    Regex::new(r"watch\?v=([A-Za-z0-9_-]{11})")
        .map_err(|e| ActionError::Provider(format!("video id pattern: {e}")))
}

/// First video id linked from a results page.
pub fn first_video_id<'a>(pattern: &Regex, html: &'a str) -> Option<&'a str> {
    pattern
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn watch_url(id: &str) -> String {
    format!("{WATCH_URL}{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"<html><script>var ytInitialData = {"contents":[
        {"videoRenderer":{"videoId":"JGwWNGJdvx8","navigationEndpoint":{"commandMetadata":{"webCommandMetadata":{"url":"/watch?v=JGwWNGJdvx8"}}}}},
        {"videoRenderer":{"videoId":"liTfD88dbCo","navigationEndpoint":{"commandMetadata":{"webCommandMetadata":{"url":"/watch?v=liTfD88dbCo"}}}}}
    ]};</script></html>"#;

    #[test]
    fn picks_first_result() {
        let pattern = video_id_pattern().unwrap();
        assert_eq!(first_video_id(&pattern, RESULTS_PAGE), Some("JGwWNGJdvx8"));
    }

    #[test]
    fn no_results_yields_none() {
        let pattern = video_id_pattern().unwrap();
        assert_eq!(first_video_id(&pattern, "<html>No results</html>"), None);
        // ids are exactly eleven characters
        assert_eq!(first_video_id(&pattern, "/watch?v=short"), None);
    }

    #[test]
    fn watch_url_for_id() {
        assert_eq!(watch_url("JGwWNGJdvx8"), "https://www.youtube.com/watch?v=JGwWNGJdvx8");
    }
}
