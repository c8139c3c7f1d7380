//! Encyclopedia summaries from the MediaWiki action API.
//!
//! A lookup is up to three requests:
//! 1. `list=search` with spelling suggestions, picking the suggestion when
//!    present and the top hit otherwise;
//! 2. `prop=extracts|pageprops` for a plain-text intro of N sentences,
//!    following redirects;
//! 3. for disambiguation pages only, `prop=links` to list the candidates.

use crate::http::get_text;
use command_router::{ActionError, Encyclopedia, LookupOutcome, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

pub struct WikipediaClient {
    client: Client,
    api: String,
}

/// What the page request said about a title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageReply {
    Missing,
    Disambiguation(String),
    Extract(String),
}

impl WikipediaClient {
    pub fn new(client: Client, api: &str) -> Self {
        Self {
            client,
            api: api.to_string(),
        }
    }

    fn get(&self, params: &[(&str, &str)]) -> Result<String> {
        let mut query: Vec<(&str, &str)> = vec![("action", "query"), ("format", "json"), ("formatversion", "2")];
        query.extend_from_slice(params);
        get_text(&self.client, &self.api, &query)
    }

    fn lookup(&self, query: &str, sentences: u8) -> Result<LookupOutcome> {
        let body = self.get(&[
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", "1"),
            ("srinfo", "suggestion"),
            ("srprop", ""),
        ])?;
        let Some(title) = parse_search(&body)? else {
            return Ok(LookupOutcome::NotFound);
        };
        debug!(query, %title, "resolved title");

        let sentences = sentences.to_string();
        let body = self.get(&[
            ("prop", "extracts|pageprops"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("exsentences", sentences.as_str()),
            ("ppprop", "disambiguation"),
            ("redirects", "1"),
            ("titles", title.as_str()),
        ])?;
        Ok(match parse_page(&body)? {
            PageReply::Missing => LookupOutcome::NotFound,
            PageReply::Extract(text) => LookupOutcome::Summary(text),
            PageReply::Disambiguation(page) => {
                let body = self.get(&[
                    ("prop", "links"),
                    ("plnamespace", "0"),
                    ("pllimit", "max"),
                    ("titles", page.as_str()),
                ])?;
                LookupOutcome::Disambiguation(parse_links(&body)?)
            }
        })
    }
}

impl Encyclopedia for WikipediaClient {
    fn summary(&self, query: &str, sentences: u8) -> LookupOutcome {
        self.lookup(query, sentences).unwrap_or_else(|e| {
            warn!(query, error = %e, "wikipedia request failed");
            LookupOutcome::Failed(e.to_string())
        })
    }
}

fn parse_error(e: serde_json::Error) -> ActionError {
    ActionError::Provider(format!("unexpected wikipedia reply: {e}"))
}

#[derive(Debug, Deserialize)]
struct SearchReply {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    searchinfo: Option<SearchInfo>,
    #[serde(default)]
    search: Vec<Titled>,
}

#[derive(Debug, Deserialize)]
struct SearchInfo {
    #[serde(default)]
    suggestion: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Titled {
    title: String,
}

/// Best title for a search: the spelling suggestion if any, else the top hit.
pub fn parse_search(body: &str) -> Result<Option<String>> {
    let reply: SearchReply = serde_json::from_str(body).map_err(parse_error)?;
    let Some(query) = reply.query else {
        return Ok(None);
    };
    let suggestion = query
        .searchinfo
        .and_then(|info| info.suggestion)
        .filter(|s| !s.trim().is_empty());
    Ok(suggestion.or_else(|| query.search.into_iter().next().map(|hit| hit.title)))
}

#[derive(Debug, Deserialize)]
struct PagesReply {
    #[serde(default)]
    query: Option<PagesQuery>,
}

#[derive(Debug, Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    pageprops: Option<PageProps>,
    #[serde(default)]
    links: Vec<Titled>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    #[serde(default)]
    disambiguation: Option<serde_json::Value>,
}

fn first_page(body: &str) -> Result<Option<Page>> {
    let reply: PagesReply = serde_json::from_str(body).map_err(parse_error)?;
    Ok(reply.query.and_then(|q| q.pages.into_iter().next()))
}

pub fn parse_page(body: &str) -> Result<PageReply> {
    let Some(page) = first_page(body)? else {
        return Ok(PageReply::Missing);
    };
    if page.missing || page.invalid {
        return Ok(PageReply::Missing);
    }
    if page.pageprops.and_then(|p| p.disambiguation).is_some() {
        return Ok(PageReply::Disambiguation(page.title));
    }
    match page.extract.map(|e| e.trim().to_string()) {
        Some(text) if !text.is_empty() => Ok(PageReply::Extract(text)),
        _ => Ok(PageReply::Missing),
    }
}

/// Article titles linked from a disambiguation page, in page order.
pub fn parse_links(body: &str) -> Result<Vec<String>> {
    Ok(first_page(body)?
        .map(|page| page.links.into_iter().map(|l| l.title).collect())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_prefers_suggestion() {
        let body = r#"{"batchcomplete":true,"query":{"searchinfo":{"suggestion":"ada lovelace"},"search":[{"ns":0,"title":"Ada (programming language)"}]}}"#;
        assert_eq!(parse_search(body).unwrap().as_deref(), Some("ada lovelace"));
    }

    #[test]
    fn search_falls_back_to_top_hit() {
        let body = r#"{"batchcomplete":true,"query":{"searchinfo":{"totalhits":1204},"search":[{"ns":0,"title":"Virat Kohli"},{"ns":0,"title":"Anushka Sharma"}]}}"#;
        assert_eq!(parse_search(body).unwrap().as_deref(), Some("Virat Kohli"));
    }

    #[test]
    fn search_without_hits() {
        let body = r#"{"batchcomplete":true,"query":{"searchinfo":{"totalhits":0},"search":[]}}"#;
        assert_eq!(parse_search(body).unwrap(), None);
    }

    #[test]
    fn search_rejects_non_json() {
        assert!(parse_search("<html>busy</html>").is_err());
    }

    #[test]
    fn page_with_extract() {
        let body = r#"{"batchcomplete":true,"query":{"pages":[{"pageid":1,"ns":0,"title":"Ada Lovelace","extract":"Augusta Ada King, Countess of Lovelace was an English mathematician. She is chiefly known for her work on the Analytical Engine.\n"}]}}"#;
        assert_eq!(
            parse_page(body).unwrap(),
            PageReply::Extract(
                "Augusta Ada King, Countess of Lovelace was an English mathematician. She is chiefly known for her work on the Analytical Engine."
                    .into()
            )
        );
    }

    #[test]
    fn page_missing() {
        let body = r#"{"batchcomplete":true,"query":{"pages":[{"ns":0,"title":"Qwzx","missing":true}]}}"#;
        assert_eq!(parse_page(body).unwrap(), PageReply::Missing);
    }

    #[test]
    fn page_disambiguation() {
        let body = r#"{"batchcomplete":true,"query":{"pages":[{"pageid":19,"ns":0,"title":"Mercury","extract":"Mercury most commonly refers to:","pageprops":{"disambiguation":""}}]}}"#;
        assert_eq!(parse_page(body).unwrap(), PageReply::Disambiguation("Mercury".into()));
    }

    #[test]
    fn links_in_order() {
        let body = r#"{"query":{"pages":[{"pageid":19,"ns":0,"title":"Mercury","links":[{"ns":0,"title":"Mercury (planet)"},{"ns":0,"title":"Mercury (element)"},{"ns":0,"title":"Mercury (mythology)"}]}]}}"#;
        assert_eq!(
            parse_links(body).unwrap(),
            ["Mercury (planet)", "Mercury (element)", "Mercury (mythology)"]
        );
    }
}
