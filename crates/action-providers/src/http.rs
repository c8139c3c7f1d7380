use crate::ProviderConfig;
use command_router::{ActionError, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Blocking client carrying the configured User-Agent and timeout.
pub fn client(config: &ProviderConfig) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs.max(1)))
        .build()
        .map_err(http_error)
}

pub(crate) fn http_error(e: reqwest::Error) -> ActionError {
    ActionError::Http(e.to_string())
}

/// GET `url` with `query` and return the body of a 2xx reply.
pub(crate) fn get_text(client: &Client, url: &str, query: &[(&str, &str)]) -> Result<String> {
    client
        .get(url)
        .query(query)
        .send()
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.text())
        .map_err(http_error)
}
