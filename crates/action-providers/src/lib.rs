//! Concrete action providers for the command router
//!
//! Every network provider uses a blocking `reqwest` client with a fixed
//! User-Agent and request timeout, built by [`http::client`].

mod browser;
mod clock;
pub mod http;
mod jokes;
pub mod wikipedia;
pub mod youtube;

pub use browser::SystemBrowser;
pub use clock::SystemClock;
pub use jokes::{JokeCatalog, BUNDLED_JOKES};
pub use wikipedia::WikipediaClient;
pub use youtube::YouTubePlayer;

use command_router::{Providers, Result};
use serde::{Deserialize, Serialize};

/// Endpoints and HTTP policy shared by the network providers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    /// MediaWiki action API endpoint
    pub wikipedia_api: String,
    /// Video search results page; the query goes in `search_query`
    pub youtube_search: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("jarvis-assistant/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
            wikipedia_api: "https://en.wikipedia.org/w/api.php".to_string(),
            youtube_search: "https://www.youtube.com/results".to_string(),
        }
    }
}

/// Production provider set: system browser, YouTube, Wikipedia, bundled
/// jokes and the given clock.
pub fn default_providers(config: &ProviderConfig, clock: SystemClock) -> Result<Providers> {
    let client = http::client(config)?;
    Ok(Providers {
        browser: Box::new(SystemBrowser),
        video: Box::new(YouTubePlayer::new(
            client.clone(),
            &config.youtube_search,
            Box::new(SystemBrowser),
        )?),
        encyclopedia: Box::new(WikipediaClient::new(client, &config.wikipedia_api)),
        jokes: Box::new(JokeCatalog::default()),
        clock: Box::new(clock),
    })
}
