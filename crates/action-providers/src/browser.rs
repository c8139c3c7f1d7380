use command_router::{ActionError, Browser, Result};
use tracing::debug;

/// The desktop's default browser
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        debug!(url, "opening browser");
        webbrowser::open(url).map_err(|e| ActionError::Browser(e.to_string()))
    }
}
