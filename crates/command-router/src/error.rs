use thiserror::Error;

pub type Result<T, E = ActionError> = core::result::Result<T, E>;

/// Failure reported by an action provider.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("could not open browser: {0}")]
    Browser(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("provider error: {0}")]
    Provider(String),
}
