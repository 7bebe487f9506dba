use lostfound_core::{FlagError, ItemError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{0} was changed by someone else, reload and try again")]
    Conflict(String),
    #[error("sign in required")]
    NotSignedIn,
    #[error(transparent)]
    Item(#[from] ItemError),
    #[error(transparent)]
    Flag(#[from] FlagError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Short text for the user; details stay in the logs.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            ClientError::NotSignedIn => "Please sign in first".to_string(),
            ClientError::NotFound(_) => "Item not found".to_string(),
            ClientError::Conflict(_) => {
                "This item was updated elsewhere. Reload and try again".to_string()
            }
            ClientError::Item(err) => err.to_string(),
            ClientError::Flag(err) => err.to_string(),
            _ => format!("Failed to {action}"),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
