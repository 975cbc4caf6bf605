use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No session; the caller should send the user to login
    #[error("login required")]
    LoginRequired,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the backend, with its `message` when present
    #[error("backend returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("{0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Message suitable for showing next to a form
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api { message, .. } if !message.is_empty() => message.clone(),
            ClientError::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
