use thiserror::Error;

/// Rejected form input, caught before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("{field} must be a whole number")]
    NotANumber { field: &'static str },
    #[error("{field} must be a valid email address")]
    InvalidEmail { field: &'static str },
    #[error("unknown form field '{0}'")]
    UnknownField(String),
}

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Network failure or non-success status. `server_message` carries the
    /// body's `error` field when the backend supplied one.
    #[error("transport failure: {detail}")]
    Transport {
        status: Option<u16>,
        server_message: Option<String>,
        detail: String,
    },
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            server_message: None,
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Text shown to the user. Decode failures and transport failures without
    /// a usable server message both collapse to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Transport {
                server_message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Transport { .. } | Self::Decode(_) => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport {
            status: value.status().map(|status| status.as_u16()),
            server_message: None,
            detail: value.to_string(),
        }
    }
}
