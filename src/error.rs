use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {status}")]
    Http { status: StatusCode, body: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("A rating submission is already in progress")]
    SubmissionInProgress,

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
}

/// Local checks run before a rating ever reaches the network.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no score selected")]
    MissingScore,

    #[error("score {0} is outside 1-5")]
    ScoreOutOfRange(u8),

    #[error("username is empty")]
    EmptyUsername,
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingScore | ValidationError::ScoreOutOfRange(_) => {
                "Please select a rating"
            }
            ValidationError::EmptyUsername => "Please enter your username",
        }
    }
}

impl Error {
    /// Text safe to show an end user. Never includes the error chain.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::Validation(e) => e.user_message(),
            Error::Http { status, .. } if *status == StatusCode::NOT_FOUND => {
                "The requested movie could not be found"
            }
            Error::SubmissionInProgress => "Your rating is still being submitted",
            Error::Config(_) | Error::InvalidBaseUrl { .. } => {
                "The catalog client is misconfigured"
            }
            Error::UnknownSortKey(_) => "Sort by title, year or rating",
            Error::Network(_) | Error::Http { .. } | Error::Json(_) => {
                "Something went wrong talking to the catalog. Please try again."
            }
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Network(e) => e.status(),
            _ => None,
        }
    }
}
