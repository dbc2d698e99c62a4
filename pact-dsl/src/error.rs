use hyper::http;
use std::{io, sync};
use thiserror::Error;

/// Misuse of the DSL, reported before any request is issued.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("willRespondWith was called before withRequest")]
    MissingRequest,
    #[error("the interaction has no description, call upon_receiving first")]
    MissingDescription,
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),
    #[error("the request path should start with '/': {0}")]
    InvalidPath(String),
    #[error("invalid HTTP status code: {0}")]
    InvalidStatus(u16),
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("there are no interactions to verify")]
    NoInteractions,
    #[error("the mock server hasn't been started")]
    NotStarted,
    #[error("the mock server is already running")]
    AlreadyStarted,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Verification failed: {}", .0.join(", "))]
    Mismatch(Vec<String>),
    #[error("Transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
    #[error("IoError: {0}")]
    IoError(#[from] io::Error),
    #[error("Hyper error: {0}")]
    HyperError(#[from] hyper::Error),
    #[error("Http Error: {0}")]
    HttpError(#[from] http::Error),
    #[error("Json error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid header name")]
    InvalidHeaderName,
    #[error("Invalid header value")]
    InvalidHeaderValue,
    #[error("Invalid body")]
    InvalidBody,
    #[error("The lock was poisoned")]
    PoisonedLock,
}

impl Error {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, Error::Mismatch(_))
    }

    /// Every failure that is neither DSL misuse nor an interaction mismatch.
    pub fn is_transport(&self) -> bool {
        !self.is_configuration() && !self.is_mismatch()
    }

    pub fn mismatches(&self) -> Option<&[String]> {
        match self {
            Error::Mismatch(mismatches) => Some(mismatches.as_slice()),
            _ => None,
        }
    }

    pub(crate) fn transport<E: Into<Box<dyn std::error::Error + Send + Sync>>>(e: E) -> Self {
        Error::Transport(e.into())
    }
}

impl<T> From<sync::PoisonError<T>> for Error {
    fn from(_: sync::PoisonError<T>) -> Self {
        Error::PoisonedLock
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(Box::new(e))
    }
}

impl From<hyper::header::InvalidHeaderName> for Error {
    fn from(_: hyper::header::InvalidHeaderName) -> Self {
        Error::InvalidHeaderName
    }
}

impl From<hyper::header::InvalidHeaderValue> for Error {
    fn from(_: hyper::header::InvalidHeaderValue) -> Self {
        Error::InvalidHeaderValue
    }
}
