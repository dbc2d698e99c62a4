use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unexpected status code {0}")]
    UnexpectedStatus(u16),
    #[error("{0}")]
    DeserializationError(#[from] serde_json::Error),
    #[error("{0}")]
    ReqwestError(#[from] reqwest::Error),
}
