use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeckError>;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("Parsing error: {0}")]
    SerdeParse(#[from] serde_json::error::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Unable to spawn `{0}`")]
    SpawnFailed(String),
}
