use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("A game needs at least one life")]
    NoLives,
    #[error("Undo limit must keep at least one snapshot")]
    ZeroUndoLimit,
    #[error("Malformed session config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record storage failed: {0}")]
    Backend(String),
}
