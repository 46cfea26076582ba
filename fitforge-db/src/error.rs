#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("invalid stored document: {0}")]
    Document(#[from] serde_json::Error),
    #[error("invalid stored value: {0}")]
    Value(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
