use thiserror::Error;

pub type Result<T> = std::result::Result<T, VectorStoreError>;

#[derive(Error, Debug)]
pub enum VectorStoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Id {0} is already present in the index")]
    DuplicateId(u64),

    #[error("Batch shape mismatch: {ids} ids for {vectors} vectors")]
    BatchShapeMismatch { ids: usize, vectors: usize },

    #[error("Embedding error: {0}")]
    EmbeddingError(String),
}
