use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] assemblage_vector_store::VectorStoreError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid source glob: {0}")]
    GlobError(#[from] globset::Error),

    #[error("File enumeration failed: {0}")]
    ScanError(#[from] ignore::Error),

    #[error("Invalid project path: {0}")]
    InvalidPath(String),
}
