use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    /// The index has never been built; callers should prompt for a build
    /// rather than show a generic failure.
    #[error("Index not found; run a build first")]
    IndexNotFound,

    #[error("Query is empty")]
    EmptyQuery,

    #[error("Indexer error: {0}")]
    IndexerError(#[from] assemblage_indexer::IndexerError),

    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] assemblage_vector_store::VectorStoreError),
}
