use crate::error::{Result, SearchError};
use assemblage_indexer::{meta_key, IndexConfig, IndexState};
use assemblage_vector_store::{Embedder, VectorIndex};

/// Default number of neighbors returned by a query
pub const DEFAULT_TOP_K: usize = 5;

/// One ranked search result.
///
/// `score` is the raw distance reported by the vector index (squared L2,
/// lower is closer); results arrive already sorted ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub score: f32,
    pub path: String,
    pub line: u32,
    pub content: String,
}

/// Read-only query side of the index.
///
/// Loads persisted state per query and never mutates it, so it can run
/// while no build is in progress.
pub struct QueryEngine<E: Embedder> {
    config: IndexConfig,
    embedder: E,
}

impl<E: Embedder> QueryEngine<E> {
    #[must_use]
    pub fn new(config: IndexConfig, embedder: E) -> Self {
        Self { config, embedder }
    }

    /// Top-`top_k` chunks nearest to `query`.
    ///
    /// Fails with [`SearchError::IndexNotFound`] if the index was never
    /// built. Ids returned by the vector index that have no metadata entry
    /// (possible only with corrupted storage) are dropped silently.
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        if !IndexState::exists(&self.config) {
            return Err(SearchError::IndexNotFound);
        }

        log::info!("Loading code intelligence index");
        let state = IndexState::load(&self.config)?;

        let embedded = self.embedder.embed(&[query])?;
        let vector = embedded
            .first()
            .ok_or_else(|| SearchError::VectorStoreError(
                assemblage_vector_store::VectorStoreError::EmbeddingError(
                    "embedder returned no vector for the query".to_string(),
                ),
            ))?;

        let neighbors = state.index.search(vector, top_k)?;
        log::debug!("Query matched {} neighbors", neighbors.len());

        let hits = neighbors
            .into_iter()
            .filter_map(|(id, distance)| {
                let meta = state.metadata.get(&meta_key(id))?;
                Some(SearchHit {
                    score: distance,
                    path: meta.path.clone(),
                    line: meta.line,
                    content: meta.content.clone(),
                })
            })
            .collect();
        Ok(hits)
    }
}
