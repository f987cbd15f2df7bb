//! # Assemblage Search
//!
//! Query side of the semantic code index: embed a free-text query, run
//! nearest-neighbor search over the persisted index, and project the
//! returned ids back to file/line/content provenance.

mod engine;
mod error;

pub use engine::{QueryEngine, SearchHit, DEFAULT_TOP_K};
pub use error::{Result, SearchError};
