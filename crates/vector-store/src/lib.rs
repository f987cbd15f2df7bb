//! # Assemblage Vector Store
//!
//! Vector storage and similarity search for code embeddings.
//!
//! ## Architecture
//!
//! ```text
//! Chunk text
//!     │
//!     ├──> Embedder (dimension probe + batch embed)
//!     │      └─> Vector[D]
//!     │
//!     └──> VectorIndex (explicit ids)
//!            ├─> Exact L2 search
//!            └─> JSON persistence
//! ```
//!
//! Both capabilities are traits so the indexing core stays
//! implementation-agnostic: [`HashEmbedder`] and [`FlatIndex`] are the
//! shipped concrete types, and tests can substitute their own.

mod embedder;
mod error;
mod flat;

pub use embedder::{Embedder, HashEmbedder, DEFAULT_DIMENSION};
pub use error::{Result, VectorStoreError};
pub use flat::{FlatIndex, VectorIndex};
