//! # Assemblage Code Chunker
//!
//! Splits source files into embeddable chunks for semantic indexing.
//!
//! ## Pipeline
//!
//! ```text
//! Source text
//!     │
//!     ├──> Tree-sitter parse
//!     │      └─> Top-level function / class definitions
//!     │
//!     └──> Chunks (path, line, content)
//! ```
//!
//! A file that fails to parse contributes zero chunks; the failure is
//! logged, never propagated.

mod chunker;
mod error;
mod language;

pub use chunker::{Chunk, ChunkPosition, Chunker};
pub use error::{ChunkerError, Result};
pub use language::Language;
