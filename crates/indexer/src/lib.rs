//! # Assemblage Indexer
//!
//! Incremental semantic indexing of a source tree.
//!
//! ## Pipeline
//!
//! ```text
//! Project root
//!     │
//!     ├──> File Scanner (.gitignore aware, glob filtered)
//!     │      └─> Tracked source files
//!     │
//!     ├──> Sync Planner (fingerprint vs manifest)
//!     │      └─> added / modified / deleted / unchanged
//!     │
//!     ├──> Chunker + Embedder (changed files only)
//!     │      └─> Fresh vector ids, metadata entries
//!     │
//!     └──> Persistent state (index + metadata + manifest)
//! ```
//!
//! Vector ids are allocated from a monotonic counter in the manifest and
//! never reused, so a retired chunk can never be confused with a new one.
//!
//! ## Example
//!
//! ```no_run
//! use assemblage_indexer::{IndexBuilder, IndexConfig};
//! use assemblage_vector_store::HashEmbedder;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = IndexConfig::new("/path/to/project");
//!     let builder = IndexBuilder::new(config, HashEmbedder::default());
//!     let stats = builder.build()?;
//!
//!     println!("Indexed {} files, {} chunks", stats.files_indexed, stats.chunks_embedded);
//!     Ok(())
//! }
//! ```

mod builder;
mod config;
mod error;
mod fingerprint;
mod manifest;
mod scanner;
mod state;
mod sync;

pub use builder::{BuildStats, IndexBuilder};
pub use config::IndexConfig;
pub use error::{IndexerError, Result};
pub use fingerprint::fingerprint;
pub use manifest::{meta_key, ChunkMeta, Manifest, ManifestEntry, MetadataTable};
pub use scanner::FileScanner;
pub use state::IndexState;
pub use sync::{plan_sync, PendingFile, SyncPlan};
