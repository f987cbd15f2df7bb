use crate::config::IndexConfig;
use crate::error::Result;
use crate::manifest::{Manifest, MetadataTable};
use assemblage_vector_store::{Embedder, FlatIndex};
use std::path::Path;

/// The three-part durable state of one index.
///
/// Loaded at the start of every build or query; mutated in memory during a
/// build; written back as a unit at the end of a successful build. A query
/// never mutates it.
#[derive(Debug)]
pub struct IndexState {
    pub index: FlatIndex,
    pub metadata: MetadataTable,
    pub manifest: Manifest,
}

impl IndexState {
    /// Whether all three artifacts are present on disk
    #[must_use]
    pub fn exists(config: &IndexConfig) -> bool {
        config.index_path().exists()
            && config.metadata_path().exists()
            && config.manifest_path().exists()
    }

    /// Load previously persisted state; fails if any artifact is absent
    pub fn load(config: &IndexConfig) -> Result<Self> {
        let index = FlatIndex::load(&config.index_path())?;
        let metadata: MetadataTable =
            serde_json::from_slice(&std::fs::read(config.metadata_path())?)?;
        let manifest: Manifest = serde_json::from_slice(&std::fs::read(config.manifest_path())?)?;

        Ok(Self {
            index,
            metadata,
            manifest,
        })
    }

    /// Load persisted state, or initialize fresh state on first run.
    ///
    /// First run probes the embedder for its dimensionality and starts an
    /// empty index, empty metadata table, and empty manifest with
    /// `next_id = 0`.
    pub fn load_or_init(config: &IndexConfig, embedder: &dyn Embedder) -> Result<Self> {
        if Self::exists(config) {
            log::info!("Loading existing index state from {}", config.cache_dir.display());
            return Self::load(config);
        }

        log::info!("No existing index found; initializing new index");
        Ok(Self {
            index: FlatIndex::new(embedder.dimension()),
            metadata: MetadataTable::new(),
            manifest: Manifest::default(),
        })
    }

    /// Persist all three artifacts.
    ///
    /// Each file is written to a temp sibling and renamed into place, in a
    /// fixed order (index, metadata, manifest), so no artifact is ever
    /// half-written on disk.
    pub fn save(&self, config: &IndexConfig) -> Result<()> {
        std::fs::create_dir_all(&config.cache_dir)?;

        write_atomic(&config.index_path(), &self.index.to_bytes()?)?;
        write_atomic(&config.metadata_path(), &serde_json::to_vec(&self.metadata)?)?;
        write_atomic(
            &config.manifest_path(),
            &serde_json::to_vec_pretty(&self.manifest)?,
        )?;
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
