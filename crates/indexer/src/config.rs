use std::path::{Path, PathBuf};

const DEFAULT_CACHE_DIR: &str = ".assemblage_cache";
const DEFAULT_SOURCE_GLOB: &str = "*.py";

const INDEX_FILE: &str = "code_index.json";
const METADATA_FILE: &str = "code_index_meta.json";
const MANIFEST_FILE: &str = "index_manifest.json";

/// Storage locations and scan settings for one index.
///
/// Passed explicitly to [`crate::IndexBuilder`] and the query side, so
/// tests can point each instance at its own cache directory.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Project root that tracked files are enumerated under
    pub root: PathBuf,
    /// Directory holding the three persisted artifacts
    pub cache_dir: PathBuf,
    /// Glob selecting tracked source files, relative to `root`
    pub source_glob: String,
}

impl IndexConfig {
    /// Config with the default cache dir and glob under `root`
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let cache_dir = root.join(DEFAULT_CACHE_DIR);
        Self {
            root,
            cache_dir,
            source_glob: DEFAULT_SOURCE_GLOB.to_string(),
        }
    }

    #[must_use]
    pub fn with_cache_dir(mut self, cache_dir: impl AsRef<Path>) -> Self {
        self.cache_dir = cache_dir.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn with_source_glob(mut self, glob: impl Into<String>) -> Self {
        self.source_glob = glob.into();
        self
    }

    /// Path of the persisted vector index
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.cache_dir.join(INDEX_FILE)
    }

    /// Path of the persisted metadata table
    #[must_use]
    pub fn metadata_path(&self) -> PathBuf {
        self.cache_dir.join(METADATA_FILE)
    }

    /// Path of the persisted manifest
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.cache_dir.join(MANIFEST_FILE)
    }
}
