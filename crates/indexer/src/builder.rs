use crate::config::IndexConfig;
use crate::error::Result;
use crate::manifest::{meta_key, ChunkMeta, ManifestEntry};
use crate::scanner::FileScanner;
use crate::state::IndexState;
use crate::sync::{plan_sync, PendingFile};
use assemblage_code_chunker::Chunker;
use assemblage_vector_store::{Embedder, VectorIndex};

/// Counters reported by one build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Files whose chunks were (re-)embedded this build
    pub files_indexed: usize,
    /// Files removed from the index this build
    pub files_deleted: usize,
    /// Tracked files left untouched
    pub files_unchanged: usize,
    /// Chunks embedded this build
    pub chunks_embedded: usize,
    /// Vector ids retired this build
    pub vectors_retired: usize,
    /// True when the build changed nothing and wrote nothing
    pub up_to_date: bool,
}

/// Orchestrates one incremental index build.
///
/// Fingerprints the tracked file set against the manifest, retires vectors
/// for deleted and modified files, embeds chunks for added and modified
/// files under fresh monotonic ids, and persists the three state artifacts
/// as a unit at the end.
pub struct IndexBuilder<E: Embedder> {
    config: IndexConfig,
    embedder: E,
    chunker: Chunker,
}

impl<E: Embedder> IndexBuilder<E> {
    #[must_use]
    pub fn new(config: IndexConfig, embedder: E) -> Self {
        Self {
            config,
            embedder,
            chunker: Chunker::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Build or incrementally update the index.
    ///
    /// Per-file read and parse failures degrade that file's contribution
    /// and never abort the build; scanner, embedding, and persistence
    /// failures propagate.
    pub fn build(&self) -> Result<BuildStats> {
        log::info!("Starting incremental index build at {}", self.config.root.display());

        let mut state = IndexState::load_or_init(&self.config, &self.embedder)?;

        let scanner = FileScanner::new(&self.config.root, &self.config.source_glob)?;
        let tracked = scanner.scan()?;

        let plan = plan_sync(&self.config.root, &tracked, &state.manifest);
        let mut stats = BuildStats {
            files_unchanged: plan.unchanged.len(),
            ..BuildStats::default()
        };

        if plan.is_noop() {
            log::info!("Index is up to date");
            stats.up_to_date = true;
            return Ok(stats);
        }

        // Retire before inserting, so id uniqueness is governed solely by
        // the monotonic counter.
        if !plan.ids_to_retire.is_empty() {
            log::info!("Removing {} old vectors from index", plan.ids_to_retire.len());
            stats.vectors_retired = state.index.remove(&plan.ids_to_retire);
            for id in &plan.ids_to_retire {
                state.metadata.remove(&meta_key(*id));
            }
        }
        for path in &plan.deleted {
            state.manifest.files.remove(path);
        }
        stats.files_deleted = plan.deleted.len();

        for file in plan.to_add.iter().chain(&plan.to_modify) {
            self.index_file(&mut state, file, &mut stats)?;
        }

        state.save(&self.config)?;
        log::info!(
            "Index build complete: {} files embedded, {} chunks, {} vectors retired",
            stats.files_indexed,
            stats.chunks_embedded,
            stats.vectors_retired
        );
        Ok(stats)
    }

    /// Chunk, embed, and record one added or modified file.
    fn index_file(
        &self,
        state: &mut IndexState,
        file: &PendingFile,
        stats: &mut BuildStats,
    ) -> Result<()> {
        let chunks = self.chunker.chunk_file(&file.path, &file.content);
        if chunks.is_empty() {
            // A file that chunks to nothing is absent from the index; a
            // modified file that previously had chunks loses its entry so
            // the manifest never points at retired vectors.
            state.manifest.files.remove(&file.path);
            return Ok(());
        }

        log::info!(
            "Generating embeddings for {} chunks in {}",
            chunks.len(),
            file.path
        );
        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let vectors = self.embedder.embed(&texts)?;

        let ids = state.manifest.allocate_ids(chunks.len() as u64);
        state.index.add(&ids, &vectors)?;
        for (id, chunk) in ids.iter().zip(&chunks) {
            state.metadata.insert(
                meta_key(*id),
                ChunkMeta {
                    path: chunk.path.clone(),
                    line: chunk.position.line(),
                    content: chunk.content.clone(),
                },
            );
        }
        state.manifest.files.insert(
            file.path.clone(),
            ManifestEntry {
                hash: file.hash.clone(),
                vector_ids: ids,
            },
        );

        stats.files_indexed += 1;
        stats.chunks_embedded += chunks.len();
        Ok(())
    }
}
