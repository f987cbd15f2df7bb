use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Per-file record in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Content fingerprint of the file text as last indexed
    pub hash: String,
    /// Vector ids currently representing this file's chunks, in chunk order
    pub vector_ids: Vec<u64>,
}

/// Durable record of which files are indexed and the id counter.
///
/// `next_id` only ever increases, across deletions included; retired ids
/// are never handed out again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub files: BTreeMap<String, ManifestEntry>,
    pub next_id: u64,
}

impl Manifest {
    /// Union of vector ids across all file entries
    #[must_use]
    pub fn all_ids(&self) -> BTreeSet<u64> {
        self.files
            .values()
            .flat_map(|entry| entry.vector_ids.iter().copied())
            .collect()
    }

    /// Allocate a contiguous block of `count` fresh ids, advancing the counter
    pub fn allocate_ids(&mut self, count: u64) -> Vec<u64> {
        let start = self.next_id;
        self.next_id += count;
        (start..self.next_id).collect()
    }
}

/// Provenance for one live vector id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMeta {
    pub path: String,
    pub line: u32,
    pub content: String,
}

/// Mapping from string-encoded vector id to chunk provenance.
///
/// Exists purely so a raw search hit can be resolved back to a file, line,
/// and text. Entries are removed in lockstep with vector retirement.
pub type MetadataTable = BTreeMap<String, ChunkMeta>;

/// Metadata key for a vector id
#[must_use]
pub fn meta_key(id: u64) -> String {
    id.to_string()
}
