use crate::error::{Result, VectorStoreError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Vector index with explicit caller-assigned ids.
///
/// `search` returns `(id, distance)` pairs in ascending distance order;
/// distance is squared L2, so lower is closer.
pub trait VectorIndex {
    fn dimension(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: u64) -> bool;

    /// All live ids, unordered.
    fn ids(&self) -> Vec<u64>;

    /// Insert `(id, vector)` pairs. Ids must be fresh and vectors must
    /// match the index dimension.
    fn add(&mut self, ids: &[u64], vectors: &[Vec<f32>]) -> Result<()>;

    /// Remove the given ids; ids not present are ignored. Returns the
    /// number of vectors actually removed.
    fn remove(&mut self, ids: &[u64]) -> usize;

    /// Top-`k` nearest neighbors of `query`, ascending squared L2 distance.
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<(u64, f32)>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    id: u64,
    vector: Vec<f32>,
}

/// Brute-force exact-search index.
///
/// A linear scan over all stored vectors: exact results, no tuning, and a
/// persisted form (`save`/`load`) that reproduces the in-memory structure
/// byte for byte. Adequate for corpora in the tens of thousands of chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatIndex {
    dimension: usize,
    entries: Vec<IndexEntry>,
}

impl FlatIndex {
    /// Create an empty index for vectors of the given dimension
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    /// Load a previously saved index
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let index: Self = serde_json::from_slice(&bytes)?;
        Ok(index)
    }

    /// Serialize the index to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl VectorIndex for FlatIndex {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    fn ids(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.id).collect()
    }

    fn add(&mut self, ids: &[u64], vectors: &[Vec<f32>]) -> Result<()> {
        if ids.len() != vectors.len() {
            return Err(VectorStoreError::BatchShapeMismatch {
                ids: ids.len(),
                vectors: vectors.len(),
            });
        }

        let live: HashSet<u64> = self.entries.iter().map(|e| e.id).collect();
        for (&id, vector) in ids.iter().zip(vectors) {
            if vector.len() != self.dimension {
                return Err(VectorStoreError::DimensionMismatch {
                    expected: self.dimension,
                    actual: vector.len(),
                });
            }
            if live.contains(&id) {
                return Err(VectorStoreError::DuplicateId(id));
            }
        }

        for (&id, vector) in ids.iter().zip(vectors) {
            self.entries.push(IndexEntry {
                id,
                vector: vector.clone(),
            });
        }
        Ok(())
    }

    fn remove(&mut self, ids: &[u64]) -> usize {
        let doomed: HashSet<u64> = ids.iter().copied().collect();
        let before = self.entries.len();
        self.entries.retain(|e| !doomed.contains(&e.id));
        before - self.entries.len()
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<(u64, f32)>> {
        if query.len() != self.dimension {
            return Err(VectorStoreError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(u64, f32)> = self
            .entries
            .iter()
            .map(|e| (e.id, squared_l2(query, &e.vector)))
            .collect();

        // Tie-break on id so result order is deterministic.
        scored.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(k);
        Ok(scored)
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn unit(dimension: usize, axis: usize) -> Vec<f32> {
        let mut v = vec![0.0; dimension];
        v[axis] = 1.0;
        v
    }

    #[test]
    fn add_and_search_orders_by_distance() {
        let mut index = FlatIndex::new(3);
        index
            .add(&[0, 1, 2], &[unit(3, 0), unit(3, 1), unit(3, 2)])
            .unwrap();

        let results = index.search(&unit(3, 1), 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, 1);
        assert!(results[0].1 < results[1].1);
    }

    #[test]
    fn search_tolerates_k_larger_than_index() {
        let mut index = FlatIndex::new(2);
        index.add(&[0], &[vec![1.0, 0.0]]).unwrap();
        let results = index.search(&[1.0, 0.0], 10).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn remove_drops_only_named_ids() {
        let mut index = FlatIndex::new(2);
        index
            .add(&[0, 1, 2], &[vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]])
            .unwrap();

        let removed = index.remove(&[0, 2, 99]);
        assert_eq!(removed, 2);
        assert_eq!(index.ids(), vec![1]);
        assert!(index.contains(1));
        assert!(!index.contains(0));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut index = FlatIndex::new(2);
        index.add(&[5], &[vec![1.0, 0.0]]).unwrap();
        let err = index.add(&[5], &[vec![0.0, 1.0]]).unwrap_err();
        assert!(matches!(err, VectorStoreError::DuplicateId(5)));
        // A failed batch leaves the index untouched.
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn rejects_wrong_dimension() {
        let mut index = FlatIndex::new(3);
        let err = index.add(&[0], &[vec![1.0, 0.0]]).unwrap_err();
        assert!(matches!(
            err,
            VectorStoreError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
        assert!(index.search(&[1.0], 1).is_err());
    }

    #[test]
    fn rejects_batch_shape_mismatch() {
        let mut index = FlatIndex::new(2);
        let err = index.add(&[0, 1], &[vec![1.0, 0.0]]).unwrap_err();
        assert!(matches!(
            err,
            VectorStoreError::BatchShapeMismatch { ids: 2, vectors: 1 }
        ));
    }

    #[test]
    fn save_load_round_trip_preserves_search_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");

        let mut index = FlatIndex::new(3);
        index
            .add(&[0, 1, 2], &[unit(3, 0), unit(3, 1), unit(3, 2)])
            .unwrap();
        std::fs::write(&path, index.to_bytes().unwrap()).unwrap();

        let reloaded = FlatIndex::load(&path).unwrap();
        assert_eq!(reloaded.dimension(), 3);
        assert_eq!(reloaded.len(), 3);
        assert_eq!(
            index.search(&unit(3, 2), 3).unwrap(),
            reloaded.search(&unit(3, 2), 3).unwrap()
        );
    }
}
