use crate::error::Result;

/// FNV-1a offset basis (64-bit).
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a prime (64-bit).
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Minimum token length (tokens shorter than this are filtered out).
const MIN_TOKEN_LEN: usize = 2;

/// Character n-gram width for sub-token features.
const NGRAM_LEN: usize = 3;

/// Default embedding dimension.
pub const DEFAULT_DIMENSION: usize = 384;

/// Maps batches of text to fixed-dimension vectors.
///
/// `dimension()` doubles as the dimensionality probe used when a fresh
/// index is initialized. `embed` must tolerate batches of size 1.
pub trait Embedder {
    fn dimension(&self) -> usize;

    /// Embed an ordered batch of texts into equal-length vectors.
    ///
    /// The output has one vector per input, in input order, each of length
    /// `dimension()`.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
}

/// Deterministic hash-based embedder.
///
/// Hashes character trigrams of lowercased tokens into a fixed-dimension
/// L2-normalized vector using FNV-1a. Not semantic — it captures lexical
/// overlap only — but it is stable across processes, needs no model files,
/// and makes search results reproducible in tests.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    /// Create a hash embedder with the given dimension.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is zero.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        assert!(dimension > 0, "dimension must be > 0");
        Self { dimension }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dimension];

        for token in tokenize(text) {
            for feature in token_features(&token) {
                let hash = fnv1a(feature.as_bytes());
                #[allow(clippy::cast_possible_truncation)]
                let slot = (hash % self.dimension as u64) as usize;
                let sign = if hash & (1 << 63) == 0 { 1.0 } else { -1.0 };
                vector[slot] += sign;
            }
        }

        l2_normalize(&mut vector);
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl Embedder for HashEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}

/// Lowercased alphanumeric tokens of at least `MIN_TOKEN_LEN` characters.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
        .map(str::to_lowercase)
        .collect()
}

/// The token itself plus its character trigrams.
///
/// Trigrams let morphological variants ("subtract" / "subtraction") share
/// most of their mass, which plain bag-of-words hashing would miss.
fn token_features(token: &str) -> Vec<&str> {
    let chars: Vec<usize> = token
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(token.len()))
        .collect();

    let mut features = vec![token];
    if chars.len() > NGRAM_LEN {
        for window in chars.windows(NGRAM_LEN + 1) {
            features.push(&token[window[0]..window[NGRAM_LEN]]);
        }
    }
    features
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dot(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn embeds_to_fixed_dimension() {
        let embedder = HashEmbedder::new(64);
        let out = embedder.embed(&["hello world"]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].len(), 64);
        assert_eq!(embedder.dimension(), 64);
    }

    #[test]
    fn batch_of_one_keeps_shape() {
        let embedder = HashEmbedder::default();
        let single = embedder.embed(&["def add(a, b): return a + b"]).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].len(), DEFAULT_DIMENSION);
    }

    #[test]
    fn deterministic_across_calls() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed(&["subtract two numbers"]).unwrap();
        let b = embedder.embed(&["subtract two numbers"]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn output_is_normalized() {
        let embedder = HashEmbedder::default();
        let out = embedder.embed(&["some nontrivial text here"]).unwrap();
        let norm = out[0].iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn morphological_variants_are_closer_than_unrelated_text() {
        let embedder = HashEmbedder::default();
        let out = embedder
            .embed(&["subtraction logic", "def subtract(a, b): return a - b", "parse yaml config"])
            .unwrap();
        let related = dot(&out[0], &out[1]);
        let unrelated = dot(&out[0], &out[2]);
        assert!(related > unrelated);
    }

    #[test]
    fn tokenizer_drops_short_tokens() {
        assert_eq!(tokenize("a + b, return x"), vec!["return"]);
        assert_eq!(tokenize("Add(A, B)"), vec!["add"]);
    }

    #[test]
    fn trigram_features_cover_the_token() {
        let features = token_features("subtract");
        assert!(features.contains(&"subtract"));
        assert!(features.contains(&"sub"));
        assert!(features.contains(&"act"));
        // Short tokens contribute only themselves.
        assert_eq!(token_features("ab"), vec!["ab"]);
    }
}
