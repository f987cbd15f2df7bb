use crate::language::Language;
use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Parser};

/// Line position of a chunk, 1-based.
///
/// `Exact` comes from the parser's source position; `Approximate` comes from
/// a best-effort text scan when the structured position cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkPosition {
    Exact(u32),
    Approximate(u32),
}

impl ChunkPosition {
    /// The 1-based line number regardless of confidence
    #[must_use]
    pub const fn line(self) -> u32 {
        match self {
            Self::Exact(line) | Self::Approximate(line) => line,
        }
    }

    /// Whether this position came from the parser rather than a text scan
    #[must_use]
    pub const fn is_exact(self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

/// A contiguous span of one file's text, embeddable as a unit.
///
/// Chunks are produced fresh on every (re-)chunking of a file and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub path: String,
    pub position: ChunkPosition,
    pub content: String,
}

/// Splits source files into top-level definition chunks via tree-sitter.
///
/// Each top-level function or class definition becomes one chunk; module
/// level statements outside any definition are skipped. Decorated
/// definitions are chunked by their inner definition body, so decorator
/// lines are not part of the chunk.
pub struct Chunker;

impl Chunker {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Chunk one file's text.
    ///
    /// Never fails: a file whose language is unsupported or whose parse
    /// tree contains errors contributes zero chunks, with a warning logged.
    #[must_use]
    pub fn chunk_file(&self, path: &str, source: &str) -> Vec<Chunk> {
        let language = Language::from_path(path);
        if !language.supports_ast() {
            log::warn!("Skipping {path}: unsupported language");
            return Vec::new();
        }

        let grammar = match language.tree_sitter_language() {
            Ok(grammar) => grammar,
            Err(e) => {
                log::warn!("Skipping {path}: {e}");
                return Vec::new();
            }
        };

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&grammar) {
            log::warn!("Skipping {path}: failed to load grammar: {e}");
            return Vec::new();
        }

        let Some(tree) = parser.parse(source, None) else {
            log::warn!("Skipping {path}: parser returned no tree");
            return Vec::new();
        };

        let root = tree.root_node();
        if root.has_error() {
            log::warn!("Skipping {path} due to syntax error");
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut cursor = root.walk();
        for node in root.children(&mut cursor) {
            let definition = match node.kind() {
                "function_definition" | "class_definition" => node,
                // Chunk the definition body; leading decorator lines are a
                // known, accepted gap in line-number precision.
                "decorated_definition" => match node.child_by_field_name("definition") {
                    Some(inner) => inner,
                    None => continue,
                },
                _ => continue,
            };

            if let Some(chunk) = extract_chunk(path, source, definition) {
                chunks.push(chunk);
            }
        }

        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_chunk(path: &str, source: &str, node: Node<'_>) -> Option<Chunk> {
    match source.get(node.byte_range()) {
        Some(segment) if !segment.is_empty() => {
            let row = u32::try_from(node.start_position().row).unwrap_or(u32::MAX - 1);
            Some(Chunk {
                path: path.to_string(),
                position: ChunkPosition::Exact(row + 1),
                content: segment.to_string(),
            })
        }
        _ => fallback_chunk(path, source, node),
    }
}

/// Best-effort recovery when a definition's source span cannot be resolved
/// (zero-width or invalid byte range): scan for the opening token and take
/// the text from that line through the node's end row. The resulting
/// position is `Approximate` — inaccuracy is accepted over failure.
fn fallback_chunk(path: &str, source: &str, node: Node<'_>) -> Option<Chunk> {
    let Some(position) = approximate_position(source, opening_token(node.kind())) else {
        log::warn!(
            "Could not resolve source segment for definition at {path}:{}",
            node.start_position().row + 1
        );
        return None;
    };

    let start = position.line().saturating_sub(1) as usize;
    let end = node.end_position().row + 1;
    let lines: Vec<&str> = source.lines().collect();
    let content = lines.get(start..end.clamp(start, lines.len()))?.join("\n");
    if content.trim().is_empty() {
        return None;
    }

    Some(Chunk {
        path: path.to_string(),
        position,
        content,
    })
}

fn opening_token(kind: &str) -> &'static str {
    if kind == "class_definition" {
        "class "
    } else {
        "def "
    }
}

/// Best-effort scan: first line whose trimmed text starts with `token`.
fn approximate_position(source: &str, token: &str) -> Option<ChunkPosition> {
    source
        .lines()
        .position(|line| line.trim_start().starts_with(token))
        .map(|idx| ChunkPosition::Approximate(u32::try_from(idx).unwrap_or(u32::MAX - 1) + 1))
}
