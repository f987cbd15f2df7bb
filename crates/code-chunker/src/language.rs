use crate::error::{ChunkerError, Result};
use std::path::Path;

/// Supported source language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    Unknown,
}

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "py" | "pyw" => Self::Python,
            _ => Self::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Unknown, Self::from_extension)
    }

    /// Get language name as string
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Unknown => "unknown",
        }
    }

    /// Check if this language is supported for AST parsing
    pub const fn supports_ast(self) -> bool {
        matches!(self, Self::Python)
    }

    /// Get Tree-sitter language instance
    pub fn tree_sitter_language(self) -> Result<tree_sitter::Language> {
        match self {
            Self::Python => Ok(tree_sitter_python::LANGUAGE.into()),
            Self::Unknown => Err(ChunkerError::unsupported_language(self.as_str())),
        }
    }
}
