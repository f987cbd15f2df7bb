use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChunkerError>;

#[derive(Error, Debug)]
pub enum ChunkerError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

impl ChunkerError {
    pub fn unsupported_language(name: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(name.into())
    }
}
