use thiserror::Error;

/// Errors raised while building or parsing an [`InvertedIndex`](crate::InvertedIndex).
///
/// Looking up a word that is not indexed is not an error; `find` simply
/// returns `None`.
#[derive(Error, Debug)]
pub enum IndexError {
    /// `increment` was called for a word that was never `insert`ed.
    #[error("word '{0}' was incremented before being inserted")]
    UnknownWord(String),

    /// A line of an index file does not follow `word doc count [doc count ...]`.
    #[error("malformed index file at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IndexError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        IndexError::Malformed { line, reason: reason.into() }
    }
}
