//! Error types for pashto-lex-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating a lexicon.
#[derive(Error, Debug)]
pub enum LexiconError {
    /// The lexicon file could not be read.
    #[error("failed to read lexicon {path}: {source}")]
    Read {
        /// Path of the lexicon file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The lexicon file is not valid JSON of the expected shape.
    #[error("failed to parse lexicon {path}: {source}")]
    Parse {
        /// Path of the lexicon file (or `<built-in>`).
        path: Utf8PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// An entry is internally inconsistent.
    #[error("invalid lexicon entry '{root}': {reason}")]
    Invalid {
        /// Root (key) of the offending entry.
        root: String,
        /// Human-readable reason.
        reason: String,
    },
}

/// Result type alias using [`LexiconError`].
pub type LexiconResult<T> = Result<T, LexiconError>;

/// Errors that abort loading a corpus word list.
///
/// Individual bad records never produce a `CorpusError`; they are skipped
/// and reported through [`RecordError`].
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The word list could not be read.
    #[error("failed to read word list {path}: {source}")]
    Read {
        /// Path of the word list.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The word list is JSON but not an array of records.
    #[error("failed to parse word list {path}: {source}")]
    Parse {
        /// Path of the word list.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Result type alias using [`CorpusError`].
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Errors raised while loading a previously built index.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The index file could not be read.
    #[error("failed to read index {path}: {source}")]
    Read {
        /// Path of the index file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The index file is not a root-keyed index.
    #[error("failed to parse index {path}: {source}")]
    Parse {
        /// Path of the index file.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Result type alias using [`IndexError`].
pub type IndexResult<T> = Result<T, IndexError>;

/// Why a single word-list record was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The line did not match `<word> (<count>): <refs>`.
    #[error("line does not match '<word> (<count>): <refs>'")]
    Malformed,

    /// The record has no word text after normalization.
    #[error("record has an empty word")]
    EmptyWord,

    /// The count is missing, zero, or not a number.
    #[error("invalid occurrence count '{0}'")]
    InvalidCount(String),

    /// A JSON record is not an object with the expected fields.
    #[error("unexpected record shape: {0}")]
    Shape(String),
}
