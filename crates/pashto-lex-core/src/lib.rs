//! Core library for pashto-lex.
//!
//! Root inference and grammatical indexing for Pashto corpora: given the
//! distinct word forms of a corpus with their counts and verse references,
//! infer each form's root, classify it, and file it in a root-keyed index
//! that supports reverse lookup.
//!
//! # Modules
//!
//! - [`normalize`] - Orthographic normalization of every compared string
//! - [`lexicon`] - Curated verb and irregular noun/adjective tables
//! - [`engine`] - Root inference rules
//! - [`index`] - Index building
//! - [`search`] - Reverse lookup over a built index
//! - [`conjugation`] - Verb paradigm generation
//! - [`declension`] - Noun/adjective declension tables
//! - [`translit`] - Approximate romanization
//! - [`corpus`] - Word-list loading
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use pashto_lex_core::{Engine, EngineOptions, Lexicon, Vocabulary, WordList, build_index};
//!
//! let lexicon = Lexicon::builtin().expect("built-in lexicon is valid");
//! let engine = Engine::new(lexicon, EngineOptions::default());
//! let words = WordList::load("words.txt".into()).expect("readable word list");
//! let vocabulary = Vocabulary::from_forms(words.forms());
//! let build = build_index(&engine, words.forms(), &vocabulary);
//!
//! println!("{} roots", build.report.roots);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod conjugation;
pub mod corpus;
pub mod declension;
pub mod engine;
pub mod error;
pub mod index;
pub mod lexicon;
pub mod normalize;
pub mod rules;
pub mod search;
pub mod translit;
pub mod vocabulary;

pub use config::{Config, ConfigLoader, ConfigSource, ConfigSources, LogLevel, SourceKind};
pub use conjugation::{ConjugationTable, conjugate};
pub use corpus::{LoadReport, VerseRef, WordForm, WordList, WordListFormat};
pub use declension::{Declension, DeclensionPattern, decline};
pub use engine::{Category, Engine, EngineOptions, Inference, Interpretation};
pub use error::{
    ConfigError, ConfigResult, CorpusError, CorpusResult, IndexError, IndexResult, LexiconError,
    LexiconResult, RecordError,
};
pub use index::{GrammarIndex, IndexBuild, IndexBuilder, IndexReport, build_index};
pub use lexicon::Lexicon;
pub use normalize::{normalize, search_key};
pub use search::{SearchHit, SearchIndex};
pub use translit::transliterate;
pub use vocabulary::Vocabulary;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// How many times the input limit a built index may be.
///
/// An index repeats each verse once per reading, indented, so it is always
/// larger than the word list it came from.
pub const INDEX_SIZE_FACTOR: usize = 16;
