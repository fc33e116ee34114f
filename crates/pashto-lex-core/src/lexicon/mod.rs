//! Curated exception lexicons.
//!
//! Two tables drive inference: a verb lexicon keyed by infinitive and an
//! irregular noun/adjective lexicon keyed by lemma. Both are plain JSON
//! objects. Keys and every Pashto value are normalized on load, so the
//! files may use any yeh/kaf variant.
//!
//! When no file is configured for a table, the built-in table compiled into
//! the crate is used.

mod nouns;
mod verbs;

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use nouns::NounEntry;
pub use verbs::{VerbEntry, role};

use crate::error::{LexiconError, LexiconResult};
use crate::normalize::normalize;

const BUILTIN_VERBS: &str = include_str!("../../data/verbs.json");
const BUILTIN_NOUNS: &str = include_str!("../../data/nouns.json");
const BUILTIN_ORIGIN: &str = "<built-in>";

/// A verb stem that is a strict prefix of another verb's stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StemConflict {
    /// The shorter, masked stem.
    pub stem: String,
    /// Verb owning the masked stem.
    pub root: String,
    /// The longer stem that starts with `stem`.
    pub masked_by: String,
    /// Verb owning the longer stem.
    pub masked_by_root: String,
}

/// Counts describing a loaded lexicon.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LexiconSummary {
    /// Number of verb entries.
    pub verbs: usize,
    /// Number of irregular noun/adjective entries.
    pub nouns: usize,
    /// Distinct (stem, verb) pairs in the stem table.
    pub stems: usize,
    /// Listed plus generated irregular noun forms.
    pub noun_forms: usize,
    /// Stem masking conflicts.
    pub conflicts: Vec<StemConflict>,
}

/// Both lexicon tables, normalized and validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    verbs: BTreeMap<String, VerbEntry>,
    nouns: BTreeMap<String, NounEntry>,
}

impl Lexicon {
    /// Build a lexicon from in-memory tables.
    ///
    /// Keys and values are normalized. Two keys that normalize to the same
    /// text keep the later entry.
    pub fn new(
        verbs: impl IntoIterator<Item = (String, VerbEntry)>,
        nouns: impl IntoIterator<Item = (String, NounEntry)>,
    ) -> LexiconResult<Self> {
        let mut lexicon = Self::default();
        for (root, entry) in verbs {
            let root = normalize(&root);
            let entry = entry.normalized();
            entry.validate(&root)?;
            if lexicon.verbs.insert(root.clone(), entry).is_some() {
                tracing::warn!(root = %root, "duplicate verb entry after normalization; keeping the last");
            }
        }
        for (root, entry) in nouns {
            let root = normalize(&root);
            let entry = entry.normalized();
            entry.validate(&root)?;
            if lexicon.nouns.insert(root.clone(), entry).is_some() {
                tracing::warn!(root = %root, "duplicate noun entry after normalization; keeping the last");
            }
        }
        Ok(lexicon)
    }

    /// The lexicon compiled into the crate.
    pub fn builtin() -> LexiconResult<Self> {
        let origin = Utf8Path::new(BUILTIN_ORIGIN);
        Self::new(
            parse_table::<VerbEntry>(BUILTIN_VERBS, origin)?,
            parse_table::<NounEntry>(BUILTIN_NOUNS, origin)?,
        )
    }

    /// Load lexicon files, using the built-in table for any path not given.
    #[tracing::instrument]
    pub fn load(verbs: Option<&Utf8Path>, nouns: Option<&Utf8Path>) -> LexiconResult<Self> {
        let origin = Utf8Path::new(BUILTIN_ORIGIN);
        let verb_table = match verbs {
            Some(path) => parse_table::<VerbEntry>(&read_file(path)?, path)?,
            None => parse_table::<VerbEntry>(BUILTIN_VERBS, origin)?,
        };
        let noun_table = match nouns {
            Some(path) => parse_table::<NounEntry>(&read_file(path)?, path)?,
            None => parse_table::<NounEntry>(BUILTIN_NOUNS, origin)?,
        };
        let lexicon = Self::new(verb_table, noun_table)?;
        tracing::debug!(
            verbs = lexicon.verbs.len(),
            nouns = lexicon.nouns.len(),
            "lexicon loaded"
        );
        Ok(lexicon)
    }

    /// Verb entry for an infinitive (already normalized).
    pub fn verb(&self, root: &str) -> Option<&VerbEntry> {
        self.verbs.get(root)
    }

    /// Irregular noun/adjective entry for a lemma (already normalized).
    pub fn noun(&self, root: &str) -> Option<&NounEntry> {
        self.nouns.get(root)
    }

    /// Verb entries in key order.
    pub fn verbs(&self) -> impl Iterator<Item = (&str, &VerbEntry)> {
        self.verbs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Noun entries in key order.
    pub fn nouns(&self) -> impl Iterator<Item = (&str, &NounEntry)> {
        self.nouns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All (stem, root) pairs, longest stem first, then by stem and root.
    pub fn stem_table(&self) -> Vec<(&str, &str)> {
        let mut table: Vec<(&str, &str)> = self
            .verbs
            .iter()
            .flat_map(|(root, entry)| {
                entry
                    .match_forms()
                    .into_iter()
                    .map(move |stem| (stem, root.as_str()))
            })
            .collect();
        table.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(b.0))
                .then_with(|| a.1.cmp(b.1))
        });
        table
    }

    /// Stems that are a strict prefix of another verb's stem.
    ///
    /// Such stems still match words the longer stem does not cover; they
    /// only lose the race for words that start with the longer stem.
    pub fn stem_conflicts(&self) -> Vec<StemConflict> {
        let table = self.stem_table();
        let mut conflicts = Vec::new();
        for &(short, short_root) in &table {
            for &(long, long_root) in &table {
                if long_root != short_root && long.len() > short.len() && long.starts_with(short) {
                    conflicts.push(StemConflict {
                        stem: short.to_string(),
                        root: short_root.to_string(),
                        masked_by: long.to_string(),
                        masked_by_root: long_root.to_string(),
                    });
                }
            }
        }
        conflicts
    }

    /// Counts and conflicts for reporting.
    pub fn summary(&self) -> LexiconSummary {
        LexiconSummary {
            verbs: self.verbs.len(),
            nouns: self.nouns.len(),
            stems: self.stem_table().len(),
            noun_forms: self
                .nouns
                .iter()
                .map(|(root, entry)| entry.all_forms(root).len())
                .sum(),
            conflicts: self.stem_conflicts(),
        }
    }
}

fn read_file(path: &Utf8Path) -> LexiconResult<String> {
    std::fs::read_to_string(path.as_std_path()).map_err(|source| LexiconError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_table<T: DeserializeOwned>(
    json: &str,
    origin: &Utf8Path,
) -> LexiconResult<BTreeMap<String, T>> {
    serde_json::from_str(json).map_err(|source| LexiconError::Parse {
        path: Utf8PathBuf::from(origin),
        source,
    })
}
