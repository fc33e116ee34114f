//! The root-keyed grammatical index.
//!
//! Each root owns one [`Identity`] per grammatical category. An identity
//! groups its surface forms into buckets keyed by form description, and
//! every bucket entry carries the form's count, verses and transliteration.
//!
//! A surface form filed under several roots is expected; the builder keeps
//! every reading.

use std::collections::{BTreeMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::corpus::{VerseRef, WordForm, merge_verses};
use crate::engine::{BASE_FORM, Category, Engine, Interpretation, NO_PATTERN};
use crate::translit::transliterate;
use crate::vocabulary::Vocabulary;

/// One surface form inside a form bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Occurrence {
    /// Surface form.
    pub form: String,
    /// Total occurrences.
    pub count: u64,
    /// Distinct verses, sorted by book, chapter and verse.
    #[schemars(with = "Vec<String>")]
    pub verses: Vec<VerseRef>,
    /// Transliteration of the form.
    pub translit: String,
}

/// One grammatical reading of a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Identity {
    /// Grammatical category.
    #[serde(rename = "type")]
    pub category: Category,
    /// Pattern label.
    pub pattern_info: String,
    /// Transliteration of the root.
    pub translit: String,
    /// Form description to the forms filed under it.
    pub forms: BTreeMap<String, Vec<Occurrence>>,
}

impl Identity {
    /// Every occurrence of this identity, bucket by bucket.
    pub fn occurrences(&self) -> impl Iterator<Item = (&str, &Occurrence)> {
        self.forms
            .iter()
            .flat_map(|(desc, occs)| occs.iter().map(move |o| (desc.as_str(), o)))
    }
}

/// All identities of one root, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RootEntry {
    /// Identities, at most one per category.
    pub identities: Vec<Identity>,
}

impl RootEntry {
    /// The identity of `category`, if present.
    pub fn identity(&self, category: Category) -> Option<&Identity> {
        self.identities.iter().find(|i| i.category == category)
    }
}

/// Root to entry. Keys are sorted, so serialization is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct GrammarIndex(pub BTreeMap<String, RootEntry>);

impl GrammarIndex {
    /// Entry for a root.
    pub fn get(&self, root: &str) -> Option<&RootEntry> {
        self.0.get(root)
    }

    /// Roots and entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RootEntry)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of roots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the index has no roots.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Counters collected while building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IndexReport {
    /// Word forms processed.
    pub words: usize,
    /// Distinct roots.
    pub roots: usize,
    /// Identities across all roots.
    pub identities: usize,
    /// Occurrence entries across all buckets.
    pub occurrences: usize,
    /// Words that only received a base-form fallback reading.
    pub fallback_words: usize,
    /// Words filed under more than one root.
    pub ambiguous_forms: usize,
    /// Roots with more than one identity.
    pub homonym_roots: usize,
    /// Stem matches dropped by the longest-match rule.
    pub shadowed_stem_matches: usize,
}

/// Result of [`IndexBuilder::finish`].
#[derive(Debug, Clone)]
pub struct IndexBuild {
    /// The index.
    pub index: GrammarIndex,
    /// Build counters.
    pub report: IndexReport,
}

/// Folds word forms into a [`GrammarIndex`] one at a time.
#[derive(Debug)]
pub struct IndexBuilder<'a> {
    engine: &'a Engine,
    vocabulary: &'a Vocabulary,
    roots: BTreeMap<String, RootEntry>,
    report: IndexReport,
}

impl<'a> IndexBuilder<'a> {
    /// Start an empty index.
    pub fn new(engine: &'a Engine, vocabulary: &'a Vocabulary) -> Self {
        Self {
            engine,
            vocabulary,
            roots: BTreeMap::new(),
            report: IndexReport::default(),
        }
    }

    /// Infer and file one word form.
    pub fn add(&mut self, word: &WordForm) {
        let analysis = self.engine.analyze(&word.text, self.vocabulary);
        let mut interpretations = analysis.interpretations;
        if interpretations.is_empty() {
            interpretations.push(Interpretation::base_form(&word.text, Category::Unknown));
        }

        self.report.words += 1;
        self.report.shadowed_stem_matches += analysis.shadowed.len();
        if is_fallback(&interpretations, &word.text) {
            self.report.fallback_words += 1;
        }
        let distinct_roots: HashSet<&str> =
            interpretations.iter().map(|i| i.root.as_str()).collect();
        if distinct_roots.len() > 1 {
            self.report.ambiguous_forms += 1;
        }

        let mut verses = word.verses.clone();
        verses.sort();
        for interp in &interpretations {
            let identity = self.identity_mut(interp);
            let bucket = identity.forms.entry(interp.description.clone()).or_default();
            match bucket.iter_mut().find(|o| o.form == word.text) {
                Some(existing) => {
                    existing.count = existing.count.saturating_add(word.count);
                    merge_verses(&mut existing.verses, verses.iter().cloned());
                    existing.verses.sort();
                }
                None => bucket.push(Occurrence {
                    form: word.text.clone(),
                    count: word.count,
                    verses: verses.clone(),
                    translit: transliterate(&word.text),
                }),
            }
        }
    }

    /// Finish building and compute the remaining counters.
    pub fn finish(self) -> IndexBuild {
        let mut report = self.report;
        report.roots = self.roots.len();
        for entry in self.roots.values() {
            report.identities += entry.identities.len();
            if entry.identities.len() > 1 {
                report.homonym_roots += 1;
            }
            report.occurrences += entry
                .identities
                .iter()
                .map(|i| i.forms.values().map(Vec::len).sum::<usize>())
                .sum::<usize>();
        }
        tracing::debug!(
            words = report.words,
            roots = report.roots,
            identities = report.identities,
            "index built"
        );
        IndexBuild {
            index: GrammarIndex(self.roots),
            report,
        }
    }

    fn identity_mut(&mut self, interp: &Interpretation) -> &mut Identity {
        let lexicon = self.engine.lexicon();
        let entry = self.roots.entry(interp.root.clone()).or_default();
        let pos = match entry
            .identities
            .iter()
            .position(|i| i.category == interp.category)
        {
            Some(pos) => pos,
            None => {
                let (pattern, translit) = match interp.category {
                    Category::Verb => lexicon
                        .verb(&interp.root)
                        .map(|e| (e.pattern_info.clone(), e.translit.clone())),
                    Category::NounAdj => lexicon
                        .noun(&interp.root)
                        .map(|e| (e.pattern_info.clone(), e.translit.clone())),
                    Category::Unknown => None,
                }
                .unwrap_or_else(|| (interp.pattern.clone(), None));
                entry.identities.push(Identity {
                    category: interp.category,
                    pattern_info: pattern,
                    translit: translit.unwrap_or_else(|| transliterate(&interp.root)),
                    forms: BTreeMap::new(),
                });
                entry.identities.len() - 1
            }
        };
        &mut entry.identities[pos]
    }
}

fn is_fallback(interpretations: &[Interpretation], word: &str) -> bool {
    matches!(
        interpretations,
        [only] if only.root == word
            && only.description == BASE_FORM
            && only.pattern == NO_PATTERN
    )
}

/// Build an index over `words` in one call.
#[tracing::instrument(skip_all, fields(words = words.len()))]
pub fn build_index(engine: &Engine, words: &[WordForm], vocabulary: &Vocabulary) -> IndexBuild {
    let mut builder = IndexBuilder::new(engine, vocabulary);
    for word in words {
        builder.add(word);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineOptions;
    use crate::lexicon::Lexicon;

    fn engine() -> Engine {
        Engine::new(Lexicon::builtin().unwrap(), EngineOptions::default())
    }

    fn verse(s: &str) -> VerseRef {
        s.parse().unwrap()
    }

    fn build(words: &[WordForm]) -> IndexBuild {
        let engine = engine();
        let vocab = Vocabulary::from_forms(words);
        build_index(&engine, words, &vocab)
    }

    #[test]
    fn every_word_is_filed() {
        let words = vec![
            WordForm::new("وینم", 2, [verse("Matthew 5:8")]),
            WordForm::new("پښتانه", 1, []),
            WordForm::new("ښځه", 4, []),
            WordForm::new("ښځې", 3, []),
            WordForm::new("نامعلوم", 1, []),
        ];
        let build = build(&words);
        for word in &words {
            let found = build.index.iter().any(|(_, entry)| {
                entry
                    .identities
                    .iter()
                    .any(|i| i.occurrences().any(|(_, o)| o.form == word.text))
            });
            assert!(found, "{} was dropped", word.text);
        }
        assert_eq!(build.report.words, words.len());
    }

    #[test]
    fn words_outside_the_vocabulary_still_get_filed() {
        let engine = engine();
        let words = vec![WordForm::new("نامعلوم", 1, [])];
        let build = build_index(&engine, &words, &Vocabulary::default());
        let entry = build.index.get("نامعلوم").unwrap();
        assert_eq!(entry.identities[0].category, Category::Unknown);
        assert_eq!(build.report.fallback_words, 1);
    }

    #[test]
    fn homonym_root_has_two_identities() {
        let words = vec![WordForm::new("رسول", 5, [verse("Acts 1:1")])];
        let build = build(&words);
        let entry = build.index.get("رسول").unwrap();
        let verb = entry.identity(Category::Verb).unwrap();
        let noun = entry.identity(Category::NounAdj).unwrap();
        assert!(verb.forms.contains_key("Infinitive Root"));
        assert!(noun.forms.contains_key("Base Form"));
        assert_eq!(verb.translit, "rasawúl");
        assert_eq!(build.report.homonym_roots, 1);
    }

    #[test]
    fn same_category_readings_share_an_identity() {
        let words = vec![
            WordForm::new("لیدل", 1, []),
            WordForm::new("وینم", 1, []),
            WordForm::new("لیدلم", 1, []),
        ];
        let build = build(&words);
        let entry = build.index.get("لیدل").unwrap();
        let verb = entry.identity(Category::Verb).unwrap();
        assert_eq!(verb.pattern_info, "Simple Verb (to see)");
        let buckets: Vec<&str> = verb.forms.keys().map(String::as_str).collect();
        assert!(buckets.contains(&"Infinitive Root"));
        assert!(buckets.contains(&"Derived from stem 'وین'"));
        assert!(buckets.contains(&"Derived from stem 'لیدل'"));
    }

    #[test]
    fn irregular_form_is_filed_under_its_lemma() {
        let words = vec![WordForm::new("پښتانه", 2, [])];
        let build = build(&words);
        let noun = build
            .index
            .get("پښتون")
            .and_then(|e| e.identity(Category::NounAdj))
            .unwrap();
        let occs = &noun.forms["Inflected form of 'پښتون'"];
        assert_eq!(occs[0].form, "پښتانه");
        assert_eq!(noun.translit, "puxtoon");
        assert!(build.index.get("پښتانه").is_none());
    }

    #[test]
    fn repeated_forms_merge_counts_and_verses() {
        let engine = engine();
        let vocab = Vocabulary::from_words(["وینم"]);
        let mut builder = IndexBuilder::new(&engine, &vocab);
        builder.add(&WordForm::new(
            "وینم",
            2,
            [verse("Matthew 5:8"), verse("John 1:18")],
        ));
        builder.add(&WordForm::new(
            "وینم",
            3,
            [verse("John 1:18"), verse("Acts 2:1")],
        ));
        let build = builder.finish();

        let verb = build
            .index
            .get("لیدل")
            .and_then(|e| e.identity(Category::Verb))
            .unwrap();
        let occs = &verb.forms["Derived from stem 'وین'"];
        assert_eq!(occs.len(), 1);
        assert_eq!(occs[0].count, 5);
        let verses: Vec<String> = occs[0].verses.iter().map(ToString::to_string).collect();
        assert_eq!(verses, vec!["Acts 2:1", "John 1:18", "Matthew 5:8"]);
    }

    #[test]
    fn pattern_falls_back_to_the_interpretation() {
        let words = vec![WordForm::new("ښځه", 1, []), WordForm::new("ښځې", 1, [])];
        let build = build(&words);
        let noun = build
            .index
            .get("ښځه")
            .and_then(|e| e.identity(Category::NounAdj))
            .unwrap();
        assert_eq!(noun.pattern_info, "Pattern 1: Basic");
        assert!(noun.forms.contains_key("1st Inflection (Fem)"));
    }

    #[test]
    fn serialized_shape_uses_type_key() {
        let build = build(&[WordForm::new("پښتون", 1, [verse("Luke 1:1")])]);
        let json = serde_json::to_value(&build.index).unwrap();
        let identity = &json["پښتون"]["identities"][0];
        assert_eq!(identity["type"], "Noun/Adj");
        assert_eq!(identity["forms"]["Base Form"][0]["verses"][0], "Luke 1:1");

        let back: GrammarIndex = serde_json::from_value(json).unwrap();
        assert_eq!(back, build.index);
    }

    #[test]
    fn building_twice_is_identical() {
        let words = vec![
            WordForm::new("رسول", 1, []),
            WordForm::new("ورسوم", 1, []),
            WordForm::new("کورو", 1, []),
            WordForm::new("کور", 1, []),
        ];
        let a = serde_json::to_string(&build(&words).index).unwrap();
        let b = serde_json::to_string(&build(&words).index).unwrap();
        assert_eq!(a, b);
    }
}
