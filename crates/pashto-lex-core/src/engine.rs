//! Root inference.
//!
//! [`Engine::infer`] returns every plausible reading of a surface form, not
//! a single best guess. Rules run in a fixed precedence order:
//!
//! 1. the form is a verb infinitive (plus its compound base, if any);
//! 2. the form starts with a verb stem or root, longest first;
//! 3. the form is listed as a related root of a verb;
//! 4. the form is an irregular noun/adjective lemma or one of its forms;
//! 5. suffix rules, only when nothing above matched;
//! 6. an infinitive that the corpus also attests gets a noun reading;
//! 7. the form itself as a base form, when nothing else matched.
//!
//! Readings are deduplicated on (root, category, description), keeping the
//! first.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::normalize::normalize;
use crate::rules::SUFFIX_RULES;
use crate::vocabulary::Vocabulary;

/// Pattern label used when no lexicon entry or rule supplies one.
pub const NO_PATTERN: &str = "N/A";

/// Description of a form that is its own root.
pub const BASE_FORM: &str = "Base Form";

/// Description of a verb infinitive.
pub const INFINITIVE_ROOT: &str = "Infinitive Root";

/// Grammatical category of an identity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Category {
    /// Verb.
    #[serde(rename = "Verb", alias = "verb")]
    Verb,
    /// Noun or adjective.
    #[serde(rename = "Noun/Adj", alias = "noun_adj", alias = "noun")]
    NounAdj,
    /// Not classified.
    #[default]
    #[serde(rename = "Unknown", alias = "unknown")]
    Unknown,
}

impl Category {
    /// Returns the label used in the index.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Verb => "Verb",
            Self::NounAdj => "Noun/Adj",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reading of a surface form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Interpretation {
    /// Root the form is filed under.
    pub root: String,
    /// Category of the root's identity.
    pub category: Category,
    /// Pattern label.
    pub pattern: String,
    /// How the form relates to the root.
    pub description: String,
}

impl Interpretation {
    fn new(
        root: impl Into<String>,
        category: Category,
        pattern: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            category,
            pattern: pattern.into(),
            description: description.into(),
        }
    }

    /// The fallback reading: the form is its own root.
    pub fn base_form(word: &str, category: Category) -> Self {
        Self::new(word, category, NO_PATTERN, BASE_FORM)
    }
}

/// A shorter stem match discarded because a longer stem of another verb
/// also matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ShadowedStem {
    /// The discarded stem.
    pub stem: String,
    /// Verb owning the discarded stem.
    pub root: String,
    /// The longer stem that won.
    pub winner: String,
    /// Verb owning the winning stem.
    pub winner_root: String,
}

/// Full result of analysing one form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Inference {
    /// Normalized form that was analysed.
    pub word: String,
    /// Readings in precedence order.
    pub interpretations: Vec<Interpretation>,
    /// Stem matches dropped by the longest-match rule.
    pub shadowed: Vec<ShadowedStem>,
}

/// Switches for the optional inference rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EngineOptions {
    /// Give attested verb infinitives an additional Noun/Adj reading.
    pub infinitive_noun_identity: bool,
    /// Apply the regular suffix rules.
    pub suffix_rules: bool,
    /// Category of the base-form fallback reading.
    pub fallback_category: Category,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            infinitive_noun_identity: true,
            suffix_rules: true,
            fallback_category: Category::Unknown,
        }
    }
}

/// The inference engine. Holds a lexicon and the lookup tables derived
/// from it; immutable once built.
#[derive(Debug, Clone)]
pub struct Engine {
    lexicon: Lexicon,
    options: EngineOptions,
    /// (stem, root), longest stem first.
    stems: Vec<(String, String)>,
    /// Related word to the verbs listing it.
    related: HashMap<String, Vec<String>>,
    /// Irregular noun form to its lemmas.
    noun_forms: HashMap<String, Vec<String>>,
}

impl Engine {
    /// Build an engine over `lexicon`.
    pub fn new(lexicon: Lexicon, options: EngineOptions) -> Self {
        let stems = lexicon
            .stem_table()
            .into_iter()
            .map(|(stem, root)| (stem.to_string(), root.to_string()))
            .collect();

        let mut related: HashMap<String, Vec<String>> = HashMap::new();
        for (root, entry) in lexicon.verbs() {
            for word in &entry.related_roots {
                push_unique(related.entry(word.clone()).or_default(), root);
            }
        }

        let mut noun_forms: HashMap<String, Vec<String>> = HashMap::new();
        for (root, entry) in lexicon.nouns() {
            for form in entry.all_forms(root) {
                push_unique(noun_forms.entry(form).or_default(), root);
            }
        }

        for conflict in lexicon.stem_conflicts() {
            tracing::warn!(
                stem = %conflict.stem,
                root = %conflict.root,
                masked_by = %conflict.masked_by,
                masked_by_root = %conflict.masked_by_root,
                "verb stem is a prefix of another verb's stem"
            );
        }

        Self {
            lexicon,
            options,
            stems,
            related,
            noun_forms,
        }
    }

    /// The lexicon this engine was built over.
    pub const fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// The active options.
    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// All readings of `word` against `vocabulary`.
    ///
    /// Never fails; an unknown word outside the vocabulary yields an empty
    /// list.
    pub fn infer(&self, word: &str, vocabulary: &Vocabulary) -> Vec<Interpretation> {
        self.analyze(word, vocabulary).interpretations
    }

    /// Like [`infer`](Self::infer), also reporting shadowed stem matches.
    pub fn analyze(&self, word: &str, vocabulary: &Vocabulary) -> Inference {
        let word = normalize(word);
        let mut out = Vec::new();

        self.verb_root_readings(&word, &mut out);
        let shadowed = self.stem_readings(&word, &mut out);
        self.related_readings(&word, &mut out);
        self.noun_readings(&word, &mut out);

        if out.is_empty() && self.options.suffix_rules {
            for rule in SUFFIX_RULES {
                if let Some(candidate) = rule.candidate(&word)
                    && vocabulary.contains(&candidate)
                {
                    out.push(Interpretation::new(
                        candidate,
                        Category::NounAdj,
                        rule.pattern,
                        rule.description,
                    ));
                }
            }
        }

        if self.options.infinitive_noun_identity
            && self.lexicon.verb(&word).is_some()
            && vocabulary.contains(&word)
            && !out
                .iter()
                .any(|i| i.root == word && i.category == Category::NounAdj)
        {
            out.push(Interpretation::base_form(&word, Category::NounAdj));
        }

        if out.is_empty() && vocabulary.contains(&word) {
            out.push(Interpretation::base_form(
                &word,
                self.options.fallback_category,
            ));
        }

        Inference {
            interpretations: dedup(out),
            shadowed,
            word,
        }
    }

    fn verb_root_readings(&self, word: &str, out: &mut Vec<Interpretation>) {
        let Some(entry) = self.lexicon.verb(word) else {
            return;
        };
        out.push(Interpretation::new(
            word,
            Category::Verb,
            &entry.pattern_info,
            INFINITIVE_ROOT,
        ));
        if let Some(base) = &entry.base_root {
            out.push(Interpretation::new(
                base,
                Category::Verb,
                &entry.pattern_info,
                format!("Compound form based on '{base}'"),
            ));
        }
    }

    /// Longest-first stem matching. A match is dropped when a longer stem
    /// of a different verb already matched, unless its own root has matched
    /// too; the longer stem necessarily starts with the shorter one.
    fn stem_readings(&self, word: &str, out: &mut Vec<Interpretation>) -> Vec<ShadowedStem> {
        let mut accepted: Vec<(&str, &str)> = Vec::new();
        let mut shadowed = Vec::new();

        for (stem, root) in &self.stems {
            if root == word || !word.starts_with(stem.as_str()) {
                continue;
            }
            let len = stem.chars().count();
            let root_matched = accepted.iter().any(|(_, r)| *r == root.as_str());
            let winner = accepted
                .iter()
                .find(|(s, r)| *r != root.as_str() && s.chars().count() > len)
                .filter(|_| !root_matched);
            if let Some(&(winner, winner_root)) = winner {
                tracing::debug!(word, stem = %stem, root = %root, winner, "stem match shadowed");
                shadowed.push(ShadowedStem {
                    stem: stem.clone(),
                    root: root.clone(),
                    winner: winner.to_string(),
                    winner_root: winner_root.to_string(),
                });
                continue;
            }
            accepted.push((stem.as_str(), root.as_str()));
            let pattern = self
                .lexicon
                .verb(root)
                .map(|e| e.pattern_info.as_str())
                .unwrap_or(NO_PATTERN);
            out.push(Interpretation::new(
                root.as_str(),
                Category::Verb,
                pattern,
                format!("Derived from stem '{stem}'"),
            ));
        }
        shadowed
    }

    fn related_readings(&self, word: &str, out: &mut Vec<Interpretation>) {
        let Some(roots) = self.related.get(word) else {
            return;
        };
        for root in roots {
            if let Some(entry) = self.lexicon.verb(root) {
                out.push(Interpretation::new(
                    root.as_str(),
                    Category::Verb,
                    &entry.pattern_info,
                    format!("Related form of '{root}'"),
                ));
            }
        }
    }

    fn noun_readings(&self, word: &str, out: &mut Vec<Interpretation>) {
        if let Some(entry) = self.lexicon.noun(word) {
            out.push(Interpretation::new(
                word,
                Category::NounAdj,
                &entry.pattern_info,
                BASE_FORM,
            ));
        }
        if let Some(roots) = self.noun_forms.get(word) {
            for root in roots {
                if let Some(entry) = self.lexicon.noun(root) {
                    out.push(Interpretation::new(
                        root.as_str(),
                        Category::NounAdj,
                        &entry.pattern_info,
                        format!("Inflected form of '{root}'"),
                    ));
                }
            }
        }
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

fn dedup(interpretations: Vec<Interpretation>) -> Vec<Interpretation> {
    let mut out: Vec<Interpretation> = Vec::with_capacity(interpretations.len());
    for interp in interpretations {
        let seen = out.iter().any(|o| {
            o.root == interp.root
                && o.category == interp.category
                && o.description == interp.description
        });
        if !seen {
            out.push(interp);
        }
    }
    out
}
