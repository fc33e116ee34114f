//! Reverse lookup over a built index.

use std::collections::HashMap;

use camino::Utf8Path;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::corpus::VerseRef;
use crate::engine::Category;
use crate::error::{IndexError, IndexResult};
use crate::index::{GrammarIndex, Identity};
use crate::normalize::search_key;

/// One place a searched form is filed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchHit {
    /// Root the form is filed under.
    pub root: String,
    /// Category of the identity.
    pub category: Category,
    /// Pattern label of the identity.
    pub pattern: String,
    /// Form description of the bucket.
    pub description: String,
    /// The matched form.
    pub form: String,
    /// Transliteration of the form.
    pub translit: String,
    /// Verses the form occurs in.
    #[schemars(with = "Vec<String>")]
    pub verses: Vec<VerseRef>,
    /// Occurrence count.
    pub count: u64,
}

/// A form filed under a root, as listed by [`SearchIndex::siblings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Sibling {
    /// Category of the identity.
    pub category: Category,
    /// Form description.
    pub description: String,
    /// Surface form.
    pub form: String,
    /// Occurrence count.
    pub count: u64,
}

/// A [`GrammarIndex`] with a form-to-roots table.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    index: GrammarIndex,
    by_form: HashMap<String, Vec<String>>,
}

impl SearchIndex {
    /// Build the reverse table.
    pub fn new(index: GrammarIndex) -> Self {
        let mut by_form: HashMap<String, Vec<String>> = HashMap::new();
        for (root, entry) in index.iter() {
            for identity in &entry.identities {
                for (_, occ) in identity.occurrences() {
                    let roots = by_form.entry(occ.form.clone()).or_default();
                    if !roots.iter().any(|r| r == root) {
                        roots.push(root.to_string());
                    }
                }
            }
        }
        Self { index, by_form }
    }

    /// Load an index previously written as JSON.
    #[tracing::instrument]
    pub fn load(path: &Utf8Path) -> IndexResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| IndexError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let index: GrammarIndex =
            serde_json::from_str(&text).map_err(|source| IndexError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(roots = index.len(), "index loaded");
        Ok(Self::new(index))
    }

    /// The underlying index.
    pub const fn index(&self) -> &GrammarIndex {
        &self.index
    }

    /// Roots a form is filed under. Several roots are normal.
    pub fn roots_of(&self, word: &str) -> &[String] {
        self.by_form
            .get(&search_key(word))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every (root, identity, bucket) holding `word`. Empty on a miss.
    pub fn search(&self, word: &str) -> Vec<SearchHit> {
        let key = search_key(word);
        let mut hits = Vec::new();
        for root in self.roots_of(&key) {
            let Some(entry) = self.index.get(root) else {
                continue;
            };
            for identity in &entry.identities {
                for (description, occ) in identity.occurrences() {
                    if occ.form != key {
                        continue;
                    }
                    hits.push(SearchHit {
                        root: root.clone(),
                        category: display_category(identity),
                        pattern: identity.pattern_info.clone(),
                        description: description.to_string(),
                        form: occ.form.clone(),
                        translit: occ.translit.clone(),
                        verses: occ.verses.clone(),
                        count: occ.count,
                    });
                }
            }
        }
        hits
    }

    /// Every form filed under `root`, identity by identity.
    pub fn siblings(&self, root: &str) -> Vec<Sibling> {
        let Some(entry) = self.index.get(&search_key(root)) else {
            return Vec::new();
        };
        entry
            .identities
            .iter()
            .flat_map(|identity| {
                identity.occurrences().map(move |(description, occ)| Sibling {
                    category: identity.category,
                    description: description.to_string(),
                    form: occ.form.clone(),
                    count: occ.count,
                })
            })
            .collect()
    }
}

/// Unknown identities take their category from the pattern label when it
/// names one.
fn display_category(identity: &Identity) -> Category {
    if identity.category != Category::Unknown {
        return identity.category;
    }
    let pattern = &identity.pattern_info;
    if pattern.contains("Verb") {
        Category::Verb
    } else if pattern.contains("Noun") || pattern.contains("Adj") {
        Category::NounAdj
    } else {
        Category::Unknown
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::corpus::WordForm;
    use crate::engine::{Engine, EngineOptions};
    use crate::index::{Occurrence, RootEntry, build_index};
    use crate::lexicon::Lexicon;
    use crate::vocabulary::Vocabulary;

    fn search_index(words: &[WordForm]) -> SearchIndex {
        let engine = Engine::new(Lexicon::builtin().unwrap(), EngineOptions::default());
        let vocab = Vocabulary::from_forms(words);
        SearchIndex::new(build_index(&engine, words, &vocab).index)
    }

    #[test]
    fn irregular_form_resolves_to_lemma() {
        let index = search_index(&[
            WordForm::new("پښتون", 3, []),
            WordForm::new("پښتانه", 2, ["Luke 2:1".parse().unwrap()]),
        ]);
        let hits = index.search("پښتانه");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].root, "پښتون");
        assert_eq!(hits[0].category, Category::NounAdj);
        assert_eq!(hits[0].description, "Inflected form of 'پښتون'");
        assert_eq!(hits[0].verses[0].to_string(), "Luke 2:1");

        let siblings: Vec<String> = index
            .siblings("پښتون")
            .into_iter()
            .map(|s| s.form)
            .collect();
        assert!(siblings.contains(&"پښتون".to_string()));
        assert!(siblings.contains(&"پښتانه".to_string()));
    }

    #[test]
    fn queries_are_normalized() {
        let index = search_index(&[WordForm::new("لیدل", 1, [])]);
        assert!(!index.search("ليدل").is_empty());
    }

    #[test]
    fn homonym_returns_every_reading() {
        let index = search_index(&[WordForm::new("رسول", 1, [])]);
        let categories: Vec<Category> = index.search("رسول").iter().map(|h| h.category).collect();
        assert!(categories.contains(&Category::Verb));
        assert!(categories.contains(&Category::NounAdj));
        // پوهول lists رسول as a related root, so the form sits under both.
        assert_eq!(
            index.roots_of("رسول").to_vec(),
            vec!["رسول".to_string(), "پوهول".to_string()]
        );
    }

    #[test]
    fn miss_is_empty() {
        let index = search_index(&[WordForm::new("کور", 1, [])]);
        assert!(index.search("نشته").is_empty());
        assert!(index.siblings("نشته").is_empty());
    }

    #[test]
    fn compound_query_uses_underscores() {
        let index = search_index(&[WordForm::new("د_کور", 1, [])]);
        assert_eq!(index.search("د کور").len(), 1);
    }

    #[test]
    fn unknown_identity_category_comes_from_pattern() {
        let mut forms = BTreeMap::new();
        forms.insert(
            "Base Form".to_string(),
            vec![Occurrence {
                form: "ګډ".to_string(),
                count: 1,
                verses: Vec::new(),
                translit: "gd".to_string(),
            }],
        );
        let identity = Identity {
            category: Category::Unknown,
            pattern_info: "Regular Noun/Adj".to_string(),
            translit: "gd".to_string(),
            forms,
        };
        let mut roots = BTreeMap::new();
        roots.insert(
            "ګډ".to_string(),
            RootEntry {
                identities: vec![identity],
            },
        );
        let index = SearchIndex::new(GrammarIndex(roots));
        assert_eq!(index.search("ګډ")[0].category, Category::NounAdj);
    }

    #[test]
    fn load_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("index.json")).unwrap();
        let built = search_index(&[WordForm::new("وینم", 1, [])]);
        std::fs::write(&path, serde_json::to_string(built.index()).unwrap()).unwrap();

        let loaded = SearchIndex::load(&path).unwrap();
        assert_eq!(loaded.index(), built.index());
        assert_eq!(loaded.search("وینم")[0].root, "لیدل");
    }

    #[test]
    fn load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("index.json")).unwrap();
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            SearchIndex::load(&path),
            Err(IndexError::Parse { .. })
        ));
    }
}
