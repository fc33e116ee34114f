//! The closed set of corpus word forms.

use std::collections::HashSet;

use crate::corpus::WordForm;
use crate::normalize::normalize;

/// Every distinct normalized word form seen in the corpus.
///
/// Suffix rules only propose roots that are themselves members, which keeps
/// the heuristics from inventing lemmas the corpus never attests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary(HashSet<String>);

impl Vocabulary {
    /// Build from arbitrary strings, normalizing each.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(words.into_iter().map(|w| normalize(w.as_ref())).collect())
    }

    /// Build from loaded word forms (already normalized).
    pub fn from_forms<'a>(forms: impl IntoIterator<Item = &'a WordForm>) -> Self {
        Self(forms.into_iter().map(|f| f.text.clone()).collect())
    }

    /// Membership test on a normalized form.
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    /// Number of distinct forms.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for Vocabulary {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self::from_words(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_are_normalized() {
        let vocab = Vocabulary::from_words(["وينم", "كور"]);
        assert!(vocab.contains("وینم"));
        assert!(vocab.contains("کور"));
        assert!(!vocab.contains("وينم"));
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn from_forms_uses_text() {
        let forms = [WordForm::new("کور", 1, [])];
        let vocab = Vocabulary::from_forms(&forms);
        assert!(vocab.contains("کور"));
    }

    #[test]
    fn collects_from_str_iterator() {
        let vocab: Vocabulary = "كور کورونه".split(' ').collect();
        assert!(vocab.contains("کور"));
        assert!(vocab.contains("کورونه"));
    }
}
