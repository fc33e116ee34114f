//! Approximate Latin transliteration.
//!
//! A greedy, leftmost-longest substitution over a fixed letter table. Two
//! letter sequences such as `وا` win over their single-letter prefixes.
//! The output is meant for annotating index entries and is never used as a
//! lookup key.

use std::sync::LazyLock;

use aho_corasick::{AhoCorasick, MatchKind};

/// Substitution table: (Pashto sequence, Latin rendering).
pub const TRANSLIT_TABLE: &[(&str, &str)] = &[
    // Digraphs first for readability; match order comes from MatchKind.
    ("وا", "waa"),
    ("وي", "wee"),
    ("وی", "wee"),
    ("وو", "oo"),
    ("ا", "aa"),
    ("آ", "aa"),
    ("ب", "b"),
    ("پ", "p"),
    ("ت", "t"),
    ("ټ", "T"),
    ("ث", "s"),
    ("ج", "j"),
    ("چ", "ch"),
    ("ح", "h"),
    ("خ", "kh"),
    ("څ", "ts"),
    ("ځ", "dz"),
    ("د", "d"),
    ("ډ", "D"),
    ("ذ", "z"),
    ("ر", "r"),
    ("ړ", "R"),
    ("ز", "z"),
    ("ژ", "jz"),
    ("ږ", "G"),
    ("س", "s"),
    ("ش", "sh"),
    ("ښ", "x"),
    ("ص", "s"),
    ("ض", "z"),
    ("ط", "t"),
    ("ظ", "z"),
    ("ع", "'"),
    ("غ", "gh"),
    ("ف", "f"),
    ("ق", "q"),
    ("ک", "k"),
    ("ك", "k"),
    ("ګ", "g"),
    ("گ", "g"),
    ("ل", "l"),
    ("م", "m"),
    ("ن", "n"),
    ("ڼ", "N"),
    ("و", "w"),
    ("ه", "h"),
    ("ی", "y"),
    ("ي", "ee"),
    ("ې", "e"),
    ("ۍ", "uy"),
    ("ئ", "ey"),
];

static MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(TRANSLIT_TABLE.iter().map(|(from, _)| *from))
        .expect("valid transliteration table")
});

static REPLACEMENTS: LazyLock<Vec<&'static str>> =
    LazyLock::new(|| TRANSLIT_TABLE.iter().map(|(_, to)| *to).collect());

/// Transliterate Pashto script into an approximate Latin form.
///
/// Characters outside the table (digits, punctuation, `_`, Latin) pass
/// through unchanged.
pub fn transliterate(text: &str) -> String {
    MATCHER.replace_all(text, REPLACEMENTS.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letters() {
        assert_eq!(transliterate("پښتون"), "pxtwn");
        assert_eq!(transliterate("کور"), "kwr");
    }

    #[test]
    fn digraphs_win_over_prefixes() {
        assert_eq!(transliterate("وا"), "waa");
        assert_eq!(transliterate("وو"), "oo");
        assert_eq!(transliterate("لیدلو"), "lydlw");
        assert_eq!(transliterate("ووین"), "ooyn");
    }

    #[test]
    fn unmapped_pass_through() {
        assert_eq!(transliterate("abc_1"), "abc_1");
        assert_eq!(transliterate(""), "");
        assert_eq!(transliterate("د_کور"), "d_kwr");
    }

    #[test]
    fn table_has_no_duplicate_sources() {
        let mut seen = std::collections::HashSet::new();
        for (from, _) in TRANSLIT_TABLE {
            assert!(seen.insert(*from), "duplicate entry {from}");
        }
    }
}
