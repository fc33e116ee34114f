//! Orthographic normalization.
//!
//! Pashto text in the wild mixes Arabic and Persian code points for the
//! same letter. Every word form, lexicon entry, and search term passes
//! through [`normalize`] before it is compared to anything else.

/// Map a single character to its canonical form.
const fn canonical(c: char) -> char {
    match c {
        // Arabic yeh, alef maksura, and yeh with hamza all collapse to Farsi yeh.
        '\u{064A}' | '\u{0649}' | '\u{0626}' => '\u{06CC}',
        // Arabic kaf to keheh.
        '\u{0643}' => '\u{06A9}',
        other => other,
    }
}

/// Canonicalize equivalent character variants.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    text.chars().map(canonical).collect()
}

/// Returns `true` if `text` is already in canonical form.
pub fn is_normalized(text: &str) -> bool {
    text.chars().all(|c| canonical(c) == c)
}

/// Normalize a user-supplied lookup term.
///
/// Multi-word phrases are stored with underscores by the tokenizer, so
/// interior whitespace is folded to `_` after trimming.
pub fn search_key(text: &str) -> String {
    normalize(text.trim())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yeh_variants_collapse() {
        assert_eq!(normalize("ي"), "ی");
        assert_eq!(normalize("ى"), "ی");
        assert_eq!(normalize("ئ"), "ی");
        assert_eq!(normalize("كور"), "کور");
    }

    #[test]
    fn unmapped_characters_pass_through() {
        assert_eq!(normalize("پښتون"), "پښتون");
        assert_eq!(normalize("abc 123"), "abc 123");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        for sample in ["وينم", "لیدلي", "كوي ئې", "ۍ ې ی", "mixed متن ي"] {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample}");
            assert!(is_normalized(&once));
        }
    }

    #[test]
    fn preserves_pashto_specific_yehs() {
        // ې and ۍ are distinct letters and must survive.
        assert_eq!(normalize("کېدل"), "کېدل");
        assert_eq!(normalize("سړۍ"), "سړۍ");
    }

    #[test]
    fn search_key_joins_phrases() {
        assert_eq!(search_key("  د  خدای "), "د_خدای");
        assert_eq!(search_key("لوي"), "لوی");
    }
}
