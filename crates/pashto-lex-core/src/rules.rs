//! Regular noun/adjective suffix rules.
//!
//! Each rule strips a suffix and appends a replacement to reconstruct a
//! candidate lemma. The engine accepts a candidate only when the corpus
//! vocabulary attests it. All suffixes are in normalized spelling, which
//! is why the masculine first inflection of the unstressed pattern (final
//! `ي`) has no rule: it normalizes to the plain form itself.

use serde::Serialize;

/// Rule families, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFamily {
    /// Masculine nouns with an unstressed final glide.
    UnstressedGlide,
    /// Nouns with a stressed final glide.
    StressedGlide,
    /// Plural markers.
    Plural,
    /// Basic pattern (consonant-final masculine, `ه`-final feminine).
    Basic,
}

/// One suffix-stripping rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuffixRule {
    /// Family this rule belongs to.
    pub family: RuleFamily,
    /// Suffix the surface form must end with.
    pub suffix: &'static str,
    /// Text appended to the remaining stem.
    pub replacement: &'static str,
    /// Pattern label for the resulting identity.
    pub pattern: &'static str,
    /// Form description for the surface form.
    pub description: &'static str,
}

impl SuffixRule {
    /// Candidate lemma for `word`, if the suffix matches and leaves a
    /// non-empty result that differs from the word.
    pub fn candidate(&self, word: &str) -> Option<String> {
        let stem = word.strip_suffix(self.suffix)?;
        if stem.is_empty() {
            return None;
        }
        let candidate = format!("{stem}{}", self.replacement);
        (candidate != word).then_some(candidate)
    }
}

const UNSTRESSED: &str = "Pattern 2: Unstressed ی";
const STRESSED: &str = "Pattern 3: Stressed ی";
const REGULAR: &str = "Regular Noun/Adj";
const BASIC: &str = "Pattern 1: Basic";

/// The ordered rule table.
pub static SUFFIX_RULES: &[SuffixRule] = &[
    SuffixRule {
        family: RuleFamily::UnstressedGlide,
        suffix: "یو",
        replacement: "ی",
        pattern: UNSTRESSED,
        description: "2nd Inflection (Masc)",
    },
    SuffixRule {
        family: RuleFamily::UnstressedGlide,
        suffix: "یه",
        replacement: "ی",
        pattern: UNSTRESSED,
        description: "Vocative (Masc)",
    },
    SuffixRule {
        family: RuleFamily::UnstressedGlide,
        suffix: "ې",
        replacement: "ی",
        pattern: UNSTRESSED,
        description: "Plain/1st Inflection (Fem)",
    },
    SuffixRule {
        family: RuleFamily::StressedGlide,
        suffix: "ۍ",
        replacement: "ی",
        pattern: STRESSED,
        description: "Plain/1st Inflection (Fem)",
    },
    SuffixRule {
        family: RuleFamily::Plural,
        suffix: "انو",
        replacement: "",
        pattern: REGULAR,
        description: "Plural Oblique",
    },
    SuffixRule {
        family: RuleFamily::Plural,
        suffix: "ان",
        replacement: "",
        pattern: REGULAR,
        description: "Plural",
    },
    SuffixRule {
        family: RuleFamily::Plural,
        suffix: "ونو",
        replacement: "",
        pattern: REGULAR,
        description: "Plural Oblique (Inanimate)",
    },
    SuffixRule {
        family: RuleFamily::Plural,
        suffix: "ونه",
        replacement: "",
        pattern: REGULAR,
        description: "Plural (Inanimate)",
    },
    SuffixRule {
        family: RuleFamily::Basic,
        suffix: "ې",
        replacement: "ه",
        pattern: BASIC,
        description: "1st Inflection (Fem)",
    },
    SuffixRule {
        family: RuleFamily::Basic,
        suffix: "و",
        replacement: "ه",
        pattern: BASIC,
        description: "2nd Inflection (Fem)",
    },
    SuffixRule {
        family: RuleFamily::Basic,
        suffix: "و",
        replacement: "",
        pattern: BASIC,
        description: "2nd Inflection (Masc)",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::is_normalized;

    #[test]
    fn suffixes_are_normalized() {
        for rule in SUFFIX_RULES {
            assert!(is_normalized(rule.suffix), "{rule:?}");
            assert!(is_normalized(rule.replacement), "{rule:?}");
        }
    }

    #[test]
    fn candidate_strips_and_replaces() {
        let fem = SUFFIX_RULES
            .iter()
            .find(|r| r.family == RuleFamily::Basic && r.suffix == "ې")
            .unwrap();
        assert_eq!(fem.candidate("ښځې").as_deref(), Some("ښځه"));
        assert_eq!(fem.candidate("ې"), None);
        assert_eq!(fem.candidate("کور"), None);
    }

    #[test]
    fn plural_rule_needs_a_stem() {
        let plural = SUFFIX_RULES.iter().find(|r| r.suffix == "ان").unwrap();
        assert_eq!(plural.candidate("ان"), None);
        assert_eq!(plural.candidate("زلمیان").as_deref(), Some("زلمی"));
    }

    #[test]
    fn rules_are_grouped_by_family() {
        let families: Vec<RuleFamily> = SUFFIX_RULES.iter().map(|r| r.family).collect();
        let mut seen = Vec::new();
        for f in families {
            if seen.last() != Some(&f) {
                assert!(!seen.contains(&f), "family {f:?} is split");
                seen.push(f);
            }
        }
    }
}
