//! Noun and adjective declension tables.
//!
//! Each [`DeclensionPattern`] maps a lemma to its inflection slots
//! (`plain_m`, `inflection_1_f`, `vocative_m`, ...). Endings keep their
//! dictionary spelling, so a generated `ي` is not folded to `ی` here;
//! callers that compare forms normalize them first.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::normalize::normalize;
use crate::translit::transliterate;

/// Declension class of a noun or adjective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DeclensionPattern {
    /// Pattern 1: masculine ending in a consonant, or feminine in `ه`.
    #[default]
    #[serde(alias = "masc_basic_consonant")]
    #[cfg_attr(feature = "clap", value(name = "basic"))]
    Basic,
    /// Pattern 2: unstressed final `ی`.
    #[cfg_attr(feature = "clap", value(name = "unstressed_y"))]
    UnstressedY,
    /// Pattern 3: stressed final `ی`.
    #[cfg_attr(feature = "clap", value(name = "stressed_ay"))]
    StressedAy,
    /// Pattern 4: the `پښتون` type, with vowel change in the plural.
    #[cfg_attr(feature = "clap", value(name = "pashtoon"))]
    Pashtoon,
    /// Pattern 5: short words that squish before an ending.
    #[cfg_attr(feature = "clap", value(name = "short_squish"))]
    ShortSquish,
    /// Feminine inanimate nouns ending in `ي`.
    #[cfg_attr(feature = "clap", value(name = "fem_inanim_ee"))]
    FemInanimEe,
}

impl DeclensionPattern {
    /// Returns the pattern's configuration name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::UnstressedY => "unstressed_y",
            Self::StressedAy => "stressed_ay",
            Self::Pashtoon => "pashtoon",
            Self::ShortSquish => "short_squish",
            Self::FemInanimEe => "fem_inanim_ee",
        }
    }
}

impl std::fmt::Display for DeclensionPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DeclinedForm {
    /// Surface form.
    pub form: String,
    /// Approximate transliteration.
    pub translit: String,
}

/// A full declension table for one lemma.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Declension {
    /// Normalized lemma.
    pub lemma: String,
    /// Pattern used to generate the table.
    pub pattern: DeclensionPattern,
    /// Slot name to generated form.
    pub forms: BTreeMap<String, DeclinedForm>,
}

/// Generate the declension table of `lemma` under `pattern`.
pub fn decline(lemma: &str, pattern: DeclensionPattern) -> Declension {
    let lemma = normalize(lemma);
    let slots = match pattern {
        DeclensionPattern::Basic => basic(&lemma),
        DeclensionPattern::UnstressedY => unstressed_y(&lemma),
        DeclensionPattern::StressedAy => stressed_ay(&lemma),
        DeclensionPattern::Pashtoon => pashtoon(&lemma),
        DeclensionPattern::ShortSquish => short_squish(&lemma),
        DeclensionPattern::FemInanimEe => fem_inanim_ee(&lemma),
    };
    let forms = slots
        .into_iter()
        .map(|(slot, form)| {
            let translit = transliterate(&form);
            (slot.to_string(), DeclinedForm { form, translit })
        })
        .collect();
    Declension {
        lemma,
        pattern,
        forms,
    }
}

type Slots = Vec<(&'static str, String)>;

fn basic(lemma: &str) -> Slots {
    if let Some(base) = lemma.strip_suffix('ه') {
        vec![
            ("plain_f", format!("{base}ه")),
            ("inflection_1_f", format!("{base}ې")),
            ("inflection_2_f", format!("{base}و")),
            ("vocative_f", format!("{base}ې")),
            ("vocative_pl_f", format!("{base}و")),
        ]
    } else {
        vec![
            ("plain_m", lemma.to_string()),
            ("inflection_1_m", lemma.to_string()),
            ("inflection_2_m", format!("{lemma}و")),
        ]
    }
}

fn pashtoon(stem: &str) -> Slots {
    let (fem_base, plural_1, plural_2) = match stem.strip_suffix("ون") {
        Some(base) => (format!("{base}نه"), format!("{base}انه"), format!("{base}نو")),
        None => (format!("{stem}ه"), format!("{stem}انه"), format!("{stem}نو")),
    };
    let fem_inflected = format!("{}ې", fem_base.strip_suffix('ه').unwrap_or(&fem_base));
    vec![
        ("plain_m", stem.to_string()),
        ("plain_f", fem_base),
        ("inflection_1_m", plural_1),
        ("inflection_1_f", fem_inflected.clone()),
        ("inflection_2_m", plural_2),
        ("vocative_m", format!("{stem}ه")),
        ("vocative_f", fem_inflected),
    ]
}

fn unstressed_y(lemma: &str) -> Slots {
    let stem = lemma.strip_suffix('ی').unwrap_or(lemma);
    vec![
        ("plain_m", format!("{stem}ی")),
        ("plain_f", format!("{stem}ې")),
        ("inflection_1_m", format!("{stem}ي")),
        ("inflection_1_f", format!("{stem}ې")),
        ("inflection_2", format!("{stem}یو")),
    ]
}

fn stressed_ay(lemma: &str) -> Slots {
    let stem = lemma.strip_suffix('ی').unwrap_or(lemma);
    vec![
        ("plain_m", format!("{stem}ی")),
        ("plain_f", format!("{stem}ۍ")),
        ("inflection_1_m", format!("{stem}ي")),
        ("inflection_1_f", format!("{stem}ۍ")),
        ("inflection_2", format!("{stem}یو")),
    ]
}

fn short_squish(stem: &str) -> Slots {
    vec![
        ("plain_m", stem.to_string()),
        ("plain_f", format!("{stem}ه")),
        ("inflection_1_m", format!("{stem}ه")),
        ("inflection_1_f", format!("{stem}ې")),
        ("inflection_2", format!("{stem}و")),
    ]
}

fn fem_inanim_ee(lemma: &str) -> Slots {
    // Input is normalized, so a final ي has already become ی.
    let stem = lemma.strip_suffix('ی').unwrap_or(lemma);
    vec![
        ("plain_f", format!("{stem}ي")),
        ("inflection_1_f", format!("{stem}ۍ")),
        ("inflection_2_f", format!("{stem}یو")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form<'a>(d: &'a Declension, slot: &str) -> &'a str {
        &d.forms[slot].form
    }

    #[test]
    fn pashtoon_pattern_matches_listed_forms() {
        let d = decline("پښتون", DeclensionPattern::Pashtoon);
        assert_eq!(form(&d, "plain_f"), "پښتنه");
        assert_eq!(form(&d, "inflection_1_m"), "پښتانه");
        assert_eq!(form(&d, "inflection_1_f"), "پښتنې");
        assert_eq!(form(&d, "inflection_2_m"), "پښتنو");
        assert_eq!(form(&d, "vocative_m"), "پښتونه");
    }

    #[test]
    fn basic_switches_on_feminine_ending() {
        let fem = decline("ښځه", DeclensionPattern::Basic);
        assert_eq!(form(&fem, "inflection_1_f"), "ښځې");
        assert!(!fem.forms.contains_key("plain_m"));

        let masc = decline("کور", DeclensionPattern::Basic);
        assert_eq!(form(&masc, "inflection_2_m"), "کورو");
        assert_eq!(masc.forms.len(), 3);
    }

    #[test]
    fn final_yeh_patterns() {
        let d = decline("سړی", DeclensionPattern::UnstressedY);
        assert_eq!(form(&d, "inflection_2"), "سړیو");
        assert_eq!(form(&d, "plain_f"), "سړې");

        let d = decline("سپی", DeclensionPattern::StressedAy);
        assert_eq!(form(&d, "plain_f"), "سپۍ");

        let d = decline("کرسي", DeclensionPattern::FemInanimEe);
        assert_eq!(d.lemma, "کرسی");
        assert_eq!(form(&d, "inflection_1_f"), "کرسۍ");
    }

    #[test]
    fn every_slot_is_transliterated() {
        let d = decline("غل", DeclensionPattern::ShortSquish);
        for f in d.forms.values() {
            assert!(!f.translit.is_empty());
        }
    }

    #[test]
    fn legacy_pattern_name_is_accepted() {
        let p: DeclensionPattern = serde_json::from_str("\"masc_basic_consonant\"").unwrap();
        assert_eq!(p, DeclensionPattern::Basic);
        assert_eq!(p.to_string(), "basic");
    }
}
