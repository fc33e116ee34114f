//! Verb paradigm generation.
//!
//! Present and subjunctive forms are built on the present stems; continuous
//! and simple past forms are built on the infinitive-derived roots. Mixing
//! the two up produces real-looking but wrong forms (`لیدلم` is past,
//! `وینم` is present), so each paradigm names the role it reads.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::Category;
use crate::lexicon::{Lexicon, VerbEntry};
use crate::normalize::normalize;
use crate::translit::transliterate;

/// Person/number slots of the present family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
pub enum PresentSlot {
    /// First person singular.
    #[serde(rename = "1sg")]
    FirstSingular,
    /// First person plural.
    #[serde(rename = "1pl")]
    FirstPlural,
    /// Second person singular.
    #[serde(rename = "2sg")]
    SecondSingular,
    /// Second person plural.
    #[serde(rename = "2pl")]
    SecondPlural,
    /// Third person singular.
    #[serde(rename = "3sg")]
    ThirdSingular,
    /// Third person plural.
    #[serde(rename = "3pl")]
    ThirdPlural,
}

impl PresentSlot {
    /// Every slot with its (surface, romanized) ending.
    pub const ENDINGS: [(Self, &'static str, &'static str); 6] = [
        (Self::FirstSingular, "م", "um"),
        (Self::FirstPlural, "و", "oo"),
        (Self::SecondSingular, "ې", "e"),
        (Self::SecondPlural, "ئ", "ey"),
        (Self::ThirdSingular, "ي", "ee"),
        (Self::ThirdPlural, "ي", "ee"),
    ];

    /// Returns the slot label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstSingular => "1sg",
            Self::FirstPlural => "1pl",
            Self::SecondSingular => "2sg",
            Self::SecondPlural => "2pl",
            Self::ThirdSingular => "3sg",
            Self::ThirdPlural => "3pl",
        }
    }
}

/// Slots of the past family. Transitive pasts agree with the object, so
/// the third person singular splits by gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
pub enum PastSlot {
    /// First person singular.
    #[serde(rename = "1sg")]
    FirstSingular,
    /// First person plural.
    #[serde(rename = "1pl")]
    FirstPlural,
    /// Second person singular.
    #[serde(rename = "2sg")]
    SecondSingular,
    /// Second person plural.
    #[serde(rename = "2pl")]
    SecondPlural,
    /// Third person singular masculine.
    #[serde(rename = "3sg_m")]
    ThirdSingularMasculine,
    /// Third person singular feminine.
    #[serde(rename = "3sg_f")]
    ThirdSingularFeminine,
    /// Third person plural.
    #[serde(rename = "3pl")]
    ThirdPlural,
}

impl PastSlot {
    /// Every slot with its (surface, romanized) ending.
    pub const ENDINGS: [(Self, &'static str, &'static str); 7] = [
        (Self::FirstSingular, "م", "um"),
        (Self::FirstPlural, "و", "oo"),
        (Self::SecondSingular, "ې", "e"),
        (Self::SecondPlural, "ئ", "ey"),
        (Self::ThirdSingularMasculine, "و", "o"),
        (Self::ThirdSingularFeminine, "ه", "a"),
        (Self::ThirdPlural, "", ""),
    ];

    /// Returns the slot label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstSingular => "1sg",
            Self::FirstPlural => "1pl",
            Self::SecondSingular => "2sg",
            Self::SecondPlural => "2pl",
            Self::ThirdSingularMasculine => "3sg_m",
            Self::ThirdSingularFeminine => "3sg_f",
            Self::ThirdPlural => "3pl",
        }
    }
}

/// A generated form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConjugatedForm {
    /// Surface form.
    pub form: String,
    /// Romanization.
    pub translit: String,
}

/// The lexicon data a table was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConjugationMeta {
    /// The infinitive.
    pub root: String,
    /// Always [`Category::Verb`].
    #[serde(rename = "type")]
    pub category: Category,
    /// Present imperfective stem.
    pub imperfective_stem: String,
    /// Present perfective stem.
    pub perfective_stem: String,
    /// Past imperfective root.
    pub imperfective_root: String,
    /// Past perfective root.
    pub perfective_root: String,
    /// Past participle.
    pub past_participle: String,
    /// Romanization of each role, curated or transliterated.
    pub romanization: BTreeMap<String, String>,
}

/// All four paradigms of one verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConjugationTable {
    /// Source data.
    pub meta: ConjugationMeta,
    /// Imperfective stem + present endings.
    pub present: BTreeMap<PresentSlot, ConjugatedForm>,
    /// Perfective stem + present endings.
    pub subjunctive: BTreeMap<PresentSlot, ConjugatedForm>,
    /// Imperfective root + past endings.
    pub continuous_past: BTreeMap<PastSlot, ConjugatedForm>,
    /// Perfective root + past endings.
    pub simple_past: BTreeMap<PastSlot, ConjugatedForm>,
    /// Normalized surface form to romanization. When two slots share a
    /// surface form, the first generated keeps its romanization.
    pub forms_map: BTreeMap<String, String>,
}

impl ConjugationTable {
    /// Every generated surface form with its romanization, paradigm by
    /// paradigm.
    pub fn forms(&self) -> impl Iterator<Item = &ConjugatedForm> {
        self.present
            .values()
            .chain(self.subjunctive.values())
            .chain(self.continuous_past.values())
            .chain(self.simple_past.values())
    }
}

struct Part<'a> {
    surface: &'a str,
    roman: String,
}

impl<'a> Part<'a> {
    fn new(entry: &VerbEntry, surface: &'a str, role: &str) -> Self {
        let roman = entry
            .romanization_for(role)
            .map_or_else(|| transliterate(surface), str::to_string);
        Self { surface, roman }
    }

    fn with(&self, ending: &str, roman_ending: &str) -> ConjugatedForm {
        ConjugatedForm {
            form: format!("{}{ending}", self.surface),
            translit: format!("{}{roman_ending}", self.roman),
        }
    }
}

/// Conjugate `root`.
///
/// Returns `None` when the root is not in the verb lexicon or its entry
/// lacks a present stem, a past root, or the past participle.
pub fn conjugate(lexicon: &Lexicon, root: &str) -> Option<ConjugationTable> {
    let root = normalize(root);
    let entry = lexicon.verb(&root)?;

    let impf_stem = Part::new(entry, entry.imperfective_stem()?, "imperfective_stem");
    let perf_stem = Part::new(entry, entry.perfective_stem()?, "perfective_stem");
    let impf_root = Part::new(entry, entry.imperfective_root()?, "imperfective_root");
    let perf_root = Part::new(entry, entry.perfective_root()?, "perfective_root");
    let participle = Part::new(entry, entry.participle()?, "past_participle");

    let present_of = |part: &Part<'_>| {
        PresentSlot::ENDINGS
            .iter()
            .map(|&(slot, end, rom)| (slot, part.with(end, rom)))
            .collect::<BTreeMap<_, _>>()
    };
    let past_of = |part: &Part<'_>| {
        PastSlot::ENDINGS
            .iter()
            .map(|&(slot, end, rom)| (slot, part.with(end, rom)))
            .collect::<BTreeMap<_, _>>()
    };

    let present = present_of(&impf_stem);
    let subjunctive = present_of(&perf_stem);
    let continuous_past = past_of(&impf_root);
    let simple_past = past_of(&perf_root);

    let mut forms_map = BTreeMap::new();
    for part in [&impf_root, &perf_root, &participle] {
        forms_map
            .entry(normalize(part.surface))
            .or_insert_with(|| part.roman.clone());
    }
    let generated = PresentSlot::ENDINGS
        .iter()
        .flat_map(|(slot, _, _)| [&present[slot], &subjunctive[slot]])
        .chain(
            PastSlot::ENDINGS
                .iter()
                .flat_map(|(slot, _, _)| [&continuous_past[slot], &simple_past[slot]]),
        );
    for form in generated {
        forms_map
            .entry(normalize(&form.form))
            .or_insert_with(|| form.translit.clone());
    }

    let romanization = [
        ("imperfective_stem", &impf_stem),
        ("perfective_stem", &perf_stem),
        ("imperfective_root", &impf_root),
        ("perfective_root", &perf_root),
        ("past_participle", &participle),
    ]
    .into_iter()
    .map(|(role, part)| (role.to_string(), part.roman.clone()))
    .collect();

    Some(ConjugationTable {
        meta: ConjugationMeta {
            root: root.clone(),
            category: Category::Verb,
            imperfective_stem: impf_stem.surface.to_string(),
            perfective_stem: perf_stem.surface.to_string(),
            imperfective_root: impf_root.surface.to_string(),
            perfective_root: perf_root.surface.to_string(),
            past_participle: participle.surface.to_string(),
            romanization,
        },
        present,
        subjunctive,
        continuous_past,
        simple_past,
        forms_map,
    })
}

/// Every generated verb form in the lexicon, mapped to the infinitives
/// that produce it.
///
/// Covers the four paradigms plus both past roots and the participle of
/// each conjugable verb. Keys are normalized; lemma lists follow lexicon
/// order, so a form shared by two verbs keeps both.
pub fn generated_forms(lexicon: &Lexicon) -> BTreeMap<String, Vec<String>> {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (root, _) in lexicon.verbs() {
        let Some(table) = conjugate(lexicon, root) else {
            tracing::debug!(root, "verb is not conjugable; no generated forms");
            continue;
        };
        for form in table.forms_map.into_keys() {
            let lemmas = out.entry(form).or_default();
            if !lemmas.iter().any(|l| l == root) {
                lemmas.push(root.to_string());
            }
        }
    }
    out
}
