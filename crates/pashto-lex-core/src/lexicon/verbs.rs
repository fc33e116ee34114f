//! Verb lexicon entries.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, LexiconResult};
use crate::normalize::normalize;

/// Stem role names recognised by the conjugation generator.
pub mod role {
    /// Imperfective present stem.
    pub const IMPERFECTIVE: &str = "imperfective";
    /// Perfective present stem.
    pub const PERFECTIVE: &str = "perfective";
    /// Alternate spelling of the imperfective present role.
    pub const IMPERFECTIVE_PRESENT: &str = "imperfective_present";
    /// Alternate spelling of the perfective present role.
    pub const PERFECTIVE_PRESENT: &str = "perfective_present";
    /// Past participle, when stored among the stems.
    pub const PAST_PARTICIPLE: &str = "past_participle";
}

/// One curated verb, keyed in the lexicon by its infinitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VerbEntry {
    /// Human-readable class label, e.g. `Irregular Verb`.
    #[serde(default)]
    pub pattern_info: String,
    /// Stem role name to surface substring.
    #[serde(default)]
    pub stems: BTreeMap<String, String>,
    /// Infinitive-derived roots for the past family (`imperfective`, `perfective`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub roots: BTreeMap<String, String>,
    /// Past participle, when not stored among the stems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_participle: Option<String>,
    /// Latin rendering per stem/root role (`imperfective_stem`, `perfective_root`, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub romanization: BTreeMap<String, String>,
    /// Infinitives that should be filed as related forms of this verb.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_roots: Vec<String>,
    /// Light verb this one is compounded on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_root: Option<String>,
    /// Curated transliteration of the infinitive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translit: Option<String>,
}

impl VerbEntry {
    /// Look up a stem by role name.
    pub fn stem(&self, role: &str) -> Option<&str> {
        self.stems.get(role).map(String::as_str)
    }

    /// Present-family imperfective stem.
    pub fn imperfective_stem(&self) -> Option<&str> {
        self.stem(role::IMPERFECTIVE)
            .or_else(|| self.stem(role::IMPERFECTIVE_PRESENT))
    }

    /// Present-family perfective stem.
    pub fn perfective_stem(&self) -> Option<&str> {
        self.stem(role::PERFECTIVE)
            .or_else(|| self.stem(role::PERFECTIVE_PRESENT))
    }

    /// Past-family imperfective root.
    pub fn imperfective_root(&self) -> Option<&str> {
        self.roots.get(role::IMPERFECTIVE).map(String::as_str)
    }

    /// Past-family perfective root.
    pub fn perfective_root(&self) -> Option<&str> {
        self.roots.get(role::PERFECTIVE).map(String::as_str)
    }

    /// Past participle from either location.
    pub fn participle(&self) -> Option<&str> {
        self.past_participle
            .as_deref()
            .or_else(|| self.stem(role::PAST_PARTICIPLE))
    }

    /// Curated romanization for a role such as `imperfective_stem`.
    pub fn romanization_for(&self, role: &str) -> Option<&str> {
        self.romanization.get(role).map(String::as_str)
    }

    /// Every surface string a corpus form may start with: stems, roots,
    /// and the participle.
    pub fn match_forms(&self) -> Vec<&str> {
        let mut forms: Vec<&str> = self
            .stems
            .values()
            .chain(self.roots.values())
            .map(String::as_str)
            .chain(self.past_participle.as_deref())
            .collect();
        forms.sort_unstable();
        forms.dedup();
        forms
    }

    /// Canonicalize every Pashto field.
    pub(crate) fn normalized(self) -> Self {
        Self {
            pattern_info: self.pattern_info,
            stems: normalize_values(self.stems),
            roots: normalize_values(self.roots),
            past_participle: self.past_participle.as_deref().map(normalize),
            romanization: self.romanization,
            related_roots: self.related_roots.iter().map(|r| normalize(r)).collect(),
            base_root: self.base_root.as_deref().map(normalize),
            translit: self.translit,
        }
    }

    /// Reject entries the engine cannot use.
    pub(crate) fn validate(&self, root: &str) -> LexiconResult<()> {
        let invalid = |reason: String| LexiconError::Invalid {
            root: root.to_string(),
            reason,
        };
        if root.is_empty() {
            return Err(invalid("empty infinitive".to_string()));
        }
        for (role, stem) in self.stems.iter().chain(self.roots.iter()) {
            if stem.is_empty() {
                return Err(invalid(format!("empty surface for role '{role}'")));
            }
        }
        if self.past_participle.as_deref() == Some("") {
            return Err(invalid("empty past participle".to_string()));
        }
        if self.base_root.as_deref() == Some(root) {
            return Err(invalid("base_root refers to the verb itself".to_string()));
        }
        Ok(())
    }
}

fn normalize_values(map: BTreeMap<String, String>) -> BTreeMap<String, String> {
    map.into_iter().map(|(k, v)| (k, normalize(&v))).collect()
}
