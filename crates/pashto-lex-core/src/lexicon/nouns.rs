//! Irregular noun and adjective entries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::declension::{DeclensionPattern, decline};
use crate::error::{LexiconError, LexiconResult};
use crate::normalize::normalize;

fn default_pattern_info() -> String {
    "Irregular Noun/Adj".to_string()
}

/// One curated noun or adjective whose inflections are listed explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NounEntry {
    /// Human-readable declension label.
    #[serde(default = "default_pattern_info")]
    pub pattern_info: String,
    /// Surface forms that inflect from this lemma.
    #[serde(default)]
    pub inflected_forms: Vec<String>,
    /// Generative declension pattern, when one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<DeclensionPattern>,
    /// Curated transliteration of the lemma.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translit: Option<String>,
}

impl NounEntry {
    /// Every inflected surface form of `lemma`: the listed forms followed by
    /// any extra forms the declension pattern generates. Normalized, without
    /// the lemma itself, first occurrence kept.
    pub fn all_forms(&self, lemma: &str) -> Vec<String> {
        let generated = self
            .pattern
            .map(|p| decline(lemma, p).forms.into_values().map(|f| f.form))
            .into_iter()
            .flatten();

        let mut out: Vec<String> = Vec::new();
        for form in self.inflected_forms.iter().cloned().chain(generated) {
            let form = normalize(&form);
            if form != lemma && !out.contains(&form) {
                out.push(form);
            }
        }
        out
    }

    pub(crate) fn normalized(self) -> Self {
        Self {
            inflected_forms: self.inflected_forms.iter().map(|f| normalize(f)).collect(),
            ..self
        }
    }

    pub(crate) fn validate(&self, root: &str) -> LexiconResult<()> {
        if root.is_empty() {
            return Err(LexiconError::Invalid {
                root: root.to_string(),
                reason: "empty lemma".to_string(),
            });
        }
        if let Some(empty) = self.inflected_forms.iter().position(String::is_empty) {
            return Err(LexiconError::Invalid {
                root: root.to_string(),
                reason: format!("inflected form #{empty} is empty"),
            });
        }
        Ok(())
    }
}
