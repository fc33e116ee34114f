//! Lexicon tools over MCP on stdio.
//!
//! Root inference, reverse lookup, conjugation, declension and
//! transliteration. Each tool delegates to `pashto_lex_core`; the engine,
//! vocabulary and optional search index are shared read-only behind `Arc`.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use pashto_lex_core::{
    DeclensionPattern, Engine, SearchIndex, Vocabulary, conjugate, decline, normalize,
    search_key, transliterate,
};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// `text` (default) or `json`.
    #[serde(default)]
    pub format: InfoFormat,
}

/// Rendering of the `get_info` result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InfoFormat {
    /// One line per fact.
    #[default]
    Text,
    /// A JSON object.
    Json,
}

/// What `get_info` reports about the loaded data.
#[derive(Debug, Serialize)]
struct Status {
    name: &'static str,
    version: &'static str,
    verbs: usize,
    nouns: usize,
    vocabulary: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    index_roots: Option<usize>,
}

/// Parameters for the `infer_word` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct InferWordParams {
    /// A single Pashto word form.
    pub word: String,
}

/// Parameters for the `search_word` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchWordParams {
    /// Surface form to look up. Spaces in phrases map to `_`.
    pub word: String,
    /// Also list every form filed under each matching root.
    #[serde(default)]
    pub siblings: bool,
}

/// Parameters for the `conjugate_verb` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ConjugateVerbParams {
    /// Infinitive root from the verb lexicon.
    pub root: String,
}

/// Parameters for the `decline_noun` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DeclineNounParams {
    /// Lemma to decline.
    pub lemma: String,
    /// Declension pattern. Defaults to the lexicon entry's pattern, then
    /// `basic`.
    pub pattern: Option<DeclensionPattern>,
}

/// Parameters for the `transliterate` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct TransliterateParams {
    /// Pashto text.
    pub text: String,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

/// The MCP handler. Cloning shares the loaded data.
#[derive(Clone)]
pub struct LexiconServer {
    engine: Arc<Engine>,
    vocabulary: Arc<Vocabulary>,
    search: Option<Arc<SearchIndex>>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

#[tool_router]
impl LexiconServer {
    /// Create a server over an engine, the corpus vocabulary used by suffix
    /// rules, and an optional built index for `search_word`.
    pub fn new(engine: Engine, vocabulary: Vocabulary, search: Option<SearchIndex>) -> Self {
        Self {
            engine: Arc::new(engine),
            vocabulary: Arc::new(vocabulary),
            search: search.map(Arc::new),
            tool_router: Self::tool_router(),
        }
    }

    fn status(&self) -> Status {
        let lexicon = self.engine.lexicon();
        Status {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            verbs: lexicon.verbs().count(),
            nouns: lexicon.nouns().count(),
            vocabulary: self.vocabulary.len(),
            index_roots: self.search.as_ref().map(|s| s.index().len()),
        }
    }

    /// Version and the size of the loaded lexicon, vocabulary and index.
    #[tool(
        description = "Report the server version, lexicon size, corpus vocabulary size and whether a search index is loaded."
    )]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        let status = self.status();
        let text = match params.format {
            InfoFormat::Json => to_json(&status)?,
            InfoFormat::Text => {
                let index = status
                    .index_roots
                    .map_or_else(|| "not loaded".to_string(), |n| format!("{n} roots"));
                format!(
                    "{} {}\nverbs: {}\nnouns: {}\nvocabulary: {}\nindex: {index}",
                    status.name, status.version, status.verbs, status.nouns, status.vocabulary,
                )
            }
        };
        tracing::info!(tool = "get_info", format = ?params.format, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Every root reading of a word.
    #[tool(
        description = "Infer the root(s) of a Pashto word. Returns every interpretation with root, category (Verb, Noun/Adj, Unknown), pattern and description."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", word = %params.word))]
    fn infer_word(
        &self,
        Parameters(params): Parameters<InferWordParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "infer_word", word = %params.word, "executing MCP tool");

        let inference = if self.vocabulary.is_empty() {
            let vocabulary = Vocabulary::from_words([params.word.as_str()]);
            self.engine.analyze(&params.word, &vocabulary)
        } else {
            self.engine.analyze(&params.word, &self.vocabulary)
        };

        tracing::info!(
            tool = "infer_word",
            interpretations = inference.interpretations.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &inference,
        )?)]))
    }

    /// Reverse lookup in the loaded index.
    #[tool(
        description = "Look a surface form up in the built grammatical index. Returns every root, identity and form bucket holding it, with verses and counts. An empty list means no match."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", word = %params.word))]
    fn search_word(
        &self,
        Parameters(params): Parameters<SearchWordParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "search_word", word = %params.word, "executing MCP tool");

        let Some(search) = self.search.as_deref() else {
            return Err(McpError::invalid_params(
                "no index loaded; start the server with --index or set `index_file`",
                None,
            ));
        };

        let hits = search.search(&params.word);
        let siblings: Vec<_> = if params.siblings {
            let mut roots: Vec<&str> = hits.iter().map(|h| h.root.as_str()).collect();
            roots.dedup();
            roots
                .into_iter()
                .map(|root| serde_json::json!({ "root": root, "forms": search.siblings(root) }))
                .collect()
        } else {
            Vec::new()
        };

        let body = serde_json::json!({
            "query": search_key(&params.word),
            "hits": hits,
            "siblings": siblings,
        });

        tracing::info!(tool = "search_word", hits = hits.len(), "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(&body)?)]))
    }

    /// Conjugation table of a lexicon verb.
    #[tool(
        description = "Conjugate a Pashto verb from the lexicon: present, subjunctive, continuous past and simple past, plus a form-to-romanization map. Returns null for verbs the lexicon cannot conjugate."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", root = %params.root))]
    fn conjugate_verb(
        &self,
        Parameters(params): Parameters<ConjugateVerbParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "conjugate_verb", root = %params.root, "executing MCP tool");

        let table = conjugate(self.engine.lexicon(), &params.root);

        tracing::info!(
            tool = "conjugate_verb",
            found = table.is_some(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(&table)?)]))
    }

    /// Declension table of a noun or adjective.
    #[tool(
        description = "Decline a Pashto noun or adjective. Patterns: basic, unstressed_y, stressed_ay, pashtoon, short_squish, fem_inanim_ee."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", lemma = %params.lemma))]
    fn decline_noun(
        &self,
        Parameters(params): Parameters<DeclineNounParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "decline_noun", lemma = %params.lemma, pattern = ?params.pattern, "executing MCP tool");

        let pattern = params
            .pattern
            .or_else(|| {
                self.engine
                    .lexicon()
                    .noun(&normalize(&params.lemma))
                    .and_then(|entry| entry.pattern)
            })
            .unwrap_or_default();
        let table = decline(&params.lemma, pattern);

        tracing::info!(tool = "decline_noun", pattern = %pattern, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(&table)?)]))
    }

    /// Approximate romanization.
    #[tool(description = "Transliterate Pashto text into an approximate Latin romanization.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn transliterate(
        &self,
        Parameters(params): Parameters<TransliterateParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "transliterate", "executing MCP tool");

        let text = transliterate(&params.text);

        tracing::info!(tool = "transliterate", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for LexiconServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Infer Pashto roots, search a built index, conjugate verbs, decline nouns and transliterate.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pashto_lex_core::{EngineOptions, Lexicon, WordForm, build_index};
    use rmcp::model::RawContent;

    fn engine() -> Engine {
        Engine::new(Lexicon::builtin().unwrap(), EngineOptions::default())
    }

    fn server() -> LexiconServer {
        LexiconServer::new(engine(), Vocabulary::default(), None)
    }

    fn server_with_index() -> LexiconServer {
        let engine = engine();
        let words = vec![
            WordForm::new("وینم", 2, ["Matthew 5:8".parse().unwrap()]),
            WordForm::new("لیدلم", 1, ["John 1:1".parse().unwrap()]),
        ];
        let vocabulary = Vocabulary::from_forms(&words);
        let build = build_index(&engine, &words, &vocabulary);
        LexiconServer::new(engine, vocabulary, Some(SearchIndex::new(build.index)))
    }

    #[test]
    fn handler_advertises_tools_and_names_the_crate() {
        let info = ServerHandler::get_info(&server());
        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("Pashto"));
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn extract_json(result: &CallToolResult) -> serde_json::Value {
        let text = extract_text(result).expect("should have text content");
        serde_json::from_str(text).expect("valid JSON")
    }

    #[test]
    fn get_info_text_reports_lexicon_and_missing_index() {
        let params = Parameters(GetInfoParams {
            format: InfoFormat::default(),
        });
        let result = server().get_info(params).unwrap();
        assert!(!result.is_error.unwrap_or(false));

        let text = extract_text(&result).unwrap();
        assert!(text.starts_with(env!("CARGO_PKG_NAME")));
        assert!(text.contains("vocabulary: 0"));
        assert!(text.contains("index: not loaded"));
    }

    #[test]
    fn get_info_json_counts_loaded_data() {
        let params = Parameters(GetInfoParams {
            format: InfoFormat::Json,
        });
        let json = extract_json(&server_with_index().get_info(params).unwrap());

        let builtin = Lexicon::builtin().unwrap();
        assert_eq!(json["verbs"], builtin.verbs().count());
        assert_eq!(json["nouns"], builtin.nouns().count());
        assert_eq!(json["vocabulary"], 2);
        assert!(json["index_roots"].as_u64().unwrap() >= 1);
    }

    #[test]
    fn get_info_format_defaults_to_text() {
        let params: GetInfoParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.format, InfoFormat::Text);
        assert!(serde_json::from_str::<GetInfoParams>(r#"{"format": "yaml"}"#).is_err());
    }

    #[test]
    fn infer_word_tool_finds_suppletive_root() {
        let params = Parameters(InferWordParams {
            word: "بوځم".to_string(),
        });
        let result = server().infer_word(params).expect("infer_word should succeed");

        let json = extract_json(&result);
        assert_eq!(json["interpretations"][0]["root"], "بوتلل");
        assert_eq!(json["interpretations"][0]["category"], "Verb");
    }

    #[test]
    fn search_word_tool_returns_hits() {
        let params = Parameters(SearchWordParams {
            word: "وینم".to_string(),
            siblings: true,
        });
        let result = server_with_index()
            .search_word(params)
            .expect("search_word should succeed");

        let json = extract_json(&result);
        assert_eq!(json["hits"][0]["root"], "لیدل");
        assert_eq!(json["hits"][0]["count"], 2);
        assert_eq!(json["siblings"][0]["root"], "لیدل");
    }

    #[test]
    fn search_word_without_index_is_an_error() {
        let params = Parameters(SearchWordParams {
            word: "وینم".to_string(),
            siblings: false,
        });
        assert!(server().search_word(params).is_err());
    }

    #[test]
    fn conjugate_verb_tool_works() {
        let params = Parameters(ConjugateVerbParams {
            root: "لیدل".to_string(),
        });
        let result = server()
            .conjugate_verb(params)
            .expect("conjugate_verb should succeed");

        let json = extract_json(&result);
        assert_eq!(json["present"]["1sg"]["form"], "وینم");
        assert!(json["forms_map"].is_object());
    }

    #[test]
    fn conjugate_unknown_verb_returns_null() {
        let params = Parameters(ConjugateVerbParams {
            root: "نشته".to_string(),
        });
        let result = server().conjugate_verb(params).unwrap();
        assert!(extract_json(&result).is_null());
    }

    #[test]
    fn decline_noun_uses_lexicon_pattern() {
        let params = Parameters(DeclineNounParams {
            lemma: "پښتون".to_string(),
            pattern: None,
        });
        let result = server()
            .decline_noun(params)
            .expect("decline_noun should succeed");

        let json = extract_json(&result);
        assert_eq!(json["pattern"], "pashtoon");
    }

    #[test]
    fn transliterate_tool_works() {
        let params = Parameters(TransliterateParams {
            text: "کور".to_string(),
        });
        let result = server().transliterate(params).unwrap();
        let text = extract_text(&result).expect("should have text content");
        assert!(!text.is_empty());
    }
}
