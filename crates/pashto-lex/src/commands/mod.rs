//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use pashto_lex_core::config::Config;
use pashto_lex_core::{Engine, Lexicon, SearchIndex, WordList, WordListFormat};

pub mod conjugate;
pub mod decline;
pub mod index;
pub mod infer;
pub mod info;
pub mod lexicon;
pub mod search;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod translit;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Load the configured lexicon (or the built-in one).
pub fn load_lexicon(config: &Config) -> anyhow::Result<Lexicon> {
    Lexicon::load(config.verb_lexicon.as_deref(), config.noun_lexicon.as_deref())
        .context("failed to load lexicon")
}

/// Build an engine over the configured lexicon and engine options.
pub fn load_engine(config: &Config) -> anyhow::Result<Engine> {
    Ok(Engine::new(load_lexicon(config)?, config.engine.clone()))
}

/// Read a word list, choosing the format from the extension.
pub fn load_word_list(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<WordList> {
    let content = read_input_file(path, max_bytes)?;
    let list = WordList::parse(&content, WordListFormat::from_path(path))
        .with_context(|| format!("failed to parse word list {path}"))?;
    let report = list.report();
    if !report.skipped.is_empty() {
        tracing::warn!(
            path = %path,
            skipped = report.skipped.len(),
            "word list contained malformed records"
        );
    }
    Ok(list)
}

/// Read a built index.
pub fn load_search_index(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<SearchIndex> {
    let content = read_input_file(path, max_bytes)?;
    let index = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse index {path}"))?;
    Ok(SearchIndex::new(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn temp_file(dir: &tempfile::TempDir, name: &str, body: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join(name)).unwrap();
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn read_input_file_enforces_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_file(&dir, "words.txt", "وینم (1): Matthew 5:8\n");
        assert!(read_input_file(&path, None).is_ok());
        let err = read_input_file(&path, Some(4)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }

    #[test]
    fn word_list_format_follows_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = temp_file(&dir, "words.json", r#"[{"word": "کور", "count": 2}]"#);
        let list = load_word_list(&json, None).unwrap();
        assert_eq!(list.forms()[0].count, 2);

        let text = temp_file(&dir, "words.txt", "کور (3): Luke 1:1\n");
        let list = load_word_list(&text, None).unwrap();
        assert_eq!(list.forms()[0].count, 3);
    }

    #[test]
    fn default_config_uses_builtin_lexicon() {
        let engine = load_engine(&Config::default()).unwrap();
        assert!(engine.lexicon().verb("لیدل").is_some());
    }
}
