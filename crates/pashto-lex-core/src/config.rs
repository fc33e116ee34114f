//! Layered configuration.
//!
//! A load merges, lowest precedence first: built-in defaults, the user file
//! (`config.<ext>` in the platform config dir), the project files of the
//! nearest directory that has any, files passed with `--config`, and finally
//! `PASHTO_LEX_*` environment variables. Nested keys use a double
//! underscore, so `PASHTO_LEX_ENGINE__SUFFIX_RULES=false` turns the suffix
//! rules off.
//!
//! Project files are `.pashto.<ext>`, `pashto.<ext>`, `.pashto-lex.<ext>`
//! and `pashto-lex.<ext>`, where `<ext>` is `toml`, `yaml`, `yml` or
//! `json`. The upward walk ends at a directory holding `.git`.
//!
//! Relative data paths (`verb_lexicon`, `noun_lexicon`, `word_list`,
//! `index_file`) are taken relative to the file that set them.
//!
//! ```no_run
//! use pashto_lex_core::config::ConfigLoader;
//!
//! let (config, sources) = ConfigLoader::new()
//!     .with_project_search("corpus/gospels")
//!     .load()?;
//! println!("{:?} from {:?}", config.word_list, sources.primary_file());
//! # Ok::<(), pashto_lex_core::ConfigError>(())
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::{Figment, Source};
use serde::{Deserialize, Serialize};

use crate::engine::EngineOptions;
use crate::error::{ConfigError, ConfigResult};

/// Merged settings for the CLI and the MCP server.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Minimum level written to the logs.
    pub log_level: LogLevel,
    /// Directory for JSONL log files. File logging is off when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Verb lexicon JSON. The built-in table is used when unset.
    pub verb_lexicon: Option<Utf8PathBuf>,
    /// Irregular noun/adjective lexicon JSON. The built-in table is used when unset.
    pub noun_lexicon: Option<Utf8PathBuf>,
    /// Default corpus word list for `index`, `infer` and the MCP server.
    pub word_list: Option<Utf8PathBuf>,
    /// Default built index for `search` and the MCP server.
    pub index_file: Option<Utf8PathBuf>,
    /// Inference rule switches.
    pub engine: EngineOptions,
    /// Largest word list accepted, in bytes. Defaults to
    /// [`DEFAULT_MAX_INPUT_BYTES`](crate::DEFAULT_MAX_INPUT_BYTES).
    pub max_input_bytes: Option<usize>,
    /// Accept inputs of any size.
    pub disable_input_limit: bool,
}

impl Config {
    /// The effective word-list limit, or `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
        }
    }

    /// The size limit for built index files, or `None` when disabled.
    pub fn index_limit(&self) -> Option<usize> {
        self.input_limit()
            .map(|max| max.saturating_mul(crate::INDEX_SIZE_FACTOR))
    }

    /// Anchor relative data paths at the directory of the file that set
    /// them. Paths from the environment stay relative to the working
    /// directory.
    fn anchor_data_paths(&mut self, figment: &Figment) {
        let fields = [
            ("verb_lexicon", &mut self.verb_lexicon),
            ("noun_lexicon", &mut self.noun_lexicon),
            ("word_list", &mut self.word_list),
            ("index_file", &mut self.index_file),
        ];
        for (key, field) in fields {
            let Some(path) = field.as_mut().filter(|p| p.is_relative()) else {
                continue;
            };
            let dir = match figment.find_metadata(key).and_then(|m| m.source.as_ref()) {
                Some(Source::File(file)) => file.parent().and_then(Utf8Path::from_path),
                _ => None,
            };
            if let Some(dir) = dir {
                *path = dir.join(&*path);
            }
        }
    }
}

/// `log_level` values.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Rule-by-rule engine traces.
    Debug,
    /// Load and build summaries.
    #[default]
    Info,
    /// Skipped records and masked stems.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// The `tracing` filter directive for this level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Which layer a config file was merged as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// From the platform config directory.
    User,
    /// Found by walking up from the working directory.
    Project,
    /// Passed with `--config`.
    Explicit,
}

/// One merged config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSource {
    /// Layer the file belongs to.
    pub kind: SourceKind,
    /// Path as merged.
    pub path: Utf8PathBuf,
}

/// The files a load merged, lowest precedence first.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ConfigSources(Vec<ConfigSource>);

impl ConfigSources {
    /// The file that won ties, if any file was merged.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.0.last().map(|s| s.path.as_path())
    }

    /// Files of one layer, lowest precedence first.
    pub fn of_kind(&self, kind: SourceKind) -> impl Iterator<Item = &Utf8Path> {
        self.0
            .iter()
            .filter(move |s| s.kind == kind)
            .map(|s| s.path.as_path())
    }

    /// Every merged file.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigSource> {
        self.0.iter()
    }

    /// Number of merged files.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when only defaults and the environment applied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

const APP_NAME: &str = "pashto-lex";
const ENV_PREFIX: &str = "PASHTO_LEX_";
/// Project file stems, lowest precedence first.
const FILE_STEMS: &[&str] = &["pashto", "pashto-lex"];
const EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Builds a [`Config`] from the layered sources.
#[derive(Debug)]
pub struct ConfigLoader {
    search_from: Option<Utf8PathBuf>,
    user_config: bool,
    stop_marker: Option<String>,
    files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads the user file and stops the walk at `.git`.
    pub fn new() -> Self {
        Self {
            search_from: None,
            user_config: true,
            stop_marker: Some(".git".to_string()),
            files: Vec::new(),
        }
    }

    /// Walk up from `dir` looking for project files.
    pub fn with_project_search(mut self, dir: impl AsRef<Utf8Path>) -> Self {
        self.search_from = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Include or skip the user file.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// End the walk at a directory containing `marker`; `None` walks to the
    /// filesystem root.
    pub fn with_stop_marker(mut self, marker: Option<&str>) -> Self {
        self.stop_marker = marker.map(str::to_string);
        self
    }

    /// Merge `path` above every discovered file. Later calls win.
    pub fn with_file(mut self, path: impl AsRef<Utf8Path>) -> Self {
        self.files.push(path.as_ref().to_path_buf());
        self
    }

    /// The files this loader would merge, lowest precedence first.
    pub fn sources(&self) -> ConfigSources {
        let user = self
            .user_config
            .then(user_config_file)
            .flatten()
            .map(|path| ConfigSource {
                kind: SourceKind::User,
                path,
            });
        let project = self
            .search_from
            .as_deref()
            .map(|dir| discover_project_files(dir, self.stop_marker.as_deref()))
            .unwrap_or_default()
            .into_iter()
            .map(|path| ConfigSource {
                kind: SourceKind::Project,
                path,
            });
        let explicit = self.files.iter().map(|path| ConfigSource {
            kind: SourceKind::Explicit,
            path: path.clone(),
        });
        ConfigSources(user.into_iter().chain(project).chain(explicit).collect())
    }

    /// Merge every layer and extract the result.
    #[tracing::instrument(skip(self), fields(search_from = ?self.search_from))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = self.sources();
        let figment = sources
            .iter()
            .fold(
                Figment::from(Serialized::defaults(Config::default())),
                |figment, source| merge_file(figment, &source.path),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        config.anchor_data_paths(&figment);

        tracing::info!(
            files = sources.len(),
            primary = ?sources.primary_file(),
            log_level = config.log_level.as_str(),
            "configuration loaded"
        );
        Ok((config, sources))
    }
}

/// Project file names tried in each directory, lowest precedence first:
/// per stem, dotfiles before plain names, extensions in [`EXTENSIONS`]
/// order.
fn candidate_names() -> impl Iterator<Item = String> {
    FILE_STEMS.iter().flat_map(|stem| {
        [format!(".{stem}"), (*stem).to_string()]
            .into_iter()
            .flat_map(|name| EXTENSIONS.iter().map(move |ext| format!("{name}.{ext}")))
    })
}

/// Files of the nearest directory at or above `start` holding any
/// candidate. A directory with the stop marker is searched, but nothing
/// above it.
fn discover_project_files(start: &Utf8Path, stop_marker: Option<&str>) -> Vec<Utf8PathBuf> {
    for dir in start.ancestors() {
        let found: Vec<Utf8PathBuf> = candidate_names()
            .map(|name| dir.join(name))
            .filter(|path| path.is_file())
            .collect();
        if !found.is_empty() {
            tracing::debug!(dir = %dir, files = found.len(), "project config found");
            return found;
        }
        if stop_marker.is_some_and(|marker| dir.join(marker).exists()) {
            break;
        }
    }
    Vec::new()
}

/// `config.<ext>` in the platform config directory, first extension that
/// exists.
fn user_config_file() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    let dir = Utf8Path::from_path(dirs.config_dir())?;
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    let path = path.as_std_path();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        _ => figment.merge(Toml::file_exact(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Category;
    use std::fs;
    use tempfile::TempDir;

    fn utf8_dir(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap()
    }

    fn write(dir: &Utf8Path, name: &str, body: &str) -> Utf8PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, body).unwrap();
        path
    }

    /// A loader isolated from the user file and from anything above `dir`.
    fn loader(dir: &Utf8Path) -> ConfigLoader {
        fs::create_dir_all(dir.join(".git")).unwrap();
        ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(dir)
    }

    #[test]
    fn defaults_select_builtin_data_and_all_rules() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.verb_lexicon.is_none());
        assert!(config.noun_lexicon.is_none());
        assert!(config.engine.suffix_rules);
        assert!(config.engine.infinitive_noun_identity);
        assert_eq!(config.engine.fallback_category, Category::Unknown);
        assert_eq!(config.input_limit(), Some(crate::DEFAULT_MAX_INPUT_BYTES));
    }

    #[test]
    fn index_limit_scales_with_input_limit() {
        let mut config = Config {
            max_input_bytes: Some(1000),
            ..Config::default()
        };
        assert_eq!(config.index_limit(), Some(1000 * crate::INDEX_SIZE_FACTOR));

        config.max_input_bytes = Some(usize::MAX);
        assert_eq!(config.index_limit(), Some(usize::MAX));

        config.disable_input_limit = true;
        assert_eq!(config.input_limit(), None);
        assert_eq!(config.index_limit(), None);
    }

    #[test]
    fn candidate_names_run_low_to_high() {
        let names: Vec<String> = candidate_names().collect();
        assert_eq!(names.len(), 16);
        assert_eq!(names.first().map(String::as_str), Some(".pashto.toml"));
        assert_eq!(names[4], "pashto.toml");
        assert_eq!(names[8], ".pashto-lex.toml");
        assert_eq!(names.last().map(String::as_str), Some("pashto-lex.json"));
    }

    #[test]
    fn nearest_directory_wins_and_its_files_merge() {
        let tmp = TempDir::new().unwrap();
        let root = utf8_dir(&tmp);
        write(&root, ".pashto-lex.toml", "index_file = \"outer.json\"\n");
        let corpus = root.join("corpus");
        write(&corpus, "pashto.toml", "word_list = \"words.txt\"\n");
        write(&corpus, "pashto-lex.yaml", "engine:\n  suffix_rules: false\n");

        let (config, sources) = loader(&root)
            .with_project_search(corpus.join("nt").as_path())
            .load()
            .unwrap();

        // corpus/nt does not exist; the walk starts from it anyway.
        assert_eq!(sources.of_kind(SourceKind::Project).count(), 2);
        assert_eq!(config.word_list, Some(corpus.join("words.txt")));
        assert!(!config.engine.suffix_rules);
        assert!(config.index_file.is_none(), "outer directory is not merged");
    }

    #[test]
    fn stop_marker_ends_the_walk() {
        let tmp = TempDir::new().unwrap();
        let root = utf8_dir(&tmp);
        write(&root, "pashto-lex.toml", "log_level = \"error\"\n");
        let repo = root.join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        fs::create_dir_all(repo.join("src")).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(repo.join("src"))
            .load()
            .unwrap();
        assert!(sources.is_empty());
        assert_eq!(config.log_level, LogLevel::Info);

        let (config, _) = ConfigLoader::new()
            .with_user_config(false)
            .with_stop_marker(None)
            .with_project_search(repo.join("src"))
            .load()
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Error);
    }

    #[test]
    fn explicit_file_overrides_project_and_becomes_primary() {
        let tmp = TempDir::new().unwrap();
        let root = utf8_dir(&tmp);
        write(&root, ".pashto-lex.toml", "log_level = \"debug\"\nmax_input_bytes = 10\n");
        let explicit = write(&root, "ci/override.json", r#"{"log_level": "warn"}"#);

        let (config, sources) = loader(&root).with_file(&explicit).load().unwrap();

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.max_input_bytes, Some(10));
        let kinds: Vec<SourceKind> = sources.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SourceKind::Project, SourceKind::Explicit]);
        assert_eq!(sources.primary_file(), Some(explicit.as_path()));
    }

    #[test]
    fn data_paths_follow_the_file_that_set_them() {
        let tmp = TempDir::new().unwrap();
        let root = utf8_dir(&tmp);
        write(
            &root,
            "pashto-lex.toml",
            "word_list = \"data/words.txt\"\nverb_lexicon = \"/srv/verbs.json\"\n",
        );
        let explicit = write(&root, "shared/extra.yaml", "index_file: out/index.json\n");

        let (config, _) = loader(&root).with_file(&explicit).load().unwrap();

        assert_eq!(config.word_list, Some(root.join("data/words.txt")));
        assert_eq!(config.index_file, Some(root.join("shared/out/index.json")));
        assert_eq!(
            config.verb_lexicon.as_deref().map(Utf8Path::as_str),
            Some("/srv/verbs.json")
        );
        assert!(config.noun_lexicon.is_none());
    }

    #[test]
    fn engine_table_in_each_format() {
        let tmp = TempDir::new().unwrap();
        let root = utf8_dir(&tmp);
        let bodies = [
            ("a.toml", "[engine]\nfallback_category = \"Noun/Adj\"\n"),
            ("b.yml", "engine:\n  fallback_category: verb\n"),
            ("c.json", r#"{"engine": {"fallback_category": "noun_adj"}}"#),
        ];
        let expected = [Category::NounAdj, Category::Verb, Category::NounAdj];
        for ((name, body), category) in bodies.into_iter().zip(expected) {
            let path = write(&root, name, body);
            let (config, _) = loader(&root).with_file(&path).load().unwrap();
            assert_eq!(config.engine.fallback_category, category, "{name}");
            assert!(config.engine.suffix_rules, "{name} keeps other rules");
        }
    }

    #[test]
    fn unknown_fallback_category_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let root = utf8_dir(&tmp);
        let path = write(&root, "bad.toml", "[engine]\nfallback_category = \"Adverb\"\n");

        let err = loader(&root).with_file(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Deserialize(_)));
        assert!(err.to_string().contains("invalid configuration"));
    }

    #[test]
    fn partial_yaml_keeps_engine_defaults() {
        let yaml = "engine:\n  infinitive_noun_identity: false\nword_list: words.txt\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.engine.infinitive_noun_identity);
        assert!(config.engine.suffix_rules);
        assert_eq!(config.word_list.as_deref(), Some(Utf8Path::new("words.txt")));
    }

    #[test]
    fn empty_yaml_is_default() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
