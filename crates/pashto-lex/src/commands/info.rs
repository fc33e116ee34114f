//! `info`: the build and the configuration every other command would see.

use clap::Args;
use owo_colors::OwoColorize;
use pashto_lex_core::config::{Config, ConfigSource, ConfigSources};
use serde::Serialize;
use tracing::{debug, instrument};

/// `info` takes only the global flags.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Serialize)]
struct Build {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
    mcp: bool,
}

const BUILD: Build = Build {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
    description: env!("CARGO_PKG_DESCRIPTION"),
    license: env!("CARGO_PKG_LICENSE"),
    mcp: cfg!(feature = "mcp"),
};

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    config_files: Vec<ConfigSource>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    verb_lexicon: String,
    noun_lexicon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    word_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    index_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_index_bytes: Option<usize>,
    infinitive_noun_identity: bool,
    suffix_rules: bool,
    fallback_category: String,
}

const BUILTIN: &str = "built-in";

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            config_files: sources.iter().cloned().collect(),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            verb_lexicon: config
                .verb_lexicon
                .as_ref()
                .map_or_else(|| BUILTIN.to_string(), |p| p.to_string()),
            noun_lexicon: config
                .noun_lexicon
                .as_ref()
                .map_or_else(|| BUILTIN.to_string(), |p| p.to_string()),
            word_list: config.word_list.as_ref().map(|p| p.to_string()),
            index_file: config.index_file.as_ref().map(|p| p.to_string()),
            max_input_bytes: config.input_limit(),
            max_index_bytes: config.index_limit(),
            infinitive_noun_identity: config.engine.infinitive_noun_identity,
            suffix_rules: config.engine.suffix_rules,
            fallback_category: config.engine.fallback_category.as_str().to_string(),
        }
    }
}

#[derive(Serialize)]
struct Report {
    #[serde(flatten)]
    build: Build,
    config: ConfigInfo,
}

/// Print the build and the merged configuration with where it came from.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(files = sources.len(), "executing info command");

    let report = Report {
        build: BUILD,
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let build = &report.build;
    println!("{} {}", build.name.bold(), build.version.green());
    if !build.description.is_empty() {
        println!("{}", build.description);
    }
    if !build.license.is_empty() {
        println!("{}: {}", "License".dimmed(), build.license);
    }
    let mcp = if build.mcp { "enabled" } else { "not built" };
    println!("{}: {mcp}", "MCP server".dimmed());

    let cfg = &report.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    match cfg.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }
    if cfg.config_files.len() > 1 {
        for source in &cfg.config_files {
            println!("  {} {}", format!("{:?}", source.kind).dimmed(), source.path);
        }
    }
    println!("{}: {}", "Log level".dimmed(), cfg.log_level);
    if let Some(ref dir) = cfg.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }
    match (cfg.max_input_bytes, cfg.max_index_bytes) {
        (Some(max), Some(index)) => {
            println!("{}: {max} bytes (index: {index} bytes)", "Input limit".dimmed());
        }
        _ => println!("{}: {}", "Input limit".dimmed(), "disabled".yellow()),
    }

    println!();
    println!("{}", "Data".bold().underline());
    println!("{}: {}", "Verb lexicon".dimmed(), cfg.verb_lexicon);
    println!("{}: {}", "Noun lexicon".dimmed(), cfg.noun_lexicon);
    print_opt("Word list", cfg.word_list.as_deref());
    print_opt("Index file", cfg.index_file.as_deref());

    println!();
    println!("{}", "Engine".bold().underline());
    println!(
        "{}: {}",
        "Infinitive noun identity".dimmed(),
        cfg.infinitive_noun_identity
    );
    println!("{}: {}", "Suffix rules".dimmed(), cfg.suffix_rules);
    println!("{}: {}", "Fallback category".dimmed(), cfg.fallback_category);

    Ok(())
}

fn print_opt(label: &str, value: Option<&str>) {
    let value = value.unwrap_or("(not set)");
    println!("{}: {value}", label.dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pashto_lex_core::config::ConfigLoader;

    #[test]
    fn defaults_report_builtin_data_and_no_file() {
        let info = ConfigInfo::from_config(&Config::default(), &ConfigSources::default());
        assert!(info.config_file.is_none());
        assert!(info.config_files.is_empty());
        assert_eq!(info.log_level, "info");
        assert_eq!(info.verb_lexicon, BUILTIN);
        assert_eq!(info.noun_lexicon, BUILTIN);
        assert!(info.suffix_rules);
        assert_eq!(info.max_index_bytes, Config::default().index_limit());
    }

    #[test]
    fn report_lists_every_merged_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = camino::Utf8Path::from_path(tmp.path()).unwrap();
        std::fs::create_dir(root.join(".git")).unwrap();
        std::fs::write(root.join("pashto.toml"), "log_level = \"warn\"\n").unwrap();
        std::fs::write(root.join(".pashto-lex.toml"), "word_list = \"w.txt\"\n").unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(root)
            .load()
            .unwrap();

        let info = ConfigInfo::from_config(&config, &sources);
        assert_eq!(info.config_files.len(), 2);
        assert!(info.config_file.unwrap().ends_with(".pashto-lex.toml"));
        assert_eq!(info.log_level, "warn");
        assert_eq!(info.word_list, Some(root.join("w.txt").to_string()));
    }

    #[test]
    fn text_and_json_both_render() {
        let config = Config::default();
        let sources = ConfigSources::default();
        assert!(cmd_info(InfoArgs::default(), false, &config, &sources).is_ok());
        assert!(cmd_info(InfoArgs::default(), true, &config, &sources).is_ok());
    }
}
