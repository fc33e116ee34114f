//! Search command: reverse lookup in a built index.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use pashto_lex_core::config::Config;
use pashto_lex_core::search::Sibling;
use pashto_lex_core::{SearchHit, search_key};
use serde::Serialize;
use tracing::{debug, instrument};

use super::load_search_index;

/// Arguments for the `search` subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Surface form to look up. Spaces in phrases map to `_`.
    pub word: String,

    /// Index JSON written by `index`. Defaults to the configured
    /// `index_file`.
    #[arg(long, value_name = "FILE")]
    pub index: Option<Utf8PathBuf>,

    /// Also list every form filed under each matching root.
    #[arg(long)]
    pub siblings: bool,
}

#[derive(Serialize)]
struct SearchOutput {
    query: String,
    hits: Vec<SearchHit>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    siblings: Vec<RootSiblings>,
}

#[derive(Serialize)]
struct RootSiblings {
    root: String,
    forms: Vec<Sibling>,
}

/// Look a word up and print every root it is filed under.
#[instrument(name = "cmd_search", skip_all, fields(word = %args.word))]
pub fn cmd_search(
    args: SearchArgs,
    global_json: bool,
    config: &Config,
    max_index: Option<usize>,
) -> anyhow::Result<()> {
    debug!(word = %args.word, index = ?args.index, "executing search command");

    let path = args
        .index
        .or_else(|| config.index_file.clone())
        .context("no index given (pass --index or set `index_file` in the config)")?;
    let search = load_search_index(&path, max_index)?;

    let hits = search.search(&args.word);
    let siblings = if args.siblings {
        let mut roots: Vec<&str> = hits.iter().map(|h| h.root.as_str()).collect();
        roots.dedup();
        roots
            .into_iter()
            .map(|root| RootSiblings {
                root: root.to_string(),
                forms: search.siblings(root),
            })
            .collect()
    } else {
        Vec::new()
    };

    let output = SearchOutput {
        query: search_key(&args.word),
        hits,
        siblings,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if output.hits.is_empty() {
        println!("no results for {}", output.query);
        return Ok(());
    }

    for hit in &output.hits {
        println!(
            "{} {} {}",
            hit.root.cyan().bold(),
            format!("[{}]", hit.category).green(),
            hit.description
        );
        println!("  {}: {} ({})", "form".dimmed(), hit.form, hit.translit);
        println!("  {}: {}", "pattern".dimmed(), hit.pattern);
        println!("  {}: {}", "count".dimmed(), hit.count);
        if !hit.verses.is_empty() {
            let verses: Vec<String> = hit.verses.iter().map(ToString::to_string).collect();
            println!("  {}: {}", "verses".dimmed(), verses.join(", "));
        }
    }
    for group in &output.siblings {
        println!();
        println!("{}", format!("Forms of {}", group.root).bold().underline());
        for sibling in &group.forms {
            println!(
                "  {} {} {} ({})",
                sibling.form,
                format!("[{}]", sibling.category).dimmed(),
                sibling.description,
                sibling.count
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_index_is_an_error() {
        let args = SearchArgs {
            word: "وینم".to_string(),
            index: None,
            siblings: false,
        };
        let err = cmd_search(args, false, &Config::default(), None).unwrap_err();
        assert!(err.to_string().contains("no index"));
    }

    #[test]
    fn miss_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("index.json")).unwrap();
        std::fs::write(&path, "{}").unwrap();
        let args = SearchArgs {
            word: "کور".to_string(),
            index: Some(path),
            siblings: true,
        };
        assert!(cmd_search(args, false, &Config::default(), None).is_ok());
    }
}
