//! Index command: build the grammatical index from a word list.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use pashto_lex_core::config::Config;
use pashto_lex_core::{IndexBuilder, IndexReport, LoadReport, Vocabulary};
use serde::Serialize;
use tracing::{debug, info, instrument};

use super::{load_engine, load_word_list};

/// Arguments for the `index` subcommand.
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Word list (`.json` array or `word (count): refs` text). Defaults to
    /// the configured `word_list`.
    pub word_list: Option<Utf8PathBuf>,

    /// Write the index here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,
}

#[derive(Serialize)]
struct IndexSummary<'a> {
    word_list: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a str>,
    load: &'a LoadReport,
    index: &'a IndexReport,
}

/// Build the index and write it to stdout or `--output`.
///
/// With `--output`, a summary goes to stdout (JSON under `--json`).
/// Without it, stdout carries the index itself and the summary goes to
/// stderr.
#[instrument(name = "cmd_index", skip_all, fields(word_list))]
pub fn cmd_index(
    args: IndexArgs,
    global_json: bool,
    progress: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let word_list = args
        .word_list
        .or_else(|| config.word_list.clone())
        .context("no word list given (pass a path or set `word_list` in the config)")?;
    tracing::Span::current().record("word_list", word_list.as_str());
    debug!(word_list = %word_list, output = ?args.output, "executing index command");

    let engine = load_engine(config)?;
    let words = load_word_list(&word_list, max_input)?;
    let vocabulary = Vocabulary::from_forms(words.forms());

    let bar = if progress {
        let bar = ProgressBar::new(words.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .context("invalid progress template")?
                .progress_chars("=> "),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut builder = IndexBuilder::new(&engine, &vocabulary);
    for word in words.forms() {
        bar.set_message(word.text.clone());
        builder.add(word);
        bar.inc(1);
    }
    bar.finish_and_clear();
    let build = builder.finish();

    info!(
        words = build.report.words,
        roots = build.report.roots,
        fallback = build.report.fallback_words,
        "index built"
    );

    let rendered = serde_json::to_string_pretty(&build.index)?;
    let summary = IndexSummary {
        word_list: word_list.as_str(),
        output: args.output.as_deref().map(|p| p.as_str()),
        load: words.report(),
        index: &build.report,
    };

    match args.output {
        Some(ref path) => {
            std::fs::write(path.as_std_path(), rendered + "\n")
                .with_context(|| format!("failed to write {path}"))?;
            if global_json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
        None => {
            println!("{rendered}");
            if !global_json {
                eprint_summary(&summary);
            }
        }
    }

    Ok(())
}

fn summary_lines(summary: &IndexSummary<'_>) -> Vec<(&'static str, String)> {
    let report = summary.index;
    vec![
        ("Words", report.words.to_string()),
        ("Roots", report.roots.to_string()),
        ("Identities", report.identities.to_string()),
        ("Occurrences", report.occurrences.to_string()),
        ("Fallback words", report.fallback_words.to_string()),
        ("Ambiguous forms", report.ambiguous_forms.to_string()),
        ("Homonym roots", report.homonym_roots.to_string()),
        ("Shadowed stems", report.shadowed_stem_matches.to_string()),
        ("Skipped records", summary.load.skipped.len().to_string()),
    ]
}

fn print_summary(summary: &IndexSummary<'_>) {
    println!(
        "{} indexed {} into {}",
        "OK:".green(),
        summary.word_list,
        summary.output.unwrap_or("stdout").cyan()
    );
    for (label, value) in summary_lines(summary) {
        println!("  {}: {}", label.dimmed(), value);
    }
}

fn eprint_summary(summary: &IndexSummary<'_>) {
    eprintln!("{} indexed {}", "OK:".green(), summary.word_list);
    for (label, value) in summary_lines(summary) {
        eprintln!("  {}: {}", label.dimmed(), value);
    }
}
