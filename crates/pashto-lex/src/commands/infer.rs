//! Infer command: show every root reading of one word.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use pashto_lex_core::config::Config;
use pashto_lex_core::{Inference, Vocabulary};
use tracing::{debug, instrument};

use super::{load_engine, load_word_list};

/// Arguments for the `infer` subcommand.
#[derive(Args, Debug)]
pub struct InferArgs {
    /// Word to analyze.
    pub word: String,

    /// Word list supplying the vocabulary for suffix rules. Defaults to the
    /// configured `word_list`; without one, only the word itself counts as
    /// attested.
    #[arg(long, value_name = "FILE")]
    pub word_list: Option<Utf8PathBuf>,
}

/// Print the interpretations of a word.
#[instrument(name = "cmd_infer", skip_all, fields(word = %args.word))]
pub fn cmd_infer(
    args: InferArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(word = %args.word, word_list = ?args.word_list, "executing infer command");

    let engine = load_engine(config)?;
    let vocabulary = match args.word_list.as_ref().or(config.word_list.as_ref()) {
        Some(path) => Vocabulary::from_forms(load_word_list(path, max_input)?.forms()),
        None => Vocabulary::from_words([args.word.as_str()]),
    };

    let inference = engine.analyze(&args.word, &vocabulary);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&inference)?);
    } else {
        print_inference(&inference);
    }
    Ok(())
}

fn print_inference(inference: &Inference) {
    println!("{}", inference.word.bold());
    for interp in &inference.interpretations {
        println!(
            "  {} {} {}",
            interp.root.cyan(),
            format!("[{}]", interp.category).green(),
            interp.description
        );
        println!("    {}: {}", "pattern".dimmed(), interp.pattern);
    }
    for shadow in &inference.shadowed {
        println!(
            "  {} stem {} of {} was masked by {} of {}",
            "note:".yellow(),
            shadow.stem,
            shadow.root,
            shadow.winner,
            shadow.winner_root
        );
    }
}
