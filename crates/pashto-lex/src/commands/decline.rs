//! Decline command.

use clap::Args;
use owo_colors::OwoColorize;
use pashto_lex_core::config::Config;
use pashto_lex_core::{DeclensionPattern, decline, normalize};
use tracing::{debug, instrument};

use super::load_lexicon;

/// Arguments for the `decline` subcommand.
#[derive(Args, Debug)]
pub struct DeclineArgs {
    /// Lemma to decline.
    pub lemma: String,

    /// Declension pattern. Defaults to the lexicon entry's pattern, then
    /// `basic`.
    #[arg(long, value_enum)]
    pub pattern: Option<DeclensionPattern>,
}

/// Print the declension table of a noun or adjective.
#[instrument(name = "cmd_decline", skip_all, fields(lemma = %args.lemma))]
pub fn cmd_decline(args: DeclineArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(lemma = %args.lemma, pattern = ?args.pattern, "executing decline command");

    let pattern = match args.pattern {
        Some(pattern) => pattern,
        None => load_lexicon(config)?
            .noun(&normalize(&args.lemma))
            .and_then(|entry| entry.pattern)
            .unwrap_or_default(),
    };
    let table = decline(&args.lemma, pattern);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!(
        "{} {}",
        table.lemma.bold(),
        format!("[{}]", table.pattern).green()
    );
    for (slot, form) in &table.forms {
        println!("  {:<16} {} ({})", slot.dimmed(), form.form, form.translit);
    }
    Ok(())
}
