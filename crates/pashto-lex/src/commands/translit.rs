//! Translit command.

use clap::Args;
use pashto_lex_core::transliterate;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `translit` subcommand.
#[derive(Args, Debug)]
pub struct TranslitArgs {
    /// Pashto text. Several arguments are joined with spaces.
    #[arg(required = true)]
    pub text: Vec<String>,
}

#[derive(Serialize)]
struct TranslitOutput {
    text: String,
    translit: String,
}

/// Print an approximate romanization.
#[instrument(name = "cmd_translit", skip_all)]
pub fn cmd_translit(args: TranslitArgs, global_json: bool) -> anyhow::Result<()> {
    let text = args.text.join(" ");
    debug!(chars = text.chars().count(), "executing translit command");

    let translit = transliterate(&text);
    if global_json {
        let output = TranslitOutput { text, translit };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{translit}");
    }
    Ok(())
}
