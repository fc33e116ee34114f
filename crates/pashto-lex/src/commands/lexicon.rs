//! Lexicon command: summarize the loaded tables and report stem masking.

use std::collections::BTreeMap;

use clap::Args;
use owo_colors::OwoColorize;
use pashto_lex_core::config::Config;
use pashto_lex_core::conjugation::generated_forms;
use pashto_lex_core::lexicon::LexiconSummary;
use serde::Serialize;
use tracing::{debug, instrument};

use super::load_lexicon;

/// Arguments for the `lexicon` subcommand.
#[derive(Args, Debug, Default)]
pub struct LexiconArgs {
    /// Also list the stem table in match order.
    #[arg(long)]
    pub stems: bool,

    /// Also list every generated verb form with the infinitives producing it.
    #[arg(long)]
    pub forms: bool,
}

#[derive(Serialize)]
struct StemRow<'a> {
    stem: &'a str,
    root: &'a str,
}

#[derive(Serialize)]
struct LexiconOutput<'a> {
    #[serde(flatten)]
    summary: LexiconSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    stems: Option<Vec<StemRow<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    forms: Option<BTreeMap<String, Vec<String>>>,
}

/// Print lexicon counts, stem conflicts, and optionally the stem table.
#[instrument(name = "cmd_lexicon", skip_all, fields(stems = args.stems, forms = args.forms))]
pub fn cmd_lexicon(args: LexiconArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(stems = args.stems, forms = args.forms, "executing lexicon command");

    let lexicon = load_lexicon(config)?;
    let table = lexicon.stem_table();
    let output = LexiconOutput {
        summary: lexicon.summary(),
        stems: args.stems.then(|| {
            table
                .iter()
                .map(|&(stem, root)| StemRow { stem, root })
                .collect()
        }),
        forms: args.forms.then(|| generated_forms(&lexicon)),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let summary = &output.summary;
    println!("{}", "Lexicon".bold().underline());
    println!("{}: {}", "Verbs".dimmed(), summary.verbs);
    println!("{}: {}", "Nouns/adjectives".dimmed(), summary.nouns);
    println!("{}: {}", "Verb stems".dimmed(), summary.stems);
    println!("{}: {}", "Noun forms".dimmed(), summary.noun_forms);

    println!();
    if summary.conflicts.is_empty() {
        println!("{} no stem conflicts", "OK:".green());
    } else {
        println!(
            "{} {} stem conflict(s)",
            "WARN:".yellow(),
            summary.conflicts.len()
        );
        for conflict in &summary.conflicts {
            println!(
                "  {} ({}) is masked by {} ({})",
                conflict.stem, conflict.root, conflict.masked_by, conflict.masked_by_root
            );
        }
    }

    if let Some(ref stems) = output.stems {
        println!();
        println!("{}", "Stems".bold().underline());
        for row in stems {
            println!("  {} {}", row.stem, format!("-> {}", row.root).dimmed());
        }
    }

    if let Some(ref forms) = output.forms {
        println!();
        println!("{}", "Generated forms".bold().underline());
        for (form, lemmas) in forms {
            println!("  {} {}", form, format!("-> {}", lemmas.join(", ")).dimmed());
        }
    }
    Ok(())
}
