//! Conjugate command.

use std::collections::BTreeMap;

use clap::Args;
use owo_colors::OwoColorize;
use pashto_lex_core::config::Config;
use pashto_lex_core::conjugation::ConjugatedForm;
use pashto_lex_core::conjugate;
use tracing::{debug, instrument};

use super::load_lexicon;

/// Arguments for the `conjugate` subcommand.
#[derive(Args, Debug)]
pub struct ConjugateArgs {
    /// Infinitive root from the verb lexicon (e.g. لیدل).
    pub root: String,

    /// Also print the flattened form-to-romanization map.
    #[arg(long)]
    pub forms: bool,
}

/// Print the conjugation table of a lexicon verb.
#[instrument(name = "cmd_conjugate", skip_all, fields(root = %args.root))]
pub fn cmd_conjugate(args: ConjugateArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(root = %args.root, "executing conjugate command");

    let lexicon = load_lexicon(config)?;
    let Some(table) = conjugate(&lexicon, &args.root) else {
        if global_json {
            println!("null");
        } else {
            println!("no results for {}", args.root);
        }
        return Ok(());
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    let meta = &table.meta;
    println!("{} {}", meta.root.bold(), format!("[{}]", meta.category).green());
    println!(
        "  {}: {} / {}",
        "stems".dimmed(),
        meta.imperfective_stem,
        meta.perfective_stem
    );
    println!(
        "  {}: {} / {}",
        "roots".dimmed(),
        meta.imperfective_root,
        meta.perfective_root
    );
    println!("  {}: {}", "participle".dimmed(), meta.past_participle);

    print_paradigm(
        "Present",
        table.present.iter().map(|(slot, f)| (slot.as_str(), f)),
    );
    print_paradigm(
        "Subjunctive",
        table.subjunctive.iter().map(|(slot, f)| (slot.as_str(), f)),
    );
    print_paradigm(
        "Continuous past",
        table
            .continuous_past
            .iter()
            .map(|(slot, f)| (slot.as_str(), f)),
    );
    print_paradigm(
        "Simple past",
        table.simple_past.iter().map(|(slot, f)| (slot.as_str(), f)),
    );

    if args.forms {
        print_forms_map(&table.forms_map);
    }
    Ok(())
}

fn print_paradigm<'a>(title: &str, rows: impl Iterator<Item = (&'static str, &'a ConjugatedForm)>) {
    println!();
    println!("{}", title.bold().underline());
    for (slot, form) in rows {
        println!("  {:<6} {} ({})", slot.dimmed(), form.form, form.translit);
    }
}

fn print_forms_map(forms: &BTreeMap<String, String>) {
    println!();
    println!("{}", "Forms".bold().underline());
    for (form, translit) in forms {
        println!("  {form} {}", translit.dimmed());
    }
}
