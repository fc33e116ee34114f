//! Argument parsing and command wiring for the `pashto-lex` binary.
//!
//! [`Cli`] is the clap parser the binary runs; [`command()`] hands the same
//! definition to `xtask` for man pages and completions. Every subcommand
//! lives in [`commands`], and the MCP tool surface in `server` behind the
//! default `mcp` feature.

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

/// When to color terminal output.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    /// Color even when piped.
    Always,
    /// Plain text.
    Never,
}

impl ColorChoice {
    /// Force `owo-colors` on or off; `Auto` leaves its detection alone.
    pub fn apply(self) {
        let forced = match self {
            Self::Auto => None,
            Self::Always => Some(true),
            Self::Never => Some(false),
        };
        if let Some(on) = forced {
            owo_colors::set_override(on);
        }
    }
}

const AFTER_LONG_HELP: &str = "\
Configuration is read from .pashto-lex.toml (or pashto-lex.*, pashto.*;
toml, yaml, yml or json) in the working directory or the nearest parent,
stopping at .git. Any key can be set from the environment:

    PASHTO_LEX_VERB_LEXICON        verb lexicon JSON (built-in when unset)
    PASHTO_LEX_NOUN_LEXICON        irregular noun lexicon JSON
    PASHTO_LEX_WORD_LIST           word list for index, infer and serve
    PASHTO_LEX_INDEX_FILE          built index for search and serve
    PASHTO_LEX_MAX_INPUT_BYTES     word-list size limit (index files get 16x)
    PASHTO_LEX_ENGINE__<SWITCH>    e.g. PASHTO_LEX_ENGINE__SUFFIX_RULES=false
    PASHTO_LEX_LOG_DIR             write JSONL logs here
    PASHTO_LEX_LOG_PATH            write JSONL logs to this file
    RUST_LOG                       log filter, e.g. pashto_lex_core=debug
";

/// Root inference and grammatical indexing for Pashto corpora.
#[derive(Parser)]
#[command(name = "pashto-lex", version, about, long_about = None)]
#[command(arg_required_else_help = true, after_long_help = AFTER_LONG_HELP)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print the bare version number and exit
    #[arg(long)]
    pub version_only: bool,

    /// Flags shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags accepted before or after any subcommand.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Merge this config file above the discovered ones
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Change to DIR before discovering config and reading relative paths
    #[arg(short = 'C', long = "chdir", global = true, value_name = "DIR")]
    pub chdir: Option<PathBuf>,

    /// Log errors only and hide progress bars
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Raise the log level (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Terminal colors
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Build the grammatical index from a corpus word list
    Index(commands::index::IndexArgs),

    /// Show every root reading of one word
    Infer(commands::infer::InferArgs),

    /// Look a word up in a built index
    Search(commands::search::SearchArgs),

    /// Conjugate a verb from the lexicon
    Conjugate(commands::conjugate::ConjugateArgs),

    /// Show the declension table of a noun or adjective
    Decline(commands::decline::DeclineArgs),

    /// Transliterate Pashto text
    Translit(commands::translit::TranslitArgs),

    /// Summarize the lexicon and report stem conflicts
    Lexicon(commands::lexicon::LexiconArgs),

    /// Show the version and the effective configuration
    Info(commands::info::InfoArgs),

    /// Serve the lexicon tools over MCP on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// The clap definition, for man pages and shell completions.
pub fn command() -> clap::Command {
    Cli::command()
}
