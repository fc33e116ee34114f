//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use pashto_lex_core::Vocabulary;
use pashto_lex_core::config::Config;
use rmcp::{ServiceExt, transport::stdio};
use tracing::{debug, info, instrument};

use super::{load_engine, load_search_index, load_word_list};
use crate::server::LexiconServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Word list supplying the vocabulary for suffix rules. Defaults to the
    /// configured `word_list`.
    #[arg(long, value_name = "FILE")]
    pub word_list: Option<Utf8PathBuf>,

    /// Index JSON for `search_word`. Defaults to the configured
    /// `index_file`.
    #[arg(long, value_name = "FILE")]
    pub index: Option<Utf8PathBuf>,
}

/// Load the engine and data, then serve until the client disconnects.
///
/// Stdout carries the protocol, so all diagnostics go through tracing to
/// stderr or the log file.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    args: ServeArgs,
    max_input: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    debug!(word_list = ?args.word_list, index = ?args.index, "executing serve command");

    let max_index = config.index_limit();

    let engine = load_engine(&config)?;
    let vocabulary = match args.word_list.or(config.word_list) {
        Some(path) => Vocabulary::from_forms(load_word_list(&path, max_input)?.forms()),
        None => Vocabulary::default(),
    };
    let search = args
        .index
        .or(config.index_file)
        .map(|path| load_search_index(&path, max_index))
        .transpose()?;

    info!(
        vocabulary = vocabulary.len(),
        index = search.is_some(),
        "starting MCP server on stdio"
    );

    let server = LexiconServer::new(engine, vocabulary, search);
    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server failed")?;

    info!("MCP server stopped");
    Ok(())
}
