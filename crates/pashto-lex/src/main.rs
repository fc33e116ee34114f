//! The `pashto-lex` binary.
#![deny(unsafe_code)]

use std::path::Path;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use pashto_lex::{Cli, Commands, GlobalArgs, commands};
use pashto_lex_core::config::{Config, ConfigLoader, ConfigSources};

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let global = cli.global;
    global.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    // Without a subcommand clap has already printed help.
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(dir) = &global.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("cannot change directory to {}", dir.display()))?;
    }
    let (config, sources) = load_config(&global)?;

    let logging = observability::ObservabilityConfig::from_env_with_overrides(
        config.log_dir.as_ref().map(|dir| dir.clone().into_std_path_buf()),
    );
    let filter = observability::env_filter(global.quiet, global.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&logging, filter)
        .context("failed to initialize logging")?;
    tracing::debug!(?global, config_files = sources.len(), "starting");

    let result = dispatch(command, &global, config, &sources);
    if let Err(err) = &result {
        tracing::error!(error = %err, "command failed");
    }
    result
}

/// Discover config from the working directory and merge `--config` on top.
fn load_config(global: &GlobalArgs) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = std::env::current_dir().context("cannot read the working directory")?;
    let mut loader = ConfigLoader::new().with_project_search(utf8(&cwd, "working directory")?);
    if let Some(path) = &global.config {
        loader = loader.with_file(utf8(path, "config path")?);
    }
    loader.load().context("failed to load configuration")
}

fn utf8(path: &Path, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path.to_path_buf())
        .map_err(|p| anyhow::anyhow!("{what} is not valid UTF-8: {}", p.display()))
}

fn dispatch(
    command: Commands,
    global: &GlobalArgs,
    config: Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let json = global.json;
    let words_limit = config.input_limit();
    let index_limit = config.index_limit();

    match command {
        Commands::Index(args) => {
            let progress = !global.quiet && !json;
            commands::index::cmd_index(args, json, progress, &config, words_limit)
        }
        Commands::Infer(args) => commands::infer::cmd_infer(args, json, &config, words_limit),
        Commands::Search(args) => commands::search::cmd_search(args, json, &config, index_limit),
        Commands::Conjugate(args) => commands::conjugate::cmd_conjugate(args, json, &config),
        Commands::Decline(args) => commands::decline::cmd_decline(args, json, &config),
        Commands::Translit(args) => commands::translit::cmd_translit(args, json),
        Commands::Lexicon(args) => commands::lexicon::cmd_lexicon(args, json, &config),
        Commands::Info(args) => commands::info::cmd_info(args, json, &config, sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .context("failed to start the async runtime")?
            .block_on(commands::serve::cmd_serve(args, words_limit, config)),
    }
}
