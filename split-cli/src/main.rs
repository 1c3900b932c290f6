use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use split_cli::config::AppConfig;
use split_cli::render::SnapshotView;
use split_cli::session::Session;
use split_cli::{edit_log, logging, repl};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Split a bill: derive the tax percentage from the receipt and apply it to
/// your own charges.
///
/// Without `--replay`, starts an interactive prompt on stdin.
#[derive(Debug, Parser)]
#[command(name = "bill-splitter", version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay a CSV edit log, print the resulting bill and exit.
    #[arg(short, long)]
    replay: Option<PathBuf>,

    /// Log level or EnvFilter directive, overrides the config file.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log output to this file, overrides the config file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Loads the config file and applies command-line overrides.
    fn resolve_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = AppConfig::load_or_default(self.config.as_deref())?;
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
        Ok(config)
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init_logging(&config.logging)?;
    debug!(?config, "configuration loaded");

    let mut session = Session::new(&config.session);

    match &cli.replay {
        Some(path) => {
            info!("replaying edit log {}", path.display());
            let edits = edit_log::load_from_file(path)
                .with_context(|| format!("failed to load edit log: {}", path.display()))?;
            edit_log::replay(&mut session, &edits)
                .with_context(|| format!("failed to replay edit log: {}", path.display()))?;
            print!("{}", SnapshotView(&session.snapshot()));
        }
        None => {
            let stdin = io::stdin();
            repl::run(&mut session, stdin.lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}
