//! Gig posting wizard CLI.
//!
//! Checks draft files against the wizard's step validators, replays complete
//! drafts through the wizard and submits them, and prints the onboarding
//! greeting from the cached store.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tokio::sync::oneshot;
use tracing::{debug, info};

use gigdraft::core::types::{BUDGET_PLACEHOLDER, WizardStep};
use gigdraft::core::validators::is_step_valid_with;
use gigdraft::exit_codes;
use gigdraft::io::config::{WizardConfig, load_config, write_config};
use gigdraft::io::draft_store::{load_draft, write_json};
use gigdraft::io::onboarding::{greeting, read_cached_name};
use gigdraft::io::submitter::{SimulatedSubmitter, SubmitError};
use gigdraft::logging;
use gigdraft::session::WizardSession;

const DEFAULT_CONFIG_PATH: &str = ".gigdraft/config.toml";

#[derive(Parser)]
#[command(
    name = "gigdraft",
    version,
    about = "Validate and submit gig drafts through the posting wizard"
)]
struct Cli {
    /// Path to the wizard config (TOML).
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the default config if missing.
    Init {
        /// Overwrite an existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Report which wizard steps a draft file satisfies.
    Check {
        /// Draft file (JSON).
        draft: PathBuf,
    },
    /// Replay a draft through the wizard and submit it.
    Submit {
        /// Draft file (JSON).
        draft: PathBuf,
        /// Write the submitted gig here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Override the simulated submission delay.
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Print the greeting built from the cached onboarding name.
    Greet {
        /// Key/value store file (defaults to the configured store).
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Check { draft } => cmd_check(&cli.config, &draft),
        Command::Submit {
            draft,
            out,
            delay_ms,
        } => cmd_submit(&cli.config, &draft, out.as_deref(), delay_ms),
        Command::Greet { store } => cmd_greet(&cli.config, store),
    }
}

fn cmd_init(config_path: &Path, force: bool) -> Result<i32> {
    if !force && config_path.exists() {
        debug!(path = %config_path.display(), "config exists, leaving untouched");
        return Ok(exit_codes::OK);
    }
    write_config(config_path, &WizardConfig::default())
        .with_context(|| format!("init {}", config_path.display()))?;
    info!(path = %config_path.display(), "wrote default config");
    Ok(exit_codes::OK)
}

fn cmd_check(config_path: &Path, draft_path: &Path) -> Result<i32> {
    let cfg = load_config(config_path)?;
    let rules = cfg.rules();
    let draft = load_draft(draft_path)?;

    let mut complete = true;
    for step in WizardStep::EDITABLE {
        let valid = is_step_valid_with(step, &draft, &rules);
        complete &= valid;
        if !valid && step == WizardStep::Budget && draft.amount.is_none() {
            println!("{step}: blocked (no amount entered; placeholder {BUDGET_PLACEHOLDER})");
        } else {
            println!("{}: {}", step, if valid { "ok" } else { "blocked" });
        }
    }

    Ok(if complete {
        exit_codes::OK
    } else {
        exit_codes::INCOMPLETE
    })
}

fn cmd_submit(
    config_path: &Path,
    draft_path: &Path,
    out: Option<&Path>,
    delay_ms: Option<u64>,
) -> Result<i32> {
    let mut cfg = load_config(config_path)?;
    if let Some(delay_ms) = delay_ms {
        cfg.submit_delay_ms = delay_ms;
        cfg.validate()?;
    }
    let draft = load_draft(draft_path)?;

    let mut session = WizardSession::new(cfg.rules());
    session
        .replay(&draft)
        .with_context(|| format!("replay {}", draft_path.display()))?;

    let submitter = SimulatedSubmitter::new(cfg.submit_delay(), cfg.rules());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    let result = runtime.block_on(async {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = cancel_tx.send(());
            }
        });
        session.submit(&submitter, cancel_rx).await
    });

    match result {
        Ok(manifest_id) => {
            let submitted = session
                .submitted()
                .ok_or_else(|| anyhow!("submission {manifest_id} not recorded"))?;
            match out {
                Some(path) => {
                    write_json(path, submitted)?;
                    println!("{manifest_id}");
                }
                None => println!(
                    "{}",
                    serde_json::to_string_pretty(submitted).context("serialize submitted gig")?
                ),
            }
            Ok(exit_codes::OK)
        }
        Err(SubmitError::Cancelled) => {
            eprintln!("submission cancelled");
            Ok(exit_codes::CANCELLED)
        }
        Err(err) => Err(err).context("submit gig"),
    }
}

fn cmd_greet(config_path: &Path, store: Option<PathBuf>) -> Result<i32> {
    let store = match store {
        Some(store) => store,
        None => load_config(config_path)?.onboarding_store,
    };
    let name = read_cached_name(&store);
    println!("{}", greeting(name.as_deref()));
    Ok(exit_codes::OK)
}
