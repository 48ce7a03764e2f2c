mod host;

use anyhow::{Context, Result};
use clap::{arg, command};
use host::{Flow, UciHost};
use predictor_engine::{BotConfig, EngineFactory};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "bot.toml";

fn main() -> Result<()> {
    let matches = command!()
        .about("UCI engine that plays the moves of a learned move predictor")
        .arg(
            arg!(-c --config <FILE> "Bot configuration (TOML)")
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(-m --model <FILE> "Play with this single ONNX checkpoint")
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(--deterministic "Always play the policy's top move"))
        .get_matches();

    let explicit = matches.get_one::<PathBuf>("config");
    let mut config = load_config(explicit)?;
    if let Some(model) = matches.get_one::<PathBuf>("model") {
        config.use_single_model(model.clone());
    }
    if matches.get_flag("deterministic") {
        config.engine.stochastic = false;
    }

    init_logging(&config.log.level);

    // Load the model before anything talks to the GUI.
    let factory = EngineFactory::from_config(config).context("failed to load the predictor")?;
    let mut host = UciHost::new(factory).context("failed to build the engine")?;
    info!("ready");

    // UCI engines communicate via stdin/stdout.
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if host.handle_line(&line, &mut stdout)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

/// An explicitly named config must exist; the default one is optional.
fn load_config(explicit: Option<&PathBuf>) -> Result<BotConfig> {
    let path = explicit
        .map(PathBuf::as_path)
        .unwrap_or_else(|| Path::new(DEFAULT_CONFIG));
    if explicit.is_none() && !path.exists() {
        return Ok(BotConfig::default());
    }
    BotConfig::load(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Logs go to stderr; stdout belongs to the protocol.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}
