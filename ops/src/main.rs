// ops/src/main.rs

// --- Imports ---
use chainops::{cli::Cli, commands, config::load_config, diagnostics, state::AppState};
use clap::Parser;
use eyre::Result;
use tracing_subscriber::{fmt, EnvFilter};

async fn run(cli: Cli) -> Result<()> {
    let config = load_config()?;
    let state = AppState::connect(config).await?;
    commands::dispatch(&state, &cli.command).await
}

// --- Main Execution ---
#[tokio::main]
async fn main() {
    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .try_init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        diagnostics::report(&e);
        std::process::exit(1);
    }
}

// END OF FILE: ops/src/main.rs
