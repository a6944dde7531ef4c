//! keygate - manage the API users of a 3x-ui panel from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Merge configuration sources into a single `Config`.
//! - Run the selected command and map failures to structured exit codes.
//!
//! Does NOT handle:
//! - REST calls or session handling (see `crates/client`).
//! - Validation and reload rules (see `crates/panel`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap defaults.
//! - Precedence, lowest to highest: profile file, environment, command-line flags.
//! - Logs go to stderr and are off unless `-v` or `RUST_LOG` is given.
//! - Request metrics are only observable when `--metrics-bind` installs the exporter.

mod args;
mod commands;
mod dispatch;
mod error;
mod formatters;
mod interactive;

use std::time::Duration;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use keygate_client::MetricsExporter;
use keygate_config::{Config, ConfigError, ConfigLoader};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let _metrics_exporter = match cli.metrics_bind.as_deref().map(MetricsExporter::install) {
        None => None,
        Some(Ok(exporter)) => Some(exporter),
        Some(Err(e)) => {
            eprintln!("Failed to start metrics exporter: {}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    let exit_code = tokio::select! {
        result = run_command(cli, config) => match result {
            Ok(()) => ExitCode::Success,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                e.exit_code()
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nOperation cancelled by user");
            ExitCode::Interrupted
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "keygate=debug,keygate_cli=debug,keygate_panel=debug,keygate_client=debug,keygate_config=debug"
    } else {
        "off"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Profile first, then environment, then explicit flags.
fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut loader = ConfigLoader::new();

    if let Some(path) = cli
        .config_path
        .as_ref()
        .filter(|p| !p.to_string_lossy().trim().is_empty())
    {
        loader = loader.with_config_path(path.clone());
    }
    if let Some(profile) = cli.profile.as_ref().filter(|p| !p.trim().is_empty()) {
        loader = loader.with_profile_name(profile.clone());
    }

    loader = loader.from_profile()?.from_env()?;

    if let Some(url) = &cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(username) = &cli.username {
        loader = loader.with_username(username.clone());
    }
    if let Some(password) = &cli.password {
        loader = loader.with_password(password.clone());
    }
    if let Some(token) = &cli.api_token {
        loader = loader.with_api_token(token.clone());
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }
    if let Some(secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }

    loader.build()
}
