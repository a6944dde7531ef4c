//! Command dispatch.
//!
//! Builds the controller and output settings once, then routes the parsed
//! subcommand to its implementation.

use anyhow::Result;
use keygate_config::Config;
use keygate_panel::BootstrapRequest;

use crate::args::{Cli, Commands};
use crate::commands::{self, Output, credentials};
use crate::formatters::OutputFormat;
use crate::interactive::confirmation_gate;

pub async fn run_command(cli: Cli, config: Config) -> Result<()> {
    let output = Output {
        format: OutputFormat::from_str(&cli.output)?,
        file: cli.output_file,
    };

    let force = matches!(cli.command, Commands::Delete { force: true, .. });
    let controller = commands::build_controller(&config, confirmation_gate(force))?;

    match cli.command {
        Commands::List => credentials::run_list(&controller, &output).await,
        Commands::Create { name, rate, copy } => {
            credentials::run_create(&controller, &name, rate, copy, &output).await
        }
        Commands::Enable { id } => credentials::run_toggle(&controller, id, true).await,
        Commands::Disable { id } => credentials::run_toggle(&controller, id, false).await,
        Commands::Delete { id, force } => credentials::run_delete(&controller, id, force).await,
        Commands::Rotate { id, copy } => {
            credentials::run_rotate(&controller, id, copy, &output).await
        }
        Commands::Rate { id, rate } => credentials::run_rate(&controller, id, rate).await,
        Commands::Settings { command } => {
            commands::settings::run(&controller, command, &output).await
        }
        Commands::Install {
            token_only,
            default_rate,
            bootstrap_user,
            bootstrap_rate,
        } => {
            let request = BootstrapRequest {
                token_only,
                default_rate,
                name: bootstrap_user,
                rate: bootstrap_rate,
            };
            commands::install::run(&controller, request, &output).await
        }
    }
}
