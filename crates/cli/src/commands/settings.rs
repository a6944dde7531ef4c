//! Access policy command.
//!
//! `settings set` reads the current policy first so that omitted flags keep
//! their current value, then saves and prints the reloaded policy.

use anyhow::Result;
use clap::Subcommand;
use keygate_client::ApiSettings;
use keygate_panel::{CredentialController, PanelError, ValidationError};
use tracing::info;

use super::Output;

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show the current access policy
    Get,
    /// Change the access policy
    Set {
        /// Require a token for every API request
        #[arg(long)]
        token_only: Option<bool>,
        /// Requests per minute for users without their own limit
        #[arg(long, allow_negative_numbers = true)]
        default_rate: Option<i64>,
    },
}

pub async fn run(
    controller: &CredentialController,
    command: SettingsCommand,
    output: &Output,
) -> Result<()> {
    match command {
        SettingsCommand::Get => {
            info!("Loading API settings");
            controller.load_settings().await?;
        }
        SettingsCommand::Set {
            token_only,
            default_rate,
        } => {
            let default_rate = default_rate.map(parse_rate).transpose()?;

            controller.load_settings().await?;
            let current = controller.state().settings;
            let next = ApiSettings {
                token_only: token_only.unwrap_or(current.token_only),
                default_rate_limit_per_minute: default_rate
                    .unwrap_or(current.default_rate_limit_per_minute),
            };
            controller.save_settings(next).await?;
        }
    }

    let rendered = {
        let state = controller.state();
        output.formatter().format_settings(&state.settings)?
    };
    output.emit(&rendered)
}

fn parse_rate(rate: i64) -> Result<u32, PanelError> {
    if rate < 0 {
        return Err(ValidationError::NegativeRate.into());
    }
    u32::try_from(rate).map_err(|_| ValidationError::RateOutOfRange(rate).into())
}
