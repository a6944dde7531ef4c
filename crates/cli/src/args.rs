//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and `KEYGATE_*` environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not merge configuration sources (see `main.rs`).

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "keygate")]
#[command(about = "Manage the API users of a 3x-ui panel from the command line", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  keygate list\n  keygate create --name svc-bot --rate 60\n  keygate rotate --id 3\n  keygate delete --id 5 --force\n  keygate settings set --token-only true --default-rate 120\n  keygate --profile prod install --default-rate 60\n"
)]
pub struct Cli {
    /// Panel URL including its web base path (e.g., https://panel.example.com:2053/secret)
    #[arg(short, long, global = true, env = "KEYGATE_BASE_URL")]
    pub base_url: Option<String>,

    /// Username for panel login
    #[arg(short, long, global = true, env = "KEYGATE_USERNAME")]
    pub username: Option<String>,

    /// Password for panel login
    #[arg(short, long, global = true, env = "KEYGATE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// API token for bearer authentication (preferred over username/password)
    #[arg(short, long, global = true, env = "KEYGATE_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "KEYGATE_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for rate-limited requests
    #[arg(long, global = true, env = "KEYGATE_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, env = "KEYGATE_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Profile name to load from the profiles file
    #[arg(long, global = true, env = "KEYGATE_PROFILE")]
    pub profile: Option<String>,

    /// Path to a custom profiles file (overrides the default location)
    #[arg(long, global = true, env = "KEYGATE_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Output file path (saves results to file instead of stdout)
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Serve Prometheus metrics at http://ADDR/metrics while the command runs
    #[arg(long, global = true, env = "KEYGATE_METRICS_BIND", value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    /// Log requests and controller notices to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List API users
    List,

    /// Create an API user and print its token once
    Create {
        /// Display name of the new user
        #[arg(short, long)]
        name: String,
        /// Requests per minute; 0 uses the panel default
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        rate: i64,
        /// Also copy the token to the system clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Enable an API user
    Enable {
        /// Id of the user
        #[arg(long)]
        id: u64,
    },

    /// Disable an API user
    Disable {
        /// Id of the user
        #[arg(long)]
        id: u64,
    },

    /// Delete an API user
    Delete {
        /// Id of the user
        #[arg(long)]
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Issue a new token for an API user, revoking the old one
    Rotate {
        /// Id of the user
        #[arg(long)]
        id: u64,
        /// Also copy the token to the system clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Change the per-minute rate limit of an API user
    Rate {
        /// Id of the user
        #[arg(long)]
        id: u64,
        /// Requests per minute; 0 uses the panel default
        #[arg(short, long, allow_negative_numbers = true)]
        rate: i64,
    },

    /// Show or change the API access policy
    Settings {
        #[command(subcommand)]
        command: commands::settings::SettingsCommand,
    },

    /// Apply the access policy and create the first API user if none exist
    Install {
        /// Require a token for every API request; `false` keeps the current policy
        #[arg(long, default_value_t = keygate_config::constants::DEFAULT_API_TOKEN_ONLY, action = ArgAction::Set)]
        token_only: bool,
        /// Default requests per minute for users without their own limit
        #[arg(long, default_value_t = i64::from(keygate_config::constants::DEFAULT_API_RATE_LIMIT_PER_MINUTE), allow_negative_numbers = true)]
        default_rate: i64,
        /// Name of the user created when none exist
        #[arg(long, default_value = keygate_config::constants::DEFAULT_BOOTSTRAP_NAME)]
        bootstrap_user: String,
        /// Rate limit of the bootstrap user
        #[arg(long, default_value_t = i64::from(keygate_config::constants::DEFAULT_API_RATE_LIMIT_PER_MINUTE), allow_negative_numbers = true)]
        bootstrap_rate: i64,
    },
}
