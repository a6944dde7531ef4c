//! API user commands.
//!
//! Responsibilities:
//! - List, create, enable/disable, delete, rotate and re-rate API users.
//! - Print a newly issued token exactly once, optionally copying it.
//!
//! Does NOT handle:
//! - Input validation or reload-after-mutation (done by the controller).
//! - Direct REST API calls (handled by the client crate).
//!
//! Invariants:
//! - Delete asks for confirmation unless `--force` is used; declining exits 0.
//! - The revealed token is dismissed before the command returns.

use anyhow::Result;
use keygate_client::CredentialId;
use keygate_panel::{CredentialController, DeleteOutcome};
use tracing::{debug, info};

use super::Output;
use crate::formatters::IssuedToken;

pub async fn run_list(controller: &CredentialController, output: &Output) -> Result<()> {
    info!("Listing API users");
    controller.load_credentials().await?;

    let rendered = {
        let state = controller.state();
        output.formatter().format_credentials(&state.credentials)?
    };
    output.emit(&rendered)
}

pub async fn run_create(
    controller: &CredentialController,
    name: &str,
    rate: i64,
    copy: bool,
    output: &Output,
) -> Result<()> {
    controller.set_form(name, rate);
    let created = controller.create().await?;

    let (id, name) = match &created {
        Some(user) => (Some(user.id), Some(user.name.clone())),
        None => (None, Some(name.trim().to_string())),
    };
    emit_revealed_token(controller, id, name.as_deref(), copy, output).await
}

pub async fn run_toggle(
    controller: &CredentialController,
    id: CredentialId,
    enabled: bool,
) -> Result<()> {
    controller.toggle(id, enabled).await?;
    let verb = if enabled { "enabled" } else { "disabled" };
    println!("API user {id} {verb}.");
    Ok(())
}

/// Without `force` the registry is loaded first so the prompt can name the user.
pub async fn run_delete(
    controller: &CredentialController,
    id: CredentialId,
    force: bool,
) -> Result<()> {
    if !force {
        if let Err(e) = controller.load_credentials().await {
            debug!(error = %e, "Could not load API users, prompt will show the id only");
        }
    }

    match controller.delete(id).await? {
        DeleteOutcome::Deleted => println!("API user {id} deleted."),
        DeleteOutcome::Declined => println!("Delete cancelled."),
    }
    Ok(())
}

pub async fn run_rotate(
    controller: &CredentialController,
    id: CredentialId,
    copy: bool,
    output: &Output,
) -> Result<()> {
    controller.rotate(id).await?;

    let name = controller.state().credential(id).map(|c| c.name.clone());
    emit_revealed_token(controller, Some(id), name.as_deref(), copy, output).await
}

pub async fn run_rate(controller: &CredentialController, id: CredentialId, rate: i64) -> Result<()> {
    controller.update_rate(id, rate).await?;
    if rate == 0 {
        println!("API user {id} now uses the default rate limit.");
    } else {
        println!("API user {id} rate limit set to {rate}/min.");
    }
    Ok(())
}

/// Print the token on display, copy it when asked, then dismiss it.
pub(super) async fn emit_revealed_token(
    controller: &CredentialController,
    id: Option<CredentialId>,
    name: Option<&str>,
    copy: bool,
    output: &Output,
) -> Result<()> {
    let rendered = {
        let state = controller.state();
        match state.visible_secret() {
            Some(secret) => Some(output.formatter().format_issued_token(&IssuedToken {
                id,
                name,
                token: secret.expose(),
            })?),
            None => None,
        }
    };

    let Some(rendered) = rendered else {
        eprintln!("Warning: the panel returned no token for this request.");
        return Ok(());
    };
    output.emit(&rendered)?;

    if copy {
        if controller.reveal_copy().await {
            eprintln!("Token copied to clipboard.");
        } else {
            eprintln!("Warning: failed to copy token to clipboard.");
        }
    }
    controller.dismiss_secret();
    Ok(())
}
