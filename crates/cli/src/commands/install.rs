//! First-run provisioning.
//!
//! Applies the access policy and creates one API user when the panel has
//! none. Running it again is safe: existing users are left alone and the
//! policy is re-applied.

use anyhow::Result;
use keygate_panel::{BootstrapOutcome, BootstrapRequest, CredentialController};
use tracing::info;

use super::Output;
use crate::formatters::{BootstrapReport, IssuedToken};

pub async fn run(
    controller: &CredentialController,
    request: BootstrapRequest,
    output: &Output,
) -> Result<()> {
    info!(
        token_only = request.token_only,
        default_rate = request.default_rate,
        "Bootstrapping API access"
    );
    let requested_name = request.name.trim().to_string();
    let outcome = controller.bootstrap(request).await?;

    let rendered = {
        let state = controller.state();
        let (existing_users, created) = match &outcome {
            BootstrapOutcome::AlreadyProvisioned(count) => (Some(*count), None),
            BootstrapOutcome::Created(user) => {
                let created = state.visible_secret().map(|secret| IssuedToken {
                    id: user.as_ref().map(|u| u.id),
                    name: Some(user.as_ref().map_or(requested_name.as_str(), |u| u.name.as_str())),
                    token: secret.expose(),
                });
                (None, created)
            }
        };
        output.formatter().format_bootstrap(&BootstrapReport {
            settings: state.settings,
            existing_users,
            created,
        })?
    };
    output.emit(&rendered)?;

    controller.dismiss_secret();
    Ok(())
}
