//! Credential management methods for [`PanelClient`].

use crate::client::PanelClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{CreateCredentialParams, CreatedCredential, Credential, CredentialId, RotatedToken};

impl PanelClient {
    /// List all credentials.
    pub async fn list_credentials(&mut self) -> Result<Vec<Credential>> {
        crate::retry_call!(
            self,
            __bearer,
            endpoints::list_credentials(
                &self.http,
                &self.base_url,
                __bearer.as_deref(),
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }

    /// Create a credential; the response carries its one-time token.
    pub async fn create_credential(
        &mut self,
        params: &CreateCredentialParams,
    ) -> Result<CreatedCredential> {
        crate::retry_call!(
            self,
            __bearer,
            endpoints::create_credential(
                &self.http,
                &self.base_url,
                __bearer.as_deref(),
                params,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }

    /// Enable or disable a credential.
    pub async fn set_credential_enabled(&mut self, id: CredentialId, enabled: bool) -> Result<()> {
        crate::retry_call!(
            self,
            __bearer,
            endpoints::set_credential_enabled(
                &self.http,
                &self.base_url,
                __bearer.as_deref(),
                id,
                enabled,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }

    /// Delete a credential.
    pub async fn delete_credential(&mut self, id: CredentialId) -> Result<()> {
        crate::retry_call!(
            self,
            __bearer,
            endpoints::delete_credential(
                &self.http,
                &self.base_url,
                __bearer.as_deref(),
                id,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }

    /// Issue a new token for a credential.
    pub async fn rotate_credential_token(&mut self, id: CredentialId) -> Result<RotatedToken> {
        crate::retry_call!(
            self,
            __bearer,
            endpoints::rotate_credential_token(
                &self.http,
                &self.base_url,
                __bearer.as_deref(),
                id,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }

    /// Set a credential's own rate limit (0 = use the default).
    pub async fn update_credential_rate(&mut self, id: CredentialId, rate: u32) -> Result<()> {
        crate::retry_call!(
            self,
            __bearer,
            endpoints::update_credential_rate(
                &self.http,
                &self.base_url,
                __bearer.as_deref(),
                id,
                rate,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }
}
