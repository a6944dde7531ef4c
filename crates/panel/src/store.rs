//! Transport seam consumed by the controller.
//!
//! [`CredentialStore`] is object safe (boxed futures) so the controller can
//! hold it as `Arc<dyn CredentialStore>` and tests can substitute a double.
//! The production implementation is [`SharedClient`]: the panel client
//! behind a `tokio::sync::Mutex`, since login renewal needs `&mut` access.

use std::sync::Arc;

use futures::future::BoxFuture;
use keygate_client::{
    ApiSettings, CreateCredentialParams, CreatedCredential, Credential, CredentialId, PanelClient,
    Result, RotatedToken,
};
use tokio::sync::Mutex;

/// Shared client wrapper for async operations.
pub type SharedClient = Arc<Mutex<PanelClient>>;

/// Remote credential store operations.
pub trait CredentialStore: Send + Sync {
    fn get_settings(&self) -> BoxFuture<'_, Result<ApiSettings>>;

    fn save_settings(&self, settings: ApiSettings) -> BoxFuture<'_, Result<()>>;

    fn list(&self) -> BoxFuture<'_, Result<Vec<Credential>>>;

    fn create(&self, params: CreateCredentialParams) -> BoxFuture<'_, Result<CreatedCredential>>;

    fn set_enabled(&self, id: CredentialId, enabled: bool) -> BoxFuture<'_, Result<()>>;

    fn rotate(&self, id: CredentialId) -> BoxFuture<'_, Result<RotatedToken>>;

    fn delete(&self, id: CredentialId) -> BoxFuture<'_, Result<()>>;

    fn update_rate(&self, id: CredentialId, rate: u32) -> BoxFuture<'_, Result<()>>;
}

impl CredentialStore for Mutex<PanelClient> {
    fn get_settings(&self) -> BoxFuture<'_, Result<ApiSettings>> {
        Box::pin(async move { self.lock().await.get_api_settings().await })
    }

    fn save_settings(&self, settings: ApiSettings) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.lock().await.update_api_settings(&settings).await })
    }

    fn list(&self) -> BoxFuture<'_, Result<Vec<Credential>>> {
        Box::pin(async move { self.lock().await.list_credentials().await })
    }

    fn create(&self, params: CreateCredentialParams) -> BoxFuture<'_, Result<CreatedCredential>> {
        Box::pin(async move { self.lock().await.create_credential(&params).await })
    }

    fn set_enabled(&self, id: CredentialId, enabled: bool) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.lock().await.set_credential_enabled(id, enabled).await })
    }

    fn rotate(&self, id: CredentialId) -> BoxFuture<'_, Result<RotatedToken>> {
        Box::pin(async move { self.lock().await.rotate_credential_token(id).await })
    }

    fn delete(&self, id: CredentialId) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.lock().await.delete_credential(id).await })
    }

    fn update_rate(&self, id: CredentialId, rate: u32) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.lock().await.update_credential_rate(id, rate).await })
    }
}
