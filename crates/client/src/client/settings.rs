//! API access policy methods for [`PanelClient`].

use crate::client::PanelClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::ApiSettings;

impl PanelClient {
    /// Fetch the API access policy.
    pub async fn get_api_settings(&mut self) -> Result<ApiSettings> {
        crate::retry_call!(
            self,
            __bearer,
            endpoints::get_api_settings(
                &self.http,
                &self.base_url,
                __bearer.as_deref(),
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }

    /// Replace the API access policy.
    pub async fn update_api_settings(&mut self, settings: &ApiSettings) -> Result<()> {
        crate::retry_call!(
            self,
            __bearer,
            endpoints::update_api_settings(
                &self.http,
                &self.base_url,
                __bearer.as_deref(),
                settings,
                self.max_retries,
                self.metrics.as_ref(),
            )
            .await
        )
    }
}
