//! REST API endpoint implementations.
//!
//! Every function here performs exactly one logical request (plus 429
//! retries) and unwraps the panel envelope. Session renewal lives one layer
//! up in [`crate::client`].

mod auth;
mod credentials;
mod request;
mod settings;

pub use auth::login;
pub use credentials::{
    create_credential, delete_credential, list_credentials, rotate_credential_token,
    set_credential_enabled, update_credential_rate,
};
pub use request::{authorize, read_envelope, send_request_with_retry};
pub use settings::{get_api_settings, update_api_settings};

/// Path of the credential admin routes, relative to the panel root.
pub const API_USERS_PATH: &str = "/panel/api-users";

/// Path of the panel login form, relative to the panel root.
pub const LOGIN_PATH: &str = "/login";

/// Build an absolute URL under the credential admin routes.
pub(crate) fn api_users_url(base_url: &str, suffix: &str) -> String {
    format!("{}{}{}", base_url, API_USERS_PATH, suffix)
}
