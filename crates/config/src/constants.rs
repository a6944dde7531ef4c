//! Centralized constants for the keygate workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default session time-to-live in seconds (1 hour).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Default buffer time before session expiry to proactively log in again.
pub const DEFAULT_EXPIRY_BUFFER_SECS: u64 = 60;

/// Default maximum number of retries for rate-limited requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Configuration Bounds
// =============================================================================

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Maximum allowed session TTL in seconds (24 hours).
pub const MAX_SESSION_TTL_SECS: u64 = 86400;

/// Maximum allowed value for `max_retries`.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// API Access Policy Defaults
// =============================================================================

/// Panel default for "API requests must present a token".
pub const DEFAULT_API_TOKEN_ONLY: bool = true;

/// Panel default rate limit in requests per minute.
pub const DEFAULT_API_RATE_LIMIT_PER_MINUTE: u32 = 120;

/// Name of the credential created by `bootstrap` when none exist.
pub const DEFAULT_BOOTSTRAP_NAME: &str = "api-root";

// =============================================================================
// Controller Defaults
// =============================================================================

/// Default channel capacity for notices emitted by the controller.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Maximum characters of a copied secret shown in notices.
pub const DEFAULT_CLIPBOARD_PREVIEW_CHARS: usize = 6;
