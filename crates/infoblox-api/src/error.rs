use thiserror::Error;

/// Top-level error type for the `infoblox-api` crate.
///
/// Covers every failure mode across the client: authentication, transport,
/// WAPI request rejections, and response decoding. A rejected request is an
/// [`Error::Api`]; an empty lookup result is NOT an error at the transport
/// layer — fetch operations report it as `Ok(None)`, and only reference
/// resolution turns it into [`Error::NotFound`].
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credential validation failed (bad username/password, account disabled).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── WAPI ────────────────────────────────────────────────────────
    /// The appliance rejected the request. The message embeds the operand
    /// identity and any detail the WAPI error body carried.
    #[error("WAPI error (HTTP {status}): {message}")]
    Api { message: String, status: u16 },

    /// A reference lookup matched nothing for a mutating operation.
    #[error("{resource} not found for {key}")]
    NotFound { resource: &'static str, key: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Caller input ────────────────────────────────────────────────
    /// A configuration or argument value was rejected before any request
    /// was issued.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

impl Error {
    /// Returns `true` if this error indicates the credentials were rejected
    /// and re-authentication with different credentials might resolve it.
    pub fn is_auth_rejected(&self) -> bool {
        match self {
            Self::Authentication { .. } => true,
            Self::Api { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::Api { status: 404, .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// The HTTP status code the appliance answered with, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
