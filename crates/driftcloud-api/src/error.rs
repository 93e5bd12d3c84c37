use thiserror::Error;

/// Top-level error type for the `driftcloud-api` crate.
///
/// Classification happens once, in the client's response handling, in this
/// order: transport failure, decodable 4xx body, 5xx/undecodable error body,
/// 2xx with a malformed success body. `driftcloud-core` maps these into
/// domain-facing variants.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// API key could not be used as a header value.
    #[error("Invalid API key: {message}")]
    InvalidApiKey { message: String },

    // ── Control-plane responses ─────────────────────────────────────
    /// 404 from the control plane — the resource does not exist.
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Any other 4xx whose body decoded as `{"error": string}`.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// 5xx, or a non-2xx whose error body could not be decoded.
    #[error("Server error (HTTP {status})")]
    Server { status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization of a success body failed; raw body kept for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::NotFound { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error a poll loop may see again.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Server { .. } => true,
            _ => false,
        }
    }
}
