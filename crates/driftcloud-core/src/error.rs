// ── Core error types ──
//
// Caller-facing errors from driftcloud-core. These distinguish three
// outcomes that matter to a reconciling caller: "definitely failed"
// (Rejected/Server), "unknown outcome" (ConvergenceTimeout -- the remote
// side may still be transitioning), and "already satisfied" (NotFound on
// delete, which the lifecycle layer swallows before it gets here).
// The `From<driftcloud_api::Error>` impl translates transport-layer
// errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the control plane: {reason}")]
    Transport { reason: String },

    // ── Control-plane responses ──────────────────────────────────────
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Request rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Control-plane failure (HTTP {status})")]
    Server { status: u16 },

    #[error("Malformed response from the control plane: {message}")]
    Decode { message: String },

    // ── Convergence errors ───────────────────────────────────────────
    #[error("{kind} {id} did not reach status '{target}' within {waited_secs}s")]
    ConvergenceTimeout {
        kind: &'static str,
        id: String,
        target: String,
        waited_secs: u64,
    },

    #[error("Wait for {kind} {id} was cancelled")]
    Cancelled { kind: &'static str, id: String },

    // ── Lifecycle rule violations ────────────────────────────────────
    #[error("{kind} attributes are immutable -- replace the resource instead of updating it")]
    ImmutableResource { kind: &'static str },

    #[error("Datastore {id} is mid-transition (status '{status}'); retry once it settles")]
    ResourceBusy { id: String, status: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<driftcloud_api::Error> for CoreError {
    fn from(err: driftcloud_api::Error) -> Self {
        match err {
            driftcloud_api::Error::Transport(ref e) => CoreError::Transport {
                reason: e.to_string(),
            },
            driftcloud_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            driftcloud_api::Error::InvalidApiKey { message } => CoreError::Config { message },
            driftcloud_api::Error::NotFound { message } => CoreError::NotFound { message },
            driftcloud_api::Error::Api { status, message } => {
                CoreError::Rejected { status, message }
            }
            driftcloud_api::Error::Server { status } => CoreError::Server { status },
            driftcloud_api::Error::Deserialization { message, body: _ } => {
                CoreError::Decode { message }
            }
        }
    }
}
