// Transport configuration for building reqwest::Client instances.
//
// The control plane is always public TLS, so there is no certificate
// knob here — just the request timeout and default headers.

use std::time::Duration;

/// Fixed per-request timeout applied unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        Ok(reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("driftcloud-rs/", env!("CARGO_PKG_VERSION")))
            .build()?)
    }

    /// Build a `reqwest::Client` with additional default headers.
    ///
    /// Used to inject the `Authorization: Bearer` header.
    pub fn build_client_with_headers(
        &self,
        headers: reqwest::header::HeaderMap,
    ) -> Result<reqwest::Client, crate::error::Error> {
        Ok(reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("driftcloud-rs/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?)
    }
}
