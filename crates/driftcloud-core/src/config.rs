// ── Engine configuration ──
//
// Describes *how* to reach the control plane. Carries the credential
// and tuning knobs but never touches disk; driftcloud-config builds
// one of these from profiles/env and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use driftcloud_api::{CloudClient, DEFAULT_API_HOST, TransportConfig};

use crate::error::CoreError;
use crate::poll::PollOptions;

/// Configuration for one reconciliation engine instance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Control-plane base URL.
    pub api_host: Url,
    /// Bearer credential for every request.
    pub api_key: SecretString,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Convergence-wait tuning shared by all controllers.
    pub poll: PollOptions,
}

impl EngineConfig {
    /// Config against the default host with default tuning.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_host: Url::parse(DEFAULT_API_HOST).expect("default host is a valid URL"),
            api_key,
            timeout: driftcloud_api::transport::DEFAULT_TIMEOUT,
            poll: PollOptions::default(),
        }
    }

    /// Build the shared API client for this config.
    pub fn build_client(&self) -> Result<CloudClient, CoreError> {
        let transport = TransportConfig {
            timeout: self.timeout,
        };
        Ok(CloudClient::from_api_key_with_host(
            self.api_host.as_str(),
            &self.api_key,
            &transport,
        )?)
    }
}
