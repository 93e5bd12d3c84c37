// ── Resource lifecycle controllers ──
//
// One flat controller per resource kind, composing the API client,
// the mappers, and the convergence poller into the five lifecycle
// operations. Controllers hold no per-operation state; the caller
// serializes operations per resource id.

mod connection;
mod datastore;
mod network;

pub use connection::ConnectionLifecycle;
pub use datastore::DatastoreLifecycle;
pub use network::NetworkLifecycle;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use driftcloud_api::CloudClient;

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::poll::PollOptions;

/// The five-operation capability set every resource kind implements.
///
/// Create/Update/Delete take a `CancellationToken` bounding their
/// polling phase; cancelling it aborts the wait within one poll
/// interval. Read and Import never poll.
#[allow(async_fn_in_trait)]
pub trait Lifecycle {
    type Spec;
    type Record;

    /// Provision the resource and wait until it reaches its
    /// provisioned status.
    async fn create(
        &self,
        spec: &Self::Spec,
        cancel: &CancellationToken,
    ) -> Result<Self::Record, CoreError>;

    /// Fetch by id. `Ok(None)` means the resource no longer exists and
    /// must be dropped from tracked state by the caller.
    async fn read(&self, id: &str) -> Result<Option<Self::Record>, CoreError>;

    /// Apply a changed spec in place, where the kind supports it.
    async fn update(
        &self,
        id: &str,
        spec: &Self::Spec,
        cancel: &CancellationToken,
    ) -> Result<Self::Record, CoreError>;

    /// Idempotent delete: an already-absent resource is success.
    async fn delete(&self, id: &str, cancel: &CancellationToken) -> Result<(), CoreError>;

    /// Materialize a resource from its remote id alone. The output is
    /// indistinguishable from a fresh post-create read.
    async fn import(&self, id: &str) -> Result<Self::Record, CoreError>;
}

/// All three controllers over one shared client.
///
/// The client is injected explicitly -- there is no process-wide
/// singleton -- so multiple engines against different accounts can
/// coexist in one process.
pub struct Engine {
    pub networks: NetworkLifecycle,
    pub datastores: DatastoreLifecycle,
    pub connections: ConnectionLifecycle,
}

impl Engine {
    pub fn from_config(config: &EngineConfig) -> Result<Self, CoreError> {
        let client = Arc::new(config.build_client()?);
        Ok(Self::from_client(client, config.poll.clone()))
    }

    pub fn from_client(client: Arc<CloudClient>, poll: PollOptions) -> Self {
        Self {
            networks: NetworkLifecycle::new(Arc::clone(&client)).with_poll_options(poll.clone()),
            datastores: DatastoreLifecycle::new(Arc::clone(&client))
                .with_poll_options(poll.clone()),
            connections: ConnectionLifecycle::new(client).with_poll_options(poll),
        }
    }
}
