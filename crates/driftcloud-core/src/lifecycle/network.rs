use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use driftcloud_api::CloudClient;
use driftcloud_api::types::{NetworkConfig, NetworkStatus};

use crate::error::CoreError;
use crate::model::{NetworkRecord, NetworkSpec};
use crate::poll::{self, PollOptions, Wait};

use super::Lifecycle;

/// Lifecycle controller for virtual networks.
///
/// Networks are replace-on-change: every spec field is immutable after
/// creation, so `update` always fails with `ImmutableResource`.
pub struct NetworkLifecycle {
    client: Arc<CloudClient>,
    poll: PollOptions,
}

impl NetworkLifecycle {
    pub fn new(client: Arc<CloudClient>) -> Self {
        Self {
            client,
            poll: PollOptions::default(),
        }
    }

    pub fn with_poll_options(mut self, poll: PollOptions) -> Self {
        self.poll = poll;
        self
    }

    fn wait<'a>(
        &'a self,
        id: &'a str,
        target: NetworkStatus,
        cancel: &'a CancellationToken,
    ) -> Wait<'a, NetworkStatus> {
        Wait {
            kind: "network",
            id,
            target,
            options: &self.poll,
            cancel,
        }
    }
}

impl Lifecycle for NetworkLifecycle {
    type Spec = NetworkSpec;
    type Record = NetworkRecord;

    async fn create(
        &self,
        spec: &NetworkSpec,
        cancel: &CancellationToken,
    ) -> Result<NetworkRecord, CoreError> {
        let created = self
            .client
            .create_network(&NetworkConfig::from(spec))
            .await?;
        info!("network {} create issued, awaiting active", created.id);

        let settled = poll::await_settled(
            self.wait(&created.id, NetworkStatus::Active, cancel),
            || self.client.get_network(&created.id),
            |n| n.status,
        )
        .await?;

        Ok(settled.into())
    }

    async fn read(&self, id: &str) -> Result<Option<NetworkRecord>, CoreError> {
        match self.client.get_network(id).await {
            Ok(n) if n.status == NetworkStatus::Deleted => Ok(None),
            Ok(n) => Ok(Some(n.into())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(
        &self,
        _id: &str,
        _spec: &NetworkSpec,
        _cancel: &CancellationToken,
    ) -> Result<NetworkRecord, CoreError> {
        Err(CoreError::ImmutableResource { kind: "network" })
    }

    async fn delete(&self, id: &str, cancel: &CancellationToken) -> Result<(), CoreError> {
        match self.client.delete_network(id).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                warn!("network {id} already absent, treating delete as satisfied");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        poll::await_gone(
            self.wait(id, NetworkStatus::Deleted, cancel),
            || self.client.get_network(id),
            |n| n.status,
        )
        .await
    }

    async fn import(&self, id: &str) -> Result<NetworkRecord, CoreError> {
        let network = self.client.get_network(id).await?;
        Ok(network.into())
    }
}
