use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use driftcloud_api::CloudClient;
use driftcloud_api::types::{ConnectionConfig, ConnectionStatus};

use crate::error::CoreError;
use crate::model::{ConnectionRecord, ConnectionSpec};
use crate::poll::{self, PollOptions, Wait};

use super::Lifecycle;

/// Lifecycle controller for peering connections.
///
/// A freshly created connection settles at `inactive`, not `active`:
/// activation requires out-of-band approval of the peering request on
/// the peer account. Like networks, connections are replace-on-change.
pub struct ConnectionLifecycle {
    client: Arc<CloudClient>,
    poll: PollOptions,
}

impl ConnectionLifecycle {
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
        target: ConnectionStatus,
        cancel: &'a CancellationToken,
    ) -> Wait<'a, ConnectionStatus> {
        Wait {
            kind: "connection",
            id,
            target,
            options: &self.poll,
            cancel,
        }
    }
}

impl Lifecycle for ConnectionLifecycle {
    type Spec = ConnectionSpec;
    type Record = ConnectionRecord;

    async fn create(
        &self,
        spec: &ConnectionSpec,
        cancel: &CancellationToken,
    ) -> Result<ConnectionRecord, CoreError> {
        let created = self
            .client
            .create_connection(&ConnectionConfig::from(spec))
            .await?;
        info!("connection {} create issued, awaiting inactive", created.id);

        let settled = poll::await_settled(
            self.wait(&created.id, ConnectionStatus::Inactive, cancel),
            || self.client.get_connection(&created.id),
            |c| c.status,
        )
        .await?;

        Ok(settled.into())
    }

    async fn read(&self, id: &str) -> Result<Option<ConnectionRecord>, CoreError> {
        match self.client.get_connection(id).await {
            Ok(c) if c.status == ConnectionStatus::Deleted => Ok(None),
            Ok(c) => Ok(Some(c.into())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(
        &self,
        _id: &str,
        _spec: &ConnectionSpec,
        _cancel: &CancellationToken,
    ) -> Result<ConnectionRecord, CoreError> {
        Err(CoreError::ImmutableResource { kind: "connection" })
    }

    async fn delete(&self, id: &str, cancel: &CancellationToken) -> Result<(), CoreError> {
        match self.client.delete_connection(id).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                warn!("connection {id} already absent, treating delete as satisfied");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        poll::await_gone(
            self.wait(id, ConnectionStatus::Deleted, cancel),
            || self.client.get_connection(id),
            |c| c.status,
        )
        .await
    }

    async fn import(&self, id: &str) -> Result<ConnectionRecord, CoreError> {
        let connection = self.client.get_connection(id).await?;
        Ok(connection.into())
    }
}
