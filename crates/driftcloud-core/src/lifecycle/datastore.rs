use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use driftcloud_api::CloudClient;
use driftcloud_api::types::{DatastoreConfig, DatastoreStatus};

use crate::error::CoreError;
use crate::model::{DatastoreRecord, DatastoreSpec};
use crate::poll::{self, PollOptions, Wait};

use super::Lifecycle;

/// Lifecycle controller for managed datastores.
///
/// The only kind with true in-place update. Updates refuse to stack:
/// before issuing one, the current remote status is re-read and a
/// resource already mid-transition fails fast with `ResourceBusy`.
pub struct DatastoreLifecycle {
    client: Arc<CloudClient>,
    poll: PollOptions,
}

impl DatastoreLifecycle {
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
        target: DatastoreStatus,
        cancel: &'a CancellationToken,
    ) -> Wait<'a, DatastoreStatus> {
        Wait {
            kind: "datastore",
            id,
            target,
            options: &self.poll,
            cancel,
        }
    }
}

impl Lifecycle for DatastoreLifecycle {
    type Spec = DatastoreSpec;
    type Record = DatastoreRecord;

    async fn create(
        &self,
        spec: &DatastoreSpec,
        cancel: &CancellationToken,
    ) -> Result<DatastoreRecord, CoreError> {
        let created = self
            .client
            .create_datastore(&DatastoreConfig::from(spec))
            .await?;
        info!("datastore {} create issued, awaiting active", created.id);

        let settled = poll::await_settled(
            self.wait(&created.id, DatastoreStatus::Active, cancel),
            || self.client.get_datastore(&created.id),
            |d| d.status,
        )
        .await?;

        Ok(settled.into())
    }

    async fn read(&self, id: &str) -> Result<Option<DatastoreRecord>, CoreError> {
        match self.client.get_datastore(id).await {
            Ok(d) if d.status == DatastoreStatus::Deleted => Ok(None),
            Ok(d) => Ok(Some(d.into())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(
        &self,
        id: &str,
        spec: &DatastoreSpec,
        cancel: &CancellationToken,
    ) -> Result<DatastoreRecord, CoreError> {
        // Refuse to stack transitions: a datastore already moving has
        // to settle before another update may be issued.
        let current = self.client.get_datastore(id).await?;
        if matches!(
            current.status,
            DatastoreStatus::Updating | DatastoreStatus::Pending | DatastoreStatus::Deleting
        ) {
            return Err(CoreError::ResourceBusy {
                id: id.to_owned(),
                status: format!("{:?}", current.status).to_lowercase(),
            });
        }

        self.client
            .update_datastore(id, &DatastoreConfig::from(spec))
            .await?;
        info!("datastore {id} update issued, awaiting active");

        let settled = poll::await_settled(
            self.wait(id, DatastoreStatus::Active, cancel),
            || self.client.get_datastore(id),
            |d| d.status,
        )
        .await?;

        Ok(settled.into())
    }

    async fn delete(&self, id: &str, cancel: &CancellationToken) -> Result<(), CoreError> {
        match self.client.delete_datastore(id).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                warn!("datastore {id} already absent, treating delete as satisfied");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        poll::await_gone(
            self.wait(id, DatastoreStatus::Deleted, cancel),
            || self.client.get_datastore(id),
            |d| d.status,
        )
        .await
    }

    async fn import(&self, id: &str) -> Result<DatastoreRecord, CoreError> {
        let datastore = self.client.get_datastore(id).await?;
        Ok(datastore.into())
    }
}
