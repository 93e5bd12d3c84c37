use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde_json::Value;

use driftcloud_api::types::{
    CloudProvider, ClusterConfig, DatastoreStatus, FeatureFlags, MaintenanceWindow,
    PerformanceTier,
};

/// Desired state for a managed datastore. Unlike networks and
/// connections, most of this supports in-place update.
#[derive(Debug, Clone, PartialEq)]
pub struct DatastoreSpec {
    pub name: String,
    /// Attach to a private network; `None` means public endpoint.
    pub network_id: Option<String>,
    pub provider: CloudProvider,
    pub region: String,
    pub availability_zones: Vec<String>,
    pub memory_bytes: u64,
    pub performance_tier: PerformanceTier,
    pub replicas: Option<u32>,
    pub features: FeatureFlags,
    /// Opaque backup schedule, passed through to the control plane.
    pub backup_policy: Option<Value>,
    /// Seed the datastore from an existing backup at create time.
    pub restore_from_backup: Option<String>,
    pub cluster: Option<ClusterConfig>,
    pub maintenance_window: Option<MaintenanceWindow>,
    pub disable_passkey: bool,
}

/// Domain-level datastore state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatastoreState {
    Pending,
    Updating,
    Restoring,
    Active,
    Deleting,
    Deleted,
    Unknown,
}

impl From<DatastoreStatus> for DatastoreState {
    fn from(status: DatastoreStatus) -> Self {
        match status {
            DatastoreStatus::Pending => Self::Pending,
            DatastoreStatus::Updating => Self::Updating,
            DatastoreStatus::Restoring => Self::Restoring,
            DatastoreStatus::Active => Self::Active,
            DatastoreStatus::Deleting => Self::Deleting,
            DatastoreStatus::Deleted => Self::Deleted,
            DatastoreStatus::Unknown => Self::Unknown,
        }
    }
}

/// Canonical datastore object as reported by the control plane.
///
/// `passkey` is `None` when passkey auth is disabled; the remote side
/// signals that solely through an empty secret on the wire.
#[derive(Debug, Clone)]
pub struct DatastoreRecord {
    pub id: String,
    pub spec: DatastoreSpec,
    pub state: DatastoreState,
    pub created_at: Option<DateTime<Utc>>,
    pub addr: Option<String>,
    pub dashboard_url: Option<String>,
    pub passkey: Option<SecretString>,
    /// Whether a requested restore-from-backup has been applied.
    pub restore_loaded: bool,
}
