use chrono::{DateTime, Utc};

use driftcloud_api::types::{CloudProvider, NetworkStatus};

/// Desired state for a virtual network. All fields are immutable after
/// creation -- any change means replace-on-change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSpec {
    pub name: String,
    pub provider: CloudProvider,
    pub region: String,
    pub cidr_block: String,
}

/// Domain-level network state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkState {
    Pending,
    Active,
    Failed,
    Deleting,
    /// Treated as non-existent; the caller drops the resource from
    /// tracked state.
    Deleted,
    Unknown,
}

impl From<NetworkStatus> for NetworkState {
    fn from(status: NetworkStatus) -> Self {
        match status {
            NetworkStatus::Pending => Self::Pending,
            NetworkStatus::Active => Self::Active,
            NetworkStatus::Failed => Self::Failed,
            NetworkStatus::Deleting => Self::Deleting,
            NetworkStatus::Deleted => Self::Deleted,
            NetworkStatus::Unknown => Self::Unknown,
        }
    }
}

/// Provider-side VPC details, populated once the network is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpcInfo {
    pub resource_id: Option<String>,
    pub account_id: Option<String>,
}

/// Canonical network object as reported by the control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRecord {
    pub id: String,
    pub spec: NetworkSpec,
    pub state: NetworkState,
    pub created_at: Option<DateTime<Utc>>,
    pub vpc: Option<VpcInfo>,
}
