use driftcloud_api::types::ConnectionStatus;

/// The peer side of a network peering connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerSpec {
    pub account_id: String,
    pub vpc_id: String,
    pub cidr_block: Option<String>,
    pub region: Option<String>,
}

/// Desired state for a peering connection. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSpec {
    pub name: String,
    pub network_id: String,
    pub peer: PeerSpec,
}

/// Domain-level connection state.
///
/// `Inactive` is the provisioned resting state -- the peering has been
/// created but activation requires out-of-band approval on the peer
/// account. `Irrecoverable` means the peer side was removed out-of-band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Pending,
    Active,
    Inactive,
    Irrecoverable,
    Deleting,
    Deleted,
    Failed,
    Unknown,
}

impl From<ConnectionStatus> for ConnectionState {
    fn from(status: ConnectionStatus) -> Self {
        match status {
            ConnectionStatus::Pending => Self::Pending,
            ConnectionStatus::Active => Self::Active,
            ConnectionStatus::Inactive => Self::Inactive,
            ConnectionStatus::Irrecoverable => Self::Irrecoverable,
            ConnectionStatus::Deleting => Self::Deleting,
            ConnectionStatus::Deleted => Self::Deleted,
            ConnectionStatus::Failed => Self::Failed,
            ConnectionStatus::Unknown => Self::Unknown,
        }
    }
}

/// Canonical connection object as reported by the control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub id: String,
    pub spec: ConnectionSpec,
    pub state: ConnectionState,
    pub status_detail: Option<String>,
    pub peer_connection_id: Option<String>,
}
