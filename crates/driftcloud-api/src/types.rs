//! Wire types for the Driftcloud control-plane API (v1).
//!
//! All types match the JSON bodies served under `/v1/`. Field names are
//! snake_case on the wire; status enumerations are lowercase strings with
//! an `Unknown` catch-all so a new remote status never becomes a decode
//! failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Shared enumerations ──────────────────────────────────────────────

/// Cloud provider hosting a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Gcp,
    Azure,
}

/// Datastore performance tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Dev,
    Standard,
    Enhanced,
}

// ── Networks ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkStatus {
    Pending,
    Active,
    Failed,
    Deleting,
    Deleted,
    #[serde(other)]
    Unknown,
}

/// Provider + region pair for a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub provider: CloudProvider,
    pub region: String,
}

/// Caller-supplied portion of a network. This is the POST body for
/// `POST /v1/networks`; the control plane echoes it back inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    pub location: Location,
    pub cidr_block: String,
}

/// Provider-side VPC materialized for an active network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkVpc {
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
}

/// Full network object — config fields are flattened alongside the
/// remote-derived ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    #[serde(rename = "network_id")]
    pub id: String,
    pub status: NetworkStatus,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub vpc: Option<NetworkVpc>,
    #[serde(flatten)]
    pub config: NetworkConfig,
}

// ── Datastores ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatastoreStatus {
    Pending,
    Updating,
    Restoring,
    Active,
    Deleting,
    Deleted,
    #[serde(other)]
    Unknown,
}

/// Provider + region + optional zone pinning for a datastore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatastoreLocation {
    pub provider: CloudProvider,
    pub region: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub availability_zones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub max_memory_bytes: u64,
    pub performance_tier: PerformanceTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
}

/// Tri-state engine feature toggles. Every flag distinguishes
/// absent/true/false — an unset flag is omitted from the wire entirely,
/// never coerced to `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullmq: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidekiq: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memcached: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl_rules: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shard_memory: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceWindow {
    pub weekday: u8,
    pub hour: u8,
    pub duration_hours: u8,
}

/// Restore-from-backup request. `loaded` is set by the control plane
/// once the backup has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreConfig {
    pub backup_id: String,
    #[serde(default)]
    pub loaded: bool,
}

/// Caller-supplied portion of a datastore. Posted flat as the request
/// body; responses nest it under `"config"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatastoreConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    pub location: DatastoreLocation,
    pub tier: Tier,
    #[serde(default)]
    pub features: FeatureFlags,
    /// Opaque backup schedule — passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_policy: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restore: Option<RestoreConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ClusterConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_window: Option<MaintenanceWindow>,
    #[serde(default)]
    pub disable_passkey: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub url: String,
}

/// Full datastore object. The passkey travels as `"password"` and is
/// empty when passkey auth is disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datastore {
    #[serde(rename = "datastore_id")]
    pub id: String,
    pub status: DatastoreStatus,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default, rename = "password")]
    pub passkey: String,
    #[serde(default)]
    pub addr: String,
    #[serde(default)]
    pub dashboard: Option<Dashboard>,
    pub config: DatastoreConfig,
}

// ── Connections ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Active,
    /// Valid resting state: the peering exists but awaits out-of-band
    /// approval on the peer account.
    Inactive,
    /// Peer side removed out-of-band; the connection cannot recover.
    Irrecoverable,
    Deleting,
    Deleted,
    Failed,
    #[serde(other)]
    Unknown,
}

/// The peer side of a network peering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerConfig {
    pub account_id: String,
    pub vpc_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cidr_block: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Caller-supplied portion of a connection. Posted flat as the request
/// body; responses nest it under `"connection_config"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub name: String,
    pub network_id: String,
    pub peer: PeerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(rename = "connection_id")]
    pub id: String,
    pub status: ConnectionStatus,
    #[serde(default)]
    pub status_detail: String,
    #[serde(default)]
    pub peer_connection_id: String,
    #[serde(rename = "connection_config")]
    pub config: ConnectionConfig,
}
