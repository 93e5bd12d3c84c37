// ── Wire <-> domain conversions ──
//
// Pure transforms between desired-state specs and the control-plane
// wire types. `From<&Spec>` builds the request config (caller-owned
// fields only; nothing remote-derived is ever sent), and
// `From<wire object>` builds the canonical record.

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use driftcloud_api::types as wire;

use crate::model::{
    ConnectionRecord, ConnectionSpec, DatastoreRecord, DatastoreSpec, NetworkRecord, NetworkSpec,
    PeerSpec, VpcInfo,
};

/// Convert an epoch-seconds timestamp to a `DateTime<Utc>`.
/// Zero (unset on the wire) maps to `None`.
fn epoch_to_datetime(secs: i64) -> Option<DateTime<Utc>> {
    if secs == 0 {
        return None;
    }
    DateTime::from_timestamp(secs, 0)
}

fn none_if_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

// ── Networks ─────────────────────────────────────────────────────────

impl From<&NetworkSpec> for wire::NetworkConfig {
    fn from(spec: &NetworkSpec) -> Self {
        Self {
            name: spec.name.clone(),
            location: wire::Location {
                provider: spec.provider,
                region: spec.region.clone(),
            },
            cidr_block: spec.cidr_block.clone(),
        }
    }
}

impl From<wire::Network> for NetworkRecord {
    fn from(remote: wire::Network) -> Self {
        Self {
            id: remote.id,
            spec: NetworkSpec {
                name: remote.config.name,
                provider: remote.config.location.provider,
                region: remote.config.location.region,
                cidr_block: remote.config.cidr_block,
            },
            state: remote.status.into(),
            created_at: epoch_to_datetime(remote.created_at),
            vpc: remote.vpc.map(|v| VpcInfo {
                resource_id: v.resource_id,
                account_id: v.account_id,
            }),
        }
    }
}

// ── Datastores ───────────────────────────────────────────────────────

impl From<&DatastoreSpec> for wire::DatastoreConfig {
    fn from(spec: &DatastoreSpec) -> Self {
        Self {
            name: spec.name.clone(),
            network_id: spec.network_id.clone(),
            location: wire::DatastoreLocation {
                provider: spec.provider,
                region: spec.region.clone(),
                availability_zones: spec.availability_zones.clone(),
            },
            tier: wire::Tier {
                max_memory_bytes: spec.memory_bytes,
                performance_tier: spec.performance_tier,
                replicas: spec.replicas,
            },
            features: spec.features.clone(),
            backup_policy: spec.backup_policy.clone(),
            restore: spec
                .restore_from_backup
                .clone()
                .map(|backup_id| wire::RestoreConfig {
                    backup_id,
                    loaded: false,
                }),
            cluster: spec.cluster.clone(),
            maintenance_window: spec.maintenance_window.clone(),
            disable_passkey: spec.disable_passkey,
        }
    }
}

impl From<wire::Datastore> for DatastoreRecord {
    fn from(remote: wire::Datastore) -> Self {
        // An empty secret on the wire is the only signal that passkey
        // auth is disabled; there is no separate flag in responses.
        let passkey_disabled = remote.passkey.is_empty();

        let (restore_from_backup, restore_loaded) = match remote.config.restore {
            Some(r) => (Some(r.backup_id), r.loaded),
            None => (None, false),
        };

        Self {
            id: remote.id,
            spec: DatastoreSpec {
                name: remote.config.name,
                network_id: remote.config.network_id,
                provider: remote.config.location.provider,
                region: remote.config.location.region,
                availability_zones: remote.config.location.availability_zones,
                memory_bytes: remote.config.tier.max_memory_bytes,
                performance_tier: remote.config.tier.performance_tier,
                replicas: remote.config.tier.replicas,
                features: remote.config.features,
                backup_policy: remote.config.backup_policy,
                restore_from_backup,
                cluster: remote.config.cluster,
                maintenance_window: remote.config.maintenance_window,
                disable_passkey: remote.config.disable_passkey || passkey_disabled,
            },
            state: remote.status.into(),
            created_at: epoch_to_datetime(remote.created_at),
            addr: none_if_empty(remote.addr),
            dashboard_url: remote.dashboard.map(|d| d.url),
            passkey: if passkey_disabled {
                None
            } else {
                Some(SecretString::from(remote.passkey))
            },
            restore_loaded,
        }
    }
}

// ── Connections ──────────────────────────────────────────────────────

impl From<&ConnectionSpec> for wire::ConnectionConfig {
    fn from(spec: &ConnectionSpec) -> Self {
        Self {
            name: spec.name.clone(),
            network_id: spec.network_id.clone(),
            peer: wire::PeerConfig {
                account_id: spec.peer.account_id.clone(),
                vpc_id: spec.peer.vpc_id.clone(),
                cidr_block: spec.peer.cidr_block.clone().unwrap_or_default(),
                region: spec.peer.region.clone(),
            },
        }
    }
}

impl From<wire::Connection> for ConnectionRecord {
    fn from(remote: wire::Connection) -> Self {
        Self {
            id: remote.id,
            spec: ConnectionSpec {
                name: remote.config.name,
                network_id: remote.config.network_id,
                peer: PeerSpec {
                    account_id: remote.config.peer.account_id,
                    vpc_id: remote.config.peer.vpc_id,
                    cidr_block: none_if_empty(remote.config.peer.cidr_block),
                    region: remote.config.peer.region,
                },
            },
            state: remote.status.into(),
            status_detail: none_if_empty(remote.status_detail),
            peer_connection_id: none_if_empty(remote.peer_connection_id),
        }
    }
}
