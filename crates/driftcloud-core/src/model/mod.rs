//! Domain model for the reconciliation engine.
//!
//! Each resource kind has a `*Spec` (the caller-declared desired state)
//! and a `*Record` (the canonical object as the remote system reports
//! it: the spec plus remote-derived fields). Specs contain only fields
//! the caller controls; everything the control plane assigns lives on
//! the record.
//!
//! Simple value types the wire format already gets right
//! (`CloudProvider`, `PerformanceTier`, `FeatureFlags`, `ClusterConfig`,
//! `MaintenanceWindow`) are reused from `driftcloud_api` rather than
//! mirrored.

mod connection;
mod datastore;
mod network;

pub use connection::{ConnectionRecord, ConnectionSpec, ConnectionState, PeerSpec};
pub use datastore::{DatastoreRecord, DatastoreSpec, DatastoreState};
pub use network::{NetworkRecord, NetworkSpec, NetworkState, VpcInfo};

pub use driftcloud_api::types::{
    CloudProvider, ClusterConfig, FeatureFlags, MaintenanceWindow, PerformanceTier,
};
