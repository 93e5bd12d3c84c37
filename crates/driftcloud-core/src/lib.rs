// driftcloud-core: Lifecycle reconciliation engine between driftcloud-api and callers.

pub mod config;
pub mod convert;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod poll;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::EngineConfig;
pub use error::CoreError;
pub use lifecycle::{
    ConnectionLifecycle, DatastoreLifecycle, Engine, Lifecycle, NetworkLifecycle,
};
pub use poll::PollOptions;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ConnectionRecord, ConnectionSpec, ConnectionState, DatastoreRecord, DatastoreSpec,
    DatastoreState, NetworkRecord, NetworkSpec, NetworkState, PeerSpec, VpcInfo,
};
