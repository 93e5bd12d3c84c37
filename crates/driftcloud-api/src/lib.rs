// driftcloud-api: Async Rust client for the Driftcloud control-plane API (v1)

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{CloudClient, DEFAULT_API_HOST};
pub use error::Error;
pub use transport::TransportConfig;
