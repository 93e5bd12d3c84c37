// End-to-end lifecycle tests against a wiremock control plane.
//
// Poll tuning is shrunk to milliseconds so convergence scenarios run
// in real time without paused clocks (wiremock uses real sockets).

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use driftcloud_api::CloudClient;
use driftcloud_api::types::{CloudProvider, FeatureFlags, PerformanceTier};
use driftcloud_core::{
    ConnectionSpec, ConnectionState, CoreError, DatastoreSpec, DatastoreState, Engine, Lifecycle,
    NetworkSpec, NetworkState, PeerSpec, PollOptions,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Engine) {
    let server = MockServer::start().await;
    let client = CloudClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    let poll = PollOptions {
        interval: Duration::from_millis(20),
        deadline: Duration::from_secs(2),
    };
    (server, Engine::from_client(Arc::new(client), poll))
}

fn network_spec() -> NetworkSpec {
    NetworkSpec {
        name: "n1".into(),
        provider: CloudProvider::Aws,
        region: "us-east-1".into(),
        cidr_block: "10.0.0.0/16".into(),
    }
}

fn network_body(status: &str, with_vpc: bool) -> serde_json::Value {
    json!({
        "network_id": "net-1",
        "status": status,
        "created_at": 1_700_000_000,
        "vpc": if with_vpc {
            json!({ "resource_id": "vpc-0abc", "account_id": "123456789012" })
        } else {
            serde_json::Value::Null
        },
        "name": "n1",
        "location": { "provider": "aws", "region": "us-east-1" },
        "cidr_block": "10.0.0.0/16"
    })
}

fn datastore_spec() -> DatastoreSpec {
    DatastoreSpec {
        name: "cache".into(),
        network_id: None,
        provider: CloudProvider::Aws,
        region: "us-east-1".into(),
        availability_zones: Vec::new(),
        memory_bytes: 1_073_741_824,
        performance_tier: PerformanceTier::Standard,
        replicas: None,
        features: FeatureFlags {
            bullmq: Some(false),
            ..FeatureFlags::default()
        },
        backup_policy: None,
        restore_from_backup: None,
        cluster: None,
        maintenance_window: None,
        disable_passkey: false,
    }
}

fn datastore_body(status: &str) -> serde_json::Value {
    json!({
        "datastore_id": "ds-1",
        "status": status,
        "created_at": 1_700_000_000,
        "password": "s3cret",
        "addr": "ds-1.driftcloud.io:6379",
        "config": {
            "name": "cache",
            "location": { "provider": "aws", "region": "us-east-1" },
            "tier": { "max_memory_bytes": 1_073_741_824u64, "performance_tier": "standard" }
        }
    })
}

// ── Networks ────────────────────────────────────────────────────────

#[tokio::test]
async fn create_network_settles_after_two_pending_polls() {
    let (server, engine) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(network_body("pending", false)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/networks/net-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(network_body("pending", false)))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/networks/net-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(network_body("active", true)))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let record = engine
        .networks
        .create(&network_spec(), &cancel)
        .await
        .unwrap();

    assert_eq!(record.id, "net-1");
    assert_eq!(record.state, NetworkState::Active);
    assert_eq!(
        record.vpc.unwrap().resource_id.as_deref(),
        Some("vpc-0abc")
    );
}

#[tokio::test]
async fn create_network_times_out_if_it_never_settles() {
    let (server, engine) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(network_body("pending", false)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/networks/net-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(network_body("pending", false)))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let err = engine
        .networks
        .create(&network_spec(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CoreError::ConvergenceTimeout { kind: "network", id, .. } if id == "net-1"
    ));
}

#[tokio::test]
async fn network_update_reports_replace_required() {
    let (_server, engine) = setup().await;

    let cancel = CancellationToken::new();
    let err = engine
        .networks
        .update("net-1", &network_spec(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CoreError::ImmutableResource { kind: "network" }
    ));
}

#[tokio::test]
async fn read_network_reports_absent_for_deleted_status_and_404() {
    let (server, engine) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/networks/net-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(network_body("deleted", false)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/networks/net-2"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not found" })))
        .mount(&server)
        .await;

    assert!(engine.networks.read("net-1").await.unwrap().is_none());
    assert!(engine.networks.read("net-2").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_network_with_immediate_404_is_success_without_polling() {
    let (server, engine) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/networks/net-1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not found" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/networks/net-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(network_body("active", true)))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    engine.networks.delete("net-1", &cancel).await.unwrap();
}

#[tokio::test]
async fn delete_network_polls_until_it_disappears() {
    let (server, engine) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/networks/net-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/networks/net-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(network_body("deleting", false)))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/networks/net-1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    engine.networks.delete("net-1", &cancel).await.unwrap();
}

// ── Datastores ──────────────────────────────────────────────────────

/// Matches a request body whose `features` object carries `bullmq`
/// explicitly but has no `tls` key at all.
struct UnsetTlsFlagOmitted;

impl Match for UnsetTlsFlagOmitted {
    fn matches(&self, request: &Request) -> bool {
        serde_json::from_slice::<serde_json::Value>(&request.body).is_ok_and(|body| {
            body["features"]["bullmq"] == json!(false) && body["features"].get("tls").is_none()
        })
    }
}

#[tokio::test]
async fn create_datastore_leaves_unset_feature_flags_off_the_wire() {
    let (server, engine) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/datastores"))
        .and(UnsetTlsFlagOmitted)
        .respond_with(ResponseTemplate::new(200).set_body_json(datastore_body("pending")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/datastores/ds-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(datastore_body("pending")))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/datastores/ds-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(datastore_body("active")))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let record = engine
        .datastores
        .create(&datastore_spec(), &cancel)
        .await
        .unwrap();

    assert_eq!(record.id, "ds-1");
    assert_eq!(record.state, DatastoreState::Active);
}

#[tokio::test]
async fn busy_datastore_update_fails_fast_without_issuing_the_update() {
    let (server, engine) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/datastores/ds-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(datastore_body("updating")))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v1/datastores/ds-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(datastore_body("updating")))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let spec = engine
        .datastores
        .import("ds-1")
        .await
        .unwrap()
        .spec;
    let err = engine
        .datastores
        .update("ds-1", &spec, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CoreError::ResourceBusy { id, status } if id == "ds-1" && status == "updating"
    ));
}

#[tokio::test]
async fn settled_datastore_update_polls_back_to_active() {
    let (server, engine) = setup().await;

    // First two GETs: the import and the update's pre-read.
    Mock::given(method("GET"))
        .and(path("/v1/datastores/ds-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(datastore_body("active")))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v1/datastores/ds-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(datastore_body("updating")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/datastores/ds-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(datastore_body("updating")))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/datastores/ds-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(datastore_body("active")))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let before = engine.datastores.import("ds-1").await.unwrap();
    let record = engine
        .datastores
        .update("ds-1", &before.spec, &cancel)
        .await
        .unwrap();

    assert_eq!(record.state, DatastoreState::Active);
    assert_eq!(record.addr.as_deref(), Some("ds-1.driftcloud.io:6379"));
}

#[tokio::test]
async fn import_datastore_matches_a_fresh_read() {
    let (server, engine) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/datastores/ds-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(datastore_body("active")))
        .mount(&server)
        .await;

    let imported = engine.datastores.import("ds-1").await.unwrap();
    let read = engine.datastores.read("ds-1").await.unwrap().unwrap();

    assert_eq!(imported.id, read.id);
    assert_eq!(imported.spec, read.spec);
    assert_eq!(imported.state, read.state);
    assert!(imported.passkey.is_some());
}

// ── Connections ─────────────────────────────────────────────────────

#[tokio::test]
async fn create_connection_settles_at_inactive() {
    let (server, engine) = setup().await;

    let body = |status: &str| {
        json!({
            "connection_id": "conn-1",
            "status": status,
            "status_detail": "awaiting peer approval",
            "peer_connection_id": "pcx-1",
            "connection_config": {
                "name": "peer-prod",
                "network_id": "net-1",
                "peer": {
                    "account_id": "123456789012",
                    "vpc_id": "vpc-peer",
                    "cidr_block": "172.16.0.0/16"
                }
            }
        })
    };

    Mock::given(method("POST"))
        .and(path("/v1/connections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body("pending")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/connections/conn-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body("pending")))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/connections/conn-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body("inactive")))
        .mount(&server)
        .await;

    let spec = ConnectionSpec {
        name: "peer-prod".into(),
        network_id: "net-1".into(),
        peer: PeerSpec {
            account_id: "123456789012".into(),
            vpc_id: "vpc-peer".into(),
            cidr_block: Some("172.16.0.0/16".into()),
            region: None,
        },
    };

    let cancel = CancellationToken::new();
    let record = engine.connections.create(&spec, &cancel).await.unwrap();

    assert_eq!(record.id, "conn-1");
    assert_eq!(record.state, ConnectionState::Inactive);
    assert_eq!(record.spec, spec);
    assert_eq!(record.peer_connection_id.as_deref(), Some("pcx-1"));
}

#[tokio::test]
async fn cancelled_wait_aborts_a_create() {
    let (server, engine) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(network_body("pending", false)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/networks/net-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(network_body("pending", false)))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = engine
        .networks
        .create(&network_spec(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Cancelled { kind: "network", .. }));
}
