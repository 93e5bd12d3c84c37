// Hand-crafted async HTTP client for the Driftcloud control-plane API (v1).
//
// Base path: /v1/
// Auth: Authorization: Bearer <api_key>

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::types;

/// Default control-plane host, overridable per client.
pub const DEFAULT_API_HOST: &str = "https://api.driftcloud.io";

// ── Error response shape from the control plane ──────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    error: String,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Driftcloud control-plane API.
///
/// Stateless apart from the base URL and the bearer credential baked
/// into the underlying `reqwest::Client`, so it is safe for unlimited
/// concurrent use. Performs no retries: every call is one request.
pub struct CloudClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CloudClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config against the default host.
    pub fn from_api_key(
        api_key: &secrecy::SecretString,
        transport: &crate::TransportConfig,
    ) -> Result<Self, Error> {
        Self::from_api_key_with_host(DEFAULT_API_HOST, api_key, transport)
    }

    /// Build from an API key against an explicit host.
    ///
    /// Injects `Authorization: Bearer <key>` as a sensitive default
    /// header on every request.
    pub fn from_api_key_with_host(
        base_url: &str,
        api_key: &secrecy::SecretString,
        transport: &crate::TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| Error::InvalidApiKey {
                message: format!("invalid API key header value: {e}"),
            })?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and guarantee a trailing slash so relative
    /// joins of `v1/…` behave.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"v1/networks"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/`, so joining `v1/…` works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path);
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                // Truncate on a char boundary so multibyte bodies cannot panic.
                let mut cut = body.len().min(200);
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                let preview = &body[..cut];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    /// Classify a non-2xx response. 404 is always `NotFound`; any other
    /// 4xx with a decodable `{"error": string}` body carries the remote
    /// message verbatim; everything else collapses to `Server`.
    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let decoded = serde_json::from_str::<ErrorResponse>(&raw).ok();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Error::NotFound {
                message: decoded.map_or_else(|| "not found".to_owned(), |e| e.error),
            };
        }

        if status.is_client_error() {
            if let Some(err) = decoded {
                return Error::Api {
                    status: status.as_u16(),
                    message: err.error,
                };
            }
        }

        Error::Server {
            status: status.as_u16(),
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Networks ─────────────────────────────────────────────────────

    pub async fn list_networks(&self) -> Result<Vec<types::Network>, Error> {
        self.get("v1/networks").await
    }

    pub async fn get_network(&self, id: &str) -> Result<types::Network, Error> {
        self.get(&format!("v1/networks/{id}")).await
    }

    pub async fn create_network(
        &self,
        config: &types::NetworkConfig,
    ) -> Result<types::Network, Error> {
        self.post("v1/networks", config).await
    }

    pub async fn delete_network(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("v1/networks/{id}")).await
    }

    // ── Datastores ───────────────────────────────────────────────────

    pub async fn list_datastores(&self) -> Result<Vec<types::Datastore>, Error> {
        self.get("v1/datastores").await
    }

    pub async fn get_datastore(&self, id: &str) -> Result<types::Datastore, Error> {
        self.get(&format!("v1/datastores/{id}")).await
    }

    pub async fn create_datastore(
        &self,
        config: &types::DatastoreConfig,
    ) -> Result<types::Datastore, Error> {
        self.post("v1/datastores", config).await
    }

    pub async fn update_datastore(
        &self,
        id: &str,
        config: &types::DatastoreConfig,
    ) -> Result<types::Datastore, Error> {
        self.put(&format!("v1/datastores/{id}"), config).await
    }

    pub async fn delete_datastore(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("v1/datastores/{id}")).await
    }

    // ── Connections ──────────────────────────────────────────────────

    pub async fn list_connections(&self) -> Result<Vec<types::Connection>, Error> {
        self.get("v1/connections").await
    }

    pub async fn get_connection(&self, id: &str) -> Result<types::Connection, Error> {
        self.get(&format!("v1/connections/{id}")).await
    }

    pub async fn create_connection(
        &self,
        config: &types::ConnectionConfig,
    ) -> Result<types::Connection, Error> {
        self.post("v1/connections", config).await
    }

    pub async fn delete_connection(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("v1/connections/{id}")).await
    }
}
