// Catalog HTTP client
//
// Wraps `reqwest::Client` with URL construction and `{ msg, ...payload }`
// envelope handling. Endpoint groups (bookmarks, search, metadata, etc.)
// are implemented as inherent methods in separate files to keep this
// module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Error bodies carry a human-readable `msg` next to the status code.
#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    msg: Option<String>,
}

/// Raw HTTP client for the catalog frontend service.
///
/// Every method returns the feature payload only; the envelope's `msg`
/// and other transport metadata never reach the caller.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the service root, e.g. `https://catalog.example.com`.
    /// A path prefix (for deployments mounted under a sub-path) is kept.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}"))?)
    }

    /// Build `{base}/api/{path}?k=v&...`, percent-encoding the values.
    pub(crate) fn api_url_with_query(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Url, Error> {
        let mut url = self.api_url(path)?;
        url.query_pairs_mut().extend_pairs(params);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the response body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        Self::parse_json(resp).await
    }

    /// Send a request with a JSON body and decode the response body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("{} {}", method, url);

        let resp = self
            .http
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_json(resp).await
    }

    /// Send a request with a JSON body, discarding any response payload.
    pub(crate) async fn send_json_unit(
        &self,
        method: reqwest::Method,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        debug!("{} {}", method, url);

        let resp = self
            .http
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::check_status(resp).await.map(drop)
    }

    /// POST a form-encoded body, discarding any response payload.
    pub(crate) async fn post_form_unit(
        &self,
        url: Url,
        fields: &[(&str, String)],
    ) -> Result<(), Error> {
        debug!("POST {} (form)", url);

        let resp = self
            .http
            .post(url)
            .form(fields)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::check_status(resp).await.map(drop)
    }

    // ── Response handling ────────────────────────────────────────────

    /// Map non-2xx responses to `Error::Authentication` / `Error::Service`,
    /// pulling the message from the envelope when one is present.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|e| e.msg)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_owned()
            });

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::Authentication {
                status: status.as_u16(),
                message,
            });
        }

        Err(Error::Service {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}
