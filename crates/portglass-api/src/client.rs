// Backend HTTP client
//
// Wraps `reqwest::Client` with URL construction and response handling
// for the portglass backend. The backend returns JSON on success and
// plain-text bodies on error, so error mapping reads the raw text
// rather than unwrapping an envelope. All endpoint modules (devices,
// session, status) are implemented as inherent methods via separate
// files to keep this module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the portglass backend.
///
/// Cheap to clone; the underlying `reqwest::Client` (and its cookie jar
/// holding the session token) is shared between clones.
#[derive(Clone)]
pub struct SwitchClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SwitchClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `http://127.0.0.1:8080`).
    /// A cookie jar is always attached -- session auth requires it.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Use this when a client with an authenticated cookie jar already
    /// exists (e.g. in tests).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}"))?)
    }

    /// Build an API URL carrying an `id` query parameter.
    pub(crate) fn api_url_with_id(&self, path: &str, id: i64) -> Result<Url, Error> {
        let mut url = self.api_url(path)?;
        url.query_pairs_mut().append_pair("id", &id.to_string());
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::parse_json(resp).await
    }

    /// Send a POST request with a JSON body and decode the JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse_json(resp).await
    }

    /// Send a POST request with no body, expecting only a success status.
    pub(crate) async fn post_empty(&self, url: Url) -> Result<(), Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).send().await.map_err(Error::Transport)?;
        Self::expect_success(resp).await
    }

    /// Send a PUT request with a JSON body, expecting only a success status.
    pub(crate) async fn put(&self, url: Url, body: &impl Serialize) -> Result<(), Error> {
        debug!("PUT {}", url);
        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::expect_success(resp).await
    }

    /// Send a DELETE request, expecting only a success status.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);
        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::expect_success(resp).await
    }

    /// Expose the raw request builder for endpoints with special needs
    /// (cancellable requests).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── Response handling ────────────────────────────────────────────

    /// Map a non-success response into a typed error. The backend uses
    /// plain-text bodies, carried verbatim.
    pub(crate) async fn error_for_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let message = resp
            .text()
            .await
            .map(|t| t.trim().to_owned())
            .unwrap_or_default();

        match status {
            reqwest::StatusCode::UNAUTHORIZED => Err(Error::Authentication {
                message: if message.is_empty() {
                    "session expired or invalid credentials".into()
                } else {
                    message
                },
            }),
            reqwest::StatusCode::FORBIDDEN => Err(Error::Forbidden),
            reqwest::StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimited),
            _ => Err(Error::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }

    /// Parse a JSON body after status checking, keeping the raw body for
    /// diagnostics on decode failure.
    pub(crate) async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let resp = Self::error_for_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Check the status and discard the body.
    pub(crate) async fn expect_success(resp: reqwest::Response) -> Result<(), Error> {
        Self::error_for_status(resp).await.map(|_| ())
    }
}
