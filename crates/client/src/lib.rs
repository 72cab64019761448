//! # Clinic Client
//!
//! Typed HTTP client for the clinic records REST API, used by the integration tests
//! and by the `clinic` CLI.
//!
//! Each operation is a request value implementing [`ApiRequest`]; [`ClinicClient::send`]
//! runs it and hands back the status code with the decoded JSON body, so callers can
//! assert on error statuses as easily as on successes.

pub mod config;
pub mod error;
pub mod requests;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use requests::*;
pub use reqwest::StatusCode;

use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde_json::Value;

/// One API call: method, path relative to the server root, query and body.
pub trait ApiRequest {
    fn method(&self) -> Method;

    /// Path without a leading slash, e.g. `api/v1/clinic/`.
    fn path(&self) -> String;

    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> Option<Value> {
        None
    }
}

/// HTTP client bound to one server.
#[derive(Clone, Debug)]
pub struct ClinicClient {
    http: reqwest::Client,
    cfg: ClientConfig,
}

impl ClinicClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying client cannot be built.
    pub fn new(cfg: ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(cfg.timeout).build()?;
        Ok(Self { http, cfg })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.cfg
    }

    /// Sends `req`, returning the status and JSON body (`Value::Null` when empty).
    ///
    /// Error statuses are not errors here; only transport failures and non-JSON
    /// bodies are.
    pub async fn send<R: ApiRequest + ?Sized>(&self, req: &R) -> ClientResult<(StatusCode, Value)> {
        let url = format!("{}/{}", self.cfg.base_url(), req.path());
        let method = req.method();
        tracing::debug!(%method, %url, "sending request");

        let mut builder = self.http.request(method, &url);
        let query = req.query();
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(token) = &self.cfg.token {
            builder = builder.header(AUTHORIZATION, format!("Token {token}"));
        }
        if let Some(body) = req.body() {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok((status, Value::Null));
        }
        let body = serde_json::from_slice(&bytes)
            .map_err(|source| ClientError::InvalidBody { status, source })?;
        Ok((status, body))
    }
}
