//! # API REST
//!
//! REST API for the clinic records service.
//!
//! Handles:
//! - HTTP endpoints with axum, under `/api/v1`
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, API token check, CORS, request tracing)
//!
//! Business rules live in `clinic-core`; wire types come from `api-shared`.

#![warn(rust_2018_idioms)]

mod auth;
mod error;
mod handlers;
mod router;

pub use error::{ApiError, ApiResult};
pub use router::{router, ApiDoc};

use clinic_core::{CoreResult, RecordServices};

/// Default listen address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:8000";

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub services: RecordServices,
}

impl AppState {
    /// Runs a service call on the blocking pool, since file-backed stores do disk I/O.
    pub async fn run<T, F>(&self, call: F) -> ApiResult<T>
    where
        F: FnOnce(&RecordServices) -> CoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let services = self.services.clone();
        tokio::task::spawn_blocking(move || call(&services))
            .await
            .map_err(|e| ApiError::Internal(format!("service task failed: {e}")))?
            .map_err(ApiError::from)
    }
}

/// REST server configuration, resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestConfig {
    pub addr: String,
    /// When set, every `/api/v1` request must present this token.
    pub api_token: Option<String>,
}

impl RestConfig {
    /// Builds the configuration from raw environment values (`CLINIC_REST_ADDR`,
    /// `CLINIC_API_TOKEN`). Blank values count as unset.
    pub fn from_env_values(addr: Option<String>, api_token: Option<String>) -> Self {
        let non_blank = |v: String| {
            let v = v.trim().to_string();
            (!v.is_empty()).then_some(v)
        };
        Self {
            addr: addr
                .and_then(non_blank)
                .unwrap_or_else(|| DEFAULT_REST_ADDR.into()),
            api_token: api_token.and_then(non_blank),
        }
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self::from_env_values(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_env_values_fall_back() {
        let cfg = RestConfig::from_env_values(Some("  ".into()), Some("".into()));
        assert_eq!(cfg.addr, DEFAULT_REST_ADDR);
        assert_eq!(cfg.api_token, None);
    }

    #[test]
    fn env_values_are_trimmed() {
        let cfg = RestConfig::from_env_values(Some("127.0.0.1:9000 ".into()), Some(" s3cret".into()));
        assert_eq!(cfg.addr, "127.0.0.1:9000");
        assert_eq!(cfg.api_token.as_deref(), Some("s3cret"));
    }
}
