//! # API Shared
//!
//! Shared definitions for the clinic records APIs.
//!
//! Contains:
//! - JSON wire types (`wire` module) used by the REST server and the HTTP client
//! - Shared services like `HealthService`
//! - API token checking
//!
//! Used by `clinic-core`, `api-rest` and `clinic-client`.

pub mod auth;
pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
