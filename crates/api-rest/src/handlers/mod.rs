//! Request handlers, one module per resource.

pub mod clinic;
pub mod clinic_station;
pub mod health;
pub mod patient;
pub mod station;
pub mod vaccine;

use crate::error::ApiError;

/// Handler for `PUT`/`DELETE` on a collection path, which need an id.
#[axum::debug_handler]
pub async fn id_required() -> ApiError {
    ApiError::BadRequest("this operation requires a record id in the path".into())
}
