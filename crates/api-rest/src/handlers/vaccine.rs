use crate::error::ApiResult;
use crate::AppState;
use api_shared::{CreatedRes, EmptyRes, ErrorBody, RecordId};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use clinic_core::VaccineLookup;
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

/// Listing parameters. At least one is required; empty values count as absent.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VaccineParams {
    /// Patient id.
    pub patient: Option<String>,
    /// Clinic id.
    pub clinic: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/vaccine",
    params(VaccineParams),
    responses(
        (status = 200, description = "One record when both parameters match exactly one, otherwise a list"),
        (status = 400, description = "Missing, malformed or unresolvable parameters", body = ErrorBody)
    )
)]
/// List vaccine records by patient and/or clinic.
#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<VaccineParams>,
) -> ApiResult<Json<Value>> {
    let lookup = state
        .run(move |s| {
            s.vaccines
                .list(params.patient.as_deref(), params.clinic.as_deref())
        })
        .await?;
    let body = match lookup {
        VaccineLookup::Single(record) => Value::Object(record.to_wire()),
        VaccineLookup::Many(records) => Value::Array(
            records
                .iter()
                .map(|r| Value::Object(r.to_wire()))
                .collect(),
        ),
    };
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/v1/vaccine/{id}",
    params(("id" = i64, Path, description = "Vaccine record id")),
    responses(
        (status = 200, description = "The vaccine record"),
        (status = 404, description = "No such record", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path(id) = id?;
    let record = state.run(move |s| s.vaccines.get(id)).await?;
    Ok(Json(Value::Object(record.to_wire())))
}

#[utoipa::path(
    post,
    path = "/api/v1/vaccine",
    responses(
        (status = 200, description = "Record created", body = CreatedRes),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "Unknown patient or clinic", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    request_body = Value
)]
/// Create a vaccine record from a complete field map.
///
/// The body must hold every vaccine flag (`"true"`/`"false"`), every `_date` field
/// (`MM/DD/YYYY` or `MM-DD-YYYY`), `covid19_doses`, `patient` and `clinic`.
#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<CreatedRes>> {
    let Json(payload) = payload?;
    let id = state.run(move |s| s.vaccines.create(&payload)).await?;
    Ok(Json(CreatedRes { id }))
}

#[utoipa::path(
    put,
    path = "/api/v1/vaccine/{id}",
    params(("id" = i64, Path, description = "Vaccine record id")),
    responses(
        (status = 200, description = "Record updated", body = EmptyRes),
        (status = 400, description = "Invalid payload; nothing was changed", body = ErrorBody),
        (status = 404, description = "No such record", body = ErrorBody)
    ),
    request_body = Value
)]
/// Update any subset of a record's vaccine fields.
#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<RecordId>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<EmptyRes>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    state.run(move |s| s.vaccines.update(id, &payload)).await?;
    Ok(Json(EmptyRes {}))
}

#[utoipa::path(
    delete,
    path = "/api/v1/vaccine/{id}",
    params(("id" = i64, Path, description = "Vaccine record id")),
    responses(
        (status = 200, description = "Record deleted", body = EmptyRes),
        (status = 404, description = "No such record", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<EmptyRes>> {
    let Path(id) = id?;
    state.run(move |s| s.vaccines.delete(id)).await?;
    Ok(Json(EmptyRes {}))
}
