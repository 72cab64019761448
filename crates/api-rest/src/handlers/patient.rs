use crate::error::ApiResult;
use crate::AppState;
use api_shared::{CreatedRes, EmptyRes, ErrorBody, RecordId, PatientReq, PatientRes};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/v1/patient",
    responses(
        (status = 200, description = "Every patient, ordered by id", body = Vec<PatientRes>)
    )
)]
#[axum::debug_handler]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<PatientRes>>> {
    let all = state.run(|s| s.patients.list()).await?;
    Ok(Json(all.iter().map(|patient| patient.to_wire()).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/patient/{id}",
    params(("id" = i64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient", body = PatientRes),
        (status = 404, description = "No such patient", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<PatientRes>> {
    let Path(id) = id?;
    Ok(Json(state.run(move |s| s.patients.get(id)).await?.to_wire()))
}

#[utoipa::path(
    post,
    path = "/api/v1/patient",
    request_body = PatientReq,
    responses(
        (status = 200, description = "Patient created", body = CreatedRes),
        (status = 400, description = "Invalid request", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    req: Result<Json<PatientReq>, JsonRejection>,
) -> ApiResult<Json<CreatedRes>> {
    let Json(req) = req?;
    let id = state.run(move |s| s.patients.create(&req)).await?;
    Ok(Json(CreatedRes { id }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/patient/{id}",
    params(("id" = i64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient deleted with their vaccine records", body = EmptyRes),
        (status = 404, description = "No such patient", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<EmptyRes>> {
    let Path(id) = id?;
    state.run(move |s| s.patients.delete(id)).await?;
    Ok(Json(EmptyRes {}))
}
