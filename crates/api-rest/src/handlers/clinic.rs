use crate::error::ApiResult;
use crate::AppState;
use api_shared::{CreatedRes, EmptyRes, ErrorBody, RecordId, ClinicReq, ClinicRes};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/v1/clinic",
    responses(
        (status = 200, description = "Every clinic, ordered by id", body = Vec<ClinicRes>)
    )
)]
#[axum::debug_handler]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ClinicRes>>> {
    let all = state.run(|s| s.clinics.list()).await?;
    Ok(Json(all.iter().map(|clinic| clinic.to_wire()).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/clinic/{id}",
    params(("id" = i64, Path, description = "Clinic id")),
    responses(
        (status = 200, description = "The clinic", body = ClinicRes),
        (status = 404, description = "No such clinic", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<ClinicRes>> {
    let Path(id) = id?;
    Ok(Json(state.run(move |s| s.clinics.get(id)).await?.to_wire()))
}

#[utoipa::path(
    post,
    path = "/api/v1/clinic",
    request_body = ClinicReq,
    responses(
        (status = 200, description = "Clinic created", body = CreatedRes),
        (status = 400, description = "Invalid request", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    req: Result<Json<ClinicReq>, JsonRejection>,
) -> ApiResult<Json<CreatedRes>> {
    let Json(req) = req?;
    let id = state.run(move |s| s.clinics.create(&req)).await?;
    Ok(Json(CreatedRes { id }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/clinic/{id}",
    params(("id" = i64, Path, description = "Clinic id")),
    responses(
        (status = 200, description = "Clinic deleted with its clinic stations and vaccine records", body = EmptyRes),
        (status = 404, description = "No such clinic", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<EmptyRes>> {
    let Path(id) = id?;
    state.run(move |s| s.clinics.delete(id)).await?;
    Ok(Json(EmptyRes {}))
}
