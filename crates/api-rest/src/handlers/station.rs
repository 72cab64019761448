use crate::error::ApiResult;
use crate::AppState;
use api_shared::{CreatedRes, EmptyRes, ErrorBody, RecordId, StationReq, StationRes};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use clinic_core::Station;

#[utoipa::path(
    get,
    path = "/api/v1/station",
    responses(
        (status = 200, description = "Every station, ordered by id", body = Vec<StationRes>)
    )
)]
#[axum::debug_handler]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<StationRes>>> {
    let stations = state.run(|s| s.stations.list()).await?;
    Ok(Json(stations.iter().map(Station::to_wire).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/station/{id}",
    params(("id" = i64, Path, description = "Station id")),
    responses(
        (status = 200, description = "The station", body = StationRes),
        (status = 404, description = "No such station", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<StationRes>> {
    let Path(id) = id?;
    Ok(Json(state.run(move |s| s.stations.get(id)).await?.to_wire()))
}

#[utoipa::path(
    post,
    path = "/api/v1/station",
    request_body = StationReq,
    responses(
        (status = 200, description = "Station created", body = CreatedRes),
        (status = 400, description = "Invalid request", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    req: Result<Json<StationReq>, JsonRejection>,
) -> ApiResult<Json<CreatedRes>> {
    let Json(req) = req?;
    let id = state.run(move |s| s.stations.create(&req)).await?;
    Ok(Json(CreatedRes { id }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/station/{id}",
    params(("id" = i64, Path, description = "Station id")),
    responses(
        (status = 200, description = "Station deleted with its clinic stations", body = EmptyRes),
        (status = 404, description = "No such station", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<EmptyRes>> {
    let Path(id) = id?;
    state.run(move |s| s.stations.delete(id)).await?;
    Ok(Json(EmptyRes {}))
}
