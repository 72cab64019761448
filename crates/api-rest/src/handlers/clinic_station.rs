use crate::error::ApiResult;
use crate::AppState;
use api_shared::{
    ClinicStationReq, ClinicStationRes, ClinicStationUpdateReq, CreatedRes, EmptyRes, ErrorBody,
    RecordId,
};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use clinic_core::ClinicStationQuery;
use std::collections::HashMap;

#[utoipa::path(
    get,
    path = "/api/v1/clinicstation",
    params(
        ("clinic" = Option<i64>, Query, description = "Clinic id"),
        ("active" = Option<bool>, Query, description = "Active flag, any case"),
        ("away" = Option<bool>, Query, description = "Away flag, any case"),
        ("finished" = Option<bool>, Query, description = "Finished flag, any case"),
        ("level" = Option<u32>, Query, description = "Queue level")
    ),
    responses(
        (status = 200, description = "Matching clinic stations", body = Vec<ClinicStationRes>),
        (status = 400, description = "Malformed filter", body = ErrorBody),
        (status = 404, description = "Nothing matched", body = ErrorBody)
    )
)]
/// List clinic stations matching the given filters.
///
/// An empty result is reported as 404.
#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Json<Vec<ClinicStationRes>>> {
    let Query(params) = params?;
    let query = ClinicStationQuery::from_params(&params)?;
    let found = state.run(move |s| s.clinic_stations.list(&query)).await?;
    Ok(Json(found.iter().map(|cs| cs.to_wire()).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/clinicstation/{id}",
    params(("id" = i64, Path, description = "Clinic station id")),
    responses(
        (status = 200, description = "The clinic station", body = ClinicStationRes),
        (status = 404, description = "No such clinic station", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<ClinicStationRes>> {
    let Path(id) = id?;
    Ok(Json(state.run(move |s| s.clinic_stations.get(id)).await?.to_wire()))
}

#[utoipa::path(
    post,
    path = "/api/v1/clinicstation",
    request_body = ClinicStationReq,
    responses(
        (status = 200, description = "Clinic station created", body = CreatedRes),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Unknown clinic or station", body = ErrorBody)
    )
)]
/// Staff a station during a clinic.
///
/// Defaults: `active` false, `away` true, `name` empty, `awaytime` 30 minutes.
#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    req: Result<Json<ClinicStationReq>, JsonRejection>,
) -> ApiResult<Json<CreatedRes>> {
    let Json(req) = req?;
    let id = state.run(move |s| s.clinic_stations.create(&req)).await?;
    Ok(Json(CreatedRes { id }))
}

#[utoipa::path(
    put,
    path = "/api/v1/clinicstation/{id}",
    params(("id" = i64, Path, description = "Clinic station id")),
    request_body = ClinicStationUpdateReq,
    responses(
        (status = 200, description = "Clinic station updated", body = EmptyRes),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "No such clinic station", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<RecordId>, PathRejection>,
    req: Result<Json<ClinicStationUpdateReq>, JsonRejection>,
) -> ApiResult<Json<EmptyRes>> {
    let Path(id) = id?;
    let Json(req) = req?;
    state.run(move |s| s.clinic_stations.update(id, &req)).await?;
    Ok(Json(EmptyRes {}))
}

#[utoipa::path(
    delete,
    path = "/api/v1/clinicstation/{id}",
    params(("id" = i64, Path, description = "Clinic station id")),
    responses(
        (status = 200, description = "Clinic station deleted", body = EmptyRes),
        (status = 404, description = "No such clinic station", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<EmptyRes>> {
    let Path(id) = id?;
    state.run(move |s| s.clinic_stations.delete(id)).await?;
    Ok(Json(EmptyRes {}))
}
