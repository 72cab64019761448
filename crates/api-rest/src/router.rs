//! Router assembly.
//!
//! Every resource route is registered with and without a trailing slash. `/health`
//! and the API documentation are always open; the `/api/v1` routes sit behind the
//! token check when a token is configured.

use crate::auth::{require_token, ExpectedToken};
use crate::handlers::{self, clinic, clinic_station, health, patient, station, vaccine};
use crate::{AppState, RestConfig};
use api_shared::{
    ClinicReq, ClinicRes, ClinicStationReq, ClinicStationRes, ClinicStationUpdateReq, CreatedRes,
    EmptyRes, ErrorBody, ErrorDetail, HealthRes, PatientReq, PatientRes, StationReq, StationRes,
};
use axum::routing::{self, MethodRouter};
use axum::Router;
use clinic_core::RecordServices;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        vaccine::list,
        vaccine::get,
        vaccine::create,
        vaccine::update,
        vaccine::delete,
        clinic::list,
        clinic::get,
        clinic::create,
        clinic::delete,
        patient::list,
        patient::get,
        patient::create,
        patient::delete,
        station::list,
        station::get,
        station::create,
        station::delete,
        clinic_station::list,
        clinic_station::get,
        clinic_station::create,
        clinic_station::update,
        clinic_station::delete,
    ),
    components(schemas(
        HealthRes,
        CreatedRes,
        EmptyRes,
        ErrorBody,
        ErrorDetail,
        ClinicReq,
        ClinicRes,
        PatientReq,
        PatientRes,
        StationReq,
        StationRes,
        ClinicStationReq,
        ClinicStationUpdateReq,
        ClinicStationRes,
    ))
)]
pub struct ApiDoc;

fn with_optional_slash(
    router: Router<AppState>,
    path: &str,
    methods: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, methods.clone())
        .route(&format!("{path}/"), methods)
}

/// Collection and item routes for one resource.
fn resource(
    router: Router<AppState>,
    name: &str,
    collection: MethodRouter<AppState>,
    item: MethodRouter<AppState>,
) -> Router<AppState> {
    let router = with_optional_slash(router, &format!("/{name}"), collection);
    with_optional_slash(router, &format!("/{name}/:id"), item)
}

/// Builds the application router.
pub fn router(services: RecordServices, cfg: &RestConfig) -> Router {
    let token: ExpectedToken = cfg.api_token.as_deref().map(Arc::from);
    if token.is_none() {
        tracing::warn!("no API token configured; /api/v1 accepts unauthenticated requests");
    }

    let mut api = Router::new();
    api = resource(
        api,
        "vaccine",
        routing::get(vaccine::list)
            .post(vaccine::create)
            .put(handlers::id_required)
            .delete(handlers::id_required),
        routing::get(vaccine::get)
            .put(vaccine::update)
            .delete(vaccine::delete),
    );
    api = resource(
        api,
        "clinic",
        routing::get(clinic::list)
            .post(clinic::create)
            .delete(handlers::id_required),
        routing::get(clinic::get).delete(clinic::delete),
    );
    api = resource(
        api,
        "patient",
        routing::get(patient::list)
            .post(patient::create)
            .delete(handlers::id_required),
        routing::get(patient::get).delete(patient::delete),
    );
    api = resource(
        api,
        "station",
        routing::get(station::list)
            .post(station::create)
            .delete(handlers::id_required),
        routing::get(station::get).delete(station::delete),
    );
    api = resource(
        api,
        "clinicstation",
        routing::get(clinic_station::list)
            .post(clinic_station::create)
            .put(handlers::id_required)
            .delete(handlers::id_required),
        routing::get(clinic_station::get)
            .put(clinic_station::update)
            .delete(clinic_station::delete),
    );
    let api = api
        .route_layer(axum::middleware::from_fn_with_state(token, require_token))
        .with_state(AppState { services });

    Router::new()
        .route("/health", routing::get(health::health))
        .route("/health/", routing::get(health::health))
        .nest("/api/v1", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use clinic_core::{FileStore, MemoryStore, Vaccine};
    use http_body_util::BodyExt;
    use serde_json::{json, Map, Value};
    use tower::ServiceExt;

    fn app_with(token: Option<&str>) -> Router {
        let services = RecordServices::new(Arc::new(MemoryStore::new()));
        let cfg = RestConfig {
            addr: "127.0.0.1:0".into(),
            api_token: token.map(str::to_owned),
        };
        router(services, &cfg)
    }

    fn app() -> Router {
        app_with(None)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
        auth: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn seed(app: &Router) -> (i64, i64) {
        let (status, clinic) = send(
            app,
            Method::POST,
            "/api/v1/clinic/",
            Some(json!({ "location": "Ensenada", "start": "05/01/2021", "end": "05/03/2021" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (status, patient) = send(
            app,
            Method::POST,
            "/api/v1/patient/",
            Some(json!({
                "paternal_last": "Ruiz",
                "first": "Luis",
                "dob": "11-30-1979",
                "gender": "Male"
            })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        (
            clinic["id"].as_i64().unwrap(),
            patient["id"].as_i64().unwrap(),
        )
    }

    fn vaccine_payload(patient: i64, clinic: i64) -> Value {
        let mut m = Map::new();
        for vaccine in Vaccine::ALL {
            m.insert(vaccine.name().into(), json!("true"));
            m.insert(vaccine.date_field().into(), json!("04/30/2021"));
        }
        m.insert("covid19_doses".into(), json!(2));
        m.insert("patient".into(), json!(patient));
        m.insert("clinic".into(), json!(clinic));
        Value::Object(m)
    }

    #[tokio::test]
    async fn health_is_open() {
        let app = app_with(Some("s3cret"));
        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn api_requires_configured_token() {
        let app = app_with(Some("s3cret"));

        let (status, body) = send(&app, Method::GET, "/api/v1/clinic/", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "AUTH_REQUIRED");

        let (status, _) =
            send(&app, Method::GET, "/api/v1/clinic/", None, Some("Token wrong")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        for auth in ["Token s3cret", "Bearer s3cret"] {
            let (status, body) = send(&app, Method::GET, "/api/v1/clinic/", None, Some(auth)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!([]));
        }
    }

    #[tokio::test]
    async fn trailing_slash_is_optional() {
        let app = app();
        let (clinic, _) = seed(&app).await;
        for uri in [format!("/api/v1/clinic/{clinic}"), format!("/api/v1/clinic/{clinic}/")] {
            let (status, body) = send(&app, Method::GET, &uri, None, None).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body["location"], "Ensenada");
            assert_eq!(body["start"], "05/01/2021");
        }
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let app = app();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/vaccine/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"covid19\": "))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn vaccine_lifecycle() {
        let app = app();
        let (clinic, patient) = seed(&app).await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/v1/vaccine/",
            Some(vaccine_payload(patient, clinic)),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_i64().unwrap();

        let (status, record) =
            send(&app, Method::GET, &format!("/api/v1/vaccine/{id}/"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record["patient"], patient);
        assert_eq!(record["clinic"], clinic);
        assert_eq!(record["mmr"], "true");
        assert_eq!(record["mmr_date"], "04/30/2021");
        assert_eq!(record["covid19_doses"], 2);

        let uri = format!("/api/v1/vaccine/?patient={patient}&clinic={clinic}");
        let (status, single) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(single["id"], id);

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/vaccine/{id}/"),
            Some(json!({ "hib": "false" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));

        let (status, _) =
            send(&app, Method::DELETE, &format!("/api/v1/vaccine/{id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) =
            send(&app, Method::DELETE, &format!("/api/v1/vaccine/{id}"), None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn vaccine_collection_put_and_delete_need_an_id() {
        let app = app();
        let (status, _) = send(&app, Method::PUT, "/api/v1/vaccine/", Some(json!({})), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, Method::DELETE, "/api/v1/vaccine", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn vaccine_list_without_parameters_is_bad_request() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/v1/vaccine/", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let app = app();
        let (status, _) = send(&app, Method::GET, "/api/v1/vaccine/abc/", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn clinic_station_rejects_non_boolean_active() {
        let app = app();
        let (clinic, _) = seed(&app).await;
        let (_, station) = send(
            &app,
            Method::POST,
            "/api/v1/station/",
            Some(json!({ "name": "ENT" })),
            None,
        )
        .await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/clinicstation/",
            Some(json!({ "clinic": clinic, "station": station["id"], "active": "Hello" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = app_with(Some("s3cret"));
        let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"].get("/api/v1/vaccine").is_some());
        assert!(doc["paths"].get("/api/v1/clinicstation/{id}").is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn file_backed_records_survive_a_restart() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let file_app = |dir: &std::path::Path| {
            let store = FileStore::open(dir).expect("open store");
            router(RecordServices::new(Arc::new(store)), &RestConfig::default())
        };

        let app = file_app(temp_dir.path());
        let (clinic, patient) = seed(&app).await;
        let (status, created) = send(
            &app,
            Method::POST,
            "/api/v1/vaccine/",
            Some(vaccine_payload(patient, clinic)),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_i64().unwrap();
        drop(app);

        let app = file_app(temp_dir.path());
        let (status, record) =
            send(&app, Method::GET, &format!("/api/v1/vaccine/{id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record["patient"], patient);
        assert_eq!(record["mmr_date"], "04/30/2021");
    }
}
