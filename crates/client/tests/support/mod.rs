//! Spawns the REST router on an ephemeral port and hands back a client for it.

#![allow(dead_code)]

use api_rest::{router, RestConfig};
use clinic_client::{
    ClientConfig, ClinicClient, CreateClinic, CreatePatient, CreateStation, CreateVaccine,
    StatusCode,
};
use clinic_core::{MemoryStore, RecordServices, Vaccine};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub const TOKEN: &str = "integration-token";

pub struct TestServer {
    pub client: ClinicClient,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Starts a server requiring [`TOKEN`] and a client that presents it.
    pub async fn spawn() -> Self {
        let services = RecordServices::new(Arc::new(MemoryStore::new()));
        let cfg = RestConfig {
            addr: "127.0.0.1:0".into(),
            api_token: Some(TOKEN.into()),
        };
        let app = router(services, &cfg);

        let listener = tokio::net::TcpListener::bind(&cfg.addr).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = ClinicClient::new(
            ClientConfig::new("127.0.0.1", port)
                .with_token(TOKEN)
                .with_timeout(Duration::from_secs(10)),
        )
        .unwrap();
        Self { client, handle }
    }

    /// A client for the same server without credentials.
    pub fn anonymous_client(&self) -> ClinicClient {
        let mut cfg = self.client.config().clone();
        cfg.token = None;
        ClinicClient::new(cfg).unwrap()
    }

    pub async fn send<R: clinic_client::ApiRequest>(&self, req: &R) -> (StatusCode, Value) {
        self.client.send(req).await.unwrap()
    }

    pub async fn create_clinic(&self) -> i64 {
        let (status, body) = self
            .send(&CreateClinic::new("Ensenada", "02/05/2016", "02/06/2016"))
            .await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_i64().unwrap()
    }

    pub async fn create_patient(&self) -> i64 {
        let (status, body) = self
            .send(&CreatePatient::new("Cervantes", "Jose", "04/01/1992", "Male"))
            .await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_i64().unwrap()
    }

    pub async fn create_station(&self, name: &str) -> i64 {
        let (status, body) = self.send(&CreateStation::new(name)).await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_i64().unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A complete, valid vaccine payload: every vaccine not administered except the
/// listed ones, every date `date`, one COVID-19 dose.
pub fn full_vaccine(patient: i64, clinic: i64, administered: &[Vaccine], date: &str) -> CreateVaccine {
    let mut req = CreateVaccine::new(patient, clinic);
    for vaccine in Vaccine::ALL {
        let flag = if administered.contains(&vaccine) { "true" } else { "false" };
        req.set(vaccine.name(), flag);
        req.set(vaccine.date_field(), date);
    }
    req.set("covid19_doses", 1);
    req
}
