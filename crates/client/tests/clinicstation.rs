mod support;

use clinic_client::{
    CreateClinicStation, DeleteClinic, DeleteClinicStation, DeleteStation, GetClinicStation,
    StatusCode, UpdateClinicStation,
};
use serde_json::json;
use support::TestServer;

#[tokio::test]
async fn create_applies_defaults() {
    let srv = TestServer::spawn().await;
    let clinic = srv.create_clinic().await;
    let station = srv.create_station("ENT").await;

    let mut req = CreateClinicStation::new(clinic, station);
    req.set_name("test1");
    let (status, created) = srv.send(&req).await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().unwrap();

    let (status, cs) = srv.send(&GetClinicStation::by_id(id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cs["clinic"], clinic);
    assert_eq!(cs["station"], station);
    assert_eq!(cs["active"], false);
    assert_eq!(cs["away"], true);
    assert_eq!(cs["name"], "test1");
    assert!(cs["willreturn"].as_str().is_some());

    let (_, created) = srv.send(&CreateClinicStation::new(clinic, station)).await;
    let (_, cs) = srv
        .send(&GetClinicStation::by_id(created["id"].as_i64().unwrap()))
        .await;
    assert_eq!(cs["name"], "");

    let mut req = CreateClinicStation::new(clinic, station);
    req.set_active(true).set_away(false);
    let (_, created) = srv.send(&req).await;
    let (_, cs) = srv
        .send(&GetClinicStation::by_id(created["id"].as_i64().unwrap()))
        .await;
    assert_eq!(cs["active"], true);
    assert_eq!(cs["away"], false);
}

#[tokio::test]
async fn create_rejects_bad_input() {
    let srv = TestServer::spawn().await;
    let clinic = srv.create_clinic().await;
    let station = srv.create_station("Dental").await;

    let (status, _) = srv.send(&CreateClinicStation::new(9999, station)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = srv.send(&CreateClinicStation::new(clinic, 9999)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let mut req = CreateClinicStation::new(clinic, station);
    req.set_raw("active", json!("Hello"));
    let (status, _) = srv.send(&req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut req = CreateClinicStation::new(clinic, station);
    req.set_raw("away", json!("Hello"));
    let (status, _) = srv.send(&req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_twice_is_not_found() {
    let srv = TestServer::spawn().await;
    let clinic = srv.create_clinic().await;
    let station = srv.create_station("ENT").await;
    let (_, created) = srv.send(&CreateClinicStation::new(clinic, station)).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = srv.send(&DeleteClinicStation { id }).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
    let (status, _) = srv.send(&GetClinicStation::by_id(id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = srv.send(&DeleteClinicStation { id }).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn updates_are_reflected_by_get() {
    let srv = TestServer::spawn().await;
    let clinic = srv.create_clinic().await;
    let station = srv.create_station("ENT").await;
    let mut req = CreateClinicStation::new(clinic, station);
    req.set_active(true).set_away(false);
    let (_, created) = srv.send(&req).await;
    let id = created["id"].as_i64().unwrap();

    let mut update = UpdateClinicStation::new(id);
    update.set_active(false).set_away(true).set_away_time(15);
    let (status, body) = srv.send(&update).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
    let (_, cs) = srv.send(&GetClinicStation::by_id(id)).await;
    assert_eq!(cs["active"], false);
    assert_eq!(cs["away"], true);
    assert_eq!(cs["awaytime"], 15);

    let mut update = UpdateClinicStation::new(id);
    update.set_active(true).set_away(false);
    srv.send(&update).await;
    let (_, cs) = srv.send(&GetClinicStation::by_id(id)).await;
    assert_eq!(cs["active"], true);
    assert_eq!(cs["away"], false);

    let mut update = UpdateClinicStation::new(id);
    update.set_level(15).set_name("Dental Chair 1");
    srv.send(&update).await;
    let (_, cs) = srv.send(&GetClinicStation::by_id(id)).await;
    assert_eq!(cs["level"], 15);
    assert_eq!(cs["name"], "Dental Chair 1");

    let mut update = UpdateClinicStation::new(id);
    update.set_level(0).set_away_time(23).set_active(false).set_away(true);
    srv.send(&update).await;
    let (_, cs) = srv.send(&GetClinicStation::by_id(id)).await;
    assert_eq!(cs["level"], 0);
    assert_eq!(cs["awaytime"], 23);
    assert_eq!(cs["active"], false);
    assert_eq!(cs["away"], true);

    let (status, _) = srv.send(&UpdateClinicStation::new(id + 50)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn filtered_listing_until_empty() {
    let srv = TestServer::spawn().await;
    let clinic = srv.create_clinic().await;
    let names = ["ENT", "Dental", "Ortho", "X-Ray", "Speech"];
    let mut ids = Vec::new();
    for (i, name) in names.iter().enumerate() {
        let station = srv.create_station(name).await;
        let mut req = CreateClinicStation::new(clinic, station);
        req.set_active(i % 2 == 0).set_level(i as u32);
        let (_, created) = srv.send(&req).await;
        ids.push(created["id"].as_i64().unwrap());
    }

    let mut all = GetClinicStation::new();
    all.set_clinic(clinic);
    let (status, list) = srv.send(&all).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), names.len());

    let mut active = GetClinicStation::new();
    active.set_clinic(clinic).set_active(true);
    let (_, list) = srv.send(&active).await;
    assert_eq!(list.as_array().unwrap().len(), 3);

    let mut level = GetClinicStation::new();
    level.set_clinic(clinic).set_level(4);
    let (_, list) = srv.send(&level).await;
    assert_eq!(list[0]["id"], ids[4]);

    for id in ids {
        let (status, _) = srv.send(&DeleteClinicStation { id }).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = srv.send(&all).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_clinic_or_station_removes_clinic_stations() {
    let srv = TestServer::spawn().await;
    let clinic = srv.create_clinic().await;
    let station = srv.create_station("ENT").await;
    let (_, first) = srv.send(&CreateClinicStation::new(clinic, station)).await;

    let (status, _) = srv.send(&DeleteStation { id: station }).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = srv
        .send(&GetClinicStation::by_id(first["id"].as_i64().unwrap()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let station = srv.create_station("Dental").await;
    let (_, second) = srv.send(&CreateClinicStation::new(clinic, station)).await;
    let (status, _) = srv.send(&DeleteClinic { id: clinic }).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = srv
        .send(&GetClinicStation::by_id(second["id"].as_i64().unwrap()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
