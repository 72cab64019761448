//! Request values, one per API operation.
//!
//! Constructors take the required fields; setters add optional ones.

use crate::ApiRequest;
use api_shared::RecordId;
use reqwest::Method;
use serde_json::{json, Map, Value};

fn collection(resource: &str) -> String {
    format!("api/v1/{resource}/")
}

fn item(resource: &str, id: RecordId) -> String {
    format!("api/v1/{resource}/{id}/")
}

fn maybe_item(resource: &str, id: Option<RecordId>) -> String {
    match id {
        Some(id) => item(resource, id),
        None => collection(resource),
    }
}

#[derive(Clone, Debug, Default)]
pub struct Health;

impl ApiRequest for Health {
    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "health".into()
    }
}

#[derive(Clone, Debug)]
pub struct CreateClinic {
    pub location: String,
    pub start: String,
    pub end: String,
}

impl CreateClinic {
    pub fn new(location: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

impl ApiRequest for CreateClinic {
    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        collection("clinic")
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "location": self.location, "start": self.start, "end": self.end }))
    }
}

/// Fetches one clinic, or all clinics when no id is given.
#[derive(Clone, Debug, Default)]
pub struct GetClinic {
    pub id: Option<RecordId>,
}

impl ApiRequest for GetClinic {
    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        maybe_item("clinic", self.id)
    }
}

#[derive(Clone, Debug)]
pub struct DeleteClinic {
    pub id: RecordId,
}

impl ApiRequest for DeleteClinic {
    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        item("clinic", self.id)
    }
}

#[derive(Clone, Debug)]
pub struct CreatePatient {
    pub paternal_last: String,
    pub maternal_last: String,
    pub first: String,
    pub middle: String,
    pub dob: String,
    pub gender: String,
}

impl CreatePatient {
    pub fn new(
        paternal_last: impl Into<String>,
        first: impl Into<String>,
        dob: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            paternal_last: paternal_last.into(),
            maternal_last: String::new(),
            first: first.into(),
            middle: String::new(),
            dob: dob.into(),
            gender: gender.into(),
        }
    }
}

impl ApiRequest for CreatePatient {
    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        collection("patient")
    }

    fn body(&self) -> Option<Value> {
        Some(json!({
            "paternal_last": self.paternal_last,
            "maternal_last": self.maternal_last,
            "first": self.first,
            "middle": self.middle,
            "dob": self.dob,
            "gender": self.gender,
        }))
    }
}

#[derive(Clone, Debug)]
pub struct DeletePatient {
    pub id: RecordId,
}

impl ApiRequest for DeletePatient {
    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        item("patient", self.id)
    }
}

#[derive(Clone, Debug)]
pub struct CreateStation {
    pub name: String,
}

impl CreateStation {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ApiRequest for CreateStation {
    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        collection("station")
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "name": self.name }))
    }
}

#[derive(Clone, Debug)]
pub struct DeleteStation {
    pub id: RecordId,
}

impl ApiRequest for DeleteStation {
    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        item("station", self.id)
    }
}

/// Staffs a station during a clinic. Optional fields are sent only when set, so the
/// server defaults apply otherwise.
#[derive(Clone, Debug)]
pub struct CreateClinicStation {
    payload: Map<String, Value>,
}

impl CreateClinicStation {
    pub fn new(clinic: RecordId, station: RecordId) -> Self {
        let mut payload = Map::new();
        payload.insert("clinic".into(), json!(clinic));
        payload.insert("station".into(), json!(station));
        Self { payload }
    }

    pub fn set_active(&mut self, active: bool) -> &mut Self {
        self.set_raw("active", json!(active))
    }

    pub fn set_away(&mut self, away: bool) -> &mut Self {
        self.set_raw("away", json!(away))
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.set_raw("name", json!(name.into()))
    }

    pub fn set_level(&mut self, level: u32) -> &mut Self {
        self.set_raw("level", json!(level))
    }

    /// Sets any field to any JSON value, including ones the server will reject.
    pub fn set_raw(&mut self, field: &str, value: Value) -> &mut Self {
        self.payload.insert(field.into(), value);
        self
    }
}

impl ApiRequest for CreateClinicStation {
    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        collection("clinicstation")
    }

    fn body(&self) -> Option<Value> {
        Some(Value::Object(self.payload.clone()))
    }
}

/// Fetches one clinic station by id, or a filtered list.
#[derive(Clone, Debug, Default)]
pub struct GetClinicStation {
    id: Option<RecordId>,
    clinic: Option<RecordId>,
    active: Option<bool>,
    away: Option<bool>,
    finished: Option<bool>,
    level: Option<u32>,
}

impl GetClinicStation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: RecordId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn set_id(&mut self, id: RecordId) -> &mut Self {
        self.id = Some(id);
        self
    }

    pub fn set_clinic(&mut self, clinic: RecordId) -> &mut Self {
        self.clinic = Some(clinic);
        self
    }

    pub fn set_active(&mut self, active: bool) -> &mut Self {
        self.active = Some(active);
        self
    }

    pub fn set_away(&mut self, away: bool) -> &mut Self {
        self.away = Some(away);
        self
    }

    pub fn set_finished(&mut self, finished: bool) -> &mut Self {
        self.finished = Some(finished);
        self
    }

    pub fn set_level(&mut self, level: u32) -> &mut Self {
        self.level = Some(level);
        self
    }
}

impl ApiRequest for GetClinicStation {
    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        maybe_item("clinicstation", self.id)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        if let Some(clinic) = self.clinic {
            q.push(("clinic", clinic.to_string()));
        }
        if let Some(active) = self.active {
            q.push(("active", active.to_string()));
        }
        if let Some(level) = self.level {
            q.push(("level", level.to_string()));
        }
        if let Some(away) = self.away {
            q.push(("away", away.to_string()));
        }
        if let Some(finished) = self.finished {
            q.push(("finished", finished.to_string()));
        }
        q
    }
}

#[derive(Clone, Debug)]
pub struct UpdateClinicStation {
    id: RecordId,
    payload: Map<String, Value>,
}

impl UpdateClinicStation {
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            payload: Map::new(),
        }
    }

    pub fn set_active(&mut self, active: bool) -> &mut Self {
        self.payload.insert("active".into(), json!(active));
        self
    }

    pub fn set_away(&mut self, away: bool) -> &mut Self {
        self.payload.insert("away".into(), json!(away));
        self
    }

    pub fn set_finished(&mut self, finished: bool) -> &mut Self {
        self.payload.insert("finished".into(), json!(finished));
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.payload.insert("name".into(), json!(name.into()));
        self
    }

    pub fn set_level(&mut self, level: u32) -> &mut Self {
        self.payload.insert("level".into(), json!(level));
        self
    }

    pub fn set_away_time(&mut self, minutes: u32) -> &mut Self {
        self.payload.insert("awaytime".into(), json!(minutes));
        self
    }
}

impl ApiRequest for UpdateClinicStation {
    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        item("clinicstation", self.id)
    }

    fn body(&self) -> Option<Value> {
        Some(Value::Object(self.payload.clone()))
    }
}

#[derive(Clone, Debug)]
pub struct DeleteClinicStation {
    pub id: RecordId,
}

impl ApiRequest for DeleteClinicStation {
    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        item("clinicstation", self.id)
    }
}

/// Creates a vaccine record. The payload starts with just `patient` and `clinic`;
/// callers add the vaccine fields.
#[derive(Clone, Debug)]
pub struct CreateVaccine {
    payload: Map<String, Value>,
}

impl CreateVaccine {
    pub fn new(patient: RecordId, clinic: RecordId) -> Self {
        let mut payload = Map::new();
        payload.insert("patient".into(), json!(patient));
        payload.insert("clinic".into(), json!(clinic));
        Self { payload }
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.payload.insert(field.into(), value.into());
        self
    }

    pub fn remove(&mut self, field: &str) -> &mut Self {
        self.payload.remove(field);
        self
    }
}

impl ApiRequest for CreateVaccine {
    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        collection("vaccine")
    }

    fn body(&self) -> Option<Value> {
        Some(Value::Object(self.payload.clone()))
    }
}

/// Fetches one vaccine record by id, or lists by patient and/or clinic.
#[derive(Clone, Debug, Default)]
pub struct GetVaccine {
    id: Option<RecordId>,
    patient: Option<RecordId>,
    clinic: Option<RecordId>,
}

impl GetVaccine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: RecordId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn set_patient(&mut self, patient: RecordId) -> &mut Self {
        self.patient = Some(patient);
        self
    }

    pub fn set_clinic(&mut self, clinic: RecordId) -> &mut Self {
        self.clinic = Some(clinic);
        self
    }
}

impl ApiRequest for GetVaccine {
    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        maybe_item("vaccine", self.id)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        if let Some(patient) = self.patient {
            q.push(("patient", patient.to_string()));
        }
        if let Some(clinic) = self.clinic {
            q.push(("clinic", clinic.to_string()));
        }
        q
    }
}

/// Updates a vaccine record. Without an id the request targets the collection,
/// which the server rejects.
#[derive(Clone, Debug, Default)]
pub struct UpdateVaccine {
    id: Option<RecordId>,
    payload: Map<String, Value>,
}

impl UpdateVaccine {
    pub fn new(id: RecordId) -> Self {
        Self {
            id: Some(id),
            payload: Map::new(),
        }
    }

    pub fn without_id() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.payload.insert(field.into(), value.into());
        self
    }
}

impl ApiRequest for UpdateVaccine {
    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        maybe_item("vaccine", self.id)
    }

    fn body(&self) -> Option<Value> {
        Some(Value::Object(self.payload.clone()))
    }
}

#[derive(Clone, Debug, Default)]
pub struct DeleteVaccine {
    pub id: Option<RecordId>,
}

impl DeleteVaccine {
    pub fn new(id: RecordId) -> Self {
        Self { id: Some(id) }
    }
}

impl ApiRequest for DeleteVaccine {
    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        maybe_item("vaccine", self.id)
    }
}
