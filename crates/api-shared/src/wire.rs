//! JSON wire types.
//!
//! These are the request and response bodies of the REST API. Request bodies that
//! carry free-form field maps (vaccine records) are kept as raw JSON objects so the
//! domain validator can see exactly what the client sent.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier assigned by the store.
pub type RecordId = i64;

/// A serialised vaccine record: `id`, `clinic`, `patient`, `time`, one `"true"`/`"false"`
/// token per vaccine, one `MM/DD/YYYY` date per vaccine and `covid19_doses`.
pub type VaccineRes = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Body returned by every create operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedRes {
    pub id: RecordId,
}

/// The `{}` body returned by updates and deletes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmptyRes {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ClinicReq {
    pub location: String,
    /// `MM/DD/YYYY` or `MM-DD-YYYY`.
    pub start: String,
    /// `MM/DD/YYYY` or `MM-DD-YYYY`.
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClinicRes {
    pub id: RecordId,
    pub location: String,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PatientReq {
    pub paternal_last: String,
    #[serde(default)]
    pub maternal_last: String,
    pub first: String,
    #[serde(default)]
    pub middle: String,
    /// `MM/DD/YYYY` or `MM-DD-YYYY`.
    pub dob: String,
    /// `Male` or `Female`.
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub id: RecordId,
    pub paternal_last: String,
    pub maternal_last: String,
    pub first: String,
    pub middle: String,
    pub dob: String,
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct StationReq {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StationRes {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ClinicStationReq {
    pub clinic: RecordId,
    pub station: RecordId,
    pub active: Option<bool>,
    pub away: Option<bool>,
    pub name: Option<String>,
    pub level: Option<u32>,
    /// Minutes a station stays away once marked away.
    pub awaytime: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ClinicStationUpdateReq {
    pub active: Option<bool>,
    pub away: Option<bool>,
    pub finished: Option<bool>,
    pub awaytime: Option<u32>,
    pub level: Option<u32>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClinicStationRes {
    pub id: RecordId,
    pub clinic: RecordId,
    pub station: RecordId,
    pub name: String,
    pub active: bool,
    pub away: bool,
    pub awaytime: u32,
    /// RFC 3339 timestamp at which an away station is expected back.
    pub willreturn: String,
    pub level: u32,
    pub finished: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_res_serialises_as_empty_object() {
        assert_eq!(serde_json::to_string(&EmptyRes {}).unwrap(), "{}");
    }

    #[test]
    fn clinic_station_req_rejects_non_boolean_flags() {
        let parsed: Result<ClinicStationReq, _> =
            serde_json::from_str(r#"{"clinic":1,"station":2,"active":"Hello"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn clinic_station_update_rejects_unknown_keys() {
        let parsed: Result<ClinicStationUpdateReq, _> =
            serde_json::from_str(r#"{"away":true,"colour":"red"}"#);
        assert!(parsed.is_err());

        let parsed: ClinicStationUpdateReq =
            serde_json::from_str(r#"{"level":15}"#).expect("partial update parses");
        assert_eq!(parsed.level, Some(15));
        assert_eq!(parsed.away, None);
    }

    #[test]
    fn patient_req_defaults_optional_names() {
        let parsed: PatientReq = serde_json::from_str(
            r#"{"paternal_last":"Diaz","first":"Ana","dob":"01/02/2010","gender":"Female"}"#,
        )
        .expect("minimal patient parses");
        assert_eq!(parsed.maternal_last, "");
        assert_eq!(parsed.middle, "");
    }
}
