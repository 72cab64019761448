//! Vaccine payload validation.
//!
//! Payloads are flat JSON objects whose keys must come from the field whitelist
//! derived from [`Vaccine`]: each vaccine name, its `_date` pair, `covid19_doses`,
//! `patient` and `clinic`.
//!
//! - [`validate_for_create`] requires every field and yields a [`NewVaccineRecord`].
//! - [`validate_for_update`] accepts any subset and applies it to an existing record.
//!
//! An unknown key fails immediately. Otherwise every offending field is collected so
//! the caller can report them together.

use crate::vaccine::{
    Administration, Covid19Doses, FieldKind, NewVaccineRecord, Vaccine, VaccineRecord,
};
use api_shared::RecordId;
use chrono::NaiveDate;
use clinic_types::{parse_bool_token, parse_date};
use serde_json::{Map, Value};

/// One rejected payload field.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FieldIssue {
    #[error("unknown field '{0}'")]
    Unknown(String),
    #[error("missing field '{0}'")]
    Missing(String),
    #[error("field '{0}' must be \"true\" or \"false\"")]
    NotBoolToken(String),
    #[error("field '{0}' must be a date in MM/DD/YYYY or MM-DD-YYYY form")]
    BadDate(String),
    #[error("field '{0}' must be one of 0, 1 or 2")]
    OutOfRange(String),
    #[error("field '{0}' must be a record id")]
    BadId(String),
}

impl FieldIssue {
    pub fn field(&self) -> &str {
        match self {
            FieldIssue::Unknown(f)
            | FieldIssue::Missing(f)
            | FieldIssue::NotBoolToken(f)
            | FieldIssue::BadDate(f)
            | FieldIssue::OutOfRange(f)
            | FieldIssue::BadId(f) => f,
        }
    }
}

/// Failure of a whole validation pass. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid vaccine payload: {}", join_issues(.issues))]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    fn new(issues: Vec<FieldIssue>) -> Self {
        debug_assert!(!issues.is_empty());
        Self { issues }
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Whether `field` is among the rejected fields.
    pub fn mentions(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field() == field)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Accumulates issues, logging each as it is found.
#[derive(Default)]
struct Issues(Vec<FieldIssue>);

impl Issues {
    fn push(&mut self, issue: FieldIssue) {
        tracing::debug!(field = issue.field(), "rejected vaccine field: {issue}");
        self.0.push(issue);
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::new(self.0))
        }
    }
}

fn check_whitelist(data: &Map<String, Value>) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    for key in data.keys() {
        if FieldKind::classify(key).is_none() {
            issues.push(FieldIssue::Unknown(key.clone()));
        }
    }
    issues.finish(())
}

fn bool_field(field: &str, value: &Value) -> Result<bool, FieldIssue> {
    value
        .as_str()
        .and_then(parse_bool_token)
        .ok_or_else(|| FieldIssue::NotBoolToken(field.to_owned()))
}

fn date_field(field: &str, value: &Value) -> Result<NaiveDate, FieldIssue> {
    value
        .as_str()
        .and_then(|s| parse_date(s).ok())
        .ok_or_else(|| FieldIssue::BadDate(field.to_owned()))
}

/// A JSON integer, or a string holding one.
fn lenient_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn doses_from(field: &str, n: Option<i64>) -> Result<Covid19Doses, FieldIssue> {
    n.and_then(|n| Covid19Doses::try_from(n).ok())
        .ok_or_else(|| FieldIssue::OutOfRange(field.to_owned()))
}

fn id_field(field: &str, value: &Value) -> Result<RecordId, FieldIssue> {
    lenient_integer(value)
        .filter(|id| *id > 0)
        .ok_or_else(|| FieldIssue::BadId(field.to_owned()))
}

/// Looks up a required field, recording it as missing when absent.
fn required<'a>(data: &'a Map<String, Value>, field: &str, issues: &mut Issues) -> Option<&'a Value> {
    let value = data.get(field);
    if value.is_none() {
        issues.push(FieldIssue::Missing(field.to_owned()));
    }
    value
}

fn checked<T: Default>(result: Result<T, FieldIssue>, issues: &mut Issues) -> T {
    result.unwrap_or_else(|issue| {
        issues.push(issue);
        T::default()
    })
}

/// Validates a complete create payload.
///
/// Every one of the 25 vaccine pairs must be present, along with `covid19_doses`,
/// `patient` and `clinic`. `covid19_doses` and the ids may be JSON integers or
/// integer strings.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing an unknown key, or else every missing or
/// malformed field.
pub fn validate_for_create(data: &Map<String, Value>) -> Result<NewVaccineRecord, ValidationError> {
    check_whitelist(data)?;
    let mut issues = Issues::default();

    let administrations = Vaccine::ALL.map(|vaccine| {
        let administered = required(data, vaccine.name(), &mut issues)
            .map(|v| checked(bool_field(vaccine.name(), v), &mut issues))
            .unwrap_or_default();
        let date = required(data, vaccine.date_field(), &mut issues)
            .map(|v| checked(date_field(vaccine.date_field(), v), &mut issues))
            .unwrap_or_default();
        Administration { administered, date }
    });

    let doses_field = crate::constants::COVID19_DOSES_FIELD;
    let covid19_doses = match required(data, doses_field, &mut issues) {
        Some(v) => match doses_from(doses_field, lenient_integer(v)) {
            Ok(doses) => doses,
            Err(issue) => {
                issues.push(issue);
                Covid19Doses::Zero
            }
        },
        None => Covid19Doses::Zero,
    };

    let patient = required(data, crate::constants::PATIENT_FIELD, &mut issues)
        .map(|v| checked(id_field(crate::constants::PATIENT_FIELD, v), &mut issues))
        .unwrap_or_default();
    let clinic = required(data, crate::constants::CLINIC_FIELD, &mut issues)
        .map(|v| checked(id_field(crate::constants::CLINIC_FIELD, v), &mut issues))
        .unwrap_or_default();

    issues.finish(NewVaccineRecord {
        patient,
        clinic,
        covid19_doses,
        administrations,
    })
}

/// Validates a partial update payload and applies it to `record`.
///
/// Supplied fields replace the record's values; absent fields are untouched.
/// `covid19_doses` must be a JSON integer here. `patient` and `clinic` are accepted
/// and ignored, since a record never moves between patients or clinics.
///
/// # Errors
///
/// Returns a [`ValidationError`] if any supplied field is unknown or malformed. In
/// that case `record` is left exactly as it was.
pub fn validate_for_update(
    data: &Map<String, Value>,
    record: &mut VaccineRecord,
) -> Result<(), ValidationError> {
    check_whitelist(data)?;
    let mut issues = Issues::default();
    let mut updated = record.clone();

    for (key, value) in data {
        let Some(kind) = FieldKind::classify(key) else {
            continue;
        };
        match kind {
            FieldKind::Administered(vaccine) => match bool_field(key, value) {
                Ok(administered) => updated.set_administered(vaccine, administered),
                Err(issue) => issues.push(issue),
            },
            FieldKind::Date(vaccine) => match date_field(key, value) {
                Ok(date) => updated.set_date(vaccine, date),
                Err(issue) => issues.push(issue),
            },
            FieldKind::Covid19Doses => {
                let strict = match value {
                    Value::Number(n) => n.as_i64(),
                    _ => None,
                };
                match doses_from(key, strict) {
                    Ok(doses) => updated.covid19_doses = doses,
                    Err(issue) => issues.push(issue),
                }
            }
            FieldKind::Patient | FieldKind::Clinic => {}
        }
    }

    issues.finish(())?;
    *record = updated;
    Ok(())
}
