//! Vaccine list queries.
//!
//! A listing request carries optional `patient` and `clinic` parameters. Exactly three
//! shapes are legal: both, patient only, clinic only.

use crate::constants::{CLINIC_FIELD, PATIENT_FIELD};
use crate::store::Filter;
use crate::vaccine::VaccineRecord;
use api_shared::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("query parameter '{param}' is not a valid id: '{value}'")]
    InvalidId { param: &'static str, value: String },
    #[error("a patient or clinic query parameter is required")]
    NoCriteria,
    #[error("query parameter '{param}' names a {param} that does not exist: {id}")]
    Unresolved { param: &'static str, id: RecordId },
}

/// A legal combination of listing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaccineQuery {
    PatientAndClinic { patient: RecordId, clinic: RecordId },
    Patient(RecordId),
    Clinic(RecordId),
}

fn parse_param(param: &'static str, raw: Option<&str>) -> Result<Option<RecordId>, QueryError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<RecordId>()
            .map(Some)
            .map_err(|_| QueryError::InvalidId {
                param,
                value: value.to_owned(),
            }),
    }
}

impl VaccineQuery {
    /// Builds a query from raw parameter values. Empty values count as absent.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidId`] for a value that is not an integer,
    /// [`QueryError::NoCriteria`] when neither parameter is given.
    pub fn from_params(patient: Option<&str>, clinic: Option<&str>) -> Result<Self, QueryError> {
        let patient = parse_param(PATIENT_FIELD, patient)?;
        let clinic = parse_param(CLINIC_FIELD, clinic)?;
        match (patient, clinic) {
            (Some(patient), Some(clinic)) => Ok(VaccineQuery::PatientAndClinic { patient, clinic }),
            (Some(patient), None) => Ok(VaccineQuery::Patient(patient)),
            (None, Some(clinic)) => Ok(VaccineQuery::Clinic(clinic)),
            (None, None) => Err(QueryError::NoCriteria),
        }
    }

    pub fn patient(&self) -> Option<RecordId> {
        match *self {
            VaccineQuery::PatientAndClinic { patient, .. } | VaccineQuery::Patient(patient) => {
                Some(patient)
            }
            VaccineQuery::Clinic(_) => None,
        }
    }

    pub fn clinic(&self) -> Option<RecordId> {
        match *self {
            VaccineQuery::PatientAndClinic { clinic, .. } | VaccineQuery::Clinic(clinic) => {
                Some(clinic)
            }
            VaccineQuery::Patient(_) => None,
        }
    }

    /// The store filter selecting matching records.
    pub fn filter(&self) -> Filter {
        let mut filter = Filter::new();
        if let Some(patient) = self.patient() {
            filter = filter.eq(PATIENT_FIELD, patient);
        }
        if let Some(clinic) = self.clinic() {
            filter = filter.eq(CLINIC_FIELD, clinic);
        }
        filter
    }

    /// Shapes matches into the response form: a patient-and-clinic query with exactly
    /// one match yields that record alone, anything else a list.
    pub fn shape(&self, mut records: Vec<VaccineRecord>) -> VaccineLookup {
        if matches!(self, VaccineQuery::PatientAndClinic { .. }) && records.len() == 1 {
            if let Some(record) = records.pop() {
                return VaccineLookup::Single(Box::new(record));
            }
        }
        VaccineLookup::Many(records)
    }
}

/// Result of a vaccine read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaccineLookup {
    Single(Box<VaccineRecord>),
    Many(Vec<VaccineRecord>),
}
