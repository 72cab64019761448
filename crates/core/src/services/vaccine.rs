use crate::models::{Clinic, Patient};
use crate::query::{QueryError, VaccineLookup, VaccineQuery};
use crate::store::{EntityKind, Store, Table};
use crate::validation::{validate_for_create, validate_for_update};
use crate::vaccine::VaccineRecord;
use crate::{CoreError, CoreResult};
use api_shared::RecordId;
use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;

fn payload(data: &Value) -> CoreResult<&Map<String, Value>> {
    data.as_object()
        .ok_or_else(|| CoreError::InvalidInput("vaccine payload must be a JSON object".into()))
}

/// Create, read, update and delete for vaccine records.
#[derive(Clone, Debug)]
pub struct VaccineService {
    vaccines: Table<VaccineRecord>,
    patients: Table<Patient>,
    clinics: Table<Clinic>,
}

impl VaccineService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            vaccines: Table::new(store.clone()),
            patients: Table::new(store.clone()),
            clinics: Table::new(store),
        }
    }

    /// Validates and stores a new record, stamping its creation time.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Validation`] for a malformed payload; nothing is stored
    /// - [`CoreError::NotFound`] when the patient or clinic does not exist
    pub fn create(&self, data: &Value) -> CoreResult<RecordId> {
        let new = validate_for_create(payload(data)?)?;
        if !self.patients.exists(new.patient)? {
            return Err(CoreError::NotFound {
                kind: EntityKind::Patient,
                id: new.patient,
            });
        }
        if !self.clinics.exists(new.clinic)? {
            return Err(CoreError::NotFound {
                kind: EntityKind::Clinic,
                id: new.clinic,
            });
        }
        let record = new.into_record(Utc::now());
        let id = self.vaccines.create(&record)?;
        tracing::info!(
            vaccine = id,
            patient = record.patient,
            clinic = record.clinic,
            "created vaccine record"
        );
        Ok(id)
    }

    pub fn get(&self, id: RecordId) -> CoreResult<VaccineRecord> {
        Ok(self.vaccines.get(id)?)
    }

    /// Lists records by patient and/or clinic.
    ///
    /// Both ids must name existing entities. A query that matches nothing is an empty
    /// list, not an error.
    pub fn list(&self, patient: Option<&str>, clinic: Option<&str>) -> CoreResult<VaccineLookup> {
        let query = VaccineQuery::from_params(patient, clinic)?;
        if let Some(id) = query.patient() {
            if !self.patients.exists(id)? {
                return Err(QueryError::Unresolved {
                    param: "patient",
                    id,
                }
                .into());
            }
        }
        if let Some(id) = query.clinic() {
            if !self.clinics.exists(id)? {
                return Err(QueryError::Unresolved { param: "clinic", id }.into());
            }
        }
        let records = self.vaccines.filter(&query.filter())?;
        Ok(query.shape(records))
    }

    /// Applies a partial update. The record is saved only if every supplied field
    /// validates.
    pub fn update(&self, id: RecordId, data: &Value) -> CoreResult<()> {
        let data = payload(data)?;
        let mut record = self.vaccines.get(id)?;
        validate_for_update(data, &mut record)?;
        self.vaccines.save(id, &record)?;
        tracing::debug!(vaccine = id, fields = data.len(), "updated vaccine record");
        Ok(())
    }

    pub fn delete(&self, id: RecordId) -> CoreResult<()> {
        self.vaccines.delete(id)?;
        tracing::info!(vaccine = id, "deleted vaccine record");
        Ok(())
    }
}
