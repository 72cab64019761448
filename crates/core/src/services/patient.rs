use crate::constants::PATIENT_FIELD;
use crate::models::Patient;
use crate::store::{Filter, Store, Table};
use crate::vaccine::VaccineRecord;
use crate::CoreResult;
use api_shared::{PatientReq, RecordId};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct PatientService {
    patients: Table<Patient>,
    vaccines: Table<VaccineRecord>,
}

impl PatientService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            patients: Table::new(store.clone()),
            vaccines: Table::new(store),
        }
    }

    pub fn create(&self, req: &PatientReq) -> CoreResult<RecordId> {
        let patient = Patient::from_request(req)?;
        let id = self.patients.create(&patient)?;
        tracing::info!(patient = id, "created patient");
        Ok(id)
    }

    pub fn get(&self, id: RecordId) -> CoreResult<Patient> {
        Ok(self.patients.get(id)?)
    }

    pub fn list(&self) -> CoreResult<Vec<Patient>> {
        Ok(self.patients.all()?)
    }

    /// Deletes a patient and their vaccine records.
    pub fn delete(&self, id: RecordId) -> CoreResult<()> {
        self.patients.get(id)?;
        let vaccines = self
            .vaccines
            .delete_where(&Filter::new().eq(PATIENT_FIELD, id))?;
        self.patients.delete(id)?;
        tracing::info!(patient = id, vaccines, "deleted patient");
        Ok(())
    }
}
