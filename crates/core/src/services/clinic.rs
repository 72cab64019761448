use crate::constants::CLINIC_FIELD;
use crate::models::{Clinic, ClinicStation};
use crate::store::{Filter, Store, Table};
use crate::vaccine::VaccineRecord;
use crate::CoreResult;
use api_shared::{ClinicReq, RecordId};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct ClinicService {
    clinics: Table<Clinic>,
    clinic_stations: Table<ClinicStation>,
    vaccines: Table<VaccineRecord>,
}

impl ClinicService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            clinics: Table::new(store.clone()),
            clinic_stations: Table::new(store.clone()),
            vaccines: Table::new(store),
        }
    }

    pub fn create(&self, req: &ClinicReq) -> CoreResult<RecordId> {
        let clinic = Clinic::from_request(req)?;
        let id = self.clinics.create(&clinic)?;
        tracing::info!(clinic = id, location = %clinic.location, "created clinic");
        Ok(id)
    }

    pub fn get(&self, id: RecordId) -> CoreResult<Clinic> {
        Ok(self.clinics.get(id)?)
    }

    pub fn list(&self) -> CoreResult<Vec<Clinic>> {
        Ok(self.clinics.all()?)
    }

    /// Deletes a clinic along with its clinic stations and vaccine records.
    pub fn delete(&self, id: RecordId) -> CoreResult<()> {
        self.clinics.get(id)?;
        let by_clinic = Filter::new().eq(CLINIC_FIELD, id);
        let vaccines = self.vaccines.delete_where(&by_clinic)?;
        let stations = self.clinic_stations.delete_where(&by_clinic)?;
        self.clinics.delete(id)?;
        tracing::info!(clinic = id, vaccines, clinic_stations = stations, "deleted clinic");
        Ok(())
    }
}
