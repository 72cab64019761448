use crate::models::{ClinicStation, Station};
use crate::store::{Filter, Store, Table};
use crate::CoreResult;
use api_shared::{RecordId, StationReq};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct StationService {
    stations: Table<Station>,
    clinic_stations: Table<ClinicStation>,
}

impl StationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            stations: Table::new(store.clone()),
            clinic_stations: Table::new(store),
        }
    }

    pub fn create(&self, req: &StationReq) -> CoreResult<RecordId> {
        let station = Station::from_request(req)?;
        let id = self.stations.create(&station)?;
        tracing::info!(station = id, name = %station.name, "created station");
        Ok(id)
    }

    pub fn get(&self, id: RecordId) -> CoreResult<Station> {
        Ok(self.stations.get(id)?)
    }

    pub fn list(&self) -> CoreResult<Vec<Station>> {
        Ok(self.stations.all()?)
    }

    /// Deletes a station and every clinic station staffing it.
    pub fn delete(&self, id: RecordId) -> CoreResult<()> {
        self.stations.get(id)?;
        let clinic_stations = self
            .clinic_stations
            .delete_where(&Filter::new().eq("station", id))?;
        self.stations.delete(id)?;
        tracing::info!(station = id, clinic_stations, "deleted station");
        Ok(())
    }
}
