use crate::models::{Clinic, ClinicStation, Station};
use crate::store::{EntityKind, Filter, Store, Table};
use crate::{CoreError, CoreResult};
use api_shared::{ClinicStationReq, ClinicStationUpdateReq, RecordId};
use chrono::Utc;
use clinic_types::parse_query_flag;
use std::collections::HashMap;
use std::sync::Arc;

/// Listing filters for clinic stations. Unset fields match anything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClinicStationQuery {
    pub clinic: Option<RecordId>,
    pub active: Option<bool>,
    pub away: Option<bool>,
    pub finished: Option<bool>,
    pub level: Option<u32>,
}

fn flag(params: &HashMap<String, String>, name: &str) -> CoreResult<Option<bool>> {
    params
        .get(name)
        .map(|raw| {
            parse_query_flag(raw).ok_or_else(|| {
                CoreError::InvalidInput(format!("{name}: '{raw}' is not true or false"))
            })
        })
        .transpose()
}

fn number<T: std::str::FromStr>(params: &HashMap<String, String>, name: &str) -> CoreResult<Option<T>> {
    params
        .get(name)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| CoreError::InvalidInput(format!("{name}: '{raw}' is not a number")))
        })
        .transpose()
}

impl ClinicStationQuery {
    /// Parses query-string parameters. Parameters other than `clinic`, `active`,
    /// `away`, `finished` and `level` are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> CoreResult<Self> {
        Ok(Self {
            clinic: number(params, "clinic")?,
            active: flag(params, "active")?,
            away: flag(params, "away")?,
            finished: flag(params, "finished")?,
            level: number(params, "level")?,
        })
    }

    fn filter(&self) -> Filter {
        let mut filter = Filter::new();
        if let Some(clinic) = self.clinic {
            filter = filter.eq("clinic", clinic);
        }
        if let Some(active) = self.active {
            filter = filter.eq("active", active);
        }
        if let Some(away) = self.away {
            filter = filter.eq("away", away);
        }
        if let Some(finished) = self.finished {
            filter = filter.eq("finished", finished);
        }
        if let Some(level) = self.level {
            filter = filter.eq("level", level);
        }
        filter
    }
}

#[derive(Clone, Debug)]
pub struct ClinicStationService {
    clinic_stations: Table<ClinicStation>,
    clinics: Table<Clinic>,
    stations: Table<Station>,
}

impl ClinicStationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            clinic_stations: Table::new(store.clone()),
            clinics: Table::new(store.clone()),
            stations: Table::new(store),
        }
    }

    /// # Errors
    ///
    /// [`CoreError::NotFound`] if the clinic or station does not exist.
    pub fn create(&self, req: &ClinicStationReq) -> CoreResult<RecordId> {
        if !self.clinics.exists(req.clinic)? {
            return Err(CoreError::NotFound {
                kind: EntityKind::Clinic,
                id: req.clinic,
            });
        }
        if !self.stations.exists(req.station)? {
            return Err(CoreError::NotFound {
                kind: EntityKind::Station,
                id: req.station,
            });
        }
        let clinic_station = ClinicStation::from_request(req, Utc::now());
        let id = self.clinic_stations.create(&clinic_station)?;
        tracing::info!(
            clinic_station = id,
            clinic = req.clinic,
            station = req.station,
            "created clinic station"
        );
        Ok(id)
    }

    pub fn get(&self, id: RecordId) -> CoreResult<ClinicStation> {
        Ok(self.clinic_stations.get(id)?)
    }

    /// Lists matching clinic stations.
    ///
    /// # Errors
    ///
    /// [`CoreError::NoMatches`] when nothing matches.
    pub fn list(&self, query: &ClinicStationQuery) -> CoreResult<Vec<ClinicStation>> {
        let matches = self.clinic_stations.filter(&query.filter())?;
        if matches.is_empty() {
            return Err(CoreError::NoMatches(EntityKind::ClinicStation));
        }
        Ok(matches)
    }

    pub fn update(&self, id: RecordId, req: &ClinicStationUpdateReq) -> CoreResult<ClinicStation> {
        let mut clinic_station = self.clinic_stations.get(id)?;
        clinic_station.apply_update(req, Utc::now());
        self.clinic_stations.save(id, &clinic_station)?;
        tracing::debug!(clinic_station = id, "updated clinic station");
        Ok(clinic_station)
    }

    pub fn delete(&self, id: RecordId) -> CoreResult<()> {
        self.clinic_stations.delete(id)?;
        tracing::info!(clinic_station = id, "deleted clinic station");
        Ok(())
    }
}
