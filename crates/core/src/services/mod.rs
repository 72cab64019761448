//! Record services.
//!
//! One service per resource, each a thin layer of validation and lookups over the
//! [`Store`] contract. Services are synchronous and cheap to clone; the REST layer
//! holds a [`RecordServices`] in its state.

mod clinic;
mod clinic_station;
mod patient;
mod station;
mod vaccine;

pub use clinic::ClinicService;
pub use clinic_station::{ClinicStationQuery, ClinicStationService};
pub use patient::PatientService;
pub use station::StationService;
pub use vaccine::VaccineService;

use crate::config::CoreConfig;
use crate::store::Store;
use crate::CoreResult;
use std::sync::Arc;

/// Every service, sharing one store.
#[derive(Clone, Debug)]
pub struct RecordServices {
    pub clinics: ClinicService,
    pub patients: PatientService,
    pub stations: StationService,
    pub clinic_stations: ClinicStationService,
    pub vaccines: VaccineService,
}

impl RecordServices {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            clinics: ClinicService::new(store.clone()),
            patients: PatientService::new(store.clone()),
            stations: StationService::new(store.clone()),
            clinic_stations: ClinicStationService::new(store.clone()),
            vaccines: VaccineService::new(store),
        }
    }

    /// Opens the configured store and builds the services over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened.
    pub fn from_config(cfg: &CoreConfig) -> CoreResult<Self> {
        Ok(Self::new(cfg.open_store()?))
    }
}
