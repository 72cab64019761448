//! # Clinic Core
//!
//! Core business logic for the clinic records service:
//! - the vaccine record schema, its payload validator and list queries
//! - clinics, patients, stations and clinic stations
//! - the persistence gateway ([`store`]) with memory and JSON-file backends
//! - one service per resource ([`services`])
//!
//! **No API concerns**: HTTP routing, authentication and response shaping belong in
//! `api-rest` and `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod query;
pub mod services;
pub mod store;
pub mod vaccine;
pub mod validation;

pub use config::{storage_from_env_value, CoreConfig, StorageConfig};
pub use error::{CoreError, CoreResult};
pub use models::{Clinic, ClinicStation, Gender, Patient, Station};
pub use query::{QueryError, VaccineLookup, VaccineQuery};
pub use services::{
    ClinicService, ClinicStationQuery, ClinicStationService, PatientService, RecordServices,
    StationService, VaccineService,
};
pub use store::{EntityKind, FileStore, Filter, MemoryStore, Store, StoreError};
pub use vaccine::{Covid19Doses, Vaccine, VaccineRecord};
pub use validation::{validate_for_create, validate_for_update, FieldIssue, ValidationError};
