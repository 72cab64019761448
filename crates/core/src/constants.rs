//! Constants used throughout the clinic core crate.

/// File extension of stored record documents.
pub const RECORD_EXTENSION: &str = "json";

/// Extension of in-flight writes before they are renamed into place.
pub const TEMP_EXTENSION: &str = "tmp";

/// Per-kind file holding the highest id ever assigned.
pub const LAST_ID_FILENAME: &str = "last_id";

/// Minutes a clinic station stays away when no away time was given.
pub const DEFAULT_AWAY_MINUTES: u32 = 30;

/// Vaccine payload key holding the patient id.
pub const PATIENT_FIELD: &str = "patient";

/// Vaccine payload key holding the clinic id.
pub const CLINIC_FIELD: &str = "clinic";

/// Vaccine payload key holding the number of COVID-19 doses.
pub const COVID19_DOSES_FIELD: &str = "covid19_doses";

/// Suffix joining a vaccine name to its administration date field.
pub const DATE_FIELD_SUFFIX: &str = "_date";
