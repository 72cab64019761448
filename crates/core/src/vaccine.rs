//! Vaccine record schema.
//!
//! A record holds, for each of the 25 tracked vaccines, whether it was administered
//! and on what date, plus the number of COVID-19 doses. The [`Vaccine`] enum is the
//! field table: every payload key the validator accepts is derived from it.
//!
//! Rows are stored with administrations keyed by vaccine name, e.g.
//!
//! ```text
//! { "id": 4, "patient": 2, "clinic": 1, "time": "...", "covid19_doses": 1,
//!   "administrations": { "covid19": { "administered": true, "date": "2021-03-02" }, ... } }
//! ```

use crate::constants::{CLINIC_FIELD, COVID19_DOSES_FIELD, PATIENT_FIELD};
use crate::store::{Entity, EntityKind};
use api_shared::{RecordId, VaccineRes};
use chrono::{DateTime, NaiveDate, Utc};
use clinic_types::{bool_token, format_date};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of vaccines tracked per record.
pub const VACCINE_COUNT: usize = 25;

/// The tracked vaccines, in payload order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Vaccine {
    Covid19,
    Covid19Booster,
    Dtap,
    Dt,
    Hib,
    Hepa,
    Hepb,
    Hpv,
    Iiv,
    Laiv4,
    Mmr,
    Menacwy,
    Menb,
    Pcv13,
    Ppsv23,
    Ipv,
    Rv,
    Tap,
    Td,
    Var,
    DtapHepbIpv,
    DtapIpvHib,
    DtapIpv,
    DtapIpvHibHepb,
    Mmvr,
}

impl Vaccine {
    pub const ALL: [Vaccine; VACCINE_COUNT] = [
        Vaccine::Covid19,
        Vaccine::Covid19Booster,
        Vaccine::Dtap,
        Vaccine::Dt,
        Vaccine::Hib,
        Vaccine::Hepa,
        Vaccine::Hepb,
        Vaccine::Hpv,
        Vaccine::Iiv,
        Vaccine::Laiv4,
        Vaccine::Mmr,
        Vaccine::Menacwy,
        Vaccine::Menb,
        Vaccine::Pcv13,
        Vaccine::Ppsv23,
        Vaccine::Ipv,
        Vaccine::Rv,
        Vaccine::Tap,
        Vaccine::Td,
        Vaccine::Var,
        Vaccine::DtapHepbIpv,
        Vaccine::DtapIpvHib,
        Vaccine::DtapIpv,
        Vaccine::DtapIpvHibHepb,
        Vaccine::Mmvr,
    ];

    /// Payload key of the administered flag.
    pub const fn name(self) -> &'static str {
        match self {
            Vaccine::Covid19 => "covid19",
            Vaccine::Covid19Booster => "covid19_booster",
            Vaccine::Dtap => "dtap",
            Vaccine::Dt => "dt",
            Vaccine::Hib => "hib",
            Vaccine::Hepa => "hepa",
            Vaccine::Hepb => "hepb",
            Vaccine::Hpv => "hpv",
            Vaccine::Iiv => "iiv",
            Vaccine::Laiv4 => "laiv4",
            Vaccine::Mmr => "mmr",
            Vaccine::Menacwy => "menacwy",
            Vaccine::Menb => "menb",
            Vaccine::Pcv13 => "pcv13",
            Vaccine::Ppsv23 => "ppsv23",
            Vaccine::Ipv => "ipv",
            Vaccine::Rv => "rv",
            Vaccine::Tap => "tap",
            Vaccine::Td => "td",
            Vaccine::Var => "var",
            Vaccine::DtapHepbIpv => "dtap_hepb_ipv",
            Vaccine::DtapIpvHib => "dtap_ipv_hib",
            Vaccine::DtapIpv => "dtap_ipv",
            Vaccine::DtapIpvHibHepb => "dtap_ipv_hib_hepb",
            Vaccine::Mmvr => "mmvr",
        }
    }

    /// Payload key of the administration date, `<name>_date`.
    pub const fn date_field(self) -> &'static str {
        match self {
            Vaccine::Covid19 => "covid19_date",
            Vaccine::Covid19Booster => "covid19_booster_date",
            Vaccine::Dtap => "dtap_date",
            Vaccine::Dt => "dt_date",
            Vaccine::Hib => "hib_date",
            Vaccine::Hepa => "hepa_date",
            Vaccine::Hepb => "hepb_date",
            Vaccine::Hpv => "hpv_date",
            Vaccine::Iiv => "iiv_date",
            Vaccine::Laiv4 => "laiv4_date",
            Vaccine::Mmr => "mmr_date",
            Vaccine::Menacwy => "menacwy_date",
            Vaccine::Menb => "menb_date",
            Vaccine::Pcv13 => "pcv13_date",
            Vaccine::Ppsv23 => "ppsv23_date",
            Vaccine::Ipv => "ipv_date",
            Vaccine::Rv => "rv_date",
            Vaccine::Tap => "tap_date",
            Vaccine::Td => "td_date",
            Vaccine::Var => "var_date",
            Vaccine::DtapHepbIpv => "dtap_hepb_ipv_date",
            Vaccine::DtapIpvHib => "dtap_ipv_hib_date",
            Vaccine::DtapIpv => "dtap_ipv_date",
            Vaccine::DtapIpvHibHepb => "dtap_ipv_hib_hepb_date",
            Vaccine::Mmvr => "mmvr_date",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    pub fn from_date_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.date_field() == field)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// What a payload key refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Administered(Vaccine),
    Date(Vaccine),
    Covid19Doses,
    Patient,
    Clinic,
}

impl FieldKind {
    /// Classifies a payload key; `None` for keys outside the whitelist.
    pub fn classify(key: &str) -> Option<Self> {
        match key {
            COVID19_DOSES_FIELD => Some(FieldKind::Covid19Doses),
            PATIENT_FIELD => Some(FieldKind::Patient),
            CLINIC_FIELD => Some(FieldKind::Clinic),
            _ => Vaccine::from_name(key)
                .map(FieldKind::Administered)
                .or_else(|| Vaccine::from_date_field(key).map(FieldKind::Date)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} is not an allowed number of COVID-19 doses (0, 1 or 2)")]
pub struct DosesError(pub i64);

/// COVID-19 doses received, restricted to the enumerated values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Covid19Doses {
    Zero,
    One,
    Two,
}

impl Covid19Doses {
    pub const ALLOWED: [i64; 3] = [0, 1, 2];
}

impl TryFrom<i64> for Covid19Doses {
    type Error = DosesError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Covid19Doses::Zero),
            1 => Ok(Covid19Doses::One),
            2 => Ok(Covid19Doses::Two),
            other => Err(DosesError(other)),
        }
    }
}

impl From<Covid19Doses> for i64 {
    fn from(doses: Covid19Doses) -> Self {
        match doses {
            Covid19Doses::Zero => 0,
            Covid19Doses::One => 1,
            Covid19Doses::Two => 2,
        }
    }
}

/// One vaccine's administered flag and date.
///
/// The date defaults to 1970-01-01 when nothing meaningful was recorded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Administration {
    pub administered: bool,
    pub date: NaiveDate,
}

/// A validated create payload, not yet persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewVaccineRecord {
    pub patient: RecordId,
    pub clinic: RecordId,
    pub covid19_doses: Covid19Doses,
    pub administrations: [Administration; VACCINE_COUNT],
}

impl NewVaccineRecord {
    pub fn into_record(self, time: DateTime<Utc>) -> VaccineRecord {
        VaccineRecord {
            id: 0,
            patient: self.patient,
            clinic: self.clinic,
            time,
            covid19_doses: self.covid19_doses,
            administrations: self.administrations,
        }
    }
}

/// One persisted vaccine visit for a patient at a clinic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccineRecord {
    pub id: RecordId,
    pub patient: RecordId,
    pub clinic: RecordId,
    pub time: DateTime<Utc>,
    pub covid19_doses: Covid19Doses,
    #[serde(with = "by_name")]
    administrations: [Administration; VACCINE_COUNT],
}

impl Entity for VaccineRecord {
    const KIND: EntityKind = EntityKind::Vaccine;
}

impl VaccineRecord {
    pub fn administration(&self, vaccine: Vaccine) -> Administration {
        self.administrations[vaccine.index()]
    }

    pub fn set_administered(&mut self, vaccine: Vaccine, administered: bool) {
        self.administrations[vaccine.index()].administered = administered;
    }

    pub fn set_date(&mut self, vaccine: Vaccine, date: NaiveDate) {
        self.administrations[vaccine.index()].date = date;
    }

    /// Flat JSON form returned to clients.
    pub fn to_wire(&self) -> VaccineRes {
        let mut m = VaccineRes::new();
        m.insert("id".into(), Value::from(self.id));
        m.insert(CLINIC_FIELD.into(), Value::from(self.clinic));
        m.insert(PATIENT_FIELD.into(), Value::from(self.patient));
        m.insert("time".into(), Value::from(self.time.to_rfc3339()));
        m.insert(
            COVID19_DOSES_FIELD.into(),
            Value::from(i64::from(self.covid19_doses)),
        );
        for vaccine in Vaccine::ALL {
            let administration = self.administration(vaccine);
            m.insert(
                vaccine.name().into(),
                Value::from(bool_token(administration.administered)),
            );
            m.insert(
                vaccine.date_field().into(),
                Value::from(format_date(administration.date)),
            );
        }
        m
    }
}

/// Stores the administration array as a map keyed by vaccine name so that the row
/// layout does not depend on enum order. Loading requires all 25 entries.
mod by_name {
    use super::{Administration, Vaccine, VACCINE_COUNT};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S>(
        administrations: &[Administration; VACCINE_COUNT],
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let map: BTreeMap<&str, &Administration> = Vaccine::ALL
            .iter()
            .map(|v| (v.name(), &administrations[v.index()]))
            .collect();
        map.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[Administration; VACCINE_COUNT], D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = BTreeMap::<String, Administration>::deserialize(deserializer)?;
        let mut out = [Administration::default(); VACCINE_COUNT];
        for vaccine in Vaccine::ALL {
            out[vaccine.index()] = map
                .remove(vaccine.name())
                .ok_or_else(|| D::Error::custom(format!("missing vaccine '{}'", vaccine.name())))?;
        }
        if let Some(extra) = map.keys().next() {
            return Err(D::Error::custom(format!("unknown vaccine '{extra}'")));
        }
        Ok(out)
    }
}
