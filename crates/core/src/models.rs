//! Clinics, patients, stations and clinic stations.
//!
//! Each model validates its wire request in `from_request` and renders its wire
//! response in `to_wire`. Ids are assigned by the store; a model built from a request
//! carries id 0 until it is created.

use crate::constants::DEFAULT_AWAY_MINUTES;
use crate::store::{Entity, EntityKind};
use crate::{CoreError, CoreResult};
use api_shared::{
    ClinicReq, ClinicRes, ClinicStationReq, ClinicStationRes, ClinicStationUpdateReq, PatientReq,
    PatientRes, RecordId, StationReq, StationRes,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clinic_types::{format_date, parse_date, NonEmptyText};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn required_text(field: &str, value: &str) -> CoreResult<NonEmptyText> {
    NonEmptyText::new(value).map_err(|e| CoreError::InvalidInput(format!("{field}: {e}")))
}

fn date(field: &str, value: &str) -> CoreResult<NaiveDate> {
    parse_date(value).map_err(|e| CoreError::InvalidInput(format!("{field}: {e}")))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    pub id: RecordId,
    pub location: NonEmptyText,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Entity for Clinic {
    const KIND: EntityKind = EntityKind::Clinic;
}

impl Clinic {
    /// # Errors
    ///
    /// [`CoreError::InvalidInput`] for an empty location, an unparseable date, or an
    /// end date before the start date.
    pub fn from_request(req: &ClinicReq) -> CoreResult<Self> {
        let location = required_text("location", &req.location)?;
        let start = date("start", &req.start)?;
        let end = date("end", &req.end)?;
        if end < start {
            return Err(CoreError::InvalidInput(format!(
                "end: {} is before start {}",
                format_date(end),
                format_date(start)
            )));
        }
        Ok(Self {
            id: 0,
            location,
            start,
            end,
        })
    }

    pub fn to_wire(&self) -> ClinicRes {
        ClinicRes {
            id: self.id,
            location: self.location.as_str().to_owned(),
            start: format_date(self.start),
            end: format_date(self.end),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(CoreError::InvalidInput(format!(
                "gender: '{other}' is not Male or Female"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: RecordId,
    pub paternal_last: NonEmptyText,
    pub maternal_last: String,
    pub first: NonEmptyText,
    pub middle: String,
    pub dob: NaiveDate,
    pub gender: Gender,
}

impl Entity for Patient {
    const KIND: EntityKind = EntityKind::Patient;
}

impl Patient {
    pub fn from_request(req: &PatientReq) -> CoreResult<Self> {
        Ok(Self {
            id: 0,
            paternal_last: required_text("paternal_last", &req.paternal_last)?,
            maternal_last: req.maternal_last.trim().to_owned(),
            first: required_text("first", &req.first)?,
            middle: req.middle.trim().to_owned(),
            dob: date("dob", &req.dob)?,
            gender: req.gender.parse()?,
        })
    }

    pub fn to_wire(&self) -> PatientRes {
        PatientRes {
            id: self.id,
            paternal_last: self.paternal_last.as_str().to_owned(),
            maternal_last: self.maternal_last.clone(),
            first: self.first.as_str().to_owned(),
            middle: self.middle.clone(),
            dob: format_date(self.dob),
            gender: self.gender.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: RecordId,
    pub name: NonEmptyText,
}

impl Entity for Station {
    const KIND: EntityKind = EntityKind::Station;
}

impl Station {
    pub fn from_request(req: &StationReq) -> CoreResult<Self> {
        Ok(Self {
            id: 0,
            name: required_text("name", &req.name)?,
        })
    }

    pub fn to_wire(&self) -> StationRes {
        StationRes {
            id: self.id,
            name: self.name.as_str().to_owned(),
        }
    }
}

/// A station staffed during a clinic.
///
/// While `away`, the station is expected back at `willreturn`, which is recomputed
/// from `awaytime` every time the station is marked away.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicStation {
    pub id: RecordId,
    pub clinic: RecordId,
    pub station: RecordId,
    pub name: String,
    pub active: bool,
    pub away: bool,
    pub awaytime: u32,
    pub willreturn: DateTime<Utc>,
    pub level: u32,
    pub finished: bool,
}

impl Entity for ClinicStation {
    const KIND: EntityKind = EntityKind::ClinicStation;
}

fn return_time(now: DateTime<Utc>, away_minutes: u32) -> DateTime<Utc> {
    now + Duration::minutes(i64::from(away_minutes))
}

impl ClinicStation {
    /// Builds a clinic station from a request, applying defaults. The clinic and
    /// station references are not checked here.
    pub fn from_request(req: &ClinicStationReq, now: DateTime<Utc>) -> Self {
        let away = req.away.unwrap_or(true);
        let awaytime = req.awaytime.unwrap_or(DEFAULT_AWAY_MINUTES);
        Self {
            id: 0,
            clinic: req.clinic,
            station: req.station,
            name: req.name.clone().unwrap_or_default(),
            active: req.active.unwrap_or(false),
            away,
            awaytime,
            willreturn: if away { return_time(now, awaytime) } else { now },
            level: req.level.unwrap_or(0),
            finished: false,
        }
    }

    /// Applies a partial update. A new `awaytime` takes effect before `away` is set.
    pub fn apply_update(&mut self, req: &ClinicStationUpdateReq, now: DateTime<Utc>) {
        if let Some(awaytime) = req.awaytime {
            self.awaytime = awaytime;
        }
        if let Some(active) = req.active {
            self.active = active;
        }
        if let Some(away) = req.away {
            self.away = away;
            if away {
                self.willreturn = return_time(now, self.awaytime);
            }
        }
        if let Some(finished) = req.finished {
            self.finished = finished;
        }
        if let Some(level) = req.level {
            self.level = level;
        }
        if let Some(name) = &req.name {
            self.name = name.clone();
        }
    }

    pub fn to_wire(&self) -> ClinicStationRes {
        ClinicStationRes {
            id: self.id,
            clinic: self.clinic,
            station: self.station,
            name: self.name.clone(),
            active: self.active,
            away: self.away,
            awaytime: self.awaytime,
            willreturn: self.willreturn.to_rfc3339(),
            level: self.level,
            finished: self.finished,
        }
    }
}
