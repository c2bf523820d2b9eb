// src/schema/types.rs

use crate::process::{Record, Value};
use serde::Serialize;

/// Build a typed row out of a parsed CSV record. Identity columns that are
/// missing from the file read as `Value::Null`.
pub trait FromRecord: Sized {
    fn from_record(record: Record) -> Self;
}

/// Lookup key shared by races and standings: `"{season}-{round}"`.
pub fn race_key(season: &Value, round: &Value) -> String {
    format!("{}-{}", season, round)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Driver {
    #[serde(skip)]
    pub driver_id: Value,
    #[serde(skip)]
    pub given_name: Value,
    #[serde(skip)]
    pub family_name: Value,
    /// Every column of the source row, identity columns included.
    #[serde(flatten)]
    pub fields: Record,
}

impl Driver {
    /// `"{givenName} {familyName}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

impl FromRecord for Driver {
    fn from_record(record: Record) -> Self {
        Self {
            driver_id: record.value("driverId").clone(),
            given_name: record.value("givenName").clone(),
            family_name: record.value("familyName").clone(),
            fields: record,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constructor {
    #[serde(skip)]
    pub constructor_id: Value,
    #[serde(skip)]
    pub name: Value,
    #[serde(flatten)]
    pub fields: Record,
}

impl FromRecord for Constructor {
    fn from_record(record: Record) -> Self {
        Self {
            constructor_id: record.value("constructorId").clone(),
            name: record.value("name").clone(),
            fields: record,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Race {
    #[serde(skip)]
    pub season: Value,
    #[serde(skip)]
    pub round: Value,
    #[serde(skip)]
    pub race_name: Value,
    #[serde(skip)]
    pub date: Value,
    #[serde(flatten)]
    pub fields: Record,
}

impl Race {
    pub fn key(&self) -> String {
        race_key(&self.season, &self.round)
    }
}

impl FromRecord for Race {
    fn from_record(record: Record) -> Self {
        Self {
            season: record.value("season").clone(),
            round: record.value("round").clone(),
            race_name: record.value("raceName").clone(),
            date: record.value("date").clone(),
            fields: record,
        }
    }
}

/// A driver's position and points after a given round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverStanding {
    #[serde(skip)]
    pub season: Value,
    #[serde(skip)]
    pub round: Value,
    #[serde(skip)]
    pub driver_id: Value,
    #[serde(skip)]
    pub position: Value,
    #[serde(skip)]
    pub points: Value,
    #[serde(flatten)]
    pub fields: Record,
    /// Driver display name; `None` until resolved, or when the id is unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
}

impl DriverStanding {
    pub fn race_key(&self) -> String {
        race_key(&self.season, &self.round)
    }

    /// Consume this standing and return it with its display name attached.
    pub fn with_driver(self, driver: Option<String>) -> Self {
        Self { driver, ..self }
    }
}

impl FromRecord for DriverStanding {
    fn from_record(record: Record) -> Self {
        Self {
            season: record.value("season").clone(),
            round: record.value("round").clone(),
            driver_id: record.value("driverId").clone(),
            position: record.value("position").clone(),
            points: record.value("points").clone(),
            fields: record,
            driver: None,
        }
    }
}

/// A constructor's position and points after a given round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructorStanding {
    #[serde(skip)]
    pub season: Value,
    #[serde(skip)]
    pub round: Value,
    #[serde(skip)]
    pub constructor_id: Value,
    #[serde(skip)]
    pub position: Value,
    #[serde(skip)]
    pub points: Value,
    #[serde(flatten)]
    pub fields: Record,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructor: Option<String>,
}

impl ConstructorStanding {
    pub fn race_key(&self) -> String {
        race_key(&self.season, &self.round)
    }

    pub fn with_constructor(self, constructor: Option<String>) -> Self {
        Self {
            constructor,
            ..self
        }
    }
}

impl FromRecord for ConstructorStanding {
    fn from_record(record: Record) -> Self {
        Self {
            season: record.value("season").clone(),
            round: record.value("round").clone(),
            constructor_id: record.value("constructorId").clone(),
            position: record.value("position").clone(),
            points: record.value("points").clone(),
            fields: record,
            constructor: None,
        }
    }
}
