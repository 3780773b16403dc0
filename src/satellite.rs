//! LEO satellite identification
use crate::constants::SATELLITE_PREFIX;
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{column::Metric, station::Station};

/// [SatelliteId] identifies one simulated LEO satellite, `LEO<N>`.
/// Ordering follows the numerical index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatelliteId(pub u32);

/// [SatelliteId] parsing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    #[error("missing LEO prefix")]
    MissingPrefix,
    #[error("invalid satellite index")]
    InvalidIndex(#[from] std::num::ParseIntError),
}

impl SatelliteId {
    /// Builds a new [SatelliteId]
    pub fn new(index: u32) -> Self {
        Self(index)
    }
    /// Returns satellite numerical index
    pub fn index(&self) -> u32 {
        self.0
    }
    /// Forms the signal column name for this satellite,
    /// `LEO<N>_<Station>_<Metric>`.
    pub fn column(&self, station: &Station, metric: &Metric) -> String {
        format!("{}_{}_{}", self, station, metric)
    }
    /// Forms a static descriptor column name, `LEO<N>_<descriptor>`.
    pub fn descriptor_column(&self, descriptor: &str) -> String {
        format!("{}_{}", self, descriptor)
    }
}

impl Display for SatelliteId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}{}", SATELLITE_PREFIX, self.0)
    }
}

impl FromStr for SatelliteId {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index = s
            .trim()
            .strip_prefix(SATELLITE_PREFIX)
            .ok_or(ParsingError::MissingPrefix)?;
        Ok(Self(index.parse::<u32>()?))
    }
}

/// [SatelliteToken] is the satellite part of a column name, `LEO<digits>`.
/// Only canonical indices (no leading zero, within `u32`) identify a
/// [SatelliteId]: `LEO01` and `LEO1` are distinct satellites.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SatelliteToken {
    /// Canonical index
    Id(SatelliteId),
    /// Digits that do not form a canonical index
    Irregular(String),
}

impl SatelliteToken {
    /// Builds a [SatelliteToken] from the digits following `LEO`
    pub fn from_digits(digits: &str) -> Self {
        let canonical = digits == "0" || !digits.starts_with('0');
        match digits.parse::<u32>() {
            Ok(index) if canonical => Self::Id(SatelliteId(index)),
            _ => Self::Irregular(digits.to_string()),
        }
    }
    /// Returns [SatelliteId], if canonical
    pub fn id(&self) -> Option<SatelliteId> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Irregular(_) => None,
        }
    }
}

impl From<SatelliteId> for SatelliteToken {
    fn from(id: SatelliteId) -> Self {
        Self::Id(id)
    }
}

impl Display for SatelliteToken {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Irregular(digits) => write!(f, "{}{}", SATELLITE_PREFIX, digits),
        }
    }
}
