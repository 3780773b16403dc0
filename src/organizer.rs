//! Column Organizer: addresses signal series by
//! (satellite, station, metric) without re-parsing column names.
use std::collections::BTreeMap;

use crate::{
    column::{ColumnName, Metric},
    satellite::SatelliteToken,
    station::Station,
};

/// [ColumnIndex] groups signal column names per satellite,
/// then per station, then per metric. Several columns may share
/// the same triplet: they are kept in encounter order.
/// Satellites are keyed by their exact token, `LEO01` is not `LEO1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnIndex {
    inner: BTreeMap<SatelliteToken, BTreeMap<Station, BTreeMap<Metric, Vec<String>>>>,
}

impl ColumnIndex {
    /// Inserts a column name, returns false if it does not
    /// follow the signal naming convention.
    pub fn insert(&mut self, name: &str) -> bool {
        match ColumnName::parse(name) {
            ColumnName::Matched {
                satellite,
                station,
                metric,
            } => {
                self.inner
                    .entry(satellite)
                    .or_default()
                    .entry(station)
                    .or_default()
                    .entry(metric)
                    .or_default()
                    .push(name.to_string());
                true
            },
            ColumnName::Unmatched(_) => false,
        }
    }
    /// True if no signal column was indexed
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
    /// Indexed satellites, in ascending order
    pub fn satellites(&self) -> impl Iterator<Item = &SatelliteToken> + '_ {
        self.inner.keys()
    }
    /// Stations observed for given satellite
    pub fn stations(&self, satellite: &SatelliteToken) -> impl Iterator<Item = &Station> + '_ {
        self.inner
            .get(satellite)
            .into_iter()
            .flat_map(|stations| stations.keys())
    }
    /// Metrics observed for given satellite and station
    pub fn metrics(
        &self,
        satellite: &SatelliteToken,
        station: &Station,
    ) -> impl Iterator<Item = &Metric> + '_ {
        self.inner
            .get(satellite)
            .and_then(|stations| stations.get(station))
            .into_iter()
            .flat_map(|metrics| metrics.keys())
    }
    /// Column names for this (satellite, station, metric) triplet.
    /// Empty when no such column exists.
    pub fn get(&self, satellite: &SatelliteToken, station: &Station, metric: &Metric) -> &[String] {
        self.inner
            .get(satellite)
            .and_then(|stations| stations.get(station))
            .and_then(|metrics| metrics.get(metric))
            .map(|names| names.as_slice())
            .unwrap_or(&[])
    }
    /// Iterates ((satellite, station, metric), column names)
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = ((&SatelliteToken, &Station, &Metric), &[String])> + '_ {
        self.inner.iter().flat_map(|(sat, stations)| {
            stations.iter().flat_map(move |(station, metrics)| {
                metrics
                    .iter()
                    .map(move |(metric, names)| ((sat, station, metric), names.as_slice()))
            })
        })
    }
}

/// Organizes column names into a [ColumnIndex].
/// Names that do not follow the signal convention are ignored.
pub fn organize<I, S>(names: I) -> ColumnIndex
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut index = ColumnIndex::default();
    for name in names {
        index.insert(name.as_ref());
    }
    index
}
