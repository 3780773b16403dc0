//! Connectivity filter.
//!
//! Removes degenerate columns, identifies the satellites that
//! reached both monitored stations at least once during the observation
//! window (qualified satellites), and prunes all other satellite columns.
//! Qualification is evaluated once, over the whole table.
use itertools::Itertools;

#[cfg(feature = "log")]
use log::{debug, info};

use crate::{
    column::{satellite_prefix, Metric},
    constants::STATIC_DESCRIPTORS,
    satellite::SatelliteId,
    station::Station,
    table::TelemetryTable,
};

/// [FilterReport] summarizes one filtering pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterReport {
    /// Columns that were null (or missing) at all times
    pub degenerate: Vec<String>,
    /// Highest satellite index found in column names
    pub max_satellite: Option<u32>,
    /// Qualified satellites, in ascending order
    pub qualified: Vec<SatelliteId>,
    /// Static descriptors dropped for unqualified satellites
    pub descriptors: Vec<String>,
    /// Signal columns dropped for unqualified satellites
    pub pruned: Vec<String>,
}

impl FilterReport {
    /// True if given satellite qualified
    pub fn is_qualified(&self, satellite: SatelliteId) -> bool {
        self.qualified.binary_search(&satellite).is_ok()
    }
}

/// [ConnectivityFilter] runs the complete filtering pass
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectivityFilter {}

impl ConnectivityFilter {
    /// Filters given [TelemetryTable] in place
    pub fn apply(&self, table: &mut TelemetryTable) -> FilterReport {
        let degenerate = drop_degenerate_columns(table);
        let satellites = satellite_ids(table);
        let max_satellite = satellites.last().map(|sat| sat.index());

        #[cfg(feature = "log")]
        debug!("max satellite index: {:?}", max_satellite);

        let (qualified, descriptors) = qualify(table, &satellites);

        #[cfg(feature = "log")]
        info!(
            "{} qualified satellites: {}",
            qualified.len(),
            qualified.iter().join(", ")
        );

        let pruned = prune(table, &qualified);

        #[cfg(feature = "log")]
        debug!("remaining columns: {}", table.column_names().join(", "));

        FilterReport {
            degenerate,
            max_satellite,
            qualified,
            descriptors,
            pruned,
        }
    }
}

/// Drops every column that is either null or missing at all times.
/// Returns the dropped column names.
pub fn drop_degenerate_columns(table: &mut TelemetryTable) -> Vec<String> {
    let degenerate = table
        .columns()
        .filter(|column| column.cells.iter().all(|cell| cell.is_zero_or_missing()))
        .map(|column| column.name.clone())
        .collect::<Vec<_>>();
    table.drop_columns(&degenerate);
    degenerate
}

/// Returns the canonical satellite indices found in column names,
/// in ascending order. Indices of the [0, max] universe that never
/// appear can neither qualify nor own a descriptor, so they are skipped.
pub fn satellite_ids(table: &TelemetryTable) -> Vec<SatelliteId> {
    table
        .column_names()
        .filter_map(satellite_prefix)
        .filter_map(|token| token.id())
        .sorted()
        .dedup()
        .collect()
}

/// Returns the highest satellite index found in column names.
/// The satellite universe is every index in [0, max], gaps included.
pub fn max_satellite_index(table: &TelemetryTable) -> Option<u32> {
    satellite_ids(table).last().map(|sat| sat.index())
}

/// True if this satellite's access flags for this station exist,
/// and are raised at least once (missing being false).
pub fn has_access(table: &TelemetryTable, satellite: SatelliteId, station: &Station) -> bool {
    table
        .column(&satellite.column(station, &Metric::Access))
        .map(|column| column.cells.iter().any(|cell| cell.is_truthy()))
        .unwrap_or(false)
}

/// True if this satellite reached all monitored stations at least once
pub fn is_qualified(table: &TelemetryTable, satellite: SatelliteId) -> bool {
    Station::MONITORED
        .iter()
        .all(|station| has_access(table, satellite, station))
}

/// Qualifies given satellites, which must be sorted.
/// Static descriptors of unqualified satellites are dropped.
/// Returns (qualified satellites, dropped descriptors).
pub fn qualify(
    table: &mut TelemetryTable,
    satellites: &[SatelliteId],
) -> (Vec<SatelliteId>, Vec<String>) {
    let mut qualified = Vec::new();
    let mut descriptors = Vec::new();
    for satellite in satellites.iter().copied() {
        if is_qualified(table, satellite) {
            qualified.push(satellite);
        } else {
            let dropped = STATIC_DESCRIPTORS
                .iter()
                .map(|desc| satellite.descriptor_column(desc))
                .filter(|name| table.contains(name))
                .collect::<Vec<_>>();
            table.drop_columns(&dropped);
            descriptors.extend(dropped);
        }
    }
    (qualified, descriptors)
}

/// Drops every remaining satellite column whose satellite did not qualify,
/// including irregular tokens (like `LEO01`) that never qualify.
/// `qualified` must be sorted. Returns the dropped column names.
pub fn prune(table: &mut TelemetryTable, qualified: &[SatelliteId]) -> Vec<String> {
    let pruned = table
        .column_names()
        .filter(|name| match satellite_prefix(name).map(|token| token.id()) {
            Some(Some(satellite)) => qualified.binary_search(&satellite).is_err(),
            Some(None) => true,
            None => false,
        })
        .map(|name| name.to_string())
        .collect::<Vec<_>>();
    table.drop_columns(&pruned);
    pruned
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{cell::Cell, table::Column};

    fn flags(name: &str, values: &[Option<bool>]) -> Column {
        Column::new(
            name,
            values
                .iter()
                .map(|v| match v {
                    Some(b) => Cell::Bool(*b),
                    None => Cell::Missing,
                })
                .collect(),
        )
    }

    #[test]
    fn degenerate_columns() {
        let mut table = TelemetryTable::from_columns(vec![
            Column::from_values("Time", &[0.0, 1.0]),
            Column::from_values("zeros", &[0.0, 0.0]),
            Column::from_values("nans", &[f64::NAN, f64::NAN]),
            Column::from_values("mixed", &[0.0, f64::NAN]),
            Column::from_values("sparse", &[f64::NAN, 3.0]),
            flags("never", &[Some(false), None]),
            flags("once", &[Some(false), Some(true)]),
        ])
        .unwrap();
        let dropped = drop_degenerate_columns(&mut table);
        assert_eq!(dropped, vec!["zeros", "nans", "mixed", "never"]);
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["Time", "sparse", "once"]
        );
    }

    #[test]
    fn satellite_universe() {
        let table = TelemetryTable::from_columns(vec![
            Column::from_values("Time", &[0.0]),
            Column::from_values("LEO3_Lat", &[1.0]),
            Column::from_values("LEO12_Sydney_SNR_dB", &[1.0]),
        ])
        .unwrap();
        assert_eq!(max_satellite_index(&table), Some(12));
        let table = TelemetryTable::from_columns(vec![Column::from_values("Time", &[0.0])])
            .unwrap();
        assert_eq!(max_satellite_index(&table), None);
    }

    #[test]
    fn qualification() {
        let mut table = TelemetryTable::from_columns(vec![
            Column::from_values("Time", &[0.0, 1.0]),
            flags("LEO0_Sydney_Access", &[Some(true), None]),
            flags("LEO0_Melbourne_Access", &[None, Some(true)]),
            Column::new("LEO0_Name", vec![Cell::from("SAT-0"), Cell::from("SAT-0")]),
            flags("LEO1_Sydney_Access", &[Some(true), Some(true)]),
            Column::new("LEO1_Name", vec![Cell::from("SAT-1"), Cell::from("SAT-1")]),
            Column::from_values("LEO1_Lat", &[10.0, 11.0]),
            Column::from_values("LEO1_Sydney_SNR_dB", &[10.0, 11.0]),
            Column::from_values("LEO2_Melbourne_SNR_dB", &[5.0, 6.0]),
        ])
        .unwrap();
        let report = ConnectivityFilter::default().apply(&mut table);
        assert_eq!(report.max_satellite, Some(2));
        assert_eq!(report.qualified, vec![SatelliteId(0)]);
        assert!(report.is_qualified(SatelliteId(0)));
        assert!(!report.is_qualified(SatelliteId(1)));
        assert_eq!(report.descriptors, vec!["LEO1_Name", "LEO1_Lat"]);
        assert_eq!(
            report.pruned,
            vec!["LEO1_Sydney_Access", "LEO1_Sydney_SNR_dB", "LEO2_Melbourne_SNR_dB"]
        );
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec![
                "Time",
                "LEO0_Sydney_Access",
                "LEO0_Melbourne_Access",
                "LEO0_Name"
            ]
        );
    }

    #[test]
    fn irregular_satellites() {
        let mut table = TelemetryTable::from_columns(vec![
            Column::from_values("Time", &[0.0, 1.0]),
            flags("LEO1_Sydney_Access", &[Some(true), None]),
            flags("LEO1_Melbourne_Access", &[None, Some(true)]),
            Column::from_values("LEO1_Sydney_SNR_dB", &[3.0, 4.0]),
            flags("LEO01_Sydney_Access", &[Some(true), Some(true)]),
            flags("LEO01_Melbourne_Access", &[Some(true), Some(true)]),
            Column::from_values("LEO01_Sydney_SNR_dB", &[30.0, 40.0]),
            Column::new("LEO01_Name", vec![Cell::from("SAT-01"), Cell::from("SAT-01")]),
            flags("LEO99999999999_Sydney_Access", &[Some(true), Some(true)]),
            Column::from_values("LEO99999999999_Sydney_SNR_dB", &[50.0, 60.0]),
        ])
        .unwrap();
        let report = ConnectivityFilter::default().apply(&mut table);
        assert_eq!(report.max_satellite, Some(1));
        assert_eq!(report.qualified, vec![SatelliteId(1)]);
        assert_eq!(
            report.pruned,
            vec![
                "LEO01_Sydney_Access",
                "LEO01_Melbourne_Access",
                "LEO01_Sydney_SNR_dB",
                "LEO01_Name",
                "LEO99999999999_Sydney_Access",
                "LEO99999999999_Sydney_SNR_dB",
            ]
        );
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec![
                "Time",
                "LEO1_Sydney_Access",
                "LEO1_Melbourne_Access",
                "LEO1_Sydney_SNR_dB"
            ]
        );
    }

    #[test]
    fn sparse_satellite_indices() {
        let mut table = TelemetryTable::from_columns(vec![
            Column::from_values("Time", &[0.0]),
            flags("LEO2_Sydney_Access", &[Some(true)]),
            flags("LEO2_Melbourne_Access", &[Some(true)]),
            Column::new("LEO4294967295_Name", vec![Cell::from("SAT-MAX")]),
        ])
        .unwrap();
        assert_eq!(
            satellite_ids(&table),
            vec![SatelliteId(2), SatelliteId(u32::MAX)]
        );
        let report = ConnectivityFilter::default().apply(&mut table);
        assert_eq!(report.max_satellite, Some(u32::MAX));
        assert_eq!(report.qualified, vec![SatelliteId(2)]);
        assert_eq!(report.descriptors, vec!["LEO4294967295_Name"]);
    }
}
