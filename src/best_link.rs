//! Best link selection.
//!
//! For each row and each monitored station, the qualified satellite
//! with the highest SNR is elected. Ties keep the first elected satellite,
//! in ascending satellite order.
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

#[cfg(feature = "log")]
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    cell::Cell,
    column::Metric,
    constants::{BYTES_PER_MEGABIT, MILLISECONDS_PER_SECOND, TIME_COLUMN},
    error::Error,
    satellite::SatelliteId,
    station::Station,
    table::{Column, Row, TelemetryTable},
};

/// [BestLink] describes the elected satellite for one station at one
/// time step. When no satellite could be elected, `satellite` is None and
/// all fields hold their sentinel value (see [BestLink::default]).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BestLink {
    /// Elected satellite
    pub satellite: Option<SatelliteId>,
    /// SNR [dB]
    pub snr_db: f64,
    /// RSSI [dBm]
    pub rssi_dbm: Option<f64>,
    /// Throughput [Mbps]
    pub throughput_mbps: Option<f64>,
    /// Bit error rate, M-QAM modulation
    pub ber_mqam: Option<f64>,
    /// Bit error rate, QPSK modulation
    pub ber_qpsk: Option<f64>,
    /// Latency [ms]
    pub latency_ms: Option<f64>,
}

impl Default for BestLink {
    /// Sentinel [BestLink]: nothing elected yet
    fn default() -> Self {
        Self {
            satellite: None,
            snr_db: f64::NEG_INFINITY,
            rssi_dbm: Some(f64::NEG_INFINITY),
            throughput_mbps: Some(f64::NEG_INFINITY),
            ber_mqam: Some(f64::INFINITY),
            ber_qpsk: Some(f64::INFINITY),
            latency_ms: Some(f64::INFINITY),
        }
    }
}

impl BestLink {
    /// True if a satellite was elected
    pub fn is_defined(&self) -> bool {
        self.satellite.is_some()
    }
    /// Elects the best satellite on given row, for given station.
    /// `satellites` is scanned in given order: only a strictly higher SNR
    /// replaces the current candidate.
    pub fn elect(row: &Row, station: &Station, satellites: &[SatelliteId]) -> Self {
        let mut best = Self::default();
        for satellite in satellites {
            let snr = match row.value(&satellite.column(station, &Metric::SnrDb)) {
                Some(snr) if !snr.is_nan() => snr,
                _ => continue,
            };
            if snr > best.snr_db {
                best = Self {
                    satellite: Some(*satellite),
                    snr_db: snr,
                    rssi_dbm: row.value(&satellite.column(station, &Metric::RssiDbm)),
                    throughput_mbps: row
                        .value(&satellite.column(station, &Metric::Throughput))
                        .map(|bytes| bytes / BYTES_PER_MEGABIT),
                    ber_mqam: row.value(&satellite.column(station, &Metric::BerMqam)),
                    ber_qpsk: row.value(&satellite.column(station, &Metric::BerQpsk)),
                    latency_ms: row
                        .value(&satellite.column(station, &Metric::Latency))
                        .map(|s| s * MILLISECONDS_PER_SECOND),
                };
            }
        }
        best
    }
}

/// [BestLinkRecord] gathers the elected links at one time step
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BestLinkRecord {
    /// Time index, missing if the table had no time column
    pub time: Cell,
    pub sydney: BestLink,
    pub melbourne: BestLink,
}

impl BestLinkRecord {
    /// Returns [BestLink] for given station, if monitored
    pub fn link(&self, station: &Station) -> Option<&BestLink> {
        match station {
            Station::Sydney => Some(&self.sydney),
            Station::Melbourne => Some(&self.melbourne),
            Station::Other(_) => None,
        }
    }
}

/// [BestLinkTable]: one [BestLinkRecord] per telemetry row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestLinkTable {
    pub records: Vec<BestLinkRecord>,
}

/// Output fields, per station, with their value accessor
const FIELDS: [(&str, fn(&BestLink) -> Cell); 7] = [
    ("Best_SAT_ID", |link| match link.satellite {
        Some(sat) => Cell::Text(sat.to_string()),
        None => Cell::Missing,
    }),
    ("BEST_SNR", |link| Cell::from(link.snr_db)),
    ("BEST_RSSI", |link| Cell::from(link.rssi_dbm)),
    ("BEST_Thrpt", |link| Cell::from(link.throughput_mbps)),
    ("BEST_BER_MQAM", |link| Cell::from(link.ber_mqam)),
    ("BEST_BER_QPSK", |link| Cell::from(link.ber_qpsk)),
    ("BEST_Latency", |link| Cell::from(link.latency_ms)),
];

impl BestLinkTable {
    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }
    /// True if this table does not contain any record
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    /// Column names, time first, then each field of each monitored station
    pub fn headers() -> Vec<String> {
        let mut headers = vec![TIME_COLUMN.to_string()];
        for station in Station::MONITORED {
            for (field, _) in FIELDS.iter() {
                headers.push(Self::column_name(&station, field));
            }
        }
        headers
    }
    /// Name of the column holding given field (like "BEST_SNR") for given station
    pub fn column_name(station: &Station, field: &str) -> String {
        format!("{}_{}", station, field)
    }
    fn cells(record: &BestLinkRecord) -> Vec<Cell> {
        let mut cells = vec![record.time.clone()];
        for link in [&record.sydney, &record.melbourne] {
            cells.extend(FIELDS.iter().map(|(_, value)| value(link)));
        }
        cells
    }
    /// Dumps as CSV, with a leading unnamed row index column.
    /// Undefined values are left empty, sentinels are `inf` / `-inf`.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut w = csv::Writer::from_writer(writer);
        let mut headers = vec![String::new()];
        headers.extend(Self::headers());
        w.write_record(&headers)?;
        for (index, record) in self.records.iter().enumerate() {
            let mut fields = vec![index.to_string()];
            fields.extend(Self::cells(record).iter().map(|cell| cell.to_string()));
            w.write_record(&fields)?;
        }
        w.flush()?;
        Ok(())
    }
    /// Dumps as local CSV file, see [Self::to_writer]
    pub fn to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let fd = File::create(path)?;
        self.to_writer(BufWriter::new(fd))
    }
    /// Converts to [TelemetryTable], for further analysis and charting
    pub fn to_table(&self) -> Result<TelemetryTable, Error> {
        let mut columns = Self::headers()
            .iter()
            .map(|name| Column::new(name, Vec::with_capacity(self.records.len())))
            .collect::<Vec<_>>();
        for record in self.records.iter() {
            for (column, cell) in columns.iter_mut().zip(Self::cells(record)) {
                column.cells.push(cell);
            }
        }
        TelemetryTable::from_columns(columns)
    }
}

/// Elects the best link, per row and per monitored station,
/// among `qualified` satellites, scanned in ascending order.
/// The table is expected to be in raw units: conversions to Mbps
/// and milliseconds are applied here.
pub fn select_best_links(table: &TelemetryTable, qualified: &[SatelliteId]) -> BestLinkTable {
    let mut satellites = qualified.to_vec();
    satellites.sort();
    satellites.dedup();

    let records = table
        .rows()
        .map(|row| BestLinkRecord {
            time: row.get(TIME_COLUMN).cloned().unwrap_or_default(),
            sydney: BestLink::elect(&row, &Station::Sydney, &satellites),
            melbourne: BestLink::elect(&row, &Station::Melbourne, &satellites),
        })
        .collect::<Vec<_>>();

    #[cfg(feature = "log")]
    debug!(
        "best links: {} records, {} undefined",
        records.len(),
        records
            .iter()
            .filter(|r| !r.sydney.is_defined() || !r.melbourne.is_defined())
            .count()
    );

    BestLinkTable { records }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn sentinel() {
        let link = BestLink::default();
        assert!(!link.is_defined());
        assert_eq!(link.snr_db, f64::NEG_INFINITY);
        assert_eq!(link.rssi_dbm, Some(f64::NEG_INFINITY));
        assert_eq!(link.throughput_mbps, Some(f64::NEG_INFINITY));
        assert_eq!(link.ber_mqam, Some(f64::INFINITY));
        assert_eq!(link.ber_qpsk, Some(f64::INFINITY));
        assert_eq!(link.latency_ms, Some(f64::INFINITY));
    }
    #[test]
    fn headers() {
        let headers = BestLinkTable::headers();
        assert_eq!(headers.len(), 15);
        assert_eq!(headers[0], "Time");
        assert_eq!(headers[1], "Sydney_Best_SAT_ID");
        assert_eq!(headers[7], "Sydney_BEST_Latency");
        assert_eq!(headers[8], "Melbourne_Best_SAT_ID");
        assert_eq!(headers[14], "Melbourne_BEST_Latency");
    }
    #[test]
    fn companion_fields() {
        let table = TelemetryTable::from_columns(vec![
            Column::from_values("Time", &[0.0]),
            Column::from_values("LEO0_Sydney_SNR_dB", &[7.0]),
            Column::from_values("LEO0_Sydney_RSSI_dBm", &[-90.0]),
            Column::from_values("LEO0_Sydney_Throughput", &[3_145_728.0]),
            Column::from_values("LEO0_Sydney_BER_MQAM", &[1.0E-5]),
            Column::from_values("LEO0_Sydney_Latency", &[0.5]),
        ])
        .unwrap();
        let best = select_best_links(&table, &[SatelliteId(0)]);
        let link = best.records[0].sydney;
        assert_eq!(link.satellite, Some(SatelliteId(0)));
        assert_eq!(link.snr_db, 7.0);
        assert_eq!(link.rssi_dbm, Some(-90.0));
        assert_eq!(link.throughput_mbps, Some(3.0));
        assert_eq!(link.ber_mqam, Some(1.0E-5));
        assert_eq!(link.ber_qpsk, None, "missing companion column");
        assert_eq!(link.latency_ms, Some(500.0));
        assert!(!best.records[0].melbourne.is_defined());
    }
    #[test]
    fn table_conversion() {
        let empty = BestLinkTable::default().to_table().unwrap();
        assert_eq!(empty.nb_rows(), 0);
        assert_eq!(
            empty.column_names().collect::<Vec<_>>(),
            BestLinkTable::headers()
        );

        let table = TelemetryTable::from_columns(vec![
            Column::from_values("Time", &[0.0, 1.0]),
            Column::from_values("LEO0_Sydney_SNR_dB", &[7.0, f64::NAN]),
        ])
        .unwrap();
        let best = select_best_links(&table, &[SatelliteId(0)])
            .to_table()
            .unwrap();
        assert_eq!(best.nb_rows(), 2);
        assert_eq!(best.nb_columns(), 15);
        assert_eq!(
            best.cell(0, "Sydney_Best_SAT_ID"),
            Some(&Cell::Text("LEO0".to_string()))
        );
        assert_eq!(best.cell(1, "Sydney_Best_SAT_ID"), Some(&Cell::Missing));
        assert_eq!(
            best.cell(1, "Sydney_BEST_SNR"),
            Some(&Cell::Number(f64::NEG_INFINITY))
        );
    }
}
