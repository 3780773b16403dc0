//! Chart planning.
//!
//! Charts are described here and rendered by the application.
//! Each [ChartRequest] plots one or more columns against the row index.
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    best_link::BestLinkTable, column::Metric, satellite::SatelliteId, station::Station,
    table::TelemetryTable,
};

/// X axis label, shared by all charts
pub const X_LABEL: &str = "Time (m)";

/// [ChartRequest] describes one chart to render
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChartRequest {
    /// Columns to plot, one trace each
    pub columns: Vec<String>,
    /// Legend labels, one per column
    pub labels: Vec<String>,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
    /// Destination folder
    pub folder: PathBuf,
    /// File name, without extension
    pub filename: String,
}

impl ChartRequest {
    /// Returns destination path, with given file extension
    pub fn path(&self, extension: &str) -> PathBuf {
        self.folder.join(format!("{}.{}", self.filename, extension))
    }
}

/// [MetricChart] gathers the chart layout of one signal [Metric]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricChart {
    /// Subfolder
    pub folder: &'static str,
    /// File name token
    pub token: &'static str,
    /// Title token
    pub name: &'static str,
    pub y_label: &'static str,
    /// Best link field (column suffix)
    pub best_field: &'static str,
}

impl MetricChart {
    /// Returns chart layout of given [Metric], if it is charted.
    pub fn from_metric(metric: &Metric) -> Option<Self> {
        let (folder, token, name, y_label, best_field) = match metric {
            Metric::Latency => ("Latency", "latency", "Latency", "Latency (ms)", "BEST_Latency"),
            Metric::Throughput => ("thrpt", "thrpt", "Thrpt", "Thrpt (Mbps)", "BEST_Thrpt"),
            Metric::SnrDb => ("SNR", "SNR", "SNR", "SNR (dBm)", "BEST_SNR"),
            Metric::BerQpsk => ("BER_QPSK", "BER_QPSK", "BER_QPSK", "BER_QPSK", "BEST_BER_QPSK"),
            Metric::BerMqam => ("BER_MQAM", "BER_MQAM", "BER_MQAM", "BER_MQAM", "BEST_BER_MQAM"),
            Metric::RssiDbm => ("RSSI", "RSSI", "RSSI", "RSSI(dBm)", "BEST_RSSI"),
            _ => return None,
        };
        Some(Self {
            folder,
            token,
            name,
            y_label,
            best_field,
        })
    }
    /// Chart title, for given constellation
    pub fn title(&self, constellation: &str) -> String {
        format!("{} for {} Satellites", self.name, constellation)
    }
}

/// Plans one single column chart per qualified satellite, monitored station
/// and signal metric, when such column exists in the table.
/// Charts are stored in `<root>/<tag>/<metric folder>`.
pub fn metric_charts(
    table: &TelemetryTable,
    qualified: &[SatelliteId],
    tag: &str,
    constellation: &str,
    root: &Path,
) -> Vec<ChartRequest> {
    let mut requests = Vec::new();
    for metric in Metric::SIGNALS {
        let layout = match MetricChart::from_metric(&metric) {
            Some(layout) => layout,
            None => continue,
        };
        let folder = root.join(tag).join(layout.folder);
        for satellite in qualified {
            for station in Station::MONITORED {
                let column = satellite.column(&station, &metric);
                if !table.contains(&column) {
                    continue;
                }
                requests.push(ChartRequest {
                    labels: vec![column.clone()],
                    columns: vec![column],
                    x_label: X_LABEL.to_string(),
                    y_label: layout.y_label.to_string(),
                    title: layout.title(constellation),
                    folder: folder.clone(),
                    filename: format!("{}_{}_{}_{}", tag, satellite, station, layout.token),
                });
            }
        }
    }
    requests
}

/// Plans one Sydney versus Melbourne chart per best link field,
/// stored in `<root>/<tag>_best`.
pub fn best_link_charts(tag: &str, constellation: &str, root: &Path) -> Vec<ChartRequest> {
    let folder = root.join(format!("{}_best", tag));
    Metric::SIGNALS
        .iter()
        .filter_map(MetricChart::from_metric)
        .map(|layout| {
            let columns = Station::MONITORED
                .iter()
                .map(|station| BestLinkTable::column_name(station, layout.best_field))
                .collect::<Vec<_>>();
            ChartRequest {
                labels: columns.clone(),
                columns,
                x_label: X_LABEL.to_string(),
                y_label: layout.y_label.to_string(),
                title: layout.title(constellation),
                folder: folder.clone(),
                filename: format!("{}_best_{}", tag, layout.token),
            }
        })
        .collect()
}
