//! Output products (CSV files)
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use itertools::Itertools;

use leolink::{
    chart::MetricChart,
    prelude::{
        describe, row_argmax, BestLinkTable, Metric, Station, StatisticsTable, TelemetryTable,
    },
    statistics::{column_maxima, overall_max},
};

use crate::Error;

/// Returns input file name, without .csv (and .gz) extensions
pub fn input_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    let name = name.strip_suffix(".csv").unwrap_or(name);
    name.to_string()
}

/// Session tag of each input: the input file name, or the user tag.
/// With several inputs, the user tag is suffixed with the file name,
/// and any remaining collision gets a counter, so that sessions never
/// overwrite each other.
pub fn session_tags(tag: Option<&str>, paths: &[PathBuf]) -> Vec<String> {
    let mut used = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let stem = input_stem(path);
            let base = match tag {
                Some(tag) if paths.len() > 1 => format!("{}_{}", tag, stem),
                Some(tag) => tag.to_string(),
                None => stem,
            };
            let mut session = base.clone();
            let mut nth = 1;
            while !used.insert(session.clone()) {
                session = format!("{}_{}", base, nth);
                nth += 1;
            }
            session
        })
        .collect()
}

/// Best link products: `<tag>_Best_<stem>_cleaned.csv`
pub fn best_link_csv(
    folder: &Path,
    tag: &str,
    stem: &str,
    best: &BestLinkTable,
) -> Result<PathBuf, Error> {
    let path = folder.join(format!("{}_Best_{}_cleaned.csv", tag, stem));
    best.to_path(&path)?;
    info!("{} has been generated", path.display());
    Ok(path)
}

/// Filtered telemetry: `<tag>_<stem>_filtered.csv`
pub fn filtered_csv(
    folder: &Path,
    tag: &str,
    stem: &str,
    table: &TelemetryTable,
) -> Result<PathBuf, Error> {
    let path = folder.join(format!("{}_{}_filtered.csv", tag, stem));
    table.to_path(&path)?;
    info!("{} has been generated", path.display());
    Ok(path)
}

fn write_stats(folder: &Path, filename: &str, stats: &StatisticsTable) -> Result<PathBuf, Error> {
    let path = folder.join(filename);
    stats.to_path(&path)?;
    info!("{} has been generated", path.display());
    Ok(path)
}

/// Generates one statistics file per signal metric group
/// (like `rssi_stats.csv`), and `best_link_stats.csv`.
pub fn statistics(
    folder: &Path,
    table: &TelemetryTable,
    best: &TelemetryTable,
    fill_missing: Option<f64>,
) -> Result<Vec<PathBuf>, Error> {
    let mut products = Vec::new();
    for metric in Metric::SIGNALS {
        let columns = table.columns_with_metric(&metric);
        if columns.is_empty() {
            continue;
        }
        let token = match MetricChart::from_metric(&metric) {
            Some(chart) => chart.token.to_lowercase(),
            None => continue,
        };
        let stats = describe(table, &columns, fill_missing)?;
        products.push(write_stats(folder, &format!("{}_stats.csv", token), &stats)?);
    }

    let columns = best
        .column_names()
        .filter(|name| name.contains("_BEST_"))
        .map(|name| name.to_string())
        .collect::<Vec<_>>();
    let stats = describe(best, &columns, fill_missing)?;
    products.push(write_stats(folder, "best_link_stats.csv", &stats)?);
    Ok(products)
}

/// Reports the strongest RSSI, overall, per column and per row
pub fn rssi_report(table: &TelemetryTable) -> Result<(), Error> {
    let columns = table.columns_with_metric(&Metric::RssiDbm);
    if columns.is_empty() {
        return Ok(());
    }
    for (name, max) in column_maxima(table, &columns)? {
        if let Some(max) = max {
            debug!("highest value of {}: {}", name, max);
        }
    }
    if let Some(max) = overall_max(table, &columns)? {
        info!("highest RSSI: {} dBm", max);
    }
    for (row, argmax) in row_argmax(table, &columns)?.iter().enumerate() {
        if let Some((name, value)) = argmax {
            debug!("highest RSSI at index {}: {} ({})", row, value, name);
        }
    }
    Ok(())
}

/// Summarizes elected satellites, per station
pub fn best_link_report(best: &BestLinkTable) {
    for station in Station::MONITORED {
        let elected = best
            .records
            .iter()
            .filter_map(|record| record.link(&station).and_then(|link| link.satellite))
            .unique()
            .sorted()
            .join(", ");
        let undefined = best
            .records
            .iter()
            .filter(|record| {
                record
                    .link(&station)
                    .map(|link| !link.is_defined())
                    .unwrap_or(true)
            })
            .count();
        info!(
            "{} best links: [{}], {} undefined time steps",
            station, elected, undefined
        );
    }
}
