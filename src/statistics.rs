//! Descriptive statistics over column groups
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use itertools::{Itertools, MinMaxResult};
use statrs::statistics::Statistics;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::Error, table::TelemetryTable};

/// Statistical [Summary] of one column. Statistics are None
/// when the column does not contain enough samples.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Summary {
    /// Column name
    pub name: String,
    /// Number of samples taken into account
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n-1), needs two samples
    pub std: Option<f64>,
    pub min: Option<f64>,
    /// First quartile
    pub q25: Option<f64>,
    /// Median
    pub q50: Option<f64>,
    /// Third quartile
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Linear interpolation between closest ranks, on sorted samples
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let (lo, hi) = (pos.floor() as usize, pos.ceil() as usize);
    let (low, high) = (sorted[lo], sorted[hi]);
    Some(low + (high - low) * (pos - lo as f64))
}

impl Summary {
    /// Summarizes given samples.
    /// Quartiles use linear interpolation between closest ranks.
    pub fn from_samples(name: &str, samples: &[f64]) -> Self {
        let sorted = samples
            .iter()
            .copied()
            .sorted_by(|a, b| a.total_cmp(b))
            .collect::<Vec<_>>();
        let values = sorted.as_slice();
        Self {
            name: name.to_string(),
            count: values.len(),
            mean: defined(values.mean()),
            std: defined(values.std_dev()),
            min: defined(values.min()),
            q25: quantile(values, 0.25),
            q50: quantile(values, 0.5),
            q75: quantile(values, 0.75),
            max: defined(values.max()),
        }
    }
}

/// statrs reports NaN when there are not enough samples
fn defined(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// [StatisticsTable]: one [Summary] per described column
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatisticsTable {
    pub summaries: Vec<Summary>,
}

impl StatisticsTable {
    /// Returns [Summary] of given column
    pub fn get(&self, name: &str) -> Option<&Summary> {
        self.summaries.iter().find(|s| s.name == name)
    }
    /// Dumps as CSV: one row per column, statistics as columns.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut w = csv::Writer::from_writer(writer);
        w.write_record(["", "count", "mean", "std", "min", "25%", "50%", "75%", "max"])?;
        let fmt = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
        for summary in self.summaries.iter() {
            w.write_record([
                summary.name.clone(),
                summary.count.to_string(),
                fmt(summary.mean),
                fmt(summary.std),
                fmt(summary.min),
                fmt(summary.q25),
                fmt(summary.q50),
                fmt(summary.q75),
                fmt(summary.max),
            ])?;
        }
        w.flush()?;
        Ok(())
    }
    /// Dumps as local CSV file
    pub fn to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let fd = File::create(path)?;
        self.to_writer(BufWriter::new(fd))
    }
}

/// Collects numerical samples of given column.
/// Missing (and non numerical) samples are either skipped,
/// or replaced by `fill_missing`.
fn samples(table: &TelemetryTable, name: &str, fill_missing: Option<f64>) -> Result<Vec<f64>, Error> {
    let column = table
        .column(name)
        .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;
    Ok(column
        .cells
        .iter()
        .filter_map(|cell| cell.as_f64().or(fill_missing))
        .collect())
}

/// Describes given columns, see [Summary].
pub fn describe<S: AsRef<str>>(
    table: &TelemetryTable,
    columns: &[S],
    fill_missing: Option<f64>,
) -> Result<StatisticsTable, Error> {
    let mut summaries = Vec::with_capacity(columns.len());
    for name in columns {
        let name = name.as_ref();
        let samples = samples(table, name, fill_missing)?;
        summaries.push(Summary::from_samples(name, &samples));
    }
    Ok(StatisticsTable { summaries })
}

/// Highest value of each given column, None for columns without samples.
pub fn column_maxima<S: AsRef<str>>(
    table: &TelemetryTable,
    columns: &[S],
) -> Result<Vec<(String, Option<f64>)>, Error> {
    columns
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let max = match samples(table, name, None)?
                .into_iter()
                .minmax_by(|a, b| a.total_cmp(b))
            {
                MinMaxResult::NoElements => None,
                MinMaxResult::OneElement(max) => Some(max),
                MinMaxResult::MinMax(_, max) => Some(max),
            };
            Ok((name.to_string(), max))
        })
        .collect()
}

/// Highest value among all given columns
pub fn overall_max<S: AsRef<str>>(
    table: &TelemetryTable,
    columns: &[S],
) -> Result<Option<f64>, Error> {
    Ok(column_maxima(table, columns)?
        .into_iter()
        .filter_map(|(_, max)| max)
        .max_by(|a, b| a.total_cmp(b)))
}

/// For each row: highest value among given columns, and the column
/// holding it. Ties go to the first column. None when every column
/// is missing at that row.
pub fn row_argmax<S: AsRef<str>>(
    table: &TelemetryTable,
    columns: &[S],
) -> Result<Vec<Option<(String, f64)>>, Error> {
    let columns = columns
        .iter()
        .map(|name| {
            let name = name.as_ref();
            table
                .column(name)
                .ok_or_else(|| Error::UnknownColumn(name.to_string()))
        })
        .collect::<Result<Vec<_>, Error>>()?;
    Ok((0..table.nb_rows())
        .map(|row| {
            let mut best: Option<(&str, f64)> = None;
            for column in columns.iter() {
                if let Some(value) = column.cells[row].as_f64() {
                    match best {
                        Some((_, max)) if value <= max => {},
                        _ => best = Some((column.name.as_str(), value)),
                    }
                }
            }
            best.map(|(name, value)| (name.to_string(), value))
        })
        .collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::table::Column;

    fn table() -> TelemetryTable {
        TelemetryTable::from_columns(vec![
            Column::from_values("Time", &[0.0, 1.0, 2.0, 3.0]),
            Column::from_values("LEO0_Sydney_RSSI_dBm", &[-90.0, -80.0, f64::NAN, -70.0]),
            Column::from_values("LEO1_Sydney_RSSI_dBm", &[-85.0, -80.0, f64::NAN, -95.0]),
            Column::from_values("LEO2_Sydney_RSSI_dBm", &[f64::NAN; 4]),
        ])
        .unwrap()
    }

    #[test]
    fn summary() {
        let summary = Summary::from_samples("x", &[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, Some(2.5));
        assert_eq!(summary.min, Some(1.0));
        assert_eq!(summary.q25, Some(1.75));
        assert_eq!(summary.q50, Some(2.5));
        assert_eq!(summary.q75, Some(3.25));
        assert_eq!(summary.max, Some(4.0));
        let std = summary.std.unwrap();
        assert!((std - 1.2909944487358056).abs() < 1.0E-12);

        let single = Summary::from_samples("y", &[5.0]);
        assert_eq!(single.q75, Some(5.0));
        assert_eq!(single.std, None);

        let empty = Summary::from_samples("z", &[]);
        assert_eq!(empty.count, 0);
        assert_eq!(empty.mean, None);
        assert_eq!(empty.max, None);
    }

    #[test]
    fn describe_columns() {
        let table = table();
        let stats = describe(&table, &["LEO0_Sydney_RSSI_dBm", "LEO2_Sydney_RSSI_dBm"], None)
            .unwrap();
        assert_eq!(stats.get("LEO0_Sydney_RSSI_dBm").unwrap().count, 3);
        assert_eq!(stats.get("LEO0_Sydney_RSSI_dBm").unwrap().mean, Some(-80.0));
        assert_eq!(stats.get("LEO2_Sydney_RSSI_dBm").unwrap().count, 0);

        let filled = describe(&table, &["LEO0_Sydney_RSSI_dBm"], Some(0.0)).unwrap();
        assert_eq!(filled.summaries[0].count, 4);
        assert_eq!(filled.summaries[0].max, Some(0.0));

        assert!(matches!(
            describe(&table, &["LEO9_Sydney_RSSI_dBm"], None),
            Err(Error::UnknownColumn(_))
        ));

        let mut buf = Vec::<u8>::new();
        stats.to_writer(&mut buf).unwrap();
        let content = String::from_utf8(buf).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some(",count,mean,std,min,25%,50%,75%,max"));
        assert_eq!(
            lines.nth(1),
            Some("LEO2_Sydney_RSSI_dBm,0,,,,,,,")
        );
    }

    #[test]
    fn maxima() {
        let table = table();
        let columns = table.columns_with_metric(&crate::column::Metric::RssiDbm);
        let maxima = column_maxima(&table, &columns).unwrap();
        assert_eq!(maxima[0], ("LEO0_Sydney_RSSI_dBm".to_string(), Some(-70.0)));
        assert_eq!(maxima[1], ("LEO1_Sydney_RSSI_dBm".to_string(), Some(-80.0)));
        assert_eq!(maxima[2], ("LEO2_Sydney_RSSI_dBm".to_string(), None));
        assert_eq!(overall_max(&table, &columns).unwrap(), Some(-70.0));
    }

    #[test]
    fn argmax_per_row() {
        let table = table();
        let columns = table.columns_with_metric(&crate::column::Metric::RssiDbm);
        let argmax = row_argmax(&table, &columns).unwrap();
        assert_eq!(argmax.len(), 4);
        assert_eq!(argmax[0], Some(("LEO1_Sydney_RSSI_dBm".to_string(), -85.0)));
        assert_eq!(
            argmax[1],
            Some(("LEO0_Sydney_RSSI_dBm".to_string(), -80.0)),
            "ties go to the first column"
        );
        assert_eq!(argmax[2], None);
        assert_eq!(argmax[3], Some(("LEO0_Sydney_RSSI_dBm".to_string(), -70.0)));
    }
}
