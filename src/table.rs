//! Telemetry table, as loaded from CSV simulation logs
use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

#[cfg(feature = "log")]
use log::debug;

use crate::{
    cell::Cell,
    column::Metric,
    constants::{BYTES_PER_MEGABIT, MILLISECONDS_PER_SECOND},
    error::Error,
};

/// Named [Column] of samples
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    /// Builds a new [Column]
    pub fn new(name: &str, cells: Vec<Cell>) -> Self {
        Self {
            name: name.to_string(),
            cells,
        }
    }
    /// Builds a numerical [Column], NaN being missing
    pub fn from_values(name: &str, values: &[f64]) -> Self {
        Self::new(name, values.iter().map(|v| Cell::from(*v)).collect())
    }
    /// Iterates numerical samples, missing samples are skipped
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().filter_map(|cell| cell.as_f64())
    }
}

/// [TelemetryTable] stores one row per simulated time step.
/// Storage is column major: ordered [Column]s of identical length,
/// with unique names. The row count survives column removal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryTable {
    nb_rows: usize,
    columns: Vec<Column>,
    lookup: HashMap<String, usize>,
}

/// [Row] view of a [TelemetryTable]
#[derive(Debug, Copy, Clone)]
pub struct Row<'a> {
    table: &'a TelemetryTable,
    index: usize,
}

impl<'a> Row<'a> {
    /// Returns [Cell] of given column, if such column exists
    pub fn get(&self, column: &str) -> Option<&'a Cell> {
        self.table.cell(self.index, column)
    }
    /// Returns numerical value of given column, if it exists and is defined
    pub fn value(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(|cell| cell.as_f64())
    }
}

impl TelemetryTable {
    /// Builds a [TelemetryTable] from given columns,
    /// which must all have the same length and unique names.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, Error> {
        let nb_rows = columns.first().map(|c| c.cells.len()).unwrap_or(0);
        let mut table = Self::with_rows(nb_rows);
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }
    /// Builds an empty [TelemetryTable] with predefined row count
    pub fn with_rows(nb_rows: usize) -> Self {
        Self {
            nb_rows,
            ..Default::default()
        }
    }
    /// Appends a new [Column]
    pub fn push_column(&mut self, column: Column) -> Result<(), Error> {
        if column.cells.len() != self.nb_rows {
            return Err(Error::RaggedColumn {
                name: column.name,
                expected: self.nb_rows,
                found: column.cells.len(),
            });
        }
        if self.lookup.contains_key(&column.name) {
            return Err(Error::DuplicateColumn(column.name));
        }
        self.lookup.insert(column.name.clone(), self.columns.len());
        self.columns.push(column);
        Ok(())
    }
    /// Parses a [TelemetryTable] from CSV content with a header line.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let headers = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = name.trim();
                if name.is_empty() {
                    format!("Unnamed: {}", i)
                } else {
                    name.to_string()
                }
            })
            .collect::<Vec<_>>();
        let mut cells: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record?;
            for (column, field) in cells.iter_mut().zip(record.iter()) {
                column.push(Cell::parse(field));
            }
        }
        let columns = headers
            .iter()
            .zip(cells)
            .map(|(name, cells)| Column::new(name, cells))
            .collect::<Vec<_>>();
        let table = Self::from_columns(columns)?;
        #[cfg(feature = "log")]
        debug!(
            "parsed telemetry: {} rows, {} columns",
            table.nb_rows(),
            table.nb_columns()
        );
        Ok(table)
    }
    /// Parses a [TelemetryTable] from local CSV file.
    /// When the `flate2` feature is enabled, `.gz` files are
    /// seamlessly decompressed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let fd = File::open(path)?;
        #[cfg(feature = "flate2")]
        {
            if path.extension().map(|ext| ext == "gz").unwrap_or(false) {
                return Self::from_reader(BufReader::new(GzDecoder::new(fd)));
            }
        }
        Self::from_reader(BufReader::new(fd))
    }
    /// Dumps this [TelemetryTable] as CSV.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut w = csv::Writer::from_writer(writer);
        w.write_record(self.columns.iter().map(|c| c.name.as_str()))?;
        for row in 0..self.nb_rows {
            w.write_record(self.columns.iter().map(|c| c.cells[row].to_string()))?;
        }
        w.flush()?;
        Ok(())
    }
    /// Dumps this [TelemetryTable] into local CSV file.
    pub fn to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let fd = File::create(path)?;
        self.to_writer(BufWriter::new(fd))
    }
    /// Number of rows (time steps)
    pub fn nb_rows(&self) -> usize {
        self.nb_rows
    }
    /// Number of columns
    pub fn nb_columns(&self) -> usize {
        self.columns.len()
    }
    /// True if this table does not contain any row
    pub fn is_empty(&self) -> bool {
        self.nb_rows == 0
    }
    /// Column names, in table order
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }
    /// Iterates all [Column]s, in table order
    pub fn columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter()
    }
    /// True if such column exists
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }
    /// Returns [Column] by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.lookup.get(name).map(|i| &self.columns[*i])
    }
    /// Returns [Cell] at given row, in given column
    pub fn cell(&self, row: usize, name: &str) -> Option<&Cell> {
        self.column(name).and_then(|c| c.cells.get(row))
    }
    /// Iterates all rows
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        (0..self.nb_rows).map(move |index| Row { table: self, index })
    }
    /// Removes all given columns. Names that do not exist are ignored.
    /// Returns the number of removed columns.
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S]) -> usize {
        let names = names.iter().map(|n| n.as_ref()).collect::<HashSet<_>>();
        self.retain_columns(|column| !names.contains(column.name.as_str()))
    }
    /// Retains only the columns matching given predicate.
    /// Returns the number of removed columns.
    pub fn retain_columns<F: FnMut(&Column) -> bool>(&mut self, f: F) -> usize {
        let size = self.columns.len();
        self.columns.retain(f);
        self.reindex();
        size - self.columns.len()
    }
    /// Returns all column names of given [Metric] group, in table order.
    pub fn columns_with_metric(&self, metric: &Metric) -> Vec<String> {
        let suffix = metric.suffix();
        self.column_names()
            .filter(|name| name.ends_with(&suffix))
            .map(|name| name.to_string())
            .collect()
    }
    /// Converts throughput columns to Mbps (1 Mbps = 1024*1024 bytes),
    /// and latency columns to milliseconds. Missing samples remain missing.
    pub fn convert_units(&mut self) {
        let throughput = Metric::Throughput.suffix();
        let latency = Metric::Latency.suffix();
        for column in self.columns.iter_mut() {
            let scaling = if column.name.ends_with(&throughput) {
                1.0 / BYTES_PER_MEGABIT
            } else if column.name.ends_with(&latency) {
                MILLISECONDS_PER_SECOND
            } else {
                continue;
            };
            for cell in column.cells.iter_mut() {
                if let Cell::Number(value) = cell {
                    *value *= scaling;
                }
            }
        }
    }
    fn reindex(&mut self) {
        self.lookup = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
    }
}
