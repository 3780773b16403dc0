//! Column tokens and unit scalings

/// Time index column
pub(crate) const TIME_COLUMN: &str = "Time";

/// Satellite identifier prefix
pub(crate) const SATELLITE_PREFIX: &str = "LEO";

/// Static (per satellite) descriptor columns, `LEO<N>_<descriptor>`.
pub(crate) const STATIC_DESCRIPTORS: [&str; 4] = ["Name", "Lat", "Lon", "Freq_Hz"];

/// Throughput is logged in bytes per unit: 1 Mbps = 1024 * 1024.
pub(crate) const BYTES_PER_MEGABIT: f64 = 1_048_576.0;

/// Latency is logged in seconds
pub(crate) const MILLISECONDS_PER_SECOND: f64 = 1000.0;
