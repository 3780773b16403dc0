//! Column naming convention.
//!
//! Signal columns are named `LEO<N>_<Station>_<Metric>`.
//! This convention is the only schema of a telemetry log.
use regex::Regex;
use std::{
    convert::Infallible,
    fmt::{Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{satellite::SatelliteToken, station::Station};

lazy_static! {
    /// Signal column: LEO<digits>_<alphanumerical station>_<metric>
    static ref SIGNAL_COLUMN: Regex = Regex::new(r"^LEO([0-9]+)_([A-Za-z0-9]+)_(.+)$").unwrap();
    /// Any satellite column, including static descriptors
    static ref SATELLITE_COLUMN: Regex = Regex::new(r"^LEO([0-9]+)_").unwrap();
}

/// Signal [Metric], as found in column names
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Metric {
    /// Link availability flag
    Access,
    /// Signal to noise ratio [dB]
    SnrDb,
    /// Received signal strength [dBm]
    RssiDbm,
    /// Throughput [bytes/unit]
    Throughput,
    /// Bit error rate, QPSK modulation
    BerQpsk,
    /// Bit error rate, M-QAM modulation
    BerMqam,
    /// Latency [s]
    Latency,
    /// Timeout flag
    TimeOut,
    /// Any other metric token
    Other(String),
}

impl Metric {
    /// Metrics that are reported per satellite and per station
    pub const SIGNALS: [Metric; 6] = [
        Metric::Latency,
        Metric::Throughput,
        Metric::SnrDb,
        Metric::BerQpsk,
        Metric::BerMqam,
        Metric::RssiDbm,
    ];

    /// Column name suffix that identifies this metric in
    /// metric groups. Latency and TimeOut are matched without
    /// the leading separator.
    pub fn suffix(&self) -> String {
        match self {
            Self::Latency | Self::TimeOut => self.to_string(),
            _ => format!("_{}", self),
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Access => write!(f, "Access"),
            Self::SnrDb => write!(f, "SNR_dB"),
            Self::RssiDbm => write!(f, "RSSI_dBm"),
            Self::Throughput => write!(f, "Throughput"),
            Self::BerQpsk => write!(f, "BER_QPSK"),
            Self::BerMqam => write!(f, "BER_MQAM"),
            Self::Latency => write!(f, "Latency"),
            Self::TimeOut => write!(f, "TimeOut"),
            Self::Other(token) => write!(f, "{}", token),
        }
    }
}

impl FromStr for Metric {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Access" => Self::Access,
            "SNR_dB" => Self::SnrDb,
            "RSSI_dBm" => Self::RssiDbm,
            "Throughput" => Self::Throughput,
            "BER_QPSK" => Self::BerQpsk,
            "BER_MQAM" => Self::BerMqam,
            "Latency" => Self::Latency,
            "TimeOut" => Self::TimeOut,
            other => Self::Other(other.to_string()),
        })
    }
}

/// [ColumnName] is the result of parsing a column name
/// against the signal naming convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnName {
    /// Signal column
    Matched {
        satellite: SatelliteToken,
        station: Station,
        metric: Metric,
    },
    /// Anything else, left untouched
    Unmatched(String),
}

impl ColumnName {
    /// Parses a column name. Never fails: names that do not follow
    /// the convention are [ColumnName::Unmatched].
    pub fn parse(name: &str) -> Self {
        let matched = SIGNAL_COLUMN.captures(name).and_then(|caps| {
            let satellite = SatelliteToken::from_digits(caps.get(1)?.as_str());
            let station = Station::from_str(caps.get(2)?.as_str()).ok()?;
            let metric = Metric::from_str(caps.get(3)?.as_str()).ok()?;
            Some(Self::Matched {
                satellite,
                station,
                metric,
            })
        });
        matched.unwrap_or_else(|| Self::Unmatched(name.to_string()))
    }
}

impl FromStr for ColumnName {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Returns the [SatelliteToken] this column belongs to, if any.
/// Unlike [ColumnName::parse], this also identifies static descriptors
/// like `LEO3_Name`.
pub fn satellite_prefix(name: &str) -> Option<SatelliteToken> {
    let caps = SATELLITE_COLUMN.captures(name)?;
    Some(SatelliteToken::from_digits(caps.get(1)?.as_str()))
}
