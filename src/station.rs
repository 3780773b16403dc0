//! Ground stations
use std::{
    convert::Infallible,
    fmt::{Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ground [Station] token, as found in signal column names.
/// Any alphanumerical token is accepted, only Sydney and Melbourne
/// are monitored for connectivity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Station {
    Sydney,
    Melbourne,
    Other(String),
}

impl Station {
    /// Stations that a satellite must reach to qualify,
    /// in best link reporting order.
    pub const MONITORED: [Station; 2] = [Station::Sydney, Station::Melbourne];
}

impl Display for Station {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Sydney => write!(f, "Sydney"),
            Self::Melbourne => write!(f, "Melbourne"),
            Self::Other(token) => write!(f, "{}", token),
        }
    }
}

impl FromStr for Station {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Sydney" => Self::Sydney,
            "Melbourne" => Self::Melbourne,
            other => Self::Other(other.to_string()),
        })
    }
}
