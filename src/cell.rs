//! Telemetry table cell
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Field values that represent a missing sample
const MISSING_TOKENS: [&str; 7] = ["", "nan", "NaN", "NA", "N/A", "null", "None"];

/// [Cell] is one value of the telemetry table.
/// Simulation logs mix numerical samples, access flags
/// and static descriptors (satellite names).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cell {
    /// Missing sample
    #[default]
    Missing,
    /// Boolean flag, like access indications
    Bool(bool),
    /// Numerical sample
    Number(f64),
    /// Any other content
    Text(String),
}

impl Cell {
    /// Decodes a CSV field
    pub fn parse(field: &str) -> Self {
        let field = field.trim();
        if MISSING_TOKENS.contains(&field) {
            return Self::Missing;
        }
        match field {
            "True" | "true" | "TRUE" => Self::Bool(true),
            "False" | "false" | "FALSE" => Self::Bool(false),
            _ => match field.parse::<f64>() {
                Ok(value) if value.is_nan() => Self::Missing,
                Ok(value) => Self::Number(value),
                Err(_) => Self::Text(field.to_string()),
            },
        }
    }
    /// True if this sample is missing
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
    /// True if this sample is either missing, or null.
    /// A false flag compares equal to zero.
    pub fn is_zero_or_missing(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Bool(b) => !b,
            Self::Number(value) => *value == 0.0,
            Self::Text(_) => false,
        }
    }
    /// Interprets this sample as a boolean, missing being false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Missing => false,
            Self::Bool(b) => *b,
            Self::Number(value) => *value != 0.0,
            Self::Text(text) => !text.is_empty(),
        }
    }
    /// Returns numerical value, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Self::Missing
        } else {
            Self::Number(value)
        }
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(value) => Self::from(value),
            None => Self::Missing,
        }
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl Display for Cell {
    /// Formats as a CSV field
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Number(value) => write!(f, "{}", value),
            Self::Text(text) => write!(f, "{}", text),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn field_decoding() {
        assert_eq!(Cell::parse(""), Cell::Missing);
        assert_eq!(Cell::parse(" NaN "), Cell::Missing);
        assert_eq!(Cell::parse("nan"), Cell::Missing);
        assert_eq!(Cell::parse("True"), Cell::Bool(true));
        assert_eq!(Cell::parse("false"), Cell::Bool(false));
        assert_eq!(Cell::parse("12.5"), Cell::Number(12.5));
        assert_eq!(Cell::parse("-3"), Cell::Number(-3.0));
        assert_eq!(Cell::parse("1e-6"), Cell::Number(1.0E-6));
        assert_eq!(Cell::parse("STARLINK-1007"), Cell::Text("STARLINK-1007".to_string()));
    }
    #[test]
    fn field_encoding() {
        assert_eq!(Cell::Missing.to_string(), "");
        assert_eq!(Cell::Bool(true).to_string(), "True");
        assert_eq!(Cell::Number(10.0).to_string(), "10");
        assert_eq!(Cell::Number(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(Cell::Number(f64::INFINITY).to_string(), "inf");
        assert_eq!(Cell::parse(&Cell::Number(0.1).to_string()), Cell::Number(0.1));
    }
    #[test]
    fn truthiness() {
        assert!(!Cell::Missing.is_truthy());
        assert!(Cell::Bool(true).is_truthy());
        assert!(Cell::Number(1.0).is_truthy());
        assert!(!Cell::Number(0.0).is_truthy());
        assert!(Cell::Bool(false).is_zero_or_missing());
        assert!(Cell::Number(0.0).is_zero_or_missing());
        assert!(!Cell::Text("x".to_string()).is_zero_or_missing());
        assert_eq!(Cell::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Cell::Text("x".to_string()).as_f64(), None);
    }
}
