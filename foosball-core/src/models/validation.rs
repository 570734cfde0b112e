//! Validation error types and shared field checks

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Maximum length for entity names
pub const MAX_NAME_LEN: usize = 128;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Number outside the accepted range
    OutOfRange { field: &'static str, min: f64, max: f64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Input checked before it is handed to a service
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Check a display name: non-blank, bounded length.
pub fn check_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Check a referenced id is present.
pub fn check_id(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

/// Check a finite number within `min..=max`.
pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ValidationError::OutOfRange { field, min, max });
    }
    Ok(())
}

/// Parse a challenge date: RFC 3339, or a bare `YYYY-MM-DD` taken as UTC midnight.
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or(ValidationError::InvalidFormat {
            field: "date",
            reason: "expected an RFC 3339 timestamp or YYYY-MM-DD",
        })
}

/// serde adapter for request dates
pub mod date_format {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// serde adapter for optional request dates
pub mod optional_date_format {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse_date(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 128,
        };
        assert_eq!(
            err.to_string(),
            "name exceeds maximum length of 128 characters"
        );
    }

    #[test]
    fn names() {
        assert!(check_name("name", "Downtown Club").is_ok());
        assert_eq!(
            check_name("name", "   "),
            Err(ValidationError::Empty { field: "name" })
        );
        assert!(matches!(
            check_name("name", &"x".repeat(129)),
            Err(ValidationError::TooLong { max: 128, .. })
        ));
    }

    #[test]
    fn ranges_reject_nan() {
        assert!(check_range("lat", 45.0, -90.0, 90.0).is_ok());
        assert!(check_range("lat", 90.5, -90.0, 90.0).is_err());
        assert!(check_range("lat", f64::NAN, -90.0, 90.0).is_err());
    }

    #[test]
    fn dates() {
        let date = parse_date("2024-01-01").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 1));
        assert_eq!(date.hour(), 0);

        let ts = parse_date("2024-03-05T18:30:00+02:00").unwrap();
        assert_eq!(ts.hour(), 16);

        assert!(matches!(
            parse_date("next tuesday"),
            Err(ValidationError::InvalidFormat { field: "date", .. })
        ));
    }
}
