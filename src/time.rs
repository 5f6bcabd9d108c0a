//! # GPS time conversion
//!
//! Times are expressed as integer seconds since the GPS epoch
//! (1980-01-06 00:00:00 UTC). Unlike Unix time, GPS time counts leap seconds,
//! so converting a UTC calendar instant adds the number of leap seconds
//! inserted since the epoch.
//!
//! ```rust
//! use gwchannel::time::ToGps;
//!
//! assert_eq!(1126259462i64.to_gps()?, 1126259462);
//! assert_eq!("2017-01-01 00:00:00".to_gps()?, 1167264018);
//! # Ok::<(), gwchannel::time::TimeError>(())
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Unix timestamp of the GPS epoch
const GPS_EPOCH_UNIX: i64 = 315_964_800;

/// First day (year, month) of UTC after each leap second since the GPS epoch
const LEAP_SECONDS: &[(i32, u32)] = &[
    (1981, 7),
    (1982, 7),
    (1983, 7),
    (1985, 7),
    (1988, 1),
    (1990, 1),
    (1991, 1),
    (1992, 7),
    (1993, 7),
    (1994, 7),
    (1996, 1),
    (1997, 7),
    (1999, 1),
    (2006, 1),
    (2009, 1),
    (2012, 7),
    (2015, 7),
    (2017, 1),
];

/// Accepted calendar layouts for textual times, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%b %d %Y %H:%M:%S",
];

/// Errors converting a value to GPS time
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeError {
    /// Input can't be interpreted as a time
    #[error("Cannot interpret '{0}' as a GPS time")]
    InvalidTime(String),
}

/// Conversion to integer GPS seconds.
///
/// Numbers are taken to be GPS times already (floats are truncated towards
/// zero); calendar values are taken to be UTC.
pub trait ToGps {
    /// Convert to GPS seconds
    fn to_gps(&self) -> Result<i64, TimeError>;
}

impl ToGps for i64 {
    fn to_gps(&self) -> Result<i64, TimeError> {
        Ok(*self)
    }
}

impl ToGps for i32 {
    fn to_gps(&self) -> Result<i64, TimeError> {
        Ok(i64::from(*self))
    }
}

impl ToGps for u32 {
    fn to_gps(&self) -> Result<i64, TimeError> {
        Ok(i64::from(*self))
    }
}

impl ToGps for u64 {
    fn to_gps(&self) -> Result<i64, TimeError> {
        i64::try_from(*self).map_err(|_| TimeError::InvalidTime(self.to_string()))
    }
}

impl ToGps for f64 {
    fn to_gps(&self) -> Result<i64, TimeError> {
        if !self.is_finite() || self.abs() >= i64::MAX as f64 {
            return Err(TimeError::InvalidTime(self.to_string()));
        }
        Ok(self.trunc() as i64)
    }
}

impl ToGps for DateTime<Utc> {
    fn to_gps(&self) -> Result<i64, TimeError> {
        Ok(unix_to_gps(self.timestamp()))
    }
}

impl ToGps for NaiveDateTime {
    fn to_gps(&self) -> Result<i64, TimeError> {
        Utc.from_utc_datetime(self).to_gps()
    }
}

impl ToGps for NaiveDate {
    fn to_gps(&self) -> Result<i64, TimeError> {
        self.and_hms_opt(0, 0, 0)
            .ok_or_else(|| TimeError::InvalidTime(self.to_string()))?
            .to_gps()
    }
}

/// Text is read as a number if possible, otherwise as an RFC 3339 timestamp
/// or one of a few common UTC calendar layouts.
impl ToGps for str {
    fn to_gps(&self) -> Result<i64, TimeError> {
        let text = self.trim();
        if let Ok(seconds) = text.parse::<i64>() {
            return Ok(seconds);
        }
        if let Ok(seconds) = text.parse::<f64>() {
            return seconds.to_gps();
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return dt.with_timezone(&Utc).to_gps();
        }
        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
                return dt.to_gps();
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return date.to_gps();
        }
        Err(TimeError::InvalidTime(self.to_string()))
    }
}

impl ToGps for String {
    fn to_gps(&self) -> Result<i64, TimeError> {
        self.as_str().to_gps()
    }
}

impl<T: ToGps + ?Sized> ToGps for &T {
    fn to_gps(&self) -> Result<i64, TimeError> {
        (**self).to_gps()
    }
}

/// Convert a Unix timestamp to GPS seconds
pub fn unix_to_gps(unix: i64) -> i64 {
    unix - GPS_EPOCH_UNIX + leap_seconds_before(unix)
}

/// Leap seconds inserted between the GPS epoch and `unix`
fn leap_seconds_before(unix: i64) -> i64 {
    LEAP_SECONDS
        .iter()
        .filter_map(|&(year, month)| NaiveDate::from_ymd_opt(year, month, 1))
        .filter_map(|date| date.and_hms_opt(0, 0, 0))
        .filter(|leap| Utc.from_utc_datetime(leap).timestamp() <= unix)
        .count() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(1126259462i64.to_gps().unwrap(), 1126259462);
        assert_eq!(1126259462u32.to_gps().unwrap(), 1126259462);
        assert_eq!(1126259462.9f64.to_gps().unwrap(), 1126259462);
        assert_eq!("1126259462".to_gps().unwrap(), 1126259462);
        assert_eq!("1126259462.4".to_gps().unwrap(), 1126259462);
        assert!(f64::NAN.to_gps().is_err());
        assert!(u64::MAX.to_gps().is_err());
    }

    #[test]
    fn test_epoch() {
        assert_eq!("1980-01-06".to_gps().unwrap(), 0);
        assert_eq!(unix_to_gps(GPS_EPOCH_UNIX), 0);
    }

    #[test]
    fn test_known_instants() {
        // GW150914
        assert_eq!("2015-09-14 09:50:45".to_gps().unwrap(), 1126259462);
        assert_eq!("2015-09-14T09:50:45Z".to_gps().unwrap(), 1126259462);
        assert_eq!("Sep 14 2015 09:50:45".to_gps().unwrap(), 1126259462);
        assert_eq!("2017-01-01 00:00:00".to_gps().unwrap(), 1167264018);

        let dt = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(dt.to_gps().unwrap(), 630720013);
    }

    #[test]
    fn test_invalid_text() {
        assert_eq!(
            "yesterday-ish".to_gps(),
            Err(TimeError::InvalidTime("yesterday-ish".to_string()))
        );
    }
}
