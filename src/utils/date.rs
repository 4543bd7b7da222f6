use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unparseable date '{0}'")]
pub struct DateError(pub String);

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%d %B %Y"];
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Reduces a user-supplied date to its calendar day in UTC.
///
/// Timestamps with an offset are shifted to UTC before the day is taken, so
/// `2023-05-10T23:00:00-05:00` is `2023-05-11`. Bare dates and timestamps
/// without an offset are read as UTC. Feeding the result back in yields the
/// same value.
pub fn normalize_date(raw: &str) -> Result<NaiveDate, DateError> {
    let s = raw.trim();

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| DateError(raw.to_string()))
}
