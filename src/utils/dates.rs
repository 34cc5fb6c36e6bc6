use crate::error::{ProcessingError, Result};
use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 3] = ["%Y%m%d", "%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a calendar date from compact (`20220101`), ISO (`2022-01-01`),
/// slashed (`2022/01/01`) or ISO date-time strings. Only the date part is kept.
pub fn parse_flexible_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date());
        }
    }

    Err(ProcessingError::InvalidDate(input.to_string()))
}

/// Render the shared row timestamp, e.g. `2022-01-01T18:00:00Z`
pub fn format_base_datetime(date: NaiveDate, base_hour: u32) -> Result<String> {
    let datetime = date.and_hms_opt(base_hour, 0, 0).ok_or_else(|| {
        ProcessingError::Config(format!("Invalid base hour: {}", base_hour))
    })?;

    Ok(datetime.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

/// clap value parser for the `--date` argument
pub fn parse_date_arg(input: &str) -> std::result::Result<NaiveDate, String> {
    parse_flexible_date(input).map_err(|e| e.to_string())
}
