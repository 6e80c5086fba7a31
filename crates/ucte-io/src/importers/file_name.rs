//! Metadata carried by the standard UCTE file name.
//!
//! `YYYYMMDD_HHMM_<TT><D>_<AA><V>[_CO].UCT`, case-insensitive:
//!
//! | part | meaning |
//! |------|---------|
//! | `YYYYMMDD_HHMM` | reference date and time |
//! | `TT` | `FO` forecast, `SN` snapshot, `RE` reference, `LR` long-term reference, `00`-`24` hour-ahead |
//! | `D` | day of week, 1 = Monday |
//! | `AA` | area code from the country table |
//! | `V` | version digit |
//! | `_CO` | congestion forecast marker |

use std::fmt;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use ucte_core::{CountryTable, UcteError, UcteResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    /// `FO`: day-ahead forecast
    Forecast,
    /// `SN`: snapshot
    Snapshot,
    /// `RE`: reference
    Reference,
    /// `LR`: long-term reference
    LongTermReference,
    /// `00`-`24`: forecast for the given number of hours ahead
    HoursAhead(u8),
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusinessType::Forecast => f.write_str("FO"),
            BusinessType::Snapshot => f.write_str("SN"),
            BusinessType::Reference => f.write_str("RE"),
            BusinessType::LongTermReference => f.write_str("LR"),
            BusinessType::HoursAhead(hours) => write!(f, "{:02}", hours),
        }
    }
}

impl BusinessType {
    fn parse(code: &str) -> Option<Self> {
        match code {
            "FO" => Some(BusinessType::Forecast),
            "SN" => Some(BusinessType::Snapshot),
            "RE" => Some(BusinessType::Reference),
            "LR" => Some(BusinessType::LongTermReference),
            digits => digits
                .parse::<u8>()
                .ok()
                .filter(|hours| *hours <= 24 && digits.bytes().all(|b| b.is_ascii_digit()))
                .map(BusinessType::HoursAhead),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileNameMetadata {
    pub timestamp: NaiveDateTime,
    pub business_type: BusinessType,
    /// 1 = Monday ... 7 = Sunday
    pub week_day: u8,
    pub area: String,
    pub version: u8,
    /// `_CO` suffix present
    pub congestion: bool,
}

impl FileNameMetadata {
    /// Parse the file name component of a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> UcteResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                UcteError::FileName(format!("'{}' has no file name", path.display()))
            })?;
        parse_file_name(name)
    }
}

fn invalid(name: &str, reason: &str) -> UcteError {
    UcteError::FileName(format!("'{}': {}", name, reason))
}

fn digits(part: &str, name: &str, what: &str) -> UcteResult<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(name, &format!("{} must be numeric", what)));
    }
    part.parse()
        .map_err(|_| invalid(name, &format!("{} must be numeric", what)))
}

/// Parse a standard UCTE file name.
pub fn parse_file_name(name: &str) -> UcteResult<FileNameMetadata> {
    let upper = name.to_ascii_uppercase();
    let stem = upper
        .strip_suffix(".UCT")
        .ok_or_else(|| invalid(name, "expected .uct extension"))?;
    let (stem, congestion) = match stem.strip_suffix("_CO") {
        Some(stem) => (stem, true),
        None => (stem, false),
    };

    let parts: Vec<&str> = stem.split('_').collect();
    let [date, time, kind, origin] = parts.as_slice() else {
        return Err(invalid(
            name,
            "expected YYYYMMDD_HHMM_<type><day>_<area><version>",
        ));
    };

    if date.len() != 8 || time.len() != 4 || !date.is_ascii() || !time.is_ascii() {
        return Err(invalid(name, "expected YYYYMMDD_HHMM timestamp"));
    }
    let year = digits(&date[..4], name, "year")?;
    let month = digits(&date[4..6], name, "month")?;
    let day = digits(&date[6..], name, "day")?;
    let hour = digits(&time[..2], name, "hour")?;
    let minute = digits(&time[2..], name, "minute")?;
    let timestamp = NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .ok_or_else(|| invalid(name, "timestamp is not a valid date and time"))?;

    if kind.len() != 3 || !kind.is_ascii() {
        return Err(invalid(name, "expected business type and day of week"));
    }
    let business_type = BusinessType::parse(&kind[..2])
        .ok_or_else(|| invalid(name, "unknown business type"))?;
    let week_day = digits(&kind[2..], name, "day of week")?;
    if !(1..=7).contains(&week_day) {
        return Err(invalid(name, "day of week must be 1-7"));
    }

    if origin.len() != 3 || !origin.is_ascii() {
        return Err(invalid(name, "expected area code and version"));
    }
    let area = &origin[..2];
    if !CountryTable.is_known_code(area) {
        return Err(invalid(name, &format!("unknown area code {}", area)));
    }
    let version = digits(&origin[2..], name, "version")?;

    Ok(FileNameMetadata {
        timestamp,
        business_type,
        week_day: week_day as u8,
        area: area.to_string(),
        version: version as u8,
        congestion,
    })
}
