//! Archive-level header attributes: `FileFormat`, `FormatVersion`,
//! `Writable`, `Created`, `Updated`.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{Error, Result};

/// Value stamped into the `FileFormat` attribute of every SDA archive.
pub const FILE_FORMAT: &str = "SDA";

/// The only two `FormatVersion` values this crate understands.
pub const SUPPORTED_FORMAT_VERSIONS: [&str; 2] = ["1.0", "1.1"];

/// `FormatVersion` written by this crate whenever an archive is created
/// or modified, regardless of which version the archive started with.
pub const CURRENT_FORMAT_VERSION: &str = "1.1";

/// `"%d-%b-%Y %H:%M:%S"`, e.g. `"15-Jun-2024 14:30:45"`.
const DATE_FORMAT: &str = "%d-%b-%Y %H:%M:%S";

/// Date-only form used when the time-of-day component is exactly
/// midnight, e.g. `"15-Jun-2024"`.
const DATE_FORMAT_SHORT: &str = "%d-%b-%Y";

/// Formats a timestamp the way SDA header attributes expect: date-only
/// when the time is exactly midnight, otherwise date and time.
#[must_use]
pub fn format_date(dt: DateTime<Utc>) -> String {
    let naive = dt.naive_utc();
    if naive.time() == chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap() {
        naive.format(DATE_FORMAT_SHORT).to_string()
    } else {
        naive.format(DATE_FORMAT).to_string()
    }
}

/// Parses a header date string in either the long or short form.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let trimmed = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc));
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, DATE_FORMAT_SHORT) {
        let dt = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc));
    }
    Err(Error::corrupt(format!("invalid date string: {trimmed:?}")))
}

/// Returns `true` if `s` is a value this crate accepts for `FileFormat`.
#[must_use]
pub fn is_valid_file_format(s: &str) -> bool {
    s == FILE_FORMAT
}

/// Returns `true` if `s` is one of the supported `FormatVersion` values.
#[must_use]
pub fn is_valid_format_version(s: &str) -> bool {
    SUPPORTED_FORMAT_VERSIONS.contains(&s)
}

/// Returns `true` if `s` is a valid `Writable` attribute value.
#[must_use]
pub fn is_valid_writable(s: &str) -> bool {
    s == "yes" || s == "no"
}

/// Returns `true` if `s` parses as a valid header date in either form.
#[must_use]
pub fn is_valid_date(s: &str) -> bool {
    parse_date(s).is_ok()
}

/// The full set of header attributes an archive carries at the top
/// level of the HDF5 file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Always `"SDA"` for a valid archive.
    pub file_format: String,
    /// `"1.0"` or `"1.1"`.
    pub format_version: String,
    /// Whether mutating operations are permitted.
    pub writable: bool,
    /// When the archive was first created, formatted per [`format_date`].
    pub created: String,
    /// When the archive was last modified, formatted per [`format_date`].
    pub updated: String,
}

impl Header {
    /// Builds a fresh header for a newly created archive.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        let stamp = format_date(now);
        Header {
            file_format: FILE_FORMAT.to_string(),
            format_version: CURRENT_FORMAT_VERSION.to_string(),
            writable: true,
            created: stamp.clone(),
            updated: stamp,
        }
    }

    /// Validates that this header describes a well-formed SDA archive.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_file_format(&self.file_format) {
            return Err(Error::corrupt(format!(
                "unexpected FileFormat {:?}, expected {:?}",
                self.file_format, FILE_FORMAT
            )));
        }
        if !is_valid_format_version(&self.format_version) {
            return Err(Error::corrupt(format!(
                "unsupported FormatVersion {:?}",
                self.format_version
            )));
        }
        if !is_valid_date(&self.created) {
            return Err(Error::corrupt(format!(
                "invalid Created date {:?}",
                self.created
            )));
        }
        if !is_valid_date(&self.updated) {
            return Err(Error::corrupt(format!(
                "invalid Updated date {:?}",
                self.updated
            )));
        }
        Ok(())
    }

    /// Stamps `Updated` with `now` and upgrades `FormatVersion` to the
    /// current version, mirroring what every mutating archive operation
    /// does to the on-disk header.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated = format_date(now);
        self.format_version = CURRENT_FORMAT_VERSION.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_with_time_when_not_midnight() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 45).unwrap();
        assert_eq!(format_date(dt), "15-Jun-2024 14:30:45");
    }

    #[test]
    fn formats_date_only_at_midnight() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
        assert_eq!(format_date(dt), "15-Jun-2024");
    }

    #[test]
    fn parses_both_forms() {
        assert!(parse_date("15-Jun-2024 14:30:45").is_ok());
        assert!(parse_date("15-Jun-2024").is_ok());
        assert!(parse_date("not a date").is_err());
    }

    #[test]
    fn validates_known_format_versions() {
        assert!(is_valid_format_version("1.0"));
        assert!(is_valid_format_version("1.1"));
        assert!(!is_valid_format_version("2.0"));
    }

    #[test]
    fn header_roundtrips_through_touch() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut header = Header::new(created);
        assert_eq!(header.format_version, "1.1");
        header.validate().unwrap();

        let updated = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        header.touch(updated);
        assert_eq!(header.updated, "01-Feb-2024 09:00:00");
        assert_eq!(header.created, "01-Jan-2024");
    }
}
