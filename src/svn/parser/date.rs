//! Date parsing shared by all svn output formats

use chrono::{DateTime, Utc};

/// Parse a date as printed by svn
///
/// Accepts the XML form (`2024-01-10T12:00:00.000000Z`) and the text form
/// (`2024-01-10 12:00:00 +0000 (Wed, 10 Jan 2024)`).
pub(super) fn parse_svn_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    // Drop the human-readable "(Wed, 10 Jan 2024)" suffix
    let head = value.split(" (").next().unwrap_or(value).trim();
    DateTime::parse_from_str(head, "%Y-%m-%d %H:%M:%S %z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_xml_date() {
        let dt = parse_svn_date("2024-01-10T12:00:00.123456Z").unwrap();
        assert_eq!(
            dt.timestamp(),
            Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn test_parse_text_date_with_offset() {
        let dt = parse_svn_date("2024-01-10 14:00:00 +0200 (Wed, 10 Jan 2024)").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_text_date_without_suffix() {
        let dt = parse_svn_date("2024-01-10 12:00:00 +0000").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_invalid_date() {
        assert_eq!(parse_svn_date(""), None);
        assert_eq!(parse_svn_date("yesterday"), None);
        assert_eq!(parse_svn_date("10/01/2024"), None);
    }
}
