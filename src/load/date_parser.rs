use chrono::{NaiveDate, SecondsFormat, TimeZone, Utc};

/// Format of the date column in the input export.
pub const INPUT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Parse `"MM/dd/yyyy"` → `"yyyy-MM-ddT00:00:00.000Z"` (midnight UTC)
pub fn parse_input_date(s: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(s, INPUT_DATE_FORMAT).ok()?;
    let naive = date.and_hms_opt(0, 0, 0)?;
    Some(
        Utc.from_utc_datetime(&naive)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}
