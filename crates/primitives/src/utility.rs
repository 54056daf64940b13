use chrono::{DateTime, Utc};

/// Canonical timestamp rendering for realtime payloads and export rows.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Status column rendering shared by all export kinds.
pub fn format_status(is_success: bool) -> &'static str {
    if is_success {
        "Success"
    } else {
        "Failed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_uses_space_separated_format() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(format_timestamp(&ts), "2025-03-09 14:05:07");
    }

    #[test]
    fn status_renders_success_or_failed() {
        assert_eq!(format_status(true), "Success");
        assert_eq!(format_status(false), "Failed");
    }
}
