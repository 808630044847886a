//! Date normalization into the `DD/MM/YYYY` display form.
//!
//! Parse priority:
//! 1. typed values (`Calendar`, or a `Timestamp` inside chrono's range)
//! 2. strict `YYYY-MM-DD`
//! 3. RFC 3339 timestamps, which is how the producer's stored dates serialize
//!    (`2023-06-15T00:00:00.000Z`)
//!
//! Timestamps are read in UTC. `normalize` flattens both "missing" and
//! "unparseable" into [`NOT_PROVIDED`]; callers that need to tell them apart
//! use [`classify`].

use chrono::{DateTime, NaiveDate, Utc};

use crate::content::NOT_PROVIDED;
use crate::models::resume::DateValue;

const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// End marker for a position that is still held.
pub const PRESENT: &str = "Present";

/// Outcome of reading a date-like value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateOutcome {
    Missing,
    Unparseable(String),
    Parsed(NaiveDate),
}

impl DateOutcome {
    /// Display string: the formatted date, or the placeholder otherwise.
    pub fn display(&self) -> String {
        match self {
            DateOutcome::Parsed(date) => date.format(DISPLAY_FORMAT).to_string(),
            DateOutcome::Missing | DateOutcome::Unparseable(_) => NOT_PROVIDED.to_string(),
        }
    }
}

pub fn classify(value: Option<&DateValue>) -> DateOutcome {
    match value {
        None => DateOutcome::Missing,
        Some(DateValue::Calendar(date)) => DateOutcome::Parsed(*date),
        Some(DateValue::Timestamp(millis)) => match DateTime::<Utc>::from_timestamp_millis(*millis)
        {
            Some(instant) => DateOutcome::Parsed(instant.date_naive()),
            None => DateOutcome::Unparseable(millis.to_string()),
        },
        Some(DateValue::Text(raw)) => classify_text(raw),
    }
}

fn classify_text(raw: &str) -> DateOutcome {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DateOutcome::Missing;
    }
    if let Some(date) = parse_iso_date(trimmed) {
        return DateOutcome::Parsed(date);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return DateOutcome::Parsed(instant.with_timezone(&Utc).date_naive());
    }
    DateOutcome::Unparseable(raw.to_string())
}

/// Strict `YYYY-MM-DD`: exactly four, two and two ASCII digits.
fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Normalizes a date-like value to `DD/MM/YYYY`, or the placeholder. Never fails.
pub fn normalize(value: Option<&DateValue>) -> String {
    classify(value).display()
}

/// `"{start} - {end}"`; the end reads "Present" whenever `current` is set.
pub fn date_range(start: Option<&DateValue>, end: Option<&DateValue>, current: bool) -> String {
    let end = if current {
        PRESENT.to_string()
    } else {
        normalize(end)
    };
    format!("{} - {}", normalize(start), end)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> DateValue {
        DateValue::Text(s.to_string())
    }

    #[test]
    fn test_iso_string_formats_day_first() {
        assert_eq!(normalize(Some(&text("2023-06-15"))), "15/06/2023");
    }

    #[test]
    fn test_native_date_formats_day_first() {
        let calendar = DateValue::Calendar(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap());
        assert_eq!(normalize(Some(&calendar)), "15/06/2023");

        // 2023-06-15T00:00:00Z in epoch milliseconds
        let timestamp = DateValue::Timestamp(1_686_787_200_000);
        assert_eq!(normalize(Some(&timestamp)), "15/06/2023");
    }

    #[test]
    fn test_absent_is_placeholder() {
        assert_eq!(normalize(None), NOT_PROVIDED);
        assert_eq!(classify(None), DateOutcome::Missing);
    }

    #[test]
    fn test_garbage_is_placeholder() {
        assert_eq!(normalize(Some(&text("banana"))), NOT_PROVIDED);
        assert_eq!(
            classify(Some(&text("banana"))),
            DateOutcome::Unparseable("banana".to_string())
        );
    }

    #[test]
    fn test_producer_timestamp_string() {
        assert_eq!(
            normalize(Some(&text("2023-06-15T00:00:00.000Z"))),
            "15/06/2023"
        );
        // Offsets are converted to UTC before the calendar date is taken
        assert_eq!(
            normalize(Some(&text("2023-06-15T23:30:00-02:00"))),
            "16/06/2023"
        );
    }

    #[test]
    fn test_strict_iso_rejects_loose_shapes() {
        assert_eq!(normalize(Some(&text("2023-6-15"))), NOT_PROVIDED);
        assert_eq!(normalize(Some(&text("2023-02-30"))), NOT_PROVIDED);
        assert_eq!(normalize(Some(&text("+2023-06-15"))), NOT_PROVIDED);
    }

    #[test]
    fn test_blank_string_is_missing() {
        assert_eq!(classify(Some(&text("   "))), DateOutcome::Missing);
    }

    #[test]
    fn test_out_of_range_timestamp_is_unparseable() {
        let outcome = classify(Some(&DateValue::Timestamp(i64::MAX)));
        assert!(matches!(outcome, DateOutcome::Unparseable(_)));
        assert_eq!(outcome.display(), NOT_PROVIDED);
    }

    #[test]
    fn test_current_range_ends_in_present() {
        let range = date_range(Some(&text("2020-01-01")), Some(&text("2022-05-01")), true);
        assert_eq!(range, "01/01/2020 - Present");
        let closed = date_range(Some(&text("2020-01-01")), Some(&text("2022-05-01")), false);
        assert_eq!(closed, "01/01/2020 - 01/05/2022");
    }
}
