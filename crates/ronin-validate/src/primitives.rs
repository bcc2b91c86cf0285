//! FHIR R4 primitive format checks.
//!
//! Regexes follow the R4 datatype definitions; partial dates are allowed for
//! `date` and `dateTime`, full dates are also checked against the calendar.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

use crate::issue::{Issue, PrimitiveKind};
use crate::path::ElementPath;
use crate::validation::Validation;

/// Longest id R4 allows, tenant prefix included.
pub const MAX_ID_LENGTH: usize = 64;

static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-\.]{1,64}$").expect("Invalid FHIR id regex"));

static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1]))?)?$",
    )
    .expect("Invalid FHIR date regex")
});

static DATE_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1])(T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00)))?)?)?$",
    )
    .expect("Invalid FHIR dateTime regex")
});

static INSTANT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)-(0[1-9]|1[0-2])-(0[1-9]|[1-2][0-9]|3[0-1])T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00))$",
    )
    .expect("Invalid FHIR instant regex")
});

pub fn is_valid_id(value: &str) -> bool {
    ID_REGEX.is_match(value)
}

pub fn is_valid_date(value: &str) -> bool {
    DATE_REGEX.is_match(value) && calendar_date_exists(value)
}

pub fn is_valid_date_time(value: &str) -> bool {
    DATE_TIME_REGEX.is_match(value) && calendar_date_exists(value)
}

pub fn is_valid_instant(value: &str) -> bool {
    INSTANT_REGEX.is_match(value) && DateTime::parse_from_rfc3339(value).is_ok()
}

/// Any non-empty string without whitespace.
pub fn is_valid_uri(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_whitespace)
}

pub fn is_valid(kind: PrimitiveKind, value: &str) -> bool {
    match kind {
        PrimitiveKind::Id => is_valid_id(value),
        PrimitiveKind::DateTime => is_valid_date_time(value),
        PrimitiveKind::Date => is_valid_date(value),
        PrimitiveKind::Instant => is_valid_instant(value),
        PrimitiveKind::Uri => is_valid_uri(value),
    }
}

/// Partial dates (`YYYY`, `YYYY-MM`) always exist; full dates must be real days.
fn calendar_date_exists(value: &str) -> bool {
    match value.get(..10) {
        Some(day) if day.len() == 10 => NaiveDate::parse_from_str(day, "%Y-%m-%d").is_ok(),
        _ => true,
    }
}

/// Records `R4_INV_PRIM` when a present value is malformed.
pub fn check_primitive(
    validation: &mut Validation,
    kind: PrimitiveKind,
    value: Option<&str>,
    location: &ElementPath,
) {
    if let Some(value) = value
        && !is_valid(kind, value)
    {
        validation.push(
            Issue::InvalidPrimitive {
                value: value.to_string(),
                kind,
            },
            location.clone(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ids() {
        assert!(is_valid_id("12345"));
        assert!(is_valid_id("test-12345"));
        assert!(is_valid_id("a.b-C"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("has space"));
        assert!(!is_valid_id("under_score"));
        assert!(is_valid_id(&"x".repeat(MAX_ID_LENGTH)));
        assert!(!is_valid_id(&"x".repeat(MAX_ID_LENGTH + 1)));
    }

    #[test]
    fn partial_and_full_dates() {
        assert!(is_valid_date("2023"));
        assert!(is_valid_date("2023-02"));
        assert!(is_valid_date("2024-02-29"));
        assert!(!is_valid_date("2023-02-29"));
        assert!(!is_valid_date("2023-13"));
        assert!(!is_valid_date("2023-01-01T00:00:00Z"));
    }

    #[test]
    fn date_times_require_zone_with_time() {
        assert!(is_valid_date_time("2023-01-02T03:04:05Z"));
        assert!(is_valid_date_time("2023-01-02T03:04:05.123-05:00"));
        assert!(is_valid_date_time("2023-01"));
        assert!(!is_valid_date_time("2023-01-02T03:04:05"));
        assert!(!is_valid_date_time("2023-04-31T03:04:05Z"));
    }

    #[test]
    fn instants_are_complete() {
        assert!(is_valid_instant("2023-01-02T03:04:05Z"));
        assert!(!is_valid_instant("2023-01-02"));
    }

    #[test]
    fn check_primitive_ignores_absent_values() {
        let mut validation = Validation::new();
        let path = ElementPath::root("Observation").field("issued");
        check_primitive(&mut validation, PrimitiveKind::Instant, None, &path);
        assert!(validation.is_empty());

        check_primitive(&mut validation, PrimitiveKind::Instant, Some("yesterday"), &path);
        assert_eq!(
            validation.issues()[0].to_string(),
            "ERROR R4_INV_PRIM: 'yesterday' is not a valid instant @ Observation.issued"
        );
    }

    proptest! {
        #[test]
        fn generated_ids_are_valid(id in "[A-Za-z0-9.-]{1,64}") {
            prop_assert!(is_valid_id(&id));
        }

        #[test]
        fn ordinary_calendar_days_are_valid_dates(
            year in 1900i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
        ) {
            let value = format!("{year:04}-{month:02}-{day:02}");
            prop_assert!(is_valid_date(&value));
            let timestamp = format!("{value}T12:00:00Z");
            prop_assert!(is_valid_date_time(&timestamp));
        }
    }
}
