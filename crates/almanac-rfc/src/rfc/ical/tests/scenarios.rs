//! End-to-end behavior of the normalizer, validator and codec together.

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use crate::error::RfcError;
use crate::rfc::ical::build::{escape_text, fold, fold_line};
use crate::rfc::ical::core::{Instant, LOCAL_TIME_MARKER, Parameters, PropertyValue, Zone};
use crate::rfc::ical::datetime::{format, format_value, normalize};
use crate::rfc::ical::parse::{split_lines, unescape_text};
use crate::rfc::ical::validation::assert_in_sequence;

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

#[test_log::test]
fn floating_input_stays_floating() {
    let pv = normalize("DTSTART", PropertyValue::new("20220403T101500"), false).unwrap();

    let instant = pv.instant().unwrap();
    assert_eq!(*instant, Instant::floating(dt(2022, 4, 3, 10, 15, 0)));
    assert!(pv.has_param_key(LOCAL_TIME_MARKER));
    assert!(!pv.has_param_key("TZID"));
    assert_eq!(format_value(&pv).unwrap(), "20220403T101500");
}

#[test_log::test]
fn utc_input_keeps_z() {
    let pv = normalize("DTSTART", PropertyValue::new("20220403T081500Z"), false).unwrap();

    assert_eq!(pv.instant().unwrap().zone(), Some(Zone::Utc));
    assert!(pv.params.is_empty());
    assert_eq!(format_value(&pv).unwrap(), "20220403T081500Z");
}

#[test]
fn same_zone_out_of_sequence() {
    let start = Instant::zoned(dt(2022, 4, 3, 10, 0, 0), Tz::Europe__Stockholm);
    let dependent = Instant::zoned(dt(2022, 4, 2, 23, 0, 0), Tz::Europe__Stockholm);

    let err = assert_in_sequence(&start, &dependent, "DTEND").unwrap_err();
    assert!(matches!(err, RfcError::OutOfSequence { ref property, .. } if property == "DTEND"));
    assert!(assert_in_sequence(&dependent, &start, "DTEND").is_ok());
}

#[test]
fn sequence_compares_elapsed_time_across_zones() {
    // 10:00 in Stockholm is 04:00 in New York
    let start = Instant::zoned(dt(2022, 4, 3, 10, 0, 0), Tz::Europe__Stockholm);
    let same = Instant::zoned(dt(2022, 4, 3, 4, 0, 0), Tz::America__New_York);
    let earlier = Instant::zoned(dt(2022, 4, 3, 3, 59, 0), Tz::America__New_York);

    assert!(assert_in_sequence(&start, &same, "DTEND").is_ok());
    assert!(assert_in_sequence(&start, &earlier, "DTEND").is_err());
}

#[test]
fn seventy_six_octets_fold_once() {
    let line = "a".repeat(76);
    let folded = fold_line(&line);

    assert_eq!(folded, format!("{}\r\n a\r\n", "a".repeat(75)));
    assert_eq!(split_lines(&folded).unwrap(), vec![(1, line)]);
}

#[test]
fn fold_then_unfold_restores_logical_lines() {
    let summary = "Квартальный обзор, этап 2; подробности в приложении ".repeat(3);
    let rendered = fold("SUMMARY", &Parameters::new(), &escape_text(&summary));

    for physical in rendered.split_terminator("\r\n") {
        assert!(physical.len() <= 75, "{physical:?} is {} octets", physical.len());
    }

    let logical = split_lines(&rendered).unwrap();
    assert_eq!(logical.len(), 1);
    let (_, line) = &logical[0];
    let value = line.strip_prefix("SUMMARY:").unwrap();
    assert_eq!(unescape_text(value), summary);
}

#[test]
fn escaping_is_inverted_by_unescaping() {
    for text in [
        "plain",
        "comma, semicolon; backslash \\ done",
        "two\nlines",
        "\\n is not a newline here",
        "",
    ] {
        assert_eq!(unescape_text(&escape_text(text)), text, "{text:?}");
    }
}

#[test]
fn rendered_values_reparse_to_the_same_time() {
    let inputs = [
        PropertyValue::new("20220403T101500"),
        PropertyValue::new("20220403"),
        PropertyValue::new("20220403T101500").param("TZID", "Europe/Stockholm"),
        PropertyValue::new("2022-04-03 10:15:00 +0530"),
        PropertyValue::new("2022-04-03 10:15:00 America/New_York"),
    ];

    for input in inputs {
        let once = normalize("DTSTART", input.clone(), false).unwrap();
        let rendered = format_value(&once).unwrap();
        let reparsed = PropertyValue::with_params(rendered.as_str(), once.params.clone());
        let twice = normalize("DTSTART", reparsed, false).unwrap();

        assert_eq!(format_value(&twice).unwrap(), rendered, "{input:?}");
        assert_eq!(
            twice.instant().unwrap().to_utc(),
            once.instant().unwrap().to_utc(),
            "{input:?}"
        );
    }
}

#[test]
fn forced_utc_never_renders_a_zone() {
    let inputs = [
        PropertyValue::new("20220403T101500"),
        PropertyValue::new("20220403T101500").param("TZID", "America/New_York"),
        PropertyValue::new("2022-04-03T10:15:00+02:00"),
        PropertyValue::new("20220403T101500 Eastern Standard Time"),
    ];

    for input in inputs {
        let pv = normalize("DTSTAMP", input.clone(), true).unwrap();
        assert!(pv.instant().unwrap().is_utc(), "{input:?}");
        assert!(!pv.has_param_key("TZID"));
        assert!(!pv.is_local_time());
        assert!(format_value(&pv).unwrap().ends_with('Z'));
    }
}

#[test]
fn dates_carry_no_zone() {
    let inputs = [
        PropertyValue::new("20220403").param("TZID", "Europe/Stockholm"),
        PropertyValue::new("20220403T235000Z").param("VALUE", "DATE"),
        PropertyValue::new("April 3, 2022"),
    ];

    for input in inputs {
        let pv = normalize("DTSTART", input.clone(), false).unwrap();
        let instant = pv.instant().unwrap();
        assert!(instant.is_date(), "{input:?}");
        assert_eq!(instant.zone(), None);
        assert!(!pv.has_param_key("TZID"));
        assert!(!pv.is_local_time());
        assert!(pv.is_date_kind());
        assert_eq!(format(instant, true, false), "20220403");
    }
}

#[test]
fn tzid_parameter_overrides_inline_zone() {
    // 10:15 UTC read into Stockholm summer time
    let pv = normalize(
        "DTSTART",
        PropertyValue::new("20220403T101500Z").param("TZID", "Europe/Stockholm"),
        false,
    )
    .unwrap();

    assert_eq!(
        *pv.instant().unwrap(),
        Instant::zoned(dt(2022, 4, 3, 12, 15, 0), Tz::Europe__Stockholm)
    );
    assert_eq!(pv.get_param("TZID"), Some("Europe/Stockholm"));
}

#[test]
fn unknown_zone_is_an_error() {
    let err = normalize(
        "DTSTART",
        PropertyValue::new("20220403T101500").param("TZID", "Nowhere/Special"),
        false,
    )
    .unwrap_err();
    assert!(matches!(err, RfcError::UnknownTimezone { ref tzid, .. } if tzid == "Nowhere/Special"));
}
