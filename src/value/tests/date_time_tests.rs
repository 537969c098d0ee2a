//! Tests for the date and time value types

use crate::value::{DateValue, TimeValue};

#[test]
fn test_date_parse_both_forms() {
    let mut date = DateValue::default();
    date.read_str("20230415").unwrap();
    assert_eq!((date.year, date.month, date.day), (2023, 4, 15));

    let mut date = DateValue::default();
    date.read_str("2023-04-15").unwrap();
    assert_eq!((date.year, date.month, date.day), (2023, 4, 15));
    assert_eq!(date.to_string(), "2023-04-15");
}

#[test]
fn test_date_rejects_month_13() {
    let mut date = DateValue::default();
    date.read_str("20231301").unwrap();
    assert_eq!(date.month, 0);
    assert_eq!(date.day, 0);
    assert_eq!(date.to_i64(), None);
}

#[test]
fn test_date_rejects_day_32() {
    let mut date = DateValue::default();
    date.read_str("20230132").unwrap();
    assert_eq!((date.month, date.day), (0, 0));
    assert_eq!(date.to_i64(), None);
}

#[test]
fn test_date_rejects_feb_29_non_leap() {
    let mut date = DateValue::default();
    date.read_str("20230229").unwrap();
    assert_eq!((date.month, date.day), (0, 0));
    assert_eq!(date.to_i64(), None);
}

#[test]
fn test_date_accepts_feb_29_leap() {
    let mut date = DateValue::default();
    date.read_str("20240229").unwrap();
    assert_eq!((date.month, date.day), (2, 29));
    assert!(date.to_i64().is_some());
}

#[test]
fn test_date_epoch() {
    let mut date = DateValue::default();
    date.read_str("19700101").unwrap();
    assert_eq!(date.to_i64(), Some(0));

    let mut date = DateValue::default();
    date.read_str("19700102").unwrap();
    assert_eq!(date.to_i64(), Some(86400));
}

#[test]
fn test_date_malformed_is_an_error() {
    let mut date = DateValue::default();
    assert!(date.read_str("not-a-date").is_err());
    assert!(date.read_str("2023415").is_err());
}

#[test]
fn test_time_parse_forms() {
    let mut time = TimeValue::default();
    time.read_str("123456").unwrap();
    assert_eq!((time.hour, time.minute, time.second), (12, 34, 56));

    let mut time = TimeValue::default();
    time.read_str("12:34:56+02:00").unwrap();
    assert_eq!((time.tz_hour, time.tz_minute), (2, 0));
    assert_eq!(time.to_string(), "12:34:56+02:00");

    let mut time = TimeValue::default();
    time.read_str("123456-0530").unwrap();
    assert_eq!((time.tz_hour, time.tz_minute), (-5, -30));

    let mut time = TimeValue::default();
    time.read_str("12:34:56Z").unwrap();
    assert_eq!((time.tz_hour, time.tz_minute), (0, 0));
}

#[test]
fn test_time_rejects_out_of_range() {
    let mut time = TimeValue::default();
    time.read_str("250000").unwrap();
    assert_eq!(time, TimeValue::default());

    let mut time = TimeValue::default();
    time.read_str("126000").unwrap();
    assert_eq!(time, TimeValue::default());
}

#[test]
fn test_time_leap_second_boundary() {
    // :60 is a leap second and accepted; :61 is not
    let mut time = TimeValue::default();
    time.read_str("235960").unwrap();
    assert_eq!(time.second, 60);

    let mut time = TimeValue::default();
    time.read_str("235961").unwrap();
    assert_eq!(time, TimeValue::default());
}

#[test]
fn test_time_utc_second_of_day_wraps_negative() {
    // 00:30:00+02:00 is 22:30:00 UTC of the previous day
    let mut time = TimeValue::default();
    time.read_str("003000+0200").unwrap();
    assert_eq!(time.to_i64(), Some(22 * 3600 + 30 * 60));
}
