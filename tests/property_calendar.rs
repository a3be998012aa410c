//! Property tests for calendar decoding against chrono.

mod common;

use alice_timer::calendar::{days_in_month, is_leap_year};
use alice_timer::decode;
use chrono::{DateTime, Datelike, Timelike};
use common::{init_test_logging, test_proptest_config};
use proptest::prelude::*;

/// 0001-01-01T00:00:00Z
const YEAR_1_MS: i64 = -62_135_596_800_000;
/// 9999-12-31T23:59:59.999Z
const YEAR_9999_MS: i64 = 253_402_300_799_999;

proptest! {
    #![proptest_config(test_proptest_config(2000))]

    #[test]
    fn decode_matches_chrono(ms in YEAR_1_MS..=YEAR_9999_MS) {
        init_test_logging();
        let expected = DateTime::from_timestamp_millis(ms).expect("in chrono range");
        let f = decode(ms);

        prop_assert_eq!(f.year, expected.year());
        prop_assert_eq!(u32::from(f.month), expected.month());
        prop_assert_eq!(u32::from(f.day), expected.day());
        prop_assert_eq!(u32::from(f.hour), expected.hour());
        prop_assert_eq!(u32::from(f.minute), expected.minute());
        prop_assert_eq!(u32::from(f.second), expected.second());
        prop_assert_eq!(u32::from(f.millisecond), expected.timestamp_subsec_millis());
    }

    #[test]
    fn fields_stay_in_range(ms in -1_000_000_000_000_000i64..1_000_000_000_000_000) {
        let f = decode(ms);
        prop_assert!((1..=12).contains(&f.month));
        let month_len = days_in_month(i64::from(f.year), f.month).expect("valid month");
        prop_assert!(f.day >= 1 && f.day <= month_len);
        prop_assert!(f.hour < 24);
        prop_assert!(f.minute < 60);
        prop_assert!(f.second < 60);
        prop_assert!(f.millisecond < 1000);
    }

    #[test]
    fn next_day_is_adjacent(days in -700_000i64..3_000_000) {
        let ms = days * 86_400_000;
        let today = decode(ms);
        let tomorrow = decode(ms + 86_400_000);
        let month_len = days_in_month(i64::from(today.year), today.month).expect("valid month");

        if today.day < month_len {
            prop_assert_eq!((tomorrow.year, tomorrow.month, tomorrow.day), (today.year, today.month, today.day + 1));
        } else if today.month < 12 {
            prop_assert_eq!((tomorrow.year, tomorrow.month, tomorrow.day), (today.year, today.month + 1, 1));
        } else {
            prop_assert_eq!((tomorrow.year, tomorrow.month, tomorrow.day), (today.year + 1, 1, 1));
        }
    }
}

#[test]
fn leap_day_only_in_leap_years() {
    init_test_logging();
    for year in 1970..=2400i64 {
        let expected = if is_leap_year(year) { 29 } else { 28 };
        assert_eq!(days_in_month(year, 2), Some(expected), "year {year}");
    }
}
