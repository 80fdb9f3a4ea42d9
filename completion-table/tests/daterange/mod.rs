use completion_table::{resolve_date_range_label, DateFormatter, DateRange, Timestamp};
use proptest::prelude::*;

struct IsoFormatter;

impl DateFormatter for IsoFormatter {
    fn format_short_date_time(&self, timestamp: Timestamp) -> String {
        format!("@{timestamp}")
    }
}

fn range_around() -> impl Strategy<Value = (Timestamp, Timestamp, Timestamp)> {
    (-1_000_000_000i64..1_000_000_000, 0i64..1_000_000)
        .prop_flat_map(|(start, len)| (Just(start), Just(start + len), start..=start + len))
}

proptest! {
    #[test]
    fn prop_single_enabled_match_wins(
        (start, end, t) in range_around(),
        gap in 1i64..1_000,
    ) {
        let ranges = vec![
            DateRange::new(start, end, "Off").disabled(),
            DateRange::new(end + gap, end + gap + 10, "Later"),
            DateRange::new(start, end, "Target"),
            DateRange::new(start - gap - 10, start - gap, "Earlier"),
        ];
        prop_assert_eq!(
            resolve_date_range_label(Some(t), &ranges, "Fallback", &IsoFormatter),
            "Target"
        );
    }

    #[test]
    fn prop_earliest_listed_overlap_wins(
        (start, end, t) in range_around(),
        widen in 0i64..1_000,
    ) {
        let ranges = vec![
            DateRange::new(start - widen, end + widen, "Wide"),
            DateRange::new(start, end, "Narrow"),
        ];
        prop_assert_eq!(
            resolve_date_range_label(Some(t), &ranges, "", &IsoFormatter),
            "Wide"
        );
    }

    #[test]
    fn prop_unmatched_uses_fallback_then_formatter(
        (start, end, _t) in range_around(),
        past in 1i64..1_000_000,
        fallback in "[a-zA-Z ]{1,20}",
    ) {
        let ranges = vec![DateRange::new(start, end, "Inside")];
        let outside = end + past;
        prop_assume!(outside != 0);

        prop_assert_eq!(
            resolve_date_range_label(Some(outside), &ranges, &fallback, &IsoFormatter),
            fallback
        );
        prop_assert_eq!(
            resolve_date_range_label(Some(outside), &ranges, "", &IsoFormatter),
            format!("@{outside}")
        );
    }
}

#[test]
fn absent_timestamp_is_a_single_space() {
    let ranges = vec![DateRange::new(0, 10, "x")];
    assert_eq!(resolve_date_range_label(None, &ranges, "fb", &IsoFormatter), " ");
}
