use proptest::prelude::*;
use proptest::test_runner::FileFailurePersistence;
use rentals_page::{
    DistanceEstimate, delivery_surcharge, estimate, format_currency, lookup_distance,
    normalize_city, parse_miles, parse_quantity, subtotal, total,
};

const PRICING_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/pricing_property_fuzz_test.txt";
const DEFAULT_PRICING_PROPTEST_CASES: u32 = 256;

fn pricing_proptest_cases() -> u32 {
    std::env::var("RENTALS_PAGE_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_PRICING_PROPTEST_CASES)
}

fn quantities_strategy() -> BoxedStrategy<[u32; 4]> {
    [0u32..500, 0u32..500, 0u32..500, 0u32..500].boxed()
}

fn as_pairs(q: [u32; 4]) -> [(&'static str, u32); 4] {
    [
        ("white-chairs", q[0]),
        ("adult-tables", q[1]),
        ("kids-chairs", q[2]),
        ("kids-tables", q[3]),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: pricing_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(PRICING_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn subtotal_matches_the_price_list_algebra(q in quantities_strategy()) {
        let expected = 1.50 * f64::from(q[0])
            + 10.00 * f64::from(q[1])
            + 3.00 * f64::from(q[2])
            + 10.00 * f64::from(q[3]);
        prop_assert_eq!(subtotal(&as_pairs(q)), expected);
    }

    #[test]
    fn subtotal_is_never_negative(q in quantities_strategy()) {
        prop_assert!(subtotal(&as_pairs(q)) >= 0.0);
    }

    #[test]
    fn surcharge_is_free_up_to_eight_miles(miles in 0.0f64..=8.0) {
        prop_assert_eq!(delivery_surcharge(miles), 0.0);
    }

    #[test]
    fn surcharge_bills_round_trip_beyond_eight_miles(miles in 8.0f64..1_000.0) {
        prop_assert_eq!(delivery_surcharge(miles), (miles - 8.0) * 6.0);
    }

    #[test]
    fn total_is_monotone_in_every_quantity(q in quantities_strategy(), bump in 0usize..4) {
        let base = total(&as_pairs(q), 0.0);
        let mut bumped = q;
        bumped[bump] += 1;
        prop_assert!(total(&as_pairs(bumped), 0.0) >= base);
    }

    #[test]
    fn total_is_monotone_in_miles(q in quantities_strategy(), m1 in 0.0f64..500.0, m2 in 0.0f64..500.0) {
        let (lo, hi) = if m1 <= m2 { (m1, m2) } else { (m2, m1) };
        prop_assert!(total(&as_pairs(q), lo) <= total(&as_pairs(q), hi));
    }

    #[test]
    fn parsed_quantities_never_go_negative(raw in ".{0,12}") {
        let _ = parse_quantity(&raw);
        // the return type is unsigned; the property is that parsing never
        // panics and mileage never comes back negative or non-finite
        let miles = parse_miles(&raw);
        prop_assert!(miles >= 0.0 && miles.is_finite());
    }

    #[test]
    fn currency_strings_always_carry_two_decimals(amount in 0.0f64..100_000.0) {
        let formatted = format_currency(amount);
        prop_assert!(formatted.starts_with('$'));
        let decimals = formatted.split('.').nth(1).map(str::len);
        prop_assert_eq!(decimals, Some(2));
    }

    #[test]
    fn city_normalization_is_idempotent(raw in "[ A-Za-z]{0,20}") {
        let once = normalize_city(&raw);
        prop_assert_eq!(normalize_city(&once), once.clone());
        // lookups agree with the estimate classification
        match estimate(&raw) {
            DistanceEstimate::Empty => prop_assert!(once.is_empty()),
            DistanceEstimate::Known(miles) => {
                prop_assert_eq!(lookup_distance(&raw), Some(miles));
            }
            DistanceEstimate::Unknown => prop_assert_eq!(lookup_distance(&raw), None),
        }
    }
}
