//! Metric extraction tests: fallback chains, release flag, defaults.

mod common;

use gamalytic_sdk::extract::Source;
use gamalytic_sdk::{extract, RawRecord, Scalar};
use serde_json::json;

fn record(value: serde_json::Value) -> RawRecord {
    RawRecord::new(value)
}

fn num(value: &Option<Scalar>) -> Option<f64> {
    value.as_ref().map(Scalar::to_number)
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn empty_record_uses_defaults() {
    let m = extract(&record(json!({})));
    assert!(!m.released);
    assert_eq!(m.copies_sold.to_number(), 0.0);
    assert!(m.revenue.is_none());
    assert!(m.review_score.is_none());
    assert!(m.review_count.is_none());
    assert!(m.wishlists.is_none());
    assert!(m.release_date.is_none());
    assert!(m.peak_players.is_none());
    assert!(m.current_players.is_none());
    assert!(m.price.is_none());
}

#[test]
fn non_object_record_uses_defaults() {
    let m = extract(&record(json!([1, 2, 3])));
    assert!(!m.released);
    assert_eq!(m.copies_sold.to_number(), 0.0);
    assert!(m.revenue.is_none());
}

#[test]
fn all_null_candidates_resolve_to_none() {
    let m = extract(&record(json!({
        "copiesSold": null,
        "owners": null,
        "estimateDetails": { "reviewBased": null, "revenue": null },
        "revenue": null,
        "totalRevenue": null,
        "grossRevenue": null,
        "netRevenue": null,
        "wishlists": null,
        "history": []
    })));
    assert_eq!(m.copies_sold.to_number(), 0.0);
    assert!(m.revenue.is_none());
    assert!(m.wishlists.is_none());
}

// ---------------------------------------------------------------------------
// Release flag
// ---------------------------------------------------------------------------

#[test]
fn explicit_false_unreleased_means_released() {
    let m = extract(&record(json!({ "unreleased": false, "copiesSold": 100 })));
    assert!(m.released);
    assert_eq!(m.copies_sold.to_number(), 100.0);
}

#[test]
fn missing_or_non_boolean_unreleased_means_not_released() {
    for value in [
        json!({}),
        json!({ "unreleased": true }),
        json!({ "unreleased": "false" }),
        json!({ "unreleased": 0 }),
        json!({ "unreleased": null }),
    ] {
        assert!(!extract::is_released(&record(value.clone())), "{}", value);
    }
}

// ---------------------------------------------------------------------------
// Fallback chains
// ---------------------------------------------------------------------------

#[test]
fn fallback_fields_are_used_in_priority_order() {
    let m = extract(&common::fallback_record());
    assert!(m.released);
    assert_eq!(m.copies_sold.to_number(), 8000.0);
    assert_eq!(num(&m.revenue), Some(42000.0));
    assert_eq!(num(&m.review_score), Some(81.0));
    assert_eq!(num(&m.review_count), Some(310.0));
    assert_eq!(num(&m.wishlists), Some(75.0));
    assert_eq!(num(&m.peak_players), Some(30.0));
    assert!(m.current_players.is_none());
    assert_eq!(num(&m.price), Some(4.99));
    assert_eq!(m.release_date, Some(Scalar::from("2020-01-15")));
}

#[test]
fn top_level_fields_win_over_history() {
    let m = extract(&common::released_record());
    assert_eq!(m.copies_sold.to_number(), 150000.0);
    assert_eq!(num(&m.revenue), Some(2345678.4));
    assert_eq!(num(&m.review_score), Some(92.6));
    assert_eq!(num(&m.review_count), Some(12345.0));
}

#[test]
fn history_uses_last_sample() {
    let m = extract(&common::unreleased_record());
    assert_eq!(num(&m.wishlists), Some(2500.0));
    assert_eq!(num(&m.review_score), Some(0.0));
}

#[test]
fn zero_and_false_are_accepted_values() {
    let m = extract(&record(json!({
        "copiesSold": 0,
        "owners": 5,
        "revenue": 0,
        "totalRevenue": 10,
        "wishlists": false
    })));
    assert_eq!(m.copies_sold.to_number(), 0.0);
    assert_eq!(num(&m.revenue), Some(0.0));
    assert_eq!(m.wishlists, Some(Scalar::from(false)));
}

#[test]
fn null_candidates_are_skipped() {
    let m = extract(&record(json!({ "copiesSold": null, "owners": 7 })));
    assert_eq!(m.copies_sold.to_number(), 7.0);
}

#[test]
fn nested_source_is_last_resort_for_sales() {
    let m = extract(&record(json!({ "estimateDetails": { "reviewBased": 321 } })));
    assert_eq!(m.copies_sold.to_number(), 321.0);
}

#[test]
fn non_array_history_is_ignored() {
    let m = extract(&record(json!({ "history": { "wishlists": 10 } })));
    assert!(m.wishlists.is_none());
}

#[test]
fn values_are_not_coerced_during_extraction() {
    let m = extract(&record(json!({ "copiesSold": "1200", "revenue": "lots" })));
    assert_eq!(m.copies_sold, Scalar::from("1200"));
    assert_eq!(m.copies_sold.to_number(), 1200.0);
    assert_eq!(m.revenue, Some(Scalar::from("lots")));
    assert!(m.revenue.unwrap().to_number().is_nan());
}

#[test]
fn radix_prefixed_strings_coerce_like_numbers() {
    assert_eq!(Scalar::from("0x1A").to_number(), 26.0);
    assert_eq!(Scalar::from("0o17").to_number(), 15.0);
    assert_eq!(Scalar::from("0B101").to_number(), 5.0);
    assert_eq!(Scalar::from(" 0x10 ").to_number(), 16.0);
    assert!(Scalar::from("0x").to_number().is_nan());
    assert!(Scalar::from("0xZZ").to_number().is_nan());
    assert!(Scalar::from("-0x1A").to_number().is_nan());
}

// ---------------------------------------------------------------------------
// Chain introspection
// ---------------------------------------------------------------------------

#[test]
fn chains_list_sources_in_order() {
    let names: Vec<String> = extract::REVENUE.sources.iter().map(|s| s.to_string()).collect();
    assert_eq!(
        names,
        vec![
            "revenue",
            "totalRevenue",
            "grossRevenue",
            "netRevenue",
            "estimateDetails.revenue"
        ]
    );
    assert_eq!(
        extract::WISHLISTS.sources,
        &[Source::Field("wishlists"), Source::LatestHistory("wishlists")]
    );
}

#[test]
fn resolve_with_source_reports_winning_candidate() {
    let rec = common::fallback_record();
    let (source, value) = extract::REVENUE.resolve_with_source(&rec).unwrap();
    assert_eq!(source, Source::Field("netRevenue"));
    assert_eq!(value, &json!(42000));

    let (source, _) = extract::REVIEW_SCORE.resolve_with_source(&rec).unwrap();
    assert_eq!(source.to_string(), "history[last].score");
}

#[test]
fn every_chain_has_a_unique_metric_name() {
    let mut names: Vec<&str> = extract::CHAINS.iter().map(|c| c.metric).collect();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total);
}
