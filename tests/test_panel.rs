//! Panel layout tests.

mod common;

use common::{HOUR, NOW};
use gamalytic_sdk::panel::{Field, Trend, STATUS_UNRELEASED};
use gamalytic_sdk::{reconcile, CacheInfo, Language, Panel, RawRecord, Report};
use serde_json::json;

fn report_for(current: RawRecord, previous: Option<RawRecord>) -> Report {
    Report::new(
        common::app(),
        reconcile(&current, previous.as_ref()),
        CacheInfo::default(),
    )
}

fn fields(panel: &Panel) -> Vec<Field> {
    panel.rows.iter().map(|r| r.field).collect()
}

// ---------------------------------------------------------------------------
// Released games
// ---------------------------------------------------------------------------

#[test]
fn released_game_shows_sales_rows() {
    let panel = Panel::build(&report_for(common::released_record(), None), Language::En, NOW);

    // currentPlayers is 0 and therefore hidden.
    assert_eq!(
        fields(&panel),
        vec![Field::CopiesSold, Field::Revenue, Field::ReviewScore, Field::PeakPlayers]
    );
    assert_eq!(panel.row(Field::CopiesSold).unwrap().value, "150,000");
    assert_eq!(panel.row(Field::Revenue).unwrap().value, "$2,345,678");
    assert_eq!(panel.row(Field::ReviewScore).unwrap().value, "93% (12,345)");
    assert_eq!(panel.row(Field::PeakPlayers).unwrap().value, "4,321");
    assert!(panel.rows.iter().all(|r| r.delta.is_none()));
    assert_eq!(panel.link, "https://gamalytic.com/game/570");
}

#[test]
fn copies_sold_row_is_always_present() {
    let panel = Panel::build(
        &report_for(RawRecord::new(json!({ "unreleased": false })), None),
        Language::En,
        NOW,
    );
    assert_eq!(fields(&panel), vec![Field::CopiesSold]);
    assert_eq!(panel.rows[0].value, "0");
}

#[test]
fn review_score_without_count_shows_not_available() {
    let rec = RawRecord::new(json!({ "unreleased": false, "reviewScore": 75 }));
    let panel = Panel::build(&report_for(rec, None), Language::En, NOW);
    assert_eq!(panel.row(Field::ReviewScore).unwrap().value, "75% (N/A)");
}

#[test]
fn deltas_are_attached_and_zero_changes_hidden() {
    let previous = RawRecord::new(json!({
        "unreleased": false,
        "copiesSold": 140000,
        "revenue": 2345678.4,
        "reviewsSteam": 12400
    }));
    let panel = Panel::build(
        &report_for(common::released_record(), Some(previous)),
        Language::En,
        NOW,
    );

    let copies = panel.row(Field::CopiesSold).unwrap().delta.as_ref().unwrap();
    assert_eq!(copies.text, "+10,000");
    assert_eq!(copies.trend, Trend::Up);

    assert!(panel.row(Field::Revenue).unwrap().delta.is_none());

    let reviews = panel.row(Field::ReviewScore).unwrap().delta.as_ref().unwrap();
    assert_eq!(reviews.text, "-55");
    assert_eq!(reviews.trend, Trend::Down);
}

// ---------------------------------------------------------------------------
// Unreleased games
// ---------------------------------------------------------------------------

#[test]
fn unreleased_game_shows_wishlists_and_status() {
    let panel = Panel::build(&report_for(common::unreleased_record(), None), Language::En, NOW);
    assert_eq!(
        fields(&panel),
        vec![Field::Wishlists, Field::ReleaseDate, Field::Status]
    );
    assert_eq!(panel.row(Field::Wishlists).unwrap().value, "2,500");
    assert_eq!(panel.row(Field::ReleaseDate).unwrap().value, "Mar 1, 2024");
    assert_eq!(panel.row(Field::Status).unwrap().value, STATUS_UNRELEASED);
}

#[test]
fn unknown_release_state_is_shown_as_unreleased() {
    let rec = RawRecord::new(json!({ "copiesSold": 5000 }));
    let panel = Panel::build(&report_for(rec, None), Language::En, NOW);
    assert_eq!(fields(&panel), vec![Field::Status]);
}

#[test]
fn wishlist_delta_uses_language() {
    let previous = RawRecord::new(json!({ "wishlists": 1000 }));
    let panel = Panel::build(
        &report_for(common::unreleased_record(), Some(previous)),
        Language::Ru,
        NOW,
    );
    let row = panel.row(Field::Wishlists).unwrap();
    assert_eq!(row.value, "2\u{a0}500");
    assert_eq!(row.delta.as_ref().unwrap().text, "+1\u{a0}500");
    assert_eq!(panel.row(Field::ReleaseDate).unwrap().value, "1 мар. 2024 г.");
}

// ---------------------------------------------------------------------------
// Errors and cache note
// ---------------------------------------------------------------------------

#[test]
fn error_report_is_a_single_row() {
    let report = Report::failed(common::app(), "HTTP 404");
    let panel = Panel::build(&report, Language::En, NOW);
    assert_eq!(fields(&panel), vec![Field::Error]);
    assert_eq!(panel.rows[0].value, "HTTP 404");
    assert!(panel.cache_note.is_none());
}

#[test]
fn cache_note_only_for_cached_reports() {
    let mut report = report_for(common::released_record(), None);
    report.cache = CacheInfo {
        cached: true,
        last_visit: Some(NOW - 2 * HOUR),
        cache_age: Some(2 * HOUR),
    };
    let panel = Panel::build(&report, Language::En, NOW);
    assert_eq!(panel.cache_note.as_deref(), Some("2h ago"));

    report.cache.cached = false;
    assert!(Panel::build(&report, Language::En, NOW).cache_note.is_none());
}

#[test]
fn display_lists_rows_and_link() {
    let previous = RawRecord::new(json!({ "wishlists": 2000 }));
    let panel = Panel::build(
        &report_for(common::unreleased_record(), Some(previous)),
        Language::En,
        NOW,
    );
    assert_eq!(
        panel.to_string(),
        "wishlists: 2,500 (+500)\n\
         releaseDate: Mar 1, 2024\n\
         status: unreleased\n\
         https://gamalytic.com/game/570"
    );
}
