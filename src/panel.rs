//! Row model for the analytics panel shown next to a store page.
//!
//! The panel decides which metrics are shown, in what order, and with which
//! formatted values and change indicators. Labels, styling and placement are
//! left to whoever draws it; rows are identified by [`Field`].

use std::fmt;

use serde::Serialize;

use crate::format;
use crate::language::Language;
use crate::models::{Diff, Metrics, Scalar};
use crate::report::{CacheInfo, Report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Error,
    CopiesSold,
    Revenue,
    ReviewScore,
    PeakPlayers,
    CurrentPlayers,
    Wishlists,
    ReleaseDate,
    Status,
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Field::Error => "error",
            Field::CopiesSold => "copiesSold",
            Field::Revenue => "revenue",
            Field::ReviewScore => "reviewScore",
            Field::PeakPlayers => "peakPlayers",
            Field::CurrentPlayers => "currentPlayers",
            Field::Wishlists => "wishlists",
            Field::ReleaseDate => "releaseDate",
            Field::Status => "status",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Value of the [`Field::Status`] row for games not yet on sale.
pub const STATUS_UNRELEASED: &str = "unreleased";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delta {
    pub text: String,
    pub trend: Trend,
}

impl Delta {
    fn from_change(change: f64, lang: Language) -> Option<Self> {
        let text = format::delta(change, lang)?;
        let trend = if change > 0.0 { Trend::Up } else { Trend::Down };
        Some(Self { text, trend })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub field: Field,
    pub value: String,
    pub delta: Option<Delta>,
}

impl Row {
    fn plain(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            delta: None,
        }
    }

    fn with_change(field: Field, value: String, change: Option<f64>, lang: Language) -> Self {
        Self {
            field,
            value,
            delta: change.and_then(|c| Delta::from_change(c, lang)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub rows: Vec<Row>,
    /// How long ago the cached data was seen, when it came from the cache.
    pub cache_note: Option<String>,
    /// Link to the app's page on the Gamalytic website.
    pub link: String,
}

/// `"93% (12,345)"`: rounded score with the review count.
fn review_text(score: &Scalar, count: Option<&Scalar>, lang: Language) -> String {
    let n = score.to_number();
    let percent = if n.is_finite() {
        format::int((n + 0.5).floor(), lang)
    } else {
        score.to_string()
    };
    format!("{}% ({})", percent, format::int(count, lang))
}

fn truthy(value: Option<&Scalar>) -> Option<&Scalar> {
    value.filter(|v| v.is_truthy())
}

fn released_rows(m: &Metrics, diff: Option<&Diff>, lang: Language) -> Vec<Row> {
    let mut rows = vec![Row::with_change(
        Field::CopiesSold,
        format::int(&m.copies_sold, lang),
        diff.map(|d| d.copies_sold),
        lang,
    )];
    if let Some(revenue) = truthy(m.revenue.as_ref()) {
        rows.push(Row::with_change(
            Field::Revenue,
            format::money(revenue, lang),
            diff.map(|d| d.revenue),
            lang,
        ));
    }
    if let Some(score) = &m.review_score {
        rows.push(Row::with_change(
            Field::ReviewScore,
            review_text(score, m.review_count.as_ref(), lang),
            diff.map(|d| d.review_count),
            lang,
        ));
    }
    if let Some(peak) = truthy(m.peak_players.as_ref()) {
        rows.push(Row::plain(Field::PeakPlayers, format::int(peak, lang)));
    }
    if let Some(current) = truthy(m.current_players.as_ref()) {
        rows.push(Row::plain(Field::CurrentPlayers, format::int(current, lang)));
    }
    rows
}

fn unreleased_rows(m: &Metrics, diff: Option<&Diff>, lang: Language) -> Vec<Row> {
    let mut rows = Vec::new();
    if let Some(wishlists) = truthy(m.wishlists.as_ref()) {
        rows.push(Row::with_change(
            Field::Wishlists,
            format::int(wishlists, lang),
            diff.map(|d| d.wishlists),
            lang,
        ));
    }
    if let Some(date) = truthy(m.release_date.as_ref()) {
        rows.push(Row::plain(Field::ReleaseDate, format::date(date, lang)));
    }
    rows.push(Row::plain(Field::Status, STATUS_UNRELEASED));
    rows
}

impl Panel {
    /// Lay out a report. `now_ms` is only used for the cache note.
    pub fn build(report: &Report, lang: Language, now_ms: i64) -> Self {
        let rows = match &report.error {
            Some(error) => vec![Row::plain(Field::Error, error.clone())],
            None if report.metrics.released => {
                released_rows(&report.metrics, report.diff.as_ref(), lang)
            }
            None => unreleased_rows(&report.metrics, report.diff.as_ref(), lang),
        };

        let cache_note = match report.cache {
            CacheInfo {
                cached: true,
                last_visit: Some(last_visit),
                ..
            } if last_visit != 0 => Some(format::time_ago(last_visit, now_ms, lang)),
            _ => None,
        };

        Self {
            rows,
            cache_note,
            link: report.app_id.web_url(),
        }
    }

    pub fn row(&self, field: Field) -> Option<&Row> {
        self.rows.iter().find(|r| r.field == field)
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            write!(f, "{}: {}", row.field, row.value)?;
            if let Some(delta) = &row.delta {
                write!(f, " ({})", delta.text)?;
            }
            writeln!(f)?;
        }
        if let Some(note) = &self.cache_note {
            writeln!(f, "cache: {}", note)?;
        }
        write!(f, "{}", self.link)
    }
}
