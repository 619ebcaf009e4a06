use serde::{Deserialize, Serialize};

use super::record::Scalar;

// ---------------------------------------------------------------------------
// Metrics — Normalized, display-ready view of one RawRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Sales estimate. Zero rather than unknown when the source has nothing.
    pub copies_sold: Scalar,
    pub revenue: Option<Scalar>,
    /// Percentage of positive reviews, 0 to 100.
    pub review_score: Option<Scalar>,
    pub review_count: Option<Scalar>,
    pub wishlists: Option<Scalar>,
    pub released: bool,
    pub release_date: Option<Scalar>,
    pub peak_players: Option<Scalar>,
    pub current_players: Option<Scalar>,
    pub price: Option<Scalar>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            copies_sold: Scalar::from(0),
            revenue: None,
            review_score: None,
            review_count: None,
            wishlists: None,
            released: false,
            release_date: None,
            peak_players: None,
            current_players: None,
            price: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Diff — Change between two Metrics snapshots of the same app
// ---------------------------------------------------------------------------

/// Element-wise change of the tracked counters since the previous snapshot.
///
/// Every delta is always computed; whether a delta is worth showing is
/// decided by [`Diff::is_present`] at display time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diff {
    pub copies_sold: f64,
    pub revenue: f64,
    pub review_score: f64,
    pub review_count: f64,
    pub wishlists: f64,
}

impl Diff {
    /// A delta is shown only when it is a real, non-zero number.
    pub fn is_present(delta: f64) -> bool {
        delta.is_finite() && delta != 0.0
    }

    /// True when no delta would be displayed.
    pub fn is_unchanged(&self) -> bool {
        [
            self.copies_sold,
            self.revenue,
            self.review_score,
            self.review_count,
            self.wishlists,
        ]
        .into_iter()
        .all(|d| !Self::is_present(d))
    }
}
