//! Change tracking between two metric snapshots.

use crate::models::{Diff, Metrics, Scalar};

fn delta(current: Option<&Scalar>, previous: Option<&Scalar>) -> f64 {
    let number = |s: Option<&Scalar>| s.map(Scalar::to_number).unwrap_or(0.0);
    number(current) - number(previous)
}

/// Compute the change from `previous` to `current`.
///
/// Returns `None` when there is no previous snapshot. Missing values on
/// either side count as zero, so a metric that appears for the first time
/// shows its full value as the change.
pub fn diff(current: &Metrics, previous: Option<&Metrics>) -> Option<Diff> {
    let previous = previous?;
    Some(Diff {
        copies_sold: delta(Some(&current.copies_sold), Some(&previous.copies_sold)),
        revenue: delta(current.revenue.as_ref(), previous.revenue.as_ref()),
        review_score: delta(current.review_score.as_ref(), previous.review_score.as_ref()),
        review_count: delta(current.review_count.as_ref(), previous.review_count.as_ref()),
        wishlists: delta(current.wishlists.as_ref(), previous.wishlists.as_ref()),
    })
}
