//! Metric extraction and change tracking for one lookup.

use serde::Serialize;

use crate::diff::diff;
use crate::extract::extract;
use crate::models::{Diff, Metrics, RawRecord};

/// Current metrics of an app together with the change since last time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub metrics: Metrics,
    pub previous: Option<Metrics>,
    /// `None` when there was no previous record to compare against.
    pub diff: Option<Diff>,
}

/// Extract metrics from `current` and diff them against `previous`.
pub fn reconcile(current: &RawRecord, previous: Option<&RawRecord>) -> Reconciliation {
    let metrics = extract(current);
    let previous = previous.map(extract);
    let diff = diff(&metrics, previous.as_ref());

    log::debug!("Raw API response: {}", current.as_value());
    log::debug!("Extracted values: {:?}", metrics);
    if let Some(d) = &diff {
        log::debug!("Changes since previous snapshot: {:?}", d);
    }

    Reconciliation {
        metrics,
        previous,
        diff,
    }
}
