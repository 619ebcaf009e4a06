//! The result of one app lookup, as handed to the presentation layer.

use serde::Serialize;

use crate::app_id::AppId;
use crate::models::{Diff, Metrics};
use crate::reconcile::Reconciliation;

/// Where the reported data came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheInfo {
    /// The record was served from the snapshot store without a fetch.
    pub cached: bool,
    /// When the app was last looked up before this one, in unix milliseconds.
    pub last_visit: Option<i64>,
    /// Age of the reported record in milliseconds.
    pub cache_age: Option<i64>,
}

/// Everything known about one app after a lookup.
///
/// A failed lookup is still a `Report`: it carries default metrics and the
/// error message, which is displayed like any other value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub app_id: AppId,
    pub metrics: Metrics,
    pub diff: Option<Diff>,
    pub cache: CacheInfo,
    pub error: Option<String>,
}

impl Report {
    pub fn new(app_id: AppId, reconciliation: Reconciliation, cache: CacheInfo) -> Self {
        Self {
            app_id,
            metrics: reconciliation.metrics,
            diff: reconciliation.diff,
            cache,
            error: None,
        }
    }

    /// A report for a lookup that produced no data.
    pub fn failed(app_id: AppId, error: impl Into<String>) -> Self {
        Self {
            app_id,
            metrics: Metrics::default(),
            diff: None,
            cache: CacheInfo::default(),
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
