//! Gamalytic SDK for Rust.
//!
//! Looks up Steam apps on the Gamalytic analytics API and turns the loosely
//! structured responses into a stable set of metrics (copies sold, revenue,
//! reviews, wishlists), together with the change since the app was last
//! looked up. Responses are kept in a local snapshot store so that repeat
//! lookups within the cache lifetime do not hit the network.
//!
//! # Quick start
//!
//! ```no_run
//! use gamalytic_sdk::{AppId, GamalyticSdk};
//!
//! let sdk = GamalyticSdk::builder().build().unwrap();
//!
//! let app: AppId = "570".parse().unwrap();
//! let report = sdk.report(app);
//! println!("{}", sdk.panel_for(&report));
//! ```

pub mod app_id;
#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod diff;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod format;
pub mod language;
pub mod models;
pub mod panel;
pub mod reconcile;
pub mod report;

pub use app_id::AppId;
#[cfg(feature = "async")]
pub use async_client::AsyncGamalyticSdk;
pub use cache::{FileSnapshotStore, MemorySnapshotStore, Snapshot, SnapshotStore};
pub use diff::diff;
pub use error::{GamalyticError, Result};
pub use extract::extract;
pub use fetcher::{Fetcher, HttpFetcher};
pub use language::Language;
pub use models::{Diff, Metrics, RawRecord, Scalar};
pub use panel::Panel;
pub use reconcile::{reconcile, Reconciliation};
pub use report::{CacheInfo, Report};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Current wall-clock time in unix milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// ---------------------------------------------------------------------------
// GamalyticSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`GamalyticSdk`] instance.
///
/// Use [`GamalyticSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](GamalyticSdkBuilder::build) to create the SDK.
pub struct GamalyticSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    ttl: Duration,
    language: Language,
    in_memory: bool,
    fetcher: Option<Box<dyn Fetcher>>,
    store: Option<Box<dyn SnapshotStore>>,
}

impl Default for GamalyticSdkBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
            ttl: config::DEFAULT_TTL,
            language: Language::default(),
            in_memory: false,
            fetcher: None,
            store: None,
        }
    }
}

impl GamalyticSdkBuilder {
    /// Set a custom cache directory for stored snapshots.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/gamalytic-sdk` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never contacts the API and serves stored
    /// snapshots regardless of their age. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How long a stored response is served before fetching again.
    ///
    /// Defaults to one hour. A zero TTL fetches on every lookup.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Display language for formatted values. Defaults to English.
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Keep snapshots in memory instead of on disk.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Use a custom record source instead of the HTTP API.
    pub fn fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Use a custom snapshot store.
    pub fn store(mut self, store: impl SnapshotStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Build the SDK. Creates the cache directory if a file store is used.
    pub fn build(self) -> Result<GamalyticSdk> {
        let fetcher = match self.fetcher {
            Some(f) => f,
            None => Box::new(HttpFetcher::new(self.timeout)?),
        };
        let store: Box<dyn SnapshotStore> = match self.store {
            Some(s) => s,
            None if self.in_memory => Box::new(MemorySnapshotStore::new()),
            None => Box::new(FileSnapshotStore::new(self.cache_dir)?),
        };
        Ok(GamalyticSdk {
            fetcher,
            store,
            offline: self.offline,
            ttl: self.ttl,
            language: self.language,
        })
    }
}

// ---------------------------------------------------------------------------
// GamalyticSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Gamalytic SDK.
///
/// Owns a [`Fetcher`] and a [`SnapshotStore`] and runs the lookup pipeline:
/// stored snapshot, fetch when stale, metric extraction and diffing.
///
/// Created via [`GamalyticSdk::builder()`].
pub struct GamalyticSdk {
    fetcher: Box<dyn Fetcher>,
    store: Box<dyn SnapshotStore>,
    offline: bool,
    ttl: Duration,
    language: Language,
}

impl GamalyticSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> GamalyticSdkBuilder {
        GamalyticSdkBuilder::default()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn ttl_ms(&self) -> i64 {
        i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX)
    }

    /// Look up an app, serving a fresh stored snapshot when there is one.
    pub fn lookup(&self, app_id: AppId) -> Result<Report> {
        self.lookup_at(app_id, now_ms())
    }

    /// [`lookup()`](Self::lookup) with an explicit current time.
    pub fn lookup_at(&self, app_id: AppId, now_ms: i64) -> Result<Report> {
        self.run_lookup(app_id, now_ms, false)
    }

    /// Look up an app, always fetching from the API unless offline.
    pub fn refresh(&self, app_id: AppId) -> Result<Report> {
        self.refresh_at(app_id, now_ms())
    }

    /// [`refresh()`](Self::refresh) with an explicit current time.
    pub fn refresh_at(&self, app_id: AppId, now_ms: i64) -> Result<Report> {
        self.run_lookup(app_id, now_ms, true)
    }

    fn run_lookup(&self, app_id: AppId, now_ms: i64, force: bool) -> Result<Report> {
        let snapshot = self.store.load(app_id)?;

        match &snapshot {
            Some(snap) if self.offline || (!force && snap.age(now_ms) < self.ttl_ms()) => {
                log::debug!("Serving app {} from cache", app_id);
                let reconciliation = reconcile(&snap.record, snap.previous.as_ref());
                let cache = CacheInfo {
                    cached: true,
                    last_visit: Some(snap.saved_at),
                    cache_age: Some(snap.age(now_ms)),
                };
                return Ok(Report::new(app_id, reconciliation, cache));
            }
            None if self.offline => {
                return Err(GamalyticError::Unavailable(format!(
                    "App {} not cached and offline mode is enabled",
                    app_id
                )));
            }
            _ => {}
        }

        let record = self.fetcher.fetch(app_id)?;
        if !record.has_data() {
            return Err(GamalyticError::Unavailable("No data".into()));
        }
        let (previous, last_visit, next) = match snapshot {
            Some(snap) => (
                Some(snap.record.clone()),
                Some(snap.saved_at),
                snap.succeed(record.clone(), now_ms),
            ),
            None => (
                None,
                None,
                Snapshot {
                    record: record.clone(),
                    saved_at: now_ms,
                    previous: None,
                },
            ),
        };

        let reconciliation = reconcile(&record, previous.as_ref());
        if let Err(e) = self.store.save(app_id, &next) {
            log::warn!("Failed to store snapshot for app {}: {}", app_id, e);
        }

        let cache = CacheInfo {
            cached: false,
            last_visit,
            cache_age: Some(0),
        };
        Ok(Report::new(app_id, reconciliation, cache))
    }

    /// Look up an app, turning any failure into a report carrying the error.
    pub fn report(&self, app_id: AppId) -> Report {
        self.report_at(app_id, now_ms())
    }

    /// [`report()`](Self::report) with an explicit current time.
    pub fn report_at(&self, app_id: AppId, now_ms: i64) -> Report {
        match self.lookup_at(app_id, now_ms) {
            Ok(report) => report,
            Err(e) => {
                log::debug!("Lookup of app {} failed: {}", app_id, e);
                Report::failed(app_id, e.to_string())
            }
        }
    }

    /// Lay out a report in the SDK's language.
    pub fn panel_for(&self, report: &Report) -> Panel {
        Panel::build(report, self.language, now_ms())
    }

    /// Look up an app and lay out the result.
    pub fn panel(&self, app_id: AppId) -> Panel {
        let now = now_ms();
        Panel::build(&self.report_at(app_id, now), self.language, now)
    }

    /// Remove every stored snapshot.
    pub fn clear_cache(&self) -> Result<()> {
        self.store.clear()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for GamalyticSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GamalyticSdk(language={}, ttl={}s, offline={})",
            self.language,
            self.ttl.as_secs(),
            self.offline
        )
    }
}
