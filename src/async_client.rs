//! Async wrapper around [`GamalyticSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client and the file store do their work.
//!
//! # Example
//!
//! ```no_run
//! use gamalytic_sdk::{AppId, AsyncGamalyticSdk};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncGamalyticSdk::builder().build().await.unwrap();
//!     let app = AppId::new(570).unwrap();
//!
//!     let report = sdk.report(app).await;
//!     let panel = sdk.run(move |s| Ok(s.panel(app))).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::app_id::AppId;
use crate::config;
use crate::error::{GamalyticError, Result};
use crate::language::Language;
use crate::report::Report;
use crate::GamalyticSdk;

// ---------------------------------------------------------------------------
// AsyncGamalyticSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncGamalyticSdk`] instance.
pub struct AsyncGamalyticSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    ttl: Duration,
    language: Language,
}

impl Default for AsyncGamalyticSdkBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
            ttl: config::DEFAULT_TTL,
            language: Language::default(),
        }
    }
}

impl AsyncGamalyticSdkBuilder {
    /// Set a custom cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how long stored responses are served without refetching.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Build the async SDK on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncGamalyticSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = GamalyticSdk::builder();
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            builder = builder
                .offline(self.offline)
                .timeout(self.timeout)
                .ttl(self.ttl)
                .language(self.language);
            let sdk = builder.build()?;
            Ok(AsyncGamalyticSdk::from_sdk(sdk))
        })
        .await
        .map_err(|e| GamalyticError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncGamalyticSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`GamalyticSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`GamalyticSdk`] is
/// protected by a [`Mutex`], so lookups run one at a time.
pub struct AsyncGamalyticSdk {
    inner: Arc<Mutex<GamalyticSdk>>,
}

impl AsyncGamalyticSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncGamalyticSdkBuilder {
        AsyncGamalyticSdkBuilder::default()
    }

    /// Wrap an already configured SDK, e.g. one with a custom fetcher.
    pub fn from_sdk(sdk: GamalyticSdk) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sdk)),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&GamalyticSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| GamalyticError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| GamalyticError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Look up an app asynchronously.
    pub async fn lookup(&self, app_id: AppId) -> Result<Report> {
        self.run(move |s| s.lookup(app_id)).await
    }

    /// Look up an app asynchronously; failures become an error report.
    pub async fn report(&self, app_id: AppId) -> Report {
        match self.run(move |s| Ok(s.report(app_id))).await {
            Ok(report) => report,
            Err(e) => Report::failed(app_id, e.to_string()),
        }
    }

    /// Remove every stored snapshot.
    pub async fn clear_cache(&self) -> Result<()> {
        self.run(|s| s.clear_cache()).await
    }
}
