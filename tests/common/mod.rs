//! Shared test fixtures for the Gamalytic SDK integration tests.
//!
//! Provides sample API documents and a `StubFetcher` that serves canned
//! responses without touching the network.

#![allow(dead_code)]

use gamalytic_sdk::{AppId, Fetcher, GamalyticError, GamalyticSdk, RawRecord, Result};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const APP: u64 = 570;

/// 2023-11-14T22:13:20Z
pub const NOW: i64 = 1_700_000_000_000;

pub const MINUTE: i64 = 60 * 1000;
pub const HOUR: i64 = 60 * MINUTE;

pub fn app() -> AppId {
    AppId::new(APP).unwrap()
}

/// A released game with top-level fields for every metric.
pub fn released_record() -> RawRecord {
    RawRecord::new(serde_json::json!({
        "steamId": "570",
        "name": "Sample Game",
        "unreleased": false,
        "copiesSold": 150000,
        "revenue": 2345678.4,
        "reviewScore": 92.6,
        "reviewsSteam": 12345,
        "peakPlayers": 4321,
        "currentPlayers": 0,
        "price": 19.99,
        "releaseDate": 1700000000000i64
    }))
}

/// A game not yet on sale, with metrics only in its history samples.
pub fn unreleased_record() -> RawRecord {
    RawRecord::new(serde_json::json!({
        "steamId": "570",
        "name": "Upcoming Game",
        "unreleased": true,
        "releaseDate": "2024-03-01",
        "history": [
            { "timeStamp": 1690000000000i64, "wishlists": 1000, "score": 0, "reviews": 0 },
            { "timeStamp": 1700000000000i64, "wishlists": 2500, "score": 0, "reviews": 0 }
        ]
    }))
}

/// A released game where every metric only appears under fallback names.
pub fn fallback_record() -> RawRecord {
    RawRecord::new(serde_json::json!({
        "unreleased": false,
        "owners": 8000,
        "estimateDetails": { "reviewBased": 9000, "revenue": 55000 },
        "grossRevenue": null,
        "netRevenue": 42000,
        "reviews": 310,
        "currentPrice": 4.99,
        "releasedAt": "2020-01-15",
        "history": [
            { "score": 70, "reviews": 100, "wishlists": 50, "peakPlayers": 12 },
            { "score": 81, "reviews": 300, "wishlists": 75, "peakPlayers": 30 }
        ]
    }))
}

/// Serves queued responses in order and counts how often it is called.
#[derive(Clone, Default)]
pub struct StubFetcher {
    responses: Arc<Mutex<VecDeque<Result<RawRecord>>>>,
    calls: Arc<AtomicUsize>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, record: RawRecord) -> Self {
        self.responses.lock().unwrap().push_back(Ok(record));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(GamalyticError::Unavailable(message.to_string())));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetcher for StubFetcher {
    fn fetch(&self, _app_id: AppId) -> Result<RawRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GamalyticError::Unavailable("No data".to_string())))
    }
}

/// An in-memory SDK backed by `fetcher`, caching for one hour.
pub fn sdk_with(fetcher: StubFetcher) -> GamalyticSdk {
    GamalyticSdk::builder()
        .in_memory()
        .ttl(Duration::from_secs(3600))
        .fetcher(fetcher)
        .build()
        .unwrap()
}
