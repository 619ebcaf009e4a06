//! Metric extraction from raw API documents.
//!
//! Each metric is resolved through a named, ordered [`FallbackChain`] of
//! [`Source`] lookups. The first source that yields a value other than JSON
//! `null` wins; `0`, `false` and `""` count as real values. Extraction never
//! fails and performs no type checks: a chain that finds nothing resolves to
//! `None`, and numeric coercion is left to the formatters.

use std::fmt;

use serde_json::Value;

use crate::models::{Metrics, RawRecord, Scalar};

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// One candidate location for a metric inside a [`RawRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A top-level field.
    Field(&'static str),
    /// A field reached through nested objects.
    Nested(&'static [&'static str]),
    /// A field of the last element of the `history` array.
    LatestHistory(&'static str),
}

impl Source {
    /// Look the candidate up, accepting anything but absence and `null`.
    pub fn resolve<'r>(&self, record: &'r RawRecord) -> Option<&'r Value> {
        let value = match self {
            Source::Field(name) => record.get(name),
            Source::Nested(path) => record.nested(path),
            Source::LatestHistory(name) => record.latest_history().and_then(|h| h.get(*name)),
        };
        value.filter(|v| !v.is_null())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Field(name) => f.write_str(name),
            Source::Nested(path) => f.write_str(&path.join(".")),
            Source::LatestHistory(name) => write!(f, "history[last].{}", name),
        }
    }
}

// ---------------------------------------------------------------------------
// FallbackChain
// ---------------------------------------------------------------------------

/// Priority-ordered sources for one metric.
#[derive(Debug, Clone, Copy)]
pub struct FallbackChain {
    pub metric: &'static str,
    pub sources: &'static [Source],
}

impl FallbackChain {
    /// The first accepted value along the chain, with the source it came from.
    pub fn resolve_with_source<'r>(&self, record: &'r RawRecord) -> Option<(Source, &'r Value)> {
        self.sources
            .iter()
            .find_map(|source| source.resolve(record).map(|v| (*source, v)))
    }

    pub fn resolve(&self, record: &RawRecord) -> Option<Scalar> {
        self.resolve_with_source(record).map(|(_, v)| Scalar::from(v))
    }
}

pub const COPIES_SOLD: FallbackChain = FallbackChain {
    metric: "copiesSold",
    sources: &[
        Source::Field("copiesSold"),
        Source::Field("owners"),
        Source::Nested(&["estimateDetails", "reviewBased"]),
    ],
};

pub const REVENUE: FallbackChain = FallbackChain {
    metric: "revenue",
    sources: &[
        Source::Field("revenue"),
        Source::Field("totalRevenue"),
        Source::Field("grossRevenue"),
        Source::Field("netRevenue"),
        Source::Nested(&["estimateDetails", "revenue"]),
    ],
};

pub const REVIEW_SCORE: FallbackChain = FallbackChain {
    metric: "reviewScore",
    sources: &[Source::Field("reviewScore"), Source::LatestHistory("score")],
};

pub const REVIEW_COUNT: FallbackChain = FallbackChain {
    metric: "reviewCount",
    sources: &[
        Source::Field("reviewsSteam"),
        Source::Field("reviews"),
        Source::LatestHistory("reviews"),
    ],
};

pub const WISHLISTS: FallbackChain = FallbackChain {
    metric: "wishlists",
    sources: &[Source::Field("wishlists"), Source::LatestHistory("wishlists")],
};

pub const RELEASE_DATE: FallbackChain = FallbackChain {
    metric: "releaseDate",
    sources: &[Source::Field("releaseDate"), Source::Field("releasedAt")],
};

pub const PEAK_PLAYERS: FallbackChain = FallbackChain {
    metric: "peakPlayers",
    sources: &[
        Source::Field("peakPlayers"),
        Source::LatestHistory("peakPlayers"),
    ],
};

pub const CURRENT_PLAYERS: FallbackChain = FallbackChain {
    metric: "currentPlayers",
    sources: &[
        Source::Field("currentPlayers"),
        Source::LatestHistory("currentPlayers"),
    ],
};

pub const PRICE: FallbackChain = FallbackChain {
    metric: "price",
    sources: &[Source::Field("price"), Source::Field("currentPrice")],
};

/// Every chain, in the order metrics are listed on [`Metrics`].
pub const CHAINS: &[FallbackChain] = &[
    COPIES_SOLD,
    REVENUE,
    REVIEW_SCORE,
    REVIEW_COUNT,
    WISHLISTS,
    RELEASE_DATE,
    PEAK_PLAYERS,
    CURRENT_PLAYERS,
    PRICE,
];

/// A record counts as released only when it says `"unreleased": false`.
///
/// A missing or non-boolean flag is treated as unreleased.
pub fn is_released(record: &RawRecord) -> bool {
    record.get("unreleased") == Some(&Value::Bool(false))
}

/// Derive the normalized metrics from a raw document.
pub fn extract(record: &RawRecord) -> Metrics {
    Metrics {
        copies_sold: COPIES_SOLD
            .resolve(record)
            .unwrap_or_else(|| Scalar::from(0)),
        revenue: REVENUE.resolve(record),
        review_score: REVIEW_SCORE.resolve(record),
        review_count: REVIEW_COUNT.resolve(record),
        wishlists: WISHLISTS.resolve(record),
        released: is_released(record),
        release_date: RELEASE_DATE.resolve(record),
        peak_players: PEAK_PLAYERS.resolve(record),
        current_players: CURRENT_PLAYERS.resolve(record),
        price: PRICE.resolve(record),
    }
}
