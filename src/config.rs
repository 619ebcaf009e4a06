use std::path::PathBuf;
use std::time::Duration;

pub const API_BASE: &str = "https://api.gamalytic.com/game";
pub const WEB_BASE: &str = "https://gamalytic.com/game";

/// Path segment that precedes the numeric app id on Steam store pages.
pub const STORE_APP_SEGMENT: &str = "app";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How long a stored response is served without asking the API again.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

pub fn api_url(app_id: u64) -> String {
    format!("{}/{}", API_BASE, app_id)
}

pub fn web_url(app_id: u64) -> String {
    format!("{}/{}", WEB_BASE, app_id)
}

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("gamalytic-sdk")
    } else {
        PathBuf::from(".gamalytic-sdk-cache")
    }
}
