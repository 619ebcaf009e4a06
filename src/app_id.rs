//! Steam application identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{GamalyticError, Result};

/// A positive Steam application id, the key every lookup is made by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(u64);

impl AppId {
    /// Wrap a raw id, rejecting zero.
    pub fn new(id: u64) -> Result<Self> {
        if id == 0 {
            return Err(GamalyticError::InvalidArgument(
                "app id must be a positive integer".into(),
            ));
        }
        Ok(Self(id))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Pull the app id out of a store page URL or path such as
    /// `https://store.steampowered.com/app/570/Dota_2/`.
    ///
    /// The digits must be followed by a non-word ASCII character or the end of
    /// the input, so `/app/570abc` does not match.
    pub fn from_store_url(url: &str) -> Option<Self> {
        let needle = format!("/{}/", config::STORE_APP_SEGMENT);
        let mut rest = url;
        while let Some(pos) = rest.find(&needle) {
            let tail = &rest[pos + needle.len()..];
            let digits_len = tail.bytes().take_while(u8::is_ascii_digit).count();
            if digits_len > 0 {
                let boundary = tail[digits_len..]
                    .chars()
                    .next()
                    .map(|c| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(true);
                if boundary {
                    if let Some(id) = tail[..digits_len]
                        .parse::<u64>()
                        .ok()
                        .and_then(|n| Self::new(n).ok())
                    {
                        return Some(id);
                    }
                }
            }
            rest = &rest[pos + 1..];
        }
        None
    }

    /// URL of this app's page on the Gamalytic website.
    pub fn web_url(self) -> String {
        config::web_url(self.0)
    }

    /// URL of this app's record on the Gamalytic API.
    pub fn api_url(self) -> String {
        config::api_url(self.0)
    }
}

impl FromStr for AppId {
    type Err = GamalyticError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GamalyticError::InvalidArgument(format!(
                "not an app id: {:?}",
                s
            )));
        }
        let id = trimmed.parse::<u64>().map_err(|e| {
            GamalyticError::InvalidArgument(format!("app id {:?} out of range: {}", s, e))
        })?;
        Self::new(id)
    }
}

impl TryFrom<u64> for AppId {
    type Error = GamalyticError;

    fn try_from(id: u64) -> Result<Self> {
        Self::new(id)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
