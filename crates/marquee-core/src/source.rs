//! Movie data sources
//!
//! Two ways to reach the data, matching the two front-end variants of the
//! original system: a live backend exposing POST routes, and a directory of
//! exported JSON snapshots fetched with plain GETs. Both sit behind the
//! [`MovieSource`] trait so the UI does not care which one it talks to.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{Config, SourceKind};
use crate::error::SourceError;
use crate::model::{Movie, WatchedEntry};

/// Data source for watched history and recommendations.
///
/// A month of `None` means "all months" and is only meaningful for the
/// watched view; recommendation requests are always scoped to one month.
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn watched(&self, month: Option<u8>) -> Result<Vec<WatchedEntry>, SourceError>;
    async fn recommendations(&self, month: u8) -> Result<Vec<Movie>, SourceError>;
}

/// Build the source named by the config.
pub fn from_config(config: &Config) -> Arc<dyn MovieSource> {
    match config.source {
        SourceKind::Backend => Arc::new(BackendSource::new(&config.backend_url)),
        SourceKind::Snapshot => Arc::new(SnapshotSource::new(&config.backend_url)),
    }
}

fn trim_base(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Live backend: `POST {base}/watched` and `POST {base}/recommend` with a
/// `{"month_index": number|null}` body. Responses are bare JSON arrays.
pub struct BackendSource {
    client: reqwest::Client,
    base_url: String,
}

impl BackendSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: trim_base(base_url),
        }
    }

    async fn post<T: DeserializeOwned>(
        &self,
        route: &str,
        month: Option<u8>,
    ) -> Result<Vec<T>, SourceError> {
        let url = format!("{}{}", self.base_url, route);
        debug!(url, ?month, "requesting movie data");
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "month_index": month }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl MovieSource for BackendSource {
    async fn watched(&self, month: Option<u8>) -> Result<Vec<WatchedEntry>, SourceError> {
        self.post("/watched", month).await
    }

    async fn recommendations(&self, month: u8) -> Result<Vec<Movie>, SourceError> {
        self.post("/recommend", Some(month)).await
    }
}

/// Snapshot files: `GET {base}/watched.json` and `{base}/recommendations.json`.
/// Each file maps a stringified month index to that month's array.
pub struct SnapshotSource {
    client: reqwest::Client,
    base_url: String,
}

impl SnapshotSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: trim_base(base_url),
        }
    }

    async fn fetch_map<T: DeserializeOwned>(
        &self,
        file: &str,
    ) -> Result<BTreeMap<String, Vec<T>>, SourceError> {
        let url = format!("{}/{}", self.base_url, file);
        debug!(url, "fetching snapshot");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl MovieSource for SnapshotSource {
    async fn watched(&self, month: Option<u8>) -> Result<Vec<WatchedEntry>, SourceError> {
        let map = self.fetch_map("watched.json").await?;
        Ok(match month {
            Some(m) => select_month(map, m),
            None => flatten_months(map),
        })
    }

    async fn recommendations(&self, month: u8) -> Result<Vec<Movie>, SourceError> {
        let map = self.fetch_map("recommendations.json").await?;
        Ok(select_month(map, month))
    }
}

/// One month's entries; a missing key is an empty month, not an error.
fn select_month<T>(mut map: BTreeMap<String, Vec<T>>, month: u8) -> Vec<T> {
    map.remove(&month.to_string()).unwrap_or_default()
}

/// All months concatenated in ascending month order, per-month order kept.
/// No deduplication: a movie watched in two months appears twice.
fn flatten_months<T>(map: BTreeMap<String, Vec<T>>) -> Vec<T> {
    let mut keyed: Vec<(u32, Vec<T>)> = map
        .into_iter()
        .filter_map(|(key, entries)| key.parse::<u32>().ok().map(|n| (n, entries)))
        .collect();
    keyed.sort_by_key(|(month, _)| *month);
    keyed.into_iter().flat_map(|(_, entries)| entries).collect()
}
