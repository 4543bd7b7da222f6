use std::future::Future;
use std::pin::Pin;

use chrono::NaiveDate;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;

const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Error)]
pub enum PolygonError {
    #[error("polygon http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("polygon returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("polygon payload decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("cannot build polygon url from base '{0}'")]
    InvalidUrl(String),
}

/// One day's aggregate bar, with the symbol already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamBar {
    pub ticker: String,
    /// Bar start, epoch milliseconds as reported upstream.
    pub timestamp_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Deserialize)]
struct AggregatesResponse {
    ticker: Option<String>,
    #[serde(default)]
    results: Option<Vec<RawBar>>,
}

#[derive(Debug, Deserialize)]
struct RawBar {
    #[serde(rename = "T")]
    ticker: Option<String>,
    t: i64,
    o: f64,
    h: f64,
    l: f64,
    c: f64,
    v: f64,
}

/// Source of single-day aggregate bars.
///
/// `Ok(None)` means the provider answered but has no bar for that day
/// (weekend, holiday, unknown symbol).
pub trait BarSource: Send + Sync {
    fn fetch_day_bar<'a>(
        &'a self,
        api_key: &'a str,
        symbol: &'a str,
        date: NaiveDate,
    ) -> Pin<Box<dyn Future<Output = Result<Option<UpstreamBar>, PolygonError>> + Send + 'a>>;
}

#[derive(Debug, Clone)]
pub struct PolygonClient {
    client: Client,
    base_url: Url,
}

impl PolygonClient {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn day_aggs_url(&self, api_key: &str, symbol: &str, date: NaiveDate) -> Result<Url, PolygonError> {
        let day = date.format("%Y-%m-%d").to_string();
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PolygonError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v2", "aggs", "ticker", symbol, "range", "1", "day", day.as_str(), day.as_str()]);
        url.query_pairs_mut().append_pair("apiKey", api_key);
        Ok(url)
    }

    pub async fn get_day_bar(
        &self,
        api_key: &str,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<Option<UpstreamBar>, PolygonError> {
        let url = self.day_aggs_url(api_key, symbol, date)?;

        // reqwest errors carry the url, which carries the key
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = resp.status();
        let text = resp.text().await.map_err(reqwest::Error::without_url)?;
        if !status.is_success() {
            let mut body = text;
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(PolygonError::Status { status, body });
        }

        let payload: AggregatesResponse = serde_json::from_str(&text)?;
        let mut results = payload.results.unwrap_or_default();
        if results.len() > 1 {
            tracing::warn!(
                "polygon returned {} bars for {} on {}; using the first",
                results.len(),
                symbol,
                date
            );
        }
        if results.is_empty() {
            return Ok(None);
        }
        let raw = results.swap_remove(0);

        let ticker = raw
            .ticker
            .or(payload.ticker)
            .unwrap_or_else(|| symbol.to_string());

        Ok(Some(UpstreamBar {
            ticker,
            timestamp_ms: raw.t,
            open: raw.o,
            high: raw.h,
            low: raw.l,
            close: raw.c,
            volume: raw.v,
        }))
    }
}

impl BarSource for PolygonClient {
    fn fetch_day_bar<'a>(
        &'a self,
        api_key: &'a str,
        symbol: &'a str,
        date: NaiveDate,
    ) -> Pin<Box<dyn Future<Output = Result<Option<UpstreamBar>, PolygonError>> + Send + 'a>> {
        Box::pin(self.get_day_bar(api_key, symbol, date))
    }
}
