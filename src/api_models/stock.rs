use serde::{Deserialize, Serialize};

use crate::services::polygon::UpstreamBar;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    pub stock_symbol: Option<String>,
    pub date: Option<String>,
}

impl LookupRequest {
    /// Both fields, trimmed, when both are present and non-empty.
    pub fn required_fields(&self) -> Option<(&str, &str)> {
        let symbol = self.stock_symbol.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let date = self.date.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((symbol, date))
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockDataResponse {
    pub stock_symbol: String,
    /// Epoch milliseconds of the bar, as reported upstream.
    pub date: i64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    pub volume: f64,
}

impl From<UpstreamBar> for StockDataResponse {
    fn from(bar: UpstreamBar) -> Self {
        Self {
            stock_symbol: bar.ticker,
            date: bar.timestamp_ms,
            open_price: bar.open,
            high_price: bar.high,
            low_price: bar.low,
            close_price: bar.close,
            volume: bar.volume,
        }
    }
}
