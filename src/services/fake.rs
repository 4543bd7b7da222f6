use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use chrono::NaiveDate;
use reqwest::StatusCode;

use super::polygon::{BarSource, PolygonError, UpstreamBar};

#[derive(Debug, Clone)]
pub enum Canned {
    Bar(UpstreamBar),
    Empty,
    Fail(String),
}

/// In-memory bar source that records every call it receives.
#[derive(Debug)]
pub struct FakeBars {
    canned: Canned,
    calls: Mutex<Vec<(String, String, NaiveDate)>>,
}

impl FakeBars {
    pub fn new(canned: Canned) -> Self {
        Self {
            canned,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String, NaiveDate)> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn sample_bar() -> UpstreamBar {
    UpstreamBar {
        ticker: "AAPL".to_string(),
        timestamp_ms: 1683691200000,
        open: 172.41,
        high: 173.89,
        low: 170.69,
        close: 173.56,
        volume: 53724501.0,
    }
}

impl BarSource for FakeBars {
    fn fetch_day_bar<'a>(
        &'a self,
        api_key: &'a str,
        symbol: &'a str,
        date: NaiveDate,
    ) -> Pin<Box<dyn Future<Output = Result<Option<UpstreamBar>, PolygonError>> + Send + 'a>> {
        self.calls
            .lock()
            .unwrap()
            .push((api_key.to_string(), symbol.to_string(), date));
        let outcome = match &self.canned {
            Canned::Bar(bar) => Ok(Some(bar.clone())),
            Canned::Empty => Ok(None),
            Canned::Fail(body) => Err(PolygonError::Status {
                status: StatusCode::BAD_GATEWAY,
                body: body.clone(),
            }),
        };
        Box::pin(async move { outcome })
    }
}
