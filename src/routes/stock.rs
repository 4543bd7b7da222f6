use axum::{routing::post, Router};

use crate::app::AppState;
use crate::handler::stock::fetch_stock_data;

pub fn router() -> Router<AppState> {
    Router::new().route("/fetchStockData", post(fetch_stock_data))
}
