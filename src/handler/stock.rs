use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::api_models::stock::{LookupRequest, StockDataResponse};
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::utils::date::normalize_date;

/// Looks up one day's open/high/low/close/volume for a symbol.
///
/// The credential is checked before the body. A body that does not parse as
/// a `LookupRequest` is treated as one with no fields.
pub async fn fetch_stock_data(
    State(state): State<AppState>,
    payload: Result<Json<LookupRequest>, JsonRejection>,
) -> Result<Json<StockDataResponse>, AppError> {
    let api_key = state.api_key.as_deref().ok_or(AppError::Configuration)?;

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("unreadable lookup body: {}", rejection);
            LookupRequest::default()
        }
    };
    let (symbol, raw_date) = request.required_fields().ok_or(AppError::InvalidRequest)?;

    let date = normalize_date(raw_date)?;

    let bar = state
        .bars
        .fetch_day_bar(api_key, symbol, date)
        .await?
        .ok_or_else(|| AppError::NotFound {
            symbol: symbol.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
        })?;

    Ok(Json(bar.into()))
}
