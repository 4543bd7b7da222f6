use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::polygon::PolygonError;
use crate::utils::date::DateError;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Both 'stockSymbol' and 'date' are required.";
pub const MISSING_API_KEY_MESSAGE: &str =
    "Polygon API key not found. Make sure you have set the 'POLYGON_API_KEY' environment variable.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub enum AppError {
    InvalidRequest,
    Configuration,
    NotFound { symbol: String, date: String },
    /// Anything else that went wrong after validation. The message is logged,
    /// never returned to the caller.
    Upstream(String),
}

impl From<PolygonError> for AppError {
    fn from(err: PolygonError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl From<DateError> for AppError {
    fn from(err: DateError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidRequest => (StatusCode::BAD_REQUEST, REQUIRED_FIELDS_MESSAGE.to_string()),
            AppError::Configuration => (
                StatusCode::INTERNAL_SERVER_ERROR,
                MISSING_API_KEY_MESSAGE.to_string(),
            ),
            AppError::NotFound { symbol, date } => (
                StatusCode::NOT_FOUND,
                format!("No trade statistics found for stock '{}' on date '{}'", symbol, date),
            ),
            AppError::Upstream(cause) => {
                tracing::error!("Error fetching stock data: {}", cause);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
