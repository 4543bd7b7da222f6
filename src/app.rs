use std::sync::Arc;

use axum::Router;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use crate::routes;
use crate::services::polygon::{BarSource, PolygonClient};
use crate::utils::config::AppConfig;
use crate::utils::{http_client, middleware};

#[derive(Clone)]
pub struct AppState {
    pub api_key: Option<Arc<str>>,
    pub bars: Arc<dyn BarSource>,
}

impl AppState {
    pub fn new(api_key: Option<String>, bars: Arc<dyn BarSource>) -> Self {
        Self {
            api_key: api_key.map(Arc::from),
            bars,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = http_client::create_polygon_client(cfg.polygon.timeout)?;
        let polygon = PolygonClient::new(client, cfg.polygon.base_url.clone());
        Ok(Self::new(cfg.polygon.api_key.clone(), Arc::new(polygon)))
    }
}

pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    routes::build_routes()
        .with_state(state)
        .layer(middleware::cors_layer(allowed_origins))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
