use axum::Router;

use crate::app::AppState;

mod root;
mod stock;

pub fn build_routes() -> Router<AppState> {
    Router::new()
        // root greeting and health probe
        .merge(root::router())
        .nest("/api", stock::router())
}
