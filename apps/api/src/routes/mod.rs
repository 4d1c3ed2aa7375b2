pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::layout::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/layout/profiles",
            get(handlers::handle_list_profiles),
        )
        .route("/api/v1/layout", post(handlers::handle_layout))
        .with_state(state)
}
