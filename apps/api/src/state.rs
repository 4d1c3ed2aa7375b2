use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The layout engine itself is stateless; every request brings its own content and
/// geometry.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
