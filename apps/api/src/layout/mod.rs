// Print layout engine.
// One parameterized pipeline serves the bill of materials, tax invoice and job-card
// invoice print views: geometry → flatten → paginate → trailing placement.
// Synchronous and CPU-bound; HTTP handlers call it inside tokio::task::spawn_blocking.

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod flatten;
pub mod geometry;
pub mod handlers;
pub mod paginate;
pub mod profiles;
pub mod trailing;

// Re-export the API consumed outside the layout module (startup checks, error mapping).
pub use error::LayoutError;
pub use profiles::all_profiles;
