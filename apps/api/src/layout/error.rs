use thiserror::Error;

use crate::layout::trailing::TrailingBlockKind;

/// Caller misuse detected by the layout engine.
///
/// Everything else (empty documents, all blocks inline, all blocks carried) is a valid
/// input with a deterministic layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid measurement for {field}: {value}")]
    InvalidMeasurement { field: &'static str, value: f32 },

    #[error(
        "degenerate geometry: content budget {content_budget:.2} does not exceed column header {column_header:.2}"
    )]
    DegenerateGeometry {
        content_budget: f32,
        column_header: f32,
    },

    #[error("trailing block '{0}' declared more than once")]
    DuplicateTrailingBlock(TrailingBlockKind),
}
