//! Axum route handlers for the Layout API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::layout::aggregate::{aggregate_categories, CategoryAggregate, DisplayMode};
use crate::layout::engine::{layout_document, LayoutInput};
use crate::layout::geometry::{LayoutBudget, PageGeometry};
use crate::layout::paginate::Page;
use crate::layout::profiles::{all_profiles, profile, DocumentKind, LayoutProfile};
use crate::layout::trailing::PlacementResult;
use crate::models::document::{CategoryRecord, PaymentTerms, TotalsRecord};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    pub document_kind: DocumentKind,
    /// Replaces the profile geometry wholesale when present.
    #[serde(default)]
    pub geometry: Option<PageGeometry>,
    #[serde(default)]
    pub show_empty_categories: Option<bool>,
    #[serde(default)]
    pub display_mode: DisplayMode,
    pub categories: Vec<CategoryRecord>,
    #[serde(default)]
    pub totals: Option<TotalsRecord>,
    #[serde(default)]
    pub payment_terms: Option<PaymentTerms>,
}

#[derive(Debug, Serialize)]
pub struct StampedPage {
    pub stamp: String,
    #[serde(flatten)]
    pub page: Page,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub document_kind: DocumentKind,
    pub display_mode: DisplayMode,
    pub page_count: usize,
    pub pages: Vec<StampedPage>,
    pub placement: PlacementResult,
    pub budget: LayoutBudget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_aggregates: Option<Vec<CategoryAggregate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<TotalsRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<PaymentTerms>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/layout/profiles
///
/// Lists the stock geometry and trailing-block set for every printable document.
pub async fn handle_list_profiles() -> Json<Vec<LayoutProfile>> {
    Json(all_profiles())
}

/// POST /api/v1/layout
///
/// Lays out one document and returns the ordered page list. The renderer prints each page
/// with the repeated header/footer and the returned stamp.
pub async fn handle_layout(
    State(state): State<AppState>,
    Json(request): Json<LayoutRequest>,
) -> Result<Json<LayoutResponse>, AppError> {
    validate_request(&request, state.config.max_line_items)?;

    if let Some(terms) = &request.payment_terms {
        if !terms.is_balanced() {
            warn!(
                total_percent = terms.total_percent(),
                "Payment terms do not sum to 100%; rendering as supplied"
            );
        }
    }

    let category_aggregates = request
        .display_mode
        .needs_aggregates()
        .then(|| aggregate_categories(&request.categories));

    let mut stock = profile(request.document_kind);
    if let Some(geometry) = request.geometry {
        stock.geometry = geometry;
    }
    if let Some(show) = request.show_empty_categories {
        stock.show_empty_categories = show;
    }
    let input = LayoutInput::from_profile(&stock, request.categories);

    // CPU-bound — spawn_blocking to avoid blocking the async executor.
    let layout = tokio::task::spawn_blocking(move || layout_document(&input))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout: {e}")))??;

    info!(
        document_kind = ?request.document_kind,
        pages = layout.page_count(),
        inline_blocks = layout.placement.inline.len(),
        carry_pages = layout.placement.carry.len(),
        "Document laid out"
    );

    let stamps = layout.stamps();
    let page_count = layout.page_count();
    let pages = layout
        .pages
        .into_iter()
        .zip(stamps)
        .map(|(page, stamp)| StampedPage { stamp, page })
        .collect();

    Ok(Json(LayoutResponse {
        document_kind: request.document_kind,
        display_mode: request.display_mode,
        page_count,
        pages,
        placement: layout.placement,
        budget: layout.budget,
        category_aggregates,
        totals: request.totals,
        payment_terms: request.payment_terms,
    }))
}

fn validate_request(request: &LayoutRequest, max_line_items: usize) -> Result<(), AppError> {
    if request.categories.iter().any(|c| c.name.trim().is_empty()) {
        return Err(AppError::Validation(
            "category name cannot be empty".to_string(),
        ));
    }

    let line_items: usize = request.categories.iter().map(|c| c.items.len()).sum();
    if line_items > max_line_items {
        return Err(AppError::Validation(format!(
            "document has {line_items} line items; at most {max_line_items} are accepted"
        )));
    }

    Ok(())
}
