//! Layout orchestration: geometry → flatten → paginate → trailing placement → page list.
//!
//! Every run builds its own budget and units from the input snapshot and returns an owned
//! [`DocumentLayout`]; nothing is shared between runs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::error::LayoutError;
use crate::layout::flatten::{flatten, ContentUnit, FlattenOptions};
use crate::layout::geometry::{LayoutBudget, PageGeometry};
use crate::layout::paginate::{paginate, Page, PageKind};
use crate::layout::profiles::LayoutProfile;
use crate::layout::trailing::{
    group_height, place_trailing_blocks, resolve_blocks, PlacementResult, TrailingBlockKind,
};
use crate::models::document::CategoryRecord;

/// Everything one layout run depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInput {
    pub geometry: PageGeometry,
    pub trailing_blocks: Vec<TrailingBlockKind>,
    #[serde(default)]
    pub flatten: FlattenOptions,
    pub categories: Vec<CategoryRecord>,
}

impl LayoutInput {
    pub fn from_profile(profile: &LayoutProfile, categories: Vec<CategoryRecord>) -> Self {
        Self {
            geometry: profile.geometry.clone(),
            trailing_blocks: profile.trailing_blocks.clone(),
            flatten: FlattenOptions {
                show_empty_categories: profile.show_empty_categories,
            },
            categories,
        }
    }
}

/// The finished layout: pages in print order plus the placement decision behind them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLayout {
    pub pages: Vec<Page>,
    pub placement: PlacementResult,
    pub budget: LayoutBudget,
}

impl DocumentLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Footer stamps, one per page.
    pub fn stamps(&self) -> Vec<String> {
        let total = self.pages.len();
        (0..total).map(|i| Page::stamp(i, total)).collect()
    }

    pub fn rows_pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(|p| p.kind == PageKind::Rows)
    }

    /// All content units in print order, across pages.
    pub fn units(&self) -> impl Iterator<Item = &ContentUnit> {
        self.rows_pages().flat_map(|p| p.units.iter())
    }
}

/// Lays out one document.
///
/// An empty document still gets a single (empty) `rows` page so the trailing blocks have
/// somewhere to render inline.
pub fn layout_document(input: &LayoutInput) -> Result<DocumentLayout, LayoutError> {
    let budget = input.geometry.budget()?;
    let blocks = resolve_blocks(&input.trailing_blocks, &budget)?;

    let units = flatten(&input.categories, &budget, input.flatten);
    let mut pages = paginate(units, &budget);
    if pages.is_empty() {
        pages.push(Page::rows(Vec::new(), 0.0));
    }

    let placement = match pages.last_mut() {
        Some(last) => {
            let placement = place_trailing_blocks(&blocks, last.used_height, &budget);
            last.blocks = placement.inline.clone();
            placement
        }
        None => PlacementResult::default(),
    };

    pages.extend(
        placement
            .carry
            .iter()
            .map(|group| Page::trailing(group.clone(), group_height(group, &budget))),
    );

    debug!(
        pages = pages.len(),
        inline = placement.inline.len(),
        carry_pages = placement.carry.len(),
        "Document layout complete"
    );

    Ok(DocumentLayout {
        pages,
        placement,
        budget,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
