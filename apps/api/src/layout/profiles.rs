//! Stock layouts for the three printed documents.
//!
//! All three share one engine; they differ only in margins and in which trailing blocks
//! they print. Measurements are for A4 portrait at 96 dpi.

use serde::{Deserialize, Serialize};

use crate::layout::geometry::{BlockHeights, PageGeometry, PX_PER_MM};
use crate::layout::trailing::TrailingBlockKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Bill of materials attached to a project quote.
    BillOfMaterials,
    /// Tax invoice issued against a quote.
    TaxInvoice,
    /// Invoice printed from a completed installation job card.
    JobCardInvoice,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::BillOfMaterials,
        DocumentKind::TaxInvoice,
        DocumentKind::JobCardInvoice,
    ];
}

/// Geometry and block set for one document kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutProfile {
    pub kind: DocumentKind,
    pub geometry: PageGeometry,
    pub trailing_blocks: Vec<TrailingBlockKind>,
    pub show_empty_categories: bool,
}

fn a4_geometry(safety_margin_mm: f32, headroom_mm: f32) -> PageGeometry {
    PageGeometry {
        page_height_mm: 297.0,
        header_height_mm: 45.0,
        footer_height_mm: 18.0,
        top_padding_mm: 6.0,
        column_header_mm: 8.0,
        row_mm: 7.0,
        category_row_mm: 8.0,
        blocks: BlockHeights {
            totals_mm: 42.0,
            terms_mm: 34.0,
            banking_mm: 48.0,
        },
        block_gap_mm: 4.0,
        units_per_mm: PX_PER_MM,
        safety_margin_mm,
        headroom_mm,
    }
}

pub fn profile(kind: DocumentKind) -> LayoutProfile {
    match kind {
        DocumentKind::BillOfMaterials => LayoutProfile {
            kind,
            geometry: a4_geometry(0.5, 6.0),
            trailing_blocks: TrailingBlockKind::ALL.to_vec(),
            show_empty_categories: true,
        },
        DocumentKind::TaxInvoice => LayoutProfile {
            kind,
            geometry: a4_geometry(0.5, 6.0),
            trailing_blocks: vec![TrailingBlockKind::Totals, TrailingBlockKind::Banking],
            show_empty_categories: true,
        },
        // Job cards print through a different template with looser rounding.
        DocumentKind::JobCardInvoice => LayoutProfile {
            kind,
            geometry: a4_geometry(0.8, 10.0),
            trailing_blocks: TrailingBlockKind::ALL.to_vec(),
            show_empty_categories: true,
        },
    }
}

pub fn all_profiles() -> Vec<LayoutProfile> {
    DocumentKind::ALL.into_iter().map(profile).collect()
}
