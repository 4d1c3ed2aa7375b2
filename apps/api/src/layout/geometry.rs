//! Page geometry — the single source of truth for "how much fits where".
//!
//! Physical measurements are given in millimetres and converted once per layout run into
//! a linear layout unit (CSS pixels for the stock profiles). Every row and block height is
//! padded with the safety margin *before* conversion so rounding in the print renderer never
//! pushes content past the physical page edge.

use serde::{Deserialize, Serialize};

use crate::layout::error::LayoutError;
use crate::layout::trailing::TrailingBlockKind;

/// CSS pixels per millimetre at 96 dpi.
pub const PX_PER_MM: f32 = 96.0 / 25.4;

// ────────────────────────────────────────────────────────────────────────────
// Physical geometry
// ────────────────────────────────────────────────────────────────────────────

/// Declared heights of the trailing summary blocks, in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockHeights {
    pub totals_mm: f32,
    pub terms_mm: f32,
    pub banking_mm: f32,
}

impl BlockHeights {
    pub fn get(&self, kind: TrailingBlockKind) -> f32 {
        match kind {
            TrailingBlockKind::Totals => self.totals_mm,
            TrailingBlockKind::Terms => self.terms_mm,
            TrailingBlockKind::Banking => self.banking_mm,
        }
    }
}

/// Physical page and section measurements for one printed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_height_mm: f32,
    pub header_height_mm: f32,
    pub footer_height_mm: f32,
    pub top_padding_mm: f32,
    /// Table header row repeated at the top of every `rows` page.
    pub column_header_mm: f32,
    pub row_mm: f32,
    pub category_row_mm: f32,
    pub blocks: BlockHeights,
    /// Vertical gap between consecutive trailing blocks on the same page.
    pub block_gap_mm: f32,
    /// Length → layout unit conversion constant.
    pub units_per_mm: f32,
    /// Added to every row and block height before conversion.
    pub safety_margin_mm: f32,
    /// Reserved below the remaining space on the last `rows` page before placing blocks.
    pub headroom_mm: f32,
}

/// Derived budgets in layout units. Computed once per run and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutBudget {
    /// Space for rows on any content page (header, footer and top padding removed).
    pub content_budget: f32,
    pub column_header_height: f32,
    pub row_height: f32,
    pub category_row_height: f32,
    pub block_gap: f32,
    pub headroom: f32,
    pub totals_height: f32,
    pub terms_height: f32,
    pub banking_height: f32,
}

impl LayoutBudget {
    /// Budget for content units on a freshly opened `rows` page.
    pub fn rows_budget(&self) -> f32 {
        self.content_budget - self.column_header_height
    }

    pub fn block_height(&self, kind: TrailingBlockKind) -> f32 {
        match kind {
            TrailingBlockKind::Totals => self.totals_height,
            TrailingBlockKind::Terms => self.terms_height,
            TrailingBlockKind::Banking => self.banking_height,
        }
    }
}

impl PageGeometry {
    /// Validates the measurements and converts them into a [`LayoutBudget`].
    ///
    /// Fails fast on negative or non-finite input, and when the content budget cannot hold
    /// even the column header, which would otherwise produce endless empty pages.
    pub fn budget(&self) -> Result<LayoutBudget, LayoutError> {
        self.validate()?;

        let to_units = |mm: f32| mm * self.units_per_mm;
        let padded = |mm: f32| (mm + self.safety_margin_mm) * self.units_per_mm;

        let content_budget = to_units(
            self.page_height_mm - self.header_height_mm - self.footer_height_mm - self.top_padding_mm,
        );
        let column_header_height = padded(self.column_header_mm);

        if content_budget <= column_header_height {
            return Err(LayoutError::DegenerateGeometry {
                content_budget,
                column_header: column_header_height,
            });
        }

        Ok(LayoutBudget {
            content_budget,
            column_header_height,
            row_height: padded(self.row_mm),
            category_row_height: padded(self.category_row_mm),
            block_gap: to_units(self.block_gap_mm),
            headroom: to_units(self.headroom_mm),
            totals_height: padded(self.blocks.totals_mm),
            terms_height: padded(self.blocks.terms_mm),
            banking_height: padded(self.blocks.banking_mm),
        })
    }

    fn validate(&self) -> Result<(), LayoutError> {
        let fields: [(&'static str, f32); 13] = [
            ("page_height_mm", self.page_height_mm),
            ("header_height_mm", self.header_height_mm),
            ("footer_height_mm", self.footer_height_mm),
            ("top_padding_mm", self.top_padding_mm),
            ("column_header_mm", self.column_header_mm),
            ("row_mm", self.row_mm),
            ("category_row_mm", self.category_row_mm),
            ("blocks.totals_mm", self.blocks.totals_mm),
            ("blocks.terms_mm", self.blocks.terms_mm),
            ("blocks.banking_mm", self.blocks.banking_mm),
            ("block_gap_mm", self.block_gap_mm),
            ("safety_margin_mm", self.safety_margin_mm),
            ("headroom_mm", self.headroom_mm),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidMeasurement { field, value });
            }
        }

        if !self.units_per_mm.is_finite() || self.units_per_mm <= 0.0 {
            return Err(LayoutError::InvalidMeasurement {
                field: "units_per_mm",
                value: self.units_per_mm,
            });
        }

        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
