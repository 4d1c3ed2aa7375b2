//! Content flattening — turns category → items input into the linear unit stream the
//! paginator consumes.
//!
//! Ordering rules:
//! - The three canonical categories come first, in [`CATEGORY_PRIORITY`] order
//!   (exact name match, case-insensitive).
//! - Every other category follows alphabetically (case-insensitive).
//! - Categories with the same sort key keep their input order; items always keep theirs.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::layout::geometry::LayoutBudget;
use crate::models::document::{CategoryRecord, LineItem};

/// Categories that always lead a document, in print order.
pub const CATEGORY_PRIORITY: [&str; 3] = ["Solar Panels", "Inverters", "Batteries"];

/// One indivisible row of the printed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentUnit {
    /// Category heading row.
    Category { name: String, height: f32 },
    /// Priced line item row.
    Item { item: LineItem, height: f32 },
}

impl ContentUnit {
    pub fn height(&self) -> f32 {
        match self {
            ContentUnit::Category { height, .. } | ContentUnit::Item { height, .. } => *height,
        }
    }

    pub fn is_category(&self) -> bool {
        matches!(self, ContentUnit::Category { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenOptions {
    /// Emit a heading even for a category without items.
    pub show_empty_categories: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            show_empty_categories: true,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Ordering
// ────────────────────────────────────────────────────────────────────────────

fn priority_rank(name: &str) -> Option<usize> {
    let lowered = name.to_lowercase();
    CATEGORY_PRIORITY
        .iter()
        .position(|p| p.to_lowercase() == lowered)
}

fn compare_category_names(a: &str, b: &str) -> Ordering {
    match (priority_rank(a), priority_rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Returns the categories in print order. The sort is stable, so duplicate names keep
/// their relative input order.
pub fn order_categories(categories: &[CategoryRecord]) -> Vec<&CategoryRecord> {
    let mut ordered: Vec<&CategoryRecord> = categories.iter().collect();
    ordered.sort_by(|a, b| compare_category_names(&a.name, &b.name));
    ordered
}

// ────────────────────────────────────────────────────────────────────────────
// Flattening
// ────────────────────────────────────────────────────────────────────────────

/// Emits one category marker followed by one unit per item, for every category in print
/// order. Heights come from the budget so rows and headings keep their fixed sizes.
pub fn flatten(
    categories: &[CategoryRecord],
    budget: &LayoutBudget,
    options: FlattenOptions,
) -> Vec<ContentUnit> {
    let mut units = Vec::with_capacity(
        categories.len() + categories.iter().map(|c| c.items.len()).sum::<usize>(),
    );

    for category in order_categories(categories) {
        if category.items.is_empty() && !options.show_empty_categories {
            continue;
        }
        units.push(ContentUnit::Category {
            name: category.name.clone(),
            height: budget.category_row_height,
        });
        units.extend(category.items.iter().map(|item| ContentUnit::Item {
            item: item.clone(),
            height: budget.row_height,
        }));
    }

    units
}
