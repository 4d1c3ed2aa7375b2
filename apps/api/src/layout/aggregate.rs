//! Per-category aggregates for the "category subtotal only" and "quantity only" display
//! modes. Pure side computation: nothing here feeds pagination.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::layout::flatten::order_categories;
use crate::models::document::CategoryRecord;

/// How the renderer presents line items. Page boundaries are identical in every mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Itemized,
    CategorySubtotals,
    QuantityOnly,
}

impl DisplayMode {
    pub fn needs_aggregates(self) -> bool {
        !matches!(self, DisplayMode::Itemized)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAggregate {
    pub name: String,
    /// Σ unit_price × quantity over the category's items.
    pub subtotal: f64,
    pub quantity: f64,
    pub item_count: usize,
}

/// Sums every category's items, in print order. Records sharing a name are merged into
/// the first occurrence.
pub fn aggregate_categories(categories: &[CategoryRecord]) -> Vec<CategoryAggregate> {
    let mut aggregates: Vec<CategoryAggregate> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for category in order_categories(categories) {
        let slot = *index.entry(category.name.as_str()).or_insert_with(|| {
            aggregates.push(CategoryAggregate {
                name: category.name.clone(),
                subtotal: 0.0,
                quantity: 0.0,
                item_count: 0,
            });
            aggregates.len() - 1
        });

        let entry = &mut aggregates[slot];
        for item in &category.items {
            entry.subtotal += item.line_total();
            entry.quantity += item.quantity;
            entry.item_count += 1;
        }
    }

    aggregates
}
