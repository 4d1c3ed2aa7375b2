#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One priced line on a quote, invoice or bill of materials.
///
/// Fields the layout engine does not interpret (SKU, warranty, notes, ...) are kept in
/// `extra` and handed back to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            extra: Map::new(),
        }
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity
    }
}

/// A named product category and its line items, in the order the caller supplied them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub name: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl CategoryRecord {
    pub fn new(name: impl Into<String>, items: Vec<LineItem>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }
}

/// Monetary summary rendered by the `totals` trailing block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalsRecord {
    pub subtotal: f64,
    #[serde(default)]
    pub extras: f64,
    pub vat_percent: f64,
    pub vat_amount: f64,
    pub grand_total: f64,
}

/// Payment schedule rendered by the `terms` trailing block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTerms {
    pub deposit_percent: f64,
    pub delivery_percent: f64,
    pub commissioning_percent: f64,
}

impl PaymentTerms {
    pub fn total_percent(&self) -> f64 {
        self.deposit_percent + self.delivery_percent + self.commissioning_percent
    }

    /// True when the three stages add up to 100% (within a cent of a percent).
    pub fn is_balanced(&self) -> bool {
        (self.total_percent() - 100.0).abs() < 0.01
    }
}
