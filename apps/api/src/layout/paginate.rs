//! Primary pagination — greedy first-fit of content units into fixed-budget pages.
//!
//! Units are never split and never reordered. A unit taller than an empty page is still
//! placed, alone, so the loop always makes progress.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::layout::flatten::ContentUnit;
use crate::layout::geometry::LayoutBudget;
use crate::layout::trailing::TrailingBlockKind;

// ────────────────────────────────────────────────────────────────────────────
// Page model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Column header plus content rows (and possibly inline trailing blocks).
    Rows,
    /// Trailing blocks only, no column header.
    Trailing,
}

/// One physical output page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub kind: PageKind,
    pub units: Vec<ContentUnit>,
    /// Trailing blocks rendered on this page, in render order.
    pub blocks: Vec<TrailingBlockKind>,
    /// Height consumed by `units` (rows pages) or by `blocks` and their gaps (trailing
    /// pages). The column header is not included.
    pub used_height: f32,
}

impl Page {
    pub fn rows(units: Vec<ContentUnit>, used_height: f32) -> Self {
        Self {
            kind: PageKind::Rows,
            units,
            blocks: Vec::new(),
            used_height,
        }
    }

    pub fn trailing(blocks: Vec<TrailingBlockKind>, used_height: f32) -> Self {
        Self {
            kind: PageKind::Trailing,
            units: Vec::new(),
            blocks,
            used_height,
        }
    }

    /// Page-number stamp printed in the footer.
    pub fn stamp(index: usize, total: usize) -> String {
        format!("Page {} of {}", index + 1, total)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// First-fit packing
// ────────────────────────────────────────────────────────────────────────────

/// A closed group of items and the height they consume, gaps included.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Bin<T> {
    pub items: Vec<T>,
    pub used: f32,
}

struct BinCursor<T> {
    capacity: f32,
    gap: f32,
    items: Vec<T>,
    used: f32,
}

impl<T> BinCursor<T> {
    fn new(capacity: f32, gap: f32) -> Self {
        Self {
            capacity,
            gap,
            items: Vec::new(),
            used: 0.0,
        }
    }

    fn cost(&self, height: f32) -> f32 {
        if self.items.is_empty() {
            height
        } else {
            height + self.gap
        }
    }

    fn fits(&self, height: f32) -> bool {
        self.cost(height) <= self.capacity - self.used
    }

    fn place(&mut self, item: T, height: f32) {
        self.used += self.cost(height);
        self.items.push(item);
    }

    fn finalize(&mut self) -> Bin<T> {
        Bin {
            items: std::mem::take(&mut self.items),
            used: std::mem::replace(&mut self.used, 0.0),
        }
    }
}

/// Packs `items` in arrival order into bins of `capacity`, inserting `gap` between
/// consecutive items in a bin. No lookahead, no reordering. Empty input yields no bins.
pub(crate) fn pack_in_order<T>(
    items: impl IntoIterator<Item = T>,
    capacity: f32,
    gap: f32,
    height_of: impl Fn(&T) -> f32,
) -> Vec<Bin<T>> {
    let mut bins = Vec::new();
    let mut cursor = BinCursor::new(capacity, gap);

    for item in items {
        let height = height_of(&item);
        if !cursor.fits(height) && !cursor.items.is_empty() {
            bins.push(cursor.finalize());
        }
        if cursor.items.is_empty() && height > capacity {
            warn!(
                height,
                capacity, "Item taller than a full page; placing it on its own page"
            );
        }
        cursor.place(item, height);
    }

    if !cursor.items.is_empty() {
        bins.push(cursor.finalize());
    }

    bins
}

/// Assigns every unit to a `rows` page. Each page's budget is the content budget minus
/// the column header repeated at its top.
pub fn paginate(units: Vec<ContentUnit>, budget: &LayoutBudget) -> Vec<Page> {
    let unit_count = units.len();
    let pages: Vec<Page> = pack_in_order(units, budget.rows_budget(), 0.0, ContentUnit::height)
        .into_iter()
        .map(|bin| Page::rows(bin.items, bin.used))
        .collect();

    debug!(
        units = unit_count,
        pages = pages.len(),
        rows_budget = budget.rows_budget(),
        "Primary pagination complete"
    );

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::LineItem;

    fn make_budget(content_budget: f32) -> LayoutBudget {
        LayoutBudget {
            content_budget,
            column_header_height: 10.0,
            row_height: 10.0,
            category_row_height: 10.0,
            block_gap: 0.0,
            headroom: 0.0,
            totals_height: 40.0,
            terms_height: 30.0,
            banking_height: 50.0,
        }
    }

    fn item(label: &str, height: f32) -> ContentUnit {
        ContentUnit::Item {
            item: LineItem::new(label, 1.0, 1.0),
            height,
        }
    }

    fn labels(page: &Page) -> Vec<String> {
        page.units
            .iter()
            .map(|u| match u {
                ContentUnit::Item { item, .. } => item.description.clone(),
                ContentUnit::Category { name, .. } => name.clone(),
            })
            .collect()
    }

    #[test]
    fn test_everything_fits_on_one_page() {
        // 110 budget - 10 header = 100 → ten 10-unit rows fit exactly.
        let units: Vec<ContentUnit> = (0..10).map(|i| item(&i.to_string(), 10.0)).collect();
        let pages = paginate(units, &make_budget(110.0));
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].kind, PageKind::Rows);
        assert_eq!(pages[0].units.len(), 10);
        assert_eq!(pages[0].used_height, 100.0);
    }

    #[test]
    fn test_overflow_starts_new_page() {
        let units: Vec<ContentUnit> = (0..11).map(|i| item(&i.to_string(), 10.0)).collect();
        let pages = paginate(units, &make_budget(110.0));
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].units.len(), 10);
        assert_eq!(labels(&pages[1]), vec!["10"]);
    }

    #[test]
    fn test_no_lookahead_for_smaller_units() {
        // 100 rows budget: 60 + 50 does not fit, the later 30 must NOT jump ahead.
        let units = vec![item("a", 60.0), item("b", 50.0), item("c", 30.0)];
        let pages = paginate(units, &make_budget(110.0));
        assert_eq!(pages.len(), 2);
        assert_eq!(labels(&pages[0]), vec!["a"]);
        assert_eq!(labels(&pages[1]), vec!["b", "c"]);
    }

    #[test]
    fn test_oversized_unit_gets_its_own_page() {
        let units = vec![item("small", 10.0), item("huge", 500.0), item("after", 10.0)];
        let pages = paginate(units, &make_budget(110.0));
        assert_eq!(pages.len(), 3);
        assert_eq!(labels(&pages[0]), vec!["small"]);
        assert_eq!(labels(&pages[1]), vec!["huge"]);
        assert_eq!(labels(&pages[2]), vec!["after"]);
    }

    #[test]
    fn test_oversized_first_unit_is_not_preceded_by_empty_page() {
        let pages = paginate(vec![item("huge", 500.0)], &make_budget(110.0));
        assert_eq!(pages.len(), 1);
        assert_eq!(labels(&pages[0]), vec!["huge"]);
    }

    #[test]
    fn test_empty_input_yields_no_pages() {
        assert!(paginate(Vec::new(), &make_budget(110.0)).is_empty());
    }

    #[test]
    fn test_pack_in_order_counts_gaps_between_items() {
        // capacity 100, gap 5: 30 + (5+30) + (5+30) = 100 fits, a fourth does not.
        let bins = pack_in_order(vec![30.0_f32; 4], 100.0, 5.0, |h| *h);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].items.len(), 3);
        assert_eq!(bins[0].used, 100.0);
        assert_eq!(bins[1].used, 30.0);
    }

    #[test]
    fn test_page_stamp_is_one_based() {
        assert_eq!(Page::stamp(0, 3), "Page 1 of 3");
        assert_eq!(Page::stamp(2, 3), "Page 3 of 3");
    }
}
