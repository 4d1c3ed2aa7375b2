//! Trailing-block placement — decides whether the totals, payment-terms and banking blocks
//! render under the last content rows or spill onto dedicated carry pages.
//!
//! # Placement rules
//! - Inline: walk blocks in priority order against the space left on the last `rows` page
//!   (minus headroom). The first block that does not fit stops the walk; it and every later
//!   block are carried, so render priority is never inverted.
//! - Carry: deferred blocks are packed first-fit, in order, onto full-budget pages with no
//!   column header.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::error::LayoutError;
use crate::layout::geometry::LayoutBudget;
use crate::layout::paginate::pack_in_order;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// The summary blocks printed after all content rows. Declaration order is render
/// priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingBlockKind {
    Totals,
    Terms,
    Banking,
}

impl TrailingBlockKind {
    pub const ALL: [TrailingBlockKind; 3] = [
        TrailingBlockKind::Totals,
        TrailingBlockKind::Terms,
        TrailingBlockKind::Banking,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TrailingBlockKind::Totals => "totals",
            TrailingBlockKind::Terms => "terms",
            TrailingBlockKind::Banking => "banking",
        }
    }
}

impl fmt::Display for TrailingBlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailingBlock {
    pub kind: TrailingBlockKind,
    /// Margin-adjusted height in layout units.
    pub height: f32,
}

/// Where each trailing block ended up. Every block appears exactly once, either inline or
/// in exactly one carry group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    /// Blocks rendered on the last `rows` page, in render order.
    pub inline: Vec<TrailingBlockKind>,
    /// One entry per carry page, each in render order.
    pub carry: Vec<Vec<TrailingBlockKind>>,
}

impl PlacementResult {
    pub fn placed_count(&self) -> usize {
        self.inline.len() + self.carry.iter().map(Vec::len).sum::<usize>()
    }

    pub fn is_inline(&self, kind: TrailingBlockKind) -> bool {
        self.inline.contains(&kind)
    }

    /// Index of the carry group holding `kind`, if it was carried.
    pub fn carry_page_of(&self, kind: TrailingBlockKind) -> Option<usize> {
        self.carry.iter().position(|group| group.contains(&kind))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Block resolution
// ────────────────────────────────────────────────────────────────────────────

/// Attaches budget heights to the declared block set and sorts it into render priority.
pub fn resolve_blocks(
    kinds: &[TrailingBlockKind],
    budget: &LayoutBudget,
) -> Result<Vec<TrailingBlock>, LayoutError> {
    let mut seen = HashSet::new();
    for &kind in kinds {
        if !seen.insert(kind) {
            return Err(LayoutError::DuplicateTrailingBlock(kind));
        }
    }

    let mut blocks: Vec<TrailingBlock> = kinds
        .iter()
        .map(|&kind| TrailingBlock {
            kind,
            height: budget.block_height(kind),
        })
        .collect();
    blocks.sort_by_key(|b| b.kind);
    Ok(blocks)
}

// ────────────────────────────────────────────────────────────────────────────
// Placement
// ────────────────────────────────────────────────────────────────────────────

/// Places `blocks` (already in priority order) given the content height used on the last
/// `rows` page. The column header on that page is charged separately from `used_on_last_page`.
pub fn place_trailing_blocks(
    blocks: &[TrailingBlock],
    used_on_last_page: f32,
    budget: &LayoutBudget,
) -> PlacementResult {
    let mut remaining =
        budget.content_budget - budget.column_header_height - used_on_last_page - budget.headroom;

    let mut inline = Vec::new();
    let mut split_at = blocks.len();

    for (i, block) in blocks.iter().enumerate() {
        let gap = if inline.is_empty() { 0.0 } else { budget.block_gap };
        if block.height + gap <= remaining {
            remaining -= block.height + gap;
            inline.push(block.kind);
        } else {
            split_at = i;
            break;
        }
    }

    let carry: Vec<Vec<TrailingBlockKind>> = pack_in_order(
        blocks[split_at..].iter().copied(),
        budget.content_budget,
        budget.block_gap,
        |b: &TrailingBlock| b.height,
    )
    .into_iter()
    .map(|bin| bin.items.into_iter().map(|b| b.kind).collect())
    .collect();

    debug!(
        used_on_last_page,
        inline = inline.len(),
        carry_pages = carry.len(),
        "Trailing blocks placed"
    );

    PlacementResult { inline, carry }
}

/// Heights of a carry group including the gaps between its blocks.
pub fn group_height(group: &[TrailingBlockKind], budget: &LayoutBudget) -> f32 {
    let blocks: f32 = group.iter().map(|&k| budget.block_height(k)).sum();
    let gaps = group.len().saturating_sub(1) as f32 * budget.block_gap;
    blocks + gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::TrailingBlockKind::{Banking, Terms, Totals};

    /// content 210, header 10 → 200 for rows; blocks 40/30/50, gap 5, headroom 10.
    fn make_budget() -> LayoutBudget {
        LayoutBudget {
            content_budget: 210.0,
            column_header_height: 10.0,
            row_height: 10.0,
            category_row_height: 10.0,
            block_gap: 5.0,
            headroom: 10.0,
            totals_height: 40.0,
            terms_height: 30.0,
            banking_height: 50.0,
        }
    }

    fn all_blocks(budget: &LayoutBudget) -> Vec<TrailingBlock> {
        resolve_blocks(&TrailingBlockKind::ALL, budget).unwrap()
    }

    #[test]
    fn test_all_blocks_inline_when_page_is_short() {
        let budget = make_budget();
        // remaining = 210 - 10 - 20 - 10 = 170 ≥ 40 + 35 + 55 = 130
        let result = place_trailing_blocks(&all_blocks(&budget), 20.0, &budget);
        assert_eq!(result.inline, vec![Totals, Terms, Banking]);
        assert!(result.carry.is_empty());
    }

    #[test]
    fn test_exact_fit_is_accepted() {
        let budget = make_budget();
        // remaining = 190 - used; used = 60 → 130 == 40 + 35 + 55
        let result = place_trailing_blocks(&all_blocks(&budget), 60.0, &budget);
        assert_eq!(result.inline, vec![Totals, Terms, Banking]);
    }

    #[test]
    fn test_rejection_defers_all_later_blocks() {
        let budget = make_budget();
        // remaining = 190 - 110 = 80: totals (40) fits, terms (35) fits → 5 left, banking no.
        let result = place_trailing_blocks(&all_blocks(&budget), 110.0, &budget);
        assert_eq!(result.inline, vec![Totals, Terms]);
        assert_eq!(result.carry, vec![vec![Banking]]);
    }

    #[test]
    fn test_smaller_later_block_never_jumps_ahead() {
        let mut budget = make_budget();
        budget.totals_height = 100.0;
        budget.terms_height = 10.0;
        // remaining = 190 - 120 = 70: totals (100) rejected, terms (10) would fit but must not.
        let result = place_trailing_blocks(&all_blocks(&budget), 120.0, &budget);
        assert!(result.inline.is_empty());
        assert_eq!(result.carry, vec![vec![Totals, Terms, Banking]]);
    }

    #[test]
    fn test_full_page_carries_everything_to_one_page() {
        let budget = make_budget();
        let result = place_trailing_blocks(&all_blocks(&budget), 200.0, &budget);
        assert!(result.inline.is_empty());
        assert_eq!(result.carry.len(), 1);
        assert_eq!(result.carry[0], vec![Totals, Terms, Banking]);
    }

    #[test]
    fn test_carry_splits_across_pages_when_needed() {
        let mut budget = make_budget();
        budget.totals_height = 120.0;
        budget.terms_height = 80.0;
        budget.banking_height = 100.0;
        // carry capacity 210: 120 + (5+80) = 205; banking needs its own page.
        let result = place_trailing_blocks(&all_blocks(&budget), 200.0, &budget);
        assert_eq!(result.carry, vec![vec![Totals, Terms], vec![Banking]]);
    }

    #[test]
    fn test_oversized_block_carried_alone() {
        let mut budget = make_budget();
        budget.terms_height = 400.0;
        let result = place_trailing_blocks(&all_blocks(&budget), 0.0, &budget);
        assert_eq!(result.inline, vec![Totals]);
        assert_eq!(result.carry, vec![vec![Terms], vec![Banking]]);
    }

    #[test]
    fn test_every_block_placed_exactly_once() {
        let budget = make_budget();
        let blocks = all_blocks(&budget);
        for used in [0.0, 50.0, 100.0, 150.0, 200.0, 250.0] {
            let result = place_trailing_blocks(&blocks, used, &budget);
            assert_eq!(result.placed_count(), 3, "used={used}");
            for kind in TrailingBlockKind::ALL {
                let inline = result.is_inline(kind) as usize;
                let carried = result
                    .carry
                    .iter()
                    .filter(|g| g.contains(&kind))
                    .count();
                assert_eq!(inline + carried, 1, "{kind} placed {inline}+{carried} times");
            }
        }
    }

    #[test]
    fn test_empty_block_set_places_nothing() {
        let budget = make_budget();
        let result = place_trailing_blocks(&[], 0.0, &budget);
        assert_eq!(result, PlacementResult::default());
    }

    #[test]
    fn test_resolve_sorts_into_priority_order() {
        let budget = make_budget();
        let blocks = resolve_blocks(&[Banking, Totals], &budget).unwrap();
        assert_eq!(blocks[0].kind, Totals);
        assert_eq!(blocks[0].height, 40.0);
        assert_eq!(blocks[1].kind, Banking);
    }

    #[test]
    fn test_resolve_rejects_duplicates() {
        let budget = make_budget();
        assert_eq!(
            resolve_blocks(&[Totals, Terms, Totals], &budget).unwrap_err(),
            LayoutError::DuplicateTrailingBlock(Totals)
        );
    }

    #[test]
    fn test_group_height_includes_gaps() {
        let budget = make_budget();
        assert_eq!(group_height(&[Totals, Terms, Banking], &budget), 130.0);
        assert_eq!(group_height(&[Banking], &budget), 50.0);
        assert_eq!(group_height(&[], &budget), 0.0);
    }

    #[test]
    fn test_carry_page_lookup() {
        let budget = make_budget();
        let result = place_trailing_blocks(&all_blocks(&budget), 110.0, &budget);
        assert_eq!(result.carry_page_of(Banking), Some(0));
        assert_eq!(result.carry_page_of(Totals), None);
    }

    #[test]
    fn test_display_uses_wire_names() {
        assert_eq!(Totals.to_string(), "totals");
        assert_eq!(
            serde_json::to_string(&Banking).unwrap(),
            "\"banking\""
        );
    }
}
