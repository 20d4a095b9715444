//! Greedy shortest-column masonry packing.
//!
//! Items are placed one at a time, in input order, into whichever column has
//! the smallest accumulated row span so far (ties go to the lowest column
//! index). Placement is online: appending an item never moves an earlier one,
//! so refreshing the same item set keeps its visual order.

use std::collections::HashMap;

use crate::error::{GalleryError, Result};
use crate::types::{GalleryItem, SpanRules};

/// Assign each span to a column, returning the column index per input span.
///
/// # Errors
/// Returns `GalleryError::InvalidColumnCount` when `column_count` is zero.
pub fn assign_columns(
    spans: impl IntoIterator<Item = u32>,
    column_count: usize,
) -> Result<Vec<usize>> {
    if column_count == 0 {
        return Err(GalleryError::InvalidColumnCount);
    }
    let mut heights = vec![0u64; column_count];
    Ok(spans
        .into_iter()
        .map(|span| place(&mut heights, span))
        .collect())
}

/// Add `span` to the shortest column and return that column's index.
fn place(heights: &mut [u64], span: u32) -> usize {
    let column = shortest_column(heights);
    if let Some(height) = heights.get_mut(column) {
        *height += u64::from(span);
    }
    column
}

fn shortest_column(heights: &[u64]) -> usize {
    heights
        .iter()
        .enumerate()
        .min_by_key(|&(idx, &height)| (height, idx))
        .map_or(0, |(idx, _)| idx)
}

/// Pack `items` into `column_count` columns using `rules` for sizing.
///
/// # Errors
/// Returns `GalleryError::InvalidColumnCount` when `column_count` is zero.
pub fn pack(items: Vec<GalleryItem>, column_count: usize, rules: SpanRules) -> Result<ColumnLayout> {
    let mut layout = ColumnLayout::empty(column_count, rules)?;
    layout.replace_items(items);
    Ok(layout)
}

/// The packed state of one item set: the items, which column each one is
/// in, and each column's running height.
///
/// Spans are never stored; they are re-derived from the item and the span
/// rules whenever needed.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    items: Vec<GalleryItem>,
    /// Column index for each item, parallel to `items`
    placements: Vec<usize>,
    /// Item indices per column, in input order
    columns: Vec<Vec<usize>>,
    /// Accumulated row span per column
    heights: Vec<u64>,
    /// First index of each item id
    index: HashMap<String, usize>,
    rules: SpanRules,
}

impl ColumnLayout {
    /// A layout with `column_count` empty columns.
    ///
    /// # Errors
    /// Returns `GalleryError::InvalidColumnCount` when `column_count` is zero.
    pub fn empty(column_count: usize, rules: SpanRules) -> Result<Self> {
        if column_count == 0 {
            return Err(GalleryError::InvalidColumnCount);
        }
        Ok(Self {
            items: Vec::new(),
            placements: Vec::new(),
            columns: vec![Vec::new(); column_count],
            heights: vec![0; column_count],
            index: HashMap::new(),
            rules,
        })
    }

    /// Replace the whole item set and pack it from scratch.
    pub fn replace_items(&mut self, items: Vec<GalleryItem>) {
        self.items.clear();
        self.index.clear();
        self.reset_columns(self.columns.len());
        self.items.reserve(items.len());
        for item in items {
            self.push(item);
        }
    }

    /// Pack again for a different column count, keeping the item set.
    ///
    /// # Errors
    /// Returns `GalleryError::InvalidColumnCount` when `column_count` is zero.
    pub fn repack(&mut self, column_count: usize) -> Result<()> {
        if column_count == 0 {
            return Err(GalleryError::InvalidColumnCount);
        }
        self.reset_columns(column_count);
        for idx in 0..self.items.len() {
            self.place_existing(idx);
        }
        Ok(())
    }

    /// Append one item to the shortest column. Earlier placements are untouched.
    ///
    /// Returns the column the item landed in.
    pub fn push(&mut self, item: GalleryItem) -> usize {
        let idx = self.items.len();
        self.index.entry(item.id.clone()).or_insert(idx);
        self.items.push(item);
        self.place_existing(idx)
    }

    /// Record a late-arriving aspect ratio for one item.
    ///
    /// Only that item's span and its column's height change; no item moves
    /// between columns. Returns `true` when the span changed.
    ///
    /// # Errors
    /// Returns `GalleryError::UnknownItem` when no item has this id.
    pub fn update_aspect_ratio(&mut self, id: &str, aspect_ratio: Option<f64>) -> Result<bool> {
        let idx = *self
            .index
            .get(id)
            .ok_or_else(|| GalleryError::UnknownItem(id.to_string()))?;
        let old_span = self.span_of(idx);
        let column = self.placements.get(idx).copied();
        let Some(item) = self.items.get_mut(idx) else {
            return Err(GalleryError::UnknownItem(id.to_string()));
        };
        item.aspect_ratio = aspect_ratio;
        let new_span = self.span_of(idx);
        if new_span == old_span {
            return Ok(false);
        }
        if let Some(height) = column.and_then(|c| self.heights.get_mut(c)) {
            *height = *height - u64::from(old_span) + u64::from(new_span);
        }
        Ok(true)
    }

    fn reset_columns(&mut self, column_count: usize) {
        self.placements.clear();
        self.columns = vec![Vec::new(); column_count];
        self.heights = vec![0; column_count];
    }

    fn place_existing(&mut self, idx: usize) -> usize {
        let span = self.span_of(idx);
        let column = place(&mut self.heights, span);
        if let Some(members) = self.columns.get_mut(column) {
            members.push(idx);
        }
        self.placements.push(column);
        column
    }

    /// Row span of the item at `idx` (0 if out of range).
    pub fn span_of(&self, idx: usize) -> u32 {
        self.items
            .get(idx)
            .map_or(0, |item| self.rules.span_for(item.orientation, item.aspect_ratio))
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn item(&self, idx: usize) -> Option<&GalleryItem> {
        self.items.get(idx)
    }

    /// Index of the first item with this id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Item indices per column, each in input order.
    pub fn columns(&self) -> &[Vec<usize>] {
        &self.columns
    }

    /// Column index per item, parallel to `items()`.
    pub fn placements(&self) -> &[usize] {
        &self.placements
    }

    /// Accumulated row span per column.
    pub fn heights(&self) -> &[u64] {
        &self.heights
    }

    pub fn rules(&self) -> &SpanRules {
        &self.rules
    }
}
