#![forbid(unsafe_code)]

//! Row-wrapping flow layout.
//!
//! [`Flow`] places variable-size items left to right, starting a new row
//! whenever the next item would cross the container's right edge. The pass
//! is a pure function of its inputs: the caller owns the items and writes
//! the resulting row numbers back as hints for the next pass.
//!
//! # Pinning
//!
//! While a drag is active the caller passes `pinned = true`. An item whose
//! row hint is greater than the row currently being filled then forces a
//! break, so row boundaries from the previous pass survive the temporary
//! shuffle caused by the dragged item. Rows may still grow downwards through
//! normal wrapping; they never pull items up.
//!
//! # Invariants
//!
//! 1. Visible items appear in input order, each in exactly one row.
//! 2. Without pinning, every row holding more than one item fits inside the
//!    content width.
//! 3. An item wider than the content width sits alone in its row.
//! 4. Hidden items receive no placement and consume no space.
//!
//! # Failure Modes
//!
//! None. Negative sizes are clamped to zero when items are built.

use serde::{Deserialize, Serialize};
use tagflow_core::event::MeasureSpec;
use tagflow_core::geometry::{Rect, Sides, Size};
use tagflow_core::logging::trace;

/// Default gap between neighbouring tags, in pixels.
pub const DEFAULT_SPACING: u32 = 5;

/// One item fed to the flow pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowItem {
    /// Measured natural size.
    pub size: Size,
    /// Hidden items are skipped entirely.
    pub visible: bool,
    /// Row the item occupied after the previous pass.
    pub row_hint: usize,
}

impl FlowItem {
    /// A visible item with the given size; negative values clamp to zero.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self::from_size(Size::clamped(width, height))
    }

    /// A visible item with the given size.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self {
            size,
            visible: true,
            row_hint: 0,
        }
    }

    /// Set visibility.
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set the row hint from a previous pass.
    #[must_use]
    pub const fn row_hint(mut self, row: usize) -> Self {
        self.row_hint = row;
        self
    }
}

/// Where one visible item landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowPlacement {
    /// Index of the item in the input slice.
    pub index: usize,
    /// Rectangle in container coordinates.
    pub rect: Rect,
    /// Zero-based row.
    pub row: usize,
}

/// Result of one flow pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlowOutput {
    placements: Vec<FlowPlacement>,
    size: Size,
    rows: usize,
}

impl FlowOutput {
    /// Placements in input order.
    #[must_use]
    pub fn placements(&self) -> &[FlowPlacement] {
        &self.placements
    }

    /// Reported container size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Number of rows produced (zero when nothing was placed).
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Whether the pass broke onto a second row.
    #[must_use]
    pub const fn wrapped(&self) -> bool {
        self.rows > 1
    }

    /// Placement of the item at `index` in the input slice.
    #[must_use]
    pub fn placement_of(&self, index: usize) -> Option<&FlowPlacement> {
        self.placements
            .binary_search_by_key(&index, |p| p.index)
            .ok()
            .map(|pos| &self.placements[pos])
    }

    /// Input indices of the items in `row`, left to right.
    pub fn row_members(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.placements
            .iter()
            .filter(move |p| p.row == row)
            .map(|p| p.index)
    }
}

/// A flow layout container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flow {
    /// Gap between tags in the same row.
    pub horizontal_spacing: u32,
    /// Gap between rows.
    pub vertical_spacing: u32,
    /// Container padding.
    pub insets: Sides,
}

impl Default for Flow {
    fn default() -> Self {
        Self {
            horizontal_spacing: DEFAULT_SPACING,
            vertical_spacing: DEFAULT_SPACING,
            insets: Sides::default(),
        }
    }
}

impl Flow {
    /// Create a flow layout with default spacing and no insets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both gaps at once.
    #[must_use]
    pub fn spacing(mut self, spacing: u32) -> Self {
        self.horizontal_spacing = spacing;
        self.vertical_spacing = spacing;
        self
    }

    /// Set the gap between tags in the same row.
    #[must_use]
    pub fn horizontal_spacing(mut self, spacing: u32) -> Self {
        self.horizontal_spacing = spacing;
        self
    }

    /// Set the gap between rows.
    #[must_use]
    pub fn vertical_spacing(mut self, spacing: u32) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    /// Set the container insets.
    #[must_use]
    pub fn insets(mut self, insets: impl Into<Sides>) -> Self {
        self.insets = insets.into();
        self
    }

    /// Run one pass over `items`.
    ///
    /// `spec.width` bounds the rows; `Exact` constraints also override the
    /// reported size. `pinned` enables row pinning from each item's hint.
    pub fn layout(&self, items: &[FlowItem], spec: MeasureSpec, pinned: bool) -> FlowOutput {
        let insets = self.insets;
        let limit = spec.width.limit();
        let right_edge = limit.map(|width| width.saturating_sub(insets.right));

        let mut placements = Vec::with_capacity(items.len());
        let mut cursor_x = insets.left;
        let mut cursor_y = insets.top;
        let mut row_max_height = 0u32;
        let mut row = 0usize;
        let mut row_len = 0usize;
        let mut widest_right = insets.left;

        for (index, item) in items.iter().enumerate() {
            if !item.visible {
                continue;
            }
            let Size { width, height } = item.size;

            let pin_break = pinned && item.row_hint > row;
            let wrap_break = row_len > 0
                && right_edge.is_some_and(|edge| cursor_x.saturating_add(width) > edge);

            if pin_break || wrap_break {
                cursor_y = cursor_y
                    .saturating_add(row_max_height)
                    .saturating_add(self.vertical_spacing);
                cursor_x = insets.left;
                row_max_height = height;
                row += 1;
                row_len = 0;
            } else {
                row_max_height = row_max_height.max(height);
            }

            let rect = Rect::new(cursor_x, cursor_y, width, height);
            widest_right = widest_right.max(rect.right());
            placements.push(FlowPlacement { index, rect, row });
            row_len += 1;

            cursor_x = rect.right().saturating_add(self.horizontal_spacing);
        }

        let height = cursor_y
            .saturating_add(row_max_height)
            .saturating_add(insets.bottom);
        // Measured to the last tag's right edge: the spacing that would follow
        // it is not counted, so a one-row group hugs its tags.
        let natural_width = widest_right.saturating_add(insets.right);
        let width = match limit {
            Some(limit) if row > 0 => limit,
            _ => natural_width,
        };

        let rows = if placements.is_empty() { 0 } else { row + 1 };
        let size = Size::new(spec.width.resolve(width), spec.height.resolve(height));

        trace!(
            message = "flow.layout",
            items = items.len(),
            placed = placements.len(),
            rows,
            width = size.width,
            height = size.height,
            pinned
        );

        FlowOutput {
            placements,
            size,
            rows,
        }
    }
}
