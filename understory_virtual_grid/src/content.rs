// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mounted window of items and the padding that positions it.
//!
//! Only the current page plus `off_screen_pages` on each side are rendered.
//! Everything before and after that window is replaced by padding on the scroll
//! axis so the rendered items sit at their true scroll position and the
//! container still reports the full virtual extent.

use core::ops::Range;

use kurbo::Insets;

use crate::{Layout, MAX_SIZE};

/// Slice bounds and container styling for one page of a virtual grid.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentWindow {
    /// First mounted item (inclusive).
    pub start: usize,
    /// One past the last mounted item (exclusive).
    pub end: usize,
    /// Container padding: compensating padding on the scroll axis, user padding
    /// on the cross axis.
    pub padding: Insets,
    /// Explicit container width for horizontal grids; `None` lets the host's
    /// block flow decide.
    pub width: Option<f64>,
}

impl ContentWindow {
    /// A window over the whole collection with only the user padding applied.
    ///
    /// Used while no usable layout exists.
    #[must_use]
    pub const fn full(total: usize, padding: Insets) -> Self {
        Self {
            start: 0,
            end: total,
            padding,
            width: None,
        }
    }

    /// Mounted index range.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of mounted items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if nothing is mounted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The mounted part of `data`, clamped to its length.
    #[must_use]
    pub fn slice<'a, T>(&self, data: &'a [T]) -> &'a [T] {
        let end = self.end.min(data.len());
        let start = self.start.min(end);
        &data[start..end]
    }

    /// The mounted part of `data` paired with each item's index in `data`.
    ///
    /// Hosts use the absolute index as a stable key for rendered children.
    pub fn keyed<'a, T>(
        &self,
        data: &'a [T],
    ) -> impl Iterator<Item = (usize, &'a T)> + use<'a, T> {
        let start = self.start.min(data.len());
        self.slice(data)
            .iter()
            .enumerate()
            .map(move |(i, item)| (start + i, item))
    }
}

/// Computes the mounted window for `page`.
///
/// Pages `page - off_screen_pages ..= page + off_screen_pages` (clamped to
/// the layout) are mounted. On the scroll axis the padding before the window
/// covers the unmounted leading lines plus the user's leading padding, and the
/// padding after covers the unmounted trailing lines plus the user's trailing
/// padding. Both are non-negative and clamped so that they and the mounted
/// extent together stay within [`MAX_SIZE`]; the trailing user padding is
/// kept even when the clamp applies.
///
/// A `page` of `0` or a layout with non-finite sizes yields
/// [`ContentWindow::full`].
#[must_use]
pub fn compute_content(
    layout: &Layout,
    page: usize,
    padding: Insets,
    gap: f64,
    off_screen_pages: usize,
) -> ContentWindow {
    if page == 0 || !layout.is_finite() || !gap.is_finite() {
        return ContentWindow::full(layout.total, padding);
    }

    let axis = layout.axis;
    let min_boundary = page.saturating_sub(off_screen_pages.saturating_add(1));
    let max_boundary = page.saturating_add(off_screen_pages).min(layout.pages);

    let end = layout
        .items_per_page
        .saturating_mul(max_boundary)
        .min(layout.total);
    let start = layout
        .items_per_page
        .saturating_mul(min_boundary)
        .min(end);

    let unit = layout.item_main() + gap;
    let lines_per_page = layout.lines_on_viewport();
    let lines_before = min_boundary.saturating_mul(lines_per_page);
    let lines_after = layout
        .lines()
        .saturating_sub(max_boundary.saturating_mul(lines_per_page));
    let lines_mounted = max_boundary
        .saturating_sub(min_boundary)
        .saturating_mul(lines_per_page);

    // The user's trailing padding is reserved before clamping so the last
    // page always ends with it.
    let trailing = axis.trailing(padding).max(0.0);
    let mounted = lines_mounted as f64 * unit;
    let before = (lines_before as f64 * unit + axis.leading(padding))
        .min(MAX_SIZE - mounted - trailing)
        .max(0.0);
    let after = (lines_after as f64 * unit + trailing)
        .min(MAX_SIZE - mounted - before)
        .max(trailing);

    ContentWindow {
        start,
        end,
        padding: axis.with_main_edges(padding, before, after),
        width: layout.is_horizontal().then_some(layout.grid_width),
    }
}
