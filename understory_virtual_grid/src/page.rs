// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between scroll offsets and pages.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Insets, Vec2};

use crate::geometry::to_count;
use crate::{Layout, compute_scroll_offset, round_to};

/// Where the viewport currently sits, in item and page terms.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageState {
    /// Fractional line position of the viewport center, to one decimal.
    pub index: f64,
    /// 1-based current page, within `1..=layout.pages`.
    pub page: usize,
    /// Fractional line positions of the viewport start and end, to one decimal.
    pub page_range: [f64; 2],
}

impl PageState {
    /// State before anything has been measured.
    pub const INITIAL: Self = Self {
        index: 1.0,
        page: 1,
        page_range: [0.0, 0.0],
    };

    /// State reported when the layout cannot be used for paging.
    pub const DEGENERATE: Self = Self {
        index: 0.0,
        page: 1,
        page_range: [0.0, 0.0],
    };
}

impl Default for PageState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Derives the page under a scroll offset along the layout's scroll axis.
///
/// Positions are measured in lines of `item + gap`. The page is the one that
/// contains the last line reaching into the viewport, using the viewport end
/// rounded to a whole line so that a scroll stopping a hair short of an item
/// edge does not report the previous page.
///
/// Non-finite inputs give [`PageState::DEGENERATE`].
#[must_use]
pub fn detect_page(scroll_offset: f64, layout: &Layout, gap: f64) -> PageState {
    let unit = layout.item_main() + gap;
    let viewport = layout.viewport_main();
    let lines_on_page = layout.lines_on_viewport();

    if !scroll_offset.is_finite()
        || !layout.is_finite()
        || !unit.is_finite()
        || unit <= 0.0
        || lines_on_page == 0
    {
        return PageState::DEGENERATE;
    }

    let start = round_to(scroll_offset / unit, 1);
    let end = round_to((scroll_offset + viewport) / unit, 1);
    let index = round_to((scroll_offset + viewport / 2.0) / unit, 1);

    let last_line = (end.round() - 1.0).max(0.0);
    let page = to_count((last_line / lines_on_page as f64).floor()) + 1;

    PageState {
        index,
        page: page.clamp(1, layout.pages.max(1)),
        page_range: [start, end],
    }
}

/// [`detect_page`] for a 2D scroll position; the component on the layout's
/// scroll axis is used.
#[must_use]
pub fn page_from_scroll_position(position: Vec2, layout: &Layout, gap: f64) -> PageState {
    detect_page(layout.axis.offset_of(position), layout, gap)
}

/// Scroll offset that brings 1-based `page` to the start of the viewport.
///
/// Uses the on-viewport line count and the leading padding (top or left) of
/// the layout's scroll axis. Out-of-range pages are not clamped.
#[must_use]
pub fn scroll_offset_for_page(layout: &Layout, page: usize, gap: f64, padding: Insets) -> f64 {
    compute_scroll_offset(
        page,
        layout.item_main(),
        gap,
        layout.axis.leading(padding),
        layout.rows_on_viewport,
        layout.columns_on_viewport,
        layout.axis,
    )
}
