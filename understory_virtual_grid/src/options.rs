// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-supplied grid configuration.

use kurbo::Insets;

use crate::Axis;

/// Default delay after the last scroll recalculation before `scrolling` clears.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 150;

/// Default minimum scroll movement, in pixels, that counts as a scroll.
pub const DEFAULT_MIN_SCROLL_DELTA: f64 = 1.0;

/// Configuration of a virtual grid.
///
/// ```rust
/// use understory_virtual_grid::{Axis, GridOptions};
///
/// let options = GridOptions::default()
///     .with_gap(16.0)
///     .with_padding_trbl([8.0, 4.0, 8.0, 4.0])
///     .with_axis(Axis::Horizontal);
/// assert_eq!(options.off_screen_pages, 1);
/// assert_eq!(options.padding.y0, 8.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOptions {
    /// Space between adjacent items, in pixels.
    pub gap: f64,
    /// Padding inside the grid container.
    pub padding: Insets,
    /// Scroll direction.
    pub axis: Axis,
    /// Pages kept mounted on each side of the current page.
    pub off_screen_pages: usize,
    /// Quiet period after a scroll update before the grid reports it stopped scrolling.
    pub settle_delay_ms: u64,
    /// Scroll movements smaller than this are treated as noise.
    pub min_scroll_delta: f64,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            gap: 0.0,
            padding: Insets::ZERO,
            axis: Axis::Vertical,
            off_screen_pages: 1,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            min_scroll_delta: DEFAULT_MIN_SCROLL_DELTA,
        }
    }
}

impl GridOptions {
    /// Sets the gap between items. Negative values are clamped to zero.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap.max(0.0);
        self
    }

    /// Sets the container padding.
    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the container padding from `[top, right, bottom, left]`.
    #[must_use]
    pub fn with_padding_trbl(self, padding: [f64; 4]) -> Self {
        self.with_padding(padding_from_trbl(padding))
    }

    /// Sets the scroll direction.
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Sets how many pages to keep mounted on each side of the current one.
    #[must_use]
    pub fn with_off_screen_pages(mut self, pages: usize) -> Self {
        self.off_screen_pages = pages;
        self
    }

    /// Sets the scroll settle delay in milliseconds.
    #[must_use]
    pub fn with_settle_delay_ms(mut self, delay: u64) -> Self {
        self.settle_delay_ms = delay;
        self
    }

    /// Sets the minimum scroll movement that triggers a page update.
    #[must_use]
    pub fn with_min_scroll_delta(mut self, delta: f64) -> Self {
        self.min_scroll_delta = delta.max(0.0);
        self
    }
}

/// Converts CSS-ordered `[top, right, bottom, left]` padding into [`Insets`].
#[must_use]
pub fn padding_from_trbl([top, right, bottom, left]: [f64; 4]) -> Insets {
    Insets::new(left, top, right, bottom)
}
