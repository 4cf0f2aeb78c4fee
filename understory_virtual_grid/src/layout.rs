// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid geometry derived from one measured item and the viewport.
//!
//! Two families of counts come out of a layout and they are easy to mix up:
//!
//! - *On-viewport* counts ([`Layout::rows_on_viewport`],
//!   [`Layout::columns_on_viewport`]) say how many items are visible at once.
//!   They are rounded to the nearest whole item, so an item that is at least
//!   half visible counts. Their product is [`Layout::items_per_page`], which
//!   makes page counts identical for a vertical and a horizontal grid over the
//!   same visual arrangement.
//! - *Capacity* counts ([`Layout::items_per_row`], [`Layout::items_per_column`])
//!   say how many items physically fit side by side in the rendered grid. They
//!   size the virtual extent.

use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Insets, Size};

use crate::geometry::to_count;
use crate::{Axis, Environment, GridOptions, calculate_grid_size, measure_bounds};

/// Immutable snapshot of the grid geometry.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    /// Viewport width as last measured.
    pub scroll_width: f64,
    /// Viewport height as last measured.
    pub scroll_height: f64,
    /// Width of one item.
    pub item_width: f64,
    /// Height of one item.
    pub item_height: f64,
    /// Rows visible at once (at least 1).
    pub rows_on_viewport: usize,
    /// Columns visible at once (at least 1).
    pub columns_on_viewport: usize,
    /// Items that fit side by side across the grid's content width, padding
    /// excluded (at least 1).
    pub items_per_row: usize,
    /// Items that fit stacked across the grid's content height, padding
    /// excluded (at least 1).
    pub items_per_column: usize,
    /// Items advanced by one page: `rows_on_viewport * columns_on_viewport`.
    pub items_per_page: usize,
    /// Total rows of the virtual grid.
    pub rows: usize,
    /// Total columns of the virtual grid.
    pub columns: usize,
    /// Number of items.
    pub total: usize,
    /// Number of pages (at least 1).
    pub pages: usize,
    /// Full virtual height of the grid.
    pub grid_height: f64,
    /// Full virtual width of the grid.
    pub grid_width: f64,
    /// Scroll direction.
    pub axis: Axis,
}

impl Layout {
    /// Returns `true` if the grid scrolls horizontally.
    #[must_use]
    pub const fn is_horizontal(&self) -> bool {
        self.axis.is_horizontal()
    }

    /// Lines (rows or columns) advanced by one page on the scroll axis.
    #[must_use]
    pub fn lines_on_viewport(&self) -> usize {
        self.axis.pick(self.rows_on_viewport, self.columns_on_viewport)
    }

    /// Total lines (rows or columns) along the scroll axis.
    #[must_use]
    pub fn lines(&self) -> usize {
        self.axis.pick(self.rows, self.columns)
    }

    /// Item extent along the scroll axis.
    #[must_use]
    pub fn item_main(&self) -> f64 {
        self.axis.pick(self.item_height, self.item_width)
    }

    /// Viewport extent along the scroll axis.
    #[must_use]
    pub fn viewport_main(&self) -> f64 {
        self.axis.pick(self.scroll_height, self.scroll_width)
    }

    /// Full virtual grid extent along the scroll axis.
    #[must_use]
    pub fn grid_main(&self) -> f64 {
        self.axis.pick(self.grid_height, self.grid_width)
    }

    /// Returns `true` if all sizes in the layout are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [
            self.scroll_width,
            self.scroll_height,
            self.item_width,
            self.item_height,
            self.grid_width,
            self.grid_height,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Returns `true` if paging over `pages` reaches every line of the grid.
    ///
    /// This fails when more items are visible across the viewport than fit
    /// across the grid, so a page advances fewer lines than its items fill.
    /// The last page then still keeps compensating padding for the lines
    /// behind it, and no page scrolls those lines to the viewport start.
    #[must_use]
    pub fn covers_virtual_extent(&self) -> bool {
        self.pages.saturating_mul(self.lines_on_viewport()) >= self.lines()
    }
}

/// Measurements a [`Layout`] is derived from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutInput {
    /// Visible viewport size (see [`measure_bounds`]).
    pub bounds: Size,
    /// Natural rendered size of the grid element.
    pub grid: Size,
    /// Size of the representative item.
    pub item: Size,
    /// Number of items.
    pub total: usize,
    /// Space between items.
    pub gap: f64,
    /// Padding inside the grid element.
    pub padding: Insets,
    /// Scroll direction.
    pub axis: Axis,
}

/// Why a layout could not be measured.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutError {
    /// No grid element was provided.
    MissingGrid,
    /// The grid has no rendered item to sample.
    NoRenderedItem,
    /// The grid or its first item could not be measured.
    DetachedTarget,
    /// A measurement was negative, NaN, or infinite.
    NonFiniteMeasurement,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::MissingGrid => "no grid element to measure",
            Self::NoRenderedItem => "grid has no rendered item to sample",
            Self::DetachedTarget => "grid or item element could not be measured",
            Self::NonFiniteMeasurement => "measurement was negative or not finite",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for LayoutError {}

/// Derives a [`Layout`] from measurements.
///
/// Returns `None` if any measurement is negative or not finite.
///
/// ```rust
/// use kurbo::{Insets, Size};
/// use understory_virtual_grid::{Axis, LayoutInput, compute_layout};
///
/// let layout = compute_layout(&LayoutInput {
///     bounds: Size::new(800.0, 800.0),
///     grid: Size::new(800.0, 800.0),
///     item: Size::new(380.0, 380.0),
///     total: 1000,
///     gap: 16.0,
///     padding: Insets::ZERO,
///     axis: Axis::Vertical,
/// })
/// .unwrap();
/// assert_eq!(layout.items_per_page, 4);
/// assert_eq!(layout.pages, 250);
/// ```
#[must_use]
pub fn compute_layout(input: &LayoutInput) -> Option<Layout> {
    let LayoutInput {
        bounds,
        grid,
        item,
        total,
        gap,
        padding,
        axis,
    } = *input;

    let sizes_ok = [bounds, grid, item]
        .iter()
        .all(|s| is_valid_length(s.width) && is_valid_length(s.height));
    let padding_ok = [padding.x0, padding.y0, padding.x1, padding.y1]
        .iter()
        .all(|v| is_valid_length(*v));
    if !sizes_ok || !padding_ok || !is_valid_length(gap) {
        return None;
    }

    let rows_on_viewport = on_viewport_count(bounds.height, item.height);
    let columns_on_viewport = on_viewport_count(bounds.width, item.width);

    let items_per_row = capacity_count(grid.width - padding.x_value(), item.width, gap);
    let items_per_column = capacity_count(grid.height - padding.y_value(), item.height, gap);

    let items_per_page = rows_on_viewport.saturating_mul(columns_on_viewport);
    let pages = total.div_ceil(items_per_page).max(1);

    let grid_size = calculate_grid_size(
        axis,
        grid,
        items_per_row,
        items_per_column,
        item,
        total,
        padding,
        gap,
    );

    let main_lines = line_count(
        axis.main(grid_size) - axis.main_padding(padding),
        axis.main(item) + gap,
    );
    let cross_lines = axis.pick(items_per_row, items_per_column);
    let (rows, columns) = axis.pick((main_lines, cross_lines), (cross_lines, main_lines));

    let layout = Layout {
        scroll_width: bounds.width,
        scroll_height: bounds.height,
        item_width: item.width,
        item_height: item.height,
        rows_on_viewport,
        columns_on_viewport,
        items_per_row,
        items_per_column,
        items_per_page,
        rows,
        columns,
        total,
        pages,
        grid_height: grid_size.height,
        grid_width: grid_size.width,
        axis,
    };

    if !layout.covers_virtual_extent() {
        log::debug!(
            "virtual grid pages ({pages} x {}) do not cover {} lines; the last page keeps trailing padding",
            layout.lines_on_viewport(),
            layout.lines()
        );
    }

    Some(layout)
}

/// Reads the grid, its first item, and the viewport from `env` and derives a layout.
///
/// The first rendered child of `grid` is the representative item; all items
/// are assumed to share its size.
pub fn try_measure_layout<E: Environment>(
    env: &E,
    scroll: Option<&E::Target>,
    grid: Option<&E::Target>,
    total: usize,
    options: &GridOptions,
) -> Result<Layout, LayoutError> {
    let grid = grid.ok_or(LayoutError::MissingGrid)?;
    let grid_size = env.measure(grid).ok_or(LayoutError::DetachedTarget)?;
    let first = env
        .first_child_of(grid)
        .ok_or(LayoutError::NoRenderedItem)?;
    let item = env.measure(&first).ok_or(LayoutError::DetachedTarget)?;
    let bounds = measure_bounds(env, scroll, Some(grid));

    compute_layout(&LayoutInput {
        bounds: bounds.size,
        grid: grid_size,
        item,
        total,
        gap: options.gap,
        padding: options.padding,
        axis: options.axis,
    })
    .ok_or(LayoutError::NonFiniteMeasurement)
}

/// Like [`try_measure_layout`], but reports failures as `None`.
///
/// A missing layout means the grid is not ready yet; callers retry on the next
/// measurement trigger.
pub fn measure_layout<E: Environment>(
    env: &E,
    scroll: Option<&E::Target>,
    grid: Option<&E::Target>,
    total: usize,
    options: &GridOptions,
) -> Option<Layout> {
    match try_measure_layout(env, scroll, grid, total, options) {
        Ok(layout) => Some(layout),
        Err(err) => {
            log::debug!("virtual grid layout unavailable: {err}");
            None
        }
    }
}

fn is_valid_length(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Items visible along an extent, rounded to the nearest whole item, at least 1.
fn on_viewport_count(extent: f64, item: f64) -> usize {
    let ratio = (extent / item).round();
    if ratio.is_finite() && ratio >= 1.0 {
        to_count(ratio)
    } else {
        1
    }
}

/// Items that fit in `length` with `gap` between neighbours, at least 1.
///
/// The last item needs no trailing gap, hence the gap added to `length`.
fn capacity_count(length: f64, item: f64, gap: f64) -> usize {
    let count = ((length + gap) / (item + gap)).floor();
    if count.is_finite() && count >= 1.0 {
        to_count(count)
    } else {
        1
    }
}

/// Lines of `unit` needed to cover `length`.
fn line_count(length: f64, unit: f64) -> usize {
    if unit <= 0.0 || !unit.is_finite() {
        return 0;
    }
    to_count((length.max(0.0) / unit).ceil())
}
