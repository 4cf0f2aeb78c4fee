// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure length arithmetic shared by the layout, page, and content stages.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::Axis;

/// Largest compensating padding, in pixels, handed back to a host.
///
/// Rendering engines cap element sizes somewhere in the millions of pixels;
/// padding past this value is clamped so a huge virtual grid degrades into a
/// shorter scroll range instead of a broken one.
pub const MAX_SIZE: f64 = 8_047_500.0;

/// Total length needed to lay out `total` equally sized items in lines of
/// `items_per_line`.
///
/// The result is `lines * item_size + (lines - 1) * gap + padding`, with
/// `lines = max(1, ceil(total / items_per_line))`. A partially filled last
/// line still reserves a full line. When `items_per_line` is zero only the
/// padding is returned.
///
/// ```rust
/// use understory_virtual_grid::compute_item_size;
///
/// // Twenty items, four per line, 100px items with 8px gaps and 10px padding.
/// assert_eq!(compute_item_size(20, 4, 100.0, 8.0, 10.0), 542.0);
/// ```
#[must_use]
pub fn compute_item_size(
    total: usize,
    items_per_line: usize,
    item_size: f64,
    gap: f64,
    padding: f64,
) -> f64 {
    if items_per_line == 0 {
        return padding;
    }
    let lines = total.div_ceil(items_per_line).max(1) as f64;
    lines * item_size + (lines - 1.0) * gap + padding
}

/// Scroll distance that puts 1-based `page` at the start of the viewport.
///
/// One page advances by `rows_on_viewport` lines for [`Axis::Vertical`] and
/// `columns_on_viewport` lines for [`Axis::Horizontal`]. The result is
/// `padding + (page - 1) * lines_per_page * (item_size + gap)`.
///
/// No clamping happens here: page `0` yields a negative offset and pages past
/// the end yield offsets past the virtual extent.
#[must_use]
pub fn compute_scroll_offset(
    page: usize,
    item_size: f64,
    gap: f64,
    padding: f64,
    rows_on_viewport: usize,
    columns_on_viewport: usize,
    axis: Axis,
) -> f64 {
    let lines_per_page = axis.pick(rows_on_viewport, columns_on_viewport) as f64;
    padding + (page as f64 - 1.0) * lines_per_page * (item_size + gap)
}

/// Rounds `value` to `digits` decimal places, halves away from zero.
#[must_use]
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10_f64.powi(digits);
    (value * scale).round() / scale
}

/// Converts a non-negative whole number computed in `f64` into a count.
///
/// NaN and negative values map to `0`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Callers pass already-rounded values; saturation at usize::MAX is fine"
)]
pub(crate) fn to_count(value: f64) -> usize {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value as usize
}

#[cfg(test)]
mod tests {
    use super::{MAX_SIZE, compute_item_size, compute_scroll_offset, round_to, to_count};
    use crate::Axis;

    #[test]
    fn item_size_reserves_whole_lines() {
        // ceil(20 / 4) = 5 lines: 5 * 100 + 4 * 8 + 10.
        assert_eq!(compute_item_size(20, 4, 100.0, 8.0, 10.0), 542.0);
        // 21 items need a sixth, partially filled line.
        assert_eq!(compute_item_size(21, 4, 100.0, 8.0, 10.0), 650.0);
        // An empty collection still reserves one line.
        assert_eq!(compute_item_size(0, 4, 100.0, 8.0, 10.0), 110.0);
    }

    #[test]
    fn item_size_without_capacity_is_padding_only() {
        assert_eq!(compute_item_size(20, 0, 100.0, 8.0, 10.0), 10.0);
    }

    #[test]
    fn scroll_offset_advances_by_whole_pages() {
        let offset = |page| compute_scroll_offset(page, 100.0, 8.0, 10.0, 4, 1, Axis::Vertical);
        assert_eq!(offset(1), 10.0);
        assert_eq!(offset(2), 442.0);
        assert_eq!(offset(5), 1738.0);
    }

    #[test]
    fn scroll_offset_uses_columns_when_horizontal() {
        let offset = compute_scroll_offset(3, 50.0, 0.0, 0.0, 7, 2, Axis::Horizontal);
        assert_eq!(offset, 200.0);
    }

    #[test]
    fn scroll_offset_is_permissive_below_the_first_page() {
        let offset = compute_scroll_offset(0, 100.0, 0.0, 0.0, 1, 1, Axis::Vertical);
        assert_eq!(offset, -100.0);
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round_to(1.04, 1), 1.0);
        assert_eq!(round_to(1.05_f64 + 1e-9, 1), 1.1);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(to_count(f64::NAN), 0);
        assert_eq!(to_count(-3.0), 0);
        assert_eq!(to_count(7.0), 7);
        assert!(MAX_SIZE > 8_000_000.0);
    }
}
