// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full (virtual) rendered size of the grid.

use kurbo::{Insets, Size};

use crate::{Axis, compute_item_size};

/// Computes the rendered size of the whole grid.
///
/// Along the scroll axis the grid is as long as all `total` items need when
/// laid out `items_per_row` (vertical) or `items_per_column` (horizontal) to a
/// line, including gaps and the scroll-axis padding, but never shorter than
/// its `natural` size. The cross axis keeps its natural size.
#[must_use]
pub fn calculate_grid_size(
    axis: Axis,
    natural: Size,
    items_per_row: usize,
    items_per_column: usize,
    item: Size,
    total: usize,
    padding: Insets,
    gap: f64,
) -> Size {
    let virtual_length = compute_item_size(
        total,
        axis.pick(items_per_row, items_per_column),
        axis.main(item),
        gap,
        axis.main_padding(padding),
    );
    let length = axis.main(natural).max(virtual_length);
    match axis {
        Axis::Vertical => Size::new(natural.width, length),
        Axis::Horizontal => Size::new(length, natural.height),
    }
}
