// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible size of the scrolling viewport.

use kurbo::Size;

use crate::Environment;

/// Visible extent of the scroll target.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Visible width and height.
    pub size: Size,
    /// `true` when the scroll target is the whole application window.
    pub is_window: bool,
}

impl Bounds {
    /// Zero-sized, non-window bounds.
    pub const ZERO: Self = Self {
        size: Size::ZERO,
        is_window: false,
    };
}

/// Measures the visible viewport of `scroll`.
///
/// For a bounded scroll element this is the element's own box. When the scroll
/// target is the window, each dimension is the smaller of the window size and
/// the size of the grid's parent element, so a large window never reports more
/// room than the content occupies.
///
/// A missing scroll target, or one the environment cannot measure, yields
/// [`Bounds::ZERO`].
pub fn measure_bounds<E: Environment>(
    env: &E,
    scroll: Option<&E::Target>,
    grid: Option<&E::Target>,
) -> Bounds {
    let Some(scroll) = scroll else {
        return Bounds::ZERO;
    };
    let Some(scroll_size) = env.measure(scroll) else {
        return Bounds::ZERO;
    };

    if !env.is_viewport_target(scroll) {
        return Bounds {
            size: scroll_size,
            is_window: false,
        };
    }

    let container = grid
        .and_then(|grid| env.parent_of(grid))
        .and_then(|parent| env.measure(&parent))
        .unwrap_or(Size::ZERO);

    Bounds {
        size: Size::new(
            scroll_size.width.min(container.width),
            scroll_size.height.min(container.height),
        ),
        is_window: true,
    }
}
