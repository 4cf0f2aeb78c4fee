// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll axis selection and main/cross projections of sizes and insets.

use kurbo::{Insets, Size, Vec2};

/// Direction in which a grid scrolls.
///
/// The *main* axis is the scroll axis (height for [`Axis::Vertical`], width for
/// [`Axis::Horizontal`]); the *cross* axis is the other one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Rows stack top to bottom and the container scrolls vertically.
    #[default]
    Vertical,
    /// Columns stack left to right and the container scrolls horizontally.
    Horizontal,
}

impl Axis {
    /// Returns the axis for a `horizontal` flag.
    #[must_use]
    pub const fn from_horizontal(horizontal: bool) -> Self {
        if horizontal {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    /// Returns `true` for [`Axis::Horizontal`].
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }

    /// Picks the value belonging to this axis out of a `(vertical, horizontal)` pair.
    #[must_use]
    pub fn pick<T>(self, vertical: T, horizontal: T) -> T {
        match self {
            Self::Vertical => vertical,
            Self::Horizontal => horizontal,
        }
    }

    /// Extent of `size` along the scroll axis.
    #[must_use]
    pub fn main(self, size: Size) -> f64 {
        self.pick(size.height, size.width)
    }

    /// Extent of `size` across the scroll axis.
    #[must_use]
    pub fn cross(self, size: Size) -> f64 {
        self.pick(size.width, size.height)
    }

    /// Padding at the start of the scroll axis (top or left).
    #[must_use]
    pub fn leading(self, insets: Insets) -> f64 {
        self.pick(insets.y0, insets.x0)
    }

    /// Padding at the end of the scroll axis (bottom or right).
    #[must_use]
    pub fn trailing(self, insets: Insets) -> f64 {
        self.pick(insets.y1, insets.x1)
    }

    /// Sum of the leading and trailing padding on the scroll axis.
    #[must_use]
    pub fn main_padding(self, insets: Insets) -> f64 {
        self.pick(insets.y_value(), insets.x_value())
    }

    /// Sum of both paddings across the scroll axis.
    #[must_use]
    pub fn cross_padding(self, insets: Insets) -> f64 {
        self.pick(insets.x_value(), insets.y_value())
    }

    /// Component of a 2D scroll position along this axis.
    #[must_use]
    pub fn offset_of(self, position: Vec2) -> f64 {
        self.pick(position.y, position.x)
    }

    /// Builds a 2D scroll position with `offset` on this axis and zero on the other.
    #[must_use]
    pub fn position(self, offset: f64) -> Vec2 {
        self.pick(Vec2::new(0.0, offset), Vec2::new(offset, 0.0))
    }

    /// Replaces the scroll-axis edges of `insets`, keeping the cross-axis edges.
    #[must_use]
    pub fn with_main_edges(self, insets: Insets, leading: f64, trailing: f64) -> Insets {
        match self {
            Self::Vertical => Insets::new(insets.x0, leading, insets.x1, trailing),
            Self::Horizontal => Insets::new(leading, insets.y0, trailing, insets.y1),
        }
    }
}
