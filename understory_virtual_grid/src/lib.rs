// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_virtual_grid --heading-base-level=0

//! Understory Virtual Grid: paging and windowing for uniform grids.
//!
//! This crate computes what a host needs to render only a slice of a large
//! collection of identically sized items laid out as a grid inside a scroll
//! container, while the container keeps reporting the full scrollable extent so
//! native scrollbars behave as if every item existed.
//!
//! The core concepts are:
//!
//! - [`Environment`]: the host capabilities the engine measures through (boxes,
//!   parents and first children, scroll positions, scroll requests).
//!   [`StaticEnvironment`] is an in-memory snapshot for hosts that push their own
//!   measurements; [`NullEnvironment`] keeps the engine callable where nothing is
//!   rendered.
//! - [`Layout`]: the grid geometry derived from the viewport, the grid element,
//!   and one representative item, via [`compute_layout`] or
//!   [`measure_layout`]. Pages hold `rows_on_viewport × columns_on_viewport`
//!   items regardless of the scroll [`Axis`].
//! - [`PageState`]: the page under a scroll offset ([`detect_page`]), and the
//!   inverse, the offset of a page ([`scroll_offset_for_page`]).
//! - [`ContentWindow`]: the slice of items to mount around the current page and
//!   the compensating padding that keeps them at their true position
//!   ([`compute_content`]).
//! - [`VirtualGrid`]: a controller that wires the above together, recomputes
//!   only what changed, and hands out [`FrameTicket`]s and [`SettleTicket`]s
//!   instead of owning timers.
//!
//! This crate deliberately does **not** know about widgets, the DOM, or any
//! particular UI framework. Host frameworks are responsible for:
//!
//! - Implementing [`Environment`] over their own element handles.
//! - Forwarding resize and scroll notifications to [`VirtualGrid::on_resize`]
//!   and [`VirtualGrid::on_scroll`].
//! - Handing tickets back on the next animation frame or after the settle delay.
//! - Rendering [`VirtualGrid::items`] inside a container styled with
//!   [`ContentWindow::padding`] and [`ContentWindow::width`].
//!
//! ## Minimal example
//!
//! The pure functions can be used without any environment:
//!
//! ```rust
//! use kurbo::{Insets, Size};
//! use understory_virtual_grid::{Axis, LayoutInput, compute_content, compute_layout, detect_page};
//!
//! // An 800×800 viewport showing 380×380 items with a 16px gap.
//! let layout = compute_layout(&LayoutInput {
//!     bounds: Size::new(800.0, 800.0),
//!     grid: Size::new(800.0, 800.0),
//!     item: Size::new(380.0, 380.0),
//!     total: 1000,
//!     gap: 16.0,
//!     padding: Insets::ZERO,
//!     axis: Axis::Vertical,
//! })
//! .unwrap();
//! assert_eq!(layout.items_per_page, 4);
//!
//! // Scrolled to the 10th page.
//! let page = detect_page(7128.0, &layout, 16.0);
//! assert_eq!(page.page, 10);
//!
//! // Mount pages 9 through 11; pad out the 16 rows before and the rest after.
//! let window = compute_content(&layout, page.page, Insets::ZERO, 16.0, 1);
//! assert_eq!(window.range(), 32..44);
//! assert_eq!(window.padding.y0, 16.0 * 396.0);
//! ```
//!
//! All sizes and offsets are in a caller-chosen coordinate space (typically
//! logical pixels) and are expected to be finite and non-negative. Invalid
//! measurements make the engine fall back to mounting every item rather than
//! fail.
//!
//! ## Features
//!
//! - `std` (default): use `std` float operations through `kurbo`.
//! - `libm`: use `libm` float operations for `no_std` targets.
//! - `serde`: derive `Serialize`/`Deserialize` for the snapshot and
//!   configuration types.
//!
//! Diagnostics are emitted through the [`log`](https://docs.rs/log) facade.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod axis;
mod bounds;
mod content;
mod environment;
mod geometry;
mod grid_size;
mod layout;
mod options;
mod page;
mod trigger;
mod virtual_grid;

pub use axis::Axis;
pub use bounds::{Bounds, measure_bounds};
pub use content::{ContentWindow, compute_content};
pub use environment::{
    Element, Environment, NullEnvironment, ScrollBehavior, ScrollRequest, StaticEnvironment,
};
pub use geometry::{MAX_SIZE, compute_item_size, compute_scroll_offset, round_to};
pub use grid_size::calculate_grid_size;
pub use layout::{
    Layout, LayoutError, LayoutInput, compute_layout, measure_layout, try_measure_layout,
};
pub use options::{
    DEFAULT_MIN_SCROLL_DELTA, DEFAULT_SETTLE_DELAY_MS, GridOptions, padding_from_trbl,
};
pub use page::{PageState, detect_page, page_from_scroll_position, scroll_offset_for_page};
pub use trigger::{FrameTicket, SettleTicket, TriggerSource, TriggerState};
pub use virtual_grid::VirtualGrid;
