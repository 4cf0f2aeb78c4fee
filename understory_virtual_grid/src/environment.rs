// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host capabilities the grid engine reads measurements through.
//!
//! The engine never touches a window, document, or widget tree directly. A host
//! implements [`Environment`] over its own element handles (DOM nodes, widget
//! ids, ...) and the engine asks it for boxes, scroll positions, and scrolls.
//!
//! Two implementations ship with the crate:
//!
//! - [`NullEnvironment`] answers every query with "absent"; it keeps the engine
//!   callable where nothing is rendered (server-side precomputation, headless
//!   tests) and always produces zero bounds and no layout.
//! - [`StaticEnvironment`] is an in-memory snapshot that hosts fill with the
//!   sizes they measured themselves. Requested scrolls are applied to the
//!   snapshot and queued for the host to replay.

use alloc::vec::Vec;

use kurbo::{Size, Vec2};

/// How a requested scroll should be animated by the host.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollBehavior {
    /// Animate to the target offset.
    #[default]
    Smooth,
    /// Jump to the target offset.
    Instant,
}

/// Measurement and scrolling capabilities provided by the host.
///
/// Every method must be cheap and must not fail loudly: absent or detached
/// targets answer `None` (or a zero position) rather than panicking.
pub trait Environment {
    /// Handle to a host element.
    type Target: Clone;

    /// Returns `true` if `target` is the whole application viewport (the window)
    /// rather than a bounded element.
    fn is_viewport_target(&self, target: &Self::Target) -> bool;

    /// Rendered box of `target`, or `None` if it is detached or unmeasurable.
    ///
    /// For the viewport target this is the visible window size.
    fn measure(&self, target: &Self::Target) -> Option<Size>;

    /// Parent element of `target`, if any.
    fn parent_of(&self, target: &Self::Target) -> Option<Self::Target>;

    /// First rendered child of `target`, if any.
    fn first_child_of(&self, target: &Self::Target) -> Option<Self::Target>;

    /// Current scroll position of `target`: `x` is the horizontal offset and
    /// `y` the vertical offset.
    fn scroll_position_of(&self, target: &Self::Target) -> Vec2;

    /// Asks the host to scroll `target` to `offset` using `behavior`.
    fn request_scroll(&mut self, target: &Self::Target, offset: Vec2, behavior: ScrollBehavior);
}

/// An [`Environment`] where nothing is rendered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NullEnvironment;

impl Environment for NullEnvironment {
    type Target = ();

    fn is_viewport_target(&self, _target: &()) -> bool {
        false
    }

    fn measure(&self, _target: &()) -> Option<Size> {
        None
    }

    fn parent_of(&self, _target: &()) -> Option<()> {
        None
    }

    fn first_child_of(&self, _target: &()) -> Option<()> {
        None
    }

    fn scroll_position_of(&self, _target: &()) -> Vec2 {
        Vec2::ZERO
    }

    fn request_scroll(&mut self, _target: &(), _offset: Vec2, _behavior: ScrollBehavior) {}
}

/// Roles known to a [`StaticEnvironment`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    /// The application window, used as scroll target in window-scroll mode.
    Window,
    /// A bounded scrolling element.
    ScrollContainer,
    /// The element the grid items are rendered into.
    Grid,
    /// The grid's parent element.
    GridParent,
    /// The first rendered item of the grid.
    FirstItem,
}

/// A scroll request recorded by a [`StaticEnvironment`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollRequest {
    /// Element that was asked to scroll.
    pub target: Element,
    /// Requested scroll position.
    pub offset: Vec2,
    /// Requested animation.
    pub behavior: ScrollBehavior,
}

/// An [`Environment`] backed by sizes the host measured and pushed in.
///
/// Sizes default to "not rendered". Scroll requests move the stored scroll
/// position immediately (as an instant scroll would) and are also recorded so
/// that a host can forward them to its real scroll container.
///
/// ```rust
/// use kurbo::{Size, Vec2};
/// use understory_virtual_grid::{Element, Environment, StaticEnvironment};
///
/// let mut env = StaticEnvironment::new()
///     .with_size(Element::ScrollContainer, Size::new(400.0, 400.0))
///     .with_size(Element::Grid, Size::new(400.0, 400.0))
///     .with_size(Element::FirstItem, Size::new(100.0, 100.0));
///
/// assert_eq!(env.first_child_of(&Element::Grid), Some(Element::FirstItem));
/// env.set_scroll_position(Vec2::new(0.0, 250.0));
/// assert_eq!(env.scroll_position_of(&Element::ScrollContainer).y, 250.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticEnvironment {
    window: Option<Size>,
    scroll_container: Option<Size>,
    grid: Option<Size>,
    grid_parent: Option<Size>,
    first_item: Option<Size>,
    scroll_position: Vec2,
    requests: Vec<ScrollRequest>,
}

impl StaticEnvironment {
    /// Creates an environment where nothing is rendered yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`StaticEnvironment::set_size`].
    #[must_use]
    pub fn with_size(mut self, element: Element, size: Size) -> Self {
        self.set_size(element, Some(size));
        self
    }

    /// Records the measured size of `element`; `None` marks it as not rendered.
    pub fn set_size(&mut self, element: Element, size: Option<Size>) {
        *self.slot_mut(element) = size;
    }

    /// Returns the recorded size of `element`.
    #[must_use]
    pub fn size(&self, element: Element) -> Option<Size> {
        match element {
            Element::Window => self.window,
            Element::ScrollContainer => self.scroll_container,
            Element::Grid => self.grid,
            Element::GridParent => self.grid_parent,
            Element::FirstItem => self.first_item,
        }
    }

    /// Sets the scroll position reported for every scroll target.
    pub fn set_scroll_position(&mut self, position: Vec2) {
        self.scroll_position = position;
    }

    /// Scroll requests issued since the last [`StaticEnvironment::take_requests`].
    #[must_use]
    pub fn requests(&self) -> &[ScrollRequest] {
        &self.requests
    }

    /// Drains the recorded scroll requests.
    pub fn take_requests(&mut self) -> Vec<ScrollRequest> {
        core::mem::take(&mut self.requests)
    }

    fn slot_mut(&mut self, element: Element) -> &mut Option<Size> {
        match element {
            Element::Window => &mut self.window,
            Element::ScrollContainer => &mut self.scroll_container,
            Element::Grid => &mut self.grid,
            Element::GridParent => &mut self.grid_parent,
            Element::FirstItem => &mut self.first_item,
        }
    }
}

impl Environment for StaticEnvironment {
    type Target = Element;

    fn is_viewport_target(&self, target: &Element) -> bool {
        *target == Element::Window
    }

    fn measure(&self, target: &Element) -> Option<Size> {
        self.size(*target)
    }

    fn parent_of(&self, target: &Element) -> Option<Element> {
        match target {
            Element::Grid => self.grid_parent.map(|_| Element::GridParent),
            Element::FirstItem => self.grid.map(|_| Element::Grid),
            _ => None,
        }
    }

    fn first_child_of(&self, target: &Element) -> Option<Element> {
        match target {
            Element::Grid => self.first_item.map(|_| Element::FirstItem),
            _ => None,
        }
    }

    fn scroll_position_of(&self, _target: &Element) -> Vec2 {
        self.scroll_position
    }

    fn request_scroll(&mut self, target: &Element, offset: Vec2, behavior: ScrollBehavior) {
        self.scroll_position = offset;
        self.requests.push(ScrollRequest {
            target: *target,
            offset,
            behavior,
        });
    }
}
