// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A controller that wires measurement, paging, and windowing together.

use core::fmt;

use kurbo::Vec2;

use crate::trigger::Trigger;
use crate::{
    ContentWindow, Environment, FrameTicket, GridOptions, Layout, LayoutError, PageState,
    ScrollBehavior, SettleTicket, TriggerSource, TriggerState, compute_content,
    page_from_scroll_position, scroll_offset_for_page, try_measure_layout,
};

/// Controller for a virtualized uniform grid inside a scroll container.
///
/// This type:
/// - measures the viewport and the first rendered item through an [`Environment`],
/// - keeps the last [`Layout`], [`PageState`], and [`ContentWindow`],
/// - recomputes each of them only when its inputs actually changed,
/// - hands out [`FrameTicket`]s and [`SettleTicket`]s instead of owning timers.
///
/// It does *not* render anything. Hosts render [`VirtualGrid::items`] inside a
/// container styled with [`VirtualGrid::content`], forward resize and scroll
/// notifications, and hand tickets back when their frame or delay comes.
///
/// ```rust
/// use kurbo::{Size, Vec2};
/// use understory_virtual_grid::{Element, GridOptions, StaticEnvironment, VirtualGrid};
///
/// let env = StaticEnvironment::new()
///     .with_size(Element::ScrollContainer, Size::new(800.0, 800.0))
///     .with_size(Element::Grid, Size::new(800.0, 800.0))
///     .with_size(Element::FirstItem, Size::new(380.0, 380.0));
/// let mut grid = VirtualGrid::new(env, 1000, GridOptions::default().with_gap(16.0));
/// grid.attach(Some(Element::ScrollContainer), Some(Element::Grid));
/// assert_eq!(grid.content().range(), 0..8);
///
/// // The user scrolled; recalculate on the next frame.
/// grid.env_mut().set_scroll_position(Vec2::new(0.0, 7128.0));
/// let frame = grid.on_scroll().unwrap();
/// let settle = grid.on_frame(frame).unwrap();
/// assert_eq!(grid.page(), 10);
/// assert_eq!(grid.content().range(), 32..44);
///
/// // The host waits `settle.delay_ms()` and reports back.
/// assert!(grid.on_settle(settle));
/// assert!(!grid.is_scrolling());
/// ```
pub struct VirtualGrid<E: Environment> {
    env: E,
    scroll_target: Option<E::Target>,
    grid_target: Option<E::Target>,
    options: GridOptions,
    total: usize,

    layout: Option<Layout>,
    last_error: Option<LayoutError>,
    page: PageState,
    content: ContentWindow,

    resize: Trigger,
    scroll: Trigger,
    last_scroll_position: Vec2,
}

impl<E: Environment> VirtualGrid<E> {
    /// Creates a detached grid over `total` items.
    ///
    /// Until [`VirtualGrid::attach`] provides measurable targets the grid is
    /// mounting and exposes every item.
    #[must_use]
    pub fn new(env: E, total: usize, options: GridOptions) -> Self {
        Self {
            env,
            scroll_target: None,
            grid_target: None,
            options,
            total,
            layout: None,
            last_error: None,
            page: PageState::INITIAL,
            content: ContentWindow::full(total, options.padding),
            resize: Trigger::new(TriggerSource::Resize),
            scroll: Trigger::new(TriggerSource::Scroll),
            last_scroll_position: Vec2::ZERO,
        }
    }

    /// Sets the scroll container and grid element and recalculates.
    ///
    /// Outstanding tickets issued for the previous targets become stale.
    pub fn attach(&mut self, scroll: Option<E::Target>, grid: Option<E::Target>) {
        self.cancel_pending();
        self.scroll_target = scroll;
        self.grid_target = grid;
        self.last_scroll_position = self.current_scroll_position();
        self.update(true);
    }

    /// Cancels every outstanding ticket and drops the targets.
    ///
    /// The last layout, page, and content stay readable.
    pub fn teardown(&mut self) {
        self.cancel_pending();
        self.scroll_target = None;
        self.grid_target = None;
    }

    /// Returns the environment.
    #[must_use]
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Returns the environment mutably.
    ///
    /// Changing measurements does not recalculate anything by itself; follow up
    /// with [`VirtualGrid::on_resize`] or [`VirtualGrid::recalculate`].
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Scroll container the grid is attached to.
    #[must_use]
    pub fn scroll_target(&self) -> Option<&E::Target> {
        self.scroll_target.as_ref()
    }

    /// Grid element the grid is attached to.
    #[must_use]
    pub fn grid_target(&self) -> Option<&E::Target> {
        self.grid_target.as_ref()
    }

    /// Returns the current options.
    #[must_use]
    pub const fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Replaces the options, recalculating immediately if they differ.
    pub fn set_options(&mut self, options: GridOptions) {
        if options != self.options {
            self.options = options;
            self.update(true);
        }
    }

    /// Number of items in the source collection.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.total
    }

    /// Returns `true` if the source collection is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Sets the number of items, recalculating immediately if it changed.
    pub fn set_len(&mut self, total: usize) {
        if total != self.total {
            self.total = total;
            self.update(true);
        }
    }

    /// Last successfully measured layout.
    #[must_use]
    pub const fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Why the last measurement failed, if it did.
    #[must_use]
    pub const fn last_error(&self) -> Option<LayoutError> {
        self.last_error
    }

    /// Current page state.
    #[must_use]
    pub const fn page_state(&self) -> PageState {
        self.page
    }

    /// 1-based current page.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page.page
    }

    /// Fractional line positions of the viewport start and end.
    #[must_use]
    pub const fn page_range(&self) -> [f64; 2] {
        self.page.page_range
    }

    /// Fractional line position of the viewport center.
    #[must_use]
    pub const fn index(&self) -> f64 {
        self.page.index
    }

    /// Mounted window and container styling.
    #[must_use]
    pub const fn content(&self) -> &ContentWindow {
        &self.content
    }

    /// The items to render out of `data`.
    #[must_use]
    pub fn items<'a, T>(&self, data: &'a [T]) -> &'a [T] {
        self.content.slice(data)
    }

    /// The items to render out of `data`, with their index in `data`.
    pub fn keyed_items<'a, T>(
        &self,
        data: &'a [T],
    ) -> impl Iterator<Item = (usize, &'a T)> + use<'a, T, E> {
        self.content.keyed(data)
    }

    /// Returns `true` between a resize notification and its frame.
    #[must_use]
    pub fn is_resizing(&self) -> bool {
        self.resize.state() != TriggerState::Idle
    }

    /// Returns `true` between a scroll notification and its settle ticket.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.scroll.state() != TriggerState::Idle
    }

    /// Returns `true` while no layout is available.
    ///
    /// This is a rendering hint: the grid is showing every item so the host can
    /// render a first item to measure.
    #[must_use]
    pub const fn is_mounting(&self) -> bool {
        self.layout.is_none()
    }

    /// Lifecycle state of the given trigger source.
    #[must_use]
    pub fn trigger_state(&self, source: TriggerSource) -> TriggerState {
        match source {
            TriggerSource::Resize => self.resize.state(),
            TriggerSource::Scroll => self.scroll.state(),
        }
    }

    /// Notes that the viewport or grid changed size.
    ///
    /// Any earlier resize ticket is superseded. Hand the returned ticket to
    /// [`VirtualGrid::on_frame`] on the next animation frame.
    pub fn on_resize(&mut self) -> FrameTicket {
        self.resize.schedule()
    }

    /// Notes that the scroll container may have scrolled.
    ///
    /// Returns `None` when there is no scroll target or the position moved less
    /// than [`GridOptions::min_scroll_delta`] along the scroll axis. Otherwise
    /// any pending scroll frame or settle ticket is superseded and the returned
    /// ticket should go to [`VirtualGrid::on_frame`] on the next animation frame.
    pub fn on_scroll(&mut self) -> Option<FrameTicket> {
        self.scroll_target.as_ref()?;
        let position = self.current_scroll_position();
        let axis = self.options.axis;
        let delta = (axis.offset_of(position) - axis.offset_of(self.last_scroll_position)).abs();
        if delta.is_nan() || delta < self.options.min_scroll_delta {
            log::trace!("ignoring scroll of {delta}px");
            return None;
        }
        self.last_scroll_position = position;
        Some(self.scroll.schedule())
    }

    /// Runs the recalculation a [`FrameTicket`] was issued for.
    ///
    /// Stale tickets are ignored. A scroll frame returns the [`SettleTicket`]
    /// to hand to [`VirtualGrid::on_settle`] after
    /// [`SettleTicket::delay_ms`] milliseconds.
    pub fn on_frame(&mut self, ticket: FrameTicket) -> Option<SettleTicket> {
        match ticket.source() {
            TriggerSource::Resize => {
                if self.resize.take_frame(ticket) {
                    self.recalculate();
                }
                None
            }
            TriggerSource::Scroll => {
                if !self.scroll.take_frame(ticket) {
                    return None;
                }
                if self.refresh_page() {
                    self.refresh_content();
                }
                Some(self.scroll.settle(self.options.settle_delay_ms))
            }
        }
    }

    /// Ends the scroll quiet period a [`SettleTicket`] was issued for.
    ///
    /// Returns `false` for a stale ticket, in which case the grid is still
    /// scrolling.
    pub fn on_settle(&mut self, ticket: SettleTicket) -> bool {
        self.scroll.take_settle(ticket)
    }

    /// Asks the environment to scroll `page` to the start of the viewport.
    ///
    /// Pages outside `1..=pages` are not clamped. Returns the requested scroll
    /// position, or `None` without a layout or a scroll target.
    pub fn scroll_to(&mut self, page: usize, behavior: ScrollBehavior) -> Option<Vec2> {
        let layout = self.layout.as_ref()?;
        let target = self.scroll_target.as_ref()?;
        let offset = scroll_offset_for_page(layout, page, self.options.gap, self.options.padding);
        let position = layout.axis.position(offset);
        log::debug!("scrolling virtual grid to page {page} at {offset}px");
        self.env.request_scroll(target, position, behavior);
        Some(position)
    }

    /// Re-measures and recomputes layout, page, and content immediately.
    ///
    /// Content is only recomputed when the layout or page changed.
    pub fn recalculate(&mut self) {
        self.update(false);
    }

    fn update(&mut self, config_changed: bool) {
        let layout_changed = self.refresh_layout();
        let page_changed = self.refresh_page();
        if config_changed || layout_changed || page_changed {
            self.refresh_content();
        } else {
            log::trace!("virtual grid unchanged");
        }
    }

    fn refresh_layout(&mut self) -> bool {
        let measured = try_measure_layout(
            &self.env,
            self.scroll_target.as_ref(),
            self.grid_target.as_ref(),
            self.total,
            &self.options,
        );
        let next = match measured {
            Ok(layout) => {
                self.last_error = None;
                Some(layout)
            }
            Err(err) => {
                log::debug!("virtual grid layout unavailable: {err}");
                self.last_error = Some(err);
                None
            }
        };
        if next == self.layout {
            return false;
        }
        self.layout = next;
        true
    }

    fn refresh_page(&mut self) -> bool {
        let next = match &self.layout {
            Some(layout) => {
                page_from_scroll_position(self.current_scroll_position(), layout, self.options.gap)
            }
            None => PageState::INITIAL,
        };
        if next == self.page {
            return false;
        }
        if next.page != self.page.page {
            log::debug!("virtual grid page {} -> {}", self.page.page, next.page);
        }
        self.page = next;
        true
    }

    fn refresh_content(&mut self) {
        let GridOptions {
            gap,
            padding,
            off_screen_pages,
            ..
        } = self.options;
        self.content = match &self.layout {
            Some(layout) => compute_content(layout, self.page.page, padding, gap, off_screen_pages),
            None => ContentWindow::full(self.total, padding),
        };
    }

    fn current_scroll_position(&self) -> Vec2 {
        self.scroll_target
            .as_ref()
            .map_or(Vec2::ZERO, |target| self.env.scroll_position_of(target))
    }

    fn cancel_pending(&mut self) {
        self.resize.cancel();
        self.scroll.cancel();
    }
}

impl<E> fmt::Debug for VirtualGrid<E>
where
    E: Environment + fmt::Debug,
    E::Target: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualGrid")
            .field("env", &self.env)
            .field("scroll_target", &self.scroll_target)
            .field("grid_target", &self.grid_target)
            .field("options", &self.options)
            .field("total", &self.total)
            .field("layout", &self.layout)
            .field("last_error", &self.last_error)
            .field("page", &self.page)
            .field("content", &self.content)
            .field("resize", &self.resize)
            .field("scroll", &self.scroll)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Insets, Size, Vec2};

    use super::VirtualGrid;
    use crate::{
        Axis, Element, Environment, GridOptions, LayoutError, MAX_SIZE, NullEnvironment,
        PageState, ScrollBehavior, StaticEnvironment, TriggerSource, TriggerState,
    };

    const ITEM: Size = Size::new(380.0, 380.0);
    const GAP: f64 = 16.0;

    fn sized_env(viewport: Size) -> StaticEnvironment {
        StaticEnvironment::new()
            .with_size(Element::ScrollContainer, viewport)
            .with_size(Element::Grid, viewport)
            .with_size(Element::FirstItem, ITEM)
    }

    fn env(viewport: f64) -> StaticEnvironment {
        sized_env(Size::new(viewport, viewport))
    }

    fn sized(
        viewport: Size,
        total: usize,
        options: GridOptions,
    ) -> VirtualGrid<StaticEnvironment> {
        let mut grid = VirtualGrid::new(sized_env(viewport), total, options);
        grid.attach(Some(Element::ScrollContainer), Some(Element::Grid));
        grid
    }

    fn attached(viewport: f64, options: GridOptions) -> VirtualGrid<StaticEnvironment> {
        sized(Size::new(viewport, viewport), 1000, options)
    }

    /// Delivers one scroll the way a host would: notification, frame, settle.
    fn scroll_to_position(grid: &mut VirtualGrid<StaticEnvironment>, position: Vec2) {
        grid.env_mut().set_scroll_position(position);
        if let Some(frame) = grid.on_scroll()
            && let Some(settle) = grid.on_frame(frame)
        {
            assert!(grid.on_settle(settle));
        }
    }

    #[test]
    fn detached_grid_mounts_everything() {
        let grid = VirtualGrid::new(NullEnvironment, 5, GridOptions::default());
        assert!(grid.is_mounting());
        assert_eq!(grid.content().range(), 0..5);
        assert_eq!(grid.page_state(), PageState::INITIAL);
    }

    #[test]
    fn attaching_measures_layout_page_and_content() {
        let grid = attached(800.0, GridOptions::default().with_gap(16.0));
        assert!(!grid.is_mounting());
        let layout = grid.layout().unwrap();
        assert_eq!(layout.pages, 250);
        assert_eq!(grid.page(), 1);
        assert_eq!(grid.content().range(), 0..8);
        assert_eq!(grid.last_error(), None);
    }

    #[test]
    fn missing_first_item_keeps_the_grid_mounting() {
        let mut env = env(800.0);
        env.set_size(Element::FirstItem, None);
        let mut grid = VirtualGrid::new(env, 12, GridOptions::default());
        grid.attach(Some(Element::ScrollContainer), Some(Element::Grid));
        assert!(grid.is_mounting());
        assert_eq!(grid.last_error(), Some(LayoutError::NoRenderedItem));
        assert_eq!(grid.content().range(), 0..12);

        // The first item renders; the next resize picks it up.
        grid.env_mut()
            .set_size(Element::FirstItem, Some(Size::new(380.0, 380.0)));
        let ticket = grid.on_resize();
        assert!(grid.is_resizing());
        assert_eq!(grid.on_frame(ticket), None);
        assert!(!grid.is_resizing());
        assert!(!grid.is_mounting());
        assert_eq!(grid.last_error(), None);
    }

    #[test]
    fn small_scrolls_are_filtered() {
        let mut grid = attached(800.0, GridOptions::default().with_gap(16.0));
        grid.env_mut().set_scroll_position(Vec2::new(0.0, 0.5));
        assert_eq!(grid.on_scroll(), None);
        assert!(!grid.is_scrolling());
        grid.env_mut().set_scroll_position(Vec2::new(0.0, 1.0));
        assert!(grid.on_scroll().is_some());
        assert!(grid.is_scrolling());
    }

    #[test]
    fn cross_axis_scrolls_are_ignored() {
        let mut grid = attached(800.0, GridOptions::default().with_gap(16.0));
        grid.env_mut().set_scroll_position(Vec2::new(300.0, 0.0));
        assert_eq!(grid.on_scroll(), None);
    }

    #[test]
    fn scroll_frame_updates_page_and_content() {
        let mut grid = attached(800.0, GridOptions::default().with_gap(16.0));
        grid.env_mut().set_scroll_position(Vec2::new(0.0, 7128.0));
        let frame = grid.on_scroll().unwrap();
        assert_eq!(frame.source(), TriggerSource::Scroll);
        let settle = grid.on_frame(frame).unwrap();
        assert_eq!(settle.delay_ms(), 150);
        assert_eq!(grid.page(), 10);
        assert_eq!(grid.content().range(), 32..44);
        assert!(grid.is_scrolling());
        assert_eq!(grid.trigger_state(TriggerSource::Scroll), TriggerState::Settling);
        assert!(grid.on_settle(settle));
        assert!(!grid.is_scrolling());
    }

    #[test]
    fn newer_scroll_keeps_the_grid_scrolling() {
        let mut grid = attached(800.0, GridOptions::default().with_gap(16.0));
        grid.env_mut().set_scroll_position(Vec2::new(0.0, 400.0));
        let frame = grid.on_scroll().unwrap();
        let settle = grid.on_frame(frame).unwrap();

        grid.env_mut().set_scroll_position(Vec2::new(0.0, 800.0));
        let newer = grid.on_scroll().unwrap();
        assert!(!grid.on_settle(settle));
        assert!(grid.is_scrolling());

        let settle = grid.on_frame(newer).unwrap();
        assert!(grid.on_settle(settle));
        assert!(!grid.is_scrolling());
    }

    #[test]
    fn stale_frames_do_nothing() {
        let mut grid = attached(800.0, GridOptions::default().with_gap(16.0));
        let stale = grid.on_resize();
        let fresh = grid.on_resize();
        grid.env_mut()
            .set_size(Element::ScrollContainer, Some(Size::new(400.0, 400.0)));
        assert_eq!(grid.on_frame(stale), None);
        assert_eq!(grid.layout().unwrap().items_per_page, 4);
        assert_eq!(grid.on_frame(fresh), None);
        assert_eq!(grid.layout().unwrap().items_per_page, 1);
    }

    #[test]
    fn teardown_cancels_outstanding_tickets() {
        let mut grid = attached(800.0, GridOptions::default().with_gap(16.0));
        let resize = grid.on_resize();
        grid.env_mut().set_scroll_position(Vec2::new(0.0, 4000.0));
        let scroll = grid.on_scroll().unwrap();
        grid.teardown();
        assert!(!grid.is_resizing());
        assert!(!grid.is_scrolling());
        assert_eq!(grid.on_frame(resize), None);
        assert_eq!(grid.on_frame(scroll), None);
        assert_eq!(grid.page(), 1);
        assert_eq!(grid.on_scroll(), None);
    }

    #[test]
    fn scroll_to_requests_the_page_offset() {
        let options = GridOptions::default()
            .with_gap(16.0)
            .with_padding(Insets::new(0.0, 10.0, 0.0, 0.0));
        let mut grid = attached(800.0, options);
        let position = grid.scroll_to(3, ScrollBehavior::Instant).unwrap();
        assert_eq!(position, Vec2::new(0.0, 10.0 + 2.0 * 2.0 * 396.0));
        let requests = grid.env_mut().take_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].target, Element::ScrollContainer);
        assert_eq!(requests[0].behavior, ScrollBehavior::Instant);
    }

    #[test]
    fn scroll_to_horizontal_grid_moves_along_x() {
        let mut grid = attached(
            800.0,
            GridOptions::default().with_gap(16.0).with_axis(Axis::Horizontal),
        );
        let position = grid.scroll_to(2, ScrollBehavior::Smooth).unwrap();
        assert_eq!(position, Vec2::new(2.0 * 396.0, 0.0));
    }

    #[test]
    fn scroll_to_without_layout_is_a_no_op() {
        let mut grid = VirtualGrid::new(StaticEnvironment::new(), 10, GridOptions::default());
        assert_eq!(grid.scroll_to(2, ScrollBehavior::Smooth), None);
        assert!(grid.env().requests().is_empty());
    }

    #[test]
    fn changing_length_and_options_recalculates() {
        let mut grid = attached(800.0, GridOptions::default().with_gap(16.0));
        grid.set_len(10);
        assert_eq!(grid.layout().unwrap().pages, 3);
        assert_eq!(grid.content().range(), 0..8);

        grid.set_options(grid.options().with_off_screen_pages(2));
        assert_eq!(grid.content().range(), 0..10);
    }

    #[test]
    fn items_follow_the_content_window() {
        let mut grid = attached(800.0, GridOptions::default().with_gap(16.0));
        let data: Vec<usize> = (0..1000).collect();
        assert_eq!(grid.items(&data), &data[0..8]);

        grid.env_mut().set_scroll_position(Vec2::new(0.0, 7128.0));
        let frame = grid.on_scroll().unwrap();
        let _settle = grid.on_frame(frame);
        let keys: Vec<usize> = grid.keyed_items(&data).map(|(i, _)| i).collect();
        assert_eq!(keys, (32..44).collect::<Vec<_>>());
    }

    #[test]
    fn edge_pages_use_only_user_padding() {
        let padding = Insets::new(6.0, 12.0, 6.0, 4.0);
        for axis in [Axis::Vertical, Axis::Horizontal] {
            let options = GridOptions::default()
                .with_gap(GAP)
                .with_padding(padding)
                .with_axis(axis);
            let mut grid = attached(800.0, options);
            assert_eq!(grid.page(), 1);
            assert_eq!(axis.leading(grid.content().padding), axis.leading(padding));

            let pages = grid.layout().unwrap().pages;
            let position = grid.scroll_to(pages, ScrollBehavior::Instant).unwrap();
            assert_eq!(
                grid.env().scroll_position_of(&Element::ScrollContainer),
                position
            );
            scroll_to_position(&mut grid, position);
            assert_eq!(grid.page(), pages, "{axis:?}");
            assert_eq!(axis.trailing(grid.content().padding), axis.trailing(padding));
            assert_eq!(grid.content().end, 1000);
        }
    }

    #[test]
    fn horizontal_grid_scrolls_along_x() {
        let options = GridOptions::default().with_gap(GAP).with_axis(Axis::Horizontal);
        let mut grid = attached(800.0, options);
        let layout = *grid.layout().unwrap();
        assert_eq!(layout.columns, 500);
        assert_eq!(layout.grid_width, 500.0 * 380.0 + 499.0 * GAP);
        assert_eq!(grid.content().width, Some(layout.grid_width));

        scroll_to_position(&mut grid, Vec2::new(7128.0, 5000.0));
        assert_eq!(grid.page(), 10);
        assert_eq!(grid.content().range(), 32..44);
        assert_eq!(grid.content().padding.x0, 16.0 * 396.0);
    }

    #[test]
    fn window_scrolling_is_capped_by_the_grid_parent() {
        let env = StaticEnvironment::new()
            .with_size(Element::Window, Size::new(1200.0, 1000.0))
            .with_size(Element::GridParent, Size::new(800.0, 3000.0))
            .with_size(Element::Grid, Size::new(800.0, 800.0))
            .with_size(Element::FirstItem, ITEM);
        let mut grid = VirtualGrid::new(env, 1000, GridOptions::default().with_gap(GAP));
        grid.attach(Some(Element::Window), Some(Element::Grid));

        let layout = grid.layout().unwrap();
        assert_eq!(layout.scroll_width, 800.0);
        assert_eq!(layout.scroll_height, 1000.0);
        assert_eq!(layout.rows_on_viewport, 3);
        assert_eq!(layout.columns_on_viewport, 2);
        assert_eq!(layout.items_per_page, 6);
        assert_eq!(layout.pages, 167);

        grid.scroll_to(2, ScrollBehavior::Smooth).unwrap();
        let requests = grid.env_mut().take_requests();
        assert_eq!(requests[0].target, Element::Window);
        assert_eq!(requests[0].offset, Vec2::new(0.0, 3.0 * 396.0));
    }

    #[test]
    fn every_page_round_trips_through_scrolling() {
        for viewport in [Size::new(800.0, 800.0), Size::new(1200.0, 800.0)] {
            let mut grid = sized(viewport, 97, GridOptions::default().with_gap(GAP));
            let layout = *grid.layout().unwrap();
            assert!(layout.covers_virtual_extent());
            for page in 1..=layout.pages {
                let position = grid.scroll_to(page, ScrollBehavior::Instant).unwrap();
                scroll_to_position(&mut grid, position);
                assert_eq!(grid.page(), page);

                let rows_scrolled = (page - 1) * layout.rows_on_viewport;
                let first_visible = rows_scrolled * layout.items_per_row;
                assert!(
                    grid.content().range().contains(&first_visible),
                    "{viewport:?} page {page}"
                );
            }
        }
    }

    #[test]
    fn paddings_stay_bounded_while_scrolling_a_huge_grid() {
        let env = StaticEnvironment::new()
            .with_size(Element::ScrollContainer, Size::new(100.0, 100.0))
            .with_size(Element::Grid, Size::new(100.0, 100.0))
            .with_size(Element::FirstItem, Size::new(100.0, 100.0));
        let padding = Insets::new(0.0, 10.0, 0.0, 10.0);
        let options = GridOptions::default().with_padding(padding);
        let mut grid = VirtualGrid::new(env, 50_000_000, options);
        grid.attach(Some(Element::ScrollContainer), Some(Element::Grid));
        let pages = grid.layout().unwrap().pages;
        assert!(grid.layout().unwrap().grid_height > MAX_SIZE);

        for offset in [0.0, 1.0e6, 1.0e9, 4.99e9] {
            scroll_to_position(&mut grid, Vec2::new(0.0, offset));
            let content = grid.content();
            let p = content.padding;
            assert!(p.y0 >= 0.0 && p.y1 >= 0.0);
            assert!(p.y0 + p.y1 + content.len() as f64 * 100.0 <= MAX_SIZE);
        }

        let position = grid.scroll_to(pages, ScrollBehavior::Instant).unwrap();
        scroll_to_position(&mut grid, position);
        assert_eq!(grid.page(), pages);
        assert_eq!(grid.content().padding.y1, 10.0);
        assert_eq!(grid.content().end, 50_000_000);
    }

    #[test]
    fn unchanged_measurements_keep_the_same_snapshot() {
        let mut grid = attached(800.0, GridOptions::default().with_gap(GAP));
        let layout = *grid.layout().unwrap();
        let content = *grid.content();
        let frame = grid.on_resize();
        assert!(grid.is_resizing());
        assert!(grid.on_frame(frame).is_none());
        assert!(!grid.is_resizing());
        assert_eq!(*grid.layout().unwrap(), layout);
        assert_eq!(*grid.content(), content);
    }

    #[test]
    fn non_rendering_environment_never_panics() {
        let mut grid = VirtualGrid::new(NullEnvironment, 25, GridOptions::default());
        grid.attach(Some(()), Some(()));
        assert!(grid.is_mounting());
        assert_eq!(grid.last_error(), Some(LayoutError::DetachedTarget));
        assert_eq!(grid.page_state(), PageState::INITIAL);
        assert_eq!(grid.content().range(), 0..25);
        assert!(grid.on_scroll().is_none());
        assert!(grid.scroll_to(3, ScrollBehavior::Smooth).is_none());
    }
}
