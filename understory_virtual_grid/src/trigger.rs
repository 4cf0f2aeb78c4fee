// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancel-safe scheduling tickets for resize and scroll recalculation.
//!
//! The grid never owns timers or animation frames. When it needs one it hands
//! the host a ticket; the host arranges for the ticket to come back (on the
//! next frame, or after a delay) and passes it to the grid. Each trigger source
//! keeps a generation counter, and issuing a new ticket or cancelling bumps it,
//! so a ticket from a superseded request is recognized and ignored when it
//! finally fires. Hosts may still cancel their own frame/timer handles, but
//! forgetting to do so is harmless.
//!
//! Per source the lifecycle is `Idle → Pending → Idle` for resizes and
//! `Idle → Pending → Settling → Idle` for scrolls.

/// Which kind of event a ticket was issued for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriggerSource {
    /// The viewport or grid changed size.
    Resize,
    /// The scroll position changed.
    Scroll,
}

/// Where a trigger source is in its lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TriggerState {
    /// Nothing outstanding.
    #[default]
    Idle,
    /// Waiting for the host to deliver a [`FrameTicket`].
    Pending,
    /// Recalculated; waiting for the host to deliver a [`SettleTicket`].
    Settling,
}

/// Request to call back on the next animation frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[must_use = "the ticket must be handed back to the grid on the next frame"]
pub struct FrameTicket {
    source: TriggerSource,
    generation: u64,
}

impl FrameTicket {
    /// Event kind this frame was requested for.
    pub const fn source(&self) -> TriggerSource {
        self.source
    }
}

/// Request to call back after [`SettleTicket::delay_ms`] milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[must_use = "the ticket must be handed back to the grid once the delay elapsed"]
pub struct SettleTicket {
    generation: u64,
    delay_ms: u64,
}

impl SettleTicket {
    /// How long the host should wait before handing the ticket back.
    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }
}

/// Generation-stamped state of one trigger source.
#[derive(Clone, Debug)]
pub(crate) struct Trigger {
    source: TriggerSource,
    state: TriggerState,
    generation: u64,
}

impl Trigger {
    pub(crate) const fn new(source: TriggerSource) -> Self {
        Self {
            source,
            state: TriggerState::Idle,
            generation: 0,
        }
    }

    pub(crate) const fn state(&self) -> TriggerState {
        self.state
    }

    /// Supersedes anything outstanding and waits for a frame.
    pub(crate) fn schedule(&mut self) -> FrameTicket {
        self.bump();
        self.state = TriggerState::Pending;
        FrameTicket {
            source: self.source,
            generation: self.generation,
        }
    }

    /// Consumes a frame ticket; `false` if it is stale.
    pub(crate) fn take_frame(&mut self, ticket: FrameTicket) -> bool {
        if ticket.source != self.source
            || ticket.generation != self.generation
            || self.state != TriggerState::Pending
        {
            log::trace!("ignoring stale {:?} frame ticket", ticket.source);
            return false;
        }
        self.state = TriggerState::Idle;
        true
    }

    /// Starts the quiet period after a recalculation.
    pub(crate) fn settle(&mut self, delay_ms: u64) -> SettleTicket {
        self.bump();
        self.state = TriggerState::Settling;
        SettleTicket {
            generation: self.generation,
            delay_ms,
        }
    }

    /// Consumes a settle ticket; `false` if it is stale.
    pub(crate) fn take_settle(&mut self, ticket: SettleTicket) -> bool {
        if ticket.generation != self.generation || self.state != TriggerState::Settling {
            log::trace!("ignoring stale {:?} settle ticket", self.source);
            return false;
        }
        self.state = TriggerState::Idle;
        true
    }

    /// Invalidates every outstanding ticket.
    pub(crate) fn cancel(&mut self) {
        self.bump();
        self.state = TriggerState::Idle;
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{Trigger, TriggerSource, TriggerState};

    #[test]
    fn newer_frame_supersedes_older_one() {
        let mut trigger = Trigger::new(TriggerSource::Resize);
        let first = trigger.schedule();
        let second = trigger.schedule();
        assert!(!trigger.take_frame(first));
        assert_eq!(trigger.state(), TriggerState::Pending);
        assert!(trigger.take_frame(second));
        assert_eq!(trigger.state(), TriggerState::Idle);
        // A ticket is only good once.
        assert!(!trigger.take_frame(second));
    }

    #[test]
    fn settle_runs_after_frame_unless_superseded() {
        let mut trigger = Trigger::new(TriggerSource::Scroll);
        let frame = trigger.schedule();
        assert!(trigger.take_frame(frame));
        let settle = trigger.settle(150);
        assert_eq!(settle.delay_ms(), 150);
        assert_eq!(trigger.state(), TriggerState::Settling);

        // A new scroll arrives before the settle timer fires.
        let _frame = trigger.schedule();
        assert!(!trigger.take_settle(settle));
        assert_eq!(trigger.state(), TriggerState::Pending);
    }

    #[test]
    fn cancel_invalidates_everything() {
        let mut trigger = Trigger::new(TriggerSource::Scroll);
        let frame = trigger.schedule();
        trigger.cancel();
        assert!(!trigger.take_frame(frame));
        assert_eq!(trigger.state(), TriggerState::Idle);
    }

    #[test]
    fn tickets_from_another_source_are_rejected() {
        let mut resize = Trigger::new(TriggerSource::Resize);
        let mut scroll = Trigger::new(TriggerSource::Scroll);
        let _ = resize.schedule();
        let ticket = scroll.schedule();
        assert_eq!(ticket.source(), TriggerSource::Scroll);
        assert!(!resize.take_frame(ticket));
    }
}
