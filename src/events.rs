//! State-change notifications for presentation layers.
//!
//! The session pushes a [`GameEvent`] to its [`EventSink`] whenever something
//! a display would care about changes. Sinks run synchronously on the
//! caller's thread, inside the operation that produced the event.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::common::{Outcome, Side};
use crate::ship::Orientation;

/// Whose turn a turn indicator should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum TurnIndicator {
    Player,
    Enemy,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum GameEvent {
    /// A ship was placed on `side`'s board.
    ShipPlaced {
        side: Side,
        size: usize,
        orientation: Orientation,
        x: usize,
        y: usize,
    },
    /// A cell on `side`'s board was fired on.
    CellChanged {
        side: Side,
        x: usize,
        y: usize,
        hit: bool,
        ship_sunk: bool,
    },
    TurnChanged(TurnIndicator),
    /// Setup finished and the enemy fleet is in place.
    GameStarted,
    GameEnded(Outcome),
    Restarted,
}

/// Receiver of game events.
pub trait EventSink {
    fn notify(&mut self, event: &GameEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&GameEvent),
{
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Recording sink. Clones share the same buffer, so one handle can be given
/// to the session and another kept for polling.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event recorded so far.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Take the recorded events, leaving the log empty.
    pub fn drain(&self) -> Vec<GameEvent> {
        core::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventSink for EventLog {
    fn notify(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
