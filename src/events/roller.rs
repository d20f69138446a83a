//! Event rollers.
//!
//! The engine calls [`EventRoller::roll`] exactly once per resolved decision
//! and treats the result opaquely. Which event (if any) comes back is the
//! roller's business.

use std::collections::VecDeque;

use tracing::trace;

use crate::catalog::{EventId, GameEvent, Location};
use crate::core::{GameRng, GameRngState};

/// Picks zero or one event for a location.
pub trait EventRoller {
    /// Roll for an event after a decision at `location`.
    fn roll(&mut self, location: &Location) -> Option<GameEvent>;
}

impl<R: EventRoller + ?Sized> EventRoller for Box<R> {
    fn roll(&mut self, location: &Location) -> Option<GameEvent> {
        (**self).roll(location)
    }
}

impl<R: EventRoller + ?Sized> EventRoller for &mut R {
    fn roll(&mut self, location: &Location) -> Option<GameEvent> {
        (**self).roll(location)
    }
}

/// A roller that never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEvents;

impl EventRoller for NoEvents {
    fn roll(&mut self, _location: &Location) -> Option<GameEvent> {
        None
    }
}

/// Seeded roller driven by each event's declared probability.
///
/// Walks the location's events in catalog order and returns the first one
/// whose roll succeeds, so at most one event fires per call.
///
/// ## Example
///
/// ```
/// use journey_engine::catalog::{EventId, GameEvent, Location, LocationId};
/// use journey_engine::events::{EventRoller, WeightedEventRoller};
///
/// let location = Location::new(LocationId::new(1), "Port")
///     .with_event(GameEvent::new(EventId::new(1), "Storm").with_probability(1.0));
///
/// let mut roller = WeightedEventRoller::new(42);
/// assert_eq!(roller.roll(&location).map(|e| e.id), Some(EventId::new(1)));
/// ```
#[derive(Clone, Debug)]
pub struct WeightedEventRoller {
    rng: GameRng,
}

impl WeightedEventRoller {
    /// Create a roller with its own event stream derived from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed).for_context("events"),
        }
    }

    /// Capture the stream position.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Resume from a captured stream position.
    #[must_use]
    pub fn from_rng_state(state: &GameRngState) -> Self {
        Self {
            rng: GameRng::from_state(state),
        }
    }
}

impl EventRoller for WeightedEventRoller {
    fn roll(&mut self, location: &Location) -> Option<GameEvent> {
        let hit = location
            .events
            .iter()
            .find(|event| self.rng.roll(event.probability))
            .cloned();
        trace!(location = %location.id, event = ?hit.as_ref().map(|e| e.id), "event roll");
        hit
    }
}

/// Replays a fixed script of roll results, one per call.
///
/// `Some(id)` returns that event from the location being rolled for (or
/// nothing if the location has no such event); `None` returns nothing. Once
/// the script runs out every roll comes back empty. Used to make engine
/// tests deterministic.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEvents {
    script: VecDeque<Option<EventId>>,
    calls: usize,
}

impl ScriptedEvents {
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = Option<EventId>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            calls: 0,
        }
    }

    /// Always fire `event` (when the location has it).
    #[must_use]
    pub fn always(event: EventId, times: usize) -> Self {
        Self::new(std::iter::repeat(Some(event)).take(times))
    }

    /// How many times the roller has been asked.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl EventRoller for ScriptedEvents {
    fn roll(&mut self, location: &Location) -> Option<GameEvent> {
        self.calls += 1;
        let id = self.script.pop_front().flatten()?;
        location.events.iter().find(|e| e.id == id).cloned()
    }
}
