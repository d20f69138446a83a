//! Event rolling.
//!
//! After every resolved decision the engine asks an [`EventRoller`] for at
//! most one event at the current location. The roller is injected, so games
//! can use the seeded [`WeightedEventRoller`] while tests script exact
//! outcomes with [`ScriptedEvents`].

mod roller;

pub use roller::{EventRoller, NoEvents, ScriptedEvents, WeightedEventRoller};
