//! # journey-engine
//!
//! Simulation engine for a single-player journey strategy game.
//!
//! The player travels an ordered route of locations between a start and an
//! end year. At each stop they spend money, health and time on decisions that
//! build knowledge and experience, random events strike along the way, and
//! the game ends in victory or defeat.
//!
//! ## Design Principles
//!
//! 1. **Content Is Data**: Locations, decisions and events come from a
//!    [`Catalog`] supplied before the game starts. Balance numbers live in
//!    [`RulesConfig`]. Nothing about a particular route is hardcoded.
//!
//! 2. **State In, State Out**: [`Journey::reduce`] maps a state and an action
//!    to the next state plus a list of notices. The input is never touched, so
//!    a UI can keep history or discard a step.
//!
//! 3. **Injected Randomness**: Events come from an [`EventRoller`]. Games use
//!    the seeded [`WeightedEventRoller`]; tests script exact outcomes.
//!
//! ## Modules
//!
//! - `core`: resources, state, actions, RNG, rules configuration
//! - `catalog`: locations, decisions, events and the validated catalog
//! - `events`: event rollers
//! - `rules`: decision resolution, progression, victory and defeat
//! - `engine`: the phase controller and live sessions
//! - `journeys`: the stock sample journey

pub mod core;
pub mod catalog;
pub mod events;
pub mod rules;
pub mod engine;
pub mod journeys;

// Re-export commonly used types
pub use crate::core::{
    Achievement, Action, ConfigError, DecisionRecord, GameRng, GameRngState, GameState,
    GatePolicy, Phase, ResourceDelta, ResourceKind, ResourceVector, RulesConfig,
};

pub use crate::catalog::{
    Catalog, CatalogError, Decision, DecisionId, EventId, GameEvent, Location, LocationId,
};

pub use crate::events::{EventRoller, NoEvents, ScriptedEvents, WeightedEventRoller};

pub use crate::rules::{DefeatReason, GameOutcome, GateReport, Penalty, PenaltyKind, Refusal};

pub use crate::engine::{Journey, JourneyEngine, JourneySummary, Notice, Rejection, Transition};

pub use crate::journeys::SampleJourneyBuilder;
