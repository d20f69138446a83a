//! Core engine types: resources, state, actions, RNG, configuration.
//!
//! This module contains the building blocks every other module shares.
//! Rule logic lives in `rules`; the turn cycle lives in `engine`.

pub mod resources;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use resources::{has_enough_resources, ResourceDelta, ResourceKind, ResourceVector};
pub use rng::{GameRng, GameRngState};
pub use config::{
    AchievementThresholds, ConfigError, GatePolicies, GatePolicy, QualificationPenalty,
    RulesConfig, VictoryThresholds,
};
pub use action::{Action, DecisionRecord};
pub use state::{Achievement, GameState, Phase};
