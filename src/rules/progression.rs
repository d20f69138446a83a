//! Location progression and failure tracking.
//!
//! After a decision (or the event it triggered) settles, [`evaluate`] decides
//! whether the current location is done:
//!
//! - Knowledge/experience requirements unmet: keep playing here.
//! - Requirements met but fewer decisions than `min_decisions_count`: the
//!   location takes a strike (penalty charged once) and settles anyway.
//! - Otherwise the location is completed, clearing any earlier strike.
//!
//! [`advance`] moves the cursor on, re-checking the decision count first so a
//! player cannot walk away from an under-explored location for free.
//!
//! Reaching `max_failed_locations` strikes ends the game on the spot.

use tracing::{debug, info, warn};

use super::penalty::{Penalty, PenaltyKind};
use crate::catalog::{Catalog, Location};
use crate::core::{Achievement, GameState, Phase, RulesConfig};

/// What [`evaluate`] found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// The location now counts as settled.
    pub settled: bool,
    /// Strike penalty charged by this evaluation.
    pub penalty: Option<Penalty>,
    /// Achievements unlocked by this evaluation.
    pub unlocked: Vec<Achievement>,
}

/// What [`advance`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next location.
    Moved {
        to: usize,
        penalty: Option<Penalty>,
    },
    /// Was at the last location; the journey is over and the outcome
    /// evaluator must decide.
    Finished { penalty: Option<Penalty> },
    /// The strike limit is reached; the game is over.
    StruckOut { penalty: Option<Penalty> },
}

/// True if the location's knowledge and experience requirements hold.
#[must_use]
pub fn requirements_met(state: &GameState, location: &Location) -> bool {
    let r = &state.resources;
    location.required_knowledge.map_or(true, |req| r.knowledge >= req)
        && location.required_experience.map_or(true, |req| r.experience >= req)
}

/// True if the location has a minimum decision count not yet reached.
#[must_use]
pub fn short_of_decisions(state: &GameState, location: &Location) -> bool {
    location
        .min_decisions_count
        .is_some_and(|min| state.selected_count(location.id) < min)
}

/// True once the strike limit is reached.
#[must_use]
pub fn struck_out(rules: &RulesConfig, state: &GameState) -> bool {
    state.failed_locations.len() >= rules.max_failed_locations
}

/// Record a strike if the location is short of decisions.
///
/// Charges the failure penalty only the first time a location is struck.
fn strike_if_short(rules: &RulesConfig, state: &mut GameState, location: &Location) -> Option<Penalty> {
    if !short_of_decisions(state, location) || !state.mark_failed(location.id) {
        return None;
    }
    let penalty = Penalty::new(PenaltyKind::LocationFailed, rules.location_failure_penalty);
    penalty.charge(state);
    warn!(
        location = %location.id,
        strikes = state.failed_locations.len(),
        delta = %penalty.delta,
        "location failed"
    );
    Some(penalty)
}

fn unlock_achievements(rules: &RulesConfig, catalog: &Catalog, state: &mut GameState) -> Vec<Achievement> {
    let earned = [
        (Achievement::Pathfinder, state.completed_locations.len() >= catalog.len()),
        (Achievement::Scholar, state.resources.knowledge >= rules.achievements.knowledge),
        (Achievement::Veteran, state.resources.experience >= rules.achievements.experience),
    ];

    let mut unlocked = Vec::new();
    for (achievement, earned) in earned {
        if earned && state.unlock(achievement) {
            info!(?achievement, "achievement unlocked");
            unlocked.push(achievement);
        }
    }
    unlocked
}

/// Settle the current location after a decision or event.
///
/// Sets the phase to `Playing`, `LocationComplete` or `GameOver`.
pub fn evaluate(rules: &RulesConfig, catalog: &Catalog, state: &mut GameState) -> Evaluation {
    let Some(location) = state.current_location(catalog) else {
        return Evaluation::default();
    };

    if !requirements_met(state, location) {
        debug!(location = %location.id, "requirements not met, staying");
        state.phase = Phase::Playing;
        return Evaluation::default();
    }

    if short_of_decisions(state, location) {
        let penalty = strike_if_short(rules, state, location);
        state.phase = if struck_out(rules, state) {
            Phase::GameOver
        } else {
            Phase::LocationComplete
        };
        return Evaluation {
            settled: true,
            penalty,
            unlocked: Vec::new(),
        };
    }

    if state.mark_completed(location.id) {
        debug!(location = %location.id, "location completed");
    }
    let unlocked = unlock_achievements(rules, catalog, state);
    state.phase = Phase::LocationComplete;

    Evaluation {
        settled: true,
        penalty: None,
        unlocked,
    }
}

/// Move on from the current location.
///
/// Re-runs the decision-count check first, with the same penalty and strike
/// limit as [`evaluate`]. At the last location the cursor stays put and
/// [`Advance::Finished`] is returned. Otherwise the phase is set to
/// `Playing` (or `GameOver` on the final strike).
pub fn advance(rules: &RulesConfig, catalog: &Catalog, state: &mut GameState) -> Advance {
    let penalty = match state.current_location(catalog) {
        Some(location) => strike_if_short(rules, state, location),
        None => None,
    };

    if struck_out(rules, state) {
        state.phase = Phase::GameOver;
        return Advance::StruckOut { penalty };
    }

    if state.current_location_index >= catalog.last_index() {
        return Advance::Finished { penalty };
    }

    state.current_location_index += 1;
    state.phase = Phase::Playing;
    debug!(index = state.current_location_index, "advanced to next location");

    Advance::Moved {
        to: state.current_location_index,
        penalty,
    }
}
