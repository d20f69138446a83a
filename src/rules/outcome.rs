//! Victory and defeat.
//!
//! Both predicates look at the whole game state. Defeat is checked first;
//! the first one that holds decides the game.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::progression::struck_out;
use crate::catalog::Catalog;
use crate::core::{GameState, Phase, RulesConfig};

/// Why a journey was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefeatReason {
    /// Money ran out.
    Bankrupt,
    /// Health ran out.
    Exhausted,
    /// Too many locations failed.
    StruckOut,
    /// The calendar ran out before the final location was completed.
    OutOfTime,
    /// Finished the last location without meeting the victory thresholds.
    FellShort,
}

impl std::fmt::Display for DefeatReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            DefeatReason::Bankrupt => "ran out of money",
            DefeatReason::Exhausted => "ran out of health",
            DefeatReason::StruckOut => "failed too many locations",
            DefeatReason::OutOfTime => "ran out of years before the final location",
            DefeatReason::FellShort => "reached the end without meeting the goals",
        };
        f.write_str(text)
    }
}

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    Victory,
    Defeat(DefeatReason),
}

impl GameOutcome {
    /// The terminal phase for this outcome.
    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            GameOutcome::Victory => Phase::Victory,
            GameOutcome::Defeat(_) => Phase::GameOver,
        }
    }

    #[must_use]
    pub const fn is_victory(self) -> bool {
        matches!(self, GameOutcome::Victory)
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::Victory => f.write_str("victory"),
            GameOutcome::Defeat(reason) => write!(f, "defeat ({reason})"),
        }
    }
}

/// The first defeat condition that holds, if any.
#[must_use]
pub fn defeat_reason(rules: &RulesConfig, catalog: &Catalog, state: &GameState) -> Option<DefeatReason> {
    let r = &state.resources;
    if r.money <= 0 {
        return Some(DefeatReason::Bankrupt);
    }
    if r.health <= 0 {
        return Some(DefeatReason::Exhausted);
    }
    if struck_out(rules, state) {
        return Some(DefeatReason::StruckOut);
    }
    if state.current_year >= rules.end_year
        && state.current_location_index < catalog.last_index()
        && !state.is_completed(catalog.last().id)
    {
        return Some(DefeatReason::OutOfTime);
    }
    None
}

#[must_use]
pub fn is_defeat(rules: &RulesConfig, catalog: &Catalog, state: &GameState) -> bool {
    defeat_reason(rules, catalog, state).is_some()
}

/// True if every victory condition holds.
#[must_use]
pub fn is_victory(rules: &RulesConfig, catalog: &Catalog, state: &GameState) -> bool {
    let r = &state.resources;
    let v = &rules.victory;
    let required_completions = catalog.len().saturating_sub(rules.max_skipped_locations);

    state.completed_locations.len() >= required_completions
        && r.knowledge >= v.knowledge
        && r.experience >= v.experience
        && r.health >= v.health
        && r.money >= v.money
        && state.current_location_index >= catalog.last_index()
        && state.failed_locations.len() < rules.max_failed_locations
}

/// Defeat first, then victory.
#[must_use]
pub fn evaluate(rules: &RulesConfig, catalog: &Catalog, state: &GameState) -> Option<GameOutcome> {
    if let Some(reason) = defeat_reason(rules, catalog, state) {
        return Some(GameOutcome::Defeat(reason));
    }
    if is_victory(rules, catalog, state) {
        return Some(GameOutcome::Victory);
    }
    None
}

/// Check for an outcome and move to the matching terminal phase.
///
/// Only runs while the game is live (`Playing` or `LocationComplete`).
pub fn settle(rules: &RulesConfig, catalog: &Catalog, state: &mut GameState) -> Option<GameOutcome> {
    if !matches!(state.phase, Phase::Playing | Phase::LocationComplete) {
        return None;
    }
    let outcome = evaluate(rules, catalog, state)?;
    finish(state, outcome);
    Some(outcome)
}

/// Decide the game at the end of the journey.
///
/// Unlike [`settle`] this always produces an outcome: a journey that reaches
/// the end without winning is lost.
pub fn conclude(rules: &RulesConfig, catalog: &Catalog, state: &mut GameState) -> GameOutcome {
    let outcome = evaluate(rules, catalog, state).unwrap_or(GameOutcome::Defeat(DefeatReason::FellShort));
    finish(state, outcome);
    outcome
}

fn finish(state: &mut GameState, outcome: GameOutcome) {
    state.phase = outcome.phase();
    info!(?outcome, year = state.current_year, "journey over");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Location, LocationId};
    use crate::core::ResourceVector;

    fn catalog(n: u16) -> Catalog {
        Catalog::new((1..=n).map(|i| Location::new(LocationId::new(i), format!("Stop {i}"))).collect()).unwrap()
    }

    /// A state meeting every victory condition on a 5-stop catalog.
    fn winning_state(rules: &RulesConfig) -> GameState {
        let mut state = GameState::started(rules);
        state.current_location_index = 4;
        state.resources = ResourceVector::new(20, 15, 75, 70, 0);
        for id in 1..=3 {
            state.completed_locations.push_back(LocationId::new(id));
        }
        state
    }

    #[test]
    fn test_victory_at_thresholds() {
        let rules = RulesConfig::default();
        let catalog = catalog(5);

        assert!(is_victory(&rules, &catalog, &winning_state(&rules)));
        assert_eq!(evaluate(&rules, &catalog, &winning_state(&rules)), Some(GameOutcome::Victory));
    }

    #[test]
    fn test_victory_requires_final_location() {
        let rules = RulesConfig::default();
        let catalog = catalog(5);
        let mut state = winning_state(&rules);
        state.current_location_index = 3;

        assert!(!is_victory(&rules, &catalog, &state));
    }

    #[test]
    fn test_each_victory_threshold_matters() {
        let rules = RulesConfig::default();
        let catalog = catalog(5);

        let tweaks: [fn(&mut GameState); 6] = [
            |s| s.resources.knowledge = 74,
            |s| s.resources.experience = 69,
            |s| s.resources.health = 14,
            |s| s.resources.money = 19,
            |s| {
                s.completed_locations.pop_back();
            },
            |s| {
                for id in 10..13 {
                    s.failed_locations.push_back(LocationId::new(id));
                }
            },
        ];

        for tweak in tweaks {
            let mut state = winning_state(&rules);
            tweak(&mut state);
            assert!(!is_victory(&rules, &catalog, &state));
        }
    }

    #[test]
    fn test_strike_limit_independent_of_skip_allowance() {
        let rules = RulesConfig {
            max_skipped_locations: 1,
            max_failed_locations: 4,
            ..RulesConfig::default()
        };
        let catalog = catalog(5);
        let mut state = winning_state(&rules);
        state.completed_locations.push_back(LocationId::new(4));
        for id in 10..13 {
            state.failed_locations.push_back(LocationId::new(id));
        }

        // Three strikes is still one short of this rule set's limit
        assert!(is_victory(&rules, &catalog, &state));

        state.failed_locations.push_back(LocationId::new(13));
        assert_eq!(
            evaluate(&rules, &catalog, &state),
            Some(GameOutcome::Defeat(DefeatReason::StruckOut))
        );
    }

    #[test]
    fn test_defeat_reasons_in_order() {
        let rules = RulesConfig::default();
        let catalog = catalog(5);

        let mut state = GameState::started(&rules);
        assert_eq!(defeat_reason(&rules, &catalog, &state), None);

        state.resources.health = 0;
        assert_eq!(defeat_reason(&rules, &catalog, &state), Some(DefeatReason::Exhausted));

        state.resources.money = 0;
        assert_eq!(defeat_reason(&rules, &catalog, &state), Some(DefeatReason::Bankrupt));

        let mut state = GameState::started(&rules);
        for id in 1..=3 {
            state.failed_locations.push_back(LocationId::new(id));
        }
        assert_eq!(defeat_reason(&rules, &catalog, &state), Some(DefeatReason::StruckOut));
    }

    #[test]
    fn test_out_of_time() {
        let rules = RulesConfig::default();
        let catalog = catalog(5);
        let mut state = GameState::started(&rules);
        state.current_year = 1941;
        state.current_location_index = 2;

        assert_eq!(defeat_reason(&rules, &catalog, &state), Some(DefeatReason::OutOfTime));

        // Reaching the last location in time is enough
        state.current_location_index = 4;
        assert!(!is_defeat(&rules, &catalog, &state));
    }

    #[test]
    fn test_defeat_wins_over_victory() {
        let rules = RulesConfig::default();
        let catalog = catalog(5);
        let mut state = winning_state(&rules);
        for id in 10..13 {
            state.failed_locations.push_back(LocationId::new(id));
        }

        assert_eq!(
            evaluate(&rules, &catalog, &state),
            Some(GameOutcome::Defeat(DefeatReason::StruckOut))
        );
    }

    #[test]
    fn test_settle_only_while_live() {
        let rules = RulesConfig::default();
        let catalog = catalog(5);
        let mut state = winning_state(&rules);
        state.phase = Phase::Event;

        assert_eq!(settle(&rules, &catalog, &mut state), None);
        assert_eq!(state.phase, Phase::Event);

        state.phase = Phase::Playing;
        assert_eq!(settle(&rules, &catalog, &mut state), Some(GameOutcome::Victory));
        assert_eq!(state.phase, Phase::Victory);
    }

    #[test]
    fn test_conclude_without_victory_is_defeat() {
        let rules = RulesConfig::default();
        let catalog = catalog(5);
        let mut state = GameState::started(&rules);
        state.current_location_index = 4;

        assert_eq!(
            conclude(&rules, &catalog, &mut state),
            GameOutcome::Defeat(DefeatReason::FellShort)
        );
        assert_eq!(state.phase, Phase::GameOver);
    }
}
