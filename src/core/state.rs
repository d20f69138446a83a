//! Game state: the mutable aggregate owned by the phase controller.
//!
//! ## GameState
//!
//! - Phase, location cursor, calendar year
//! - Resource vector
//! - Completed and failed locations
//! - Decisions taken at each location, plus the full decision history
//! - Unlocked achievements and any event waiting to be acknowledged
//!
//! Uses `im` persistent collections, so the reducer can hand back a new
//! state per action at O(1) clone cost and tests can compare whole states.

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};

use super::action::DecisionRecord;
use super::config::RulesConfig;
use super::resources::ResourceVector;
use crate::catalog::{Catalog, DecisionId, GameEvent, Location, LocationId};

/// Where the game is in its turn cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Before the journey starts.
    #[default]
    Intro,
    /// Decisions are accepted.
    Playing,
    /// An event is waiting to be acknowledged.
    Event,
    /// The current location has settled; continue here or advance.
    LocationComplete,
    /// Terminal: the journey succeeded.
    Victory,
    /// Terminal: the journey failed.
    GameOver,
}

impl Phase {
    /// True for `Victory` and `GameOver`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Victory | Phase::GameOver)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Intro => "intro",
            Phase::Playing => "playing",
            Phase::Event => "event",
            Phase::LocationComplete => "location-complete",
            Phase::Victory => "victory",
            Phase::GameOver => "game-over",
        };
        f.write_str(name)
    }
}

/// Milestones unlocked when a location is completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// Every location in the catalog completed.
    Pathfinder,
    /// Knowledge reached the scholar threshold.
    Scholar,
    /// Experience reached the veteran threshold.
    Veteran,
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,

    /// Position in the catalog. Only ever increases.
    pub current_location_index: usize,

    pub current_year: i32,

    pub resources: ResourceVector,

    /// Settled locations, in the order they were completed.
    pub completed_locations: Vector<LocationId>,

    /// Locations left short of their decision count, in strike order.
    pub failed_locations: Vector<LocationId>,

    /// Decisions taken at each visited location, in selection order.
    pub selected_decisions: ImHashMap<LocationId, Vector<DecisionId>>,

    /// Append-only audit trail.
    pub decision_history: Vector<DecisionRecord>,

    /// Unlocked achievements, in unlock order.
    pub achievements: Vector<Achievement>,

    /// Event rolled after the last decision, not yet applied.
    pub pending_event: Option<GameEvent>,
}

impl GameState {
    /// A fresh game sitting on the intro screen.
    #[must_use]
    pub fn new(rules: &RulesConfig) -> Self {
        Self {
            phase: Phase::Intro,
            current_location_index: 0,
            current_year: rules.start_year,
            resources: rules.initial_resources,
            completed_locations: Vector::new(),
            failed_locations: Vector::new(),
            selected_decisions: ImHashMap::new(),
            decision_history: Vector::new(),
            achievements: Vector::new(),
            pending_event: None,
        }
    }

    /// A fresh game already in the `Playing` phase.
    #[must_use]
    pub fn started(rules: &RulesConfig) -> Self {
        Self {
            phase: Phase::Playing,
            ..Self::new(rules)
        }
    }

    /// The location under the cursor.
    #[must_use]
    pub fn current_location<'a>(&self, catalog: &'a Catalog) -> Option<&'a Location> {
        catalog.get(self.current_location_index)
    }

    // === Decisions ===

    /// Decisions taken at a location, in order.
    pub fn selected_at(&self, location: LocationId) -> impl Iterator<Item = DecisionId> + '_ {
        self.selected_decisions
            .get(&location)
            .into_iter()
            .flat_map(|ids| ids.iter().copied())
    }

    /// Number of decisions taken at a location.
    #[must_use]
    pub fn selected_count(&self, location: LocationId) -> usize {
        self.selected_decisions.get(&location).map_or(0, Vector::len)
    }

    /// Whether a decision has been taken at a location.
    #[must_use]
    pub fn is_selected(&self, location: LocationId, decision: DecisionId) -> bool {
        self.selected_decisions
            .get(&location)
            .is_some_and(|ids| ids.contains(&decision))
    }

    /// Record a decision as taken.
    ///
    /// Returns false (and changes nothing) if it was already taken here.
    pub fn record_selection(&mut self, location: LocationId, decision: DecisionId) -> bool {
        if self.is_selected(location, decision) {
            return false;
        }
        self.selected_decisions
            .entry(location)
            .or_insert_with(Vector::new)
            .push_back(decision);
        true
    }

    /// Append to the decision history.
    pub fn record_history(&mut self, record: DecisionRecord) {
        self.decision_history.push_back(record);
    }

    // === Location bookkeeping ===

    #[must_use]
    pub fn is_completed(&self, location: LocationId) -> bool {
        self.completed_locations.contains(&location)
    }

    #[must_use]
    pub fn is_failed(&self, location: LocationId) -> bool {
        self.failed_locations.contains(&location)
    }

    /// Mark a location completed, redeeming an earlier strike if any.
    ///
    /// Returns true if the location was not already completed.
    pub fn mark_completed(&mut self, location: LocationId) -> bool {
        if let Some(pos) = self.failed_locations.index_of(&location) {
            self.failed_locations.remove(pos);
        }
        if self.is_completed(location) {
            return false;
        }
        self.completed_locations.push_back(location);
        true
    }

    /// Record a strike against a location.
    ///
    /// Returns false if the location is already failed or completed; a
    /// completed location never goes back to failed.
    pub fn mark_failed(&mut self, location: LocationId) -> bool {
        if self.is_failed(location) || self.is_completed(location) {
            return false;
        }
        self.failed_locations.push_back(location);
        true
    }

    // === Achievements ===

    #[must_use]
    pub fn has_achievement(&self, achievement: Achievement) -> bool {
        self.achievements.contains(&achievement)
    }

    /// Unlock an achievement. Returns true on first unlock.
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        if self.has_achievement(achievement) {
            return false;
        }
        self.achievements.push_back(achievement);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let rules = RulesConfig::default();
        let state = GameState::new(&rules);

        assert_eq!(state.phase, Phase::Intro);
        assert_eq!(state.current_year, 1911);
        assert_eq!(state.resources, ResourceVector::new(100, 100, 0, 0, 30));
        assert!(state.decision_history.is_empty());
        assert_eq!(GameState::started(&rules).phase, Phase::Playing);
    }

    #[test]
    fn test_record_selection_is_once_per_location() {
        let mut state = GameState::new(&RulesConfig::default());
        let here = LocationId::new(1);
        let there = LocationId::new(2);

        assert!(state.record_selection(here, DecisionId::new(1)));
        assert!(!state.record_selection(here, DecisionId::new(1)));
        assert!(state.record_selection(there, DecisionId::new(1)));
        assert!(state.record_selection(here, DecisionId::new(2)));

        assert_eq!(state.selected_count(here), 2);
        assert_eq!(
            state.selected_at(here).collect::<Vec<_>>(),
            vec![DecisionId::new(1), DecisionId::new(2)]
        );
        assert_eq!(state.selected_count(LocationId::new(9)), 0);
    }

    #[test]
    fn test_failed_location_can_be_redeemed() {
        let mut state = GameState::new(&RulesConfig::default());
        let loc = LocationId::new(3);

        assert!(state.mark_failed(loc));
        assert!(!state.mark_failed(loc));
        assert!(state.is_failed(loc));

        assert!(state.mark_completed(loc));
        assert!(!state.is_failed(loc));
        assert!(state.is_completed(loc));

        // Completed never goes back to failed
        assert!(!state.mark_failed(loc));
        assert!(state.failed_locations.is_empty());
    }

    #[test]
    fn test_unlock_once() {
        let mut state = GameState::new(&RulesConfig::default());

        assert!(state.unlock(Achievement::Scholar));
        assert!(!state.unlock(Achievement::Scholar));
        assert!(state.has_achievement(Achievement::Scholar));
        assert!(!state.has_achievement(Achievement::Veteran));
    }

    #[test]
    fn test_phase_display_and_terminal() {
        assert_eq!(Phase::LocationComplete.to_string(), "location-complete");
        assert_eq!(Phase::GameOver.to_string(), "game-over");
        assert!(Phase::Victory.is_terminal());
        assert!(!Phase::Event.is_terminal());
    }

    #[test]
    fn test_state_clone_is_independent() {
        let mut state = GameState::started(&RulesConfig::default());
        state.record_selection(LocationId::new(1), DecisionId::new(1));

        let snapshot = state.clone();
        state.record_selection(LocationId::new(1), DecisionId::new(2));

        assert_eq!(snapshot.selected_count(LocationId::new(1)), 1);
        assert_eq!(state.selected_count(LocationId::new(1)), 2);
        assert_ne!(snapshot, state);
    }
}
