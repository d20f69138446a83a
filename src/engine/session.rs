//! A live game session.
//!
//! `JourneyEngine` owns the only `GameState`, the journey definition and the
//! event roller, and exposes the operations the presentation layer calls.
//! Each operation runs one reducer step and swaps the resulting state in.

use serde::{Deserialize, Serialize};

use super::journey::{Journey, Transition};
use super::notice::Notice;
use crate::catalog::{Decision, DecisionId, Location, LocationId};
use crate::core::{Achievement, Action, GameState, Phase, ResourceVector};
use crate::events::EventRoller;
use crate::rules::{GameOutcome, GateReport};

/// End-of-game report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneySummary {
    pub outcome: Option<GameOutcome>,
    pub phase: Phase,
    pub year: i32,
    pub resources: ResourceVector,
    pub locations_completed: usize,
    pub locations_failed: usize,
    pub decisions_taken: usize,
    pub achievements: Vec<Achievement>,
}

/// One game in progress.
///
/// ## Example
///
/// ```
/// use journey_engine::catalog::{Catalog, Decision, DecisionId, Location, LocationId};
/// use journey_engine::core::{Phase, ResourceDelta, RulesConfig};
/// use journey_engine::engine::{Journey, JourneyEngine};
/// use journey_engine::events::NoEvents;
///
/// let catalog = Catalog::new(vec![
///     Location::new(LocationId::new(1), "Port").with_decision(
///         Decision::new(DecisionId::new(1), "Study")
///             .with_cost(ResourceDelta::new().money(-20))
///             .with_reward(ResourceDelta::new().knowledge(15))
///             .with_duration(2),
///     ),
///     Location::new(LocationId::new(2), "Capital"),
/// ])
/// .unwrap();
///
/// let mut engine = JourneyEngine::new(Journey::new(catalog, RulesConfig::default()), NoEvents);
/// engine.start();
/// engine.select_decision(DecisionId::new(1));
///
/// assert_eq!(engine.state().resources.money, 80);
/// assert_eq!(engine.state().current_year, 1913);
/// assert_eq!(engine.state().phase, Phase::LocationComplete);
/// ```
pub struct JourneyEngine<R: EventRoller> {
    journey: Journey,
    state: GameState,
    roller: R,
    outcome: Option<GameOutcome>,
}

impl<R: EventRoller> JourneyEngine<R> {
    /// A new session on the intro screen.
    #[must_use]
    pub fn new(journey: Journey, roller: R) -> Self {
        let state = journey.new_game();
        Self {
            journey,
            state,
            roller,
            outcome: None,
        }
    }

    /// Read-only view of the current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn journey(&self) -> &Journey {
        &self.journey
    }

    /// How the game ended, once it has.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn current_location(&self) -> Option<&Location> {
        self.state.current_location(self.journey.catalog())
    }

    /// Decisions at the current location not yet taken.
    pub fn available_decisions(&self) -> impl Iterator<Item = &Decision> {
        let location = self.current_location();
        let id = location.map(|l| l.id);
        location
            .into_iter()
            .flat_map(|l| l.decisions.iter())
            .filter(move |d| id.is_some_and(|loc| !self.state.is_selected(loc, d.id)))
    }

    /// Run every gate for a decision without applying it.
    ///
    /// Lets a UI grey out unaffordable choices or warn about penalties
    /// before the player commits.
    #[must_use]
    pub fn preview(&self, decision: DecisionId) -> Option<GateReport> {
        let location = self.current_location()?;
        let decision = location.decision(decision)?;
        Some(GateReport::inspect(&self.state, location, decision))
    }

    /// Apply an action and keep the resulting state.
    pub fn dispatch(&mut self, action: Action) -> Vec<Notice> {
        let Transition { state, notices } = self.journey.reduce(&self.state, action, &mut self.roller);
        self.state = state;

        if action == Action::Restart {
            self.outcome = None;
        }
        for notice in &notices {
            if let Notice::JourneyOver(outcome) = notice {
                self.outcome = Some(*outcome);
            }
        }
        notices
    }

    pub fn start(&mut self) -> Vec<Notice> {
        self.dispatch(Action::Start)
    }

    pub fn select_decision(&mut self, decision: DecisionId) -> Vec<Notice> {
        self.dispatch(Action::SelectDecision(decision))
    }

    pub fn acknowledge_event(&mut self) -> Vec<Notice> {
        self.dispatch(Action::AcknowledgeEvent)
    }

    pub fn continue_here(&mut self) -> Vec<Notice> {
        self.dispatch(Action::Continue)
    }

    pub fn advance_location(&mut self) -> Vec<Notice> {
        self.dispatch(Action::AdvanceLocation)
    }

    /// Discard the current game and start a fresh one in `Playing`.
    pub fn restart(&mut self) -> Vec<Notice> {
        self.dispatch(Action::Restart)
    }

    /// Where the cursor is, by id.
    #[must_use]
    pub fn current_location_id(&self) -> Option<LocationId> {
        self.current_location().map(|l| l.id)
    }

    #[must_use]
    pub fn summary(&self) -> JourneySummary {
        JourneySummary {
            outcome: self.outcome,
            phase: self.state.phase,
            year: self.state.current_year,
            resources: self.state.resources,
            locations_completed: self.state.completed_locations.len(),
            locations_failed: self.state.failed_locations.len(),
            decisions_taken: self.state.decision_history.len(),
            achievements: self.state.achievements.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::core::{ResourceDelta, RulesConfig};
    use crate::events::NoEvents;
    use crate::rules::DefeatReason;

    fn engine() -> JourneyEngine<NoEvents> {
        let catalog = Catalog::new(vec![
            Location::new(LocationId::new(1), "Port")
                .with_decision(
                    Decision::new(DecisionId::new(1), "Study")
                        .with_cost(ResourceDelta::new().money(-20))
                        .with_reward(ResourceDelta::new().knowledge(15)),
                )
                .with_decision(
                    Decision::new(DecisionId::new(2), "Splurge").with_cost(ResourceDelta::new().money(-500)),
                ),
            Location::new(LocationId::new(2), "Capital"),
        ])
        .unwrap();
        JourneyEngine::new(Journey::new(catalog, RulesConfig::default()), NoEvents)
    }

    #[test]
    fn test_available_decisions_shrink() {
        let mut engine = engine();
        engine.start();
        assert_eq!(engine.available_decisions().count(), 2);

        engine.select_decision(DecisionId::new(1));
        let left: Vec<_> = engine.available_decisions().map(|d| d.id).collect();
        assert_eq!(left, vec![DecisionId::new(2)]);
    }

    #[test]
    fn test_preview_reports_unaffordable() {
        let mut engine = engine();
        engine.start();

        let report = engine.preview(DecisionId::new(2)).unwrap();
        assert!(!report.affordable());
        assert!(engine.preview(DecisionId::new(1)).unwrap().affordable());
        assert!(engine.preview(DecisionId::new(9)).is_none());
    }

    #[test]
    fn test_outcome_recorded_and_cleared_on_restart() {
        let mut engine = engine();
        engine.start();
        engine.advance_location();
        engine.advance_location();

        assert_eq!(engine.outcome(), Some(GameOutcome::Defeat(DefeatReason::FellShort)));
        assert_eq!(engine.summary().phase, Phase::GameOver);

        engine.restart();
        assert_eq!(engine.outcome(), None);
        assert_eq!(engine.state().phase, Phase::Playing);
        assert_eq!(engine.current_location_id(), Some(LocationId::new(1)));
    }
}
