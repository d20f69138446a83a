//! The phase controller as a reducer.
//!
//! [`Journey`] pairs an immutable catalog with a rule set and maps
//! `(GameState, Action)` to the next `GameState`. The input state is never
//! modified; the caller decides whether to keep the result.
//!
//! ## Phases
//!
//! ```text
//! intro -> playing <-> event
//!             ^  \      |
//!             |   v     v
//!          location-complete -> victory | game-over
//! ```
//!
//! - `Start` leaves `intro`.
//! - `SelectDecision` is accepted only in `playing`.
//! - `AcknowledgeEvent` is accepted only in `event`.
//! - `Continue` returns from `location-complete` to `playing`.
//! - `AdvanceLocation` is accepted in `playing` and `location-complete`.
//! - `Restart` is accepted anywhere and replaces the whole state.

use tracing::{debug, info, warn};

use super::notice::{Notice, Rejection};
use crate::catalog::Catalog;
use crate::core::{Action, GameState, Phase, RulesConfig};
use crate::events::EventRoller;
use crate::rules::{self, outcome, progression, Advance, DefeatReason, GameOutcome, Resolution};

/// Result of one reducer step.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// The next state.
    pub state: GameState,
    /// What happened, in order.
    pub notices: Vec<Notice>,
}

impl Transition {
    /// The action's outcome, if the game ended on this step.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.notices.iter().find_map(|n| match n {
            Notice::JourneyOver(outcome) => Some(*outcome),
            _ => None,
        })
    }

    /// The rejection, if the action was refused.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        self.notices.iter().find_map(|n| match n {
            Notice::Rejected(rejection) => Some(rejection),
            _ => None,
        })
    }
}

/// A catalog plus the rules it is played under.
#[derive(Clone, Debug)]
pub struct Journey {
    catalog: Catalog,
    rules: RulesConfig,
}

impl Journey {
    #[must_use]
    pub fn new(catalog: Catalog, rules: RulesConfig) -> Self {
        Self { catalog, rules }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// A fresh game on the intro screen.
    #[must_use]
    pub fn new_game(&self) -> GameState {
        GameState::new(&self.rules)
    }

    /// Apply one action.
    ///
    /// `roller` is consulted once for every decision that actually applies.
    pub fn reduce(&self, state: &GameState, action: Action, roller: &mut dyn EventRoller) -> Transition {
        debug!(action = action.name(), phase = %state.phase, "reduce");

        let mut next = state.clone();
        let mut notices = Vec::new();

        let accepted = match action {
            Action::Restart => {
                next = GameState::started(&self.rules);
                self.enter_location(&next, &mut notices);
                Ok(())
            }
            Action::Start => self.start(&mut next, &mut notices),
            Action::SelectDecision(id) => self.select(&mut next, id, roller, &mut notices),
            Action::AcknowledgeEvent => self.acknowledge(&mut next, &mut notices),
            Action::Continue => self.continue_here(&mut next),
            Action::AdvanceLocation => self.advance(&mut next, &mut notices),
        };

        if let Err(rejection) = accepted {
            warn!(%rejection, "action rejected");
            return Transition {
                state: state.clone(),
                notices: vec![Notice::Rejected(rejection)],
            };
        }

        if next.phase != state.phase {
            info!(from = %state.phase, to = %next.phase, "phase changed");
            notices.insert(
                0,
                Notice::PhaseChanged {
                    from: state.phase,
                    to: next.phase,
                },
            );
        }

        Transition { state: next, notices }
    }

    fn require(state: &GameState, action: Action, allowed: &[Phase]) -> Result<(), Rejection> {
        if allowed.contains(&state.phase) {
            Ok(())
        } else {
            Err(Rejection::WrongPhase {
                action,
                phase: state.phase,
            })
        }
    }

    fn enter_location(&self, state: &GameState, notices: &mut Vec<Notice>) {
        if let Some(location) = state.current_location(&self.catalog) {
            notices.push(Notice::LocationEntered {
                index: state.current_location_index,
                location: location.id,
            });
        }
    }

    fn start(&self, state: &mut GameState, notices: &mut Vec<Notice>) -> Result<(), Rejection> {
        Self::require(state, Action::Start, &[Phase::Intro])?;
        state.phase = Phase::Playing;
        self.enter_location(state, notices);
        Ok(())
    }

    fn select(
        &self,
        state: &mut GameState,
        id: crate::catalog::DecisionId,
        roller: &mut dyn EventRoller,
        notices: &mut Vec<Notice>,
    ) -> Result<(), Rejection> {
        Self::require(state, Action::SelectDecision(id), &[Phase::Playing])?;

        let location = state
            .current_location(&self.catalog)
            .ok_or(Rejection::UnknownDecision(id))?;
        let decision = location.decision(id).ok_or(Rejection::UnknownDecision(id))?;

        match rules::resolve(&self.rules, state, location, decision) {
            Resolution::AlreadySelected => Ok(()),
            Resolution::Refused(reason) => Err(Rejection::Refused { decision: id, reason }),
            Resolution::Applied { penalties, net } => {
                notices.extend(penalties.into_iter().map(Notice::PenaltyApplied));
                notices.push(Notice::DecisionApplied { decision: id, net });

                match roller.roll(location) {
                    Some(event) => {
                        debug!(event = %event.id, "event staged");
                        state.phase = Phase::Event;
                        state.pending_event = Some(event.clone());
                        notices.push(Notice::EventTriggered(event));
                    }
                    None => self.settle(state, notices),
                }
                Ok(())
            }
        }
    }

    fn acknowledge(&self, state: &mut GameState, notices: &mut Vec<Notice>) -> Result<(), Rejection> {
        Self::require(state, Action::AcknowledgeEvent, &[Phase::Event])?;

        if let Some(event) = state.pending_event.take() {
            state.resources = state.resources.apply(&event.effect);
            notices.push(Notice::EventResolved {
                event: event.id,
                effect: event.effect,
            });
        }
        self.settle(state, notices);
        Ok(())
    }

    fn continue_here(&self, state: &mut GameState) -> Result<(), Rejection> {
        Self::require(state, Action::Continue, &[Phase::LocationComplete])?;
        state.phase = Phase::Playing;
        Ok(())
    }

    fn advance(&self, state: &mut GameState, notices: &mut Vec<Notice>) -> Result<(), Rejection> {
        Self::require(
            state,
            Action::AdvanceLocation,
            &[Phase::Playing, Phase::LocationComplete],
        )?;

        match progression::advance(&self.rules, &self.catalog, state) {
            Advance::Moved { penalty, .. } => {
                notices.extend(penalty.map(Notice::PenaltyApplied));
                self.enter_location(state, notices);
                if let Some(outcome) = outcome::settle(&self.rules, &self.catalog, state) {
                    notices.push(Notice::JourneyOver(outcome));
                }
            }
            Advance::Finished { penalty } => {
                notices.extend(penalty.map(Notice::PenaltyApplied));
                let outcome = outcome::conclude(&self.rules, &self.catalog, state);
                notices.push(Notice::JourneyOver(outcome));
            }
            Advance::StruckOut { penalty } => {
                notices.extend(penalty.map(Notice::PenaltyApplied));
                notices.push(Notice::JourneyOver(GameOutcome::Defeat(DefeatReason::StruckOut)));
            }
        }
        Ok(())
    }

    /// Location progression, then victory/defeat.
    fn settle(&self, state: &mut GameState, notices: &mut Vec<Notice>) {
        let evaluation = progression::evaluate(&self.rules, &self.catalog, state);
        notices.extend(evaluation.penalty.map(Notice::PenaltyApplied));
        notices.extend(evaluation.unlocked.into_iter().map(Notice::AchievementUnlocked));

        if state.phase == Phase::GameOver {
            notices.push(Notice::JourneyOver(GameOutcome::Defeat(DefeatReason::StruckOut)));
        } else if let Some(outcome) = outcome::settle(&self.rules, &self.catalog, state) {
            notices.push(Notice::JourneyOver(outcome));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Decision, DecisionId, EventId, GameEvent, Location, LocationId};
    use crate::core::{ResourceDelta, ResourceVector};
    use crate::events::{NoEvents, ScriptedEvents};

    fn journey() -> Journey {
        let catalog = Catalog::new(vec![
            Location::new(LocationId::new(1), "Port")
                .with_decision(
                    Decision::new(DecisionId::new(1), "Study")
                        .with_cost(ResourceDelta::new().money(-20))
                        .with_reward(ResourceDelta::new().knowledge(15))
                        .with_duration(2),
                )
                .with_event(
                    GameEvent::new(EventId::new(1), "Fever")
                        .with_effect(ResourceDelta::new().health(-10))
                        .with_probability(0.5),
                ),
            Location::new(LocationId::new(2), "Capital"),
        ])
        .unwrap();
        Journey::new(catalog, RulesConfig::default())
    }

    #[test]
    fn test_start_leaves_intro() {
        let journey = journey();
        let state = journey.new_game();

        let t = journey.reduce(&state, Action::Start, &mut NoEvents);

        assert_eq!(t.state.phase, Phase::Playing);
        assert_eq!(
            t.notices,
            vec![
                Notice::PhaseChanged {
                    from: Phase::Intro,
                    to: Phase::Playing
                },
                Notice::LocationEntered {
                    index: 0,
                    location: LocationId::new(1)
                },
            ]
        );
    }

    #[test]
    fn test_decisions_rejected_outside_playing() {
        let journey = journey();
        let state = journey.new_game();

        let t = journey.reduce(&state, Action::SelectDecision(DecisionId::new(1)), &mut NoEvents);

        assert_eq!(t.state, state);
        assert!(matches!(
            t.rejection(),
            Some(Rejection::WrongPhase {
                phase: Phase::Intro,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_decision_rejected() {
        let journey = journey();
        let state = GameState::started(journey.rules());

        let t = journey.reduce(&state, Action::SelectDecision(DecisionId::new(42)), &mut NoEvents);

        assert_eq!(t.state, state);
        assert_eq!(t.rejection(), Some(&Rejection::UnknownDecision(DecisionId::new(42))));
    }

    #[test]
    fn test_decision_without_event_settles() {
        let journey = journey();
        let state = GameState::started(journey.rules());

        let t = journey.reduce(&state, Action::SelectDecision(DecisionId::new(1)), &mut NoEvents);

        assert_eq!(t.state.resources, ResourceVector::new(80, 100, 15, 0, 28));
        assert_eq!(t.state.current_year, 1913);
        assert_eq!(t.state.phase, Phase::LocationComplete);
        assert!(t.state.is_completed(LocationId::new(1)));
        // Input state is untouched
        assert_eq!(state.resources, ResourceVector::new(100, 100, 0, 0, 30));
    }

    #[test]
    fn test_event_defers_progression_until_acknowledged() {
        let journey = journey();
        let state = GameState::started(journey.rules());
        let mut roller = ScriptedEvents::always(EventId::new(1), 1);

        let t = journey.reduce(&state, Action::SelectDecision(DecisionId::new(1)), &mut roller);
        assert_eq!(t.state.phase, Phase::Event);
        assert!(t.state.pending_event.is_some());
        assert!(t.state.completed_locations.is_empty());

        // No decisions while the event is pending
        let blocked = journey.reduce(&t.state, Action::AdvanceLocation, &mut roller);
        assert!(blocked.rejection().is_some());

        let acked = journey.reduce(&t.state, Action::AcknowledgeEvent, &mut roller);
        assert_eq!(acked.state.resources.health, 90);
        assert!(acked.state.pending_event.is_none());
        assert_eq!(acked.state.phase, Phase::LocationComplete);
        assert!(acked.notices.contains(&Notice::EventResolved {
            event: EventId::new(1),
            effect: ResourceDelta::new().health(-10),
        }));
        assert_eq!(roller.calls(), 1);
    }

    #[test]
    fn test_continue_then_advance() {
        let journey = journey();
        let state = GameState::started(journey.rules());
        let t = journey.reduce(&state, Action::SelectDecision(DecisionId::new(1)), &mut NoEvents);

        let stay = journey.reduce(&t.state, Action::Continue, &mut NoEvents);
        assert_eq!(stay.state.phase, Phase::Playing);
        assert_eq!(stay.state.current_location_index, 0);

        let moved = journey.reduce(&stay.state, Action::AdvanceLocation, &mut NoEvents);
        assert_eq!(moved.state.current_location_index, 1);
        assert_eq!(moved.state.phase, Phase::Playing);
    }

    #[test]
    fn test_finishing_short_of_goals_is_game_over() {
        let journey = journey();
        let mut state = GameState::started(journey.rules());
        state.current_location_index = 1;

        let t = journey.reduce(&state, Action::AdvanceLocation, &mut NoEvents);

        assert_eq!(t.state.phase, Phase::GameOver);
        assert_eq!(t.outcome(), Some(GameOutcome::Defeat(DefeatReason::FellShort)));
    }

    #[test]
    fn test_terminal_accepts_only_restart() {
        let journey = journey();
        let mut state = GameState::started(journey.rules());
        state.phase = Phase::GameOver;

        for action in [
            Action::Start,
            Action::SelectDecision(DecisionId::new(1)),
            Action::AcknowledgeEvent,
            Action::Continue,
            Action::AdvanceLocation,
        ] {
            let t = journey.reduce(&state, action, &mut NoEvents);
            assert_eq!(t.state, state, "{action:?} should be rejected");
        }

        let restarted = journey.reduce(&state, Action::Restart, &mut NoEvents);
        assert_eq!(restarted.state, GameState::started(journey.rules()));
    }
}
