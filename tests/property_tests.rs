//! Property tests over random action sequences on the sample journey.

use proptest::prelude::*;

use journey_engine::catalog::DecisionId;
use journey_engine::core::{Action, GameState, Phase};
use journey_engine::engine::{Journey, Notice};
use journey_engine::events::WeightedEventRoller;
use journey_engine::journeys::SampleJourneyBuilder;

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        1 => Just(Action::Start),
        6 => (1u32..=5).prop_map(|id| Action::SelectDecision(DecisionId::new(id))),
        2 => Just(Action::AcknowledgeEvent),
        1 => Just(Action::Continue),
        2 => Just(Action::AdvanceLocation),
    ]
}

fn journey() -> Journey {
    SampleJourneyBuilder::new().event_scale(2.0).build().unwrap()
}

/// Run `actions` from a fresh game, checking `check(before, after, notices)`
/// on every step.
fn replay(
    seed: u64,
    actions: &[Action],
    mut check: impl FnMut(&Journey, &GameState, &GameState, &[Notice]) -> Result<(), TestCaseError>,
) -> Result<(), TestCaseError> {
    let journey = journey();
    let mut roller = WeightedEventRoller::new(seed);
    let mut state = journey.new_game();

    for &action in actions {
        let t = journey.reduce(&state, action, &mut roller);
        check(&journey, &state, &t.state, &t.notices)?;
        state = t.state;
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_calendar_and_cursor_only_move_forward(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..80)) {
        replay(seed, &actions, |journey, before, after, _| {
            prop_assert!(after.current_year >= before.current_year);
            prop_assert!(after.current_year <= journey.rules().end_year);
            prop_assert!(after.resources.time <= before.resources.time);
            prop_assert!(after.resources.time >= 0);
            prop_assert!(after.current_location_index >= before.current_location_index);
            prop_assert!(after.current_location_index <= journey.catalog().last_index());
            Ok(())
        })?;
    }

    #[test]
    fn prop_rejections_leave_state_untouched(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..80)) {
        replay(seed, &actions, |_, before, after, notices| {
            if notices.iter().any(|n| matches!(n, Notice::Rejected(_))) {
                prop_assert_eq!(notices.len(), 1);
                prop_assert_eq!(before, after);
            }
            Ok(())
        })?;
    }

    #[test]
    fn prop_applied_decisions_were_affordable(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..80)) {
        replay(seed, &actions, |journey, before, _, notices| {
            for notice in notices {
                if let Notice::DecisionApplied { decision, .. } = notice {
                    let location = before.current_location(journey.catalog());
                    let decision = location.and_then(|l| l.decision(*decision));
                    prop_assert!(decision.is_some());
                    if let Some(decision) = decision {
                        prop_assert!(before.resources.affordable(&decision.cost));
                    }
                }
            }
            Ok(())
        })?;
    }

    #[test]
    fn prop_terminal_phases_are_final(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..120)) {
        replay(seed, &actions, |_, before, after, _| {
            if before.phase.is_terminal() {
                prop_assert_eq!(before, after);
            }
            Ok(())
        })?;
    }

    #[test]
    fn prop_decisions_taken_at_most_once(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..80)) {
        replay(seed, &actions, |_, _, after, _| {
            for (location, taken) in after.selected_decisions.iter() {
                let mut ids: Vec<_> = taken.iter().copied().collect();
                ids.sort();
                ids.dedup();
                prop_assert_eq!(ids.len(), taken.len(), "duplicate decision at {}", location);
            }
            prop_assert!(after.failed_locations.iter().all(|l| !after.is_completed(*l)));
            Ok(())
        })?;
    }

    #[test]
    fn prop_event_phase_always_has_pending_event(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..80)) {
        replay(seed, &actions, |_, _, after, _| {
            prop_assert_eq!(after.phase == Phase::Event, after.pending_event.is_some());
            Ok(())
        })?;
    }
}
