//! Notices emitted to the presentation layer.
//!
//! Every transition returns the notices it produced, in the order things
//! happened. Nothing in here is an error: refused actions come back as
//! [`Notice::Rejected`] with the state left untouched.

use serde::{Deserialize, Serialize};

use crate::catalog::{DecisionId, EventId, GameEvent, LocationId};
use crate::core::{Achievement, Action, Phase, ResourceDelta};
use crate::rules::{GameOutcome, Penalty, Refusal};

/// Why an action was not carried out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// The action is not accepted in the current phase.
    WrongPhase { action: Action, phase: Phase },
    /// The current location offers no such decision.
    UnknownDecision(DecisionId),
    /// A hard gate refused the decision.
    Refused { decision: DecisionId, reason: Refusal },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::WrongPhase { action, phase } => {
                write!(f, "{} is not allowed during {phase}", action.name())
            }
            Rejection::UnknownDecision(id) => write!(f, "{id} is not offered here"),
            Rejection::Refused { decision, reason } => write!(f, "{decision} refused: {reason}"),
        }
    }
}

/// Something the presentation layer may want to show.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    PhaseChanged { from: Phase, to: Phase },
    LocationEntered { index: usize, location: LocationId },
    DecisionApplied { decision: DecisionId, net: ResourceDelta },
    PenaltyApplied(Penalty),
    EventTriggered(GameEvent),
    EventResolved { event: EventId, effect: ResourceDelta },
    AchievementUnlocked(Achievement),
    JourneyOver(GameOutcome),
    Rejected(Rejection),
}

impl Notice {
    /// Warnings and feedback that a UI shows briefly and then dismisses.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Notice::PenaltyApplied(_) | Notice::DecisionApplied { .. } | Notice::Rejected(_)
        )
    }
}
