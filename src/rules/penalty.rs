//! Soft penalties.
//!
//! A penalty is a resource deduction charged for a sub-optimal choice
//! without forbidding it. Each one is tagged with the rule that triggered
//! it so the presentation layer can explain the charge.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, ResourceDelta};

/// The rule that charged a penalty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyKind {
    /// Decision taken before its prerequisites.
    OutOfOrder,
    /// Decision taken without the minimum knowledge or experience.
    Underqualified,
    /// Location left short of its decision count.
    LocationFailed,
}

impl std::fmt::Display for PenaltyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PenaltyKind::OutOfOrder => "out of order",
            PenaltyKind::Underqualified => "underqualified",
            PenaltyKind::LocationFailed => "location failed",
        };
        f.write_str(name)
    }
}

/// A charged penalty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Penalty {
    pub kind: PenaltyKind,
    pub delta: ResourceDelta,
}

impl Penalty {
    #[must_use]
    pub const fn new(kind: PenaltyKind, delta: ResourceDelta) -> Self {
        Self { kind, delta }
    }

    /// Apply this penalty to the state's resources.
    pub fn charge(&self, state: &mut GameState) {
        state.resources = state.resources.apply(&self.delta);
    }
}
