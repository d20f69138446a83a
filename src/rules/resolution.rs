//! Decision resolution.
//!
//! Validates and applies one player-chosen decision at the current location.
//! Checks run in a fixed order:
//!
//! 1. Already taken here: silent no-op.
//! 2. Prerequisites not taken (order gate).
//! 3. `min_knowledge` / `min_experience` not met (qualification gate).
//! 4. Cost unaffordable (affordability gate).
//!
//! Each gate carries a [`GatePolicy`]. With the stock rules the first two
//! charge a soft penalty and the third is a hard gate. Every hard-gate check
//! runs before anything is written, so a refused decision leaves the state
//! exactly as it was. All gates compare against the resources the player
//! saw when choosing, before any penalty from this resolution.
//!
//! On success: penalties, then cost, then reward go through the ledger, the
//! calendar advances by the decision's duration (capped at the end year),
//! the time budget shrinks by the same amount (floored at 0), and the
//! decision is recorded. Rolling for an event is left to the caller.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use super::penalty::{Penalty, PenaltyKind};
use crate::catalog::{Decision, DecisionId, Location};
use crate::core::{DecisionRecord, GatePolicy, GameState, ResourceDelta, ResourceKind, RulesConfig};

/// Why a decision was refused outright.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Refusal {
    /// The cost would drive these resources below zero.
    Unaffordable { shortfalls: Vec<ResourceKind> },
    /// Prerequisites not yet taken, under a hard order gate.
    OutOfOrder { missing: SmallVec<[DecisionId; 4]> },
    /// Stat minimums not met, under a hard qualification gate.
    Underqualified { knowledge: bool, experience: bool },
}

impl std::fmt::Display for Refusal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Refusal::Unaffordable { shortfalls } => {
                f.write_str("not enough")?;
                for (i, kind) in shortfalls.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{kind}")?;
                }
                Ok(())
            }
            Refusal::OutOfOrder { missing } => write!(f, "{} prerequisite(s) not taken", missing.len()),
            Refusal::Underqualified { .. } => f.write_str("minimum knowledge or experience not met"),
        }
    }
}

/// Result of resolving one decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The decision was already taken at this location; nothing changed.
    AlreadySelected,
    /// A hard gate refused the decision; nothing changed.
    Refused(Refusal),
    /// The decision was applied.
    Applied {
        /// Soft penalties charged along the way, in check order.
        penalties: SmallVec<[Penalty; 2]>,
        /// Cost plus reward, for feedback.
        net: ResourceDelta,
    },
}

impl Resolution {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Resolution::Applied { .. })
    }
}

/// Outcome of the prerequisite and stat checks, before policy is applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GateReport {
    /// Prerequisites not yet taken at this location.
    pub missing_prerequisites: SmallVec<[DecisionId; 4]>,
    pub knowledge_short: bool,
    pub experience_short: bool,
    /// Fields the cost cannot cover.
    pub shortfalls: Vec<ResourceKind>,
}

impl GateReport {
    /// Run every check against the current state without changing it.
    #[must_use]
    pub fn inspect(state: &GameState, location: &Location, decision: &Decision) -> Self {
        let resources = &state.resources;
        Self {
            missing_prerequisites: decision
                .required_decisions
                .iter()
                .copied()
                .filter(|&required| !state.is_selected(location.id, required))
                .collect(),
            knowledge_short: decision.min_knowledge.is_some_and(|min| min > resources.knowledge),
            experience_short: decision.min_experience.is_some_and(|min| min > resources.experience),
            shortfalls: resources.shortfalls(&decision.cost),
        }
    }

    #[must_use]
    pub fn out_of_order(&self) -> bool {
        !self.missing_prerequisites.is_empty()
    }

    #[must_use]
    pub fn underqualified(&self) -> bool {
        self.knowledge_short || self.experience_short
    }

    #[must_use]
    pub fn affordable(&self) -> bool {
        self.shortfalls.is_empty()
    }

    /// The first hard gate this report trips, if any.
    #[must_use]
    pub fn refusal(&self, rules: &RulesConfig) -> Option<Refusal> {
        if self.out_of_order() && rules.gates.order == GatePolicy::HardGate {
            return Some(Refusal::OutOfOrder {
                missing: self.missing_prerequisites.clone(),
            });
        }
        if self.underqualified() && rules.gates.qualification == GatePolicy::HardGate {
            return Some(Refusal::Underqualified {
                knowledge: self.knowledge_short,
                experience: self.experience_short,
            });
        }
        if !self.affordable() && rules.gates.affordability == GatePolicy::HardGate {
            return Some(Refusal::Unaffordable {
                shortfalls: self.shortfalls.clone(),
            });
        }
        None
    }

    /// Soft penalties this report charges, in check order.
    #[must_use]
    pub fn penalties(&self, rules: &RulesConfig) -> SmallVec<[Penalty; 2]> {
        let mut penalties = SmallVec::new();
        if self.out_of_order() && rules.gates.order == GatePolicy::SoftPenalty {
            penalties.push(Penalty::new(PenaltyKind::OutOfOrder, rules.order_penalty));
        }
        if self.underqualified() && rules.gates.qualification == GatePolicy::SoftPenalty {
            let delta = rules
                .qualification_penalty
                .for_failures(self.knowledge_short, self.experience_short);
            penalties.push(Penalty::new(PenaltyKind::Underqualified, delta));
        }
        penalties
    }
}

/// Validate and apply `decision` at `location`.
///
/// `location` must be the location under the state's cursor.
pub fn resolve(
    rules: &RulesConfig,
    state: &mut GameState,
    location: &Location,
    decision: &Decision,
) -> Resolution {
    if state.is_selected(location.id, decision.id) {
        debug!(location = %location.id, decision = %decision.id, "decision already taken, ignoring");
        return Resolution::AlreadySelected;
    }

    let report = GateReport::inspect(state, location, decision);
    if let Some(refusal) = report.refusal(rules) {
        warn!(location = %location.id, decision = %decision.id, %refusal, "decision refused");
        return Resolution::Refused(refusal);
    }

    let before = state.resources;
    let penalties = report.penalties(rules);
    for penalty in &penalties {
        warn!(decision = %decision.id, kind = %penalty.kind, delta = %penalty.delta, "penalty charged");
        penalty.charge(state);
    }

    state.resources = state
        .resources
        .apply(&decision.cost)
        .apply(&decision.reward)
        .consume_time(decision.duration);

    let years = i32::try_from(decision.duration).unwrap_or(i32::MAX);
    state.current_year = state.current_year.saturating_add(years).min(rules.end_year);

    state.record_selection(location.id, decision.id);
    state.record_history(DecisionRecord::new(
        location.id,
        decision.id,
        state.current_year,
        before,
        state.resources,
    ));

    let net = decision.net();
    debug!(
        location = %location.id,
        decision = %decision.id,
        %net,
        year = state.current_year,
        "decision applied"
    );

    Resolution::Applied { penalties, net }
}
