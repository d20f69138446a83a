//! Journey rules.
//!
//! Pure functions over `GameState`, one module per concern:
//!
//! - `resolution`: validate and apply a single decision
//! - `progression`: settle the current location, strikes, advancing
//! - `outcome`: victory and defeat predicates
//! - `penalty`: the soft penalties charged along the way
//!
//! The phase controller in `engine` sequences these into a turn cycle.

pub mod penalty;
pub mod resolution;
pub mod progression;
pub mod outcome;

pub use penalty::{Penalty, PenaltyKind};
pub use resolution::{resolve, GateReport, Refusal, Resolution};
pub use progression::{advance, evaluate, requirements_met, short_of_decisions, Advance, Evaluation};
pub use outcome::{conclude, defeat_reason, is_defeat, is_victory, settle, DefeatReason, GameOutcome};
