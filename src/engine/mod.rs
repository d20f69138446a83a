//! Phase controller.
//!
//! - [`Journey`]: catalog + rules, and the `(GameState, Action) -> GameState`
//!   reducer that sequences resolution, events, progression and outcome
//! - [`JourneyEngine`]: a live session owning the state and the event roller
//! - [`Notice`]: what each step reports back to the presentation layer

mod journey;
mod notice;
mod session;

pub use journey::{Journey, Transition};
pub use notice::{Notice, Rejection};
pub use session::{JourneyEngine, JourneySummary};
