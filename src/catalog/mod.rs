//! Journey content: locations, decisions, and events.
//!
//! The catalog is supplied fully formed before a game starts and is consumed
//! as read-only data by the engine. Its shape is fixed here; its content
//! (names, numbers, how many stops) belongs to whoever builds it.
//!
//! - [`Location`], [`Decision`], [`GameEvent`]: immutable definitions
//! - [`Catalog`]: ordered, validated list of locations

mod definition;
mod registry;

pub use definition::{Decision, DecisionId, EventId, GameEvent, Location, LocationId};
pub use registry::{Catalog, CatalogError};
