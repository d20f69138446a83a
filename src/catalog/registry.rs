//! The ordered journey catalog.
//!
//! `Catalog` holds every location in visiting order and provides fast
//! lookup by `LocationId`. It is validated once on construction and never
//! mutated afterwards.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::definition::{Decision, DecisionId, EventId, Location, LocationId};

/// Errors found while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog has no locations")]
    Empty,

    #[error("{0} appears more than once")]
    DuplicateLocation(LocationId),

    #[error("{decision} appears more than once in {location}")]
    DuplicateDecision {
        location: LocationId,
        decision: DecisionId,
    },

    #[error("{decision} in {location} requires {required}, which {location} does not offer")]
    UnknownPrerequisite {
        location: LocationId,
        decision: DecisionId,
        required: DecisionId,
    },

    #[error("{event} appears more than once in {location}")]
    DuplicateEvent { location: LocationId, event: EventId },

    #[error("{event} in {location} has probability {probability}, expected 0..=1")]
    InvalidProbability {
        location: LocationId,
        event: EventId,
        probability: f64,
    },

    #[error("{decision} in {location} changes time directly; use its duration")]
    DecisionMovesTime {
        location: LocationId,
        decision: DecisionId,
    },

    #[error("{event} in {location} changes time; events may not touch the calendar")]
    EventMovesTime { location: LocationId, event: EventId },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialized form: a bare list of locations, in journey order.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct CatalogFile {
    locations: Vec<Location>,
}

/// Ordered, immutable list of journey locations.
///
/// ## Example
///
/// ```
/// use journey_engine::catalog::{Catalog, Decision, DecisionId, Location, LocationId};
///
/// let catalog = Catalog::new(vec![
///     Location::new(LocationId::new(1), "Port")
///         .with_decision(Decision::new(DecisionId::new(1), "Work on a steamer")),
///     Location::new(LocationId::new(2), "Capital"),
/// ])
/// .unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.last_index(), 1);
/// assert_eq!(catalog.index_of(LocationId::new(2)), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct Catalog {
    locations: Vec<Location>,
    index: FxHashMap<LocationId, usize>,
}

impl Catalog {
    /// Build and validate a catalog.
    pub fn new(locations: Vec<Location>) -> Result<Self, CatalogError> {
        if locations.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = FxHashMap::default();
        for (i, location) in locations.iter().enumerate() {
            if index.insert(location.id, i).is_some() {
                return Err(CatalogError::DuplicateLocation(location.id));
            }
            validate_location(location)?;
        }

        Ok(Self { locations, index })
    }

    /// Parse and validate a catalog from a JSON array of locations.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.locations)
    }

    /// Serialize the catalog as a JSON array of locations.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.locations)?)
    }

    /// Number of locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Always false for a validated catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Index of the final location.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.locations.len() - 1
    }

    /// The final location.
    #[must_use]
    pub fn last(&self) -> &Location {
        &self.locations[self.last_index()]
    }

    /// Location at a journey position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Location> {
        self.locations.get(index)
    }

    /// Location by ID.
    #[must_use]
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.index.get(&id).map(|&i| &self.locations[i])
    }

    /// Journey position of a location.
    #[must_use]
    pub fn index_of(&self, id: LocationId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Iterate over locations in journey order.
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Find a decision at a given location.
    #[must_use]
    pub fn decision(&self, location: LocationId, decision: DecisionId) -> Option<&Decision> {
        self.location(location)?.decision(decision)
    }
}

fn validate_location(location: &Location) -> Result<(), CatalogError> {
    let mut decisions = FxHashSet::default();
    for decision in &location.decisions {
        if !decisions.insert(decision.id) {
            return Err(CatalogError::DuplicateDecision {
                location: location.id,
                decision: decision.id,
            });
        }
    }

    for decision in &location.decisions {
        if decision.cost.time.is_some() || decision.reward.time.is_some() {
            return Err(CatalogError::DecisionMovesTime {
                location: location.id,
                decision: decision.id,
            });
        }
        if let Some(&required) = decision
            .required_decisions
            .iter()
            .find(|r| !decisions.contains(*r))
        {
            return Err(CatalogError::UnknownPrerequisite {
                location: location.id,
                decision: decision.id,
                required,
            });
        }
    }

    let mut events = FxHashSet::default();
    for event in &location.events {
        if !events.insert(event.id) {
            return Err(CatalogError::DuplicateEvent {
                location: location.id,
                event: event.id,
            });
        }
        if event.effect.time.is_some() {
            return Err(CatalogError::EventMovesTime {
                location: location.id,
                event: event.id,
            });
        }
        if !(0.0..=1.0).contains(&event.probability) {
            return Err(CatalogError::InvalidProbability {
                location: location.id,
                event: event.id,
                probability: event.probability,
            });
        }
    }

    Ok(())
}
