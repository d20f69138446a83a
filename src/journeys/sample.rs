//! The stock seven-stop journey, 1911 to 1941.
//!
//! Each stop asks for more knowledge and experience than the last, so a
//! player has to take several decisions before a location settles. Taking
//! every decision in listed order with no events wins at the last stop.

use crate::catalog::{Catalog, CatalogError, Decision, DecisionId, EventId, GameEvent, Location, LocationId};
use crate::core::{ResourceDelta, RulesConfig};
use crate::engine::Journey;

fn d(id: u32, name: &str) -> Decision {
    Decision::new(DecisionId::new(id), name)
}

fn e(id: u32, name: &str, probability: f64, effect: ResourceDelta) -> GameEvent {
    GameEvent::new(EventId::new(id), name)
        .with_probability(probability)
        .with_effect(effect)
}

fn delta() -> ResourceDelta {
    ResourceDelta::new()
}

fn locations() -> Vec<Location> {
    vec![
        Location::new(LocationId::new(1), "Saigon")
            .with_required_knowledge(12)
            .with_min_decisions(2)
            .with_decision(
                d(1, "Enroll at the provincial school")
                    .with_cost(delta().money(-10))
                    .with_reward(delta().knowledge(8))
                    .with_duration(1),
            )
            .with_decision(
                d(2, "Sign on as a kitchen hand")
                    .with_cost(delta().health(-5))
                    .with_reward(delta().money(25).experience(5))
                    .with_duration(1),
            )
            .with_decision(
                d(3, "Read the French newspapers")
                    .with_cost(delta().money(-5))
                    .with_reward(delta().knowledge(6))
                    .with_duration(1)
                    .requires(DecisionId::new(1)),
            )
            .with_event(e(1, "Monsoon fever", 0.15, delta().health(-8)))
            .with_event(e(2, "Generous captain", 0.10, delta().money(15))),
        Location::new(LocationId::new(2), "Marseille")
            .with_required_knowledge(25)
            .with_required_experience(15)
            .with_min_decisions(2)
            .with_decision(
                d(1, "Work the docks")
                    .with_cost(delta().health(-8))
                    .with_reward(delta().money(30).experience(8))
                    .with_duration(1),
            )
            .with_decision(
                d(2, "Visit the public library")
                    .with_cost(delta().money(-10))
                    .with_reward(delta().knowledge(10))
                    .with_duration(1),
            )
            .with_decision(
                d(3, "Sail the colonial ports")
                    .with_cost(delta().money(-25))
                    .with_reward(delta().experience(12).knowledge(5))
                    .with_duration(2)
                    .requires(DecisionId::new(1))
                    .with_min_experience(10),
            )
            .with_event(e(1, "Pickpocket", 0.15, delta().money(-15))),
        Location::new(LocationId::new(3), "London")
            .with_required_knowledge(40)
            .with_required_experience(35)
            .with_min_decisions(2)
            .with_decision(
                d(1, "Shovel snow for a school")
                    .with_cost(delta().health(-10))
                    .with_reward(delta().money(20).experience(6))
                    .with_duration(1),
            )
            .with_decision(
                d(2, "Work a hotel pastry kitchen")
                    .with_cost(delta().health(-5))
                    .with_reward(delta().money(30).experience(8).knowledge(4))
                    .with_duration(2),
            )
            .with_decision(
                d(3, "Join workers' study circles")
                    .with_cost(delta().money(-10))
                    .with_reward(delta().knowledge(10).experience(6))
                    .with_duration(1)
                    .requires(DecisionId::new(2))
                    .with_min_knowledge(20),
            )
            .with_event(e(1, "Hard winter", 0.20, delta().health(-10))),
        Location::new(LocationId::new(4), "Paris")
            .with_required_knowledge(60)
            .with_required_experience(60)
            .with_min_decisions(3)
            .with_decision(
                d(1, "Retouch photographs")
                    .with_cost(delta().health(-5))
                    .with_reward(delta().money(25).experience(5))
                    .with_duration(1),
            )
            .with_decision(
                d(2, "Write for the émigré press")
                    .with_cost(delta().money(-15))
                    .with_reward(delta().knowledge(12).experience(8))
                    .with_duration(2)
                    .with_min_knowledge(30),
            )
            .with_decision(
                d(3, "Petition the peace conference")
                    .with_cost(delta().money(-20).health(-5))
                    .with_reward(delta().experience(15).knowledge(5))
                    .with_duration(1)
                    .requires(DecisionId::new(2)),
            )
            .with_decision(
                d(4, "Found a political club")
                    .with_cost(delta().money(-20))
                    .with_reward(delta().experience(10).knowledge(8))
                    .with_duration(2)
                    .requires(DecisionId::new(3))
                    .with_min_experience(40),
            )
            .with_event(e(1, "Police surveillance", 0.20, delta().health(-5).money(-10)))
            .with_event(e(2, "Donation from supporters", 0.10, delta().money(20))),
        Location::new(LocationId::new(5), "Moscow")
            .with_required_knowledge(80)
            .with_required_experience(90)
            .with_min_decisions(2)
            .with_decision(
                d(1, "Study at the eastern university")
                    .with_cost(delta().money(-20))
                    .with_reward(delta().knowledge(15))
                    .with_duration(2),
            )
            .with_decision(
                d(2, "Attend the international congress")
                    .with_cost(delta().money(-15).health(-5))
                    .with_reward(delta().experience(12).knowledge(5))
                    .with_duration(1)
                    .with_min_knowledge(50),
            )
            .with_decision(
                d(3, "Draft training material")
                    .with_cost(delta().health(-5))
                    .with_reward(delta().knowledge(8).experience(8).money(10))
                    .with_duration(1)
                    .requires(DecisionId::new(1)),
            )
            .with_event(e(1, "Bitter cold", 0.20, delta().health(-12))),
        Location::new(LocationId::new(6), "Guangzhou")
            .with_required_knowledge(100)
            .with_required_experience(120)
            .with_min_decisions(2)
            .with_decision(
                d(1, "Train young cadres")
                    .with_cost(delta().money(-15).health(-5))
                    .with_reward(delta().experience(15).knowledge(5))
                    .with_duration(2),
            )
            .with_decision(
                d(2, "Publish a movement newspaper")
                    .with_cost(delta().money(-20))
                    .with_reward(delta().knowledge(10).experience(5))
                    .with_duration(2),
            )
            .with_decision(
                d(3, "Organize the youth league")
                    .with_cost(delta().money(-10))
                    .with_reward(delta().experience(10))
                    .with_duration(1)
                    .requires(DecisionId::new(1))
                    .with_min_experience(55),
            )
            .with_event(e(1, "Arrest warrant", 0.15, delta().health(-10).money(-15))),
        Location::new(LocationId::new(7), "Pac Bo")
            .with_min_decisions(1)
            .with_decision(
                d(1, "Set up base in the mountain cave")
                    .with_cost(delta().health(-10))
                    .with_reward(delta().experience(10).knowledge(5))
                    .with_duration(2),
            )
            .with_decision(
                d(2, "Meet the border villages")
                    .with_cost(delta().money(-10))
                    .with_reward(delta().experience(5))
                    .with_duration(1),
            ),
    ]
}

/// Builder for the sample journey.
///
/// ## Example
///
/// ```
/// use journey_engine::journeys::SampleJourneyBuilder;
///
/// let journey = SampleJourneyBuilder::new().without_events().build().unwrap();
/// assert_eq!(journey.catalog().len(), 7);
/// ```
#[derive(Clone, Debug)]
pub struct SampleJourneyBuilder {
    rules: RulesConfig,
    event_scale: f64,
}

impl Default for SampleJourneyBuilder {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            event_scale: 1.0,
        }
    }
}

impl SampleJourneyBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Play under a different rule set.
    #[must_use]
    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Multiply every event probability by `scale` (capped at 1).
    #[must_use]
    pub fn event_scale(mut self, scale: f64) -> Self {
        self.event_scale = scale.max(0.0);
        self
    }

    /// No event ever fires.
    #[must_use]
    pub fn without_events(self) -> Self {
        self.event_scale(0.0)
    }

    /// The catalog alone.
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        let mut locations = locations();
        for event in locations.iter_mut().flat_map(|l| l.events.iter_mut()) {
            event.probability = (event.probability * self.event_scale).min(1.0);
        }
        Catalog::new(locations)
    }

    pub fn build(self) -> Result<Journey, CatalogError> {
        let catalog = self.catalog()?;
        Ok(Journey::new(catalog, self.rules))
    }
}
