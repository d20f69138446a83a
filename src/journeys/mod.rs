//! Ready-made journey content.
//!
//! The engine never depends on this module; it exists so the CLI and the
//! integration tests have a realistic catalog to play.

mod sample;

pub use sample::SampleJourneyBuilder;
