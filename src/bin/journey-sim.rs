//! Headless journey simulator.
//!
//! Plays seeded games with a greedy autoplayer and prints one summary per
//! game. Useful for balancing a catalog or a rule set.
//!
//! ```text
//! journey-sim --games 100 --seed 7
//! journey-sim --catalog route.json --rules hard.json --json
//! RUST_LOG=journey_engine=debug journey-sim --games 1
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use journey_engine::catalog::{Catalog, CatalogError, DecisionId};
use journey_engine::core::{ConfigError, Phase, RulesConfig};
use journey_engine::engine::{Journey, JourneyEngine, JourneySummary, Notice};
use journey_engine::events::{EventRoller, WeightedEventRoller};
use journey_engine::journeys::SampleJourneyBuilder;

/// Upper bound on actions per game, in case a rule set never terminates.
const MAX_STEPS: usize = 1_000;

#[derive(Parser)]
#[command(name = "journey-sim")]
#[command(about = "Play seeded journey games with a greedy autoplayer")]
#[command(version)]
struct Cli {
    /// Catalog JSON file (defaults to the built-in sample journey)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Rules JSON file (defaults to the stock rules)
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Seed of the first game; game `n` uses `seed + n`
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Number of games to play
    #[arg(short, long, default_value_t = 1)]
    games: u64,

    /// Print one JSON object per game instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum SimError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct GameReport {
    seed: u64,
    steps: usize,
    #[serde(flatten)]
    summary: JourneySummary,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "simulation failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn read(path: &Path) -> Result<String, SimError> {
    std::fs::read_to_string(path).map_err(|source| SimError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_journey(cli: &Cli) -> Result<Journey, SimError> {
    let rules = match &cli.rules {
        Some(path) => RulesConfig::from_json(&read(path)?)?,
        None => RulesConfig::default(),
    };
    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_json(&read(path)?)?,
        None => SampleJourneyBuilder::new().catalog()?,
    };
    info!(locations = catalog.len(), "journey loaded");
    Ok(Journey::new(catalog, rules))
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let journey = load_journey(cli)?;
    let mut victories = 0u64;

    for n in 0..cli.games {
        let seed = cli.seed.wrapping_add(n);
        let mut engine = JourneyEngine::new(journey.clone(), WeightedEventRoller::new(seed));
        let steps = autoplay(&mut engine);
        let summary = engine.summary();

        if summary.outcome.is_some_and(|o| o.is_victory()) {
            victories += 1;
        }

        let report = GameReport { seed, steps, summary };
        if cli.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            print_report(&report);
        }
    }

    if !cli.json && cli.games > 1 {
        println!("\n{victories}/{} games won", cli.games);
    }
    Ok(())
}

fn print_report(report: &GameReport) {
    let s = &report.summary;
    let outcome = s
        .outcome
        .map_or_else(|| format!("unfinished ({})", s.phase), |o| o.to_string());
    let r = &s.resources;
    println!(
        "seed {:>4}: {outcome} in {} | money {} health {} knowledge {} experience {} time {} | {} completed, {} failed, {} decisions",
        report.seed,
        s.year,
        r.money,
        r.health,
        r.knowledge,
        r.experience,
        r.time,
        s.locations_completed,
        s.locations_failed,
        s.decisions_taken,
    );
    if !s.achievements.is_empty() {
        println!("           achievements: {:?}", s.achievements);
    }
}

/// Play one game to the end and return the number of actions taken.
fn autoplay<R: EventRoller>(engine: &mut JourneyEngine<R>) -> usize {
    engine.start();

    for step in 1..=MAX_STEPS {
        let phase = engine.state().phase;
        let notices = match phase {
            Phase::Intro => engine.start(),
            Phase::Event => engine.acknowledge_event(),
            Phase::Playing => match best_decision(engine) {
                Some(decision) => engine.select_decision(decision),
                None => engine.advance_location(),
            },
            Phase::LocationComplete => match best_decision(engine) {
                Some(_) => engine.continue_here(),
                None => engine.advance_location(),
            },
            Phase::Victory | Phase::GameOver => return step,
        };

        for notice in notices.iter().filter(|n| !n.is_transient()) {
            debug!(?notice, "autoplay");
        }
        if notices.iter().any(|n| matches!(n, Notice::Rejected(_))) {
            engine.advance_location();
        }
    }
    MAX_STEPS
}

/// The decision with the best knowledge and experience gain that no hard
/// gate refuses and that keeps money and health above zero.
fn best_decision<R: EventRoller>(engine: &JourneyEngine<R>) -> Option<DecisionId> {
    let rules = engine.journey().rules();
    let resources = engine.state().resources;

    engine
        .available_decisions()
        .filter_map(|decision| {
            let report = engine.preview(decision.id)?;
            if report.refusal(rules).is_some() {
                return None;
            }
            let penalties = report.penalties(rules);
            let after = penalties
                .iter()
                .fold(resources, |r, p| r.apply(&p.delta))
                .apply(&decision.cost)
                .apply(&decision.reward);
            if after.money <= 0 || after.health <= 0 {
                return None;
            }
            let gain = after
                .knowledge
                .saturating_sub(resources.knowledge)
                .saturating_add(after.experience.saturating_sub(resources.experience));
            Some((gain, decision.id))
        })
        .max_by_key(|&(gain, id)| (gain, std::cmp::Reverse(id)))
        .map(|(_, id)| id)
}
