use anyhow::{Result, bail};
use thirtyfour::prelude::*;
use wellness_game::{Collaborators, JourneyEngine};

use crate::browser::TestBridge;
use crate::logic::TesterAssets;

pub mod chat;
pub mod gate;
pub mod mansion;
pub mod smoke;

/// Inputs for one logic iteration.
#[derive(Debug, Clone, Copy)]
pub struct LogicCtx<'a> {
    pub assets: &'a TesterAssets,
    pub seed: u64,
}

impl LogicCtx<'_> {
    /// Engine with the offline collaborators.
    pub fn engine(&self) -> JourneyEngine {
        JourneyEngine::offline(self.assets.config.clone(), self.seed)
    }

    pub fn engine_with(&self, collaborators: Collaborators) -> JourneyEngine {
        JourneyEngine::new(self.assets.config.clone(), collaborators, self.seed)
    }

    pub fn offline_collaborators(&self) -> Collaborators {
        Collaborators::offline(&self.assets.config)
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub seed: u64,
    pub bridge: TestBridge<'a>,
    pub verbose: bool,
}

/// A journey check that runs against the engine and, where it has a browser
/// counterpart, against the served web app.
#[async_trait::async_trait]
pub trait Scenario: Send + Sync {
    fn key(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns an error describing the first broken expectation.
    fn run_logic(&self, ctx: &LogicCtx<'_>) -> Result<()>;

    fn has_browser(&self) -> bool {
        false
    }

    async fn run_browser(&self, _driver: &WebDriver, _ctx: &ScenarioCtx<'_>) -> Result<()> {
        bail!("{} has no browser steps", self.key())
    }
}

fn all_scenarios() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(smoke::SmokeScenario),
        Box::new(gate::LockedMansionScenario),
        Box::new(gate::CarUnlockScenario),
        Box::new(gate::FullJourneyScenario),
        Box::new(chat::CrisisReplyScenario),
        Box::new(chat::CollaboratorOutageScenario),
        Box::new(chat::VoiceReflectionScenario),
        Box::new(mansion::EmptyMansionScenario),
        Box::new(mansion::ResetScenario),
    ]
}

pub fn get_scenario(name: &str) -> Option<Box<dyn Scenario>> {
    let name = name.to_lowercase();
    let key = match name.as_str() {
        "gate" => "locked-mansion",
        "car" => "car-unlock",
        "crisis" => "crisis-reply",
        "outage" => "collaborator-outage",
        "voice" => "voice-reflection",
        "full" => "full-journey",
        other => other,
    };
    all_scenarios().into_iter().find(|s| s.key() == key)
}

/// Expand a user selection, where `all` means every registered scenario.
pub fn resolve_scenarios(names: &[String]) -> Result<Vec<Box<dyn Scenario>>> {
    if names.iter().any(|n| n.eq_ignore_ascii_case("all")) {
        return Ok(all_scenarios());
    }
    names
        .iter()
        .map(|name| {
            get_scenario(name).ok_or_else(|| anyhow::anyhow!("Unknown scenario: {name}"))
        })
        .collect()
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    all_scenarios()
        .iter()
        .map(|s| (s.key(), s.description()))
        .collect()
}
