//! Train, Car and Bus mini-games: challenge sampling and answer scoring.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

use crate::catalog::{CatalogItem, HintDisplay, HintPolicy, JourneyConfig};
use crate::constants::CAR_PUZZLE_CREDIT;
use crate::state::{PageId, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Train,
    Car,
    Bus,
}

impl GameKind {
    pub const ALL: [Self; 3] = [Self::Train, Self::Car, Self::Bus];

    #[must_use]
    pub const fn page(self) -> PageId {
        match self {
            Self::Train => PageId::Train,
            Self::Car => PageId::Car,
            Self::Bus => PageId::Bus,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Car => "car",
            Self::Bus => "bus",
        }
    }

    /// How this game's hints are shown, per the catalog.
    #[must_use]
    pub const fn hint_display(self, config: &JourneyConfig) -> HintDisplay {
        match self {
            Self::Train => config.games.train.hint_display,
            Self::Bus => config.games.bus.hint_display,
            Self::Car => HintDisplay::Always,
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengePrompt {
    pub hint: String,
    pub answer: String,
}

impl From<&CatalogItem> for ChallengePrompt {
    fn from(item: &CatalogItem) -> Self {
        Self {
            hint: item.hint.clone(),
            answer: item.answer.clone(),
        }
    }
}

/// Prompts drawn for one visit to a game page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameChallenge {
    pub kind: GameKind,
    pub prompts: SmallVec<[ChallengePrompt; 4]>,
}

impl GameChallenge {
    #[must_use]
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn hints(&self) -> impl Iterator<Item = &str> {
        self.prompts.iter().map(|p| p.hint.as_str())
    }

    pub fn answers(&self) -> impl Iterator<Item = &str> {
        self.prompts.iter().map(|p| p.answer.as_str())
    }
}

/// Outcome of a "check" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub kind: GameKind,
    pub score: u32,
    pub total: u32,
    pub credits: u32,
    /// Set for a missed car puzzle, which reveals its answer.
    pub revealed_answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("no {0} challenge is active")]
    NoChallenge(GameKind),
}

/// Draw a fresh challenge for `kind`.
///
/// Train and Bus sample without replacement; Car picks a single puzzle.
pub fn start_new_challenge<R: Rng + ?Sized>(
    kind: GameKind,
    config: &JourneyConfig,
    rng: &mut R,
) -> GameChallenge {
    let games = &config.games;
    let prompts = match kind {
        GameKind::Train => sample_items(&games.train.items, games.train.effective_sample_size(), rng),
        GameKind::Bus => sample_items(&games.bus.items, games.bus.effective_sample_size(), rng),
        GameKind::Car => games
            .car
            .puzzles
            .choose(rng)
            .map(ChallengePrompt::from)
            .into_iter()
            .collect(),
    };
    GameChallenge { kind, prompts }
}

fn sample_items<R: Rng + ?Sized>(
    items: &[CatalogItem],
    amount: usize,
    rng: &mut R,
) -> SmallVec<[ChallengePrompt; 4]> {
    items
        .choose_multiple(rng, amount)
        .map(ChallengePrompt::from)
        .collect()
}

#[must_use]
pub fn normalize_guess(guess: &str) -> String {
    guess.trim().to_lowercase()
}

/// Count positions where the normalized guess equals the expected answer.
///
/// Missing guesses and empty guesses never match, so the score stays within
/// `0..=answers.len()`.
#[must_use]
pub fn score_guesses<G, A>(guesses: &[G], answers: &[A]) -> u32
where
    G: AsRef<str>,
    A: AsRef<str>,
{
    let hits = guesses
        .iter()
        .zip(answers)
        .filter(|(guess, answer)| {
            let guess = normalize_guess(guess.as_ref());
            !guess.is_empty() && guess == answer.as_ref()
        })
        .count();
    u32::try_from(hits).unwrap_or(u32::MAX)
}

/// Score the active challenge and credit the session.
///
/// # Errors
///
/// Returns [`GameError::NoChallenge`] when no challenge for `kind` is active.
pub fn check_answers<G, R>(
    state: &mut SessionState,
    kind: GameKind,
    guesses: &[G],
    config: &JourneyConfig,
    rng: &mut R,
) -> Result<GameReport, GameError>
where
    G: AsRef<str>,
    R: Rng + ?Sized,
{
    let challenge = state
        .challenge
        .as_ref()
        .filter(|c| c.kind == kind && !c.is_empty())
        .ok_or(GameError::NoChallenge(kind))?;

    let answers: Vec<&str> = challenge.answers().collect();
    let score = score_guesses(guesses, &answers);
    let total = u32::try_from(answers.len()).unwrap_or(u32::MAX);
    let (earned, revealed_answer) = match kind {
        GameKind::Car if score == 0 => (0, answers.first().map(|a| (*a).to_string())),
        GameKind::Car => (CAR_PUZZLE_CREDIT, None),
        GameKind::Train | GameKind::Bus => (score, None),
    };

    let credits = state.add_credits(earned);
    log::debug!("{kind} check scored {score}/{total}, credits now {credits}");

    if config.hint_policy == HintPolicy::Regenerate {
        state.challenge = Some(start_new_challenge(kind, config, rng));
        state.hints_revealed = false;
    }

    Ok(GameReport {
        kind,
        score,
        total,
        credits,
        revealed_answer,
    })
}

/// Show hints for games that hide them until asked.
pub fn reveal_hints(state: &mut SessionState) {
    if state.challenge.is_some() {
        state.hints_revealed = true;
    }
}

/// Whether the hints of the active challenge should be displayed.
#[must_use]
pub fn hints_visible(state: &SessionState, config: &JourneyConfig) -> bool {
    state.challenge.as_ref().is_some_and(|c| {
        c.kind.hint_display(config) == HintDisplay::Always || state.hints_revealed
    })
}
