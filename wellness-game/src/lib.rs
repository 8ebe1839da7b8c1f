//! Journey to Wellness core
//!
//! Platform-agnostic logic for the wellness journey: session state, the three
//! transport mini-games, reflection and chat handling, the mansion gate, and
//! the closing story. No UI or browser dependencies live here.

pub mod catalog;
pub mod chat;
pub mod collaborators;
pub mod constants;
pub mod error;
pub mod games;
pub mod gate;
pub mod reflection;
pub mod router;
pub mod state;
pub mod story;

use chrono::NaiveDateTime;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

// Re-export commonly used types
pub use catalog::{
    CatalogItem, ChatCfg, ConfigError, HintDisplay, HintPolicy, InputRetention, JourneyConfig,
    StoryVariant,
};
pub use chat::{ChatOutcome, contains_crisis_phrase, send_reflection};
pub use collaborators::{
    ChatResponder, Classification, Classifier, CollaboratorError, Collaborators,
    KeywordClassifier, NarrativeRenderer, RuleBasedResponder, SilentSynthesizer, SpeechClip,
    SpeechSynthesizer, Transcriber, UnavailableTranscriber,
};
pub use error::{JourneyError, StorageError, ValidationRejected};
pub use games::{
    GameChallenge, GameError, GameKind, GameReport, check_answers, normalize_guess,
    score_guesses, start_new_challenge,
};
pub use gate::{can_enter_mansion, credits_needed};
pub use reflection::{ReflectionSource, accept_recording, merge_reflection};
pub use router::{
    CycleOutcome, GameAction, HomeAction, MansionAction, Notice, NoticeLevel, PageAction,
    PageBody, PageView, Router, render_view,
};
pub use state::{ChatLine, MoodEntry, PageId, Sentiment, SessionState, Speaker, Tone};
pub use story::{RenderedNarrative, StoryError, SvgStoryRenderer, compose_story, wrap_lines};

/// Trait for abstracting where a session snapshot lives between page loads.
/// Platform-specific implementations should provide this.
pub trait SessionStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the session snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn save(&self, state: &SessionState) -> Result<(), Self::Error>;

    /// Load the last saved snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored snapshot cannot be read or parsed.
    fn load(&self) -> Result<Option<SessionState>, Self::Error>;

    /// Forget the saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be removed.
    fn clear(&self) -> Result<(), Self::Error>;
}

/// One user's journey: configuration, collaborators, session, and the seeded
/// RNG that draws game challenges.
pub struct JourneyEngine {
    config: JourneyConfig,
    collaborators: Collaborators,
    rng: ChaCha20Rng,
    state: SessionState,
}

impl JourneyEngine {
    #[must_use]
    pub fn new(config: JourneyConfig, collaborators: Collaborators, seed: u64) -> Self {
        Self {
            config,
            collaborators,
            rng: ChaCha20Rng::seed_from_u64(seed),
            state: SessionState::default(),
        }
    }

    /// Engine backed entirely by the in-process collaborators.
    #[must_use]
    pub fn offline(config: JourneyConfig, seed: u64) -> Self {
        let collaborators = Collaborators::offline(&config);
        Self::new(config, collaborators, seed)
    }

    /// Adopt an existing session, repairing anything the router cannot render.
    #[must_use]
    pub fn with_state(mut self, state: SessionState) -> Self {
        self.state = state;
        self.settle();
        self
    }

    /// Restore the session saved in `store`, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn restore<S>(&mut self, store: &S) -> Result<bool, anyhow::Error>
    where
        S: SessionStore,
        S::Error: Into<anyhow::Error>,
    {
        if let Some(state) = store.load().map_err(Into::into)? {
            self.state = state;
            self.settle();
            log::info!("session restored on {}", self.state.page);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Write the current session to `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the snapshot.
    pub fn save<S: SessionStore>(&self, store: &S) -> Result<(), S::Error> {
        store.save(&self.state)
    }

    fn settle(&mut self) {
        Router::new(&self.config, &self.collaborators).settle(&mut self.state, &mut self.rng);
    }

    /// Run one render cycle, stamping any mood entry with the local time.
    pub fn dispatch(&mut self, action: PageAction) -> CycleOutcome {
        self.dispatch_at(action, chrono::Local::now().naive_local())
    }

    pub fn dispatch_at(&mut self, action: PageAction, now: NaiveDateTime) -> CycleOutcome {
        Router::new(&self.config, &self.collaborators).dispatch(
            &mut self.state,
            action,
            &mut self.rng,
            now,
        )
    }

    #[must_use]
    pub fn view(&self) -> PageView {
        render_view(&self.state, &self.config)
    }

    /// Re-seed challenge sampling; the session is left alone.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
    }

    pub fn reset(&mut self) {
        self.state.reset();
        log::info!("journey reset");
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &JourneyConfig {
        &self.config
    }

    #[must_use]
    pub const fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    /// Answers of the active challenge, for automated drivers.
    #[must_use]
    pub fn current_answers(&self) -> Vec<String> {
        self.state
            .challenge
            .as_ref()
            .map(|c| c.answers().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for JourneyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JourneyEngine")
            .field("state", &self.state)
            .field("collaborators", &self.collaborators)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStore {
        slot: Rc<RefCell<Option<String>>>,
    }

    impl SessionStore for MemoryStore {
        type Error = StorageError;

        fn save(&self, state: &SessionState) -> Result<(), Self::Error> {
            *self.slot.borrow_mut() = Some(serde_json::to_string(state)?);
            Ok(())
        }

        fn load(&self) -> Result<Option<SessionState>, Self::Error> {
            self.slot
                .borrow()
                .as_deref()
                .map(serde_json::from_str)
                .transpose()
                .map_err(StorageError::from)
        }

        fn clear(&self) -> Result<(), Self::Error> {
            self.slot.borrow_mut().take();
            Ok(())
        }
    }

    struct EmptyStore;

    impl SessionStore for EmptyStore {
        type Error = Infallible;

        fn save(&self, _state: &SessionState) -> Result<(), Self::Error> {
            Ok(())
        }

        fn load(&self) -> Result<Option<SessionState>, Self::Error> {
            Ok(None)
        }

        fn clear(&self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn engine_saves_and_restores_session() {
        let store = MemoryStore::default();
        let mut engine = JourneyEngine::offline(JourneyConfig::builtin(), 0xBEEF);
        engine.dispatch(PageAction::Home(HomeAction::Choose(GameKind::Car)));
        let answers = engine.current_answers();
        engine.dispatch(PageAction::Game(GameAction::Check(answers)));
        engine.save(&store).unwrap();

        let mut restored = JourneyEngine::offline(JourneyConfig::builtin(), 1);
        assert!(restored.restore(&store).unwrap());
        assert_eq!(restored.state().credits, 1);
        assert_eq!(restored.state().page, PageId::Car);
        assert!(restored.state().challenge.is_some());

        store.clear().unwrap();
        assert!(!restored.restore(&store).unwrap());
        assert!(!restored.restore(&EmptyStore).unwrap());
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let store = MemoryStore::default();
        *store.slot.borrow_mut() = Some("{ nope".into());
        let mut engine = JourneyEngine::offline(JourneyConfig::builtin(), 3);
        assert!(engine.restore(&store).is_err());
        assert_eq!(engine.state(), &SessionState::default());
    }

    #[test]
    fn same_seed_draws_same_challenge() {
        let mut a = JourneyEngine::offline(JourneyConfig::builtin(), 42);
        let mut b = JourneyEngine::offline(JourneyConfig::builtin(), 42);
        for engine in [&mut a, &mut b] {
            engine.dispatch(PageAction::Home(HomeAction::Choose(GameKind::Train)));
        }
        assert_eq!(a.current_answers(), b.current_answers());
    }

    #[test]
    fn with_state_repairs_locked_mansion() {
        let state = SessionState {
            page: PageId::Mansion,
            credits: 1,
            ..SessionState::default()
        };
        let engine = JourneyEngine::offline(JourneyConfig::builtin(), 9).with_state(state);
        assert_eq!(engine.state().page, PageId::Home);
        assert_eq!(engine.view().credits_needed, 2);
    }
}
