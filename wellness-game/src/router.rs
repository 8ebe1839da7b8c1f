//! Page router: one action in, one render cycle out.
//!
//! Every action is handled by the page the session is currently on. An action
//! meant for another page is ignored with a notice, so no handler ever runs
//! for a page that is not on screen.
use chrono::NaiveDateTime;
use rand::Rng;
use serde::Serialize;

use crate::catalog::JourneyConfig;
use crate::chat::{ChatOutcome, send_reflection};
use crate::collaborators::Collaborators;
use crate::constants::{
    MIN_CHAT_INPUT_CHARS, MOOD_TRACKER_WINDOW, NOTICE_CAR_CORRECT, NOTICE_CAR_WRONG,
    NOTICE_CHAT_TOO_SHORT, NOTICE_CREDITS, NOTICE_GAME_FOUND, NOTICE_GATE_LOCKED, NOTICE_IGNORED,
    NOTICE_NO_CHALLENGE, NOTICE_NO_REFLECTION, NOTICE_RESTARTED, NOTICE_STORY_DONE,
    NOTICE_STORY_FAILED, NOTICE_TRANSCRIBE_EMPTY, NOTICE_TRANSCRIBED,
};
use crate::games::{
    GameKind, GameReport, check_answers, hints_visible, reveal_hints, start_new_challenge,
};
use crate::reflection::{ReflectionSource, accept_recording, merge_reflection};
use crate::state::{ChatLine, MoodEntry, PageId, SessionState};
use crate::story::{RenderedNarrative, StoryError, render_story};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeAction {
    Choose(GameKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameAction {
    /// One guess per prompt, in prompt order.
    Check(Vec<String>),
    RevealHints,
    TypeReflection(String),
    RecordReflection(Vec<u8>),
    SendChat,
    ContinueToMansion,
    ChangeVehicle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MansionAction {
    GenerateStory,
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    Home(HomeAction),
    Game(GameAction),
    Mansion(MansionAction),
    /// Direct navigation, e.g. from the address bar. Still gate-checked.
    Navigate(PageId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A user-visible message, carried as a translation key plus arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub key: &'static str,
    pub args: Vec<(&'static str, String)>,
    pub level: NoticeLevel,
}

impl Notice {
    #[must_use]
    pub const fn new(key: &'static str, level: NoticeLevel) -> Self {
        Self {
            key,
            args: Vec::new(),
            level,
        }
    }

    #[must_use]
    pub fn arg(mut self, name: &'static str, value: impl ToString) -> Self {
        self.args.push((name, value.to_string()));
        self
    }

    #[must_use]
    pub fn arg_value(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Everything one render cycle produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    pub page_before: PageId,
    pub page_after: PageId,
    pub notices: Vec<Notice>,
    pub report: Option<GameReport>,
    pub chat: Option<ChatOutcome>,
    pub story: Option<RenderedNarrative>,
}

impl CycleOutcome {
    const fn on(page: PageId) -> Self {
        Self {
            page_before: page,
            page_after: page,
            notices: Vec::new(),
            report: None,
            chat: None,
            story: None,
        }
    }

    #[must_use]
    pub fn has_notice(&self, key: &str) -> bool {
        self.notices.iter().any(|n| n.key == key)
    }
}

/// Dispatches actions against the session using the configured collaborators.
#[derive(Debug, Clone, Copy)]
pub struct Router<'a> {
    config: &'a JourneyConfig,
    collaborators: &'a Collaborators,
}

impl<'a> Router<'a> {
    #[must_use]
    pub const fn new(config: &'a JourneyConfig, collaborators: &'a Collaborators) -> Self {
        Self {
            config,
            collaborators,
        }
    }

    /// Run one render cycle for `action` on the current page.
    pub fn dispatch<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        action: PageAction,
        rng: &mut R,
        now: NaiveDateTime,
    ) -> CycleOutcome {
        let mut out = CycleOutcome::on(state.page);
        log::debug!("dispatch {action:?} on {}", state.page);
        match (state.page, action) {
            (_, PageAction::Navigate(target)) => self.navigate(state, target, rng, &mut out),
            (PageId::Home, PageAction::Home(HomeAction::Choose(kind))) => {
                self.enter(state, kind.page(), rng);
            }
            (page, PageAction::Game(action)) if page.game().is_some() => {
                self.handle_game(state, action, rng, now, &mut out);
            }
            (PageId::Mansion, PageAction::Mansion(action)) => {
                self.handle_mansion(state, action, &mut out);
            }
            (page, action) => {
                log::debug!("{action:?} does not belong to {page}");
                out.notices
                    .push(Notice::new(NOTICE_IGNORED, NoticeLevel::Info).arg("page", page));
            }
        }
        out.page_after = state.page;
        out
    }

    /// Bring a restored session into a state the router can render: a locked
    /// mansion falls back to Home and a game page always has its challenge.
    pub fn settle<R: Rng + ?Sized>(&self, state: &mut SessionState, rng: &mut R) {
        if state.page == PageId::Mansion && !state.mansion_unlocked() {
            log::warn!("restored session on a locked mansion, returning home");
            self.enter(state, PageId::Home, rng);
            return;
        }
        match state.page.game() {
            Some(kind) => {
                let stale = state
                    .challenge
                    .as_ref()
                    .is_none_or(|c| c.kind != kind || c.is_empty());
                if stale {
                    let page = state.page;
                    self.enter(state, page, rng);
                }
            }
            None => state.challenge = None,
        }
    }

    fn enter<R: Rng + ?Sized>(&self, state: &mut SessionState, page: PageId, rng: &mut R) {
        state.page = page;
        state.hints_revealed = false;
        state.challenge = page
            .game()
            .map(|kind| start_new_challenge(kind, self.config, rng));
    }

    fn navigate<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        target: PageId,
        rng: &mut R,
        out: &mut CycleOutcome,
    ) {
        if target == state.page {
            return;
        }
        if target == PageId::Mansion && !state.mansion_unlocked() {
            out.notices.push(gate_notice(state));
            return;
        }
        self.enter(state, target, rng);
    }

    fn handle_game<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        action: GameAction,
        rng: &mut R,
        now: NaiveDateTime,
        out: &mut CycleOutcome,
    ) {
        let Some(kind) = state.page.game() else {
            return;
        };
        match action {
            GameAction::Check(guesses) => {
                match check_answers(state, kind, &guesses, self.config, rng) {
                    Ok(report) => {
                        out.notices.extend(report_notices(&report));
                        out.report = Some(report);
                    }
                    Err(err) => {
                        log::warn!("{err}");
                        out.notices.push(
                            Notice::new(NOTICE_NO_CHALLENGE, NoticeLevel::Warning).arg("game", kind),
                        );
                    }
                }
            }
            GameAction::RevealHints => reveal_hints(state),
            GameAction::TypeReflection(text) => {
                merge_reflection(state, &ReflectionSource::Typed(text));
            }
            GameAction::RecordReflection(audio) => {
                let transcriber = self.collaborators.transcriber.as_ref();
                if accept_recording(state, transcriber, &audio) {
                    out.notices
                        .push(Notice::new(NOTICE_TRANSCRIBED, NoticeLevel::Success));
                } else {
                    out.notices
                        .push(Notice::new(NOTICE_TRANSCRIBE_EMPTY, NoticeLevel::Warning));
                }
            }
            GameAction::SendChat => {
                match send_reflection(state, self.collaborators, self.config, now) {
                    Ok(chat) => out.chat = Some(chat),
                    Err(err) => {
                        log::debug!("chat rejected: {err}");
                        out.notices.push(
                            Notice::new(NOTICE_CHAT_TOO_SHORT, NoticeLevel::Warning)
                                .arg("min", MIN_CHAT_INPUT_CHARS),
                        );
                    }
                }
            }
            GameAction::ContinueToMansion => {
                if state.mansion_unlocked() {
                    self.enter(state, PageId::Mansion, rng);
                } else {
                    out.notices.push(gate_notice(state));
                }
            }
            GameAction::ChangeVehicle => self.enter(state, PageId::Home, rng),
        }
    }

    fn handle_mansion(
        &self,
        state: &mut SessionState,
        action: MansionAction,
        out: &mut CycleOutcome,
    ) {
        match action {
            MansionAction::GenerateStory => {
                let renderer = self.collaborators.renderer.as_ref();
                match render_story(state, renderer, self.config) {
                    Ok(story) => {
                        out.notices
                            .push(Notice::new(NOTICE_STORY_DONE, NoticeLevel::Success));
                        out.story = Some(story);
                    }
                    Err(StoryError::EmptyReflection) => out
                        .notices
                        .push(Notice::new(NOTICE_NO_REFLECTION, NoticeLevel::Warning)),
                    Err(StoryError::Render(err)) => {
                        log::error!("story rendering failed: {err}");
                        out.notices.push(
                            Notice::new(NOTICE_STORY_FAILED, NoticeLevel::Error).arg("reason", err),
                        );
                    }
                }
            }
            MansionAction::Restart => {
                state.reset();
                log::info!("journey restarted");
                out.notices
                    .push(Notice::new(NOTICE_RESTARTED, NoticeLevel::Info));
            }
        }
    }
}

fn gate_notice(state: &SessionState) -> Notice {
    Notice::new(NOTICE_GATE_LOCKED, NoticeLevel::Info)
        .arg("needed", state.credits_to_unlock())
        .arg("credits", state.credits)
}

fn report_notices(report: &GameReport) -> Vec<Notice> {
    let headline = match (report.kind, &report.revealed_answer) {
        (GameKind::Car, Some(answer)) => {
            Notice::new(NOTICE_CAR_WRONG, NoticeLevel::Error).arg("answer", answer)
        }
        (GameKind::Car, None) => Notice::new(NOTICE_CAR_CORRECT, NoticeLevel::Success),
        (GameKind::Train | GameKind::Bus, _) => {
            let level = if report.score == report.total {
                NoticeLevel::Success
            } else {
                NoticeLevel::Info
            };
            Notice::new(NOTICE_GAME_FOUND, level)
                .arg("score", report.score)
                .arg("total", report.total)
        }
    };
    vec![
        headline,
        Notice::new(NOTICE_CREDITS, NoticeLevel::Info).arg("credits", report.credits),
    ]
}

/// Read-only snapshot of what the current page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub page: PageId,
    pub credits: u32,
    pub mansion_unlocked: bool,
    pub credits_needed: u32,
    pub image: Option<String>,
    pub body: PageBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageBody {
    Home {
        games: Vec<GameKind>,
    },
    Game {
        game: GameKind,
        /// `None` while hints are hidden.
        hints: Option<Vec<String>>,
        prompt_count: usize,
        can_reveal_hints: bool,
        reflection: String,
        transcript: Vec<ChatLine>,
        moods: Vec<MoodEntry>,
    },
    Mansion {
        reflection: Option<String>,
    },
}

/// Describe the current page without changing anything.
#[must_use]
pub fn render_view(state: &SessionState, config: &JourneyConfig) -> PageView {
    let images = &config.images;
    let (image, body) = match (state.page, state.page.game()) {
        (_, Some(game)) => {
            let image = match game {
                GameKind::Train => images.train.clone(),
                GameKind::Car => images.car.clone(),
                GameKind::Bus => images.bus.clone(),
            };
            let challenge = state.challenge.as_ref().filter(|c| c.kind == game);
            let visible = hints_visible(state, config);
            (
                image,
                PageBody::Game {
                    game,
                    hints: challenge
                        .filter(|_| visible)
                        .map(|c| c.hints().map(str::to_string).collect()),
                    prompt_count: challenge.map_or(0, |c| c.len()),
                    can_reveal_hints: challenge.is_some() && !visible,
                    reflection: state.reflection_current.clone(),
                    transcript: state.chat_history.clone(),
                    moods: state.recent_moods(MOOD_TRACKER_WINDOW).cloned().collect(),
                },
            )
        }
        (PageId::Mansion, None) => (
            images.mansion.clone(),
            PageBody::Mansion {
                reflection: state
                    .has_reflection()
                    .then(|| state.reflection_original.clone()),
            },
        ),
        (_, None) => (
            images.home.clone(),
            PageBody::Home {
                games: GameKind::ALL.to_vec(),
            },
        ),
    };
    PageView {
        page: state.page,
        credits: state.credits,
        mansion_unlocked: state.mansion_unlocked(),
        credits_needed: state.credits_to_unlock(),
        image,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap()
    }

    struct Fixture {
        config: JourneyConfig,
        collaborators: Collaborators,
        rng: ChaCha20Rng,
        state: SessionState,
    }

    impl Fixture {
        fn new() -> Self {
            let config = JourneyConfig::builtin();
            let collaborators = Collaborators::offline(&config);
            Self {
                config,
                collaborators,
                rng: ChaCha20Rng::seed_from_u64(7),
                state: SessionState::default(),
            }
        }

        fn run(&mut self, action: PageAction) -> CycleOutcome {
            let router = Router::new(&self.config, &self.collaborators);
            router.dispatch(&mut self.state, action, &mut self.rng, now())
        }

        fn answers(&self) -> Vec<String> {
            self.state
                .challenge
                .as_ref()
                .map(|c| c.answers().map(str::to_string).collect())
                .unwrap_or_default()
        }
    }

    #[test]
    fn choosing_a_game_starts_its_challenge() {
        let mut fx = Fixture::new();
        let out = fx.run(PageAction::Home(HomeAction::Choose(GameKind::Bus)));
        assert_eq!(out.page_before, PageId::Home);
        assert_eq!(out.page_after, PageId::Bus);
        let challenge = fx.state.challenge.as_ref().unwrap();
        assert_eq!(challenge.kind, GameKind::Bus);
        assert_eq!(challenge.len(), 3);
    }

    #[test]
    fn actions_for_other_pages_are_ignored() {
        let mut fx = Fixture::new();
        let out = fx.run(PageAction::Mansion(MansionAction::Restart));
        assert!(out.has_notice(NOTICE_IGNORED));
        let out = fx.run(PageAction::Game(GameAction::Check(vec![])));
        assert!(out.has_notice(NOTICE_IGNORED));
        assert_eq!(fx.state, SessionState::default());
    }

    #[test]
    fn wrong_train_guesses_keep_mansion_locked() {
        let mut fx = Fixture::new();
        fx.run(PageAction::Home(HomeAction::Choose(GameKind::Train)));
        let out = fx.run(PageAction::Game(GameAction::Check(vec![
            "x".into(),
            "y".into(),
            "z".into(),
        ])));
        assert_eq!(out.report.as_ref().map(|r| r.score), Some(0));
        assert_eq!(fx.state.credits, 0);
        let out = fx.run(PageAction::Game(GameAction::ContinueToMansion));
        assert!(out.has_notice(NOTICE_GATE_LOCKED));
        assert_eq!(fx.state.page, PageId::Train);
    }

    #[test]
    fn car_unlocks_mansion_from_two_credits() {
        let mut fx = Fixture::new();
        fx.state.credits = 2;
        fx.run(PageAction::Home(HomeAction::Choose(GameKind::Car)));
        let answers = fx.answers();
        let out = fx.run(PageAction::Game(GameAction::Check(answers)));
        assert!(out.has_notice(NOTICE_CAR_CORRECT));
        assert_eq!(fx.state.credits, 3);
        let out = fx.run(PageAction::Game(GameAction::ContinueToMansion));
        assert_eq!(out.page_after, PageId::Mansion);
        assert!(fx.state.challenge.is_none());
    }

    #[test]
    fn missed_car_puzzle_reveals_answer() {
        let mut fx = Fixture::new();
        fx.run(PageAction::Home(HomeAction::Choose(GameKind::Car)));
        let expected = fx.answers()[0].clone();
        let out = fx.run(PageAction::Game(GameAction::Check(vec!["banana".into()])));
        let notice = out.notices.iter().find(|n| n.key == NOTICE_CAR_WRONG).unwrap();
        assert_eq!(notice.arg_value("answer"), Some(expected.as_str()));
    }

    #[test]
    fn navigating_to_locked_mansion_stays_put() {
        let mut fx = Fixture::new();
        let out = fx.run(PageAction::Navigate(PageId::Mansion));
        assert_eq!(out.page_after, PageId::Home);
        let notice = &out.notices[0];
        assert_eq!(notice.key, NOTICE_GATE_LOCKED);
        assert_eq!(notice.arg_value("needed"), Some("3"));
    }

    #[test]
    fn bus_hints_hidden_until_revealed() {
        let mut fx = Fixture::new();
        fx.run(PageAction::Home(HomeAction::Choose(GameKind::Bus)));
        let view = render_view(&fx.state, &fx.config);
        let PageBody::Game {
            hints,
            can_reveal_hints,
            ..
        } = view.body
        else {
            panic!("expected game page");
        };
        assert!(hints.is_none());
        assert!(can_reveal_hints);

        fx.run(PageAction::Game(GameAction::RevealHints));
        let PageBody::Game { hints, .. } = render_view(&fx.state, &fx.config).body else {
            panic!("expected game page");
        };
        assert_eq!(hints.map(|h| h.len()), Some(3));
    }

    #[test]
    fn short_chat_warns_and_keeps_history() {
        let mut fx = Fixture::new();
        fx.run(PageAction::Home(HomeAction::Choose(GameKind::Train)));
        fx.run(PageAction::Game(GameAction::TypeReflection("ok".into())));
        let out = fx.run(PageAction::Game(GameAction::SendChat));
        assert!(out.has_notice(NOTICE_CHAT_TOO_SHORT));
        assert!(fx.state.chat_history.is_empty());
        assert!(fx.state.mood_log.is_empty());
    }

    #[test]
    fn empty_mansion_warns_and_restart_goes_home() {
        let mut fx = Fixture::new();
        fx.state.credits = 3;
        fx.run(PageAction::Navigate(PageId::Mansion));
        let out = fx.run(PageAction::Mansion(MansionAction::GenerateStory));
        assert!(out.has_notice(NOTICE_NO_REFLECTION));
        assert!(out.story.is_none());

        let out = fx.run(PageAction::Mansion(MansionAction::Restart));
        assert_eq!(out.page_after, PageId::Home);
        assert_eq!(fx.state.credits, 0);
    }

    #[test]
    fn change_vehicle_keeps_credits() {
        let mut fx = Fixture::new();
        fx.state.credits = 2;
        fx.run(PageAction::Home(HomeAction::Choose(GameKind::Train)));
        let out = fx.run(PageAction::Game(GameAction::ChangeVehicle));
        assert_eq!(out.page_after, PageId::Home);
        assert_eq!(fx.state.credits, 2);
        assert!(fx.state.challenge.is_none());
    }

    #[test]
    fn settle_repairs_restored_sessions() {
        let mut fx = Fixture::new();
        fx.state.page = PageId::Mansion;
        let router = Router::new(&fx.config, &fx.collaborators);
        router.settle(&mut fx.state, &mut fx.rng);
        assert_eq!(fx.state.page, PageId::Home);

        fx.state.page = PageId::Car;
        router.settle(&mut fx.state, &mut fx.rng);
        assert_eq!(fx.state.challenge.as_ref().map(|c| c.kind), Some(GameKind::Car));
    }
}
