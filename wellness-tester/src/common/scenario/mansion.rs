use anyhow::{Context, Result, bail, ensure};
use std::time::Duration;
use thirtyfour::prelude::*;
use wellness_game::constants::{NOTICE_GATE_LOCKED, NOTICE_NO_REFLECTION, NOTICE_STORY_FAILED};
use wellness_game::{
    GameAction, GameKind, HomeAction, MansionAction, PageAction, PageBody, PageId, SessionState,
};

use super::{LogicCtx, Scenario, ScenarioCtx};
use crate::logic::doubles::Outage;

/// A mansion visit with nothing reflected asks for a reflection instead of a story.
pub struct EmptyMansionScenario;

impl Scenario for EmptyMansionScenario {
    fn key(&self) -> &'static str {
        "empty-mansion"
    }

    fn description(&self) -> &'static str {
        "Story Needs A Reflection"
    }

    fn run_logic(&self, ctx: &LogicCtx<'_>) -> Result<()> {
        // A renderer call would surface as a failure notice.
        let collaborators = ctx.offline_collaborators().with_renderer(Outage);
        let unlocked = SessionState {
            page: PageId::Mansion,
            credits: 3,
            ..SessionState::default()
        };
        let mut engine = ctx.engine_with(collaborators).with_state(unlocked);
        ensure!(engine.state().page == PageId::Mansion, "unlocked mansion was closed");

        let PageBody::Mansion { reflection } = engine.view().body else {
            bail!("mansion rendered a non-mansion body");
        };
        ensure!(reflection.is_none(), "empty session shows a reflection");

        let out = engine.dispatch(PageAction::Mansion(MansionAction::GenerateStory));
        ensure!(
            out.has_notice(NOTICE_NO_REFLECTION),
            "expected a reflection prompt, got: {}",
            ctx.assets.messages.render_all(&out.notices)
        );
        ensure!(!out.has_notice(NOTICE_STORY_FAILED), "renderer ran without a reflection");
        ensure!(out.story.is_none(), "story produced from nothing");
        Ok(())
    }
}

/// Reset wipes credits, reflections, chat and moods, and relocks the gate.
pub struct ResetScenario;

#[async_trait::async_trait]
impl Scenario for ResetScenario {
    fn key(&self) -> &'static str {
        "reset"
    }

    fn description(&self) -> &'static str {
        "Reset Clears The Journey"
    }

    fn run_logic(&self, ctx: &LogicCtx<'_>) -> Result<()> {
        let mut engine = ctx.engine();
        engine.dispatch(PageAction::Home(HomeAction::Choose(GameKind::Bus)));
        engine.dispatch(PageAction::Game(GameAction::RevealHints));
        ensure!(engine.state().hints_revealed, "bus hints did not reveal");

        let answers = engine.current_answers();
        engine.dispatch(PageAction::Game(GameAction::Check(answers)));
        engine.dispatch(PageAction::Game(GameAction::TypeReflection(
            "Grateful for small things".into(),
        )));
        engine.dispatch(PageAction::Game(GameAction::SendChat));
        ensure!(engine.state().credits > 0, "bus hunt earned nothing");
        ensure!(!engine.state().mood_log.is_empty(), "mood was not logged");

        engine.reset();
        ensure!(
            engine.state() == &SessionState::default(),
            "reset left state behind: {:?}",
            engine.state()
        );

        let out = engine.dispatch(PageAction::Navigate(PageId::Mansion));
        ensure!(out.has_notice(NOTICE_GATE_LOCKED), "gate open after reset");
        Ok(())
    }

    fn has_browser(&self) -> bool {
        true
    }

    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        ctx.bridge.ensure_available().await?;
        let bridge_seed = i64::try_from(ctx.seed).context("seed exceeds browser bridge range")?;
        ctx.bridge.seed(bridge_seed).await?;

        ctx.bridge.goto("car").await?;
        let answers = ctx.bridge.answers().await?;
        let answer = answers.first().context("car page has no riddle")?;
        driver.find(By::Id("guess-car-0")).await?.send_keys(answer).await?;
        driver
            .find(By::Css("[data-testid='check']"))
            .await?
            .click()
            .await?;
        tokio::time::sleep(Duration::from_millis(200)).await;
        let before = ctx.bridge.state().await?;
        ensure!(before.credits > 0, "riddle earned nothing before reset");

        ctx.bridge.reset().await?;
        tokio::time::sleep(Duration::from_millis(200)).await;
        let after = ctx.bridge.state().await?;
        if ctx.verbose {
            println!("  🔄 {before:?} -> {after:?}");
        }
        ensure!(after.page == "home", "reset left the traveler on {}", after.page);
        ensure!(
            after.credits == 0 && after.chat_lines == 0 && after.moods == 0,
            "reset kept progress: {after:?}"
        );
        ensure!(after.reflection.is_empty(), "reset kept the reflection");
        Ok(())
    }
}
