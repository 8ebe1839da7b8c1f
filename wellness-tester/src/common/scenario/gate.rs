use anyhow::{Context, Result, bail, ensure};
use std::time::Duration;
use thirtyfour::prelude::*;
use wellness_game::constants::{
    MANSION_CREDIT_THRESHOLD, NOTICE_CAR_CORRECT, NOTICE_CAR_WRONG, NOTICE_GATE_LOCKED,
    NOTICE_STORY_DONE,
};
use wellness_game::story::SVG_MIME;
use wellness_game::{
    GameAction, GameKind, HomeAction, JourneyEngine, MansionAction, PageAction, PageId,
};

use super::{LogicCtx, Scenario, ScenarioCtx};

const SETTLE: Duration = Duration::from_millis(200);

fn choose(engine: &mut JourneyEngine, kind: GameKind) -> Result<()> {
    engine.dispatch(PageAction::Home(HomeAction::Choose(kind)));
    ensure!(engine.state().page == kind.page(), "could not board the {kind}");
    Ok(())
}

/// The mansion stays shut below the credit threshold, however it is approached.
pub struct LockedMansionScenario;

#[async_trait::async_trait]
impl Scenario for LockedMansionScenario {
    fn key(&self) -> &'static str {
        "locked-mansion"
    }

    fn description(&self) -> &'static str {
        "Mansion Gate Stays Locked"
    }

    fn run_logic(&self, ctx: &LogicCtx<'_>) -> Result<()> {
        let mut engine = ctx.engine();
        let out = engine.dispatch(PageAction::Navigate(PageId::Mansion));
        ensure!(out.page_after == PageId::Home, "mansion opened with no credits");
        ensure!(out.has_notice(NOTICE_GATE_LOCKED), "no gate notice at home");

        choose(&mut engine, GameKind::Train)?;
        let mut guesses = engine.current_answers();
        ensure!(guesses.len() >= 3, "train challenge too small");
        guesses[0] = "definitely wrong".into();
        let out = engine.dispatch(PageAction::Game(GameAction::Check(guesses.clone())));
        let expected = u32::try_from(guesses.len() - 1)?;
        ensure!(
            engine.state().credits == expected,
            "expected {expected} credits, got {}",
            engine.state().credits
        );
        ensure!(out.report.is_some(), "check produced no report");

        if engine.state().credits < MANSION_CREDIT_THRESHOLD {
            let out = engine.dispatch(PageAction::Game(GameAction::ContinueToMansion));
            ensure!(out.page_after == PageId::Train, "locked gate let the traveler through");
            let notice = out
                .notices
                .iter()
                .find(|n| n.key == NOTICE_GATE_LOCKED)
                .context("no gate notice on continue")?;
            let needed = (MANSION_CREDIT_THRESHOLD - engine.state().credits).to_string();
            ensure!(
                notice.arg_value("needed") == Some(needed.as_str()),
                "gate notice should ask for {needed} more"
            );
        }
        Ok(())
    }

    fn has_browser(&self) -> bool {
        true
    }

    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        ctx.bridge.ensure_available().await?;
        ctx.bridge.reset().await?;
        ctx.bridge.goto("mansion").await?;
        tokio::time::sleep(SETTLE).await;

        let state = ctx.bridge.state().await?;
        ensure!(state.page != "mansion", "mansion opened with {} credits", state.credits);
        ensure!(
            driver
                .find_all(By::Css("[data-testid='mansion-screen']"))
                .await?
                .is_empty(),
            "mansion screen rendered while locked"
        );
        if ctx.verbose {
            println!("  🔒 Gate held at {} credits", state.credits);
        }
        Ok(())
    }
}

/// Three solved riddles open the gate; a missed one reveals its answer.
pub struct CarUnlockScenario;

#[async_trait::async_trait]
impl Scenario for CarUnlockScenario {
    fn key(&self) -> &'static str {
        "car-unlock"
    }

    fn description(&self) -> &'static str {
        "Car Riddles Unlock The Mansion"
    }

    fn run_logic(&self, ctx: &LogicCtx<'_>) -> Result<()> {
        let mut engine = ctx.engine();
        choose(&mut engine, GameKind::Car)?;

        let wrong = engine.current_answers();
        let out = engine.dispatch(PageAction::Game(GameAction::Check(vec!["xylophone".into()])));
        ensure!(out.has_notice(NOTICE_CAR_WRONG), "wrong riddle answer not flagged");
        let revealed = out.report.and_then(|r| r.revealed_answer);
        ensure!(
            revealed.as_deref() == wrong.first().map(String::as_str),
            "missed riddle should reveal {wrong:?}, got {revealed:?}"
        );
        ensure!(engine.state().credits == 0, "a wrong riddle earned credits");

        for solved in 1..=MANSION_CREDIT_THRESHOLD {
            let answers = engine.current_answers();
            let shouted = answers.iter().map(|a| format!("  {}  ", a.to_uppercase())).collect();
            let out = engine.dispatch(PageAction::Game(GameAction::Check(shouted)));
            ensure!(out.has_notice(NOTICE_CAR_CORRECT), "riddle {solved} not accepted");
            ensure!(
                engine.state().credits == solved,
                "expected {solved} credits, got {}",
                engine.state().credits
            );
        }
        ensure!(engine.state().mansion_unlocked(), "three riddles did not open the gate");

        let out = engine.dispatch(PageAction::Game(GameAction::ContinueToMansion));
        ensure!(out.page_after == PageId::Mansion, "unlocked gate did not open");
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
        ctx.bridge.reset().await?;

        driver
            .find(By::Css("[data-testid='choose-car']"))
            .await?
            .click()
            .await?;

        for solved in 1..=MANSION_CREDIT_THRESHOLD {
            let answers = ctx.bridge.answers().await?;
            let Some(answer) = answers.first() else {
                bail!("car page has no riddle");
            };
            let field = driver.find(By::Id("guess-car-0")).await?;
            field.clear().await?;
            field.send_keys(answer).await?;
            driver
                .find(By::Css("[data-testid='check']"))
                .await?
                .click()
                .await?;
            tokio::time::sleep(SETTLE).await;

            let state = ctx.bridge.state().await?;
            ensure!(
                state.credits == solved,
                "expected {solved} credits after riddle, got {}",
                state.credits
            );
            if ctx.verbose {
                println!("  🚗 Riddle {solved} solved");
            }
        }

        driver
            .find(By::Css("[data-testid='continue']"))
            .await?
            .click()
            .await?;
        driver
            .find(By::Css("[data-testid='mansion-screen']"))
            .await
            .context("mansion did not open after three credits")?;
        Ok(())
    }
}

/// Train, reflection, chat, mansion, story and restart in one pass.
pub struct FullJourneyScenario;

#[async_trait::async_trait]
impl Scenario for FullJourneyScenario {
    fn key(&self) -> &'static str {
        "full-journey"
    }

    fn description(&self) -> &'static str {
        "Full Journey To The Mansion"
    }

    fn run_logic(&self, ctx: &LogicCtx<'_>) -> Result<()> {
        let mut engine = ctx.engine();
        choose(&mut engine, GameKind::Train)?;
        while !engine.state().mansion_unlocked() {
            let before = engine.state().credits;
            let answers = engine.current_answers();
            engine.dispatch(PageAction::Game(GameAction::Check(answers)));
            ensure!(engine.state().credits > before, "a perfect hunt earned nothing");
        }

        let reflection = "I feel good about the ride today";
        engine.dispatch(PageAction::Game(GameAction::TypeReflection(reflection.into())));
        let out = engine.dispatch(PageAction::Game(GameAction::SendChat));
        let chat = out.chat.context("reflection was not sent")?;
        ensure!(!chat.crisis, "ordinary reflection flagged as crisis");
        ensure!(!chat.reply.is_empty(), "companion gave an empty reply");
        ensure!(engine.state().mood_log.len() == 1, "mood was not logged");
        ensure!(engine.state().chat_history.len() == 2, "chat transcript incomplete");

        let out = engine.dispatch(PageAction::Game(GameAction::ContinueToMansion));
        ensure!(out.page_after == PageId::Mansion, "mansion did not open");

        let out = engine.dispatch(PageAction::Mansion(MansionAction::GenerateStory));
        ensure!(out.has_notice(NOTICE_STORY_DONE), "story notice missing");
        let story = out.story.context("no story rendered")?;
        ensure!(story.mime == SVG_MIME, "story rendered as {}", story.mime);
        ensure!(!story.bytes.is_empty(), "story image is empty");

        let out = engine.dispatch(PageAction::Mansion(MansionAction::Restart));
        ensure!(out.page_after == PageId::Home, "restart did not return home");
        ensure!(engine.state().credits == 0, "restart kept credits");
        ensure!(!engine.state().has_reflection(), "restart kept the reflection");
        Ok(())
    }
}
