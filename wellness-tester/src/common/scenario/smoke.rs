use anyhow::{Context, Result, ensure};
use std::time::Duration;
use thirtyfour::prelude::*;
use wellness_game::{GameAction, GameKind, HomeAction, PageAction, PageBody, PageId};

use super::{LogicCtx, Scenario, ScenarioCtx};

pub struct SmokeScenario;

#[async_trait::async_trait]
impl Scenario for SmokeScenario {
    fn key(&self) -> &'static str {
        "smoke"
    }

    fn description(&self) -> &'static str {
        "Smoke Test"
    }

    fn run_logic(&self, ctx: &LogicCtx<'_>) -> Result<()> {
        let mut engine = ctx.engine();
        let view = engine.view();
        ensure!(view.page == PageId::Home, "journey should start at home");
        ensure!(view.credits == 0, "journey should start with no credits");
        ensure!(!view.mansion_unlocked, "mansion should start locked");
        let PageBody::Home { games } = view.body else {
            anyhow::bail!("home page rendered a {:?} body", view.page);
        };
        ensure!(games == GameKind::ALL, "home should offer every vehicle");

        for kind in GameKind::ALL {
            engine.dispatch(PageAction::Home(HomeAction::Choose(kind)));
            ensure!(engine.state().page == kind.page(), "{kind} page did not open");
            let answers = engine.current_answers();
            ensure!(!answers.is_empty(), "{kind} has no challenge");
            let PageBody::Game { prompt_count, .. } = engine.view().body else {
                anyhow::bail!("{kind} page rendered a non-game body");
            };
            ensure!(
                prompt_count == answers.len(),
                "{kind} shows {prompt_count} prompts for {} answers",
                answers.len()
            );
            engine.dispatch(PageAction::Game(GameAction::ChangeVehicle));
            ensure!(engine.state().page == PageId::Home, "change vehicle should return home");
        }
        Ok(())
    }

    fn has_browser(&self) -> bool {
        true
    }

    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        driver
            .find(By::Css("[data-testid='home-screen']"))
            .await
            .context("home screen did not render")?;

        ctx.bridge.ensure_available().await?;
        let bridge_seed = i64::try_from(ctx.seed).context("seed exceeds browser bridge range")?;
        ctx.bridge.seed(bridge_seed).await?;
        ctx.bridge.reset().await?;

        if ctx.verbose {
            println!("  🌐 Browser loaded, bridge connected, seed: {}", ctx.seed);
        }

        driver
            .find(By::Css("[data-testid='choose-train']"))
            .await?
            .click()
            .await?;
        driver
            .find(By::Css("[data-testid='train-screen']"))
            .await
            .context("train screen did not open")?;
        tokio::time::sleep(Duration::from_millis(200)).await;

        let state = ctx.bridge.state().await?;
        if ctx.verbose {
            println!("  📊 Final state: {state:?}");
        }
        ensure!(state.page == "train", "expected train page, got {}", state.page);
        ensure!(state.credits == 0, "credits should still be 0, got {}", state.credits);
        Ok(())
    }
}
