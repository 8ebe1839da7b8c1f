use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use thirtyfour::prelude::*;

/// Global installed by the web app when loaded with `?test=1`.
pub const BRIDGE_GLOBAL: &str = "__wellnessTest";

/// Session snapshot reported by the in-page bridge.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BridgeState {
    pub page: String,
    pub credits: u32,
    pub mansion_unlocked: bool,
    #[serde(default)]
    pub reflection: String,
    #[serde(default)]
    pub chat_lines: usize,
    #[serde(default)]
    pub moods: usize,
    #[serde(default)]
    pub hints_revealed: bool,
}

#[derive(Debug, Clone)]
pub struct TestBridge<'a> {
    driver: &'a WebDriver,
}

impl<'a> TestBridge<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let result = self
            .driver
            .execute(&format!("return !!window.{BRIDGE_GLOBAL}"), vec![])
            .await?;
        if !result.json().as_bool().unwrap_or(false) {
            bail!("{BRIDGE_GLOBAL} is not available. Did you pass ?test=1?");
        }
        Ok(())
    }

    pub async fn seed(&self, n: i64) -> Result<()> {
        self.driver
            .execute(
                &format!("window.{BRIDGE_GLOBAL}.seed(arguments[0])"),
                vec![n.into()],
            )
            .await?;
        Ok(())
    }

    pub async fn reset(&self) -> Result<()> {
        self.driver
            .execute(&format!("window.{BRIDGE_GLOBAL}.reset()"), vec![])
            .await?;
        Ok(())
    }

    pub async fn goto(&self, page: &str) -> Result<()> {
        self.driver
            .execute(
                &format!("window.{BRIDGE_GLOBAL}.goto(arguments[0])"),
                vec![page.into()],
            )
            .await?;
        Ok(())
    }

    /// Answers of the challenge currently on screen.
    pub async fn answers(&self) -> Result<Vec<String>> {
        let result = self
            .driver
            .execute(&format!("return window.{BRIDGE_GLOBAL}.answers()"), vec![])
            .await?;
        serde_json::from_value(result.json().clone()).context("parsing challenge answers")
    }

    pub async fn state(&self) -> Result<BridgeState> {
        let result = self
            .driver
            .execute(&format!("return window.{BRIDGE_GLOBAL}.state()"), vec![])
            .await?;
        serde_json::from_value(result.json().clone()).context("parsing bridge state")
    }
}
