//! Evidence kept from browser runs: one directory per browser, scenario and seed.
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thirtyfour::prelude::*;

use crate::browser::{BridgeState, TestBridge};

/// Identifies one browser run of one scenario.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RunLabel {
    pub browser: String,
    pub scenario: String,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "verdict", content = "error", rename_all = "lowercase")]
pub enum Verdict {
    Passed,
    Failed(String),
}

/// Written as `run.json`; `session` is what the in-page bridge reported.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    #[serde(flatten)]
    pub label: RunLabel,
    #[serde(flatten)]
    pub verdict: Verdict,
    pub captured_at: DateTime<Utc>,
    pub url: Option<String>,
    pub session: Option<BridgeState>,
}

impl RunLabel {
    /// `<base>/<browser>/<scenario>/seed-<n>/<timestamp>`.
    pub fn dir_under(&self, base: &Path, at: DateTime<Utc>) -> PathBuf {
        base.join(&self.browser)
            .join(&self.scenario)
            .join(format!("seed-{}", self.seed))
            .join(at.format("%Y%m%dT%H%M%S").to_string())
    }
}

/// Capture the page and the session behind it, returning the directory written.
pub async fn capture_run(
    driver: &WebDriver,
    base: &Path,
    label: RunLabel,
    verdict: Verdict,
) -> Result<PathBuf> {
    let captured_at = Utc::now();
    let bridge = TestBridge::new(driver);
    let session = match bridge.state().await {
        Ok(state) => Some(state),
        Err(err) => {
            log::debug!("no bridge state for {}: {err:#}", label.scenario);
            None
        }
    };
    let url = driver.current_url().await.ok().map(|u| u.to_string());
    let screenshot = driver.screenshot_as_png().await.ok();
    let page = driver.source().await.ok();

    let dir = label.dir_under(base, captured_at);
    let record = RunRecord {
        label,
        verdict,
        captured_at,
        url,
        session,
    };
    write_run(&dir, &record, screenshot.as_deref(), page.as_deref())?;
    Ok(dir)
}

fn write_run(
    dir: &Path,
    record: &RunRecord,
    screenshot: Option<&[u8]>,
    page: Option<&str>,
) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let json = serde_json::to_vec_pretty(record).context("encoding run record")?;
    fs::write(dir.join("run.json"), json).context("writing run.json")?;
    if let Some(png) = screenshot {
        fs::write(dir.join("screenshot.png"), png).context("writing screenshot")?;
    }
    if let Some(html) = page {
        fs::write(dir.join("page.html"), html).context("writing page source")?;
    }
    Ok(())
}
