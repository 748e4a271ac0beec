//! Failure artifacts and small argument helpers.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use credible_fx::FxSnapshot;
use thirtyfour::prelude::*;

use crate::browser::{BrowserKind, FxBridge};

/// `<base>/<browser>/<scenario>/<UTC timestamp>` for one failed run.
pub fn artifacts_dir(base: &Path, browser: BrowserKind, scenario: &str) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    base.join(browser.label()).join(scenario).join(stamp)
}

/// What a browser looked like when a scenario failed.
#[derive(Debug, Default)]
pub struct FailureArtifacts {
    pub screenshot: Option<Vec<u8>>,
    pub dom: Option<String>,
    /// Bridge state; absent when the page never exposed the bridge.
    pub state: Option<FxSnapshot>,
    pub error_chain: String,
}

impl FailureArtifacts {
    /// Capture best-effort evidence. Capture failures leave the piece empty.
    pub async fn collect(driver: &WebDriver, bridge: &FxBridge<'_>, err: &anyhow::Error) -> Self {
        Self {
            screenshot: driver.screenshot_as_png().await.ok(),
            dom: driver.source().await.ok(),
            state: bridge.state().await.ok(),
            error_chain: format!("{err:#}"),
        }
    }

    /// Write every captured piece into `dir` and return the files created.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
        let mut written = Vec::new();
        let mut put = |name: &str, bytes: &[u8]| -> Result<()> {
            let path = dir.join(name);
            fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
            written.push(path);
            Ok(())
        };

        if let Some(png) = &self.screenshot {
            put("screenshot.png", png)?;
        }
        if let Some(dom) = &self.dom {
            put("dom.html", dom.as_bytes())?;
        }
        if let Some(state) = &self.state {
            put("state.json", &serde_json::to_vec_pretty(state)?)?;
        }
        put("error.txt", self.summary().as_bytes())?;
        Ok(written)
    }

    /// Error chain followed by the headline numbers of the bridge state.
    pub fn summary(&self) -> String {
        let Some(state) = &self.state else {
            return format!("{}\nbridge: unavailable\n", self.error_chain);
        };
        format!(
            "{}\ntheme: {} (stored {})\nentrances pending: {}\ncounters: {} running, {} finished\npulses: {}\n",
            self.error_chain,
            state.theme.as_deref().unwrap_or("-"),
            state.stored_theme.as_deref().unwrap_or("-"),
            state.entrances_pending,
            state.counters_running,
            state.counters_finished,
            state.pulses_active,
        )
    }
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}
