use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use credible_fx::FxSnapshot;
use serde_json::{Value, json};
use thirtyfour::prelude::*;

/// Client side of `window.__credibleFx`, exposed by pages opened with `?test=1`.
#[derive(Debug, Clone)]
pub struct FxBridge<'a> {
    driver: &'a WebDriver,
}

impl<'a> FxBridge<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let result = self
            .driver
            .execute("return !!window.__credibleFx", vec![])
            .await?;
        if !result.json().as_bool().unwrap_or(false) {
            bail!("__credibleFx is not available. Did you pass ?test=1?");
        }
        Ok(())
    }

    pub async fn state(&self) -> Result<FxSnapshot> {
        let result = self
            .driver
            .execute("return window.__credibleFx.state()", vec![])
            .await?;
        serde_json::from_value(result.json().clone()).context("parsing FxSnapshot")
    }

    pub async fn root_theme(&self) -> Result<Option<String>> {
        let result = self
            .driver
            .execute(
                "return document.documentElement.getAttribute('data-theme')",
                vec![],
            )
            .await?;
        Ok(result.json().as_str().map(str::to_string))
    }

    /// Run `script` in the page and return its JSON result.
    pub async fn eval(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        let result = self.driver.execute(script, args).await?;
        Ok(result.json().clone())
    }

    /// Poll `script` until it returns `true` or `timeout` elapses.
    pub async fn wait_until(&self, script: &str, args: Vec<Value>, timeout: Duration) -> Result<()> {
        let started = Instant::now();
        loop {
            if self.eval(script, args.clone()).await?.as_bool() == Some(true) {
                return Ok(());
            }
            if started.elapsed() >= timeout {
                bail!("timed out after {timeout:?} waiting for page condition");
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    pub async fn scroll_to(&self, y: f64) -> Result<f64> {
        let scrolled = self
            .eval(
                "window.scrollTo(0, arguments[0]); return window.scrollY;",
                vec![json!(y)],
            )
            .await?;
        scrolled.as_f64().context("scrollY was not a number")
    }

    pub async fn scroll_to_bottom(&self) -> Result<()> {
        self.driver
            .execute(
                "window.scrollTo(0, document.body.scrollHeight)",
                vec![],
            )
            .await?;
        Ok(())
    }
}

/// Poll the bridge until `done` holds or `timeout` elapses.
pub async fn wait_for<F>(bridge: &FxBridge<'_>, timeout: Duration, done: F) -> Result<FxSnapshot>
where
    F: Fn(&FxSnapshot) -> bool,
{
    let started = Instant::now();
    loop {
        let snapshot = bridge.state().await?;
        if done(&snapshot) {
            return Ok(snapshot);
        }
        if started.elapsed() >= timeout {
            bail!("timed out after {timeout:?}; last state {snapshot:?}");
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}
