use anyhow::{Context, Result, ensure};
use credible_fx::selectors::{HERO_BAR, IN_PAGE_ANCHOR, NAV_LINK, PARALLAX_SECTION, TIMELINE_ITEM};
use credible_fx::{FxConfig, nav, on_anchor_click, parallax};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thirtyfour::prelude::*;

use crate::browser::{FxBridge, wait_for};
use crate::logic::checks::{self, Check};

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub bridge: FxBridge<'a>,
    pub verbose: bool,
}

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub check: Check,
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

/// What a scenario does once the page is loaded in a browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BrowserFlow {
    Smoke,
    ThemeToggle,
    Entrances,
    Counters,
    Navigation,
    Anchors,
    Stagger,
    Pulse,
    Parallax,
}

#[derive(Debug, Clone)]
pub struct FxScenario {
    name: &'static str,
    check: Check,
    flow: BrowserFlow,
}

impl FxScenario {
    const fn new(name: &'static str, check: Check, flow: BrowserFlow) -> Self {
        Self { name, check, flow }
    }
}

#[async_trait::async_trait]
impl BrowserScenario for FxScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        ctx.bridge.ensure_available().await?;
        match self.flow {
            BrowserFlow::Smoke => smoke(ctx).await,
            BrowserFlow::ThemeToggle => theme_toggle(driver, ctx).await,
            BrowserFlow::Entrances => entrances(ctx).await,
            BrowserFlow::Counters => counters(ctx).await,
            BrowserFlow::Navigation => navigation(ctx).await,
            BrowserFlow::Anchors => anchors(ctx).await,
            BrowserFlow::Stagger => stagger(ctx).await,
            BrowserFlow::Pulse => pulse(ctx).await,
            BrowserFlow::Parallax => parallax_scroll(ctx).await,
        }
    }
}

impl CombinedScenario for FxScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario {
            name: self.name.to_string(),
            check: self.check,
        })
    }
}

async fn smoke(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let state = ctx.bridge.state().await?;
    let root = ctx.bridge.root_theme().await?;
    ensure!(state.theme.is_some(), "theme controller not initialized");
    ensure!(
        root == state.theme,
        "root data-theme {root:?} disagrees with controller {:?}",
        state.theme
    );
    if ctx.verbose {
        println!("   state: {state:?}");
    }
    Ok(())
}

async fn theme_toggle(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    let before = ctx.bridge.root_theme().await?;
    driver.find(By::Id("themeToggle")).await?.click().await?;
    let after = ctx.bridge.root_theme().await?;
    ensure!(before != after, "theme did not change on toggle");
    let state = ctx.bridge.state().await?;
    ensure!(
        state.stored_theme == after,
        "stored {:?} but applied {after:?}",
        state.stored_theme
    );
    driver.refresh().await?;
    ctx.bridge.ensure_available().await?;
    ensure!(
        ctx.bridge.root_theme().await? == after,
        "theme not restored after reload"
    );
    Ok(())
}

async fn entrances(ctx: &ScenarioCtx<'_>) -> Result<()> {
    ctx.bridge.scroll_to_bottom().await?;
    wait_for(&ctx.bridge, Duration::from_secs(5), |s| s.entrances_pending == 0).await?;
    Ok(())
}

async fn counters(ctx: &ScenarioCtx<'_>) -> Result<()> {
    ctx.bridge.scroll_to_bottom().await?;
    let state = wait_for(&ctx.bridge, Duration::from_secs(8), |s| {
        s.counters_running == 0 && s.counters_finished > 0
    })
    .await?;
    if ctx.verbose {
        println!("   {} counter(s) finished", state.counters_finished);
    }
    Ok(())
}

/// Link attributes as the page reports them.
#[derive(Debug, Clone, Deserialize)]
struct NavLink {
    href: Option<String>,
    color: String,
}

#[derive(Debug, Clone, Deserialize)]
struct NavPage {
    path: String,
    links: Vec<NavLink>,
}

impl NavPage {
    /// Highlighted links must be exactly the ones whose href is the current path.
    fn check_highlights(&self) -> Result<()> {
        let expected = nav::active_indices(self.links.iter().map(|l| l.href.as_deref()), &self.path);
        let highlighted: Vec<usize> = self
            .links
            .iter()
            .enumerate()
            .filter(|(_, link)| !link.color.is_empty())
            .map(|(idx, _)| idx)
            .collect();
        ensure!(
            highlighted == expected,
            "links {highlighted:?} highlighted on {}, expected {expected:?}",
            self.path
        );
        Ok(())
    }
}

async fn navigation(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let page = ctx
        .bridge
        .eval(
            "return { path: location.pathname, links: Array.from(document.querySelectorAll(arguments[0])).map(a => ({ href: a.getAttribute('href'), color: a.style.color })) };",
            vec![json!(NAV_LINK)],
        )
        .await?;
    let page: NavPage = serde_json::from_value(page).context("reading nav links")?;
    page.check_highlights()
}

async fn anchors(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let hrefs = ctx
        .bridge
        .eval(
            "return Array.from(document.querySelectorAll(arguments[0])).map(a => a.getAttribute('href'));",
            vec![json!(IN_PAGE_ANCHOR)],
        )
        .await?;
    let hrefs: Vec<String> = serde_json::from_value(hrefs).context("reading anchors")?;
    let before = ctx.bridge.eval("return location.hash;", vec![]).await?;
    for (idx, href) in hrefs.iter().enumerate() {
        ensure!(
            on_anchor_click(href).prevent_default,
            "{href} would not be intercepted"
        );
        let after = ctx
            .bridge
            .eval(
                "document.querySelectorAll(arguments[0])[arguments[1]].click(); return location.hash;",
                vec![json!(IN_PAGE_ANCHOR), json!(idx)],
            )
            .await?;
        ensure!(after == before, "clicking {href} navigated to {after}");
    }
    if ctx.verbose {
        println!("   {} anchor(s) intercepted", hrefs.len());
    }
    Ok(())
}

async fn count(ctx: &ScenarioCtx<'_>, selector: &str) -> Result<u64> {
    let n = ctx
        .bridge
        .eval(
            "return document.querySelectorAll(arguments[0]).length;",
            vec![json!(selector)],
        )
        .await?;
    n.as_u64().context("element count was not a number")
}

async fn stagger(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let cfg = FxConfig::load_from_static();
    let items = count(ctx, TIMELINE_ITEM).await?;
    let budget = Duration::from_millis(u64::from(cfg.stagger.step_ms) * items + 2_000);
    ctx.bridge
        .wait_until(
            "return Array.from(document.querySelectorAll(arguments[0])).every(el => el.style.opacity === '1');",
            vec![json!(TIMELINE_ITEM)],
            budget,
        )
        .await
        .context("timeline items did not all become visible")
}

async fn pulse(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let cfg = FxConfig::load_from_static();
    let bars = count(ctx, HERO_BAR).await?;
    let state = ctx.bridge.state().await?;
    ensure!(
        state.pulses_active as u64 == bars,
        "{} pulse(s) running for {bars} bar(s)",
        state.pulses_active
    );
    if bars == 0 {
        return Ok(());
    }
    let budget = Duration::from_millis(
        u64::from(cfg.pulse.base_interval_ms) + u64::from(cfg.pulse.step_ms) * bars + 1_000,
    );
    ctx.bridge
        .wait_until(
            "return Array.from(document.querySelectorAll(arguments[0])).some(el => el.style.opacity === arguments[1]);",
            vec![json!(HERO_BAR), json!(cfg.pulse.dim_opacity.to_string())],
            budget,
        )
        .await
        .context("no bar dimmed within one pulse period")
}

async fn parallax_scroll(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let present = ctx
        .bridge
        .eval(
            "return !!document.querySelector(arguments[0]);",
            vec![json!(PARALLAX_SECTION)],
        )
        .await?;
    if present.as_bool() != Some(true) {
        return Ok(());
    }
    let cfg = FxConfig::load_from_static();
    let scroll_y = ctx.bridge.scroll_to(500.0).await?;
    let expected = parallax::transform(scroll_y, &cfg.parallax);
    ctx.bridge
        .wait_until(
            "return document.querySelector(arguments[0]).style.transform === arguments[1];",
            vec![json!(PARALLAX_SECTION), json!(expected)],
            Duration::from_secs(2),
        )
        .await
        .with_context(|| format!("section never reached {expected}"))
}

const SCENARIOS: &[(&str, &str)] = &[
    ("smoke", "Smoke Test"),
    ("theme", "Theme Toggle and Persistence"),
    ("navigation", "Active Navigation Link"),
    ("anchors", "In-Page Anchor Scrolling"),
    ("entrance", "One-Shot Card Entrance"),
    ("stagger", "Timeline Stagger Cascade"),
    ("counter", "Stat Counter Animation"),
    ("pulse", "Hero Bar Pulse"),
    ("parallax", "Inspiration Parallax"),
];

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    let scenario = scenario_for(name)?;
    Some(Box::new(scenario))
}

fn scenario_for(name: &str) -> Option<FxScenario> {
    let key = name.to_lowercase();
    let title = SCENARIOS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, title)| *title)?;
    let scenario = match key.as_str() {
        "smoke" => FxScenario::new(title, checks::theme_round_trip, BrowserFlow::Smoke),
        "theme" => FxScenario::new(title, checks::theme_round_trip, BrowserFlow::ThemeToggle),
        "navigation" => FxScenario::new(title, checks::nav_exact_match, BrowserFlow::Navigation),
        "anchors" => FxScenario::new(title, checks::anchor_targets, BrowserFlow::Anchors),
        "entrance" => FxScenario::new(title, checks::entrance_plays_once, BrowserFlow::Entrances),
        "stagger" => FxScenario::new(title, checks::stagger_cascade, BrowserFlow::Stagger),
        "counter" => FxScenario::new(title, checks::counter_monotonic, BrowserFlow::Counters),
        "pulse" => FxScenario::new(title, checks::pulse_schedule, BrowserFlow::Pulse),
        "parallax" => FxScenario::new(title, checks::parallax_rate, BrowserFlow::Parallax),
        _ => return None,
    };
    Some(scenario)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.to_vec()
}

pub fn all_scenario_keys() -> Vec<String> {
    SCENARIOS.iter().map(|(key, _)| (*key).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves_with_logic() {
        for (key, title) in list_scenarios() {
            let scenario = get_scenario(key).unwrap_or_else(|| panic!("{key} missing"));
            let logic = scenario.as_logic_scenario().expect("logic scenario");
            assert_eq!(logic.name, title);
        }
    }

    fn nav_page(path: &str, links: &[(Option<&str>, &str)]) -> NavPage {
        NavPage {
            path: path.to_string(),
            links: links
                .iter()
                .map(|(href, color)| NavLink {
                    href: href.map(str::to_string),
                    color: (*color).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn nav_check_accepts_only_exact_highlights() {
        let ok = nav_page(
            "/notes/",
            &[(Some("/"), ""), (Some("/notes/"), "var(--accent-primary)"), (None, "")],
        );
        assert!(ok.check_highlights().is_ok());

        let prefix = nav_page("/notes/", &[(Some("/"), "red"), (Some("/notes/"), "red")]);
        assert!(prefix.check_highlights().is_err());

        let missing = nav_page("/notes/", &[(Some("/notes/"), "")]);
        assert!(missing.check_highlights().is_err());
    }

    #[test]
    fn nav_page_reads_null_hrefs() {
        let page: NavPage = serde_json::from_value(json!({
            "path": "/",
            "links": [{ "href": null, "color": "" }, { "href": "/", "color": "blue" }]
        }))
        .expect("nav page");
        assert!(page.links[0].href.is_none());
        assert!(page.check_highlights().is_ok());
    }

    #[test]
    fn every_scenario_maps_to_its_own_flow() {
        let flow_of = |key: &str| scenario_for(key).map(|s| s.flow);
        let flows: Vec<BrowserFlow> = all_scenario_keys()
            .iter()
            .map(|key| flow_of(key).unwrap_or_else(|| panic!("{key} missing")))
            .collect();
        assert_eq!(flows.len(), 9);
        for (idx, flow) in flows.iter().enumerate() {
            assert!(!flows[idx + 1..].contains(flow), "{flow:?} shared");
        }
        assert_eq!(flow_of("smoke"), Some(BrowserFlow::Smoke));
        assert_eq!(flow_of("anchors"), Some(BrowserFlow::Anchors));
        assert_eq!(flow_of("parallax"), Some(BrowserFlow::Parallax));
    }

    #[test]
    fn lookup_is_case_insensitive_and_rejects_unknowns() {
        assert!(get_scenario("THEME").is_some());
        assert!(get_scenario("wagon").is_none());
    }
}
