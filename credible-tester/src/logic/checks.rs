//! Headless property checks run against [`SimPage`].
use anyhow::{Result, ensure};
use credible_fx::effect::prop;
use credible_fx::entrance::{self, EntrancePhase};
use credible_fx::{
    CounterAnimation, FxConfig, KeyValueStore, MemoryStore, SimPage, THEME_ATTRIBUTE,
    THEME_STORAGE_KEY, Theme, ThemeState, WatchSet, nav, on_anchor_click, parallax, pulse,
};

/// A named property check over the effect logic.
pub type Check = fn(&FxConfig) -> Result<()>;

const TOGGLE: &str = "#themeToggle";

fn boot(store: MemoryStore) -> (SimPage, ThemeState) {
    let mut page = SimPage::with_store(store);
    page.insert(TOGGLE);
    let state = ThemeState::load(page.store());
    page.apply(None, &state.on_ready());
    (page, state)
}

fn click_toggle(page: &mut SimPage, state: ThemeState, cfg: &FxConfig) -> ThemeState {
    let root = page.root_attribute(THEME_ATTRIBUTE).map(str::to_string);
    let (next, effects) = state.on_toggle(root.as_deref(), &cfg.theme);
    page.apply(Some(TOGGLE), &effects);
    next
}

pub fn theme_round_trip(cfg: &FxConfig) -> Result<()> {
    let (mut page, state) = boot(MemoryStore::default());
    ensure!(
        page.root_attribute(THEME_ATTRIBUTE) == Some("light"),
        "first visit should default to light"
    );
    let state = click_toggle(&mut page, state, cfg);
    let stored = page.store().get(THEME_STORAGE_KEY).unwrap_or_default();
    ensure!(
        stored.as_deref() == page.root_attribute(THEME_ATTRIBUTE),
        "persisted theme {stored:?} differs from applied theme"
    );

    let (reloaded, reloaded_state) = boot(page.store().clone());
    ensure!(
        reloaded_state.applied() == Theme::Dark
            && reloaded.root_attribute(THEME_ATTRIBUTE) == Some("dark"),
        "dark preference lost on reload"
    );

    click_toggle(&mut page, state, cfg);
    ensure!(
        page.root_attribute(THEME_ATTRIBUTE) == Some("light"),
        "double toggle should restore light"
    );
    page.advance(u64::from(cfg.theme.spin_ms));
    ensure!(
        page.style(TOGGLE, prop::TRANSFORM).is_none(),
        "toggle spin never reset"
    );
    Ok(())
}

pub fn nav_exact_match(_cfg: &FxConfig) -> Result<()> {
    let hrefs = [Some("/"), Some("/about"), None, Some("/about/")];
    ensure!(
        nav::active_indices(hrefs, "/about") == vec![1],
        "only the exact path should be active"
    );
    ensure!(
        nav::active_indices(hrefs, "/contact").is_empty(),
        "no link should match an unlisted path"
    );
    Ok(())
}

pub fn anchor_targets(_cfg: &FxConfig) -> Result<()> {
    let mut page = SimPage::new();
    page.insert("#features");
    for href in ["#features", "#missing", "#"] {
        let action = on_anchor_click(href);
        ensure!(action.prevent_default, "{href} should not navigate");
        if let Some(effect) = action.scroll_effect() {
            page.apply(None, &[effect]);
        }
    }
    ensure!(
        page.scrolled_to() == ["#features".to_string()],
        "scrolled to {:?}",
        page.scrolled_to()
    );
    Ok(())
}

pub fn entrance_plays_once(cfg: &FxConfig) -> Result<()> {
    let mut page = SimPage::new();
    let mut watch = WatchSet::new();
    let cards: Vec<_> = (0..3).map(|_| watch.register()).collect();
    for name in ["card-0", "card-1", "card-2"] {
        page.insert(name);
    }

    let mut played = 0;
    for _ in 0..4 {
        let effects = entrance::on_intersection(&mut watch, cards[1], true, &cfg.entrance);
        if !effects.is_empty() {
            played += 1;
            page.apply(Some("card-1"), &effects);
        }
    }
    ensure!(played == 1, "entrance played {played} times");
    ensure!(
        watch.phase(cards[1]) == EntrancePhase::Animated,
        "card left in {:?}",
        watch.phase(cards[1])
    );
    ensure!(watch.pending() == 2, "siblings should still be waiting");

    page.advance(u64::from(cfg.entrance.delay_ms));
    ensure!(
        page.style("card-1", prop::OPACITY) == Some("1"),
        "card never became visible"
    );
    ensure!(
        page.element("card-1").is_some_and(|el| !el.observed),
        "card still observed after its entrance"
    );
    Ok(())
}

pub fn stagger_cascade(cfg: &FxConfig) -> Result<()> {
    let mut page = SimPage::new();
    let names = ["item-0", "item-1", "item-2"];
    for (idx, name) in names.into_iter().enumerate() {
        page.insert(name);
        page.apply(Some(name), &entrance::stagger_effects(idx, &cfg.stagger));
    }
    for (idx, name) in names.into_iter().enumerate() {
        let due = u64::from(cfg.stagger.step_ms) * u64::try_from(idx).unwrap_or(u64::MAX);
        let wait = due.saturating_sub(page.now_ms());
        page.advance(wait);
        ensure!(
            page.style(name, prop::TRANSFORM) == Some("translateX(0)"),
            "{name} not revealed at {due}ms"
        );
        if let Some(next) = names.get(idx + 1) {
            ensure!(
                page.style(next, prop::OPACITY) == Some("0"),
                "{next} revealed early"
            );
        }
    }
    Ok(())
}

pub fn counter_monotonic(cfg: &FxConfig) -> Result<()> {
    for text in ["42", "150+", "98%"] {
        let mut anim = CounterAnimation::from_text(text, &cfg.counter);
        let mut last = i64::MIN;
        let mut clock = 0.0;
        let final_text = loop {
            let frame = anim.step(clock);
            let value: i64 = frame.text.parse()?;
            ensure!(value >= last, "{text}: counter went backwards at {clock}ms");
            last = value;
            if frame.done {
                break frame.text;
            }
            clock += 16.0;
        };
        let expected = text.trim_end_matches(['+', '%']);
        ensure!(
            final_text == expected,
            "{text}: ended at {final_text}, expected {expected}"
        );
    }
    Ok(())
}

pub fn pulse_schedule(cfg: &FxConfig) -> Result<()> {
    let mut page = SimPage::new();
    page.insert("bar-0");
    let ticks: Vec<u64> = pulse::tick_times(0, 10_000, &cfg.pulse).collect();
    ensure!(
        ticks.first() == Some(&u64::from(cfg.pulse.base_interval_ms)),
        "first pulse at {:?}",
        ticks.first()
    );
    page.advance(ticks[0]);
    page.apply(Some("bar-0"), &pulse::tick_effects(&cfg.pulse));
    ensure!(
        page.style("bar-0", prop::OPACITY) == Some(cfg.pulse.dim_opacity.to_string().as_str()),
        "bar not dimmed"
    );
    page.advance(u64::from(cfg.pulse.restore_delay_ms));
    ensure!(
        page.style("bar-0", prop::OPACITY) == Some("1"),
        "bar not restored"
    );
    ensure!(
        pulse::interval_ms(1, &cfg.pulse) > pulse::interval_ms(0, &cfg.pulse),
        "pulses are not staggered"
    );
    Ok(())
}

pub fn parallax_rate(cfg: &FxConfig) -> Result<()> {
    let mut page = SimPage::new();
    page.insert("inspiration");
    for scroll_y in [0.0, 120.0, 999.0] {
        page.apply(Some("inspiration"), &parallax::on_scroll(scroll_y, true, &cfg.parallax));
        let expected = parallax::transform(scroll_y, &cfg.parallax);
        ensure!(
            page.style("inspiration", prop::TRANSFORM) == Some(expected.as_str()),
            "parallax at {scroll_y} should be {expected}"
        );
    }
    ensure!(
        parallax::on_scroll(500.0, false, &cfg.parallax).is_empty(),
        "missing section must produce nothing"
    );
    Ok(())
}
