//! Per-page state shared by the event handlers.
use std::cell::RefCell;

use credible_fx::{FxConfig, FxSnapshot, KeyValueStore, THEME_STORAGE_KEY, ThemeState, WatchSet};

use crate::dom;
use crate::storage::WebStore;

#[derive(Debug, Default)]
pub struct PageState {
    pub config: FxConfig,
    pub theme: ThemeState,
    pub entrances: WatchSet,
    pub counters: WatchSet,
    pub counters_running: usize,
    pub counters_finished: usize,
    pub pulses_active: usize,
}

thread_local! {
    static PAGE: RefCell<PageState> = RefCell::new(PageState::default());
}

/// Run `f` with exclusive access to the page state.
///
/// Never apply effects from inside `f`; collect them and apply afterwards.
pub fn with_page<R>(f: impl FnOnce(&mut PageState) -> R) -> R {
    PAGE.with(|page| f(&mut page.borrow_mut()))
}

#[must_use]
pub fn config() -> FxConfig {
    with_page(|page| page.config.clone())
}

/// Bundled configuration, validated. Falls back to defaults when invalid.
#[must_use]
pub fn load_config() -> FxConfig {
    let config = FxConfig::load_from_static();
    match config.validate() {
        Ok(()) => config,
        Err(err) => {
            dom::console_error(&format!("invalid fx config, using defaults: {err}"));
            FxConfig::default()
        }
    }
}

/// Reset page state for a fresh document.
pub fn install(config: FxConfig) {
    with_page(|page| {
        *page = PageState {
            config,
            ..PageState::default()
        };
    });
}

#[must_use]
pub fn snapshot() -> FxSnapshot {
    let stored_theme = WebStore.get(THEME_STORAGE_KEY).unwrap_or_else(|err| {
        log::debug!("snapshot without stored theme: {err}");
        None
    });
    with_page(|page| FxSnapshot {
        theme: Some(page.theme.applied().to_string()),
        stored_theme,
        entrances_pending: page.entrances.pending(),
        counters_running: page.counters_running,
        counters_finished: page.counters_finished,
        pulses_active: page.pulses_active,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_resets_counters_and_keeps_config() {
        with_page(|page| page.counters_finished = 3);
        let mut config = FxConfig::default();
        config.counter.duration_ms = 500;
        install(config);
        assert_eq!(with_page(|page| page.counters_finished), 0);
        assert_eq!(config_duration(), 500);
    }

    fn config_duration() -> u32 {
        config().counter.duration_ms
    }

    #[test]
    fn bundled_config_is_valid() {
        assert_eq!(load_config(), FxConfig::default());
    }
}
