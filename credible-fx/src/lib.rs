//! Credible dashboard effects
//!
//! Platform-agnostic presentation logic for the Credible dashboard: theme
//! persistence, navigation highlighting and viewport-driven animations.
//! Handlers return lists of [`Effect`]s; applying them to a live document is
//! left to the host crate.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::convert::Infallible;

pub mod anchor;
pub mod config;
pub mod counter;
pub mod effect;
pub mod entrance;
pub mod hover;
pub mod nav;
pub mod parallax;
pub mod pulse;
pub mod selectors;
pub mod sim;
pub mod snapshot;
pub mod theme;

// Re-export commonly used types
pub use anchor::{AnchorAction, is_in_page_anchor, on_anchor_click};
pub use config::{
    CounterCfg, EntranceCfg, FxConfig, FxConfigError, HoverCfg, ParallaxCfg, PulseCfg, StaggerCfg,
    ThemeCfg,
};
pub use counter::{CounterAnimation, CounterEnd, CounterFrame, CounterValue};
pub use effect::{Effect, Effects, Target};
pub use entrance::{EntrancePhase, WatchId, WatchSet};
pub use hover::Hover;
pub use sim::SimPage;
pub use snapshot::FxSnapshot;
pub use theme::{THEME_ATTRIBUTE, THEME_STORAGE_KEY, Theme, ThemeParseError, ThemeState};

/// Trait for abstracting the durable key/value store behind the theme
/// preference. Platform-specific implementations should provide this.
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Drop every entry, as if the user cleared site data.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
