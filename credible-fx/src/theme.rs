//! Theme preference: parse, toggle, apply and persist.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use thiserror::Error;

use crate::KeyValueStore;
use crate::config::ThemeCfg;
use crate::effect::{Effect, Effects, Target, prop};

/// Storage slot holding the persisted theme.
pub const THEME_STORAGE_KEY: &str = "theme";
/// Root attribute carrying the applied theme.
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown theme {0:?}")]
pub struct ThemeParseError(pub String);

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Theme that follows whatever is currently on the root. Only an exact
    /// `light` flips to dark; anything else, including no attribute, flips
    /// back to light.
    #[must_use]
    pub fn after_toggle(root_attr: Option<&str>) -> Self {
        if root_attr == Some(Self::Light.as_str()) {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Interpret a stored value, defaulting to light when absent or unknown.
    #[must_use]
    pub fn from_stored(stored: Option<&str>) -> Self {
        match stored.map(str::parse::<Self>) {
            Some(Ok(theme)) => theme,
            Some(Err(err)) => {
                log::debug!("ignoring stored theme: {err}");
                Self::default()
            }
            None => Self::default(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ThemeParseError(other.to_string())),
        }
    }
}

/// Theme state for one page session.
///
/// Read once at load, then changed only through [`ThemeState::on_toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeState {
    applied: Theme,
}

impl ThemeState {
    #[must_use]
    pub const fn new(applied: Theme) -> Self {
        Self { applied }
    }

    /// Read the persisted preference. Store failures degrade to the default.
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        let stored = match store.get(THEME_STORAGE_KEY) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("theme preference unreadable: {err}");
                None
            }
        };
        Self::new(Theme::from_stored(stored.as_deref()))
    }

    #[must_use]
    pub const fn applied(&self) -> Theme {
        self.applied
    }

    /// Effects for page-ready: stamp the loaded theme on the root.
    #[must_use]
    pub fn on_ready(&self) -> Effects {
        smallvec![set_root_theme(self.applied)]
    }

    /// Handle activation of the toggle control.
    ///
    /// `root_attr` is the root's current `data-theme`, which wins over the
    /// remembered state so external edits are respected.
    #[must_use]
    pub fn on_toggle(&self, root_attr: Option<&str>, cfg: &ThemeCfg) -> (Self, Effects) {
        let next = Theme::after_toggle(root_attr);
        let effects = smallvec![
            set_root_theme(next),
            Effect::Persist {
                key: THEME_STORAGE_KEY,
                value: next.as_str().to_string(),
            },
            Effect::subject_style(prop::TRANSFORM, cfg.spin_transform.clone()),
            Effect::after(cfg.spin_ms, [Effect::subject_style(prop::TRANSFORM, "")]),
        ];
        (Self::new(next), effects)
    }
}

fn set_root_theme(theme: Theme) -> Effect {
    Effect::SetAttribute {
        target: Target::Root,
        name: THEME_ATTRIBUTE,
        value: theme.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use crate::effect::settled_style;

    #[test]
    fn parse_and_display_agree() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.to_string().parse::<Theme>(), Ok(theme));
        }
        assert_eq!(
            "sepia".parse::<Theme>(),
            Err(ThemeParseError("sepia".into()))
        );
    }

    #[test]
    fn load_defaults_to_light_without_preference() {
        let store = MemoryStore::default();
        assert_eq!(ThemeState::load(&store).applied(), Theme::Light);
    }

    #[test]
    fn load_ignores_unknown_stored_value() {
        let store = MemoryStore::with_entry(THEME_STORAGE_KEY, "neon");
        assert_eq!(ThemeState::load(&store).applied(), Theme::Light);
    }

    #[test]
    fn load_reads_dark_preference() {
        let store = MemoryStore::with_entry(THEME_STORAGE_KEY, "dark");
        let state = ThemeState::load(&store);
        assert_eq!(state.applied(), Theme::Dark);
        assert_eq!(
            state.on_ready().as_slice(),
            &[Effect::SetAttribute {
                target: Target::Root,
                name: THEME_ATTRIBUTE,
                value: "dark".into(),
            }]
        );
    }

    #[test]
    fn toggle_follows_root_attribute() {
        assert_eq!(Theme::after_toggle(Some("light")), Theme::Dark);
        assert_eq!(Theme::after_toggle(Some("dark")), Theme::Light);
        assert_eq!(Theme::after_toggle(None), Theme::Light);
        assert_eq!(Theme::after_toggle(Some("LIGHT")), Theme::Light);
    }

    #[test]
    fn toggle_persists_what_it_applies_and_resets_spin() {
        let cfg = ThemeCfg::default();
        let (next, effects) = ThemeState::default().on_toggle(Some("light"), &cfg);
        assert_eq!(next.applied(), Theme::Dark);
        assert!(effects.contains(&Effect::Persist {
            key: THEME_STORAGE_KEY,
            value: "dark".into(),
        }));
        assert!(effects.contains(&Effect::subject_style(prop::TRANSFORM, "rotate(360deg)")));
        assert_eq!(
            settled_style(&effects, &Target::Subject, prop::TRANSFORM),
            Some("")
        );
        assert!(matches!(
            effects.last(),
            Some(Effect::After { delay_ms: 300, .. })
        ));
    }
}
