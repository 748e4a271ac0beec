//! Timing and ratio configuration for every dashboard effect.
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_FX_DATA: &str = include_str!("../../credible-web/static/fx.json");

/// Errors raised when effect configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum FxConfigError {
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxConfig {
    #[serde(default = "FxConfig::default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub theme: ThemeCfg,
    #[serde(default)]
    pub entrance: EntranceCfg,
    #[serde(default)]
    pub stagger: StaggerCfg,
    #[serde(default)]
    pub counter: CounterCfg,
    #[serde(default)]
    pub pulse: PulseCfg,
    #[serde(default)]
    pub hover: HoverCfg,
    #[serde(default)]
    pub parallax: ParallaxCfg,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeCfg {
    #[serde(default = "ThemeCfg::default_spin_ms")]
    pub spin_ms: u32,
    #[serde(default = "ThemeCfg::default_spin_transform")]
    pub spin_transform: String,
    #[serde(default = "ThemeCfg::default_active_link_color")]
    pub active_link_color: String,
}

/// Options for the intersection-gated entrance of stat cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntranceCfg {
    #[serde(default = "EntranceCfg::default_threshold")]
    pub threshold: f64,
    #[serde(default = "EntranceCfg::default_root_margin")]
    pub root_margin: String,
    #[serde(default = "EntranceCfg::default_delay_ms")]
    pub delay_ms: u32,
    /// Vertical start offset; positive values start below the resting spot.
    #[serde(default = "EntranceCfg::default_offset_px")]
    pub offset_px: i32,
    #[serde(default = "EntranceCfg::default_transition")]
    pub transition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaggerCfg {
    #[serde(default = "StaggerCfg::default_step_ms")]
    pub step_ms: u32,
    /// Horizontal start offset; negative values start left of the resting spot.
    #[serde(default = "StaggerCfg::default_offset_px")]
    pub offset_px: i32,
    #[serde(default = "StaggerCfg::default_transition")]
    pub transition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterCfg {
    #[serde(default = "CounterCfg::default_threshold")]
    pub threshold: f64,
    #[serde(default = "CounterCfg::default_duration_ms")]
    pub duration_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseCfg {
    #[serde(default = "PulseCfg::default_base_interval_ms")]
    pub base_interval_ms: u32,
    #[serde(default = "PulseCfg::default_step_ms")]
    pub step_ms: u32,
    #[serde(default = "PulseCfg::default_dim_opacity")]
    pub dim_opacity: f64,
    #[serde(default = "PulseCfg::default_restore_delay_ms")]
    pub restore_delay_ms: u32,
    #[serde(default = "PulseCfg::default_transition")]
    pub transition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverCfg {
    #[serde(default = "HoverCfg::default_scale")]
    pub scale: f64,
    #[serde(default = "HoverCfg::default_transition")]
    pub transition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxCfg {
    #[serde(default = "ParallaxCfg::default_rate")]
    pub rate: f64,
}

impl FxConfig {
    /// Load the configuration bundled with the web crate, falling back to
    /// built-in defaults when the embedded document cannot be parsed.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_FX_DATA).unwrap_or_else(|err| {
            log::warn!("embedded fx config unreadable, using defaults: {err}");
            Self::default()
        })
    }

    /// Parse a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check every ratio and duration for sane bounds.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), FxConfigError> {
        self.log_filter()?;
        ensure_range("entrance.threshold", self.entrance.threshold, 0.0, 1.0)?;
        ensure_range("counter.threshold", self.counter.threshold, 0.0, 1.0)?;
        ensure_range("pulse.dim_opacity", self.pulse.dim_opacity, 0.0, 1.0)?;
        ensure_range("parallax.rate", self.parallax.rate, -1.0, 1.0)?;
        ensure_range("hover.scale", self.hover.scale, 0.1, 10.0)?;
        ensure_nonzero("counter.duration_ms", self.counter.duration_ms)?;
        ensure_nonzero("pulse.base_interval_ms", self.pulse.base_interval_ms)?;
        Ok(())
    }

    /// Parsed `log_level`.
    ///
    /// # Errors
    ///
    /// Returns [`FxConfigError::LogLevel`] for names `log` does not know.
    pub fn log_filter(&self) -> Result<log::LevelFilter, FxConfigError> {
        self.log_level
            .parse()
            .map_err(|_| FxConfigError::LogLevel(self.log_level.clone()))
    }

    fn default_log_level() -> String {
        "info".to_string()
    }
}

fn ensure_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), FxConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(FxConfigError::RangeViolation {
            field,
            min,
            max,
            value,
        })
    }
}

const fn ensure_nonzero(field: &'static str, value: u32) -> Result<(), FxConfigError> {
    if value == 0 {
        Err(FxConfigError::ZeroDuration { field })
    } else {
        Ok(())
    }
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            theme: ThemeCfg::default(),
            entrance: EntranceCfg::default(),
            stagger: StaggerCfg::default(),
            counter: CounterCfg::default(),
            pulse: PulseCfg::default(),
            hover: HoverCfg::default(),
            parallax: ParallaxCfg::default(),
        }
    }
}

impl ThemeCfg {
    const fn default_spin_ms() -> u32 {
        300
    }

    fn default_spin_transform() -> String {
        "rotate(360deg)".to_string()
    }

    fn default_active_link_color() -> String {
        "var(--accent-primary)".to_string()
    }
}

impl Default for ThemeCfg {
    fn default() -> Self {
        Self {
            spin_ms: Self::default_spin_ms(),
            spin_transform: Self::default_spin_transform(),
            active_link_color: Self::default_active_link_color(),
        }
    }
}

impl EntranceCfg {
    const fn default_threshold() -> f64 {
        0.2
    }

    fn default_root_margin() -> String {
        "0px 0px -100px 0px".to_string()
    }

    const fn default_delay_ms() -> u32 {
        100
    }

    const fn default_offset_px() -> i32 {
        20
    }

    fn default_transition() -> String {
        "all 0.6s ease".to_string()
    }
}

impl Default for EntranceCfg {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
            root_margin: Self::default_root_margin(),
            delay_ms: Self::default_delay_ms(),
            offset_px: Self::default_offset_px(),
            transition: Self::default_transition(),
        }
    }
}

impl StaggerCfg {
    const fn default_step_ms() -> u32 {
        200
    }

    const fn default_offset_px() -> i32 {
        -20
    }

    fn default_transition() -> String {
        "all 0.5s ease".to_string()
    }
}

impl Default for StaggerCfg {
    fn default() -> Self {
        Self {
            step_ms: Self::default_step_ms(),
            offset_px: Self::default_offset_px(),
            transition: Self::default_transition(),
        }
    }
}

impl CounterCfg {
    const fn default_threshold() -> f64 {
        0.5
    }

    const fn default_duration_ms() -> u32 {
        2000
    }
}

impl Default for CounterCfg {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
            duration_ms: Self::default_duration_ms(),
        }
    }
}

impl PulseCfg {
    const fn default_base_interval_ms() -> u32 {
        3000
    }

    const fn default_step_ms() -> u32 {
        500
    }

    const fn default_dim_opacity() -> f64 {
        0.7
    }

    const fn default_restore_delay_ms() -> u32 {
        100
    }

    fn default_transition() -> String {
        "opacity 0.5s ease".to_string()
    }
}

impl Default for PulseCfg {
    fn default() -> Self {
        Self {
            base_interval_ms: Self::default_base_interval_ms(),
            step_ms: Self::default_step_ms(),
            dim_opacity: Self::default_dim_opacity(),
            restore_delay_ms: Self::default_restore_delay_ms(),
            transition: Self::default_transition(),
        }
    }
}

impl HoverCfg {
    const fn default_scale() -> f64 {
        1.5
    }

    fn default_transition() -> String {
        "transform 0.3s ease".to_string()
    }
}

impl Default for HoverCfg {
    fn default() -> Self {
        Self {
            scale: Self::default_scale(),
            transition: Self::default_transition(),
        }
    }
}

impl ParallaxCfg {
    const fn default_rate() -> f64 {
        0.3
    }
}

impl Default for ParallaxCfg {
    fn default() -> Self {
        Self {
            rate: Self::default_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_config_matches_defaults() {
        let cfg = FxConfig::load_from_static();
        assert_eq!(cfg, FxConfig::default());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg = FxConfig::from_json(r#"{"parallax":{"rate":0.5}}"#).unwrap();
        assert!((cfg.parallax.rate - 0.5).abs() < f64::EPSILON);
        assert_eq!(cfg.counter.duration_ms, 2000);
        assert_eq!(cfg.entrance.root_margin, "0px 0px -100px 0px");
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn validate_rejects_out_of_range_threshold() {
        let mut cfg = FxConfig::default();
        cfg.entrance.threshold = 1.5;
        assert_eq!(
            cfg.validate(),
            Err(FxConfigError::RangeViolation {
                field: "entrance.threshold",
                min: 0.0,
                max: 1.0,
                value: 1.5,
            })
        );
    }

    #[test]
    fn validate_rejects_zero_counter_duration() {
        let mut cfg = FxConfig::default();
        cfg.counter.duration_ms = 0;
        assert_eq!(
            cfg.validate(),
            Err(FxConfigError::ZeroDuration {
                field: "counter.duration_ms"
            })
        );
    }

    #[test]
    fn counter_start_is_not_configurable() {
        let cfg = FxConfig::from_json(r#"{"counter":{"start":-9223372036854775808}}"#).unwrap();
        assert_eq!(cfg.counter, CounterCfg::default());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn log_filter_parses_known_levels() {
        let mut cfg = FxConfig::default();
        cfg.log_level = "debug".into();
        assert_eq!(cfg.log_filter(), Ok(log::LevelFilter::Debug));
        cfg.log_level = "chatty".into();
        assert!(matches!(cfg.log_filter(), Err(FxConfigError::LogLevel(_))));
    }
}
