//! DOM contract shared between the page templates and the behaviors.

pub const THEME_TOGGLE_ID: &str = "themeToggle";
pub const NAV_LINK: &str = ".nav-link";
pub const IN_PAGE_ANCHOR: &str = "a[href^=\"#\"]";
pub const STAT_CARD: &str = ".stat-card";
pub const STAT_VALUE: &str = ".stat-value";
pub const TIMELINE_ITEM: &str = ".timeline-item";
pub const TIMELINE_MARKER: &str = ".timeline-marker";
pub const HERO_BAR: &str = ".bar";
pub const PARALLAX_SECTION: &str = ".inspiration-section";
