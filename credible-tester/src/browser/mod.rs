mod bridge;
mod session;

pub use bridge::{FxBridge, wait_for};
pub use session::{BrowserConfig, BrowserKind, new_session};
