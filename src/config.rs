use std::cell::Cell;
use std::fmt::Display;

use log::{warn, Level};
use once_cell::sync::OnceCell;
use serde::Deserialize;

static ACTIVE: OnceCell<Config> = OnceCell::new();

thread_local! {
    static STAGED: Cell<Option<Config>> = Cell::new(None);
}

/// Tunables for the page behaviors. Every key is optional when passed from JS.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Navbar gets `scrolled` strictly above this offset.
    pub scroll_threshold: f64,
    /// Used by smooth scrolling when the page has no navbar.
    pub fallback_nav_height: f64,
    pub hero_reveal_delay_ms: u32,
    pub counter_duration_ms: f64,
    pub frame_interval_ms: f64,
    pub parallax_default_speed: f64,
    pub magnetic_strength: f64,
    pub tilt_degrees: f64,
    pub tilt_depth_px: f64,
    pub reveal_threshold: f64,
    pub aos_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scroll_threshold: 50.0,
            fallback_nav_height: 80.0,
            hero_reveal_delay_ms: 150,
            counter_duration_ms: 2000.0,
            frame_interval_ms: 16.0,
            parallax_default_speed: 0.1,
            magnetic_strength: 0.1,
            tilt_degrees: 5.0,
            tilt_depth_px: 10.0,
            reveal_threshold: 0.15,
            aos_threshold: 0.1,
        }
    }
}

/// Holds options handed to `initWith` until the deferred boot picks them up.
pub fn stage(config: Config) {
    STAGED.with(|staged| staged.set(Some(config)));
}

pub fn take_staged() -> Option<Config> {
    STAGED.with(Cell::take)
}

/// Settings for the boot. Options passed to `initWith` win over the page's
/// `window.zenoAppOptions`; invalid page options fall back to defaults.
pub fn choose<E: Display>(staged: Option<Config>, page: Option<Result<Config, E>>) -> Config {
    if let Some(config) = staged {
        return config;
    }
    match page {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            warn!("ignoring invalid page options: {}", err);
            Config::default()
        }
        None => Config::default(),
    }
}

/// Records the configuration the page booted with. Only the first call wins.
pub fn install(config: Config) -> bool {
    ACTIVE.set(config).is_ok()
}

/// Configuration of the booted page, or defaults before boot.
pub fn active() -> Config {
    ACTIVE.get().copied().unwrap_or_default()
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
