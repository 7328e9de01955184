use log::{info, warn};
use wasm_bindgen::prelude::*;

mod boot;
mod config;
mod dom;
mod error;
mod legacy;
mod motion;
mod behaviors {
    pub mod counter;
    pub mod hover;
    pub mod mobile_menu;
    pub mod navbar;
    pub mod parallax;
    pub mod reveal;
    pub mod smooth_scroll;
    pub mod switcher;
}

pub use config::Config;
pub use error::BindError;

/// Global a page sets before loading the bundle to tune the automatic boot.
const PAGE_OPTIONS_KEY: &str = "zenoAppOptions";

#[wasm_bindgen(start)]
pub fn start() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    if console_log::init_with_level(config::log_level()).is_err() {
        warn!("logger was already initialized");
    }

    info!("Starting page behaviors");
    boot_when_ready();
}

fn parse_options(value: JsValue) -> Option<Result<Config, serde_wasm_bindgen::Error>> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    Some(serde_wasm_bindgen::from_value(value))
}

fn page_options() -> Option<Result<Config, serde_wasm_bindgen::Error>> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(PAGE_OPTIONS_KEY)).ok()?;
    parse_options(value)
}

/// Boots once the document is parsed, with settings resolved at that moment.
fn boot_when_ready() {
    boot::on_ready(|| boot::run(config::choose(config::take_staged(), page_options())));
}

/// Binds every page behavior. Safe to call repeatedly.
#[wasm_bindgen]
pub fn init() {
    boot_when_ready();
}

/// Like `init`, with a JS object of setting overrides. Only takes effect
/// while the page has not booted yet; otherwise use `window.zenoAppOptions`.
#[wasm_bindgen(js_name = initWith)]
pub fn init_with(options: JsValue) {
    if boot::is_booted() {
        warn!(
            "initWith: page already initialized; set window.{} before loading the bundle",
            PAGE_OPTIONS_KEY
        );
        return;
    }
    match parse_options(options) {
        Some(Ok(config)) => config::stage(config),
        Some(Err(err)) => warn!("initWith: ignoring invalid options: {}", err),
        None => {}
    }
    boot_when_ready();
}

#[wasm_bindgen(js_name = animateCounters)]
pub fn animate_counters() {
    if let Err(err) = behaviors::counter::animate_all(&config::active()) {
        warn!("counters: {}", err);
    }
}

/// Binds hover effects on whatever currently matches, e.g. after inserting cards.
#[wasm_bindgen(js_name = initHoverEffects)]
pub fn init_hover_effects() {
    if let Err(err) = behaviors::hover::init(&config::active()) {
        warn!("hover effects: {}", err);
    }
}

#[wasm_bindgen(js_name = initRevealAnimations)]
pub fn init_reveal_animations() {
    if let Err(err) = behaviors::reveal::init(&config::active()) {
        warn!("reveal: {}", err);
    }
}
