use log::debug;
use wasm_bindgen::prelude::*;

/// Entry point kept for pages that still load the old animations bundle.
/// It owns no behavior and forwards to the shared boot.
#[wasm_bindgen(js_name = bootLegacy)]
pub fn boot_legacy() {
    debug!("legacy bridge: forwarding to init");
    crate::init();
}
