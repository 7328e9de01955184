use log::debug;
use web_sys::{Event, ScrollToOptions};

use crate::behaviors::navbar;
use crate::config::Config;
use crate::dom;
use crate::error::BindError;
use crate::motion;

const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Id named by an in-page href. `#` alone and empty hrefs name nothing.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Document offset to scroll to so the target sits just below the navbar.
pub fn scroll_target(rect_top: f64, page_offset: f64, nav_height: f64) -> f64 {
    rect_top + page_offset - nav_height
}

pub fn init(config: &Config) -> Result<(), BindError> {
    let anchors = dom::query_all(ANCHOR_SELECTOR)?;
    if anchors.is_empty() {
        debug!("smooth scroll: no in-page anchors, skipping");
        return Ok(());
    }

    let nav = navbar::find()?;
    let window = dom::window()?;
    let fallback_height = config.fallback_nav_height;

    for anchor in &anchors {
        let anchor_el = anchor.clone();
        let nav = nav.clone();
        let window = window.clone();
        dom::on(anchor, "click", move |event: Event| {
            let Some(href) = anchor_el.get_attribute("href") else {
                return;
            };
            let Some(id) = anchor_target(&href) else {
                return;
            };
            // Unresolved ids keep the browser's default navigation.
            let Some(target) = window.document().and_then(|doc| doc.get_element_by_id(id)) else {
                return;
            };
            event.prevent_default();

            let nav_height = nav
                .as_ref()
                .map(dom::offset_height)
                .unwrap_or(fallback_height);
            let top = scroll_target(
                target.get_bounding_client_rect().top(),
                window.page_y_offset().unwrap_or(0.0),
                nav_height,
            );

            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(motion::scroll_behavior(motion::prefers_reduced_motion()));
            window.scroll_to_with_scroll_to_options(&options);
        })?;
    }

    debug!("smooth scroll: bound {} anchors", anchors.len());
    Ok(())
}
