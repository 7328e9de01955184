use log::debug;
use web_sys::Element;

use crate::config::Config;
use crate::dom::{self, Marked};
use crate::error::BindError;

pub const NAVBAR_SELECTOR: &str = "#main-nav, .navbar, .zd-navbar";
pub const SCROLLED_CLASS: &str = "scrolled";

pub fn is_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

pub fn find() -> Result<Option<Element>, BindError> {
    dom::query(NAVBAR_SELECTOR)
}

pub fn init(config: &Config) -> Result<(), BindError> {
    let Some(navbar) = find()? else {
        debug!("navbar: no element, skipping");
        return Ok(());
    };

    let window = dom::window()?;
    let threshold = config.scroll_threshold;
    let update = {
        let window = window.clone();
        move || {
            let offset = window.scroll_y().unwrap_or(0.0);
            navbar.set_marked(SCROLLED_CLASS, is_scrolled(offset, threshold));
        }
    };

    // Correct state before the first scroll event.
    update();
    dom::on_passive(&window, "scroll", move |_| update())?;
    debug!("navbar: bound");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::testing::FakeElement;

    #[test]
    fn test_threshold_boundary() {
        assert!(!is_scrolled(0.0, 50.0));
        assert!(!is_scrolled(50.0, 50.0));
        assert!(is_scrolled(50.5, 50.0));
        assert!(is_scrolled(51.0, 50.0));
        assert!(is_scrolled(4000.0, 50.0));
    }

    #[test]
    fn test_marker_follows_offset() {
        let navbar = FakeElement::new();
        for offset in [10.0, 60.0, 50.0, 200.0, 0.0] {
            navbar.set_marked(SCROLLED_CLASS, is_scrolled(offset, 50.0));
            assert_eq!(navbar.is_marked(SCROLLED_CLASS), offset > 50.0);
        }
    }
}
