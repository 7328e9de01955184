use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};

use crate::behaviors::{hover, mobile_menu, navbar, parallax, reveal, smooth_scroll, switcher};
use crate::config::{self, Config};
use crate::dom;
use crate::error::BindError;
use crate::motion;

pub(crate) type Initializer = fn(&Config) -> Result<(), BindError>;

static BOOTED: AtomicBool = AtomicBool::new(false);

pub(crate) const INITIALIZERS: [(&str, Initializer); 9] = [
    ("navbar", navbar::init),
    ("mobile menu", mobile_menu::init),
    ("smooth scroll", smooth_scroll::init),
    ("reveal", reveal::init_reveal),
    ("data-aos", reveal::init_aos),
    ("solution tabs", switcher::init_tabs),
    ("hero switcher", switcher::init_hero),
    ("hover effects", hover::init),
    ("parallax", parallax::init),
];

/// Claims the boot. Only the first caller gets `true`.
fn claim() -> bool {
    !BOOTED.swap(true, Ordering::SeqCst)
}

pub fn is_booted() -> bool {
    BOOTED.load(Ordering::SeqCst)
}

/// Binds every behavior once per page. Later calls are no-ops.
pub fn run(config: Config) {
    if !claim() {
        debug!("boot: already initialized");
        return;
    }
    config::install(config);
    info!(
        "boot: binding page behaviors (reduced motion: {})",
        motion::prefers_reduced_motion()
    );
    run_all(&INITIALIZERS, &config);
}

/// Runs each initializer in order. A failing one is logged and skipped.
pub(crate) fn run_all(initializers: &[(&str, Initializer)], config: &Config) -> usize {
    let mut failed = 0;
    for (name, init) in initializers {
        if let Err(err) = init(config) {
            warn!("{}: {}", name, err);
            failed += 1;
        }
    }
    failed
}

/// Calls `callback` once the document has been parsed.
pub fn on_ready(callback: fn()) {
    let document = match dom::document() {
        Ok(document) => document,
        Err(err) => {
            warn!("boot: {}", err);
            return;
        }
    };

    if document.ready_state() != "loading" {
        callback();
        return;
    }
    if let Err(err) = dom::on_once(&document, "DOMContentLoaded", move |_| callback()) {
        warn!("boot: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    static CALLS: AtomicUsize = AtomicUsize::new(0);

    fn ok(_: &Config) -> Result<(), BindError> {
        CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn broken(_: &Config) -> Result<(), BindError> {
        Err(BindError::NoDocument)
    }

    #[test]
    fn test_claim_is_idempotent() {
        let first = claim();
        assert!(!claim());
        assert!(!claim());
        assert!(first || BOOTED.load(Ordering::SeqCst));
        assert!(is_booted());
    }

    #[test]
    fn test_reveal_rules_are_bound_independently() {
        let names: Vec<&str> = INITIALIZERS.iter().map(|(name, _)| *name).collect();
        assert!(names.contains(&"reveal"));
        assert!(names.contains(&"data-aos"));
        assert_eq!(names.len(), INITIALIZERS.len());
    }

    #[test]
    fn test_failure_does_not_stop_later_initializers() {
        let before = CALLS.load(Ordering::SeqCst);
        let steps: [(&str, Initializer); 3] = [("a", ok), ("b", broken), ("c", ok)];
        assert_eq!(run_all(&steps, &Config::default()), 1);
        assert_eq!(CALLS.load(Ordering::SeqCst) - before, 2);
    }
}
