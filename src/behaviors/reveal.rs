use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::boot::{self, Initializer};
use crate::config::Config;
use crate::dom::{self, Marked};
use crate::error::BindError;

/// Fires slightly before the element reaches the bottom edge.
const ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// One group of reveal-on-scroll elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealRule {
    pub selector: &'static str,
    pub class: &'static str,
    pub threshold: f64,
}

pub fn reveal_rule(config: &Config) -> RevealRule {
    RevealRule {
        selector: ".reveal, .zd-reveal",
        class: "active",
        threshold: config.reveal_threshold,
    }
}

pub fn aos_rule(config: &Config) -> RevealRule {
    RevealRule {
        selector: "[data-aos]",
        class: "aos-animate",
        threshold: config.aos_threshold,
    }
}

/// Elements still waiting for their first sighting. Each one is marked the
/// first time it is seen intersecting and then leaves the set for good, so
/// later entries for it are dropped.
pub struct Observation<E> {
    class: &'static str,
    pending: RefCell<Vec<E>>,
}

impl<E: Marked + PartialEq> Observation<E> {
    pub fn new(class: &'static str, targets: Vec<E>) -> Self {
        Self {
            class,
            pending: RefCell::new(targets),
        }
    }

    /// Handles one observer entry. Returns true when `target` was revealed by
    /// this entry and should stop being observed.
    pub fn see(&self, target: &E, is_intersecting: bool) -> bool {
        if !is_intersecting {
            return false;
        }
        let mut pending = self.pending.borrow_mut();
        let Some(position) = pending.iter().position(|item| item == target) else {
            return false;
        };
        pending.swap_remove(position);
        target.mark(self.class);
        true
    }

    pub fn remaining(&self) -> usize {
        self.pending.borrow().len()
    }
}

fn observer_supported() -> Result<bool, BindError> {
    let window = dom::window()?;
    let key = JsValue::from_str("IntersectionObserver");
    Ok(js_sys::Reflect::has(&window, &key).unwrap_or(false))
}

pub fn init_reveal(config: &Config) -> Result<(), BindError> {
    bind_rule(reveal_rule(config))
}

pub fn init_aos(config: &Config) -> Result<(), BindError> {
    bind_rule(aos_rule(config))
}

const RULE_INITIALIZERS: [(&str, Initializer); 2] =
    [("reveal", init_reveal), ("data-aos", init_aos)];

/// Binds both rule groups; a failure in one leaves the other bound.
pub fn init(config: &Config) -> Result<(), BindError> {
    boot::run_all(&RULE_INITIALIZERS, config);
    Ok(())
}

fn bind_rule(rule: RevealRule) -> Result<(), BindError> {
    let elements = dom::query_all(rule.selector)?;
    if elements.is_empty() {
        debug!("reveal: nothing matches {}", rule.selector);
        return Ok(());
    }

    if !observer_supported()? {
        debug!("reveal: no IntersectionObserver, revealing {} now", rule.selector);
        for element in &elements {
            element.mark(rule.class);
        }
        return Ok(());
    }

    let observation = Rc::new(Observation::new(rule.class, elements.clone()));
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            if observation.see(&target, entry.is_intersecting()) {
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(rule.threshold));
    options.set_root_margin(ROOT_MARGIN);

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(BindError::js("IntersectionObserver"))?;
    callback.forget();

    for element in &elements {
        observer.observe(element);
    }
    debug!("reveal: observing {} elements for {}", elements.len(), rule.selector);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::testing::FakeElement;

    #[test]
    fn test_rules_use_config_thresholds() {
        let config = Config {
            reveal_threshold: 0.2,
            ..Config::default()
        };
        let reveal = reveal_rule(&config);
        let aos = aos_rule(&config);
        assert_eq!(reveal.class, "active");
        assert_eq!(reveal.threshold, 0.2);
        assert_eq!(aos.selector, "[data-aos]");
        assert_eq!(aos.class, "aos-animate");
        assert_eq!(aos.threshold, 0.1);
    }

    #[test]
    fn test_invisible_entry_is_ignored() {
        let element = FakeElement::new();
        let observation = Observation::new("active", vec![element.clone()]);
        assert!(!observation.see(&element, false));
        assert!(!element.is_marked("active"));
        assert_eq!(observation.remaining(), 1);
    }

    #[test]
    fn test_reentries_after_first_sighting_are_dropped() {
        let (first, second) = (FakeElement::new(), FakeElement::new());
        let observation = Observation::new("active", vec![first.clone(), second.clone()]);

        // Enter, leave and enter again, as the observer reports it.
        assert!(observation.see(&first, true));
        assert!(!observation.see(&first, false));
        assert!(!observation.see(&first, true));
        assert!(!observation.see(&second, false));
        assert!(observation.see(&second, true));
        assert!(!observation.see(&second, true));

        assert_eq!(first.mark_count("active"), 1);
        assert_eq!(second.mark_count("active"), 1);
        assert_eq!(observation.remaining(), 0);
    }

    #[test]
    fn test_unknown_target_is_not_marked() {
        let observation = Observation::new("aos-animate", vec![FakeElement::new()]);
        let stranger = FakeElement::new();
        assert!(!observation.see(&stranger, true));
        assert!(!stranger.is_marked("aos-animate"));
        assert_eq!(observation.remaining(), 1);
    }
}
