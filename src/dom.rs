use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, MouseEvent,
    Window,
};

use crate::error::BindError;

pub fn window() -> Result<Window, BindError> {
    web_sys::window().ok_or(BindError::NoWindow)
}

pub fn document() -> Result<Document, BindError> {
    window()?.document().ok_or(BindError::NoDocument)
}

/// First element matching `selector`, in document order.
pub fn query(selector: &str) -> Result<Option<Element>, BindError> {
    document()?
        .query_selector(selector)
        .map_err(BindError::js("querySelector"))
}

pub fn query_all(selector: &str) -> Result<Vec<Element>, BindError> {
    let list = document()?
        .query_selector_all(selector)
        .map_err(BindError::js("querySelectorAll"))?;
    Ok(collect_elements(&list))
}

pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<Element>, BindError> {
    let list = root
        .query_selector_all(selector)
        .map_err(BindError::js("querySelectorAll"))?;
    Ok(collect_elements(&list))
}

pub fn by_id(id: &str) -> Result<Option<Element>, BindError> {
    Ok(document()?.get_element_by_id(id))
}

fn collect_elements(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Rendered height of an element, zero for non-HTML elements.
pub fn offset_height(element: &Element) -> f64 {
    element
        .dyn_ref::<HtmlElement>()
        .map(|el| f64::from(el.offset_height()))
        .unwrap_or(0.0)
}

fn attach(
    target: &EventTarget,
    event: &str,
    handler: Box<dyn FnMut(Event)>,
    options: Option<&AddEventListenerOptions>,
) -> Result<(), BindError> {
    let callback = Closure::wrap(handler);
    let result = match options {
        Some(options) => target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            options,
        ),
        None => target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()),
    };
    result.map_err(BindError::js("addEventListener"))?;
    // Listeners live as long as the page.
    callback.forget();
    Ok(())
}

pub fn on<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), BindError>
where
    F: FnMut(Event) + 'static,
{
    attach(target, event, Box::new(handler), None)
}

/// Passive listener, for scroll handlers that never cancel the event.
pub fn on_passive<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), BindError>
where
    F: FnMut(Event) + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    attach(target, event, Box::new(handler), Some(&options))
}

pub fn on_once<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), BindError>
where
    F: FnMut(Event) + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    attach(target, event, Box::new(handler), Some(&options))
}

pub fn on_mouse<F>(target: &EventTarget, event: &str, mut handler: F) -> Result<(), BindError>
where
    F: FnMut(MouseEvent) + 'static,
{
    on(target, event, move |event: Event| {
        if let Ok(event) = event.dyn_into::<MouseEvent>() {
            handler(event);
        }
    })
}

/// Class-list access. Marker classes are the only state the behaviors keep.
pub trait Marked {
    fn mark(&self, class: &str);
    fn unmark(&self, class: &str);
    fn is_marked(&self, class: &str) -> bool;

    fn set_marked(&self, class: &str, on: bool) {
        if on {
            self.mark(class);
        } else {
            self.unmark(class);
        }
    }
}

/// Inline style access. An empty value clears the property.
pub trait Styled {
    fn set_style(&self, property: &str, value: &str);
}

pub trait Attrs {
    fn attr(&self, name: &str) -> Option<String>;
    fn set_attr(&self, name: &str, value: &str);
}

/// DOM writes do not fail the caller; a rejected write is logged and skipped.
fn report<T>(result: Result<T, BindError>) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            warn!("{}", err);
            false
        }
    }
}

impl Marked for Element {
    fn mark(&self, class: &str) {
        report(self.class_list().add_1(class).map_err(BindError::js("classList.add")));
    }

    fn unmark(&self, class: &str) {
        report(
            self.class_list()
                .remove_1(class)
                .map_err(BindError::js("classList.remove")),
        );
    }

    fn is_marked(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }
}

impl Styled for Element {
    fn set_style(&self, property: &str, value: &str) {
        if let Some(el) = self.dyn_ref::<HtmlElement>() {
            let style = el.style();
            if value.is_empty() {
                let result = style.remove_property(property);
                report(result.map_err(BindError::js("style.removeProperty")));
            } else {
                let result = style.set_property(property, value);
                report(result.map_err(BindError::js("style.setProperty")));
            }
        }
    }
}

impl Attrs for Element {
    fn attr(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_attr(&self, name: &str, value: &str) {
        report(self.set_attribute(name, value).map_err(BindError::js("setAttribute")));
    }
}

#[cfg(test)]
pub mod testing {
    use std::cell::RefCell;
    use std::collections::{BTreeSet, HashMap};
    use std::rc::Rc;

    use super::{Attrs, Marked, Styled};

    #[derive(Debug, Default)]
    struct State {
        classes: RefCell<BTreeSet<String>>,
        mark_counts: RefCell<HashMap<String, usize>>,
        styles: RefCell<HashMap<String, String>>,
        attrs: RefCell<HashMap<String, String>>,
    }

    /// In-memory element for exercising behavior logic off the browser.
    /// Clones are handles to the same element; equality is identity.
    #[derive(Debug, Clone, Default)]
    pub struct FakeElement(Rc<State>);

    impl PartialEq for FakeElement {
        fn eq(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.0, &other.0)
        }
    }

    impl FakeElement {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_attr(self, name: &str, value: &str) -> Self {
            self.set_attr(name, value);
            self
        }

        pub fn with_class(self, class: &str) -> Self {
            self.0.classes.borrow_mut().insert(class.to_string());
            self
        }

        pub fn style(&self, property: &str) -> Option<String> {
            self.0.styles.borrow().get(property).cloned()
        }

        /// How many times `class` was added, counting repeats.
        pub fn mark_count(&self, class: &str) -> usize {
            self.0.mark_counts.borrow().get(class).copied().unwrap_or(0)
        }
    }

    impl Marked for FakeElement {
        fn mark(&self, class: &str) {
            self.0.classes.borrow_mut().insert(class.to_string());
            *self
                .0
                .mark_counts
                .borrow_mut()
                .entry(class.to_string())
                .or_default() += 1;
        }

        fn unmark(&self, class: &str) {
            self.0.classes.borrow_mut().remove(class);
        }

        fn is_marked(&self, class: &str) -> bool {
            self.0.classes.borrow().contains(class)
        }
    }

    impl Styled for FakeElement {
        fn set_style(&self, property: &str, value: &str) {
            let mut styles = self.0.styles.borrow_mut();
            if value.is_empty() {
                styles.remove(property);
            } else {
                styles.insert(property.to_string(), value.to_string());
            }
        }
    }

    impl Attrs for FakeElement {
        fn attr(&self, name: &str) -> Option<String> {
            self.0.attrs.borrow().get(name).cloned()
        }

        fn set_attr(&self, name: &str, value: &str) {
            self.0
                .attrs
                .borrow_mut()
                .insert(name.to_string(), value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_write_is_reported_not_propagated() {
        assert!(report(Ok::<(), BindError>(())));
        let rejected: Result<(), BindError> = Err(BindError::Js {
            context: "style.setProperty",
            message: "NoModificationAllowedError".to_string(),
        });
        assert!(!report(rejected));
    }
}
