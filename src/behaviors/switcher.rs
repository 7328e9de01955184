use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::Element;

use crate::config::Config;
use crate::dom::{self, Attrs, Marked, Styled};
use crate::error::BindError;
use crate::motion;

pub const ACTIVE_CLASS: &str = "active";

const TAB_SELECTOR: &str = ".solution-tab";
const PANEL_SELECTOR: &str = ".solution-panel";
const HERO_BUTTON_SELECTOR: &str = ".switcher-btn, .zd-switcher-btn";
const HERO_VIEW_SELECTOR: &str = ".hero-view, .zd-hero-view";

/// Clears the marker from every trigger and destination, then marks the chosen pair.
pub fn select<E: Marked>(triggers: &[E], destinations: &[E], trigger: &E, destination: Option<&E>) {
    for item in triggers {
        item.unmark(ACTIVE_CLASS);
    }
    for item in destinations {
        item.unmark(ACTIVE_CLASS);
    }
    trigger.mark(ACTIVE_CLASS);
    if let Some(destination) = destination {
        destination.mark(ACTIVE_CLASS);
    }
}

pub fn find_by_id<'a, E: Attrs>(items: &'a [E], id: &str) -> Option<&'a E> {
    items.iter().find(|item| item.attr("id").as_deref() == Some(id))
}

/// Activates tab `index` and the panel its `data-target` names.
/// Returns false when the tab has no target.
pub fn activate_tab<E: Marked + Attrs>(tabs: &[E], panels: &[E], index: usize) -> bool {
    let Some(tab) = tabs.get(index) else {
        return false;
    };
    let Some(target) = tab.attr("data-target") else {
        return false;
    };
    select(tabs, panels, tab, find_by_id(panels, &target));
    true
}

pub fn hero_view_id(target: &str) -> String {
    format!("view-{}", target)
}

pub fn hide_view<E: Marked + Styled>(view: &E) {
    view.unmark(ACTIVE_CLASS);
    view.set_style("opacity", "0");
    view.set_style("transform", "translateY(20px)");
}

pub fn show_view<E: Marked + Styled>(view: &E) {
    view.mark(ACTIVE_CLASS);
    view.set_style("opacity", "1");
    view.set_style("transform", "translateY(0)");
}

/// Delay before the incoming view is shown, or `None` to show it at once.
pub fn reveal_delay(reduced: bool, delay_ms: u32) -> Option<u32> {
    if reduced || delay_ms == 0 {
        None
    } else {
        Some(delay_ms)
    }
}

/// Marks the clicked button and hides every view. Returns the view to show,
/// which the caller reveals now or after the exit transition.
pub fn switch_hero<'a, E: Marked + Styled + Attrs>(
    buttons: &[E],
    views: &'a [E],
    index: usize,
) -> Option<&'a E> {
    let button = buttons.get(index)?;
    let target = button.attr("data-target")?;

    for item in buttons {
        item.unmark(ACTIVE_CLASS);
    }
    button.mark(ACTIVE_CLASS);
    for view in views {
        hide_view(view);
    }
    find_by_id(views, &hero_view_id(&target))
}

pub fn init_tabs(_config: &Config) -> Result<(), BindError> {
    let tabs = dom::query_all(TAB_SELECTOR)?;
    let panels = dom::query_all(PANEL_SELECTOR)?;
    if tabs.is_empty() || panels.is_empty() {
        debug!("solution tabs: no markup, skipping");
        return Ok(());
    }

    let tabs = Rc::new(tabs);
    let panels = Rc::new(panels);
    for (index, tab) in tabs.iter().enumerate() {
        let tabs = tabs.clone();
        let panels = panels.clone();
        dom::on(tab, "click", move |_| {
            activate_tab(tabs.as_slice(), panels.as_slice(), index);
        })?;
    }

    debug!("solution tabs: bound {} tabs", tabs.len());
    Ok(())
}

pub fn init_hero(config: &Config) -> Result<(), BindError> {
    let buttons = dom::query_all(HERO_BUTTON_SELECTOR)?;
    let views = dom::query_all(HERO_VIEW_SELECTOR)?;
    if buttons.is_empty() || views.is_empty() {
        debug!("hero switcher: no markup, skipping");
        return Ok(());
    }

    let delay = config.hero_reveal_delay_ms;
    let buttons = Rc::new(buttons);
    let views = Rc::new(views);
    for (index, button) in buttons.iter().enumerate() {
        let buttons = buttons.clone();
        let views = views.clone();
        dom::on(button, "click", move |_| {
            let Some(view) = switch_hero(buttons.as_slice(), views.as_slice(), index) else {
                return;
            };
            match reveal_delay(motion::prefers_reduced_motion(), delay) {
                Some(delay) => {
                    let view: Element = view.clone();
                    Timeout::new(delay, move || show_view(&view)).forget();
                }
                None => show_view(view),
            }
        })?;
    }

    debug!("hero switcher: bound {} buttons", buttons.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::testing::FakeElement;

    fn tabs() -> (Vec<FakeElement>, Vec<FakeElement>) {
        let tabs = ["hospital", "clinic", "pharmacy"]
            .iter()
            .map(|t| FakeElement::new().with_attr("data-target", t))
            .collect();
        let panels = ["hospital", "clinic", "pharmacy"]
            .iter()
            .map(|t| FakeElement::new().with_attr("id", t))
            .collect();
        (tabs, panels)
    }

    fn active_count(items: &[FakeElement]) -> usize {
        items.iter().filter(|i| i.is_marked(ACTIVE_CLASS)).count()
    }

    #[test]
    fn test_single_active_for_any_click_sequence() {
        let (tabs, panels) = tabs();
        for index in [0, 2, 2, 1, 0, 1, 2] {
            assert!(activate_tab(&tabs, &panels, index));
            assert_eq!(active_count(&tabs), 1);
            assert_eq!(active_count(&panels), 1);
            assert!(tabs[index].is_marked(ACTIVE_CLASS));
            assert!(panels[index].is_marked(ACTIVE_CLASS));
        }
    }

    #[test]
    fn test_tab_without_target_changes_nothing() {
        let (mut tabs, panels) = tabs();
        tabs.push(FakeElement::new());
        activate_tab(&tabs, &panels, 1);
        assert!(!activate_tab(&tabs, &panels, 3));
        assert!(tabs[1].is_marked(ACTIVE_CLASS));
        assert!(panels[1].is_marked(ACTIVE_CLASS));
    }

    #[test]
    fn test_tab_with_unknown_panel_clears_panels() {
        let (mut tabs, panels) = tabs();
        tabs.push(FakeElement::new().with_attr("data-target", "missing"));
        activate_tab(&tabs, &panels, 0);
        assert!(activate_tab(&tabs, &panels, 3));
        assert_eq!(active_count(&tabs), 1);
        assert_eq!(active_count(&panels), 0);
    }

    #[test]
    fn test_hero_switch_hides_all_then_returns_incoming() {
        let buttons: Vec<_> = ["ops", "care"]
            .iter()
            .map(|t| FakeElement::new().with_attr("data-target", t))
            .collect();
        let views: Vec<_> = ["view-ops", "view-care"]
            .iter()
            .map(|id| FakeElement::new().with_attr("id", id))
            .collect();
        show_view(&views[0]);

        let incoming = switch_hero(&buttons, &views, 1).expect("view-care exists");
        assert!(buttons[1].is_marked(ACTIVE_CLASS));
        assert_eq!(active_count(&buttons), 1);
        assert_eq!(active_count(&views), 0);
        for view in &views {
            assert_eq!(view.style("opacity").as_deref(), Some("0"));
            assert_eq!(view.style("transform").as_deref(), Some("translateY(20px)"));
        }

        show_view(incoming);
        assert!(views[1].is_marked(ACTIVE_CLASS));
        assert_eq!(views[1].style("opacity").as_deref(), Some("1"));
        assert_eq!(views[1].style("transform").as_deref(), Some("translateY(0)"));
        assert_eq!(active_count(&views), 1);
    }

    #[test]
    fn test_hero_button_without_target_is_ignored() {
        let buttons = vec![FakeElement::new().with_class(ACTIVE_CLASS), FakeElement::new()];
        let views = vec![FakeElement::new().with_attr("id", "view-a")];
        assert!(switch_hero(&buttons, &views, 1).is_none());
        assert!(buttons[0].is_marked(ACTIVE_CLASS));
        assert!(views[0].style("opacity").is_none());
    }

    #[test]
    fn test_reveal_delay_skipped_under_reduced_motion() {
        assert_eq!(reveal_delay(false, 150), Some(150));
        assert_eq!(reveal_delay(true, 150), None);
        assert_eq!(reveal_delay(false, 0), None);
        assert_eq!(reveal_delay(true, 0), None);
    }

    #[test]
    fn test_hero_view_id() {
        assert_eq!(hero_view_id("ops"), "view-ops");
    }
}
