use std::rc::Rc;

use log::debug;
use web_sys::Element;

use crate::config::Config;
use crate::dom::{self, Attrs, Marked, Styled};
use crate::error::BindError;

pub const ACTIVE_CLASS: &str = "active";

const CLASS_TOGGLE_SELECTOR: &str = ".mobile-toggle, .zd-mobile-toggle";
const CLASS_MENU_SELECTOR: &str = ".nav-links, .zd-nav-links";

/// Menu driven by `#mobile-toggle` / `#mobile-menu`, with optional overlay,
/// body scroll lock and ARIA state.
pub struct IdMenu<E> {
    pub toggle: E,
    pub menu: E,
    pub overlay: Option<E>,
    pub body: Option<E>,
}

impl<E: Marked + Styled + Attrs> IdMenu<E> {
    /// Applies open or closed to every part in one step.
    pub fn set_open(&self, open: bool) {
        self.toggle.set_marked(ACTIVE_CLASS, open);
        self.menu.set_marked(ACTIVE_CLASS, open);
        if let Some(overlay) = &self.overlay {
            overlay.set_marked(ACTIVE_CLASS, open);
        }
        if let Some(body) = &self.body {
            body.set_style("overflow", if open { "hidden" } else { "" });
        }
        self.toggle
            .set_attr("aria-expanded", if open { "true" } else { "false" });
    }

    pub fn is_open(&self) -> bool {
        self.menu.is_marked(ACTIVE_CLASS)
    }

    pub fn toggle(&self) {
        self.set_open(!self.is_open());
    }
}

/// Solutions sub-dropdown inside the id-based menu. Independent of the outer menu.
pub struct Dropdown<E> {
    pub toggle: E,
    pub panel: E,
}

impl<E: Marked> Dropdown<E> {
    pub fn flip(&self) {
        let open = !self.panel.is_marked(ACTIVE_CLASS);
        self.toggle.set_marked(ACTIVE_CLASS, open);
        self.panel.set_marked(ACTIVE_CLASS, open);
    }
}

/// Fallback markup: `.mobile-toggle` + `.nav-links`, classes only.
pub struct ClassMenu<E> {
    pub toggle: E,
    pub menu: E,
}

impl<E: Marked> ClassMenu<E> {
    pub fn toggle(&self) {
        let open = !self.menu.is_marked(ACTIVE_CLASS);
        self.menu.set_marked(ACTIVE_CLASS, open);
        self.toggle.set_marked(ACTIVE_CLASS, open);
    }

    pub fn close(&self) {
        self.menu.unmark(ACTIVE_CLASS);
        self.toggle.unmark(ACTIVE_CLASS);
    }
}

/// Which markup shape the page uses. Resolved once; only one shape binds.
pub enum MenuShape {
    ById {
        menu: IdMenu<Element>,
        dropdown: Option<Dropdown<Element>>,
    },
    ByClass(ClassMenu<Element>),
}

impl MenuShape {
    pub fn resolve() -> Result<Option<MenuShape>, BindError> {
        let id_pair = (dom::by_id("mobile-toggle")?, dom::by_id("mobile-menu")?);
        if let (Some(toggle), Some(menu)) = id_pair {
            let body = dom::document()?.body().map(Element::from);
            let dropdown_pair = (
                dom::by_id("solutions-toggle")?,
                dom::by_id("solutions-dropdown")?,
            );
            let dropdown = match dropdown_pair {
                (Some(toggle), Some(panel)) => Some(Dropdown { toggle, panel }),
                _ => None,
            };
            return Ok(Some(MenuShape::ById {
                menu: IdMenu {
                    toggle,
                    menu,
                    overlay: dom::by_id("mobile-overlay")?,
                    body,
                },
                dropdown,
            }));
        }

        match (dom::query(CLASS_TOGGLE_SELECTOR)?, dom::query(CLASS_MENU_SELECTOR)?) {
            (Some(toggle), Some(menu)) => Ok(Some(MenuShape::ByClass(ClassMenu { toggle, menu }))),
            _ => Ok(None),
        }
    }
}

pub fn init(_config: &Config) -> Result<(), BindError> {
    match MenuShape::resolve()? {
        Some(MenuShape::ById { menu, dropdown }) => bind_id_menu(menu, dropdown),
        Some(MenuShape::ByClass(menu)) => bind_class_menu(menu),
        None => {
            debug!("mobile menu: no markup, skipping");
            Ok(())
        }
    }
}

fn bind_id_menu(
    menu: IdMenu<Element>,
    dropdown: Option<Dropdown<Element>>,
) -> Result<(), BindError> {
    let menu = Rc::new(menu);

    {
        let handle = menu.clone();
        dom::on(&menu.toggle, "click", move |_| handle.toggle())?;
    }

    if let Some(overlay) = menu.overlay.clone() {
        let menu = menu.clone();
        dom::on(&overlay, "click", move |_| menu.set_open(false))?;
    }

    if let Some(dropdown) = dropdown {
        let dropdown = Rc::new(dropdown);
        let handle = dropdown.clone();
        dom::on(&dropdown.toggle, "click", move |_| handle.flip())?;
    }

    for link in dom::query_all_in(&menu.menu, "a")? {
        let menu = menu.clone();
        dom::on(&link, "click", move |_| menu.set_open(false))?;
    }

    debug!("mobile menu: bound id-based markup");
    Ok(())
}

fn bind_class_menu(menu: ClassMenu<Element>) -> Result<(), BindError> {
    let menu = Rc::new(menu);

    {
        let handle = menu.clone();
        dom::on(&menu.toggle, "click", move |_| handle.toggle())?;
    }

    for link in dom::query_all_in(&menu.menu, "a")? {
        let menu = menu.clone();
        dom::on(&link, "click", move |_| menu.close())?;
    }

    debug!("mobile menu: bound class-based markup");
    Ok(())
}
