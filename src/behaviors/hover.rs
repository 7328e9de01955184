use log::debug;
use web_sys::{Element, MouseEvent};

use crate::config::Config;
use crate::dom::{self, Styled};
use crate::error::BindError;
use crate::motion;

const MAGNETIC_SELECTOR: &str = ".zd-btn-primary";
const TILT_SELECTOR: &str = ".zd-card, .solution-bento-card";

pub const MAGNETIC_RESET: &str = "translate(0, 0)";
pub const TILT_RESET: &str = "perspective(1000px) rotateX(0) rotateY(0) translateZ(0)";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn of(element: &Element) -> Self {
        let rect = element.get_bounding_client_rect();
        Self {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

/// Pulls the element toward the pointer by `strength` of its offset from center.
pub fn magnetic_transform(bounds: &Bounds, x: f64, y: f64, strength: f64) -> String {
    let dx = (x - bounds.left - bounds.width / 2.0) * strength;
    let dy = (y - bounds.top - bounds.height / 2.0) * strength;
    format!("translate({}px, {}px)", dx + 0.0, dy + 0.0)
}

/// 3-D tilt from the pointer's fractional position. `None` for collapsed elements.
pub fn tilt_transform(
    bounds: &Bounds,
    x: f64,
    y: f64,
    degrees: f64,
    depth: f64,
) -> Option<String> {
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return None;
    }
    let fx = (x - bounds.left) / bounds.width;
    let fy = (y - bounds.top) / bounds.height;
    let tilt_x = (fy - 0.5) * degrees;
    let tilt_y = (fx - 0.5) * -degrees;
    Some(format!(
        "perspective(1000px) rotateX({}deg) rotateY({}deg) translateZ({}px)",
        tilt_x + 0.0,
        tilt_y + 0.0,
        depth
    ))
}

fn pointer(event: &MouseEvent) -> (f64, f64) {
    (f64::from(event.client_x()), f64::from(event.client_y()))
}

pub fn init(config: &Config) -> Result<(), BindError> {
    if !motion::decorations_enabled(motion::prefers_reduced_motion()) {
        debug!("hover effects: reduced motion, skipping");
        return Ok(());
    }

    let strength = config.magnetic_strength;
    for button in dom::query_all(MAGNETIC_SELECTOR)? {
        let target = button.clone();
        dom::on_mouse(&button, "mousemove", move |event| {
            let (x, y) = pointer(&event);
            let transform = magnetic_transform(&Bounds::of(&target), x, y, strength);
            target.set_style("transform", &transform);
        })?;
        let target = button.clone();
        dom::on(&button, "mouseleave", move |_| target.set_style("transform", MAGNETIC_RESET))?;
    }

    let (degrees, depth) = (config.tilt_degrees, config.tilt_depth_px);
    for card in dom::query_all(TILT_SELECTOR)? {
        let target = card.clone();
        dom::on_mouse(&card, "mousemove", move |event| {
            let (x, y) = pointer(&event);
            if let Some(transform) = tilt_transform(&Bounds::of(&target), x, y, degrees, depth) {
                target.set_style("transform", &transform);
            }
        })?;
        let target = card.clone();
        dom::on(&card, "mouseleave", move |_| target.set_style("transform", TILT_RESET))?;
    }

    debug!("hover effects: bound");
    Ok(())
}
