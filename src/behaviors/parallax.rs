use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::config::Config;
use crate::dom::{self, Attrs, Styled};
use crate::error::BindError;
use crate::motion;

const PARALLAX_SELECTOR: &str = ".zd-parallax, .zd-float";
const SPEED_ATTR: &str = "data-speed";

/// Reads a `data-speed` value. Absent or blank falls back to `default`;
/// anything that is not a finite number yields `None`.
pub fn parse_speed(raw: Option<&str>, default: f64) -> Option<f64> {
    match raw.map(str::trim) {
        None | Some("") => Some(default),
        Some(value) => value.parse::<f64>().ok().filter(|speed| speed.is_finite()),
    }
}

pub fn translate_y(scroll: f64, speed: f64) -> String {
    format!("translateY({}px)", scroll * speed)
}

/// Applies one scroll tick. Elements with an invalid speed keep their transform.
pub fn apply<E: Attrs + Styled>(elements: &[E], scroll: f64, default_speed: f64) {
    for element in elements {
        let raw = element.attr(SPEED_ATTR);
        if let Some(speed) = parse_speed(raw.as_deref(), default_speed) {
            element.set_style("transform", &translate_y(scroll, speed));
        }
    }
}

/// Single-flight guard: at most one frame update queued at a time.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: Cell<bool>,
}

impl FrameGate {
    /// True when the caller should schedule a frame.
    pub fn claim(&self) -> bool {
        !self.pending.replace(true)
    }

    pub fn release(&self) {
        self.pending.set(false);
    }
}

pub fn init(config: &Config) -> Result<(), BindError> {
    if !motion::decorations_enabled(motion::prefers_reduced_motion()) {
        debug!("parallax: reduced motion, skipping");
        return Ok(());
    }

    let elements: Rc<Vec<Element>> = Rc::new(dom::query_all(PARALLAX_SELECTOR)?);
    if elements.is_empty() {
        debug!("parallax: no elements, skipping");
        return Ok(());
    }

    let window = dom::window()?;
    let default_speed = config.parallax_default_speed;
    let gate = Rc::new(FrameGate::default());

    let frame = {
        let window = window.clone();
        let elements = elements.clone();
        let gate = gate.clone();
        Closure::wrap(Box::new(move || {
            apply(elements.as_slice(), window.scroll_y().unwrap_or(0.0), default_speed);
            gate.release();
        }) as Box<dyn FnMut()>)
    };

    let scheduler = window.clone();
    dom::on_passive(&window, "scroll", move |_| {
        if !gate.claim() {
            return;
        }
        if let Err(err) = scheduler.request_animation_frame(frame.as_ref().unchecked_ref()) {
            gate.release();
            warn!("parallax: requestAnimationFrame failed: {:?}", err);
        }
    })?;

    apply(elements.as_slice(), window.scroll_y().unwrap_or(0.0), default_speed);
    debug!("parallax: bound {} elements", elements.len());
    Ok(())
}
