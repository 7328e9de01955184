use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::config::Config;
use crate::dom;
use crate::error::BindError;

const COUNTER_SELECTOR: &str = ".stat-number, .zd-stat-number";

/// A stat such as `500+` split into its number and the text that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterText {
    pub target: u64,
    pub suffix: String,
}

impl CounterText {
    /// Reads a leading number (`,` group separators allowed) and keeps the rest
    /// verbatim. Text that does not start with a digit is not a counter.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let end = text
            .find(|c: char| !(c.is_ascii_digit() || c == ','))
            .unwrap_or(text.len());
        let digits: String = text[..end].chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return None;
        }
        let target = digits.parse().ok()?;
        Some(Self {
            target,
            suffix: text[end..].to_string(),
        })
    }
}

/// Per-frame display values counting from 0 up to the target. The last item is
/// always exactly the target with its suffix.
#[derive(Debug, Clone)]
pub struct CounterFrames {
    current: f64,
    step: f64,
    counter: CounterText,
    finished: bool,
}

impl CounterFrames {
    pub fn new(counter: CounterText, duration_ms: f64, frame_ms: f64) -> Self {
        let frames = if frame_ms > 0.0 {
            (duration_ms / frame_ms).max(1.0)
        } else {
            1.0
        };
        Self {
            current: 0.0,
            step: counter.target as f64 / frames,
            counter,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Iterator for CounterFrames {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }
        self.current += self.step;
        let target = self.counter.target;
        if self.current < target as f64 {
            return Some(format!("{}{}", self.current.floor() as u64, self.counter.suffix));
        }
        self.finished = true;
        Some(format!("{}{}", target, self.counter.suffix))
    }
}

/// Counts one element up from zero, one frame per animation tick.
/// Elements without a leading number are left as they are.
pub fn animate(element: Element, config: &Config) -> Result<(), BindError> {
    let Some(counter) = element.text_content().as_deref().and_then(CounterText::parse) else {
        return Ok(());
    };
    let window = dom::window()?;
    let mut frames =
        CounterFrames::new(counter, config.counter_duration_ms, config.frame_interval_ms);

    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next_tick = tick.clone();
    let scheduler = window.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let Some(text) = frames.next() else {
            return;
        };
        element.set_text_content(Some(&text));
        if frames.is_finished() {
            // Drop the closure to break the reference cycle.
            let _ = next_tick.borrow_mut().take();
            return;
        }
        if let Some(callback) = next_tick.borrow().as_ref() {
            if let Err(err) = scheduler.request_animation_frame(callback.as_ref().unchecked_ref()) {
                warn!("counter: requestAnimationFrame failed: {:?}", err);
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = tick.borrow().as_ref() {
        window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(BindError::js("requestAnimationFrame"))?;
    }
    Ok(())
}

pub fn animate_all(config: &Config) -> Result<(), BindError> {
    let counters = dom::query_all(COUNTER_SELECTOR)?;
    debug!("counters: animating {}", counters.len());
    for counter in counters {
        animate(counter, config)?;
    }
    Ok(())
}
