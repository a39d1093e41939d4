use std::{cell::Cell, rc::Rc};

/// Per-frame source of the document scroll position.
///
/// Inertial scrolling lives behind this seam; the page only asks for a position once per
/// frame and destroys the driver when it unmounts.
pub trait ScrollDriver {
    /// Advance to `time_ms` (a monotone frame clock) and report the scroll offset in px.
    fn raf(&mut self, time_ms: f64) -> f64;
    fn destroy(&mut self);
}

#[derive(Debug, Default)]
struct DirectState {
    position: Cell<f64>,
    destroyed: Cell<bool>,
}

/// Reports the last requested position immediately.
///
/// Clones share state, so the host can keep one to scroll while the page owns another.
#[derive(Clone, Debug, Default)]
pub struct DirectScroll {
    state: Rc<DirectState>,
}

impl DirectScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negative and non-finite positions clamp to the top.
    pub fn scroll_to(&self, y: f64) {
        let y = if y.is_finite() { y.max(0.0) } else { 0.0 };
        self.state.position.set(y);
    }

    pub fn position(&self) -> f64 {
        self.state.position.get()
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.destroyed.get()
    }
}

impl ScrollDriver for DirectScroll {
    fn raf(&mut self, _time_ms: f64) -> f64 {
        if self.is_destroyed() {
            return 0.0;
        }
        self.position()
    }

    fn destroy(&mut self) {
        self.state.destroyed.set(true);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/scroll.rs"]
mod tests;
