use crate::{
    animation::{ease::Ease, handle::AnimationHandle},
    foundation::core::{ElementId, Point, Size},
    foundation::error::{MotionError, MotionResult, ensure_positive},
    hover::edge::{HoverEdge, classify_edge},
    stage::tree::Stage,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub duration_sec: f64,
    pub ease: Ease,
    /// How far past the row the layers park, in percent of their height.
    pub offset_percent: f64,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            duration_sec: 0.6,
            ease: Ease::OutExpo,
            offset_percent: 101.0,
        }
    }
}

impl HoverConfig {
    pub fn validate(&self) -> MotionResult<()> {
        ensure_positive("hover duration_sec", self.duration_sec)?;
        if !self.ease.is_decelerating() {
            return Err(MotionError::validation(format!(
                "hover ease must decelerate (got {:?})",
                self.ease
            )));
        }
        ensure_positive("hover offset_percent", self.offset_percent)
    }
}

#[derive(Debug)]
struct Wipe {
    from: f64,
    to: f64,
    elapsed: f64,
    handle: AnimationHandle,
}

/// Two-layer overlay that wipes in from the edge the pointer crossed.
///
/// The outer mask and the inner content always move together from one shared progress: the
/// inner layer sits at the negated offset of the outer one, so the content appears fixed in
/// place while the mask slides over it.
#[derive(Debug)]
pub struct EdgeAwareHover {
    outer: ElementId,
    inner: ElementId,
    config: HoverConfig,
    outer_y: f64,
    wipe: Option<Wipe>,
    last_edge: Option<HoverEdge>,
}

impl EdgeAwareHover {
    /// Parks both layers below the row.
    pub fn new(
        outer: ElementId,
        inner: ElementId,
        config: HoverConfig,
        stage: &mut Stage,
    ) -> MotionResult<Self> {
        config.validate()?;
        let hover = Self {
            outer,
            inner,
            config,
            outer_y: config.offset_percent,
            wipe: None,
            last_edge: None,
        };
        hover.write(stage);
        Ok(hover)
    }

    pub fn outer_y_percent(&self) -> f64 {
        self.outer_y
    }

    pub fn inner_y_percent(&self) -> f64 {
        -self.outer_y
    }

    pub fn last_edge(&self) -> Option<HoverEdge> {
        self.last_edge
    }

    pub fn is_animating(&self) -> bool {
        self.wipe.as_ref().is_some_and(|w| w.handle.is_active())
    }

    pub fn on_pointer_enter(&mut self, local: Point, size: Size, stage: &mut Stage) -> HoverEdge {
        let edge = classify_edge(local, size);
        self.cancel_in_flight();
        // Jump to the entry edge, then slide in.
        self.outer_y = edge.sign() * self.config.offset_percent;
        self.write(stage);
        self.begin(0.0);
        self.last_edge = Some(edge);
        tracing::trace!(?edge, "hover enter");
        edge
    }

    pub fn on_pointer_leave(&mut self, local: Point, size: Size, stage: &mut Stage) -> HoverEdge {
        let edge = classify_edge(local, size);
        self.cancel_in_flight();
        self.write(stage);
        self.begin(edge.sign() * self.config.offset_percent);
        self.last_edge = Some(edge);
        tracing::trace!(?edge, "hover leave");
        edge
    }

    fn begin(&mut self, to: f64) {
        let handle = AnimationHandle::new();
        handle.start();
        self.wipe = Some(Wipe {
            from: self.outer_y,
            to,
            elapsed: 0.0,
            handle,
        });
    }

    fn cancel_in_flight(&mut self) {
        if let Some(w) = self.wipe.take() {
            w.handle.cancel();
        }
    }

    /// Returns `true` while a wipe is in flight.
    pub fn advance(&mut self, dt: f64, stage: &mut Stage) -> bool {
        let Some(w) = self.wipe.as_mut() else {
            return false;
        };
        if !w.handle.is_active() {
            self.wipe = None;
            return false;
        }
        w.elapsed += dt.max(0.0);
        let p = (w.elapsed / self.config.duration_sec).clamp(0.0, 1.0);
        self.outer_y = if p >= 1.0 {
            w.to
        } else {
            w.from + (w.to - w.from) * self.config.ease.apply(p)
        };
        let finished = p >= 1.0;
        if finished {
            w.handle.complete();
            self.wipe = None;
        }
        self.write(stage);
        !finished
    }

    fn write(&self, stage: &mut Stage) {
        let outer = self.outer_y;
        stage.update_state(self.outer, |s| s.y_percent = outer);
        stage.update_state(self.inner, |s| s.y_percent = -outer);
    }

    /// Stop any wipe in flight. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.cancel_in_flight();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hover/wipe.rs"]
mod tests;
