use std::collections::{BTreeMap, VecDeque};

use crate::{
    animation::tween::ensure_unit_interval,
    foundation::core::{ElementId, Rect, Viewport},
    foundation::error::{MotionError, MotionResult},
    stage::tree::Stage,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RevealPolicy {
    /// Reveal on first entry, then ignore the element.
    OneShot,
    /// Reveal on every entry, hide on every exit.
    Reversible,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ObserveOptions {
    /// Fraction of the element's area that must be inside the root.
    pub threshold: f64,
    /// CSS-style bottom root margin; negative values pull the root's bottom edge up.
    pub root_margin_bottom_px: f64,
    pub policy: RevealPolicy,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            root_margin_bottom_px: -50.0,
            policy: RevealPolicy::Reversible,
        }
    }
}

impl ObserveOptions {
    pub fn validate(&self) -> MotionResult<()> {
        ensure_unit_interval("reveal threshold", self.threshold)?;
        if !self.root_margin_bottom_px.is_finite() {
            return Err(MotionError::validation("reveal root margin must be finite"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RevealTarget {
    pub element: ElementId,
    pub revealed: bool,
    pub threshold: f64,
    pub root_margin_bottom_px: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct ObserverId(u64);

/// A delivered change of a target's `revealed` flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RevealChange {
    pub observer: ObserverId,
    pub element: ElementId,
    pub revealed: bool,
}

pub type RevealCallback = Box<dyn FnMut(ElementId)>;

struct Observer {
    target: RevealTarget,
    policy: RevealPolicy,
    on_enter: Option<RevealCallback>,
    on_exit: Option<RevealCallback>,
    last_intersecting: Option<bool>,
    spent: bool,
}

impl std::fmt::Debug for Observer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observer")
            .field("target", &self.target)
            .field("policy", &self.policy)
            .field("spent", &self.spent)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug)]
struct IntersectionRecord {
    observer: ObserverId,
    intersecting: bool,
}

/// Fraction of `element` inside `root`, in `[0, 1]`.
///
/// A zero-area element counts as fully visible when its origin lies inside the root.
pub fn intersection_ratio(element: Rect, root: Rect) -> f64 {
    let area = element.area();
    if area <= 0.0 {
        let o = element.origin();
        let inside = o.x >= root.x0 && o.x <= root.x1 && o.y >= root.y0 && o.y <= root.y1;
        return if inside { 1.0 } else { 0.0 };
    }
    (element.intersect(root).area() / area).clamp(0.0, 1.0)
}

/// Visibility observer over one section's targets.
///
/// `update` computes intersections and queues a record per state change; `deliver` applies
/// the queue, flips `revealed` flags and runs callbacks. The split mirrors how a host fires
/// observer callbacks asynchronously after layout. `unobserve` drops the observer and its
/// queued records in the same call, so nothing is ever delivered for a disposed target.
#[derive(Debug, Default)]
pub struct RevealEngine {
    observers: BTreeMap<ObserverId, Observer>,
    queue: VecDeque<IntersectionRecord>,
    next_id: u64,
}

impl RevealEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe without callbacks; changes are only reported by [`RevealEngine::deliver`].
    pub fn watch(
        &mut self,
        element: ElementId,
        options: ObserveOptions,
    ) -> MotionResult<ObserverId> {
        self.register(element, options, None, None)
    }

    pub fn observe(
        &mut self,
        element: ElementId,
        options: ObserveOptions,
        on_enter: impl FnMut(ElementId) + 'static,
        on_exit: Option<RevealCallback>,
    ) -> MotionResult<ObserverId> {
        self.register(element, options, Some(Box::new(on_enter)), on_exit)
    }

    fn register(
        &mut self,
        element: ElementId,
        options: ObserveOptions,
        on_enter: Option<RevealCallback>,
        on_exit: Option<RevealCallback>,
    ) -> MotionResult<ObserverId> {
        options.validate()?;
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.insert(
            id,
            Observer {
                target: RevealTarget {
                    element,
                    revealed: false,
                    threshold: options.threshold,
                    root_margin_bottom_px: options.root_margin_bottom_px,
                },
                policy: options.policy,
                on_enter,
                on_exit,
                last_intersecting: None,
                spent: false,
            },
        );
        Ok(id)
    }

    /// Disconnect one observer. Returns `false` if it was already gone.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        let removed = self.observers.remove(&id).is_some();
        self.queue.retain(|r| r.observer != id);
        removed
    }

    /// Disconnect everything.
    pub fn disconnect(&mut self) {
        self.observers.clear();
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn target(&self, id: ObserverId) -> Option<RevealTarget> {
        self.observers.get(&id).map(|o| o.target)
    }

    pub fn is_revealed(&self, id: ObserverId) -> Option<bool> {
        self.target(id).map(|t| t.revealed)
    }

    /// Measure every target against the viewport and queue records for changes.
    pub fn update(&mut self, stage: &Stage, viewport: Viewport, scroll_y: f64) -> usize {
        let root = viewport.document_rect(scroll_y);
        let mut queued = 0;
        for (id, obs) in &mut self.observers {
            if obs.spent {
                continue;
            }
            let Some(rect) = stage.rect(obs.target.element) else {
                continue;
            };
            let mut obs_root = root;
            obs_root.y1 = (obs_root.y1 + obs.target.root_margin_bottom_px).max(obs_root.y0);
            let ratio = intersection_ratio(rect, obs_root);
            let intersecting = if obs.target.threshold <= 0.0 {
                ratio > 0.0
            } else {
                ratio >= obs.target.threshold
            };
            if obs.last_intersecting == Some(intersecting) {
                continue;
            }
            obs.last_intersecting = Some(intersecting);
            self.queue.push_back(IntersectionRecord {
                observer: *id,
                intersecting,
            });
            queued += 1;
        }
        queued
    }

    /// Apply queued records in order and return the resulting flag changes.
    pub fn deliver(&mut self) -> Vec<RevealChange> {
        let mut changes = Vec::new();
        while let Some(record) = self.queue.pop_front() {
            let Some(obs) = self.observers.get_mut(&record.observer) else {
                continue;
            };
            let element = obs.target.element;
            match (obs.policy, record.intersecting, obs.target.revealed) {
                (_, true, false) if !obs.spent => {
                    obs.target.revealed = true;
                    if obs.policy == RevealPolicy::OneShot {
                        obs.spent = true;
                    }
                    if let Some(cb) = obs.on_enter.as_mut() {
                        cb(element);
                    }
                }
                (RevealPolicy::Reversible, false, true) => {
                    obs.target.revealed = false;
                    if let Some(cb) = obs.on_exit.as_mut() {
                        cb(element);
                    }
                }
                _ => continue,
            }
            tracing::trace!(
                element = element.0,
                revealed = obs.target.revealed,
                "reveal change"
            );
            changes.push(RevealChange {
                observer: record.observer,
                element,
                revealed: obs.target.revealed,
            });
        }
        changes
    }

    /// `update` followed by `deliver`.
    pub fn tick(&mut self, stage: &Stage, viewport: Viewport, scroll_y: f64) -> Vec<RevealChange> {
        self.update(stage, viewport, scroll_y);
        self.deliver()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/observer.rs"]
mod tests;
