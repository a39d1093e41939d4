use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    animation::handle::{AnimationHandle, HandleState},
    animation::tween::Tween,
    foundation::core::{ElementId, VisualState},
    foundation::error::{MotionError, MotionResult, ensure_non_negative},
    stage::tree::Stage,
};

/// Where a step starts, relative to the step before it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Position {
    /// `offset_sec` after the previous step ends; negative values overlap it.
    AfterPrevious { offset_sec: f64 },
    /// Together with the previous step.
    WithPrevious,
    /// Absolute, measured from the end of the timeline delay.
    At(f64),
}

impl Default for Position {
    fn default() -> Self {
        Self::AfterPrevious { offset_sec: 0.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequenceStep {
    pub target: ElementId,
    pub from: VisualState,
    pub to: VisualState,
    pub duration_sec: f64,
    pub ease: Ease,
    #[serde(default)]
    pub position: Position,
}

impl SequenceStep {
    pub fn new(
        target: ElementId,
        from: VisualState,
        to: VisualState,
        duration_sec: f64,
        ease: Ease,
    ) -> Self {
        Self {
            target,
            from,
            to,
            duration_sec,
            ease,
            position: Position::default(),
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

#[derive(Clone, Debug)]
struct ScheduledStep {
    target: ElementId,
    start: f64,
    tween: Tween,
}

/// Collects steps; [`TimelineBuilder::build`] resolves their start times once.
#[derive(Clone, Debug, Default)]
pub struct TimelineBuilder {
    delay_sec: f64,
    steps: Vec<SequenceStep>,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(mut self, delay_sec: f64) -> Self {
        self.delay_sec = delay_sec;
        self
    }

    pub fn step(mut self, step: SequenceStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> MotionResult<Timeline> {
        ensure_non_negative("timeline delay", self.delay_sec)?;
        if self.steps.is_empty() {
            return Err(MotionError::animation("timeline needs at least one step"));
        }

        let mut scheduled = Vec::with_capacity(self.steps.len());
        let mut prev: Option<(f64, f64)> = None; // (start, end) of the previous step
        for step in self.steps {
            let tween = Tween::new(step.from, step.to, step.duration_sec, step.ease)?;
            let start = match step.position {
                Position::AfterPrevious { offset_sec } => {
                    let base = prev.map_or(self.delay_sec, |(_, end)| end);
                    base + offset_sec
                }
                Position::WithPrevious => prev.map_or(self.delay_sec, |(start, _)| start),
                Position::At(t) => self.delay_sec + t,
            };
            if !start.is_finite() {
                return Err(MotionError::animation("step start time must be finite"));
            }
            // Overlap can never pull a step before the timeline itself begins.
            let start = start.max(self.delay_sec);
            prev = Some((start, start + tween.duration_sec));
            scheduled.push(ScheduledStep {
                target: step.target,
                start,
                tween,
            });
        }

        let total = scheduled
            .iter()
            .map(|s| s.start + s.tween.duration_sec)
            .fold(self.delay_sec, f64::max);

        Ok(Timeline {
            steps: scheduled,
            total_sec: total,
            elapsed: 0.0,
            handle: AnimationHandle::new(),
            snapshot: BTreeMap::new(),
            reverted: false,
        })
    }
}

/// One-shot ordered animation.
///
/// Immutable once built. `start` applies every step's initial state so nothing flashes
/// before its turn; `cancel` restores whatever the targets looked like before `start`.
#[derive(Debug)]
pub struct Timeline {
    steps: Vec<ScheduledStep>,
    total_sec: f64,
    elapsed: f64,
    handle: AnimationHandle,
    snapshot: BTreeMap<ElementId, VisualState>,
    reverted: bool,
}

impl Timeline {
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::new()
    }

    pub fn handle(&self) -> AnimationHandle {
        self.handle.clone()
    }

    pub fn total_duration(&self) -> f64 {
        self.total_sec
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_complete(&self) -> bool {
        self.handle.state() == HandleState::Completed
    }

    /// Start times in step order.
    pub fn step_starts(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.start).collect()
    }

    pub fn start(&mut self, stage: &mut Stage) {
        if !self.handle.start() {
            return;
        }
        for step in &self.steps {
            if let Some(current) = stage.state(step.target) {
                self.snapshot.entry(step.target).or_insert(current);
            }
        }
        // First step per target wins the initial state.
        let mut primed = Vec::new();
        for step in &self.steps {
            if primed.contains(&step.target) {
                continue;
            }
            primed.push(step.target);
            stage.set_state(step.target, step.tween.from);
        }
        tracing::debug!(
            steps = self.steps.len(),
            total_sec = self.total_sec,
            "timeline started"
        );
    }

    /// Advance by `dt` seconds. Returns `true` exactly once, on the call that completes it.
    pub fn advance(&mut self, dt: f64, stage: &mut Stage) -> bool {
        if self.handle.state() != HandleState::Running {
            return false;
        }
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.total_sec);
        let done = self.elapsed >= self.total_sec;
        for step in &self.steps {
            // On the final call every step lands exactly on its end state.
            let local = if done {
                f64::INFINITY
            } else {
                self.elapsed - step.start
            };
            if local < 0.0 {
                continue;
            }
            if !stage.set_state(step.target, step.tween.sample(local)) {
                tracing::trace!(target_id = step.target.0, "timeline target gone; skipped");
            }
        }
        if done {
            self.handle.complete();
            tracing::debug!("timeline complete");
            return true;
        }
        false
    }

    /// Cancel and revert touched targets. Safe to call any number of times.
    pub fn cancel(&mut self, stage: &mut Stage) -> bool {
        let cancelled = self.handle.cancel();
        if self.handle.is_cancelled() && !self.reverted {
            self.reverted = true;
            for (id, state) in &self.snapshot {
                stage.set_state(*id, *state);
            }
            tracing::debug!(elapsed = self.elapsed, "timeline cancelled");
        }
        cancelled
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
