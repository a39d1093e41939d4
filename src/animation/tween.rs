use crate::{
    animation::ease::Ease,
    foundation::core::{Vec2, VisualState},
    foundation::error::{MotionError, MotionResult, ensure_non_negative},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for VisualState {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        // Discrete flags switch only once the tween has fully arrived.
        let arrived = t >= 1.0;
        Self {
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            y_percent: f64::lerp(&a.y_percent, &b.y_percent, t),
            scale: f64::lerp(&a.scale, &b.scale, t),
            scale_x: f64::lerp(&a.scale_x, &b.scale_x, t),
            rotate_x_deg: f64::lerp(&a.rotate_x_deg, &b.rotate_x_deg, t),
            visible: if arrived { b.visible } else { a.visible },
            interactive: if arrived { b.interactive } else { a.interactive },
        }
    }
}

/// A single eased interpolation between two visual states.
///
/// A zero duration is allowed and behaves as an instantaneous `set`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    pub from: VisualState,
    pub to: VisualState,
    pub duration_sec: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn new(
        from: VisualState,
        to: VisualState,
        duration_sec: f64,
        ease: Ease,
    ) -> MotionResult<Self> {
        ensure_non_negative("tween duration", duration_sec)?;
        Ok(Self {
            from,
            to,
            duration_sec,
            ease,
        })
    }

    /// Instantaneous jump to `to`.
    pub fn set(to: VisualState) -> Self {
        Self {
            from: to,
            to,
            duration_sec: 0.0,
            ease: Ease::Linear,
        }
    }

    /// Linear progress in `[0, 1]` at `elapsed` seconds after the tween starts.
    pub fn progress(&self, elapsed: f64) -> f64 {
        if self.duration_sec <= 0.0 {
            return if elapsed >= 0.0 { 1.0 } else { 0.0 };
        }
        (elapsed / self.duration_sec).clamp(0.0, 1.0)
    }

    pub fn sample(&self, elapsed: f64) -> VisualState {
        let p = self.progress(elapsed);
        // Keep the exact endpoint so discrete flags flip on arrival.
        let te = if p >= 1.0 { 1.0 } else { self.ease.apply(p) };
        VisualState::lerp(&self.from, &self.to, te)
    }
}

/// One tween applied to several targets, each offset by `stagger_sec` from the previous.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
    pub tween: Tween,
    pub stagger_sec: f64,
}

impl Stagger {
    pub fn new(tween: Tween, stagger_sec: f64) -> MotionResult<Self> {
        ensure_non_negative("stagger", stagger_sec)?;
        Ok(Self { tween, stagger_sec })
    }

    /// Time from the first target starting to the last target arriving.
    pub fn total_duration(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        self.stagger_sec * (count - 1) as f64 + self.tween.duration_sec
    }

    pub fn sample(&self, index: usize, elapsed: f64) -> VisualState {
        self.tween
            .sample(elapsed - self.stagger_sec * index as f64)
    }
}

pub(crate) fn ensure_unit_interval(name: &str, value: f64) -> MotionResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(MotionError::validation(format!(
            "{name} must be within 0..=1 (got {value})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
