use crate::{
    animation::ease::Ease,
    animation::handle::AnimationHandle,
    animation::timeline::{Position, SequenceStep, Timeline},
    foundation::core::{ElementId, VisualState},
    foundation::error::{MotionError, MotionResult, ensure_non_negative, ensure_positive},
    foundation::math::Rng64,
    intro::decrypt::{SCRAMBLE_GLYPHS, decrypt_frame},
    stage::tree::Stage,
};

/// How the logo replaces the counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LogoReveal {
    /// Scramble, then settle left to right.
    Decrypt,
    /// Swap in the final text at once.
    Instant,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    pub count_duration_sec: f64,
    pub count_ease: Ease,
    pub logo_text: String,
    pub logo_reveal: LogoReveal,
    pub tick_interval_sec: f64,
    pub max_ticks: u32,
    pub hold_sec: f64,
    pub split_duration_sec: f64,
    pub split_ease: Ease,
    /// Seed for scramble glyphs.
    pub seed: u64,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            count_duration_sec: 1.5,
            count_ease: Ease::InOutQuad,
            logo_text: "[PJ]".to_string(),
            logo_reveal: LogoReveal::Decrypt,
            tick_interval_sec: 0.05,
            max_ticks: 15,
            hold_sec: 0.5,
            split_duration_sec: 0.8,
            split_ease: Ease::OutQuart,
            seed: 0x5eed_f011_0000_0001,
        }
    }
}

impl PreloaderConfig {
    pub fn validate(&self) -> MotionResult<()> {
        ensure_positive("preloader count_duration_sec", self.count_duration_sec)?;
        ensure_positive("preloader tick_interval_sec", self.tick_interval_sec)?;
        ensure_non_negative("preloader hold_sec", self.hold_sec)?;
        ensure_positive("preloader split_duration_sec", self.split_duration_sec)?;
        if self.logo_text.trim().is_empty() {
            return Err(MotionError::validation("preloader logo_text must not be empty"));
        }
        if self.max_ticks == 0 {
            return Err(MotionError::validation("preloader max_ticks must be > 0"));
        }
        if !self.split_ease.is_decelerating() {
            return Err(MotionError::validation(format!(
                "preloader split_ease must decelerate, got {:?}",
                self.split_ease
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PreloaderPhase {
    Counting,
    Decrypting,
    Ready,
    Splitting,
    Done,
}

/// The splash screen: a full-viewport container split into two halves that both show the
/// same text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreloaderElements {
    pub container: ElementId,
    pub top: ElementId,
    pub bottom: ElementId,
}

/// What the host draws for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PreloaderFrame {
    pub phase: PreloaderPhase,
    pub text: String,
    pub top_y_percent: f64,
    pub bottom_y_percent: f64,
}

type CompletionCallback = Box<dyn FnOnce()>;

/// Accumulated step error below this counts as having reached a phase boundary.
const TIME_EPS: f64 = 1e-9;

fn reaches(remaining: f64, need: f64) -> bool {
    remaining + TIME_EPS >= need
}

/// Counter, logo reveal, hold and screen split, driven by discrete time steps.
///
/// Time left over when a phase ends flows into the next one within the same `advance`, so
/// the trace is independent of the step size. Completion is reported once: `advance` returns
/// `true` on the completing call and the callback runs then. Cancelling never completes.
pub struct Preloader {
    el: PreloaderElements,
    config: PreloaderConfig,
    glyphs: Vec<char>,
    rng: Rng64,
    phase: PreloaderPhase,
    phase_elapsed: f64,
    elapsed: f64,
    count: u32,
    iteration: u32,
    text: String,
    split: Option<Timeline>,
    handle: AnimationHandle,
    on_complete: Option<CompletionCallback>,
}

impl std::fmt::Debug for Preloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preloader")
            .field("phase", &self.phase)
            .field("text", &self.text)
            .field("elapsed", &self.elapsed)
            .finish_non_exhaustive()
    }
}

impl Preloader {
    #[tracing::instrument(skip_all)]
    pub fn new(
        el: PreloaderElements,
        config: PreloaderConfig,
        stage: &mut Stage,
    ) -> MotionResult<Self> {
        config.validate()?;
        stage.set_state(el.container, VisualState::default());
        for half in [el.top, el.bottom] {
            stage.update_state(half, |s| s.y_percent = 0.0);
        }
        let handle = AnimationHandle::new();
        handle.start();
        tracing::debug!(
            logo = %config.logo_text,
            reveal = ?config.logo_reveal,
            "preloader mounted"
        );
        Ok(Self {
            el,
            glyphs: SCRAMBLE_GLYPHS.chars().collect(),
            rng: Rng64::new(config.seed),
            config,
            phase: PreloaderPhase::Counting,
            phase_elapsed: 0.0,
            elapsed: 0.0,
            count: 0,
            iteration: 0,
            text: "[0]".to_string(),
            split: None,
            handle,
            on_complete: None,
        })
    }

    /// Run `f` once, when the split finishes.
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn phase(&self) -> PreloaderPhase {
        self.phase
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Time consumed since mount, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_done(&self) -> bool {
        self.phase == PreloaderPhase::Done
    }

    pub fn handle(&self) -> AnimationHandle {
        self.handle.clone()
    }

    pub fn frame(&self, stage: &Stage) -> PreloaderFrame {
        let y = |id| stage.state(id).map_or(0.0, |s| s.y_percent);
        PreloaderFrame {
            phase: self.phase,
            text: self.text.clone(),
            top_y_percent: y(self.el.top),
            bottom_y_percent: y(self.el.bottom),
        }
    }

    /// Returns `true` exactly once, on the call that finishes the split.
    pub fn advance(&mut self, dt: f64, stage: &mut Stage) -> bool {
        if !self.handle.is_active() {
            return false;
        }
        let mut remaining = dt.max(0.0);
        self.elapsed += remaining;
        loop {
            match self.phase {
                PreloaderPhase::Counting => {
                    let need = self.config.count_duration_sec - self.phase_elapsed;
                    if !reaches(remaining, need) {
                        self.phase_elapsed += remaining;
                        self.update_count();
                        return false;
                    }
                    remaining = (remaining - need).max(0.0);
                    self.count = 100;
                    self.text = "[100]".to_string();
                    self.enter_logo();
                }
                PreloaderPhase::Decrypting => {
                    let need = self.config.tick_interval_sec - self.phase_elapsed;
                    if !reaches(remaining, need) {
                        self.phase_elapsed += remaining;
                        return false;
                    }
                    remaining = (remaining - need).max(0.0);
                    self.phase_elapsed = 0.0;
                    self.tick_decrypt();
                }
                PreloaderPhase::Ready => {
                    let need = self.config.hold_sec - self.phase_elapsed;
                    if !reaches(remaining, need) {
                        self.phase_elapsed += remaining;
                        return false;
                    }
                    remaining = (remaining - need).max(0.0);
                    if let Err(err) = self.enter_split(stage) {
                        // Only reachable with a config that bypassed validation.
                        tracing::debug!(%err, "preloader split could not be built");
                        self.handle.cancel();
                        return false;
                    }
                }
                PreloaderPhase::Splitting => {
                    let Some(split) = self.split.as_mut() else {
                        return false;
                    };
                    let need = split.total_duration() - split.elapsed();
                    let step = if reaches(remaining, need) {
                        remaining.max(need)
                    } else {
                        remaining
                    };
                    if !split.advance(step, stage) {
                        return false;
                    }
                    remaining = (remaining - need).max(0.0);
                    self.finish(stage);
                    tracing::trace!(leftover = remaining, "preloader finished");
                    return true;
                }
                PreloaderPhase::Done => return false,
            }
        }
    }

    fn update_count(&mut self) {
        let p = self.phase_elapsed / self.config.count_duration_sec;
        let n = (100.0 * self.config.count_ease.apply(p)).round().clamp(0.0, 100.0) as u32;
        // Monotone even if an ease dips.
        if n > self.count {
            self.count = n;
            self.text = format!("[{n}]");
        }
    }

    fn enter_logo(&mut self) {
        self.phase_elapsed = 0.0;
        match self.config.logo_reveal {
            LogoReveal::Instant => {
                self.text = self.config.logo_text.clone();
                self.set_phase(PreloaderPhase::Ready);
            }
            LogoReveal::Decrypt => {
                self.iteration = 0;
                self.text = decrypt_frame(&self.config.logo_text, 0, &mut self.rng, &self.glyphs);
                self.set_phase(PreloaderPhase::Decrypting);
            }
        }
    }

    fn tick_decrypt(&mut self) {
        self.iteration += 1;
        if self.iteration >= self.config.max_ticks {
            self.text = self.config.logo_text.clone();
            self.set_phase(PreloaderPhase::Ready);
            return;
        }
        self.text = decrypt_frame(
            &self.config.logo_text,
            self.iteration,
            &mut self.rng,
            &self.glyphs,
        );
    }

    fn enter_split(&mut self, stage: &mut Stage) -> MotionResult<()> {
        self.phase_elapsed = 0.0;
        let half = |target, to: f64| {
            let from = stage.state(target).unwrap_or_default();
            SequenceStep::new(
                target,
                from,
                from.with_y_percent(to),
                self.config.split_duration_sec,
                self.config.split_ease,
            )
        };
        let top = half(self.el.top, -100.0);
        let bottom = half(self.el.bottom, 100.0).at(Position::WithPrevious);
        let mut split = Timeline::builder().step(top).step(bottom).build()?;
        split.start(stage);
        self.split = Some(split);
        self.set_phase(PreloaderPhase::Splitting);
        Ok(())
    }

    fn finish(&mut self, stage: &mut Stage) {
        stage.update_state(self.el.container, |s| {
            s.visible = false;
            s.interactive = false;
        });
        self.set_phase(PreloaderPhase::Done);
        self.handle.complete();
        if let Some(f) = self.on_complete.take() {
            f();
        }
    }

    fn set_phase(&mut self, phase: PreloaderPhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, at = self.elapsed, "preloader phase");
        self.phase = phase;
    }

    /// Stop without completing. A running split is reverted. Safe to call repeatedly.
    pub fn cancel(&mut self, stage: &mut Stage) -> bool {
        let cancelled = self.handle.cancel();
        if let Some(split) = self.split.as_mut() {
            split.cancel(stage);
        }
        if cancelled {
            self.on_complete = None;
            tracing::debug!(phase = ?self.phase, "preloader cancelled");
        }
        cancelled
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intro/preloader.rs"]
mod tests;
