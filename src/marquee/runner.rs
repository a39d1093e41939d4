use crate::{
    animation::handle::AnimationHandle,
    foundation::core::ElementId,
    foundation::error::MotionResult,
    marquee::repeat::{MarqueeConfig, MarqueeContent, MarqueeState},
    stage::tree::Stage,
};

/// Layout reads the marquee needs from the host.
pub trait LayoutProbe {
    /// Width of one unrepeated content block; `0.0` before layout.
    fn content_width(&self) -> f64;
    fn viewport_width(&self) -> f64;
}

/// Fixed measurements, for hosts that already know their layout and for tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedLayout {
    pub content_width: f64,
    pub viewport_width: f64,
}

impl LayoutProbe for FixedLayout {
    fn content_width(&self) -> f64 {
        self.content_width
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }
}

#[derive(Debug)]
enum Phase {
    Waiting {
        retry_in: f64,
    },
    Running {
        state: MarqueeState,
        elapsed: f64,
        handle: AnimationHandle,
    },
    Stopped,
}

/// Endless horizontal loop of one menu row's repeated content.
///
/// Setup is deferred by `retry_delay_sec` and retried at that interval until the content
/// has a width. Every re-setup kills the previous loop first.
#[derive(Debug)]
pub struct MarqueeLoop {
    strip: ElementId,
    config: MarqueeConfig,
    content_key: u64,
    repetitions: u32,
    phase: Phase,
}

impl MarqueeLoop {
    pub fn new(
        strip: ElementId,
        content: &MarqueeContent,
        config: MarqueeConfig,
    ) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self {
            strip,
            config,
            content_key: content.identity(),
            repetitions: config.min_repetitions,
            phase: Phase::Waiting {
                retry_in: config.retry_delay_sec,
            },
        })
    }

    /// Copies the host should render right now.
    pub fn repetition_count(&self) -> u32 {
        self.repetitions
    }

    pub fn state(&self) -> Option<MarqueeState> {
        match &self.phase {
            Phase::Running { state, .. } => Some(*state),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self.phase, Phase::Stopped)
    }

    /// Swap the row's content. Same identity is a no-op.
    pub fn set_content(&mut self, content: &MarqueeContent) {
        let key = content.identity();
        if key == self.content_key || self.is_stopped() {
            return;
        }
        self.content_key = key;
        tracing::debug!(strip = self.strip.0, "marquee content changed; re-measuring");
        self.reschedule();
    }

    /// Recompute the repetition count from fresh measurements; restart the loop if the
    /// geometry it runs on changed.
    pub fn on_resize(&mut self, probe: &impl LayoutProbe) {
        let Phase::Running { state, .. } = &self.phase else {
            return;
        };
        let content_width = probe.content_width();
        match MarqueeState::compute(content_width, probe.viewport_width(), &self.config) {
            Some(next) => {
                self.repetitions = next.repetition_count;
                if next.repetition_count != state.repetition_count
                    || next.content_width_px != state.content_width_px
                {
                    tracing::debug!(
                        strip = self.strip.0,
                        repetitions = next.repetition_count,
                        "marquee geometry changed; restarting"
                    );
                    self.reschedule();
                }
            }
            // Content collapsed mid-resize; keep the count and wait for layout.
            None => self.reschedule(),
        }
    }

    fn reschedule(&mut self) {
        self.kill_running();
        self.phase = Phase::Waiting {
            retry_in: self.config.retry_delay_sec,
        };
    }

    fn kill_running(&mut self) {
        if let Phase::Running { handle, .. } = &self.phase {
            handle.cancel();
        }
    }

    pub fn advance(&mut self, dt: f64, probe: &impl LayoutProbe, stage: &mut Stage) {
        let dt = dt.max(0.0);
        match &mut self.phase {
            Phase::Stopped => {}
            Phase::Waiting { retry_in } => {
                *retry_in -= dt;
                if *retry_in > 0.0 {
                    return;
                }
                let leftover = -*retry_in;
                self.try_setup(leftover, probe, stage);
            }
            Phase::Running {
                state,
                elapsed,
                handle,
            } => {
                if !handle.is_active() {
                    return;
                }
                *elapsed += dt;
                let x = state.offset_at(*elapsed);
                stage.update_state(self.strip, |s| s.translate.x = x);
            }
        }
    }

    fn try_setup(&mut self, leftover: f64, probe: &impl LayoutProbe, stage: &mut Stage) {
        let Some(state) =
            MarqueeState::compute(probe.content_width(), probe.viewport_width(), &self.config)
        else {
            tracing::trace!(strip = self.strip.0, "marquee content not laid out; retrying");
            self.phase = Phase::Waiting {
                retry_in: self.config.retry_delay_sec,
            };
            return;
        };
        self.repetitions = state.repetition_count;
        let handle = AnimationHandle::new();
        handle.start();
        tracing::debug!(
            strip = self.strip.0,
            repetitions = state.repetition_count,
            content_width = state.content_width_px,
            "marquee started"
        );
        let x = state.offset_at(leftover);
        stage.update_state(self.strip, |s| s.translate.x = x);
        self.phase = Phase::Running {
            state,
            elapsed: leftover,
            handle,
        };
    }

    /// Stop the loop for good. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.kill_running();
        self.phase = Phase::Stopped;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/marquee/runner.rs"]
mod tests;
