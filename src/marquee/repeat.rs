use crate::{
    foundation::error::{MotionError, MotionResult, ensure_positive},
    foundation::math::Fnv1a64,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    /// Floor on copies, covering a zero-ish first measurement.
    pub min_repetitions: u32,
    /// Extra copies beyond what the viewport strictly needs.
    pub safety_margin: u32,
    /// Time to travel one content width. Independent of content length.
    pub loop_duration_sec: f64,
    /// Wait before (re)measuring when the content has no width yet.
    pub retry_delay_sec: f64,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            min_repetitions: 4,
            safety_margin: 2,
            loop_duration_sec: 15.0,
            retry_delay_sec: 0.05,
        }
    }
}

impl MarqueeConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if self.min_repetitions == 0 {
            return Err(MotionError::validation("marquee min_repetitions must be > 0"));
        }
        ensure_positive("marquee loop_duration_sec", self.loop_duration_sec)?;
        ensure_positive("marquee retry_delay_sec", self.retry_delay_sec)
    }
}

/// Copies needed so the repeated strip always covers the viewport.
///
/// `None` when the content has not been laid out (zero, negative or non-finite width).
pub fn repetition_count(
    content_width: f64,
    viewport_width: f64,
    cfg: &MarqueeConfig,
) -> Option<u32> {
    if !content_width.is_finite() || content_width <= 0.0 || !viewport_width.is_finite() {
        return None;
    }
    let needed = (viewport_width.max(0.0) / content_width).ceil();
    // Saturating float-to-int cast; a hair-thin block can ask for an absurd count.
    let needed = (needed as u32).saturating_add(cfg.safety_margin);
    Some(needed.max(cfg.min_repetitions))
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MarqueeState {
    pub content_width_px: f64,
    pub viewport_width_px: f64,
    pub repetition_count: u32,
    pub loop_duration_sec: f64,
}

impl MarqueeState {
    pub fn compute(content_width: f64, viewport_width: f64, cfg: &MarqueeConfig) -> Option<Self> {
        let repetition_count = repetition_count(content_width, viewport_width, cfg)?;
        Some(Self {
            content_width_px: content_width,
            viewport_width_px: viewport_width,
            repetition_count,
            loop_duration_sec: cfg.loop_duration_sec,
        })
    }

    pub fn rendered_width(&self) -> f64 {
        self.content_width_px * f64::from(self.repetition_count)
    }

    /// Horizontal offset `elapsed` seconds into the loop: linear from `0` toward
    /// `-content_width`, wrapping exactly at one content width.
    pub fn offset_at(&self, elapsed: f64) -> f64 {
        let phase = elapsed.rem_euclid(self.loop_duration_sec) / self.loop_duration_sec;
        -phase * self.content_width_px
    }

    /// Apparent speed in px/s; longer content moves faster at the same duration.
    pub fn speed_px_per_sec(&self) -> f64 {
        self.content_width_px / self.loop_duration_sec
    }
}

/// What a marquee row shows. A change of identity forces a re-measure.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MarqueeContent {
    pub text: String,
    pub image: String,
}

impl MarqueeContent {
    pub fn new(text: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: image.into(),
        }
    }

    pub fn identity(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_str(&self.text);
        h.write_str(&self.image);
        h.finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/marquee/repeat.rs"]
mod tests;
