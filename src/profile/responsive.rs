use crate::{
    animation::ease::Ease,
    foundation::error::{MotionResult, ensure_non_negative, ensure_positive},
};

/// Motion parameters for one breakpoint.
///
/// Components express their own timings as multiples of these base values, so a single
/// profile swap scales the whole page.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationProfile {
    /// Base travel distance in px.
    pub distance_px: f64,
    /// Base duration in seconds.
    pub duration_sec: f64,
    /// Base interval between staggered targets in seconds.
    pub stagger_sec: f64,
    pub easing: Ease,
}

impl AnimationProfile {
    pub fn wide() -> Self {
        Self {
            distance_px: 40.0,
            duration_sec: 1.0,
            stagger_sec: 0.15,
            easing: Ease::OutQuart,
        }
    }

    pub fn narrow() -> Self {
        Self {
            distance_px: 20.0,
            duration_sec: 0.7,
            stagger_sec: 0.09,
            easing: Ease::OutQuart,
        }
    }

    pub fn distance(&self, factor: f64) -> f64 {
        self.distance_px * factor
    }

    pub fn duration(&self, factor: f64) -> f64 {
        self.duration_sec * factor
    }

    pub fn stagger(&self, factor: f64) -> f64 {
        self.stagger_sec * factor
    }

    pub fn validate(&self) -> MotionResult<()> {
        ensure_non_negative("profile distance_px", self.distance_px)?;
        ensure_positive("profile duration_sec", self.duration_sec)?;
        ensure_non_negative("profile stagger_sec", self.stagger_sec)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ViewportClass {
    Narrow,
    Wide,
}

/// The breakpoint and the two profiles it picks between.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ResponsiveProfiles {
    /// Widths at or below this are narrow (same as a `max-width` media query).
    pub breakpoint_px: f64,
    pub wide: AnimationProfile,
    pub narrow: AnimationProfile,
}

impl Default for ResponsiveProfiles {
    fn default() -> Self {
        Self {
            breakpoint_px: 768.0,
            wide: AnimationProfile::wide(),
            narrow: AnimationProfile::narrow(),
        }
    }
}

impl ResponsiveProfiles {
    pub fn classify(&self, viewport_width: f64) -> ViewportClass {
        if viewport_width <= self.breakpoint_px {
            ViewportClass::Narrow
        } else {
            ViewportClass::Wide
        }
    }

    /// Pick the profile for a mount. Callers keep the result for the mount's lifetime.
    pub fn select(&self, viewport_width: f64) -> AnimationProfile {
        match self.classify(viewport_width) {
            ViewportClass::Narrow => self.narrow,
            ViewportClass::Wide => self.wide,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        ensure_positive("breakpoint_px", self.breakpoint_px)?;
        self.wide.validate()?;
        self.narrow.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/profile/responsive.rs"]
mod tests;
