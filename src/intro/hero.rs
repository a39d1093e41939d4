use crate::{
    animation::ease::Ease,
    animation::timeline::{Position, SequenceStep, Timeline},
    foundation::core::{ElementId, VisualState},
    foundation::error::MotionResult,
    profile::responsive::AnimationProfile,
};

/// Delay between the preloader finishing and the first hero step.
pub const HERO_DELAY_SEC: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeroElements {
    pub tagline: ElementId,
    pub name: ElementId,
    pub footer: ElementId,
}

/// Landing intro: tagline drops in, the name rises through it, the footer follows.
///
/// Distances and durations scale with `profile`; overlaps scale with the durations so the
/// rhythm is the same on every breakpoint.
pub fn hero_timeline(profile: &AnimationProfile, el: HeroElements) -> MotionResult<Timeline> {
    let d = profile.distance_px;
    let step = |target, dy: f64, duration: f64, ease| {
        SequenceStep::new(
            target,
            VisualState::hidden_offset(0.0, dy),
            VisualState::default(),
            profile.duration(duration),
            ease,
        )
    };
    Timeline::builder()
        .delay(HERO_DELAY_SEC)
        .step(step(el.tagline, -d, 1.0, Ease::OutCubic))
        .step(
            step(el.name, 2.0 * d, 1.2, Ease::OutQuart).at(Position::AfterPrevious {
                offset_sec: -profile.duration(0.5),
            }),
        )
        .step(
            step(el.footer, 0.75 * d, 0.8, Ease::OutCubic).at(Position::AfterPrevious {
                offset_sec: -profile.duration(0.8),
            }),
        )
        .build()
}

#[cfg(test)]
#[path = "../../tests/unit/intro/hero.rs"]
mod tests;
