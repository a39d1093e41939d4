use crate::{
    animation::{
        ease::Ease,
        handle::CancelScope,
        playback::Playback,
        tween::{Stagger, Tween},
    },
    foundation::core::{ElementId, Viewport, VisualState},
    foundation::error::MotionResult,
    profile::responsive::AnimationProfile,
    reveal::observer::{ObserveOptions, ObserverId, RevealEngine},
    stage::tree::Stage,
};

/// Targets that animate together when `trigger` crosses into view.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealGroup {
    pub trigger: ElementId,
    pub targets: Vec<ElementId>,
    /// `from` is the hidden pose, `to` the revealed one.
    pub tween: Tween,
    pub stagger_sec: f64,
}

impl RevealGroup {
    /// One target that is also its own trigger.
    pub fn single(target: ElementId, tween: Tween) -> Self {
        Self {
            trigger: target,
            targets: vec![target],
            tween,
            stagger_sec: 0.0,
        }
    }

    pub fn staggered(
        trigger: ElementId,
        targets: Vec<ElementId>,
        tween: Tween,
        stagger_sec: f64,
    ) -> Self {
        Self {
            trigger,
            targets,
            tween,
            stagger_sec,
        }
    }
}

#[derive(Debug)]
struct ActiveGroup {
    observer: ObserverId,
    playback: Playback,
}

/// Scroll-driven reveal choreography for one page section.
///
/// Each group gets its own observer. Entering plays the group forward; with the reversible
/// policy, leaving plays it back from wherever it is.
#[derive(Debug)]
pub struct SectionReveal {
    engine: RevealEngine,
    groups: Vec<ActiveGroup>,
    scope: CancelScope,
    torn_down: bool,
}

impl SectionReveal {
    /// Register every group and render the hidden poses immediately.
    ///
    /// A group without targets still observes its trigger but animates nothing.
    #[tracing::instrument(skip_all, fields(groups = groups.len()))]
    pub fn mount(
        groups: Vec<RevealGroup>,
        options: ObserveOptions,
        stage: &mut Stage,
    ) -> MotionResult<Self> {
        let mut engine = RevealEngine::new();
        let mut active = Vec::with_capacity(groups.len());
        let mut scope = CancelScope::new();
        for group in groups {
            if group.targets.is_empty() {
                tracing::debug!(trigger = ?group.trigger, "reveal group has no targets");
            }
            let observer = engine.watch(group.trigger, options)?;
            let playback = Playback::new(
                group.targets,
                Stagger::new(group.tween, group.stagger_sec)?,
            );
            playback.render(stage);
            scope.track(playback.handle());
            active.push(ActiveGroup { observer, playback });
        }
        Ok(Self {
            engine,
            groups: active,
            scope,
            torn_down: false,
        })
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_group_revealed(&self, index: usize) -> Option<bool> {
        let g = self.groups.get(index)?;
        self.engine.is_revealed(g.observer)
    }

    /// Playback position of a group, in seconds.
    pub fn group_position(&self, index: usize) -> Option<f64> {
        self.groups.get(index).map(|g| g.playback.position())
    }

    /// Feed a scroll position. Records are applied on the next [`SectionReveal::advance`].
    pub fn on_scroll(&mut self, stage: &Stage, viewport: Viewport, scroll_y: f64) {
        if self.torn_down {
            return;
        }
        self.engine.update(stage, viewport, scroll_y);
    }

    pub fn advance(&mut self, dt: f64, stage: &mut Stage) {
        if self.torn_down {
            return;
        }
        for change in self.engine.deliver() {
            let Some(group) = self
                .groups
                .iter_mut()
                .find(|g| g.observer == change.observer)
            else {
                continue;
            };
            if change.revealed {
                group.playback.play();
            } else {
                group.playback.reverse();
            }
        }
        for group in &mut self.groups {
            group.playback.advance(dt, stage);
        }
    }

    /// Disconnect observers and halt playbacks. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.engine.disconnect();
        for group in &mut self.groups {
            group.playback.kill();
        }
        let halted = self.scope.cancel_all();
        tracing::debug!(halted, "section reveal torn down");
    }
}

/// Header row shared by the content sections: the label block and its growing rule.
#[derive(Clone, Copy, Debug)]
pub struct HeaderElements {
    pub header: ElementId,
    pub line: ElementId,
}

#[derive(Clone, Debug)]
pub struct WorkElements {
    pub header: HeaderElements,
    pub hero: ElementId,
    pub hero_lines: Vec<ElementId>,
}

#[derive(Clone, Debug)]
pub struct AboutElements {
    pub header: HeaderElements,
    pub headline: ElementId,
    pub headline_lines: Vec<ElementId>,
    pub bio_column: ElementId,
    pub bios: Vec<ElementId>,
    pub skills: ElementId,
    pub skills_title: ElementId,
    pub skill_cards: Vec<ElementId>,
    pub marquee: ElementId,
}

#[derive(Clone, Debug)]
pub struct ContactElements {
    pub header: HeaderElements,
    pub headline: ElementId,
    pub headline_lines: Vec<ElementId>,
    pub cta: ElementId,
    pub info: ElementId,
    pub info_blocks: Vec<ElementId>,
}

fn reveal_tween(from: VisualState, duration_sec: f64, ease: Ease) -> MotionResult<Tween> {
    Tween::new(from, VisualState::default(), duration_sec, ease)
}

fn header_groups(p: &AnimationProfile, h: HeaderElements) -> MotionResult<Vec<RevealGroup>> {
    Ok(vec![
        RevealGroup::single(
            h.header,
            reveal_tween(
                VisualState::hidden_offset(0.0, p.distance(1.0)),
                p.duration(1.0),
                Ease::OutCubic,
            )?,
        ),
        RevealGroup {
            trigger: h.header,
            targets: vec![h.line],
            tween: reveal_tween(
                VisualState::default().with_scale_x(0.0),
                p.duration(1.2),
                Ease::InOutCubic,
            )?,
            stagger_sec: 0.0,
        },
    ])
}

/// Lines rising and tilting into place, one after another.
fn line_stack(
    p: &AnimationProfile,
    trigger: ElementId,
    lines: Vec<ElementId>,
    distance: f64,
    tilt_deg: f64,
    duration: f64,
    stagger: f64,
) -> MotionResult<RevealGroup> {
    Ok(RevealGroup::staggered(
        trigger,
        lines,
        reveal_tween(
            VisualState::hidden_offset(0.0, p.distance(distance)).with_rotate_x(tilt_deg),
            p.duration(duration),
            Ease::OutQuart,
        )?,
        p.stagger(stagger),
    ))
}

pub fn work_groups(p: &AnimationProfile, el: WorkElements) -> MotionResult<Vec<RevealGroup>> {
    let mut groups = header_groups(p, el.header)?;
    groups.push(line_stack(p, el.hero, el.hero_lines, 1.5, 30.0, 1.0, 0.8)?);
    Ok(groups)
}

pub fn about_groups(p: &AnimationProfile, el: AboutElements) -> MotionResult<Vec<RevealGroup>> {
    let mut groups = header_groups(p, el.header)?;
    groups.push(line_stack(p, el.headline, el.headline_lines, 2.0, 45.0, 1.0, 1.0)?);
    groups.push(RevealGroup::staggered(
        el.bio_column,
        el.bios,
        reveal_tween(
            VisualState::hidden_offset(0.0, p.distance(1.25)),
            p.duration(0.8),
            Ease::OutCubic,
        )?,
        p.stagger(4.0 / 3.0),
    ));
    groups.push(RevealGroup {
        trigger: el.skills,
        targets: vec![el.skills_title],
        tween: reveal_tween(
            VisualState::hidden_offset(-p.distance(0.75), 0.0),
            p.duration(0.8),
            Ease::OutCubic,
        )?,
        stagger_sec: 0.0,
    });
    groups.push(RevealGroup::staggered(
        el.skills,
        el.skill_cards,
        reveal_tween(
            VisualState::hidden_offset(0.0, p.distance(1.5)).with_scale(0.9),
            p.duration(0.8),
            Ease::OutCubic,
        )?,
        p.stagger(0.8),
    ));
    groups.push(RevealGroup::single(
        el.marquee,
        reveal_tween(
            VisualState::hidden_offset(-p.distance(2.5), 0.0),
            p.duration(1.0),
            Ease::OutCubic,
        )?,
    ));
    Ok(groups)
}

pub fn contact_groups(p: &AnimationProfile, el: ContactElements) -> MotionResult<Vec<RevealGroup>> {
    let mut groups = header_groups(p, el.header)?;
    groups.push(line_stack(p, el.headline, el.headline_lines, 2.5, 40.0, 1.2, 0.8)?);
    groups.push(RevealGroup::single(
        el.cta,
        reveal_tween(
            VisualState::hidden_offset(-p.distance(2.0), 0.0),
            p.duration(1.0),
            Ease::OutCubic,
        )?,
    ));
    groups.push(RevealGroup::staggered(
        el.info,
        el.info_blocks,
        reveal_tween(
            VisualState::hidden_offset(0.0, p.distance(1.25)).with_scale(0.95),
            p.duration(0.8),
            Ease::OutCubic,
        )?,
        p.stagger(1.0),
    ));
    Ok(groups)
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/section.rs"]
mod tests;
