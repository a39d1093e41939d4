use crate::{
    animation::timeline::Timeline,
    config::runtime::Runtime,
    foundation::core::{ElementId, Point, Size, Viewport},
    foundation::error::{MotionError, MotionResult},
    hover::edge::HoverEdge,
    hover::wipe::EdgeAwareHover,
    intro::hero::{HeroElements, hero_timeline},
    intro::preloader::{Preloader, PreloaderElements, PreloaderFrame},
    marquee::repeat::MarqueeContent,
    marquee::runner::{FixedLayout, MarqueeLoop},
    page::scroll::ScrollDriver,
    profile::responsive::AnimationProfile,
    reveal::section::{
        AboutElements, ContactElements, SectionReveal, WorkElements, about_groups,
        contact_groups, work_groups,
    },
    stage::tree::Stage,
};

/// One project row of the flowing menu.
///
/// `overlay` is the mask that wipes in on hover; `inner` carries the repeated marquee content
/// and is both the hover's counter-moving layer and the marquee's strip.
#[derive(Clone, Debug)]
pub struct MenuRowElements {
    pub row: ElementId,
    pub overlay: ElementId,
    pub inner: ElementId,
    pub content: MarqueeContent,
}

/// Everything the page animates, collected by the host when it builds the document.
#[derive(Clone, Debug)]
pub struct PageElements {
    pub preloader: PreloaderElements,
    pub hero: HeroElements,
    pub work: Option<WorkElements>,
    pub about: Option<AboutElements>,
    pub contact: Option<ContactElements>,
    pub menu: Vec<MenuRowElements>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum PagePhase {
    /// Preloader on screen; scroll locked, reveals dormant.
    Loading,
    Live,
    Unmounted,
}

#[derive(Debug)]
struct MenuRow {
    row: ElementId,
    marquee: MarqueeLoop,
    hover: EdgeAwareHover,
    content_width_px: f64,
}

/// The mounted page: owns every component and drives them from one frame clock.
pub struct Page {
    profile: AnimationProfile,
    viewport: Viewport,
    driver: Box<dyn ScrollDriver>,
    preloader: Preloader,
    hero: Timeline,
    sections: Vec<SectionReveal>,
    rows: Vec<MenuRow>,
    phase: PagePhase,
    clock_ms: f64,
    scroll_y: f64,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("phase", &self.phase)
            .field("viewport", &self.viewport)
            .field("scroll_y", &self.scroll_y)
            .field("sections", &self.sections.len())
            .field("rows", &self.rows.len())
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Build every component. The profile is picked here, once, from `viewport`.
    #[tracing::instrument(skip_all, fields(width = viewport.width, height = viewport.height))]
    pub fn mount(
        runtime: &Runtime,
        elements: PageElements,
        viewport: Viewport,
        driver: Box<dyn ScrollDriver>,
        stage: &mut Stage,
    ) -> MotionResult<Self> {
        let config = runtime.config();
        let profile = config.profiles.select(viewport.width);
        tracing::debug!(
            class = ?config.profiles.classify(viewport.width),
            distance_px = profile.distance_px,
            "profile selected"
        );

        let preloader = Preloader::new(elements.preloader, config.preloader.clone(), stage)?;
        let hero = hero_timeline(&profile, elements.hero)?;

        let mut sections = Vec::new();
        if let Some(el) = elements.work {
            sections.push(SectionReveal::mount(
                work_groups(&profile, el)?,
                config.reveal,
                stage,
            )?);
        }
        if let Some(el) = elements.about {
            sections.push(SectionReveal::mount(
                about_groups(&profile, el)?,
                config.reveal,
                stage,
            )?);
        }
        if let Some(el) = elements.contact {
            sections.push(SectionReveal::mount(
                contact_groups(&profile, el)?,
                config.reveal,
                stage,
            )?);
        }

        let rows = elements
            .menu
            .into_iter()
            .map(|row| {
                Ok::<_, MotionError>(MenuRow {
                    row: row.row,
                    marquee: MarqueeLoop::new(row.inner, &row.content, config.marquee)?,
                    hover: EdgeAwareHover::new(row.overlay, row.inner, config.hover, stage)?,
                    content_width_px: 0.0,
                })
            })
            .collect::<MotionResult<Vec<_>>>()?;

        Ok(Self {
            profile,
            viewport,
            driver,
            preloader,
            hero,
            sections,
            rows,
            phase: PagePhase::Loading,
            clock_ms: 0.0,
            scroll_y: 0.0,
        })
    }

    pub fn phase(&self) -> PagePhase {
        self.phase
    }

    pub fn profile(&self) -> AnimationProfile {
        self.profile
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn is_scroll_enabled(&self) -> bool {
        self.phase == PagePhase::Live
    }

    pub fn preloader_frame(&self, stage: &Stage) -> PreloaderFrame {
        self.preloader.frame(stage)
    }

    pub fn hero(&self) -> &Timeline {
        &self.hero
    }

    pub fn section(&self, index: usize) -> Option<&SectionReveal> {
        self.sections.get(index)
    }

    pub fn row_repetitions(&self, index: usize) -> Option<u32> {
        self.rows.get(index).map(|r| r.marquee.repetition_count())
    }

    /// Record the measured width of one unrepeated block of a row's marquee content.
    pub fn set_row_content_width(&mut self, index: usize, width_px: f64) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        row.content_width_px = width_px;
        true
    }

    pub fn set_row_content(&mut self, index: usize, content: &MarqueeContent) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        row.marquee.set_content(content);
        true
    }

    /// Advance every component by `dt` seconds.
    pub fn frame(&mut self, dt: f64, stage: &mut Stage) {
        if self.phase == PagePhase::Unmounted {
            return;
        }
        let dt = dt.max(0.0);
        self.clock_ms += dt * 1000.0;

        match self.phase {
            PagePhase::Loading => {
                if self.preloader.advance(dt, stage) {
                    self.go_live(stage);
                }
            }
            PagePhase::Live => {
                self.hero.advance(dt, stage);
                self.scroll_y = self.driver.raf(self.clock_ms);
                for section in &mut self.sections {
                    section.on_scroll(stage, self.viewport, self.scroll_y);
                    section.advance(dt, stage);
                }
            }
            PagePhase::Unmounted => {}
        }

        let viewport_width = self.viewport.width;
        for row in &mut self.rows {
            let probe = FixedLayout {
                content_width: row.content_width_px,
                viewport_width,
            };
            row.marquee.advance(dt, &probe, stage);
            row.hover.advance(dt, stage);
        }
    }

    fn go_live(&mut self, stage: &mut Stage) {
        self.phase = PagePhase::Live;
        self.hero.start(stage);
        self.scroll_y = self.driver.raf(self.clock_ms);
        for section in &mut self.sections {
            section.on_scroll(stage, self.viewport, self.scroll_y);
        }
        tracing::debug!(at_ms = self.clock_ms, "page live");
    }

    /// New host size. Marquees re-measure; the motion profile stays as mounted.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.phase == PagePhase::Unmounted {
            return;
        }
        self.viewport = viewport;
        for row in &mut self.rows {
            row.marquee.on_resize(&FixedLayout {
                content_width: row.content_width_px,
                viewport_width: viewport.width,
            });
        }
    }

    /// Pointer entered row `index` at `point` (document coordinates).
    ///
    /// Returns `None` once the page is unmounted; the event is ignored.
    pub fn pointer_enter(
        &mut self,
        index: usize,
        point: Point,
        stage: &mut Stage,
    ) -> MotionResult<Option<HoverEdge>> {
        let Some((row, local, size)) = self.row_local(index, point, stage)? else {
            return Ok(None);
        };
        Ok(Some(row.hover.on_pointer_enter(local, size, stage)))
    }

    pub fn pointer_leave(
        &mut self,
        index: usize,
        point: Point,
        stage: &mut Stage,
    ) -> MotionResult<Option<HoverEdge>> {
        let Some((row, local, size)) = self.row_local(index, point, stage)? else {
            return Ok(None);
        };
        Ok(Some(row.hover.on_pointer_leave(local, size, stage)))
    }

    fn row_local(
        &mut self,
        index: usize,
        point: Point,
        stage: &Stage,
    ) -> MotionResult<Option<(&mut MenuRow, Point, Size)>> {
        if self.phase == PagePhase::Unmounted {
            return Ok(None);
        }
        let row = self
            .rows
            .get_mut(index)
            .ok_or_else(|| MotionError::validation(format!("no menu row {index}")))?;
        let rect = stage.rect(row.row).unwrap_or_default();
        let local = Point::new(point.x - rect.x0, point.y - rect.y0);
        Ok(Some((row, local, rect.size())))
    }

    /// Halt and revert everything, then destroy the scroll driver. Safe to call repeatedly.
    pub fn unmount(&mut self, stage: &mut Stage) {
        if self.phase == PagePhase::Unmounted {
            return;
        }
        self.phase = PagePhase::Unmounted;
        self.preloader.cancel(stage);
        self.hero.cancel(stage);
        for section in &mut self.sections {
            section.teardown();
        }
        for row in &mut self.rows {
            row.marquee.teardown();
            row.hover.teardown();
        }
        self.driver.destroy();
        tracing::debug!("page unmounted");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/mount.rs"]
mod tests;
