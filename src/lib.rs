//! Folio Motion is the animation choreography core of a single-page portfolio site.
//!
//! Everything is deterministic and host-independent: the document is a [`Stage`] of
//! element handles, and the host drives components with explicit time steps, scroll
//! positions, viewport sizes and pointer events.
//!
//! - Mount a [`Page`] against a validated [`Runtime`]
//! - Call [`Page::frame`] once per display frame
//! - Read back element [`VisualState`]s and draw them
//!
//! Components are usable on their own as well: [`Preloader`], [`Timeline`],
//! [`SectionReveal`], [`MarqueeLoop`] and [`EdgeAwareHover`].
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod hover;
pub(crate) mod intro;
pub(crate) mod marquee;
pub(crate) mod page;
pub(crate) mod profile;
pub(crate) mod reveal;
pub(crate) mod stage;

pub use crate::foundation::core::{ElementId, Point, Rect, Size, Vec2, Viewport, VisualState};
pub use crate::foundation::error::{MotionError, MotionResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::handle::{AnimationHandle, CancelScope, HandleState};
pub use crate::animation::playback::{Direction, Playback};
pub use crate::animation::timeline::{Position, SequenceStep, Timeline, TimelineBuilder};
pub use crate::animation::tween::{Lerp, Stagger, Tween};
pub use crate::config::motion::MotionConfig;
pub use crate::config::runtime::Runtime;
pub use crate::hover::edge::{HoverEdge, classify_edge};
pub use crate::hover::wipe::{EdgeAwareHover, HoverConfig};
pub use crate::intro::decrypt::{SCRAMBLE_GLYPHS, is_settled};
pub use crate::intro::hero::{HERO_DELAY_SEC, HeroElements, hero_timeline};
pub use crate::intro::preloader::{
    LogoReveal, Preloader, PreloaderConfig, PreloaderElements, PreloaderFrame, PreloaderPhase,
};
pub use crate::marquee::repeat::{MarqueeConfig, MarqueeContent, MarqueeState, repetition_count};
pub use crate::marquee::runner::{FixedLayout, LayoutProbe, MarqueeLoop};
pub use crate::page::mount::{MenuRowElements, Page, PageElements, PagePhase};
pub use crate::page::scroll::{DirectScroll, ScrollDriver};
pub use crate::profile::responsive::{AnimationProfile, ResponsiveProfiles, ViewportClass};
pub use crate::reveal::observer::{
    ObserveOptions, ObserverId, RevealCallback, RevealChange, RevealEngine, RevealPolicy,
    RevealTarget, intersection_ratio,
};
pub use crate::reveal::section::{
    AboutElements, ContactElements, HeaderElements, RevealGroup, SectionReveal, WorkElements,
    about_groups, contact_groups, work_groups,
};
pub use crate::stage::tree::Stage;
