use super::*;
use crate::{
    config::motion::MotionConfig,
    foundation::core::Rect,
    page::scroll::DirectScroll,
    reveal::section::HeaderElements,
};

const WIDE: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

fn elements(stage: &mut Stage) -> PageElements {
    let full = Rect::new(0.0, 0.0, 1280.0, 800.0);
    let preloader = PreloaderElements {
        container: stage.mount(full),
        top: stage.mount(Rect::new(0.0, 0.0, 1280.0, 400.0)),
        bottom: stage.mount(Rect::new(0.0, 400.0, 1280.0, 800.0)),
    };
    let hero = HeroElements {
        tagline: stage.mount(Rect::new(0.0, 200.0, 1280.0, 240.0)),
        name: stage.mount(Rect::new(0.0, 300.0, 1280.0, 500.0)),
        footer: stage.mount(Rect::new(0.0, 700.0, 1280.0, 760.0)),
    };
    let work = WorkElements {
        header: HeaderElements {
            header: stage.mount(Rect::new(0.0, 1000.0, 1280.0, 1060.0)),
            line: stage.mount(Rect::new(200.0, 1020.0, 1100.0, 1022.0)),
        },
        hero: stage.mount(Rect::new(0.0, 1100.0, 1280.0, 1400.0)),
        hero_lines: vec![
            stage.mount(Rect::new(0.0, 1100.0, 1280.0, 1200.0)),
            stage.mount(Rect::new(0.0, 1200.0, 1280.0, 1300.0)),
        ],
    };
    let menu = vec![MenuRowElements {
        row: stage.mount(Rect::new(0.0, 1500.0, 1280.0, 1620.0)),
        overlay: stage.mount(Rect::new(0.0, 1500.0, 1280.0, 1620.0)),
        inner: stage.mount(Rect::new(0.0, 1500.0, 1280.0, 1620.0)),
        content: MarqueeContent::new("Project Alpha", "alpha.jpg"),
    }];
    PageElements {
        preloader,
        hero,
        work: Some(work),
        about: None,
        contact: None,
        menu,
    }
}

fn mount(viewport: Viewport) -> (Stage, Page, PageElements, DirectScroll) {
    let runtime = Runtime::new(MotionConfig::default()).unwrap();
    let mut stage = Stage::new();
    let el = elements(&mut stage);
    let scroll = DirectScroll::new();
    let page = Page::mount(
        &runtime,
        el.clone(),
        viewport,
        Box::new(scroll.clone()),
        &mut stage,
    )
    .unwrap();
    (stage, page, el, scroll)
}

fn run(page: &mut Page, stage: &mut Stage, secs: f64) {
    let steps = (secs * 60.0).ceil() as usize;
    for _ in 0..steps {
        page.frame(1.0 / 60.0, stage);
    }
}

#[test]
fn scroll_and_reveals_wait_for_the_preloader() {
    let (mut stage, mut page, el, scroll) = mount(WIDE);
    scroll.scroll_to(900.0);
    run(&mut page, &mut stage, 1.0);
    assert_eq!(page.phase(), PagePhase::Loading);
    assert!(!page.is_scroll_enabled());
    assert_eq!(page.scroll_y(), 0.0);
    assert_eq!(page.section(0).unwrap().is_group_revealed(0), Some(false));

    run(&mut page, &mut stage, 3.0);
    assert_eq!(page.phase(), PagePhase::Live);
    assert_eq!(page.scroll_y(), 900.0);
    assert!(!stage.state(el.preloader.container).unwrap().visible);

    run(&mut page, &mut stage, 3.0);
    assert!(page.hero().is_complete());
    assert_eq!(page.section(0).unwrap().is_group_revealed(0), Some(true));
    assert_eq!(
        stage.state(el.work.as_ref().unwrap().header.header).unwrap(),
        crate::foundation::core::VisualState::default()
    );
}

#[test]
fn profile_is_fixed_at_mount() {
    let narrow = Viewport {
        width: 390.0,
        height: 844.0,
    };
    let (_stage, mut page, _, _) = mount(narrow);
    assert_eq!(page.profile(), AnimationProfile::narrow());
    page.resize(WIDE);
    assert_eq!(page.profile(), AnimationProfile::narrow());
    assert_eq!(page.viewport(), WIDE);
}

#[test]
fn marquee_follows_measured_width_and_resizes() {
    let (mut stage, mut page, el, _) = mount(WIDE);
    run(&mut page, &mut stage, 0.2);
    assert_eq!(page.row_repetitions(0), Some(4));

    assert!(page.set_row_content_width(0, 400.0));
    run(&mut page, &mut stage, 0.2);
    assert_eq!(page.row_repetitions(0), Some(6));
    assert!(stage.state(el.menu[0].inner).unwrap().translate.x < 0.0);

    page.resize(Viewport {
        width: 3000.0,
        height: 800.0,
    });
    assert_eq!(page.row_repetitions(0), Some(10));
    assert!(!page.set_row_content_width(5, 1.0));
}

#[test]
fn hover_uses_row_local_coordinates() {
    let (mut stage, mut page, el, _) = mount(WIDE);
    let edge = page
        .pointer_enter(0, Point::new(640.0, 1505.0), &mut stage)
        .unwrap();
    assert_eq!(edge, Some(HoverEdge::Top));
    assert_eq!(stage.state(el.menu[0].overlay).unwrap().y_percent, -101.0);
    let edge = page
        .pointer_leave(0, Point::new(640.0, 1615.0), &mut stage)
        .unwrap();
    assert_eq!(edge, Some(HoverEdge::Bottom));
    assert!(page.pointer_enter(3, Point::ZERO, &mut stage).is_err());
}

#[test]
fn unmount_is_idempotent_and_destroys_the_driver() {
    let (mut stage, mut page, el, scroll) = mount(WIDE);
    run(&mut page, &mut stage, 4.0);
    page.unmount(&mut stage);
    page.unmount(&mut stage);
    assert_eq!(page.phase(), PagePhase::Unmounted);
    assert!(scroll.is_destroyed());

    let before = stage.state(el.hero.name).unwrap();
    run(&mut page, &mut stage, 1.0);
    assert_eq!(stage.state(el.hero.name).unwrap(), before);
}

#[test]
fn pointer_events_after_unmount_are_ignored() {
    let (mut stage, mut page, el, _) = mount(WIDE);
    page.unmount(&mut stage);
    let before = stage.state(el.menu[0].overlay).unwrap();
    let edge = page
        .pointer_enter(0, Point::new(640.0, 1505.0), &mut stage)
        .unwrap();
    assert_eq!(edge, None);
    let edge = page
        .pointer_leave(0, Point::new(640.0, 1615.0), &mut stage)
        .unwrap();
    assert_eq!(edge, None);
    assert_eq!(stage.state(el.menu[0].overlay).unwrap(), before);
}
