use std::{cell::Cell, rc::Rc};

use super::*;
use crate::foundation::core::Rect;

fn mount(config: PreloaderConfig) -> (Stage, Preloader, PreloaderElements) {
    let mut stage = Stage::new();
    let el = PreloaderElements {
        container: stage.mount(Rect::new(0.0, 0.0, 1280.0, 800.0)),
        top: stage.mount(Rect::new(0.0, 0.0, 1280.0, 400.0)),
        bottom: stage.mount(Rect::new(0.0, 400.0, 1280.0, 800.0)),
    };
    let p = Preloader::new(el, config, &mut stage).unwrap();
    (stage, p, el)
}

#[test]
fn counter_is_monotone_and_ends_at_100() {
    let (mut stage, mut p, _) = mount(PreloaderConfig::default());
    assert_eq!(p.text(), "[0]");
    let mut last = 0;
    while p.phase() == PreloaderPhase::Counting {
        p.advance(1.0 / 60.0, &mut stage);
        assert!(p.count() >= last);
        last = p.count();
        if p.phase() == PreloaderPhase::Counting {
            assert_eq!(p.text(), format!("[{last}]"));
        }
    }
    assert_eq!(p.count(), 100);
    assert_eq!(p.phase(), PreloaderPhase::Decrypting);
}

#[test]
fn decrypt_keeps_brackets_and_settles_on_the_logo() {
    let (mut stage, mut p, _) = mount(PreloaderConfig::default());
    p.advance(1.5, &mut stage);
    let mut frames = 0;
    while p.phase() == PreloaderPhase::Decrypting {
        let text: Vec<char> = p.text().chars().collect();
        assert_eq!(text.len(), 4);
        assert_eq!(text[0], '[');
        assert_eq!(text[3], ']');
        p.advance(0.05, &mut stage);
        frames += 1;
    }
    assert_eq!(frames, 15);
    assert_eq!(p.phase(), PreloaderPhase::Ready);
    assert_eq!(p.text(), "[PJ]");
}

#[test]
fn split_hides_the_container_and_fires_once() {
    let fired = Rc::new(Cell::new(0));
    let (mut stage, p, el) = mount(PreloaderConfig::default());
    let counter = Rc::clone(&fired);
    let mut p = p.on_complete(move || counter.set(counter.get() + 1));

    let mut completions = 0;
    for _ in 0..600 {
        if p.advance(1.0 / 60.0, &mut stage) {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    assert_eq!(fired.get(), 1);
    assert!(p.is_done());

    let container = stage.state(el.container).unwrap();
    assert!(!container.visible);
    assert!(!container.interactive);
    let frame = p.frame(&stage);
    assert_eq!(frame.top_y_percent, -100.0);
    assert_eq!(frame.bottom_y_percent, 100.0);
    assert_eq!(frame.text, "[PJ]");

    assert!(!p.advance(1.0, &mut stage));
    assert!(!p.cancel(&mut stage));
    assert_eq!(fired.get(), 1);
}

#[test]
fn leftover_time_carries_across_phases() {
    let (mut stage_a, mut a, _) = mount(PreloaderConfig::default());
    let (mut stage_b, mut b, _) = mount(PreloaderConfig::default());
    a.advance(1.98, &mut stage_a);
    for _ in 0..198 {
        b.advance(0.01, &mut stage_b);
    }
    assert_eq!(a.phase(), PreloaderPhase::Decrypting);
    assert_eq!(a.phase(), b.phase());
    assert_eq!(a.text(), b.text());

    // One step straight through to the end.
    let (mut stage_c, mut c, _) = mount(PreloaderConfig::default());
    assert!(c.advance(10.0, &mut stage_c));
    assert!(c.is_done());
}

#[test]
fn instant_logo_skips_decrypting() {
    let config = PreloaderConfig {
        logo_reveal: LogoReveal::Instant,
        ..PreloaderConfig::default()
    };
    let (mut stage, mut p, _) = mount(config);
    p.advance(1.6, &mut stage);
    assert_eq!(p.phase(), PreloaderPhase::Ready);
    assert_eq!(p.text(), "[PJ]");
    assert!(!p.advance(1.19, &mut stage));
    assert!(p.advance(0.02, &mut stage));
}

#[test]
fn cancel_mid_split_reverts_and_never_completes() {
    let fired = Rc::new(Cell::new(false));
    let (mut stage, p, el) = mount(PreloaderConfig::default());
    let flag = Rc::clone(&fired);
    let mut p = p.on_complete(move || flag.set(true));
    p.advance(3.0, &mut stage);
    assert_eq!(p.phase(), PreloaderPhase::Splitting);
    assert_ne!(stage.state(el.top).unwrap().y_percent, 0.0);

    assert!(p.cancel(&mut stage));
    assert!(!p.cancel(&mut stage));
    assert_eq!(stage.state(el.top).unwrap().y_percent, 0.0);
    assert_eq!(stage.state(el.bottom).unwrap().y_percent, 0.0);
    assert!(!p.advance(5.0, &mut stage));
    assert!(!fired.get());
    assert!(stage.state(el.container).unwrap().visible);
}

#[test]
fn invalid_config_is_rejected() {
    let mut stage = Stage::new();
    let el = PreloaderElements {
        container: ElementId(0),
        top: ElementId(1),
        bottom: ElementId(2),
    };
    for bad in [
        PreloaderConfig {
            count_duration_sec: 0.0,
            ..PreloaderConfig::default()
        },
        PreloaderConfig {
            logo_text: "  ".to_string(),
            ..PreloaderConfig::default()
        },
        PreloaderConfig {
            max_ticks: 0,
            ..PreloaderConfig::default()
        },
    ] {
        assert!(Preloader::new(el, bad, &mut stage).is_err());
    }
}

#[test]
fn split_ease_must_decelerate() {
    let mut cfg = PreloaderConfig::default();
    for ease in [Ease::InQuad, Ease::InOutQuart, Ease::Linear] {
        cfg.split_ease = ease;
        assert!(cfg.validate().is_err(), "{ease:?}");
    }
    cfg.split_ease = Ease::OutExpo;
    cfg.validate().unwrap();
}
