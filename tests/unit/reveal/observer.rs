use super::*;
use std::{cell::RefCell, rc::Rc};

const VIEWPORT: Viewport = Viewport {
    width: 1000.0,
    height: 800.0,
};

/// A 200px tall block whose top sits at y=1000 in the document.
fn block(stage: &mut Stage) -> ElementId {
    stage.mount(Rect::new(0.0, 1000.0, 1000.0, 1200.0))
}

fn opts(policy: RevealPolicy) -> ObserveOptions {
    ObserveOptions {
        threshold: 0.15,
        root_margin_bottom_px: -50.0,
        policy,
    }
}

#[test]
fn ratio_handles_partial_and_disjoint_rects() {
    let root = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(intersection_ratio(Rect::new(0.0, 50.0, 100.0, 150.0), root), 0.5);
    assert_eq!(intersection_ratio(Rect::new(0.0, 200.0, 100.0, 300.0), root), 0.0);
    assert_eq!(intersection_ratio(Rect::new(10.0, 10.0, 20.0, 20.0), root), 1.0);
    assert_eq!(intersection_ratio(Rect::new(5.0, 5.0, 5.0, 5.0), root), 1.0);
}

#[test]
fn reversible_reveal_toggles_both_ways() {
    let mut stage = Stage::new();
    let el = block(&mut stage);
    let mut engine = RevealEngine::new();
    let id = engine.watch(el, opts(RevealPolicy::Reversible)).unwrap();

    // Root bottom = scroll + 800 - 50. Needs 30px (15%) of the block inside.
    assert!(engine.tick(&stage, VIEWPORT, 0.0).is_empty());
    assert_eq!(engine.is_revealed(id), Some(false));

    assert!(engine.tick(&stage, VIEWPORT, 270.0).is_empty());
    let changes = engine.tick(&stage, VIEWPORT, 290.0);
    assert_eq!(changes.len(), 1);
    assert!(changes[0].revealed);
    assert_eq!(engine.is_revealed(id), Some(true));

    let changes = engine.tick(&stage, VIEWPORT, 100.0);
    assert_eq!(changes.len(), 1);
    assert!(!changes[0].revealed);
    assert_eq!(engine.is_revealed(id), Some(false));

    assert_eq!(engine.tick(&stage, VIEWPORT, 600.0).len(), 1);
    assert_eq!(engine.is_revealed(id), Some(true));
}

#[test]
fn one_shot_reveal_stays_revealed() {
    let mut stage = Stage::new();
    let el = block(&mut stage);
    let mut engine = RevealEngine::new();
    let id = engine.watch(el, opts(RevealPolicy::OneShot)).unwrap();
    engine.tick(&stage, VIEWPORT, 600.0);
    assert_eq!(engine.is_revealed(id), Some(true));
    assert!(engine.tick(&stage, VIEWPORT, 0.0).is_empty());
    assert!(engine.tick(&stage, VIEWPORT, 600.0).is_empty());
    assert_eq!(engine.is_revealed(id), Some(true));
}

#[test]
fn callbacks_fire_on_every_crossing() {
    let mut stage = Stage::new();
    let el = block(&mut stage);
    let mut engine = RevealEngine::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let enter_log = log.clone();
    let exit_log = log.clone();
    engine
        .observe(
            el,
            opts(RevealPolicy::Reversible),
            move |_| enter_log.borrow_mut().push("enter"),
            Some(Box::new(move |_| exit_log.borrow_mut().push("exit"))),
        )
        .unwrap();
    for scroll in [0.0, 600.0, 0.0, 600.0, 0.0] {
        engine.tick(&stage, VIEWPORT, scroll);
    }
    assert_eq!(*log.borrow(), vec!["enter", "exit", "enter", "exit"]);
}

#[test]
fn unobserve_drops_pending_records() {
    let mut stage = Stage::new();
    let el = block(&mut stage);
    let mut engine = RevealEngine::new();
    let fired = Rc::new(RefCell::new(0));
    let f = fired.clone();
    let id = engine
        .observe(el, opts(RevealPolicy::Reversible), move |_| *f.borrow_mut() += 1, None)
        .unwrap();
    assert_eq!(engine.update(&stage, VIEWPORT, 600.0), 1);
    assert_eq!(engine.pending(), 1);

    // Section unmounts before the host delivers.
    assert!(engine.unobserve(id));
    assert!(!engine.unobserve(id));
    stage.unmount(el);
    assert_eq!(engine.pending(), 0);
    assert!(engine.deliver().is_empty());
    assert_eq!(*fired.borrow(), 0);
}

#[test]
fn unmounted_targets_produce_no_records() {
    let mut stage = Stage::new();
    let el = block(&mut stage);
    let mut engine = RevealEngine::new();
    engine.watch(el, ObserveOptions::default()).unwrap();
    stage.unmount(el);
    assert_eq!(engine.update(&stage, VIEWPORT, 600.0), 0);
}

#[test]
fn invalid_threshold_is_rejected() {
    let mut engine = RevealEngine::new();
    let bad = ObserveOptions {
        threshold: 1.2,
        ..ObserveOptions::default()
    };
    assert!(engine.watch(ElementId(0), bad).is_err());
    assert!(engine.is_empty());
}

#[test]
fn zero_threshold_needs_actual_overlap() {
    let mut stage = Stage::new();
    let el = block(&mut stage);
    let mut engine = RevealEngine::new();
    let id = engine
        .watch(
            el,
            ObserveOptions {
                threshold: 0.0,
                root_margin_bottom_px: 0.0,
                policy: RevealPolicy::Reversible,
            },
        )
        .unwrap();
    engine.tick(&stage, VIEWPORT, 200.0);
    assert_eq!(engine.is_revealed(id), Some(false));
    engine.tick(&stage, VIEWPORT, 201.0);
    assert_eq!(engine.is_revealed(id), Some(true));
}
