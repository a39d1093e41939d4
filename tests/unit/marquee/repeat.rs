use super::*;

#[test]
fn count_covers_viewport_with_margin() {
    let cfg = MarqueeConfig::default();
    // 1920 / 300 = 6.4 -> 7, plus 2.
    assert_eq!(repetition_count(300.0, 1920.0, &cfg), Some(9));
    // Wide content still gets the floor.
    assert_eq!(repetition_count(2000.0, 1280.0, &cfg), Some(4));
}

#[test]
fn count_invariants_hold_across_widths() {
    let cfg = MarqueeConfig::default();
    for content in [1.0, 7.5, 120.0, 333.3, 999.0, 4096.0] {
        for vw in 0..=80 {
            let viewport = f64::from(vw) * 37.0;
            let n = repetition_count(content, viewport, &cfg).unwrap();
            assert!(n >= cfg.min_repetitions);
            assert!(f64::from(n) * content >= viewport, "{content} {viewport} {n}");
        }
    }
}

#[test]
fn unmeasured_content_yields_none() {
    let cfg = MarqueeConfig::default();
    assert_eq!(repetition_count(0.0, 1280.0, &cfg), None);
    assert_eq!(repetition_count(-3.0, 1280.0, &cfg), None);
    assert_eq!(repetition_count(f64::NAN, 1280.0, &cfg), None);
    assert_eq!(repetition_count(100.0, f64::INFINITY, &cfg), None);
}

#[test]
fn offset_wraps_at_exactly_one_content_width() {
    let cfg = MarqueeConfig::default();
    let s = MarqueeState::compute(400.0, 1280.0, &cfg).unwrap();
    assert_eq!(s.offset_at(0.0), 0.0);
    assert_eq!(s.offset_at(7.5), -200.0);
    assert_eq!(s.offset_at(15.0), 0.0);
    assert_eq!(s.offset_at(22.5), -200.0);
    assert!(s.rendered_width() > s.viewport_width_px);
}

#[test]
fn duration_is_fixed_so_longer_content_is_faster() {
    let cfg = MarqueeConfig::default();
    let short = MarqueeState::compute(200.0, 1280.0, &cfg).unwrap();
    let long = MarqueeState::compute(800.0, 1280.0, &cfg).unwrap();
    assert_eq!(short.loop_duration_sec, long.loop_duration_sec);
    assert!(long.speed_px_per_sec() > short.speed_px_per_sec());
}

#[test]
fn identity_tracks_text_and_image() {
    let a = MarqueeContent::new("Project Alpha", "alpha.jpg");
    let b = MarqueeContent::new("Project Alpha", "beta.jpg");
    assert_ne!(a.identity(), b.identity());
    assert_eq!(a.identity(), a.clone().identity());
}

#[test]
fn config_validation() {
    assert!(MarqueeConfig::default().validate().is_ok());
    let bad = MarqueeConfig {
        min_repetitions: 0,
        ..MarqueeConfig::default()
    };
    assert!(bad.validate().is_err());
}
