use super::*;

#[test]
fn viewport_rejects_negative_and_nan() {
    assert!(Viewport::new(1280.0, 800.0).is_ok());
    assert!(Viewport::new(0.0, 0.0).is_ok());
    assert!(Viewport::new(-1.0, 800.0).is_err());
    assert!(Viewport::new(1280.0, f64::NAN).is_err());
}

#[test]
fn document_rect_follows_scroll() {
    let vp = Viewport::new(1000.0, 600.0).unwrap();
    let r = vp.document_rect(250.0);
    assert_eq!(r, Rect::new(0.0, 250.0, 1000.0, 850.0));
}

#[test]
fn visual_state_builders_compose() {
    let s = VisualState::hidden_offset(0.0, 40.0)
        .with_scale(0.9)
        .with_rotate_x(45.0);
    assert_eq!(s.opacity, 0.0);
    assert_eq!(s.translate, Vec2::new(0.0, 40.0));
    assert_eq!(s.scale, 0.9);
    assert_eq!(s.rotate_x_deg, 45.0);
    assert!(s.visible);
    assert!(s.interactive);
}

#[test]
fn element_ids_order_by_value() {
    let mut ids = vec![ElementId(3), ElementId(1), ElementId(2)];
    ids.sort();
    assert_eq!(ids, vec![ElementId(1), ElementId(2), ElementId(3)]);
}
