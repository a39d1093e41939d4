use super::*;

#[test]
fn new_validates() {
    let mut cfg = MotionConfig::default();
    cfg.profiles.breakpoint_px = -1.0;
    assert!(Runtime::new(cfg).is_err());
    assert!(Runtime::new(MotionConfig::default()).is_ok());
}

#[test]
fn global_installs_once() {
    let first = Runtime::global(MotionConfig::default()).unwrap();
    let mut other = MotionConfig::default();
    other.marquee.loop_duration_sec = 99.0;
    let second = Runtime::global(other).unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(second.config().marquee.loop_duration_sec, 15.0);
}
