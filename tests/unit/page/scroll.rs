use super::*;

#[test]
fn reports_requested_position() {
    let host = DirectScroll::new();
    let mut driver: Box<dyn ScrollDriver> = Box::new(host.clone());
    assert_eq!(driver.raf(0.0), 0.0);
    host.scroll_to(420.0);
    assert_eq!(driver.raf(16.0), 420.0);
    host.scroll_to(-5.0);
    assert_eq!(driver.raf(32.0), 0.0);
    host.scroll_to(f64::INFINITY);
    assert_eq!(driver.raf(48.0), 0.0);
}

#[test]
fn destroy_is_visible_to_clones() {
    let host = DirectScroll::new();
    let mut driver = host.clone();
    host.scroll_to(100.0);
    driver.destroy();
    driver.destroy();
    assert!(host.is_destroyed());
    assert_eq!(driver.raf(0.0), 0.0);
}
