#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_default_is_origin() {
    assert_eq!(Point::default(), Point::new(0.0, 0.0));
}

#[test]
fn point_delta_from() {
    let d = Point::new(10.0, 5.0).delta_from(Point::new(4.0, 8.0));
    assert!(approx_eq(d.x, 6.0));
    assert!(approx_eq(d.y, -3.0));
}

// --- Size ---

#[test]
fn size_from_pixels() {
    let s = Size::from_pixels(1600, 900);
    assert_eq!(s.width, 1600.0);
    assert_eq!(s.height, 900.0);
}

#[test]
fn size_scaled() {
    let s = Size::new(400.0, 180.0).scaled(2.5);
    assert!(approx_eq(s.width, 1000.0));
    assert!(approx_eq(s.height, 450.0));
}
