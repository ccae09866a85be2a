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
fn distance_is_euclidean() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert!(approx_eq(a.distance_to(b), 5.0));
    assert!(approx_eq(b.distance_to(a), 5.0));
}

#[test]
fn lerp_endpoints_and_middle() {
    let a = Point::new(100.0, 100.0);
    let b = Point::new(100.0, 300.0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Point::new(100.0, 200.0));
}

#[test]
fn midpoint_matches_half_lerp() {
    let a = Point::new(10.0, 20.0);
    let b = Point::new(30.0, 60.0);
    assert_eq!(a.midpoint(b), Point::new(20.0, 40.0));
}

#[test]
fn mirrored_x_reflects_around_axis() {
    let p = Point::new(100.0, 42.0);
    assert_eq!(p.mirrored_x(150.0), Point::new(200.0, 42.0));
    assert_eq!(p.mirrored_x(150.0).mirrored_x(150.0), p);
}

#[test]
fn point_serde_shape() {
    let json = serde_json::to_value(Point::new(1.5, 2.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": 2.0 }));
}

// --- travel_ms ---

#[test]
fn travel_ms_uses_speed_in_pixels_per_second() {
    let ms = travel_ms(Point::new(100.0, 100.0), Point::new(100.0, 300.0), 200.0);
    assert!(approx_eq(ms, 1000.0));
}

#[test]
fn travel_ms_zero_distance_is_zero() {
    let p = Point::new(50.0, 50.0);
    let ms = travel_ms(p, p, 150.0);
    assert_eq!(ms, 0.0);
    assert!(!ms.is_nan());
}

#[test]
fn travel_ms_non_positive_speed_is_zero() {
    let ms = travel_ms(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 0.0);
    assert_eq!(ms, 0.0);
}
