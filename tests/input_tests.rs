// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn client_coords_scale_to_backing_pixels() {
    // 400x300 CSS box at (10, 20), 2x device pixel ratio
    let p = client_to_canvas_px(Vec2::new(210.0, 170.0), [10.0, 20.0, 400.0, 300.0], (800, 600));
    assert_eq!(p, Vec2::new(400.0, 300.0));
}

#[test]
fn client_coords_at_canvas_origin() {
    let p = client_to_canvas_px(Vec2::new(10.0, 20.0), [10.0, 20.0, 400.0, 300.0], (400, 300));
    assert_eq!(p, Vec2::ZERO);
}

#[test]
fn zero_sized_rect_does_not_divide_by_zero() {
    let p = client_to_canvas_px(Vec2::new(5.0, 7.0), [0.0, 0.0, 0.0, 0.0], (0, 0));
    assert!(p.x.is_finite() && p.y.is_finite());
    assert_eq!(p, Vec2::new(5.0, 7.0));
}

#[test]
fn backing_size_uses_device_pixel_ratio() {
    assert_eq!(backing_size(400.0, 300.0, 2.0), (800, 600));
    assert_eq!(backing_size(333.0, 100.0, 1.5), (499, 150));
}

#[test]
fn backing_size_never_zero() {
    assert_eq!(backing_size(0.0, 0.0, 1.0), (1, 1));
}

#[test]
fn start_key_matches_enter_only() {
    assert!(is_start_key("Enter", 0));
    assert!(is_start_key("", 13));
    assert!(!is_start_key("Escape", 27));
    assert!(!is_start_key("e", 69));
}
