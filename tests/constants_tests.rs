// Host-side tests for front-end constants and user-facing text.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
#[path = "../src/labels.rs"]
mod labels;

use constants::*;
use glam::Vec3;
use labels::*;

#[test]
fn element_ids_are_distinct() {
    let ids = [CANVAS_ID, LOADING_SCREEN_ID, TOGGLE_AUDIO_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn font_is_typeface_json() {
    assert!(FONT_URL.starts_with("https://"));
    assert!(FONT_URL.ends_with(".typeface.json"));
}

#[test]
fn popup_lists_position_components() {
    let html = popup_html(Vec3::new(-0.55, 0.35, -5.0));
    assert_eq!(html, "You clicked on a picture!<br>Position: -0.55, 0.35, -5");
}

#[test]
fn toggle_label_names_the_next_action() {
    assert_eq!(toggle_label(true), "Pause Audio");
    assert_eq!(toggle_label(false), "Play Audio");
}

#[test]
fn progress_line_format() {
    assert_eq!(
        progress_line("img/img1.jpeg", 1, 107),
        "Loading file: img/img1.jpeg. Loaded 1 of 107 files."
    );
}
