// Host-side tests for the page contract and size helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn mic_labels_follow_listening_state() {
    assert_eq!(mic_labels(true), ("Microphone Active", "Stop Microphone"));
    assert_eq!(mic_labels(false), ("Microphone Inactive", "Start Microphone"));
}

#[test]
fn fullscreen_label_names_the_next_action() {
    assert_eq!(fullscreen_label(true), "Exit Fullscreen");
    assert_eq!(fullscreen_label(false), "Enter Fullscreen");
}

#[test]
fn bloom_extent_is_half_and_never_zero() {
    assert_eq!(bloom_extent(1920, 1080), (960, 540));
    assert_eq!(bloom_extent(1, 1), (1, 1));
    assert_eq!(bloom_extent(0, 0), (1, 1));
    assert_eq!(bloom_extent(3, 5), (1, 2));
}

#[test]
fn backing_size_scales_by_device_pixel_ratio() {
    assert_eq!(backing_size(800.0, 600.0, 2.0), (1600, 1200));
    assert_eq!(backing_size(800.5, 600.0, 1.0), (800, 600));
    // collapsed layouts still get a 1x1 surface
    assert_eq!(backing_size(0.0, 0.0, 3.0), (1, 1));
}

#[test]
fn selectors_and_ids_are_well_formed() {
    for id in [
        CANVAS_ID,
        CONTROL_PANEL_ID,
        MIC_TOGGLE_ID,
        MIC_STATUS_ID,
        ERROR_MESSAGE_ID,
        FULLSCREEN_TOGGLE_ID,
        HIDE_TOOLBAR_BUTTON_ID,
    ] {
        assert!(!id.is_empty() && !id.starts_with('#') && !id.contains(' '), "{id}");
    }
    assert!(TOOLBAR_SELECTOR.starts_with('.'));
    assert!(SHORTCUT_HINT_SELECTOR.starts_with('.'));
    assert!(LOGO_URL.starts_with('/'));
}

#[test]
fn page_ids_match_existing_markup() {
    assert_eq!(MIC_TOGGLE_ID, "micToggle");
    assert_eq!(MIC_STATUS_ID, "micStatus");
    assert_eq!(FULLSCREEN_TOGGLE_ID, "fullscreenToggle");
    assert_eq!(ERROR_MESSAGE_ID, "errorMessage");
    assert_eq!(HIDE_TOOLBAR_BUTTON_ID, "hideToolbarButton");
}
