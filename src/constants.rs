// Page contract: element ids, selectors, asset paths and label text.
//
// Kept free of browser types so host tests can `include!` this file.

pub const CANVAS_ID: &str = "app-canvas";
pub const CONTROL_PANEL_ID: &str = "control-panel";
pub const MIC_TOGGLE_ID: &str = "micToggle";
pub const MIC_STATUS_ID: &str = "micStatus";
pub const ERROR_MESSAGE_ID: &str = "errorMessage";
pub const FULLSCREEN_TOGGLE_ID: &str = "fullscreenToggle";
pub const HIDE_TOOLBAR_BUTTON_ID: &str = "hideToolbarButton";

pub const TOOLBAR_SELECTOR: &str = ".audio-controls";
pub const SHORTCUT_HINT_SELECTOR: &str = ".shortcut-hint";

pub const LOGO_URL: &str = "/s_logo.webp";

// Labels mirrored from the page's initial markup
pub const MIC_ACTIVE_STATUS: &str = "Microphone Active";
pub const MIC_INACTIVE_STATUS: &str = "Microphone Inactive";
pub const MIC_STOP_LABEL: &str = "Stop Microphone";
pub const MIC_START_LABEL: &str = "Start Microphone";
pub const FULLSCREEN_EXIT_LABEL: &str = "Exit Fullscreen";
pub const FULLSCREEN_ENTER_LABEL: &str = "Enter Fullscreen";
pub const HIDE_TOOLBAR_LABEL: &str = "Hide Toolbar";
pub const PANEL_TITLE: &str = "Controls";

pub const ACTIVE_CLASS: &str = "active";
pub const INACTIVE_CLASS: &str = "inactive";
pub const PANEL_CLOSED_CLASS: &str = "closed";

// Scene clear color (linear)
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0];

#[inline]
pub fn mic_labels(listening: bool) -> (&'static str, &'static str) {
    if listening {
        (MIC_ACTIVE_STATUS, MIC_STOP_LABEL)
    } else {
        (MIC_INACTIVE_STATUS, MIC_START_LABEL)
    }
}

#[inline]
pub fn fullscreen_label(active: bool) -> &'static str {
    if active {
        FULLSCREEN_EXIT_LABEL
    } else {
        FULLSCREEN_ENTER_LABEL
    }
}

/// Bloom targets run at half the backing resolution, never below one pixel.
#[inline]
pub fn bloom_extent(width: u32, height: u32) -> (u32, u32) {
    ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
}

/// Canvas backing size for a CSS size and device pixel ratio, at least 1x1.
#[inline]
pub fn backing_size(css_w: f64, css_h: f64, dpr: f64) -> (u32, u32) {
    let w = (css_w * dpr) as u32;
    let h = (css_h * dpr) as u32;
    (w.max(1), h.max(1))
}
