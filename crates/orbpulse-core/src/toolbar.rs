use crate::constants::*;
use std::time::Duration;

/// Inline styles applied to the toolbar and the shortcut hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolbarStyle {
    pub toolbar_opacity: &'static str,
    pub pointer_events: &'static str,
    pub hint_opacity: &'static str,
}

impl ToolbarStyle {
    pub fn for_visibility(visible: bool) -> Self {
        if visible {
            Self {
                toolbar_opacity: TOOLBAR_VISIBLE_OPACITY,
                pointer_events: "auto",
                hint_opacity: HINT_VISIBLE_OPACITY,
            }
        } else {
            Self {
                toolbar_opacity: HIDDEN_OPACITY,
                pointer_events: "none",
                hint_opacity: HIDDEN_OPACITY,
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerCommand {
    Keep,
    Cancel,
    /// Clear any pending timer, then schedule one after the delay.
    Rearm(Duration),
}

/// Outcome of a toolbar transition for the frontend to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolbarChange {
    pub style: Option<ToolbarStyle>,
    pub timer: TimerCommand,
}

impl ToolbarChange {
    const NONE: Self = Self {
        style: None,
        timer: TimerCommand::Keep,
    };
}

/// Visible/hidden state of the toolbar overlay.
///
/// `visible` is what is on screen; the user's persisted preference lives in
/// `AnimationParameters::toolbar_visible` and is passed in where it matters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolbarState {
    visible: bool,
    auto_hide_deadline: Option<Duration>,
}

impl ToolbarState {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            auto_hide_deadline: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn auto_hide_deadline(&self) -> Option<Duration> {
        self.auto_hide_deadline
    }

    /// Explicit toggle from the panel, the hide button or the `T` key.
    pub fn apply_preference(&mut self, visible: bool) -> ToolbarChange {
        self.visible = visible;
        self.auto_hide_deadline = None;
        ToolbarChange {
            style: Some(ToolbarStyle::for_visibility(visible)),
            timer: TimerCommand::Cancel,
        }
    }

    /// Reveal temporarily when the pointer nears the bottom edge.
    pub fn pointer_moved(&mut self, client_y: f32, viewport_h: f32, now: Duration) -> ToolbarChange {
        if self.visible || client_y <= viewport_h - TOOLBAR_REVEAL_MARGIN_PX {
            return ToolbarChange::NONE;
        }
        self.visible = true;
        self.auto_hide_deadline = Some(now + TOOLBAR_AUTO_HIDE_DELAY);
        ToolbarChange {
            style: Some(ToolbarStyle::for_visibility(true)),
            timer: TimerCommand::Rearm(TOOLBAR_AUTO_HIDE_DELAY),
        }
    }

    /// The armed timer fired. Hides only if the preference is still "hidden".
    pub fn auto_hide_fired(&mut self, preference_visible: bool) -> ToolbarChange {
        if self.auto_hide_deadline.take().is_none() {
            return ToolbarChange::NONE;
        }
        if preference_visible || !self.visible {
            return ToolbarChange::NONE;
        }
        self.visible = false;
        ToolbarChange {
            style: Some(ToolbarStyle::for_visibility(false)),
            timer: TimerCommand::Keep,
        }
    }

    /// Fullscreen has no toolbar preference of its own: a hidden preference wins.
    pub fn fullscreen_entered(&mut self, preference_visible: bool) -> ToolbarChange {
        if preference_visible {
            ToolbarChange::NONE
        } else {
            self.apply_preference(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: f32 = 800.0;

    #[test]
    fn styles_match_visibility() {
        let shown = ToolbarStyle::for_visibility(true);
        assert_eq!((shown.toolbar_opacity, shown.pointer_events, shown.hint_opacity), ("1", "auto", "0.3"));
        let hidden = ToolbarStyle::for_visibility(false);
        assert_eq!((hidden.toolbar_opacity, hidden.pointer_events, hidden.hint_opacity), ("0", "none", "0"));
    }

    #[test]
    fn pointer_far_from_bottom_does_nothing() {
        let mut t = ToolbarState::new(false);
        let c = t.pointer_moved(H - 100.0, H, Duration::ZERO);
        assert_eq!(c.style, None);
        assert!(!t.is_visible());
    }

    #[test]
    fn repeated_reveals_rearm_a_single_deadline() {
        let mut t = ToolbarState::new(false);
        t.pointer_moved(H - 10.0, H, Duration::from_millis(0));
        // already visible: no new timer
        let c = t.pointer_moved(H - 10.0, H, Duration::from_millis(500));
        assert_eq!(c.timer, TimerCommand::Keep);
        assert_eq!(t.auto_hide_deadline(), Some(Duration::from_millis(3000)));
    }

    #[test]
    fn explicit_change_cancels_pending_timer() {
        let mut t = ToolbarState::new(false);
        t.pointer_moved(H - 10.0, H, Duration::ZERO);
        let c = t.apply_preference(false);
        assert_eq!(c.timer, TimerCommand::Cancel);
        assert_eq!(t.auto_hide_deadline(), None);
        assert_eq!(t.auto_hide_fired(false).style, None);
    }

    #[test]
    fn fullscreen_forces_hidden_only_for_hidden_preference() {
        let mut t = ToolbarState::new(true);
        assert_eq!(t.fullscreen_entered(true).style, None);
        assert!(t.is_visible());
        let c = t.fullscreen_entered(false);
        assert_eq!(c.style, Some(ToolbarStyle::for_visibility(false)));
        assert!(!t.is_visible());
    }
}
