//! Input-event dispatch: one pure handler per event kind.
//!
//! Handlers mutate [`AppState`] and return the DOM work the front-end has to
//! do as a short list of [`Effect`]s. Nothing here touches the browser.

use crate::app::AppState;
use crate::fullscreen::{FullscreenProbe, FullscreenRequest};
use crate::params::{ParamKey, ParamValue};
use crate::toolbar::{TimerCommand, ToolbarChange, ToolbarStyle};
use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    KeyDown,
    Resize,
    FullscreenChange,
    PanelChange,
    HideToolbarClick,
    FullscreenClick,
    MicToggleClick,
    AutoHideTimer,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Client coordinates in CSS pixels.
    PointerMove { x: f32, y: f32 },
    KeyDown { key: String, modifiers: KeyModifiers },
    /// New viewport size in CSS pixels.
    Resize { width: f32, height: f32 },
    /// Confirmed state read back from the document after a change event.
    FullscreenChange { active: bool },
    PanelChange { key: ParamKey, value: ParamValue },
    HideToolbarClick,
    FullscreenClick,
    MicToggleClick,
    AutoHideTimer,
}

/// Modifier keys held during a key press. Shift is not tracked: `key`
/// already carries the case.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl KeyModifiers {
    pub fn any(self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

impl InputEvent {
    /// Key press with no modifiers held.
    pub fn key(key: &str) -> Self {
        InputEvent::KeyDown {
            key: key.to_owned(),
            modifiers: KeyModifiers::default(),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::PointerMove { .. } => EventKind::PointerMove,
            InputEvent::KeyDown { .. } => EventKind::KeyDown,
            InputEvent::Resize { .. } => EventKind::Resize,
            InputEvent::FullscreenChange { .. } => EventKind::FullscreenChange,
            InputEvent::PanelChange { .. } => EventKind::PanelChange,
            InputEvent::HideToolbarClick => EventKind::HideToolbarClick,
            InputEvent::FullscreenClick => EventKind::FullscreenClick,
            InputEvent::MicToggleClick => EventKind::MicToggleClick,
            InputEvent::AutoHideTimer => EventKind::AutoHideTimer,
        }
    }
}

/// DOM-side work requested by a handler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    ToolbarStyle(ToolbarStyle),
    /// Clear the pending auto-hide timeout, then schedule a new one.
    ArmAutoHide(Duration),
    CancelAutoHide,
    /// Re-read the value from the parameters into the panel widget.
    SyncPanel(ParamKey),
    PanelVisible(bool),
    FullscreenButton { active: bool },
    RequestFullscreen(FullscreenRequest),
    ToggleMicrophone,
    /// Viewport changed; match the canvas backing store to it.
    ResizeSurface,
    /// The key event was consumed; suppress the browser default.
    PreventDefault,
}

pub type Effects = SmallVec<[Effect; 4]>;

/// Ambient inputs a handler may need besides the event itself.
pub struct HandlerContext<'a> {
    /// Monotonic time since start.
    pub now: Duration,
    pub probe: &'a dyn FullscreenProbe,
}

pub type Handler = fn(&mut AppState, &InputEvent, &HandlerContext<'_>) -> Effects;

pub struct Dispatcher {
    handlers: FnvHashMap<EventKind, Handler>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::standard()
    }
}

impl Dispatcher {
    /// Empty table; unregistered kinds dispatch to nothing.
    pub fn new() -> Self {
        Self {
            handlers: FnvHashMap::default(),
        }
    }

    /// Table with every built-in handler registered.
    pub fn standard() -> Self {
        let mut d = Self::new();
        d.register(EventKind::PointerMove, on_pointer_move);
        d.register(EventKind::KeyDown, on_key_down);
        d.register(EventKind::Resize, on_resize);
        d.register(EventKind::FullscreenChange, on_fullscreen_change);
        d.register(EventKind::PanelChange, on_panel_change);
        d.register(EventKind::HideToolbarClick, on_hide_toolbar_click);
        d.register(EventKind::FullscreenClick, on_fullscreen_click);
        d.register(EventKind::MicToggleClick, on_mic_toggle_click);
        d.register(EventKind::AutoHideTimer, on_auto_hide_timer);
        d
    }

    /// Replace the handler for `kind`, returning the previous one.
    pub fn register(&mut self, kind: EventKind, handler: Handler) -> Option<Handler> {
        self.handlers.insert(kind, handler)
    }

    pub fn dispatch(&self, state: &mut AppState, event: &InputEvent, ctx: &HandlerContext<'_>) -> Effects {
        match self.handlers.get(&event.kind()) {
            Some(handler) => handler(state, event, ctx),
            None => Effects::new(),
        }
    }
}

fn push_toolbar_change(effects: &mut Effects, change: ToolbarChange) {
    match change.timer {
        TimerCommand::Keep => {}
        TimerCommand::Cancel => effects.push(Effect::CancelAutoHide),
        TimerCommand::Rearm(delay) => effects.push(Effect::ArmAutoHide(delay)),
    }
    if let Some(style) = change.style {
        effects.push(Effect::ToolbarStyle(style));
    }
}

/// Explicit preference change from outside the panel: apply and re-sync the checkbox.
fn set_toolbar_preference(state: &mut AppState, visible: bool) -> Effects {
    let mut effects = Effects::new();
    state.params.toolbar_visible = visible;
    push_toolbar_change(&mut effects, state.toolbar.apply_preference(visible));
    effects.push(Effect::SyncPanel(ParamKey::ToolbarVisible));
    log::info!("[toolbar] preference -> {}", if visible { "visible" } else { "hidden" });
    effects
}

fn request_fullscreen_toggle(state: &AppState, ctx: &HandlerContext<'_>) -> Effects {
    let mut effects = Effects::new();
    match state.fullscreen.toggle(ctx.probe) {
        Some(request) => effects.push(Effect::RequestFullscreen(request)),
        None => log::debug!("[fullscreen] no fullscreen API available"),
    }
    effects
}

fn on_pointer_move(state: &mut AppState, event: &InputEvent, ctx: &HandlerContext<'_>) -> Effects {
    let mut effects = Effects::new();
    if let InputEvent::PointerMove { x, y } = *event {
        let vp = state.viewport;
        state.scene.set_pointer(x, y, vp.width, vp.height);
        push_toolbar_change(&mut effects, state.toolbar.pointer_moved(y, vp.height, ctx.now));
    }
    effects
}

fn on_key_down(state: &mut AppState, event: &InputEvent, ctx: &HandlerContext<'_>) -> Effects {
    let InputEvent::KeyDown { key, modifiers } = event else {
        return Effects::new();
    };
    // browser and OS shortcuts such as Ctrl+F stay with the browser
    if modifiers.any() {
        return Effects::new();
    }
    let mut effects = match key.as_str() {
        "t" | "T" => set_toolbar_preference(state, !state.params.toolbar_visible),
        "f" | "F" => request_fullscreen_toggle(state, ctx),
        _ => return Effects::new(),
    };
    effects.push(Effect::PreventDefault);
    effects
}

fn on_resize(state: &mut AppState, event: &InputEvent, _ctx: &HandlerContext<'_>) -> Effects {
    let mut effects = Effects::new();
    if let InputEvent::Resize { width, height } = *event {
        state.resize(width, height);
        effects.push(Effect::ResizeSurface);
    }
    effects
}

fn on_fullscreen_change(state: &mut AppState, event: &InputEvent, _ctx: &HandlerContext<'_>) -> Effects {
    let mut effects = Effects::new();
    let InputEvent::FullscreenChange { active } = *event else {
        return effects;
    };
    // vendor events can arrive in pairs for one transition
    if !state.fullscreen.confirm(active) {
        return effects;
    }
    log::info!("[fullscreen] {}", if active { "entered" } else { "exited" });
    effects.push(Effect::FullscreenButton { active });
    effects.push(Effect::PanelVisible(!active));
    if active {
        let change = state.toolbar.fullscreen_entered(state.params.toolbar_visible);
        push_toolbar_change(&mut effects, change);
    }
    effects
}

fn on_panel_change(state: &mut AppState, event: &InputEvent, _ctx: &HandlerContext<'_>) -> Effects {
    let mut effects = Effects::new();
    let InputEvent::PanelChange { key, value } = *event else {
        return effects;
    };
    if !state.params.set(key, value) {
        return effects;
    }
    // a clamped write leaves the widget showing the raw value
    if state.params.get(key) != value {
        effects.push(Effect::SyncPanel(key));
    }
    match key {
        ParamKey::Red | ParamKey::Green | ParamKey::Blue => {
            let color = state.params.color();
            state.uniforms.set_color(color);
            if state.scene.has_logo() {
                state.uniforms.set_logo_color(color);
            }
        }
        ParamKey::LogoOpacity => {
            if state.scene.has_logo() {
                state.uniforms.logo.opacity = state.params.logo_opacity;
            }
        }
        ParamKey::LogoSize => state.scene.set_logo_size(state.params.logo_size),
        ParamKey::ToolbarVisible => {
            let change = state.toolbar.apply_preference(state.params.toolbar_visible);
            push_toolbar_change(&mut effects, change);
        }
        // read every frame
        ParamKey::Threshold | ParamKey::Strength | ParamKey::Radius | ParamKey::Sensitivity => {}
    }
    effects
}

fn on_hide_toolbar_click(state: &mut AppState, _event: &InputEvent, _ctx: &HandlerContext<'_>) -> Effects {
    set_toolbar_preference(state, false)
}

fn on_fullscreen_click(state: &mut AppState, _event: &InputEvent, ctx: &HandlerContext<'_>) -> Effects {
    request_fullscreen_toggle(state, ctx)
}

fn on_mic_toggle_click(_state: &mut AppState, _event: &InputEvent, _ctx: &HandlerContext<'_>) -> Effects {
    let mut effects = Effects::new();
    effects.push(Effect::ToggleMicrophone);
    effects
}

fn on_auto_hide_timer(state: &mut AppState, _event: &InputEvent, _ctx: &HandlerContext<'_>) -> Effects {
    let mut effects = Effects::new();
    let change = state.toolbar.auto_hide_fired(state.params.toolbar_visible);
    push_toolbar_change(&mut effects, change);
    effects
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoFullscreen;

    impl FullscreenProbe for NoFullscreen {
        fn can_request(&self, _: &str) -> bool {
            false
        }
        fn can_exit(&self, _: &str) -> bool {
            false
        }
    }

    fn ctx() -> HandlerContext<'static> {
        HandlerContext {
            now: Duration::ZERO,
            probe: &NoFullscreen,
        }
    }

    #[test]
    fn every_kind_has_a_standard_handler() {
        let d = Dispatcher::standard();
        assert_eq!(d.handlers.len(), 9);
    }

    #[test]
    fn unregistered_kind_yields_no_effects() {
        let d = Dispatcher::new();
        let mut state = AppState::new(800.0, 600.0);
        let fx = d.dispatch(&mut state, &InputEvent::key("t"), &ctx());
        assert!(fx.is_empty());
        assert!(state.params.toolbar_visible);
    }

    #[test]
    fn unrelated_keys_are_not_consumed() {
        let d = Dispatcher::standard();
        let mut state = AppState::new(800.0, 600.0);
        let fx = d.dispatch(&mut state, &InputEvent::key("x"), &ctx());
        assert!(fx.is_empty());
    }

    #[test]
    fn modified_shortcuts_are_left_to_the_browser() {
        let d = Dispatcher::standard();
        let mut state = AppState::new(800.0, 600.0);
        for modifiers in [
            KeyModifiers { ctrl: true, ..Default::default() },
            KeyModifiers { meta: true, ..Default::default() },
            KeyModifiers { alt: true, ..Default::default() },
        ] {
            for key in ["f", "F", "t", "T"] {
                let event = InputEvent::KeyDown {
                    key: key.into(),
                    modifiers,
                };
                let fx = d.dispatch(&mut state, &event, &ctx());
                assert!(fx.is_empty(), "{key} with {modifiers:?} was consumed");
            }
        }
        assert!(state.params.toolbar_visible);
    }

    #[test]
    fn resize_updates_viewport_and_requests_backing_sync() {
        let d = Dispatcher::standard();
        let mut state = AppState::new(800.0, 600.0);
        let event = InputEvent::Resize {
            width: 1024.0,
            height: 768.0,
        };
        let fx = d.dispatch(&mut state, &event, &ctx());
        assert_eq!(fx.as_slice(), &[Effect::ResizeSurface]);
        assert_eq!((state.viewport.width, state.viewport.height), (1024.0, 768.0));
    }

    #[test]
    fn missing_fullscreen_api_is_silent() {
        let d = Dispatcher::standard();
        let mut state = AppState::new(800.0, 600.0);
        let fx = d.dispatch(&mut state, &InputEvent::FullscreenClick, &ctx());
        assert!(fx.is_empty());
        assert!(!state.fullscreen.is_active());
    }

    #[test]
    fn clamped_panel_write_resyncs_widget() {
        let d = Dispatcher::standard();
        let mut state = AppState::new(800.0, 600.0);
        let event = InputEvent::PanelChange {
            key: ParamKey::Strength,
            value: ParamValue::Number(9.0),
        };
        let fx = d.dispatch(&mut state, &event, &ctx());
        assert_eq!(fx.as_slice(), &[Effect::SyncPanel(ParamKey::Strength)]);
        assert_eq!(state.params.strength, 3.0);
    }
}
