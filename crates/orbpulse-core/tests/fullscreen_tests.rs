// Fullscreen toggling with a fake capability provider.

use orbpulse_core::*;
use std::time::Duration;

struct WebkitOnly;

impl FullscreenProbe for WebkitOnly {
    fn can_request(&self, method: &str) -> bool {
        method == "webkitRequestFullscreen"
    }
    fn can_exit(&self, method: &str) -> bool {
        method == "webkitExitFullscreen"
    }
}

fn ctx() -> HandlerContext<'static> {
    HandlerContext {
        now: Duration::ZERO,
        probe: &WebkitOnly,
    }
}

#[test]
fn active_changes_only_on_confirmation() {
    let d = Dispatcher::standard();
    let mut app = AppState::new(800.0, 600.0);

    let fx = d.dispatch(&mut app, &InputEvent::key("f"), &ctx());
    assert!(fx.contains(&Effect::RequestFullscreen(FullscreenRequest::Enter(FullscreenApi::Webkit))));
    assert!(!app.fullscreen.is_active());

    let fx = d.dispatch(&mut app, &InputEvent::FullscreenChange { active: true }, &ctx());
    assert!(app.fullscreen.is_active());
    assert!(fx.contains(&Effect::FullscreenButton { active: true }));
    assert!(fx.contains(&Effect::PanelVisible(false)));

    let fx = d.dispatch(&mut app, &InputEvent::FullscreenClick, &ctx());
    assert_eq!(fx.as_slice(), &[Effect::RequestFullscreen(FullscreenRequest::Exit(FullscreenApi::Webkit))]);
    assert!(app.fullscreen.is_active());
}

#[test]
fn duplicate_change_events_apply_once() {
    let d = Dispatcher::standard();
    let mut app = AppState::new(800.0, 600.0);
    d.dispatch(&mut app, &InputEvent::FullscreenChange { active: true }, &ctx());
    let fx = d.dispatch(&mut app, &InputEvent::FullscreenChange { active: true }, &ctx());
    assert!(fx.is_empty());

    let fx = d.dispatch(&mut app, &InputEvent::FullscreenChange { active: false }, &ctx());
    assert!(fx.contains(&Effect::PanelVisible(true)));
    assert!(fx.contains(&Effect::FullscreenButton { active: false }));
}

#[test]
fn entering_fullscreen_forces_hidden_preference() {
    let d = Dispatcher::standard();
    let mut app = AppState::new(800.0, 600.0);
    d.dispatch(&mut app, &InputEvent::HideToolbarClick, &ctx());
    // temporary reveal before entering fullscreen
    d.dispatch(&mut app, &InputEvent::PointerMove { x: 0.0, y: 590.0 }, &ctx());
    assert!(app.toolbar.is_visible());

    let fx = d.dispatch(&mut app, &InputEvent::FullscreenChange { active: true }, &ctx());
    assert!(fx.contains(&Effect::ToolbarStyle(ToolbarStyle::for_visibility(false))));
    assert!(fx.contains(&Effect::CancelAutoHide));
    assert!(!app.toolbar.is_visible());
}

#[test]
fn find_in_page_shortcut_is_not_captured() {
    let d = Dispatcher::standard();
    let mut app = AppState::new(800.0, 600.0);
    for modifiers in [
        KeyModifiers { ctrl: true, ..Default::default() },
        KeyModifiers { meta: true, ..Default::default() },
    ] {
        let event = InputEvent::KeyDown {
            key: "f".into(),
            modifiers,
        };
        let fx = d.dispatch(&mut app, &event, &ctx());
        assert!(!fx.contains(&Effect::PreventDefault));
        assert!(fx.is_empty());
    }
    assert!(!app.fullscreen.is_active());
}
