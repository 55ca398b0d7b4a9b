// Toolbar reveal/auto-hide driven through the dispatcher.

use orbpulse_core::*;
use std::time::Duration;

struct NoFullscreen;

impl FullscreenProbe for NoFullscreen {
    fn can_request(&self, _: &str) -> bool {
        false
    }
    fn can_exit(&self, _: &str) -> bool {
        false
    }
}

fn at(ms: u64) -> HandlerContext<'static> {
    HandlerContext {
        now: Duration::from_millis(ms),
        probe: &NoFullscreen,
    }
}

fn hidden_app(d: &Dispatcher) -> AppState {
    let mut app = AppState::new(1000.0, 800.0);
    d.dispatch(&mut app, &InputEvent::HideToolbarClick, &at(0));
    assert!(!app.toolbar.is_visible());
    app
}

#[test]
fn pointer_near_bottom_reveals_then_rehides_after_three_seconds() {
    let d = Dispatcher::standard();
    let mut app = hidden_app(&d);

    let fx = d.dispatch(&mut app, &InputEvent::PointerMove { x: 500.0, y: 750.0 }, &at(1000));
    assert!(fx.contains(&Effect::ArmAutoHide(Duration::from_secs(3))));
    assert!(fx.contains(&Effect::ToolbarStyle(ToolbarStyle::for_visibility(true))));
    assert!(app.toolbar.is_visible());
    assert_eq!(app.toolbar.auto_hide_deadline(), Some(Duration::from_millis(4000)));

    let fx = d.dispatch(&mut app, &InputEvent::AutoHideTimer, &at(4000));
    assert_eq!(fx.as_slice(), &[Effect::ToolbarStyle(ToolbarStyle::for_visibility(false))]);
    assert!(!app.toolbar.is_visible());
}

#[test]
fn reveal_margin_is_strict() {
    let d = Dispatcher::standard();
    let mut app = hidden_app(&d);
    let fx = d.dispatch(&mut app, &InputEvent::PointerMove { x: 0.0, y: 700.0 }, &at(10));
    assert!(fx.is_empty());
    assert!(!app.toolbar.is_visible());
}

#[test]
fn auto_hide_never_fires_with_visible_preference() {
    let d = Dispatcher::standard();
    let mut app = AppState::new(1000.0, 800.0);
    assert!(app.params.toolbar_visible);

    // pointer sweeps while the toolbar is already visible
    for (i, y) in [790.0, 10.0, 799.0, 720.0, 0.0].into_iter().enumerate() {
        let fx = d.dispatch(&mut app, &InputEvent::PointerMove { x: 1.0, y }, &at(i as u64 * 500));
        assert!(!fx.iter().any(|e| matches!(e, Effect::ArmAutoHide(_))));
    }
    let fx = d.dispatch(&mut app, &InputEvent::AutoHideTimer, &at(60_000));
    assert!(fx.is_empty());
    assert!(app.toolbar.is_visible());
}

#[test]
fn preference_restored_before_timer_keeps_toolbar() {
    let d = Dispatcher::standard();
    let mut app = hidden_app(&d);
    d.dispatch(&mut app, &InputEvent::PointerMove { x: 0.0, y: 790.0 }, &at(0));

    let fx = d.dispatch(
        &mut app,
        &InputEvent::PanelChange {
            key: ParamKey::ToolbarVisible,
            value: ParamValue::Toggle(true),
        },
        &at(1000),
    );
    assert!(fx.contains(&Effect::CancelAutoHide));

    let fx = d.dispatch(&mut app, &InputEvent::AutoHideTimer, &at(3000));
    assert!(fx.is_empty());
    assert!(app.toolbar.is_visible());
}

#[test]
fn t_key_toggles_and_resyncs_panel() {
    let d = Dispatcher::standard();
    let mut app = AppState::new(1000.0, 800.0);
    let fx = d.dispatch(&mut app, &InputEvent::key("T"), &at(0));
    assert!(!app.params.toolbar_visible);
    assert!(fx.contains(&Effect::SyncPanel(ParamKey::ToolbarVisible)));
    assert!(fx.contains(&Effect::PreventDefault));

    d.dispatch(&mut app, &InputEvent::key("t"), &at(0));
    assert!(app.params.toolbar_visible);
    assert!(app.toolbar.is_visible());
}
