//! Browser events in, core dispatch, DOM effects out.

use crate::audio::{self, SharedMicSession};
use crate::constants::*;
use crate::dom;
use crate::fullscreen::{self, DomFullscreen};
use crate::panel::ControlPanel;
use crate::timeout::Timeout;
use crate::toolbar::ToolbarView;
use instant::Instant;
use orbpulse_core::{AppState, Dispatcher, Effect, HandlerContext, InputEvent, KeyModifiers, ToolbarStyle};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct EventHub {
    app: Rc<RefCell<AppState>>,
    dispatcher: Dispatcher,
    probe: DomFullscreen,
    started: Instant,
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    toolbar: ToolbarView,
    timer: RefCell<Timeout>,
    panel: RefCell<Option<ControlPanel>>,
    mic: SharedMicSession,
}

impl EventHub {
    pub fn new(
        app: Rc<RefCell<AppState>>,
        mic: SharedMicSession,
        document: web::Document,
        canvas: web::HtmlCanvasElement,
    ) -> Rc<Self> {
        Rc::new(Self {
            app,
            dispatcher: Dispatcher::standard(),
            probe: DomFullscreen::new(document.clone()),
            started: Instant::now(),
            toolbar: ToolbarView::find(&document),
            timer: RefCell::new(Timeout::default()),
            panel: RefCell::new(None),
            mic,
            document,
            canvas,
        })
    }

    pub fn set_panel(&self, panel: ControlPanel) {
        *self.panel.borrow_mut() = Some(panel);
    }

    /// Run the handler for `event` and apply its effects.
    /// Returns whether the browser default should be suppressed.
    pub fn dispatch(self: &Rc<Self>, event: InputEvent) -> bool {
        let ctx = HandlerContext {
            now: self.started.elapsed(),
            probe: &self.probe,
        };
        let effects = {
            let mut app = self.app.borrow_mut();
            self.dispatcher.dispatch(&mut app, &event, &ctx)
        };
        let mut prevent = false;
        for effect in effects {
            prevent |= self.apply(effect);
        }
        prevent
    }

    fn apply(self: &Rc<Self>, effect: Effect) -> bool {
        match effect {
            Effect::ToolbarStyle(style) => self.toolbar.apply(style),
            Effect::ArmAutoHide(delay) => {
                let hub = self.clone();
                self.timer.borrow_mut().arm(&dom::WindowTimers, delay, move || {
                    hub.dispatch(InputEvent::AutoHideTimer);
                });
            }
            Effect::CancelAutoHide => self.timer.borrow_mut().cancel(&dom::WindowTimers),
            Effect::SyncPanel(key) => {
                if let Some(panel) = self.panel.borrow().as_ref() {
                    panel.sync(key, &self.app.borrow().params);
                }
            }
            Effect::PanelVisible(visible) => {
                if let Some(panel) = self.panel.borrow().as_ref() {
                    panel.set_visible(visible);
                }
            }
            Effect::FullscreenButton { active } => {
                if let Some(button) = self.document.get_element_by_id(FULLSCREEN_TOGGLE_ID) {
                    button.set_text_content(Some(fullscreen_label(active)));
                }
            }
            Effect::RequestFullscreen(request) => self.probe.perform(request),
            Effect::ToggleMicrophone => audio::toggle(&self.mic),
            Effect::ResizeSurface => {
                dom::sync_canvas_backing_size(&self.canvas);
            }
            Effect::PreventDefault => return true,
        }
        false
    }

    /// Bring the DOM in line with the initial state.
    pub fn apply_initial_state(self: &Rc<Self>) {
        let visible = self.app.borrow().params.toolbar_visible;
        self.toolbar.apply(ToolbarStyle::for_visibility(visible));
        audio::update_status(false);
        self.apply(Effect::FullscreenButton {
            active: self.probe.is_active(),
        });
    }
}

pub fn wire_input_handlers(hub: &Rc<EventHub>) {
    let h = hub.clone();
    dom::add_window_listener("pointermove", move |ev: web::PointerEvent| {
        h.dispatch(InputEvent::PointerMove {
            x: ev.client_x() as f32,
            y: ev.client_y() as f32,
        });
    });

    let h = hub.clone();
    dom::add_window_listener("keydown", move |ev: web::KeyboardEvent| {
        let modifiers = KeyModifiers {
            ctrl: ev.ctrl_key(),
            meta: ev.meta_key(),
            alt: ev.alt_key(),
        };
        if h.dispatch(InputEvent::KeyDown { key: ev.key(), modifiers }) {
            ev.prevent_default();
        }
    });

    let h = hub.clone();
    dom::add_window_listener("resize", move |_: web::Event| {
        let (width, height) = dom::viewport_size();
        h.dispatch(InputEvent::Resize { width, height });
    });

    let h = hub.clone();
    fullscreen::on_change(&hub.document, move |active| {
        h.dispatch(InputEvent::FullscreenChange { active });
    });

    let h = hub.clone();
    dom::add_click_listener(&hub.document, FULLSCREEN_TOGGLE_ID, move || {
        h.dispatch(InputEvent::FullscreenClick);
    });

    let h = hub.clone();
    dom::add_click_listener(&hub.document, MIC_TOGGLE_ID, move || {
        h.dispatch(InputEvent::MicToggleClick);
    });

    let h = hub.clone();
    let added = hub.toolbar.add_hide_button(&hub.document, move || {
        h.dispatch(InputEvent::HideToolbarClick);
    });
    if let Err(e) = added {
        log::error!("[toolbar] hide button: {:?}", e);
    }
}
