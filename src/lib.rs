#![cfg(target_arch = "wasm32")]
use crate::audio::MicSession;
use crate::constants::*;
use instant::Instant;
use orbpulse_core::AppState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod fullscreen;
mod panel;
mod render;
mod timeout;
mod toolbar;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("orbpulse-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::sync_canvas_backing_size(&canvas);

    let (vw, vh) = dom::viewport_size();
    let app = Rc::new(RefCell::new(AppState::new(vw, vh)));
    let mic: audio::SharedMicSession = Rc::new(RefCell::new(MicSession::new()));

    // UI wiring first so controls respond while the GPU initializes
    let hub = events::EventHub::new(app.clone(), mic.clone(), document.clone(), canvas.clone());
    let hub_panel = hub.clone();
    let on_change: panel::ChangeCallback = Rc::new(move |key, value| {
        hub_panel.dispatch(orbpulse_core::InputEvent::PanelChange { key, value });
    });
    match panel::ControlPanel::build(&document, &app.borrow().params, on_change) {
        Ok(p) => hub.set_panel(p),
        Err(e) => log::error!("[panel] build failed: {:?}", e),
    }
    events::wire_input_handlers(&hub);
    hub.apply_initial_state();

    let gpu = frame::init_gpu(&canvas).await;
    let has_gpu = gpu.is_some();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app: app.clone(),
        mic,
        canvas,
        gpu,
        started: Instant::now(),
    }));
    frame::start_loop(frame_ctx.clone());

    if has_gpu {
        spawn_local(load_logo(app, frame_ctx));
    }
    Ok(())
}

async fn load_logo(app: Rc<RefCell<AppState>>, frame_ctx: Rc<RefCell<frame::FrameContext<'static>>>) {
    match render::fetch_bitmap(LOGO_URL).await {
        Ok(bitmap) => {
            if let Some(gpu) = frame_ctx.borrow_mut().gpu.as_mut() {
                gpu.set_logo_image(bitmap);
                app.borrow_mut().attach_logo();
            }
        }
        Err(e) => log::error!("[logo] failed to load {}: {:?}", LOGO_URL, e),
    }
}
