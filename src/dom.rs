use crate::constants::backing_size;
use crate::timeout::TimerHost;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn html_element_by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn html_element_by_selector(document: &web::Document, selector: &str) -> Option<web::HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn add_click_listener(document: &web::Document, element_id: &str, handler: impl FnMut() + 'static) {
    match document.get_element_by_id(element_id) {
        Some(el) => add_element_click_listener(&el, handler),
        None => log::warn!("[dom] missing #{}", element_id),
    }
}

pub fn add_element_click_listener(el: &web::Element, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Listen on the window for the page lifetime.
pub fn add_window_listener<E>(event: &str, handler: impl FnMut(E) + 'static)
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
{
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn add_document_listener<E>(document: &web::Document, event: &str, handler: impl FnMut(E) + 'static)
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = document.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

pub fn set_class(el: &web::Element, class: &str, on: bool) {
    let cl = el.class_list();
    _ = if on { cl.add_1(class) } else { cl.remove_1(class) };
}

/// Viewport size in CSS pixels.
pub fn viewport_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (1.0, 1.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    (width as f32, height as f32)
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    let (w, h) = backing_size(rect.width(), rect.height(), dpr);
    canvas.set_width(w);
    canvas.set_height(h);
    (w, h)
}

/// `TimerHost` backed by `window.setTimeout`.
pub struct WindowTimers;

impl TimerHost for WindowTimers {
    fn set(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Option<i32> {
        let window = web::window()?;
        let callback = Closure::once_into_js(move || callback());
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay.as_millis() as i32)
            .map_err(|e| log::error!("[dom] setTimeout failed: {:?}", e))
            .ok()
    }

    fn clear(&self, handle: i32) {
        if let Some(window) = web::window() {
            window.clear_timeout_with_handle(handle);
        }
    }
}
