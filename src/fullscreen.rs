//! Vendor-prefixed fullscreen calls resolved at runtime through `Reflect`.

use crate::dom;
use orbpulse_core::{FullscreenApi, FullscreenProbe, FullscreenRequest};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Capability provider backed by the live document.
pub struct DomFullscreen {
    document: web::Document,
}

impl DomFullscreen {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }

    fn root(&self) -> Option<web::Element> {
        self.document.document_element()
    }

    /// Read back the confirmed state from whichever element property exists.
    pub fn is_active(&self) -> bool {
        FullscreenApi::PRIORITY.into_iter().any(|api| {
            js_sys::Reflect::get(&self.document, &JsValue::from_str(api.element_property()))
                .map(|v| !v.is_null() && !v.is_undefined())
                .unwrap_or(false)
        })
    }

    /// Fire-and-forget: the outcome arrives as a change event.
    pub fn perform(&self, request: FullscreenRequest) {
        let result = match request {
            FullscreenRequest::Enter(api) => match self.root() {
                Some(root) => call_method(root.as_ref(), api.request_method()),
                None => Ok(()),
            },
            FullscreenRequest::Exit(api) => call_method(self.document.as_ref(), api.exit_method()),
        };
        if let Err(e) = result {
            log::warn!("[fullscreen] {:?} failed: {}", request, e);
        }
    }
}

fn has_method(target: &JsValue, method: &str) -> bool {
    js_sys::Reflect::get(target, &JsValue::from_str(method))
        .map(|v| v.is_function())
        .unwrap_or(false)
}

fn call_method(target: &JsValue, method: &str) -> anyhow::Result<()> {
    let f = js_sys::Reflect::get(target, &JsValue::from_str(method))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<js_sys::Function>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let ret = f.call0(target).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    // the standard variants return a promise; swallow its rejection
    if let Ok(promise) = ret.dyn_into::<js_sys::Promise>() {
        let noop = Closure::<dyn FnMut(JsValue)>::new(|_: JsValue| {});
        _ = promise.catch(&noop);
        noop.forget();
    }
    Ok(())
}

impl FullscreenProbe for DomFullscreen {
    fn can_request(&self, method: &str) -> bool {
        self.root().map(|r| has_method(r.as_ref(), method)).unwrap_or(false)
    }

    fn can_exit(&self, method: &str) -> bool {
        has_method(self.document.as_ref(), method)
    }
}

/// Subscribe `handler` to every vendor change event; it receives the
/// confirmed state read back from the document.
pub fn on_change(document: &web::Document, handler: impl Fn(bool) + 'static) {
    let handler = std::rc::Rc::new(handler);
    for api in FullscreenApi::PRIORITY {
        let probe = DomFullscreen::new(document.clone());
        let handler = handler.clone();
        dom::add_document_listener(document, api.change_event(), move |_: web::Event| {
            handler(probe.is_active());
        });
    }
}
