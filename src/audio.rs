use crate::constants::*;
use crate::dom;
use crate::timeout::Timeout;
use orbpulse_core::{
    AudioSession, CaptureError, CaptureStream, FrequencyAnalyser, InitAction, ANALYSER_FFT_SIZE,
    ERROR_MESSAGE_DURATION,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

thread_local! {
    // hide timer for the error banner; a newer message restarts it
    static ERROR_TIMEOUT: RefCell<Timeout> = RefCell::new(Timeout::default());
}

/// Audio context + analyser, created once per page.
pub struct AnalysisGraph {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
}

impl AnalysisGraph {
    pub fn new() -> Result<Self, CaptureError> {
        let ctx = web::AudioContext::new().map_err(|e| CaptureError::Context(format!("{:?}", e)))?;
        let analyser = web::AnalyserNode::new(&ctx).map_err(|e| CaptureError::Context(format!("{:?}", e)))?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);
        _ = analyser.connect_with_audio_node(&ctx.destination());
        log::info!(
            "[audio] analysis graph ready ({} bins)",
            analyser.frequency_bin_count()
        );
        Ok(Self { ctx, analyser })
    }

    fn resume_if_suspended(&self) {
        if self.ctx.state() == web::AudioContextState::Suspended {
            _ = self.ctx.resume();
        }
    }
}

impl FrequencyAnalyser for AnalysisGraph {
    fn frequency_bins(&self, out: &mut Vec<u8>) {
        let bins = self.analyser.frequency_bin_count() as usize;
        if out.len() != bins {
            out.resize(bins, 0);
        }
        self.analyser.get_byte_frequency_data(out.as_mut_slice());
    }
}

/// Live device stream and the node feeding it into the analyser.
pub struct MicStream {
    stream: web::MediaStream,
    source: web::MediaStreamAudioSourceNode,
}

impl CaptureStream for MicStream {
    fn release(self) {
        stop_tracks(&self.stream);
        _ = self.source.disconnect();
        log::info!("[audio] microphone released");
    }
}

fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}

pub type MicSession = AudioSession<AnalysisGraph, MicStream>;
pub type SharedMicSession = Rc<RefCell<MicSession>>;

/// Start capture when idle, stop it when listening.
pub fn toggle(session: &SharedMicSession) {
    if session.borrow().is_listening() {
        stop(session);
    } else {
        start(session);
    }
}

pub fn stop(session: &SharedMicSession) {
    let released = session.borrow_mut().stop_and_release();
    if released {
        update_status(false);
    }
}

pub fn start(session: &SharedMicSession) {
    let action = session.borrow_mut().begin_init();
    match action {
        InitAction::Ignore => return,
        InitAction::CreateGraph => match AnalysisGraph::new() {
            Ok(graph) => session.borrow_mut().install_graph(graph),
            Err(e) => {
                fail(session, e);
                return;
            }
        },
        InitAction::Reacquire => {}
    }
    let session = session.clone();
    spawn_local(async move {
        match open_stream().await {
            Ok(stream) => connect(&session, stream),
            Err(e) => fail(&session, e),
        }
    });
}

fn connect(session: &SharedMicSession, stream: web::MediaStream) {
    let wired = match session.borrow().graph() {
        Some(graph) => graph
            .ctx
            .create_media_stream_source(&stream)
            .map(|source| {
                _ = source.connect_with_audio_node(&graph.analyser);
                graph.resume_if_suspended();
                source
            })
            .map_err(|e| CaptureError::Other(format!("{:?}", e))),
        None => Err(CaptureError::Context("analysis graph missing".into())),
    };
    let source = match wired {
        Ok(source) => source,
        Err(e) => {
            stop_tracks(&stream);
            fail(session, e);
            return;
        }
    };
    let granted = session.borrow_mut().grant(MicStream { stream, source });
    match granted {
        Ok(()) => {
            log::info!("[audio] microphone listening");
            update_status(true);
        }
        // stopped or failed while the permission prompt was open
        Err(extra) => extra.release(),
    }
}

fn fail(session: &SharedMicSession, error: CaptureError) {
    log::error!("[audio] {}", error);
    let live = session.borrow_mut().fail(error.clone());
    if let Some(stream) = live {
        stream.release();
    }
    update_status(false);
    show_error(&error.to_string());
}

async fn open_stream() -> Result<web::MediaStream, CaptureError> {
    let window = web::window().ok_or(CaptureError::Unsupported)?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| CaptureError::Unsupported)?;

    let audio = js_sys::Object::new();
    for key in ["echoCancellation", "noiseSuppression", "autoGainControl"] {
        _ = js_sys::Reflect::set(&audio, &JsValue::from_str(key), &JsValue::TRUE);
    }
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&audio);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(capture_error)?;
    let stream = JsFuture::from(promise).await.map_err(capture_error)?;
    stream
        .dyn_into::<web::MediaStream>()
        .map_err(|_| CaptureError::Other("getUserMedia did not return a MediaStream".into()))
}

fn capture_error(e: JsValue) -> CaptureError {
    match e.dyn_ref::<web::DomException>() {
        Some(ex) => CaptureError::from_dom_exception(&ex.name(), &ex.message()),
        None => CaptureError::Other(format!("{:?}", e)),
    }
}

/// Reflect listening state in `#micStatus` and `#micToggle`.
pub fn update_status(listening: bool) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let (status_text, button_text) = mic_labels(listening);
    if let Some(status) = document.get_element_by_id(MIC_STATUS_ID) {
        status.set_text_content(Some(status_text));
        dom::set_class(&status, ACTIVE_CLASS, listening);
        dom::set_class(&status, INACTIVE_CLASS, !listening);
    }
    if let Some(button) = document.get_element_by_id(MIC_TOGGLE_ID) {
        button.set_text_content(Some(button_text));
        dom::set_class(&button, ACTIVE_CLASS, listening);
    }
}

/// Show the error banner, hiding it again after a fixed delay.
pub fn show_error(message: &str) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let Some(banner) = dom::html_element_by_id(&document, ERROR_MESSAGE_ID) else {
        return;
    };
    banner.set_text_content(Some(message));
    dom::set_style(&banner, "display", "block");
    ERROR_TIMEOUT.with(|timeout| {
        timeout
            .borrow_mut()
            .arm(&dom::WindowTimers, ERROR_MESSAGE_DURATION, move || {
                dom::set_style(&banner, "display", "none");
            });
    });
}
