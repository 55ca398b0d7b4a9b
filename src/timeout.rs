// Single-slot timeout bookkeeping. Free of browser types so host tests can
// `include!` this file; the window-backed host lives in `dom.rs`.

use std::time::Duration;

/// Something that can schedule and cancel one-shot callbacks.
pub trait TimerHost {
    /// Schedule `callback` after `delay`; `None` if scheduling failed.
    fn set(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Option<i32>;
    fn clear(&self, handle: i32);
}

/// At most one pending callback: arming clears whatever is still pending.
#[derive(Debug, Default)]
pub struct Timeout {
    handle: Option<i32>,
}

impl Timeout {
    pub fn arm<H: TimerHost + ?Sized>(&mut self, host: &H, delay: Duration, on_fire: impl FnOnce() + 'static) {
        self.cancel(host);
        self.handle = host.set(delay, Box::new(on_fire));
    }

    pub fn cancel<H: TimerHost + ?Sized>(&mut self, host: &H) {
        if let Some(handle) = self.handle.take() {
            host.clear(handle);
        }
    }
}
