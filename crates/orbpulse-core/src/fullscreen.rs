//! Fullscreen capability probing and the confirmed-state mirror.

/// One vendor flavour of the fullscreen API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FullscreenApi {
    Standard,
    Moz,
    Webkit,
    Ms,
}

impl FullscreenApi {
    /// Probe order; the first available variant wins.
    pub const PRIORITY: [FullscreenApi; 4] = [
        FullscreenApi::Standard,
        FullscreenApi::Moz,
        FullscreenApi::Webkit,
        FullscreenApi::Ms,
    ];

    /// Method on the document root element.
    pub fn request_method(self) -> &'static str {
        match self {
            FullscreenApi::Standard => "requestFullscreen",
            FullscreenApi::Moz => "mozRequestFullScreen",
            FullscreenApi::Webkit => "webkitRequestFullscreen",
            FullscreenApi::Ms => "msRequestFullscreen",
        }
    }

    /// Method on the document.
    pub fn exit_method(self) -> &'static str {
        match self {
            FullscreenApi::Standard => "exitFullscreen",
            FullscreenApi::Moz => "mozCancelFullScreen",
            FullscreenApi::Webkit => "webkitExitFullscreen",
            FullscreenApi::Ms => "msExitFullscreen",
        }
    }

    /// Document property holding the current fullscreen element.
    pub fn element_property(self) -> &'static str {
        match self {
            FullscreenApi::Standard => "fullscreenElement",
            FullscreenApi::Moz => "mozFullScreenElement",
            FullscreenApi::Webkit => "webkitFullscreenElement",
            FullscreenApi::Ms => "msFullscreenElement",
        }
    }

    pub fn change_event(self) -> &'static str {
        match self {
            FullscreenApi::Standard => "fullscreenchange",
            FullscreenApi::Moz => "mozfullscreenchange",
            FullscreenApi::Webkit => "webkitfullscreenchange",
            FullscreenApi::Ms => "MSFullscreenChange",
        }
    }
}

/// Capability provider: reports which vendor methods exist.
pub trait FullscreenProbe {
    fn can_request(&self, method: &str) -> bool;
    fn can_exit(&self, method: &str) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullscreenRequest {
    Enter(FullscreenApi),
    Exit(FullscreenApi),
}

pub fn probe_request(probe: &dyn FullscreenProbe) -> Option<FullscreenApi> {
    FullscreenApi::PRIORITY
        .into_iter()
        .find(|api| probe.can_request(api.request_method()))
}

pub fn probe_exit(probe: &dyn FullscreenProbe) -> Option<FullscreenApi> {
    FullscreenApi::PRIORITY
        .into_iter()
        .find(|api| probe.can_exit(api.exit_method()))
}

/// Mirror of the browser's fullscreen state. Only [`Self::confirm`] mutates it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FullscreenState {
    active: bool,
}

impl FullscreenState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Choose the request for a toggle. Does not touch `active`; `None` when
    /// no vendor variant exists.
    pub fn toggle(&self, probe: &dyn FullscreenProbe) -> Option<FullscreenRequest> {
        if self.active {
            probe_exit(probe).map(FullscreenRequest::Exit)
        } else {
            probe_request(probe).map(FullscreenRequest::Enter)
        }
    }

    /// Apply a confirmed change notification. Returns whether the flag flipped.
    pub fn confirm(&mut self, active: bool) -> bool {
        let changed = self.active != active;
        self.active = active;
        changed
    }
}
