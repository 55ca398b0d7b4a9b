//! Microphone session lifecycle, independent of the browser bindings.
//!
//! `G` is the long-lived analysis graph (audio context + analyser), created at
//! most once per page. `S` is the live capture (device stream + the node that
//! feeds it into the analyser); at most one exists at any time.

use crate::error::CaptureError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioSessionState {
    Uninitialized,
    Acquiring,
    Listening,
    Stopped,
    Failed(CaptureError),
}

/// What the caller must do after [`AudioSession::begin_init`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitAction {
    /// Build the analysis graph, install it, then request the device.
    CreateGraph,
    /// Graph exists; only request the device again.
    Reacquire,
    /// Already listening or a request is in flight.
    Ignore,
}

/// Read access to magnitude bins (0..=255 each).
pub trait FrequencyAnalyser {
    fn frequency_bins(&self, out: &mut Vec<u8>);
}

/// Something that can release device tracks and disconnect its source node.
pub trait CaptureStream {
    fn release(self);
}

/// Per-frame loudness query; `None` means "not listening, use the idle signal".
pub trait LoudnessSource {
    fn sample_loudness(&mut self) -> Option<f32>;
}

/// Average magnitude over all bins, 0 for an empty spectrum.
pub fn average_magnitude(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32
}

pub struct AudioSession<G, S> {
    state: AudioSessionState,
    graph: Option<G>,
    stream: Option<S>,
    bins: Vec<u8>,
}

impl<G, S> Default for AudioSession<G, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, S> AudioSession<G, S> {
    pub fn new() -> Self {
        Self {
            state: AudioSessionState::Uninitialized,
            graph: None,
            stream: None,
            bins: Vec::new(),
        }
    }

    pub fn state(&self) -> &AudioSessionState {
        &self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == AudioSessionState::Listening
    }

    pub fn graph(&self) -> Option<&G> {
        self.graph.as_ref()
    }

    /// Enter `Acquiring` unless a stream is live or already being requested.
    pub fn begin_init(&mut self) -> InitAction {
        match self.state {
            AudioSessionState::Acquiring | AudioSessionState::Listening => InitAction::Ignore,
            _ => {
                log::debug!("[audio] {:?} -> Acquiring", self.state);
                self.state = AudioSessionState::Acquiring;
                if self.graph.is_some() {
                    InitAction::Reacquire
                } else {
                    InitAction::CreateGraph
                }
            }
        }
    }

    /// Install the analysis graph. Ignored if one already exists.
    pub fn install_graph(&mut self, graph: G) {
        if self.graph.is_none() {
            self.graph = Some(graph);
        }
    }

    /// Hand over the granted stream. Outside `Acquiring` the stream is given
    /// back so the caller can release it instead of leaking a second capture.
    pub fn grant(&mut self, stream: S) -> Result<(), S> {
        if self.state != AudioSessionState::Acquiring || self.stream.is_some() {
            return Err(stream);
        }
        log::debug!("[audio] Acquiring -> Listening");
        self.stream = Some(stream);
        self.state = AudioSessionState::Listening;
        Ok(())
    }

    /// Record an acquisition failure. A live stream, if any, is returned for release.
    pub fn fail(&mut self, error: CaptureError) -> Option<S> {
        log::debug!("[audio] {:?} -> Failed({})", self.state, error);
        self.state = AudioSessionState::Failed(error);
        self.stream.take()
    }

    /// `Listening -> Stopped`, returning the stream to release exactly once.
    pub fn stop(&mut self) -> Option<S> {
        if self.state != AudioSessionState::Listening {
            return None;
        }
        log::debug!("[audio] Listening -> Stopped");
        self.state = AudioSessionState::Stopped;
        self.stream.take()
    }
}

impl<G, S: CaptureStream> AudioSession<G, S> {
    /// Stop and release in one step. Returns whether anything was released.
    pub fn stop_and_release(&mut self) -> bool {
        match self.stop() {
            Some(stream) => {
                stream.release();
                true
            }
            None => false,
        }
    }
}

impl<G: FrequencyAnalyser, S> LoudnessSource for AudioSession<G, S> {
    fn sample_loudness(&mut self) -> Option<f32> {
        if !self.is_listening() {
            return None;
        }
        let graph = self.graph.as_ref()?;
        graph.frequency_bins(&mut self.bins);
        Some(average_magnitude(&self.bins))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlatSpectrum(u8);

    impl FrequencyAnalyser for FlatSpectrum {
        fn frequency_bins(&self, out: &mut Vec<u8>) {
            out.clear();
            out.resize(128, self.0);
        }
    }

    #[test]
    fn average_of_empty_spectrum_is_zero() {
        assert_eq!(average_magnitude(&[]), 0.0);
        assert_eq!(average_magnitude(&[0, 255]), 127.5);
    }

    #[test]
    fn loudness_only_while_listening() {
        let mut s: AudioSession<FlatSpectrum, ()> = AudioSession::new();
        assert_eq!(s.sample_loudness(), None);
        assert_eq!(s.begin_init(), InitAction::CreateGraph);
        s.install_graph(FlatSpectrum(40));
        assert_eq!(s.sample_loudness(), None);
        s.grant(()).unwrap();
        assert_eq!(s.sample_loudness(), Some(40.0));
        s.stop();
        assert_eq!(s.sample_loudness(), None);
    }

    #[test]
    fn second_init_while_pending_is_ignored() {
        let mut s: AudioSession<FlatSpectrum, ()> = AudioSession::new();
        assert_eq!(s.begin_init(), InitAction::CreateGraph);
        assert_eq!(s.begin_init(), InitAction::Ignore);
    }
}
