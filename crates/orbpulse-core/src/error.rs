use thiserror::Error;

/// Reasons microphone acquisition can fail.
///
/// The `Display` text is what the page shows in its transient error banner.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Microphone permission denied: {0}")]
    PermissionDenied(String),
    #[error("No microphone found: {0}")]
    NoDevice(String),
    #[error("Microphone is busy or could not be read: {0}")]
    DeviceBusy(String),
    #[error("Microphone capture is not supported in this browser")]
    Unsupported,
    #[error("Could not create audio context: {0}")]
    Context(String),
    #[error("{0}")]
    Other(String),
}

impl CaptureError {
    /// Classify a rejected `getUserMedia` promise by its `DOMException` name.
    pub fn from_dom_exception(name: &str, message: &str) -> Self {
        let message = message.to_string();
        match name {
            "NotAllowedError" | "SecurityError" => CaptureError::PermissionDenied(message),
            "NotFoundError" | "OverconstrainedError" => CaptureError::NoDevice(message),
            "NotReadableError" | "AbortError" => CaptureError::DeviceBusy(message),
            "NotSupportedError" | "TypeError" => CaptureError::Unsupported,
            _ => CaptureError::Other(message),
        }
    }
}
