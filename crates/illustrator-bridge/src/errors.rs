use thiserror::Error;

/// Errors raised while bridging a tool invocation into Illustrator.
///
/// Every variant is recovered inside the bridge and converted into a
/// structured error response; none of them cross the protocol boundary
/// as an unhandled fault.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The invocation arguments were missing or malformed. Surfaced
    /// before the host application is touched.
    #[error("{0}")]
    Validation(String),

    /// The embedded engine raised inside caller code, or the control
    /// script's own error handler fired. Carries the host's message
    /// with the sentinel prefix already stripped.
    #[error("{0}")]
    HostExecution(String),

    /// The automation interpreter process itself failed: non-zero exit
    /// status with no structured sentinel on stdout.
    #[error("osascript exited with status {status}: {stderr}")]
    Process { status: i32, stderr: String },

    /// The capture nominally succeeded but the expected image artifact
    /// is absent or empty.
    #[error("screenshot file {0} is missing or empty")]
    CaptureIntegrity(String),

    /// The dispatcher received a tool name outside the declared set.
    #[error("Unknown tool '{0}'")]
    UnknownTool(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),
}
