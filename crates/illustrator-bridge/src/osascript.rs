//! Invokes the macOS automation interpreter (`osascript`) with
//! generated control scripts.
//!
//! Two call shapes exist: "run this embedded script file in the host
//! application" and "capture the host window's pixels". Both are
//! synchronous child-process waits with no timeout and no retries; a
//! caller-supplied script that hangs Illustrator blocks the bridge for
//! as long as the host takes. The exit code and captured stdout/stderr
//! are authoritative.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::errors::BridgeError;
use crate::response::ERROR_SENTINEL;

/// How long the capture control script waits after activating the host,
/// in seconds. Illustrator is not always redrawn immediately on focus.
const CAPTURE_SETTLE_DELAY_SECS: u32 = 1;

/// Raw result of one automation interpreter invocation.
#[derive(Debug, Clone)]
pub struct RawOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for RawOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Seam between the bridge and the automation interpreter. Tests swap
/// in a recording double; production uses [`Osascript`].
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    async fn run(&self, control_script: &str) -> Result<RawOutput, BridgeError>;
}

/// The real interpreter: spawns `osascript -e <script>` and waits for
/// it to finish.
#[derive(Debug, Default)]
pub struct Osascript;

#[async_trait]
impl ScriptRunner for Osascript {
    async fn run(&self, control_script: &str) -> Result<RawOutput, BridgeError> {
        debug!(script_len = control_script.len(), "invoking osascript");
        let output = Command::new("osascript")
            .arg("-e")
            .arg(control_script)
            .output()
            .await?;
        let raw = RawOutput::from(output);
        debug!(exit_code = raw.exit_code, "osascript finished");
        Ok(raw)
    }
}

/// Control script that tells the host to execute a `.jsx` file and hand
/// back its result.
///
/// The `try` block is load-bearing: osascript's native error reporting
/// is unreliable for application-internal exceptions, so a host-side
/// error is converted into a sentinel-prefixed string on the success
/// channel instead of a non-zero exit.
pub fn run_script_control(application: &str, jsx_path: &Path) -> String {
    format!(
        r#"tell application "{application}"
    set user interaction level to never interact
    try
        set scriptResult to do javascript file "{jsx_path}"
        return scriptResult
    on error errMsg
        return "{sentinel} " & errMsg
    end try
end tell"#,
        jsx_path = jsx_path.display(),
        sentinel = ERROR_SENTINEL,
    )
}

/// Control script that captures the host's frontmost window into
/// `png_path`.
///
/// Records the previously frontmost application, activates the host and
/// waits a fixed settle delay, reads the window rectangle through the
/// accessibility layer, scopes `screencapture` to it, then restores the
/// previous application if it differed. Window geometry is discovered
/// on every call rather than cached; the window may have moved since
/// the last invocation.
pub fn capture_window_control(application: &str, png_path: &Path) -> String {
    format!(
        r#"try
    tell application "System Events"
        set previousApp to name of first process where frontmost is true
    end tell

    tell application "{application}"
        activate
        delay {delay}
    end tell

    tell application "System Events"
        tell process "{application}"
            set frontWindow to first window
            set {{x, y}} to position of frontWindow
            set {{w, h}} to size of frontWindow
            set captureRegion to "" & x & "," & y & "," & w & "," & h
            do shell script "screencapture -R " & quoted form of captureRegion & " -x '{png_path}'"
        end tell
    end tell

    if previousApp is not "{application}" then
        tell application previousApp to activate
    end if
on error errMsg
    return "{sentinel} " & errMsg
end try"#,
        delay = CAPTURE_SETTLE_DELAY_SECS,
        png_path = png_path.display(),
        sentinel = ERROR_SENTINEL,
    )
}
