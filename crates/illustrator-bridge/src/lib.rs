//! Scripting bridge for Adobe Illustrator
//!
//! This library translates tool-invocation calls (`view`, `run`) into
//! macOS automation calls against a running Illustrator instance and
//! maps the results back into structured responses. Caller-supplied
//! ExtendScript is wrapped in a non-interactive logging harness, written
//! to a scoped temp file, and executed through `osascript`; window
//! screenshots are captured through System Events and re-encoded for
//! transport.

pub mod bridge;
pub mod errors;
pub mod harness;
pub mod osascript;
pub mod response;
pub mod scratch;

pub use bridge::{Bridge, BridgeConfig};
pub use errors::BridgeError;
pub use osascript::{Osascript, RawOutput, ScriptRunner};
pub use response::{
    BridgeContent, BridgeResult, ERROR_SENTINEL, SCREENSHOT_JPEG_QUALITY, SCREENSHOT_MIME_TYPE,
};
pub use scratch::{ArtifactKind, TempArtifact};
