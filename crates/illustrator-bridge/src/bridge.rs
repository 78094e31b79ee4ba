//! The tool dispatcher: single entry point receiving a tool name and
//! arguments and routing to the capture or run pathway.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::BridgeError;
use crate::harness;
use crate::osascript::{self, Osascript, ScriptRunner};
use crate::response::{self, BridgeResult};
use crate::scratch::{ArtifactKind, TempArtifact};

/// The closed set of tools the bridge understands.
pub const TOOL_VIEW: &str = "view";
pub const TOOL_RUN: &str = "run";

/// Explicit context for the single-target assumption: one bridge, one
/// host application. Passed into [`Bridge`] rather than living in
/// ambient global state so it stays visible and testable.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Application name as registered with the OS, used both for the
    /// scripting target and the accessibility process lookup.
    pub application: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            application: "Adobe Illustrator".to_string(),
        }
    }
}

/// Translates tool invocations into host-application automation calls
/// and back.
///
/// Invocations are serialized through an internal mutex: the host is a
/// single-instance stateful GUI process, and overlapping script
/// execution or focus mutation against it is undefined behavior. There
/// is no caller-side timeout; a script that hangs the host holds the
/// bridge until the host returns.
pub struct Bridge {
    config: BridgeConfig,
    runner: Arc<dyn ScriptRunner>,
    flight: Mutex<()>,
}

impl Bridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self::with_runner(config, Arc::new(Osascript))
    }

    pub fn with_runner(config: BridgeConfig, runner: Arc<dyn ScriptRunner>) -> Self {
        Self {
            config,
            runner,
            flight: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Route an invocation to the matching pathway. Validation failures
    /// and unknown tool names become structured error responses without
    /// the automation interpreter ever being launched; no failure path
    /// escapes as a panic or error.
    pub async fn dispatch(&self, name: &str, arguments: &Value) -> BridgeResult {
        debug!(tool = name, "dispatching tool invocation");
        match name {
            TOOL_VIEW => self.view().await,
            TOOL_RUN => match required_code_argument(arguments) {
                Ok(code) => self.run_code(code).await,
                Err(err) => err.into(),
            },
            other => {
                info!(tool = other, "rejecting unknown tool");
                BridgeError::UnknownTool(other.to_string()).into()
            }
        }
    }

    /// Execute caller-supplied ExtendScript inside the host and return
    /// its captured log output.
    pub async fn run_code(&self, code: &str) -> BridgeResult {
        if code.trim().is_empty() {
            return BridgeError::Validation("The 'code' parameter is required".to_string()).into();
        }
        let _flight = self.flight.lock().await;
        self.run_code_locked(code)
            .await
            .unwrap_or_else(BridgeResult::from)
    }

    /// Capture a screenshot of the host's frontmost window.
    pub async fn view(&self) -> BridgeResult {
        let _flight = self.flight.lock().await;
        self.view_locked().await.unwrap_or_else(BridgeResult::from)
    }

    async fn run_code_locked(&self, code: &str) -> Result<BridgeResult, BridgeError> {
        let script = TempArtifact::acquire(ArtifactKind::Script)?;
        tokio::fs::write(script.path(), harness::wrap(code)).await?;

        let control = osascript::run_script_control(&self.config.application, script.path());
        let raw = self.runner.run(&control).await?;
        debug!(exit_code = raw.exit_code, "script execution finished");

        Ok(response::map_run_result(&raw))
        // `script` drops here: the .jsx file is removed on every path,
        // including the early returns above.
    }

    async fn view_locked(&self) -> Result<BridgeResult, BridgeError> {
        let image = TempArtifact::acquire(ArtifactKind::Image)?;

        let control = osascript::capture_window_control(&self.config.application, image.path());
        let raw = self.runner.run(&control).await?;
        debug!(exit_code = raw.exit_code, "window capture finished");

        Ok(response::map_capture_result(&raw, image.path()))
        // `image` drops here, removing the .png regardless of outcome.
    }
}

fn required_code_argument(arguments: &Value) -> Result<&str, BridgeError> {
    match arguments.get("code").and_then(Value::as_str) {
        Some(code) if !code.trim().is_empty() => Ok(code),
        _ => Err(BridgeError::Validation(
            "The 'code' parameter is required".to_string(),
        )),
    }
}
