//! Stagehand-backed session
//!
//! Drives the `stagehand` CLI, which owns the actual browser and the
//! action grounding. Each trait operation maps to exactly one subcommand.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::core::{Result, StagehandConfig, StagekitError};
use crate::session::traits::{ActOutcome, BrowserSession, ObservedAction};

/// Browser session backed by the `stagehand` CLI
pub struct StagehandSession {
    config: StagehandConfig,
}

impl StagehandSession {
    /// Create a session with the given configuration
    ///
    /// Nothing is launched until [`BrowserSession::init`] runs.
    pub fn new(config: StagehandConfig) -> Self {
        Self { config }
    }

    /// Check if the stagehand CLI is installed
    pub async fn is_available() -> bool {
        Command::new("stagehand")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Run a stagehand subcommand and return its stdout
    async fn run_command(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("stagehand");
        cmd.args(["--session", self.config.session_name.as_str()]);

        if self.config.headed {
            cmd.arg("--headed");
        }

        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StagekitError::StagehandNotFound
            } else {
                StagekitError::session(format!("Failed to run stagehand: {}", e))
            }
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(StagekitError::session(format!(
                "stagehand command failed: {}",
                stderr.trim()
            )))
        }
    }

    /// Run a subcommand and return JSON output
    async fn run_json_command(&self, args: &[&str]) -> Result<String> {
        let mut full_args: Vec<&str> = args.to_vec();
        full_args.push("--json");
        self.run_command(&full_args).await
    }
}

#[async_trait]
impl BrowserSession for StagehandSession {
    async fn init(&self) -> Result<()> {
        let verbose = self.config.verbose.to_string();
        let mut args: Vec<&str> = vec![
            "init",
            "--model",
            &self.config.model,
            "--verbose",
            &verbose,
        ];
        if self.config.enable_caching {
            args.push("--cache");
        }

        self.run_command(&args).await?;
        Ok(())
    }

    async fn goto(&self, url: &str) -> Result<()> {
        self.run_command(&["goto", url]).await?;
        Ok(())
    }

    async fn act(&self, action: &str) -> Result<ActOutcome> {
        let output = self.run_json_command(&["act", action]).await?;

        serde_json::from_str(&output).map_err(|e| {
            StagekitError::session(format!("unexpected act reply: {} ({})", output.trim(), e))
        })
    }

    async fn extract(
        &self,
        instruction: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let schema_json = serde_json::to_string(schema)?;
        let args: Vec<&str> = vec!["extract", instruction, "--schema", &schema_json];
        let output = self.run_json_command(&args).await?;

        serde_json::from_str(&output).map_err(|e| {
            StagekitError::session(format!(
                "unexpected extract reply: {} ({})",
                output.trim(),
                e
            ))
        })
    }

    async fn observe(&self, instruction: Option<&str>) -> Result<Vec<ObservedAction>> {
        let mut args = vec!["observe"];
        if let Some(instruction) = instruction {
            args.push(instruction);
        }

        let output = self.run_json_command(&args).await?;

        serde_json::from_str(&output).map_err(|e| {
            StagekitError::session(format!(
                "unexpected observe reply: {} ({})",
                output.trim(),
                e
            ))
        })
    }

    async fn close(&self) -> Result<()> {
        self.run_command(&["close"]).await?;
        Ok(())
    }
}
