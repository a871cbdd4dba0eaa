//! # Eval Executor
//!
//! Runs owner supplied code through the configured interpreter with
//! captured output, an output cap and a timeout.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0

use log::{info, warn};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;

use super::EvalOutput;
use crate::core::config::EvalConfig;
use crate::core::truncate;

#[derive(Debug, Clone)]
pub struct EvalExecutor {
    interpreter: String,
    args: Vec<String>,
    timeout: Duration,
    max_output_bytes: usize,
}

impl EvalExecutor {
    pub fn new(config: &EvalConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            args: config.args.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            max_output_bytes: config.max_output_bytes,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn capture(&self, bytes: &[u8]) -> String {
        let text = String::from_utf8_lossy(bytes);
        if text.len() > self.max_output_bytes {
            warn!(
                "Eval output truncated from {} to {} bytes",
                text.len(),
                self.max_output_bytes
            );
        }
        truncate(&text, self.max_output_bytes)
    }

    /// Run `code` as the last argument of the interpreter.
    ///
    /// Spawn failures and timeouts come back as failed output, never as errors.
    pub async fn run(&self, code: &str) -> EvalOutput {
        info!(
            "Running eval with {} {:?} (timeout: {:?})",
            self.interpreter, self.args, self.timeout
        );

        let mut cmd = Command::new(&self.interpreter);
        cmd.args(&self.args)
            .arg(code)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let start = Instant::now();
        let result = timeout(self.timeout, cmd.output()).await;
        let exec_time_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(output)) => {
                let failed = !output.status.success();
                if failed {
                    warn!("Eval exited with status {:?}", output.status.code());
                }
                EvalOutput {
                    stdout: self.capture(&output.stdout),
                    stderr: self.capture(&output.stderr),
                    exec_time_ms,
                    failed,
                }
            }
            Ok(Err(e)) => {
                warn!("Failed to start eval interpreter {}: {e}", self.interpreter);
                EvalOutput {
                    stdout: String::new(),
                    stderr: format!("Failed to start {}: {e}", self.interpreter),
                    exec_time_ms,
                    failed: true,
                }
            }
            Err(_) => {
                warn!("Eval timed out after {:?}", self.timeout);
                EvalOutput {
                    stdout: String::new(),
                    stderr: format!("Timed out after {} ms", self.timeout.as_millis()),
                    exec_time_ms,
                    failed: true,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh() -> EvalExecutor {
        EvalExecutor::new(&EvalConfig::default())
    }

    #[tokio::test]
    async fn test_captures_stdout_and_stderr() {
        let output = sh().run("echo hello; echo oops >&2").await;
        assert!(!output.failed);
        assert_eq!(output.stdout, "hello\n");
        assert_eq!(output.stderr, "oops\n");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let output = sh().run("exit 3").await;
        assert!(output.failed);
    }

    #[tokio::test]
    async fn test_timeout_is_failure() {
        let output = sh()
            .with_timeout(Duration::from_millis(200))
            .run("sleep 5")
            .await;
        assert!(output.failed);
        assert!(output.stderr.starts_with("Timed out"));
        assert!(output.exec_time_ms < 5000);
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_failure() {
        let config = EvalConfig {
            interpreter: "definitely-not-an-interpreter".to_string(),
            ..EvalConfig::default()
        };
        let output = EvalExecutor::new(&config).run("1").await;
        assert!(output.failed);
        assert!(output.stderr.starts_with("Failed to start"));
    }

    #[tokio::test]
    async fn test_output_is_capped() {
        let config = EvalConfig {
            max_output_bytes: 10,
            ..EvalConfig::default()
        };
        let output = EvalExecutor::new(&config).run("printf '%050d' 0").await;
        assert_eq!(output.stdout.len(), 10);
        assert!(output.stdout.ends_with("..."));
    }
}
