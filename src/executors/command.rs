use crate::core::errors::{AvwatchError, ExecError};
use anyhow::{Context, Result};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

#[derive(Debug)]
pub struct CommandResult {
    pub stdout: String,
    #[allow(dead_code)]
    pub stderr: String,
    pub duration_ms: u128,
}

/// Run an external tool with a hard timeout. Non-zero exit and timeout both
/// surface as a typed ExecError carrying the stderr tail.
pub async fn execute(tool: &str, args: &[&str], timeout_ms: u64) -> Result<CommandResult> {
    let start = Instant::now();

    tracing::debug!("Executing: {} {:?}", tool, args);

    let mut cmd = Command::new(tool);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd
        .spawn()
        .with_context(|| format!("Failed to spawn {}", tool))?;

    let output = match timeout(Duration::from_millis(timeout_ms), child.wait_with_output()).await {
        Ok(result) => result.with_context(|| format!("Failed to wait for {}", tool))?,
        Err(_) => {
            // Timeout; kill_on_drop reaps the child
            return Err(AvwatchError::Exec(ExecError {
                tool: tool.to_string(),
                args: args.iter().map(|s| s.to_string()).collect(),
                exit_code: None,
                stderr_tail: format!("Command timed out after {}ms", timeout_ms),
                duration_ms: start.elapsed().as_millis(),
            })
            .into());
        }
    };

    let duration_ms = start.elapsed().as_millis();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
        let stderr_tail = stderr
            .lines()
            .rev()
            .take(10)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join("\n");

        return Err(AvwatchError::Exec(ExecError {
            tool: tool.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            exit_code: output.status.code(),
            stderr_tail,
            duration_ms,
        })
        .into());
    }

    Ok(CommandResult {
        stdout,
        stderr,
        duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_execute_captures_stdout() {
        let result = execute("echo", &["hello"], 5000).await.unwrap();
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_execute_nonzero_exit_is_error() {
        let err = execute("sh", &["-c", "echo oops >&2; exit 3"], 5000)
            .await
            .unwrap_err();
        let exec = err.downcast_ref::<AvwatchError>().unwrap();
        match exec {
            AvwatchError::Exec(e) => {
                assert_eq!(e.exit_code, Some(3));
                assert!(e.stderr_tail.contains("oops"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_timeout() {
        let err = execute("sleep", &["5"], 100).await.unwrap_err();
        let exec = err.downcast_ref::<AvwatchError>().unwrap();
        match exec {
            AvwatchError::Exec(e) => {
                assert_eq!(e.exit_code, None);
                assert!(e.stderr_tail.contains("timed out"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
