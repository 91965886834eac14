use super::OcrError;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs external programs with a hard timeout.
///
/// The child is killed when the timeout elapses.
#[derive(Clone, Debug)]
pub struct CommandExecutor {
    timeout: Duration,
}

impl CommandExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Executes `program`, writing `input` to its stdin when given, and
    /// returns the collected output of a successful run.
    pub async fn execute(
        &self,
        program: &str,
        args: &[&str],
        input: Option<&[u8]>,
    ) -> Result<Output, OcrError> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(
            program = %program,
            args = ?args,
            input_size = input.map(|i| i.len()).unwrap_or(0),
            timeout_secs = %self.timeout.as_secs(),
            "Executing command"
        );

        let mut child = cmd.spawn().map_err(|source| OcrError::Spawn {
            program: program.to_string(),
            source,
        })?;

        let stdin = child.stdin.take();
        let writer = async move {
            if let (Some(mut stdin), Some(bytes)) = (stdin, input) {
                stdin.write_all(bytes).await?;
                stdin.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        };

        let (write_result, output) = tokio::time::timeout(self.timeout, async {
            tokio::join!(writer, child.wait_with_output())
        })
        .await
        .map_err(|_| OcrError::Timeout(self.timeout.as_secs()))?;

        let output = output?;

        if let Err(e) = write_result {
            // A program may exit before draining stdin; its exit status decides.
            tracing::debug!(program = %program, error = %e, "Failed to write command input");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(
                program = %program,
                args = ?args,
                stderr = %stderr,
                "Command failed"
            );
            return Err(OcrError::CommandFailed(stderr.trim().to_string()));
        }

        tracing::debug!(
            program = %program,
            output_size = output.stdout.len(),
            "Command succeeded"
        );

        Ok(output)
    }
}
