//! Renderer backed by an external layout program (graphviz `dot`).

use super::Renderer;
use crate::utils::config::{
    DEFAULT_RENDERER_FORMAT, DEFAULT_RENDERER_PROGRAM, DEFAULT_RENDER_TIMEOUT,
};
use crate::utils::error::RenderError;
use async_trait::async_trait;
use log::debug;
use std::io;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs the layout program once per render.
///
/// The child is killed if the render future is dropped, so a cancelled
/// request does not leave a stray process behind.
#[derive(Debug, Clone)]
pub struct DotRenderer {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self {
            program: DEFAULT_RENDERER_PROGRAM.to_string(),
            args: vec![format!("-T{}", DEFAULT_RENDERER_FORMAT)],
            timeout: DEFAULT_RENDER_TIMEOUT,
        }
    }
}

impl DotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different program and argument list
    pub fn with_command(mut self, program: impl Into<String>, args: Vec<String>) -> Self {
        self.program = program.into();
        self.args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn io_error(&self, source: io::Error) -> RenderError {
        RenderError::Io {
            program: self.program.clone(),
            source,
        }
    }
}

#[async_trait]
impl Renderer for DotRenderer {
    async fn render(&self, description: &[u8]) -> Result<Vec<u8>, RenderError> {
        debug!(
            "Running {} {:?} on {} bytes",
            self.program,
            self.args,
            description.len()
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => RenderError::Unavailable {
                    program: self.program.clone(),
                },
                _ => self.io_error(e),
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.io_error(io::Error::other("stdin was not captured")))?;
        let input = description.to_vec();

        // Feed stdin while draining stdout, or a large graph fills the pipe.
        let feed = async move {
            stdin.write_all(&input).await?;
            stdin.shutdown().await
        };
        let run = async { tokio::join!(feed, child.wait_with_output()) };

        let (fed, output) = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| RenderError::TimedOut {
                program: self.program.clone(),
                seconds: self.timeout.as_secs(),
            })?;

        let output = output.map_err(|e| self.io_error(e))?;
        if !output.status.success() {
            return Err(RenderError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if let Err(e) = fed {
            // the program may exit before reading everything it needs
            if e.kind() != io::ErrorKind::BrokenPipe {
                return Err(self.io_error(e));
            }
        }

        debug!("{} produced {} bytes", self.program, output.stdout.len());
        Ok(output.stdout)
    }
}
