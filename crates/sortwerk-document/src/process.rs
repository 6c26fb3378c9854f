// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Runner for the external helper binaries (pdftoppm, tesseract) with an
// optional wall-clock limit.

use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use sortwerk_core::error::SortwerkError;
use tracing::{debug, warn};

/// How often a running tool is polled for exit while a timeout is active.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Captured result of a finished tool invocation.
#[derive(Debug)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    /// Stderr as trimmed, lossily-decoded text.
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// Run `command` to completion, capturing stdout and stderr.
///
/// `wrap` turns spawn and wait failures into the caller's error variant.
/// When `timeout` elapses the child is killed and
/// [`SortwerkError::ToolTimeout`] is returned.
pub fn run_tool(
    mut command: Command,
    timeout: Option<Duration>,
    wrap: fn(String) -> SortwerkError,
) -> Result<ToolOutput, SortwerkError> {
    let tool = tool_name(&command);
    debug!(tool = %tool, args = ?command.get_args().collect::<Vec<_>>(), "Running external tool");

    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command
        .spawn()
        .map_err(|err| wrap(format!("failed to spawn `{tool}`: {err}")))?;

    // Pipes are drained on their own threads so a chatty tool cannot block
    // on a full pipe while we wait for it.
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = match timeout {
        None => child
            .wait()
            .map_err(|err| wrap(format!("failed to wait for `{tool}`: {err}")))?,
        Some(limit) => {
            let deadline = Instant::now() + limit;
            loop {
                if let Some(status) = child
                    .try_wait()
                    .map_err(|err| wrap(format!("failed to poll `{tool}`: {err}")))?
                {
                    break status;
                }
                if Instant::now() >= deadline {
                    warn!(tool = %tool, seconds = limit.as_secs(), "External tool timed out; killing it");
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(SortwerkError::ToolTimeout {
                        tool,
                        seconds: limit.as_secs(),
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
        }
    };

    Ok(ToolOutput {
        status,
        stdout: collect(stdout),
        stderr: collect(stderr),
    })
}

fn tool_name(command: &Command) -> String {
    let program = std::path::Path::new(command.get_program());
    program
        .file_name()
        .unwrap_or(program.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut reader| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = reader.read_to_end(&mut buffer);
            buffer
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
