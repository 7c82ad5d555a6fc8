use std::ffi::OsString;
use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::ToolError;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs external programs with a hard deadline.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run `program` to completion. Output on stdout is discarded; stderr is
    /// captured for the error message.
    pub fn run(&self, program: &str, args: &[OsString]) -> Result<(), ToolError> {
        let mut command = Command::new(program);
        command.args(args).stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|err| spawn_error(program, err))?;

        // Drain stderr concurrently so a chatty tool cannot block on a full pipe.
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut buffer = String::new();
                let _ = stderr.read_to_string(&mut buffer);
                buffer
            })
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ToolError::TimedOut {
                        program: program.to_string(),
                        seconds: self.timeout.as_secs(),
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(source) => {
                    let _ = child.kill();
                    return Err(ToolError::Io { program: program.to_string(), source });
                }
            }
        };

        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default()
            .trim()
            .to_string();

        check_status(program, status, stderr)
    }
}

fn spawn_error(program: &str, err: io::Error) -> ToolError {
    if err.kind() == io::ErrorKind::NotFound {
        ToolError::Missing { program: program.to_string() }
    } else {
        ToolError::Io { program: program.to_string(), source: err }
    }
}

fn check_status(program: &str, status: ExitStatus, stderr: String) -> Result<(), ToolError> {
    if status.success() {
        return Ok(());
    }
    Err(ToolError::Failed {
        program: program.to_string(),
        status: status.to_string(),
        stderr: if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
    })
}
