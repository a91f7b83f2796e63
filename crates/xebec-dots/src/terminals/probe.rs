//! Version probes: run a terminal's `--version` style command through the
//! platform shell and keep a short, printable summary of its stdout.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::platform::Os;
use crate::sanitize::{strip_controls, truncate_chars};

pub const VERSION_UNAVAILABLE: &str = "N/A";
pub const MAX_VERSION_CHARS: usize = 20;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn shell_command(os: Os, command: &str) -> Command {
    let mut cmd = if os == Os::Windows {
        let mut c = Command::new("cmd");
        c.arg("/C");
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c");
        c
    };
    cmd.arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());
    cmd
}

/// Run `command` and return its cleaned first line, or [`VERSION_UNAVAILABLE`]
/// on spawn failure, non-zero exit or timeout.
pub fn probe_version(os: Os, command: &str, timeout: Duration) -> String {
    match run_with_timeout(shell_command(os, command), timeout) {
        Ok(stdout) => clean_version_output(&stdout),
        Err(reason) => {
            debug!(command, %reason, "version probe failed");
            VERSION_UNAVAILABLE.to_string()
        }
    }
}

/// Trim, keep the first line, drop escape sequences, cap the length.
pub fn clean_version_output(raw: &str) -> String {
    let trimmed = raw.trim();
    let first = trimmed.lines().next().unwrap_or("");
    let clean = strip_controls(first);
    truncate_chars(clean.trim(), MAX_VERSION_CHARS).to_string()
}

fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Result<String, String> {
    let deadline = Instant::now() + timeout;
    let mut child = cmd.spawn().map_err(|e| format!("spawn: {e}"))?;

    // Drain stdout on a helper thread so a chatty child cannot block on a full
    // pipe. A background process may keep the pipe open after the shell exits,
    // so the buffer is only awaited until the deadline and the thread is never
    // joined.
    let (tx, rx) = mpsc::channel::<Vec<u8>>();
    if let Some(mut out) = child.stdout.take() {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = out.read_to_end(&mut buf);
            let _ = tx.send(buf);
        });
    } else {
        drop(tx);
    }

    let timed_out = || format!("timed out after {}ms", timeout.as_millis());
    match wait_deadline(&mut child, deadline)? {
        Some(true) => {
            let left = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(left) {
                Ok(buf) => Ok(String::from_utf8_lossy(&buf).into_owned()),
                Err(RecvTimeoutError::Disconnected) => Ok(String::new()),
                Err(RecvTimeoutError::Timeout) => Err(timed_out()),
            }
        }
        Some(false) => Err("non-zero exit".into()),
        None => Err(timed_out()),
    }
}

// Some(success) once the child exits; None when it was killed at the deadline.
fn wait_deadline(child: &mut Child, deadline: Instant) -> Result<Option<bool>, String> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status.success())),
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Ok(None);
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                let _ = child.kill();
                return Err(format!("wait: {e}"));
            }
        }
    }
}
