//! Synchronous external-tool invocation with timeout enforcement.
//!
//! Each invocation runs with the run directory as its working directory,
//! captures stdout as the stage's primary textual result, and redirects
//! stderr to `<tool-basename>.stderr` inside the run directory. The stderr
//! artifact is written even on success so a failing sample can be diagnosed
//! offline.

use crate::error::RunnerError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// How often a running child is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How many trailing stderr lines are carried into an invocation error.
const STDERR_TAIL_LINES: usize = 40;

/// Runs one external tool to completion and returns its stdout.
///
/// `timeout` bounds this single invocation; exceeding it kills the child and
/// returns [`RunnerError::Timeout`]. A non-zero exit status returns
/// [`RunnerError::ToolInvocation`] carrying the tail of the captured stderr.
/// The stderr artifact stays on disk in every case.
pub fn run_command(
    desc: &str,
    program: &Path,
    args: &[String],
    run_dir: &Path,
    timeout: Option<Duration>,
) -> Result<String, RunnerError> {
    let basename = program
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string());
    let stderr_path = run_dir.join(format!("{basename}.stderr"));
    let stderr_file = File::create(&stderr_path)?;

    debug!(desc, command = %render_command(program, args), "invoking tool");
    let start = Instant::now();
    let mut child = Command::new(program)
        .args(args)
        .current_dir(run_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(stderr_file)
        .spawn()?;
    let mut stdout_pipe = child
        .stdout
        .take()
        .ok_or_else(|| RunnerError::Internal("child stdout was not piped".into()))?;

    // Drain stdout on a separate thread so a chatty tool cannot fill the
    // pipe and deadlock against the completion poll below.
    let reader = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stdout_pipe.read_to_end(&mut buf);
        buf
    });

    let deadline = timeout.map(|t| start + t);
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            // kill() may race a child that exited since try_wait.
            let _ = child.kill();
            let _ = child.wait();
            let _ = reader.join();
            return Err(RunnerError::Timeout {
                tool: basename,
                timeout_seconds: timeout.unwrap_or_default().as_secs(),
            });
        }
        thread::sleep(POLL_INTERVAL);
    };
    let stdout = reader.join().unwrap_or_default();
    debug!(desc, elapsed_ms = start.elapsed().as_millis() as u64, "tool complete");

    if !status.success() {
        return Err(RunnerError::ToolInvocation {
            tool: basename,
            status: status.code().unwrap_or(-1),
            stderr_tail: read_tail(&stderr_path),
        });
    }
    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

/// Renders a command line for logging.
fn render_command(program: &Path, args: &[String]) -> String {
    let mut parts = vec![program.display().to_string()];
    parts.extend(args.iter().cloned());
    parts.join(" ")
}

/// Returns the last [`STDERR_TAIL_LINES`] lines of the given file.
fn read_tail(path: &Path) -> String {
    let Ok(content) = std::fs::read(path) else {
        return String::new();
    };
    let content = String::from_utf8_lossy(&content);
    let lines: Vec<&str> = content.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[test]
    fn captures_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_command(
            "echo",
            Path::new("/bin/sh"),
            &sh("echo bits[8]:0x2a"),
            dir.path(),
            None,
        )
        .unwrap();
        assert_eq!(out.trim(), "bits[8]:0x2a");
    }

    #[test]
    fn writes_stderr_artifact_on_success() {
        let dir = tempfile::tempdir().unwrap();
        run_command(
            "warn",
            Path::new("/bin/sh"),
            &sh("echo a warning >&2"),
            dir.path(),
            None,
        )
        .unwrap();
        let stderr = std::fs::read_to_string(dir.path().join("sh.stderr")).unwrap();
        assert_eq!(stderr.trim(), "a warning");
    }

    #[test]
    fn runs_in_the_run_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("probe.txt"), "present").unwrap();
        let out = run_command(
            "cwd",
            Path::new("/bin/sh"),
            &sh("cat probe.txt"),
            dir.path(),
            None,
        )
        .unwrap();
        assert_eq!(out, "present");
    }

    #[test]
    fn nonzero_exit_carries_stderr_tail() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_command(
            "fail",
            Path::new("/bin/sh"),
            &sh("echo boom >&2; exit 3"),
            dir.path(),
            None,
        )
        .unwrap_err();
        let RunnerError::ToolInvocation {
            tool,
            status,
            stderr_tail,
        } = err
        else {
            panic!("expected ToolInvocation, got {err:?}");
        };
        assert_eq!(tool, "sh");
        assert_eq!(status, 3);
        assert_eq!(stderr_tail, "boom");
        // The artifact survives the failure for postmortem inspection.
        assert!(dir.path().join("sh.stderr").exists());
    }

    #[test]
    fn timeout_kills_the_child() {
        let dir = tempfile::tempdir().unwrap();
        let start = Instant::now();
        let err = run_command(
            "hang",
            Path::new("/bin/sh"),
            &sh("sleep 30"),
            dir.path(),
            Some(Duration::from_millis(200)),
        )
        .unwrap_err();
        assert!(matches!(err, RunnerError::Timeout { .. }));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn missing_tool_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_command(
            "missing",
            Path::new("/nonexistent/tool"),
            &[],
            dir.path(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, RunnerError::Io(_)));
    }
}
