// Signal Supervisor - owns the child process, the signal subscription and
// the lifecycle state machine

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::sync::Arc;
use std::time::Duration;

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tokio::process::Command;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn};

use gantry_core::{AppError, Result};

use crate::log_rotate::LogRotator;
use crate::shutdown::shutdown_channel;

const ROTATION_LOOP_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Supervisor lifecycle. `Exiting` is terminal; `Rotating` always returns
/// to `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Starting,
    Running,
    Rotating,
    Exiting,
}

/// Supervises one web-serving child for its whole lifetime.
///
/// Owns the process-wide signal subscription: termination signals are
/// forwarded to the child, the rotate signal triggers a log rotation
/// cycle, and the blocking wait on the child is the authoritative end of
/// life for every background activity.
pub struct Supervisor {
    rotator: Arc<LogRotator>,
    rotate_interval: Duration,
}

impl Supervisor {
    pub fn new(rotator: Arc<LogRotator>, rotate_interval: Duration) -> Self {
        Self {
            rotator,
            rotate_interval,
        }
    }

    /// Run the child to completion and return its normalized exit code.
    pub async fn run(&self, mut command: Command) -> Result<i32> {
        let mut state = State::Starting;

        let mut child = command.spawn()?;
        let pid = child
            .id()
            .map(|id| id as i32)
            .ok_or_else(|| AppError::InvalidState("Child exited before supervision began".into()))?;

        // One subscription for the supervisor's lifetime; nothing else in
        // the process reads signals.
        let mut term = signal(SignalKind::terminate())?;
        let mut int = signal(SignalKind::interrupt())?;
        let mut rotate = signal(SignalKind::user_defined1())?;

        let (shutdown_handle, shutdown_token) = shutdown_channel();
        let rotation_loop =
            self.rotator
                .clone()
                .start(pid, self.rotate_interval, shutdown_token);

        state = transition(state, State::Running);
        info!(pid, "Supervising child process");

        let raw_code = loop {
            tokio::select! {
                status = child.wait() => {
                    transition(state, State::Exiting);
                    break exit_code_from_status(status?);
                }
                _ = term.recv() => {
                    state = transition(state, State::Exiting);
                    forward(pid, Signal::SIGTERM);
                }
                _ = int.recv() => {
                    state = transition(state, State::Exiting);
                    forward(pid, Signal::SIGINT);
                }
                _ = rotate.recv(), if state == State::Running => {
                    state = transition(state, State::Rotating);
                    self.rotator.rotate_all(pid).await;
                    state = transition(state, State::Running);
                }
            }
        };

        shutdown_handle.shutdown();
        if tokio::time::timeout(ROTATION_LOOP_DRAIN_TIMEOUT, rotation_loop)
            .await
            .is_err()
        {
            warn!("Rotation loop did not drain in time");
        }

        Ok(handle_exit(raw_code, pid))
    }
}

fn transition(from: State, to: State) -> State {
    if from != to {
        info!(?from, ?to, "Supervisor state change");
    }
    to
}

fn forward(pid: i32, sig: Signal) {
    info!(pid, signal = %sig, "Forwarding signal to child");
    if let Err(e) = kill(Pid::from_raw(pid), sig) {
        warn!(pid, signal = %sig, error = %e, "Signal delivery failed");
    }
}

/// Raw exit code for a finished child: the real code when it exited, the
/// conventional `128 + signal` when it was terminated by a signal.
fn exit_code_from_status(status: ExitStatus) -> i32 {
    match status.code() {
        Some(code) => code,
        None => 128 + status.signal().unwrap_or(0),
    }
}

/// Normalize a child exit code for the orchestrator.
///
/// `128 + SIGTERM` and `128 + SIGINT` mean an operator-initiated,
/// expected shutdown and are rewritten to success; every other code
/// passes through so genuine crashes stay diagnosable.
pub fn handle_exit(raw_code: i32, pid: i32) -> i32 {
    let term = 128 + Signal::SIGTERM as i32;
    let int = 128 + Signal::SIGINT as i32;
    if raw_code == term || raw_code == int {
        info!(pid, raw_code, "Signal-induced shutdown, normalizing exit code to 0");
        return 0;
    }
    raw_code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigterm_code_normalizes_to_success() {
        assert_eq!(handle_exit(128 + Signal::SIGTERM as i32, 1), 0);
    }

    #[test]
    fn test_sigint_code_normalizes_to_success() {
        assert_eq!(handle_exit(128 + Signal::SIGINT as i32, 1), 0);
    }

    #[test]
    fn test_other_codes_pass_through() {
        assert_eq!(handle_exit(1, 1), 1);
        assert_eq!(handle_exit(0, 1), 0);
        assert_eq!(handle_exit(128 + Signal::SIGKILL as i32, 1), 137);
    }
}
