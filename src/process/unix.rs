use super::ExitReport;
use crate::error::Result;
use crate::platform::ShellInvocation;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::os::unix::process::ExitStatusExt;
use std::process::{Child, Command, ExitStatus};

pub(super) fn add_args(command: &mut Command, invocation: &ShellInvocation) {
    command.args(&invocation.args);
}

pub(super) fn exit_report(status: ExitStatus) -> ExitReport {
    match (status.code(), status.signal()) {
        (Some(code), _) => ExitReport::Code(code),
        (None, Some(sig)) => ExitReport::Signal(sig),
        // Stopped/continued statuses never reach wait() for a plain child
        (None, None) => ExitReport::Code(255),
    }
}

pub(super) fn send_signal(child: &Child, signal: Signal) -> Result<()> {
    kill(Pid::from_raw(child.id() as i32), signal)?;
    Ok(())
}

/// Human readable name for a signal number, e.g. `SIGTERM`
pub fn signal_name(sig: i32) -> String {
    Signal::try_from(sig)
        .map(|s| s.as_str().to_string())
        .unwrap_or_else(|_| format!("signal {}", sig))
}
