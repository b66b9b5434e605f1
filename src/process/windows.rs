//! Windows child handling: `cmd.exe` wants its `/c` line unquoted by std

use super::ExitReport;
use crate::error::{ListrunError, Result};
use crate::platform::ShellInvocation;
use std::os::windows::process::CommandExt;
use std::process::{Child, Command, ExitStatus};

pub(super) fn add_args(command: &mut Command, invocation: &ShellInvocation) {
    if invocation.raw_args {
        for arg in &invocation.args {
            command.raw_arg(arg);
        }
    } else {
        command.args(&invocation.args);
    }
}

pub(super) fn exit_report(status: ExitStatus) -> ExitReport {
    // Windows always carries a 32-bit exit code
    ExitReport::Code(status.code().unwrap_or(1))
}

/// Windows has no signals to forward; end the shell directly
pub(super) fn terminate(child: &mut Child) -> Result<()> {
    child
        .kill()
        .map_err(|e| ListrunError::WindowsError(format!("Failed to terminate child: {}", e)))
}
