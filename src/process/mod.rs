//! Child process handle
//!
//! Spawning, stdio plumbing and waiting are shared; decoding the exit status
//! and delivering termination requests differ per platform.

use crate::error::{ListrunError, Result};
use crate::platform::ShellInvocation;
use std::fmt;
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::signal_name;

#[cfg(windows)]
mod windows;

/// How the child terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReport {
    /// Normal exit with the given status code
    Code(i32),
    /// Killed by the given signal number
    Signal(i32),
}

impl ExitReport {
    /// Integer form of the report; signals use the shell's `128 + n` encoding
    pub fn code(self) -> i32 {
        match self {
            ExitReport::Code(code) => code,
            ExitReport::Signal(sig) => 128 + sig,
        }
    }

    pub fn success(self) -> bool {
        self == ExitReport::Code(0)
    }
}

impl fmt::Display for ExitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A spawned shell running the listing command
pub struct ChildProcess {
    child: Child,
    shell: String,
}

impl ChildProcess {
    /// Launch the shell with stdout and stderr piped and stdin inherited
    pub fn spawn(invocation: &ShellInvocation) -> Result<Self> {
        let mut command = Command::new(&invocation.shell);
        add_args(&mut command, invocation);
        command
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = command.spawn().map_err(|source| ListrunError::Spawn {
            program: invocation.shell.clone(),
            source,
        })?;

        Ok(Self {
            child,
            shell: invocation.shell.clone(),
        })
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// Take ownership of the child's stdout pipe (only once)
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    /// Take ownership of the child's stderr pipe (only once)
    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.stderr.take()
    }

    /// Block until the child exits
    pub fn wait(&mut self) -> Result<ExitReport> {
        let status = self.child.wait().map_err(ListrunError::Wait)?;
        Ok(exit_report(status))
    }

    /// Deliver a termination request to the child
    #[cfg(unix)]
    pub fn terminate(&mut self, signal: nix::sys::signal::Signal) -> Result<()> {
        unix::send_signal(&self.child, signal)
    }

    /// Deliver a termination request to the child
    #[cfg(windows)]
    pub fn terminate(&mut self, _signal: ()) -> Result<()> {
        windows::terminate(&mut self.child)
    }
}

#[cfg(unix)]
use unix::{add_args, exit_report};
#[cfg(windows)]
use windows::{add_args, exit_report};

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::platform::{CommandSpec, Platform};
    use std::io::Read;

    fn sh(line: &str) -> ShellInvocation {
        ShellInvocation::with_comspec(Platform::Other, &CommandSpec::new(line, Vec::<String>::new()), None)
    }

    #[test]
    fn exit_report_encoding() {
        assert_eq!(ExitReport::Code(2).code(), 2);
        assert_eq!(ExitReport::Signal(9).code(), 137);
        assert_eq!(ExitReport::Signal(15).to_string(), "143");
        assert!(ExitReport::Code(0).success());
        assert!(!ExitReport::Signal(0).success());
    }

    #[test]
    fn spawns_through_shell_and_reports_code() {
        let mut child = ChildProcess::spawn(&sh("echo test; exit 4")).unwrap();
        assert_eq!(child.shell(), "/bin/sh");

        let mut out = String::new();
        child.take_stdout().unwrap().read_to_string(&mut out).unwrap();
        assert_eq!(out, "test\n");
        assert!(child.take_stdout().is_none());

        assert_eq!(child.wait().unwrap(), ExitReport::Code(4));
    }

    #[test]
    fn missing_shell_is_spawn_error() {
        let invocation = ShellInvocation {
            shell: "/nonexistent/listrun-shell".to_string(),
            args: vec!["-c".to_string(), "ls".to_string()],
            raw_args: false,
        };
        match ChildProcess::spawn(&invocation) {
            Err(ListrunError::Spawn { program, .. }) => {
                assert_eq!(program, "/nonexistent/listrun-shell")
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("spawn should fail"),
        }
    }

    #[test]
    fn terminate_reports_signal() {
        let mut child = ChildProcess::spawn(&sh("exec sleep 30")).unwrap();
        child.terminate(nix::sys::signal::SIGTERM).unwrap();
        assert_eq!(child.wait().unwrap(), ExitReport::Signal(15));
    }
}
