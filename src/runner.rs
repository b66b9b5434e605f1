//! Process runner: spawn the listing command and relay its output
//!
//! Reader threads (see [`crate::stream`]) produce chunk events; this module
//! is the single consumer. It prefixes each chunk with its origin, writes it
//! to the matching console stream, and prints one exit line once both
//! streams are drained and the child has been reaped.

use crate::error::Result;
use crate::platform::{select_command, CommandSpec, Platform, ShellInvocation};
use crate::process::{ChildProcess, ExitReport};
use crate::signal::{forward_signal_to_child, SignalFlags};
use crate::stream::{spawn_reader, StreamEvent, StreamSource};
use std::io::Write;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// How often pending termination requests are checked while waiting for output
pub const SIGNAL_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Values resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    pub platform: Platform,
}

impl RunnerConfig {
    pub fn detect() -> Self {
        Self {
            platform: Platform::detect(),
        }
    }
}

pub struct Runner<O: Write, E: Write> {
    config: RunnerConfig,
    out: O,
    err: E,
    signals: Option<SignalFlags>,
}

impl<O: Write, E: Write> Runner<O, E> {
    pub fn new(config: RunnerConfig, out: O, err: E) -> Self {
        Self {
            config,
            out,
            err,
            signals: None,
        }
    }

    /// Forward termination requests seen on these flags to the child
    pub fn with_signals(mut self, signals: SignalFlags) -> Self {
        self.signals = Some(signals);
        self
    }

    /// Run the platform's listing command
    pub fn run(&mut self) -> Result<ExitReport> {
        let spec = select_command(self.config.platform);
        self.run_command(&spec)
    }

    /// Run an arbitrary command line through the platform shell
    pub fn run_command(&mut self, spec: &CommandSpec) -> Result<ExitReport> {
        let invocation = ShellInvocation::new(self.config.platform, spec);
        debug!(
            platform = %self.config.platform,
            shell = %invocation.shell,
            line = %spec.command_line(),
            "running listing command"
        );
        self.run_invocation(&invocation)
    }

    pub fn run_invocation(&mut self, invocation: &ShellInvocation) -> Result<ExitReport> {
        let mut child = ChildProcess::spawn(invocation)?;
        debug!(pid = child.id(), shell = child.shell(), "child spawned");

        let (tx, rx) = channel();
        let mut open_streams = 0usize;
        if let Some(stdout) = child.take_stdout() {
            spawn_reader(StreamSource::Stdout, stdout, tx.clone())?;
            open_streams += 1;
        }
        if let Some(stderr) = child.take_stderr() {
            spawn_reader(StreamSource::Stderr, stderr, tx.clone())?;
            open_streams += 1;
        }
        drop(tx);

        let mut forwarded = false;
        while open_streams > 0 {
            match rx.recv_timeout(SIGNAL_POLL_INTERVAL) {
                Ok(StreamEvent::Data(source, chunk)) => {
                    trace!(%source, bytes = chunk.len(), "chunk");
                    self.write_chunk(source, &chunk)?;
                }
                Ok(StreamEvent::Closed(source)) => {
                    debug!(%source, "stream closed");
                    open_streams -= 1;
                }
                Ok(StreamEvent::Failed(source, message)) => {
                    warn!(%source, error = %message, "stream read failed");
                    open_streams -= 1;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if !forwarded {
                forwarded = self.forward_pending_signal(&mut child);
            }
        }

        let report = child.wait()?;
        log_exit(report);
        writeln!(self.out, "child process exited with code {}", report)?;
        self.out.flush()?;
        Ok(report)
    }

    fn write_chunk(&mut self, source: StreamSource, chunk: &[u8]) -> Result<()> {
        let text = String::from_utf8_lossy(chunk);
        let sink: &mut dyn Write = match source {
            StreamSource::Stdout => &mut self.out,
            StreamSource::Stderr => &mut self.err,
        };
        writeln!(sink, "{}{}", source.prefix(), text)?;
        sink.flush()?;
        Ok(())
    }

    /// Returns true once a request has been handed to the child
    fn forward_pending_signal(&self, child: &mut ChildProcess) -> bool {
        let Some(signal) = self.signals.as_ref().and_then(|f| f.get_term_signal()) else {
            return false;
        };
        if let Err(e) = forward_signal_to_child(signal, child) {
            // The child may already be gone (e.g. it got the same Ctrl-C)
            debug!(error = %e, "could not forward termination request");
        }
        true
    }
}

#[cfg(unix)]
fn log_exit(report: ExitReport) {
    match report {
        ExitReport::Code(code) => debug!(code, "child exited"),
        ExitReport::Signal(sig) => debug!(
            signal = %crate::process::signal_name(sig),
            code = report.code(),
            "child killed by signal"
        ),
    }
}

#[cfg(windows)]
fn log_exit(report: ExitReport) {
    debug!(code = report.code(), "child exited");
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::ListrunError;
    use std::sync::atomic::Ordering;

    fn runner() -> Runner<Vec<u8>, Vec<u8>> {
        Runner::new(
            RunnerConfig {
                platform: Platform::Other,
            },
            Vec::new(),
            Vec::new(),
        )
    }

    fn run_line(line: &str) -> (ExitReport, String, String) {
        let mut runner = runner();
        let report = runner
            .run_command(&CommandSpec::new(line, Vec::<String>::new()))
            .unwrap();
        (
            report,
            String::from_utf8(runner.out).unwrap(),
            String::from_utf8(runner.err).unwrap(),
        )
    }

    fn exit_lines(out: &str) -> usize {
        out.lines()
            .filter(|l| l.starts_with("child process exited with code"))
            .count()
    }

    #[test]
    fn lists_current_directory() {
        // cargo runs tests from the package root
        let mut runner = runner();
        let report = runner.run().unwrap();
        let out = String::from_utf8(runner.out).unwrap();

        assert_eq!(report, ExitReport::Code(0));
        assert!(out.starts_with("stdout: "));
        assert!(out.contains("Cargo.toml"));
        assert!(out.ends_with("child process exited with code 0\n"));
        assert_eq!(exit_lines(&out), 1);
        assert!(runner.err.is_empty());
    }

    #[test]
    fn routes_stderr_separately() {
        let (report, out, err) = run_line("echo visible; echo oops 1>&2");
        assert!(report.success());
        assert_eq!(err, "stderr: oops\n\n");
        assert!(out.contains("stdout: visible\n"));
        assert!(!out.contains("oops"));
    }

    #[test]
    fn reports_nonzero_exit() {
        let (report, out, err) = run_line("ls ./listrun-definitely-missing");
        assert_ne!(report.code(), 0);
        assert!(err.starts_with("stderr: "));
        assert!(out.ends_with(&format!("child process exited with code {}\n", report.code())));
        assert_eq!(exit_lines(&out), 1);
    }

    #[test]
    fn missing_listing_executable_is_shell_exit_127() {
        let (report, out, err) = run_line("listrun-no-such-program");
        assert_eq!(report, ExitReport::Code(127));
        assert!(err.starts_with("stderr: "));
        assert_eq!(out, "child process exited with code 127\n");
    }

    #[test]
    fn stream_order_is_preserved() {
        let (_, out, _) = run_line("for i in 1 2 3 4 5; do echo line$i; sleep 0.02; done");
        let positions: Vec<usize> = (1..=5)
            .map(|i| out.find(&format!("line{}", i)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn signal_exit_uses_shell_encoding() {
        let (report, out, _) = run_line("kill -TERM $$");
        assert_eq!(report, ExitReport::Signal(15));
        assert_eq!(out, "child process exited with code 143\n");
    }

    #[test]
    fn pending_termination_request_is_forwarded() {
        let flags = SignalFlags::new();
        flags.sigterm_received.store(true, Ordering::SeqCst);
        let mut runner = runner().with_signals(flags);

        let report = runner
            .run_command(&CommandSpec::new("exec sleep 30", Vec::<String>::new()))
            .unwrap();
        assert_eq!(report, ExitReport::Signal(15));
    }

    #[test]
    fn spawn_failure_prints_nothing() {
        let mut runner = runner();
        let invocation = ShellInvocation {
            shell: "/nonexistent/listrun-shell".to_string(),
            args: vec!["-c".to_string(), "ls .".to_string()],
            raw_args: false,
        };
        let err = runner.run_invocation(&invocation).unwrap_err();
        assert!(matches!(err, ListrunError::Spawn { .. }));
        assert!(runner.out.is_empty());
        assert!(runner.err.is_empty());
    }
}
