//! Termination request handling
//!
//! Handlers only flip atomic flags; the runner polls them between stream
//! events and forwards the first request to the child.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Flags set from signal (Unix) or console control (Windows) handlers
#[derive(Clone)]
pub struct SignalFlags {
    pub sigterm_received: Arc<AtomicBool>,
    pub sigint_received: Arc<AtomicBool>,
    pub sighup_received: Arc<AtomicBool>,
}

impl SignalFlags {
    pub fn new() -> Self {
        Self {
            sigterm_received: Arc::new(AtomicBool::new(false)),
            sigint_received: Arc::new(AtomicBool::new(false)),
            sighup_received: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn check_sigterm(&self) -> bool {
        self.sigterm_received.load(Ordering::SeqCst)
    }

    pub fn check_sigint(&self) -> bool {
        self.sigint_received.load(Ordering::SeqCst)
    }

    pub fn check_sighup(&self) -> bool {
        self.sighup_received.load(Ordering::SeqCst)
    }

    /// Check if any termination request was received
    pub fn should_terminate(&self) -> bool {
        self.check_sigterm() || self.check_sigint() || self.check_sighup()
    }

    /// Get the termination signal if any (Unix only)
    #[cfg(unix)]
    pub fn get_term_signal(&self) -> Option<nix::sys::signal::Signal> {
        use nix::sys::signal::{SIGHUP, SIGINT, SIGTERM};
        if self.check_sigterm() {
            Some(SIGTERM)
        } else if self.check_sigint() {
            Some(SIGINT)
        } else if self.check_sighup() {
            Some(SIGHUP)
        } else {
            None
        }
    }

    /// Get the termination request (Windows)
    #[cfg(windows)]
    pub fn get_term_signal(&self) -> Option<()> {
        if self.should_terminate() {
            Some(())
        } else {
            None
        }
    }
}

impl Default for SignalFlags {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::{forward_signal_to_child, setup_signal_handlers};

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::{forward_signal_to_child, setup_signal_handlers};
